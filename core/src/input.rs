use std::collections::HashMap;

use thiserror::Error;

use crate::model::todo::TodoId;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no todo matches '{0}'")]
    Unknown(String),
    #[error("'{prefix}' is ambiguous, it matches {}", .matches.join(", "))]
    Ambiguous { prefix: String, matches: Vec<String> },
}

/// Joins command line words into todo text.
pub fn join_words(args: &[String]) -> String {
    args.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the id a user meant. An exact match wins, otherwise the prefix has
/// to match exactly one candidate.
pub fn resolve_id<'a, I>(input: &str, candidates: I) -> Result<TodoId, ResolveError>
where
    I: IntoIterator<Item = &'a TodoId>,
{
    let input = input.trim();
    if input.is_empty() {
        return Err(ResolveError::Unknown(input.to_string()));
    }

    let candidates: Vec<&TodoId> = candidates.into_iter().collect();

    // 1. Exact match
    if let Some(id) = candidates.iter().find(|id| id.as_str() == input) {
        return Ok((*id).clone());
    }

    // 2. Prefix match
    let matches: Vec<&TodoId> = candidates
        .into_iter()
        .filter(|id| id.as_str().starts_with(input))
        .collect();

    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => Err(ResolveError::Unknown(input.to_string())),
        _ => Err(ResolveError::Ambiguous {
            prefix: input.to_string(),
            matches: matches.iter().map(|id| id.to_string()).collect(),
        }),
    }
}

pub const MIN_SHORT_ID_LEN: usize = 8;

/// Display id for each record, keyed by its full id.
pub type ShortIds = HashMap<TodoId, String>;

/// Shortest prefix of each id that no other id in `ids` shares, never
/// shorter than `MIN_SHORT_ID_LEN` characters. Each prefix resolves back to
/// its own id through `resolve_id` over the same ids.
pub fn short_ids<'a, I>(ids: I) -> ShortIds
where
    I: IntoIterator<Item = &'a TodoId>,
{
    let mut sorted: Vec<&TodoId> = ids.into_iter().collect();
    sorted.sort();
    sorted.dedup();

    // In sorted order the longest prefix an id shares is with a neighbour.
    let shared: Vec<usize> = sorted
        .windows(2)
        .map(|pair| common_prefix_len(pair[0].as_str(), pair[1].as_str()))
        .collect();

    sorted
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let before = i.checked_sub(1).map_or(0, |j| shared[j]);
            let after = shared.get(i).copied().unwrap_or(0);
            let len = (before.max(after) + 1).max(MIN_SHORT_ID_LEN);
            ((*id).clone(), take_chars(id.as_str(), len).to_string())
        })
        .collect()
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::Todo;

    #[test]
    fn test_join_words() {
        let args = vec![
            "Buy".to_string(),
            " milk ".to_string(),
            "".to_string(),
            "today".to_string(),
        ];
        assert_eq!(join_words(&args), "Buy milk today");
        assert_eq!(join_words(&[]), "");
    }

    #[test]
    fn test_resolve_id() {
        let ids: Vec<TodoId> = vec!["abc123".into(), "abd456".into(), "abc".into()];

        assert_eq!(resolve_id("abc", &ids).unwrap().as_str(), "abc");
        assert_eq!(resolve_id("abd", &ids).unwrap().as_str(), "abd456");
        assert_eq!(resolve_id("abc1", &ids).unwrap().as_str(), "abc123");

        // Ambiguous
        assert!(matches!(
            resolve_id("ab", &ids),
            Err(ResolveError::Ambiguous { .. })
        ));

        // Unknown
        assert_eq!(
            resolve_id("zzz", &ids),
            Err(ResolveError::Unknown("zzz".to_string()))
        );
        assert!(resolve_id("  ", &ids).is_err());
    }

    #[test]
    fn test_short_ids_tell_back_to_back_todos_apart() {
        let first = Todo::new("a").unwrap();
        let second = Todo::new("b").unwrap();
        let ids = vec![first.id.clone(), second.id.clone()];

        let shorts = short_ids(&ids);
        let (a, b) = (&shorts[&first.id], &shorts[&second.id]);
        assert_ne!(a, b);
        assert!(a.len() >= MIN_SHORT_ID_LEN);
        assert_eq!(resolve_id(a, &ids).unwrap(), first.id);
        assert_eq!(resolve_id(b, &ids).unwrap(), second.id);
    }

    #[test]
    fn test_short_ids_grow_past_shared_prefix() {
        let ids: Vec<TodoId> = vec![
            "65a1f0c2e4b0a1b2c3d4e5f6".into(),
            "65a1f0c2e4b0a1b2c3d4e5f7".into(),
            "65a1f0c3aaaaaaaaaaaaaaaa".into(),
            "abc".into(),
        ];
        let shorts = short_ids(&ids);

        assert_eq!(shorts[&ids[0]], "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(shorts[&ids[1]], "65a1f0c2e4b0a1b2c3d4e5f7");
        assert_eq!(shorts[&ids[2]], "65a1f0c3");
        assert_eq!(shorts[&ids[3]], "abc");
        for id in &ids {
            assert_eq!(&resolve_id(&shorts[id], &ids).unwrap(), id);
        }
    }
}
