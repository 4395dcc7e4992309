use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use todolist_core::service::dto::{display_id, summary_line};
use todolist_core::{Counts, Filter, ShortIds, Todo, TodoDto};

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Todo")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<TodoDto> for TodoRow {
    fn from(dto: TodoDto) -> Self {
        Self {
            id: dto.short_id,
            done: if dto.completed { "[x]" } else { "[ ]" }.to_string(),
            text: dto.text,
            created: dto.created,
        }
    }
}

pub fn show_list(todos: &[&Todo], filter: Filter, counts: &Counts, short_ids: &ShortIds) {
    if todos.is_empty() {
        println!("{}", empty_message(filter));
    } else {
        let rows: Vec<TodoRow> = todos
            .iter()
            .map(|t| TodoRow::from(TodoDto::from_entity(t, short_ids)))
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

        println!("{}", table);
    }
    println!("{}", summary_line(counts));
}

pub fn show_todo(verb: &str, todo: &Todo, short_ids: &ShortIds) {
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    let id = display_id(&todo.id, short_ids);
    println!("{} {} {} (ID: {})", verb, mark, todo.text, id);
}

pub fn show_stats(counts: &Counts) {
    println!("Total:     {}", counts.total);
    println!("Active:    {}", counts.active);
    println!("Completed: {}", counts.completed);
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No todos yet. Add one with `todolist add <text>`.",
        Filter::Active => "All todos are completed!",
        Filter::Completed => "No completed todos yet.",
    }
}
