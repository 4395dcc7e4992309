use anyhow::{anyhow, Result};
use todolist_core::repository::FileSlotStorage;
use todolist_core::{
    resolve_id, short_ids, BackendConfig, Config, Counts, Filter, HttpTodoApi, LocalTodoStore,
    RemoteTodoStore, ShortIds, StoreError, Todo, TodoId,
};

/// Whichever store the config picked. Local calls are synchronous, remote
/// ones are awaited; callers see the same surface.
pub enum Backend {
    Local(LocalTodoStore<FileSlotStorage>),
    Remote(RemoteTodoStore<HttpTodoApi>),
}

impl Backend {
    pub fn open(config: &Config) -> Result<Self> {
        match &config.backend {
            BackendConfig::Local(local) => {
                let storage = FileSlotStorage::new(local.data_dir.clone())?;
                tracing::debug!(dir = %storage.dir().display(), key = %local.key, "using local todo file");
                Ok(Backend::Local(LocalTodoStore::new(storage, local.key.clone())))
            }
            BackendConfig::Remote(remote) => {
                let api = HttpTodoApi::open(remote)?;
                tracing::debug!(base_url = api.base_url(), "using remote todo collection");
                Ok(Backend::Remote(RemoteTodoStore::new(api)))
            }
        }
    }

    pub fn close(self) {
        match self {
            Backend::Local(_) => {}
            Backend::Remote(store) => store.into_api().close(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let result = match self {
            Backend::Local(store) => store.load(),
            Backend::Remote(store) => store.load().await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub async fn add(&mut self, text: &str) -> Result<Option<Todo>> {
        let result = match self {
            Backend::Local(store) => store.add(text),
            Backend::Remote(store) => store.add(text).await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub async fn toggle(&mut self, id: &TodoId) -> Result<Todo> {
        let result = match self {
            Backend::Local(store) => store.toggle(id),
            Backend::Remote(store) => store.toggle(id).await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub async fn edit(&mut self, id: &TodoId, text: &str) -> Result<Option<Todo>> {
        let result = match self {
            Backend::Local(store) => store.edit(id, text),
            Backend::Remote(store) => store.edit(id, text).await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub async fn remove(&mut self, id: &TodoId) -> Result<Todo> {
        let result = match self {
            Backend::Local(store) => store.remove(id),
            Backend::Remote(store) => store.remove(id).await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub async fn clear_completed(&mut self) -> Result<usize> {
        let result = match self {
            Backend::Local(store) => store.clear_completed(),
            Backend::Remote(store) => store.clear_completed().await,
        };
        result.map_err(|e| self.surface(e))
    }

    pub fn filter(&self, filter: Filter) -> Vec<&Todo> {
        match self {
            Backend::Local(store) => store.filter(filter),
            Backend::Remote(store) => store.filter(filter),
        }
    }

    pub fn counts(&self) -> Counts {
        match self {
            Backend::Local(store) => store.counts(),
            Backend::Remote(store) => store.counts(),
        }
    }

    /// Turns a user-typed id or id prefix into a known id.
    pub fn resolve(&self, input: &str) -> Result<TodoId> {
        Ok(resolve_id(input, self.ids())?)
    }

    /// Display ids over every loaded record, so each one resolves.
    pub fn short_ids(&self) -> ShortIds {
        short_ids(self.ids())
    }

    fn ids(&self) -> Vec<&TodoId> {
        match self {
            Backend::Local(store) => store.list().ids().collect(),
            Backend::Remote(store) => store.list().ids().collect(),
        }
    }

    fn last_error(&self) -> Option<&str> {
        match self {
            Backend::Local(store) => store.last_error(),
            Backend::Remote(store) => store.last_error(),
        }
    }

    /// Prefers the store's user-facing message over the raw error.
    fn surface(&self, err: StoreError) -> anyhow::Error {
        match self.last_error() {
            Some(message) => anyhow!(message.to_string()),
            None => err.into(),
        }
    }
}
