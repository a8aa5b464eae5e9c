use serde::de::DeserializeOwned;
use serde::Serialize;

use super::history::HistoryBackend;
use super::store::HashedStateStore;
use crate::error::HashedStateError;

/// A typed slot in a [`HashedStateStore`] with a caller-supplied default.
#[derive(Debug, Clone)]
pub struct HashedValue<T> {
    name: String,
    value: T,
    default: T,
}

impl<T> HashedValue<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(name: impl Into<String>, default: T) -> Self {
        Self {
            name: name.into(),
            value: default.clone(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value; the URL follows after the store's debounce.
    pub fn set<B: HistoryBackend>(
        &mut self,
        store: &mut HashedStateStore<B>,
        value: T,
        now: f64,
    ) -> Result<(), HashedStateError> {
        store.write(&self.name, &value, now)?;
        self.value = value;
        Ok(())
    }

    /// Reloads the value from the fragment, falling back to the default when
    /// the fragment has no usable segment for it.
    pub fn refresh<B: HistoryBackend>(&mut self, store: &mut HashedStateStore<B>) {
        self.value = store
            .read_as(&self.name)
            .unwrap_or_else(|| self.default.clone());
    }
}
