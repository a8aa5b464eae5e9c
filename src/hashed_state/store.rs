use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::fragment::{decode_value, encode_value, Fragment};
use super::history::HistoryBackend;
use crate::error::HashedStateError;

/// Name → JSON value store whose persistent form is the URL fragment.
///
/// Timestamps are seconds on any monotonic clock (see
/// [`crate::util::time::current_time_secs`]); passing them in keeps the
/// debounce testable.
#[derive(Debug)]
pub struct HashedStateStore<B: HistoryBackend> {
    backend: B,
    values: HashMap<String, Value>,
    /// Keys written since the last commit, in first-write order
    dirty: Vec<String>,
    /// The single pending debounce deadline
    flush_deadline: Option<f64>,
    debounce: Duration,
    /// Fragment after our last commit or last noticed outside change
    last_seen_fragment: String,
}

impl<B: HistoryBackend> HashedStateStore<B> {
    pub fn new(backend: B, debounce: Duration) -> Self {
        let last_seen_fragment = backend.fragment();
        Self {
            backend,
            values: HashMap::new(),
            dirty: Vec::new(),
            flush_deadline: None,
            debounce,
            last_seen_fragment,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// In-memory value for `name`, including writes not yet committed
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads `name` from the current fragment into memory.
    ///
    /// Returns `None` and leaves memory untouched when the key is absent or
    /// its segment is malformed.
    pub fn read(&mut self, name: &str) -> Option<Value> {
        let value = self.read_fragment_value(name)?;
        self.values.insert(name.to_owned(), value.clone());
        Some(value)
    }

    /// Like [`read`](Self::read), additionally deserializing into `T`.
    pub fn read_as<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        let value = self.read_fragment_value(name)?;
        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) => {
                self.values.insert(name.to_owned(), value);
                Some(typed)
            }
            Err(err) => {
                log::warn!("Ignoring '{}' segment with unexpected shape: {}", name, err);
                None
            }
        }
    }

    fn read_fragment_value(&self, name: &str) -> Option<Value> {
        let fragment = Fragment::parse(&self.backend.fragment());
        let raw = fragment.get(name)?;
        match decode_value(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Ignoring malformed '{}' segment: {}", name, err);
                None
            }
        }
    }

    /// Stores `value` under `name` right away and (re)starts the debounce.
    ///
    /// The URL changes on the first [`poll`](Self::poll) at or after
    /// `now + debounce` with no further writes in between.
    pub fn write<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        now: f64,
    ) -> Result<(), HashedStateError> {
        let value = serde_json::to_value(value)?;
        self.values.insert(name.to_owned(), value);
        if !self.dirty.iter().any(|key| key == name) {
            self.dirty.push(name.to_owned());
        }
        self.flush_deadline = Some(now + self.debounce.as_secs_f64());
        Ok(())
    }

    pub fn has_pending_write(&self) -> bool {
        self.flush_deadline.is_some()
    }

    /// Time left before the pending write is due, if there is one.
    pub fn time_until_flush(&self, now: f64) -> Option<Duration> {
        self.flush_deadline
            .map(|deadline| Duration::from_secs_f64((deadline - now).max(0.0)))
    }

    /// Commits the pending write once its deadline has passed.
    ///
    /// Returns `Ok(true)` when a history entry was pushed.
    pub fn poll(&mut self, now: f64) -> Result<bool, HashedStateError> {
        match self.flush_deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => Ok(false),
        }
    }

    /// Commits pending writes immediately, ignoring the debounce.
    pub fn flush(&mut self) -> Result<bool, HashedStateError> {
        self.flush_deadline = None;
        if self.dirty.is_empty() {
            return Ok(false);
        }

        let mut fragment = Fragment::parse(&self.backend.fragment());
        for name in self.dirty.drain(..) {
            if let Some(value) = self.values.get(&name) {
                fragment.set(&name, &encode_value(value)?);
            }
        }

        let fragment = fragment.to_string();
        self.backend.push_fragment(&fragment);
        self.last_seen_fragment = self.backend.fragment();
        log::info!("Committed state to URL ({} bytes)", fragment.len());
        Ok(true)
    }

    /// Detects a fragment change made outside this store, such as
    /// back/forward navigation or a hand-edited URL.
    ///
    /// A pending write is dropped because the navigated-to state wins.
    /// Callers should re-[`read`](Self::read) their keys when this returns true.
    pub fn sync_external(&mut self) -> bool {
        let current = self.backend.fragment();
        if current == self.last_seen_fragment {
            return false;
        }

        log::debug!("Fragment changed externally: {}", current);
        if self.flush_deadline.take().is_some() {
            log::debug!("Dropping pending write for {:?}", self.dirty);
        }
        self.dirty.clear();
        self.last_seen_fragment = current;
        true
    }
}
