/// Access to the page URL and its navigation history.
pub trait HistoryBackend {
    /// Current fragment including the leading `#`, or an empty string
    fn fragment(&self) -> String;

    /// Pushes a new history entry whose URL differs only in its fragment
    fn push_fragment(&mut self, fragment: &str);

    /// Shareable address of the current entry
    fn href(&self) -> String;

    /// Steps one entry back; returns false when there is nothing to go back to
    fn back(&mut self) -> bool;

    /// Steps one entry forward; returns false at the newest entry
    fn forward(&mut self) -> bool;
}

/// In-process history used by the native build and by tests.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    base: String,
    entries: Vec<String>,
    current: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryHistory {
    /// Starts with a single entry holding `fragment`.
    pub fn new(fragment: &str) -> Self {
        Self {
            base: "icon-editor://local/".to_owned(),
            entries: vec![normalize(fragment)],
            current: 0,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }
}

impl HistoryBackend for MemoryHistory {
    fn fragment(&self) -> String {
        self.entries[self.current].clone()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(normalize(fragment));
        self.current = self.entries.len() - 1;
    }

    fn href(&self) -> String {
        format!("{}{}", self.base, self.fragment())
    }

    fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.current + 1 >= self.entries.len() {
            return false;
        }
        self.current += 1;
        true
    }
}

fn normalize(fragment: &str) -> String {
    let body = fragment.trim_start_matches('#');
    if body.is_empty() {
        String::new()
    } else {
        format!("#{body}")
    }
}

/// The browser's `location` and `history` objects.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl HistoryBackend for BrowserHistory {
    fn fragment(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default()
    }

    fn push_fragment(&mut self, fragment: &str) {
        let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
            log::error!("No history object, cannot store {}", fragment);
            return;
        };
        if let Err(err) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(fragment)) {
            log::error!("pushState failed: {:?}", err);
        }
    }

    fn href(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default()
    }

    fn back(&mut self) -> bool {
        web_sys::window()
            .and_then(|window| window.history().ok())
            .is_some_and(|history| history.back().is_ok())
    }

    fn forward(&mut self) -> bool {
        web_sys::window()
            .and_then(|window| window.history().ok())
            .is_some_and(|history| history.forward().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("#a=1");
        history.push_fragment("#a=2");
        history.push_fragment("#a=3");
        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.fragment(), "#a=1");

        history.push_fragment("#a=4");
        assert_eq!(history.entries(), ["#a=1", "#a=4"]);
        assert!(!history.forward());
    }

    #[test]
    fn test_normalizes_fragments() {
        let history = MemoryHistory::new("shapes=1").with_base("https://example.test/");
        assert_eq!(history.fragment(), "#shapes=1");
        assert_eq!(history.href(), "https://example.test/#shapes=1");
        assert_eq!(MemoryHistory::new("#").fragment(), "");
    }
}
