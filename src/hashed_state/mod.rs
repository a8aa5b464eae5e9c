//! Application state kept in the URL fragment.
//!
//! The fragment is the source of truth: `#shapes=<json>#other=<json>`. Each
//! value is JSON, percent-encoded like `encodeURIComponent`. Writes update
//! memory at once and reach the URL after a short quiet period, one history
//! entry per committed change, so back/forward doubles as undo/redo.

mod fragment;
mod history;
mod store;
mod value;

pub use fragment::{decode_value, encode_value, Fragment};
pub use history::{HistoryBackend, MemoryHistory};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use store::HashedStateStore;
pub use value::HashedValue;
