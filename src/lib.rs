#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hashed_state;
pub mod input;
pub mod raster;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod texture_manager;
pub mod util;

pub use app::IconEditorApp;
pub use config::EditorConfig;
pub use error::{ConfigError, ExportError, HashedStateError};
pub use geometry::Point;
pub use hashed_state::{HashedStateStore, HashedValue, HistoryBackend, MemoryHistory};
pub use input::{InputEvent, InputHandler, PointerTarget};
pub use renderer::VectorDocument;
pub use shape::Shape;
pub use state::{DrawMode, DrawStateMachine, VertexRef};
