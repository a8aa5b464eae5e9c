mod draw_mode;
pub mod machine;

pub use draw_mode::{DrawMode, VertexRef};
pub use machine::DrawStateMachine;
