pub mod controller;
pub mod edit_buffer;
pub mod event;
pub mod intent;
pub mod mode;
pub mod state;

pub use controller::Controller;
pub use edit_buffer::EditBuffer;
pub use intent::Intent;
pub use state::{AppState, UiState};
