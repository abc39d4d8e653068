//! Input subsystem: terminal polling, the key table, and jump target parsing.

pub mod jump;
pub mod raw;
pub mod service;

pub use jump::resolve_jump_target;
pub use raw::ScrollDirection;
pub use service::{
    spawn_input_thread, InputAction, InputService, InputState, InputStateMachine, PromptKind,
};
