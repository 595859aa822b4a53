//! Host abstraction layer
//!
//! Everything the game needs from its host, kept behind small types so the
//! core never touches a real clock or event loop:
//! - Frame scheduling
//! - Keyboard input

pub mod input;
pub mod scheduler;

pub use input::{InputHandler, Key};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
