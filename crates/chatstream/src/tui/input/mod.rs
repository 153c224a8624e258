//! Input handling for the chat view

pub mod editor;

pub use editor::{InputAction, InputEditor};
