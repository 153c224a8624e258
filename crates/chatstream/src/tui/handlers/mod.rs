//! Event handlers for the TUI

pub mod keyboard;
pub mod rendering;
