pub mod text;

pub use text::{display_width, truncate_ellipsis, wrap_text};
