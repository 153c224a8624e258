pub mod toast;

pub use toast::{render_toasts, Toast, ToastQueue};
