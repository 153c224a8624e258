//! Chat session state and request streaming

pub mod cancellation;
pub mod driver;
pub mod events;
pub mod message;
pub mod session;
pub mod state;

pub use cancellation::ChatCancellation;
pub use driver::{stream_reply, PendingRequest};
pub use events::{StreamEnd, StreamUpdate, UpdateKind};
pub use message::{Message, Role};
pub use session::{ChatSession, CANCELLED_MESSAGE, CONNECTION_ERROR_MESSAGE};
pub use state::{RequestOutcome, RequestPhase, RequestState};
