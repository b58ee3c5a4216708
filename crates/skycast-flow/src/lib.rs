//! The Skycast session flow.
//!
//! A long-lived per-user state machine binding location search, the
//! candidate cache, the user store, and the forecast formatter to typed
//! inbound events. The chat transport turns raw input into [`Event`]s and
//! renders [`Response`]s back into UI elements; nothing here touches a
//! transport directly.

pub mod event;
pub mod response;
pub mod session;

pub use event::Event;
pub use response::Response;
pub use session::SessionFlow;
