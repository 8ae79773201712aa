//! Application Services
//!
//! Stateful coordination above the use cases.

mod sizing_session;

pub use sizing_session::SizingSession;
