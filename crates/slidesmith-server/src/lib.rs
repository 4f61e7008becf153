//! # slidesmith-server
//!
//! Session-keyed command dispatcher over slidesmith documents.
//!
//! Clients hold opaque presentation handles and drive documents through
//! single-operation requests: create or open a deck, add slides and
//! content, save, or run the full template pipeline in one call. Every
//! operation answers with a structured response; failures are data, never
//! a crash of the hosting process.
//!
//! The wire transport is left to the caller. [`Dispatcher::handle_line`]
//! accepts one JSON request record per line, which is all the bundled CLI
//! driver needs.

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod session;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
pub use protocol::{Request, Response};
pub use session::SessionManager;
