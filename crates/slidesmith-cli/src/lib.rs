//! slidesmith CLI - command-line interface library
//!
//! Two entry points over the slidesmith pipeline:
//! - Generate: content tree + design document to a finished `.pptx`
//! - Serve: the command dispatcher over stdin/stdout, one JSON record
//!   per line
//!
//! # Binary Usage
//!
//! ```bash
//! # Generate a deck
//! slidesmith generate -c data/slide_content.json -d data/design_system.json
//!
//! # Drive the dispatcher interactively
//! echo '{"operation":"create_presentation"}' | slidesmith serve
//! ```

pub mod app;

pub use app::{generate_command, run_cli, serve_command};
