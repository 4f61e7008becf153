//! # slidesmith-core
//!
//! Style configuration, content classification, and the content-to-layout
//! mapper.
//!
//! This crate turns a pair of JSON documents, a design document (typography,
//! colors, spacing, table styles) and a content tree (title plus ordered
//! topics), into a finished presentation by driving the document layer in
//! `slidesmith-pptx`. Classification happens once, up front; rendering then
//! matches the tagged tree exhaustively, so every content shape has exactly
//! one documented outcome.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let output = slidesmith_core::generate_deck(
//!     Path::new("data/design_system.json"),
//!     Path::new("data/slide_content.json"),
//!     None,
//! )?;
//! println!("wrote {}", output.display());
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod mapper;

pub use config::{load_content, load_design, output_path_for, DesignConfig};
pub use content::{ContentTree, Instructor, Item, Subtopic, SubtopicBody, TermPair, Topic, TopicContent};
pub use error::{GenError, Result};
pub use mapper::{generate_deck, Generator};
