//! # tabless - Terminal Viewer for Delimited Tabular Text Files
//!
//! A spreadsheet-style viewer for CSV/TSV-like files that loads rows
//! incrementally at idle priority, so large files can be inspected without
//! the interface ever blocking.
//!
//! ## Features
//!
//! - **Dialect sniffing**: delimiter, quoting and header presence are
//!   inferred from a bounded sample of the file
//! - **Incremental loading**: rows are fed to the grid by a resumable step
//!   function that yields to the event loop on a fixed cadence
//! - **Encoding fallback**: fields are decoded through an ordered chain of
//!   text encodings, with lossy replacement as the last resort
//! - **Light formatting**: right-aligned numeric columns, zebra striping,
//!   and a synthetic thousands-grouped row-index column
//!
//! ## Architecture
//!
//! The library is organized into focused modules following modern Rust patterns:
//!
//! - [`error`] - Centralized error types and handling
//! - [`source`] - File validation, sampling and reader construction
//! - [`dialect`] - Delimiter/quote/header sniffing
//! - [`decode`] - Per-field text decoding with encoding fallback
//! - [`grid`] - Presentation surface trait and the in-memory grid model
//! - [`feeder`] - The resumable row feeder
//! - [`ui`] - Terminal user interface components
//! - [`app`] - Application core and event loop

// Core modules
pub mod decode;
pub mod dialect;
pub mod error;
pub mod feeder;
pub mod grid;
pub mod source;

// Presentation and coordination
pub mod app;
pub mod ui;

// Re-export commonly used types for convenience
pub use error::{Result, TablessError};

// Public API surface for external usage
pub use app::Application;
pub use dialect::{Dialect, Quote, Sniff};
pub use feeder::{FeederStatus, RowFeeder};
pub use grid::{ColumnAlign, GridModel, GridSurface};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
