//! Handle generation
//!
//! The single entry point the rest of a service uses to mint primary keys
//! and pagination cursors. Handles are fixed-length printable ASCII strings
//! that sort newest-first under byte-wise (ordinal) comparison, which is
//! what a key-value store's range scans use.
//!
//! | Kind       | Symbols | Entropy bits | Use                                     |
//! |------------|---------|--------------|-----------------------------------------|
//! | Short      | 11      | 23           | comments, replies, likes, relationships |
//! | Long       | 13      | 35           | blobs, images                           |
//! | Sequential | 11      | 0            | strictly ordered in-process cursors     |
//!
//! Entropy widths are the defaults; see `GeneratorConfig`.
//!
//! Consumers must treat handles as opaque and compare them byte-wise only.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod generator;
pub mod handle;

pub use generator::HandleGenerator;
pub use handle::{Handle, HandleKind};
