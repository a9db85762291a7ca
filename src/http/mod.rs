//! HTTP Protocol.
mod method;
mod version;

pub use method::{Method, UnknownMethod};
pub use version::{Version, VersionError};
