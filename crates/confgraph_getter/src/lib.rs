//! Module fetching for confgraph (Layer 2).
//!
//! Remote modules are downloaded into a cache directory before their
//! resources are loaded. [`ModuleGetter`] decides whether a download is
//! needed and where it lands; the transport itself is an injected
//! [`Download`] client.

pub mod error;
mod getter;

pub use error::{DownloadError, GetterError};
pub use getter::{Download, Getter, ModuleGetter, cache_slot_name};
