//! codernet-mirror: mirror the PDF books of a single catalog site into a local directory tree.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod mirror;
pub mod model;

// Re-exports for CLI and consumers.
pub use catalog::{list_documents, list_entries, CatalogClient, Fetch, FetchError};
pub use mirror::{materialize, plan, run, Failure, MaterializeError, PlannedDownload, RunOptions};
pub use model::{DocumentLink, DownloadResult, EntryLink, ErrorRecord};
