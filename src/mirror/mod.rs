//! Download orchestration: entry by entry, document by document, strictly sequential.

mod materialize;
pub mod paths;

pub use materialize::{ensure_dir, materialize, MaterializeError};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{self, Fetch, FetchError};
use crate::model::{DownloadResult, EntryLink, ErrorRecord};

/// Why one unit of work did not complete.
///
/// Entry failures are dropped (the entry counts as having no books); file failures are
/// the only ones reported back to the user.
#[derive(Debug)]
pub enum Failure {
    EntryResolution { entry: EntryLink, source: FetchError },
    FileDownload(ErrorRecord),
}

impl DownloadResult {
    fn absorb(&mut self, failure: Failure) {
        match failure {
            Failure::EntryResolution { entry, source } => {
                debug!(entry = %entry, error = %source, "entry skipped");
            }
            Failure::FileDownload(record) => {
                info!(url = %record.file_url, error = %record.message, "download failed");
                self.errors.push(record);
            }
        }
    }
}

/// Options for a run. Progress is called with (entries done, entries total).
#[derive(Default)]
pub struct RunOptions<'a> {
    pub progress: Option<&'a dyn Fn(usize, usize)>,
}

/// Mirror every document of every entry under `destination_root`.
///
/// Never fails as a whole: entry failures skip the entry, file failures become
/// [ErrorRecord]s, and every other entry and document is still attempted.
pub fn run(
    client: &mut dyn Fetch,
    base_url: &str,
    entries: &[EntryLink],
    destination_root: &Path,
    options: &RunOptions<'_>,
) -> DownloadResult {
    let mut result = DownloadResult::default();
    let total = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let documents = match catalog::list_documents(client, base_url, entry) {
            Ok(docs) => docs,
            Err(source) => {
                result.absorb(Failure::EntryResolution {
                    entry: entry.clone(),
                    source,
                });
                report(options, i + 1, total);
                continue;
            }
        };
        debug!(entry = %entry, documents = documents.len(), "entry resolved");
        for document in &documents {
            let file_url = catalog::document_url(base_url, entry, document);
            let file_path = match paths::document_path(destination_root, entry, document) {
                Ok(path) => path,
                Err(e) => {
                    result.absorb(Failure::FileDownload(ErrorRecord {
                        file_url,
                        file_path: paths::entry_dir(destination_root, entry),
                        message: e.to_string(),
                    }));
                    continue;
                }
            };
            match materialize(client, &file_url, &file_path) {
                Ok(true) => {
                    info!(path = %file_path.display(), "downloaded");
                    result.downloaded += 1;
                }
                Ok(false) => {}
                Err(e) => result.absorb(Failure::FileDownload(ErrorRecord {
                    file_url,
                    file_path,
                    message: e.to_string(),
                })),
            }
        }
        report(options, i + 1, total);
    }
    result
}

fn report(options: &RunOptions<'_>, done: usize, total: usize) {
    if let Some(progress) = options.progress {
        progress(done, total);
    }
}

/// A document a run would attempt, and whether it is already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDownload {
    pub url: String,
    pub path: PathBuf,
    pub present: bool,
}

/// Resolve entries like [run] does but fetch no documents. Entries that fail to resolve
/// are skipped the same way.
pub fn plan(
    client: &mut dyn Fetch,
    base_url: &str,
    entries: &[EntryLink],
    destination_root: &Path,
) -> Vec<PlannedDownload> {
    let mut planned = Vec::new();
    for entry in entries {
        let documents = match catalog::list_documents(client, base_url, entry) {
            Ok(docs) => docs,
            Err(e) => {
                debug!(entry = %entry, error = %e, "entry skipped");
                continue;
            }
        };
        for document in &documents {
            let path = match paths::document_path(destination_root, entry, document) {
                Ok(path) => path,
                Err(e) => {
                    debug!(entry = %entry, error = %e, "document skipped");
                    continue;
                }
            };
            planned.push(PlannedDownload {
                url: catalog::document_url(base_url, entry, document),
                present: path.is_file(),
                path,
            });
        }
    }
    planned
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use crate::catalog::{CatalogClient, Fetch, FetchError};

    /// In-memory site. Unknown URLs answer 404; `fail` URLs answer 500; `unreachable`
    /// URLs fail with a real connection error.
    #[derive(Default)]
    pub struct FakeSite {
        pages: HashMap<String, Vec<u8>>,
        failing: Vec<String>,
        unreachable: Vec<String>,
        log: Vec<String>,
    }

    impl FakeSite {
        pub fn page(mut self, url: &str, body: &[u8]) -> Self {
            self.pages.insert(url.to_string(), body.to_vec());
            self
        }

        pub fn fail(mut self, url: &str) -> Self {
            self.failing.push(url.to_string());
            self
        }

        pub fn unreachable(mut self, url: &str) -> Self {
            self.unreachable.push(url.to_string());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.log.clone()
        }
    }

    impl Fetch for FakeSite {
        fn get_bytes(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.log.push(url.to_string());
            if self.unreachable.iter().any(|u| u == url) {
                let mut client = CatalogClient::builder()
                    .timeout_secs(5)
                    .build()
                    .expect("client");
                return match client.get_bytes("http://127.0.0.1:1/") {
                    Err(FetchError::Network { source, .. }) => Err(FetchError::Network {
                        url: url.to_string(),
                        source,
                    }),
                    other => panic!("expected a connection error, got {:?}", other),
                };
            }
            if self.failing.iter().any(|u| u == url) {
                return Err(FetchError::HttpStatus {
                    status: 500,
                    url: url.to_string(),
                });
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                })
        }
    }
}
