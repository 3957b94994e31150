//! Catalog site access: listing entries, resolving an entry's documents, and building
//! request URLs. All URLs are built by string concatenation onto the base URL.

mod client;
mod error;

pub mod links;

pub use client::{CatalogClient, CatalogClientBuilder, Fetch};
pub use error::FetchError;

use crate::model::{DocumentLink, EntryLink};

pub const DEFAULT_BASE_URL: &str = "https://codernet.ru/media/";

/// Substring an href must contain to count as a document link.
pub const DOCUMENT_MARKER: &str = ".pdf";

/// Fetch the root catalog page and return every anchor href verbatim.
pub fn list_entries(client: &mut dyn Fetch, root_url: &str) -> Result<Vec<EntryLink>, FetchError> {
    let body = client.get_bytes(root_url)?;
    Ok(links::extract_links(&body)
        .into_iter()
        .map(EntryLink::new)
        .collect())
}

/// Fetch one entry's page and return its document links (may be empty).
pub fn list_documents(
    client: &mut dyn Fetch,
    base_url: &str,
    entry: &EntryLink,
) -> Result<Vec<DocumentLink>, FetchError> {
    let body = client.get_bytes(&entry_url(base_url, entry))?;
    Ok(
        links::filter_containing(links::extract_links(&body), DOCUMENT_MARKER)
            .into_iter()
            .map(DocumentLink::new)
            .collect(),
    )
}

pub fn entry_url(base_url: &str, entry: &EntryLink) -> String {
    format!("{}{}", base_url, entry)
}

/// Base URL + entry + document, with exactly one `/` between entry and document.
pub fn document_url(base_url: &str, entry: &EntryLink, document: &DocumentLink) -> String {
    format!(
        "{}{}/{}",
        base_url,
        entry.as_str().trim_end_matches('/'),
        document
    )
}
