// src/fetch/mod.rs
//
// Fetcher: authenticate, list the account root, pick the newest file whose
// name contains the search text, return its content.

pub mod auth;
pub mod drive;
pub mod select;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::options::FetchOptions;

pub use drive::{DriveClient, FileEntry, FileStore};
pub use select::select_latest;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no file name contains {search:?}")]
    NoMatch { search: String },

    #[error("search text must not be empty")]
    EmptySearch,

    #[error("interactive login required but no terminal is attached")]
    InteractiveUnavailable,

    #[error("authorization denied: {0}")]
    AuthDenied(String),

    #[error("client secrets {path}: {reason}")]
    Secrets { path: PathBuf, reason: String },

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content of the most recently modified file whose name contains `search`.
pub fn get_latest<S: FileStore + ?Sized>(store: &S, search: &str) -> Result<String, FetchError> {
    let files = store.list_root()?;
    logd!("Listed {} files in root", files.len());

    let latest = select_latest(&files, search)?;
    logf!("Selected {:?} (modified {})", latest.name, latest.modified);

    store.content_string(latest)
}

/// Full remote path: authenticate against Drive, then `get_latest`.
pub fn fetch_latest(opts: &FetchOptions) -> Result<String, FetchError> {
    let creds = auth::authenticate(opts)?;
    let drive = DriveClient::new(creds.access_token)?;
    get_latest(&drive, &opts.search)
}
