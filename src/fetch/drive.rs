// src/fetch/drive.rs

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::consts::{DRIVE_FILES_URL, PAGE_SIZE, ROOT_QUERY};
use crate::core::net::{check_status, http_client};

use super::FetchError;

/// One entry of the root listing. Only lives for the selection step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "modifiedTime")]
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub mime_type: String,
}

impl FileEntry {
    /// Docs/Sheets etc. have no binary content and must be exported.
    pub fn is_google_native(&self) -> bool {
        self.mime_type.starts_with("application/vnd.google-apps.")
    }
}

/// Storage seam between selection logic and the remote account.
pub trait FileStore {
    /// All non-trashed files directly under the account root.
    fn list_root(&self) -> Result<Vec<FileEntry>, FetchError>;

    fn content_string(&self, file: &FileEntry) -> Result<String, FetchError>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
    next_page_token: Option<String>,
}

pub struct DriveClient {
    client: Client,
    access_token: String,
}

impl DriveClient {
    pub fn new(access_token: String) -> Result<Self, FetchError> {
        Ok(Self { client: http_client()?, access_token })
    }
}

impl FileStore for DriveClient {
    fn list_root(&self) -> Result<Vec<FileEntry>, FetchError> {
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("q", s!(ROOT_QUERY)),
                ("fields", s!("nextPageToken,files(id,name,mimeType,modifiedTime)")),
                ("pageSize", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let resp = self
                .client
                .get(DRIVE_FILES_URL)
                .bearer_auth(&self.access_token)
                .query(&query)
                .send()?;
            let page: FileList = check_status(resp)?.json()?;
            logd!("Drive page: {} files, more={}", page.files.len(), page.next_page_token.is_some());
            out.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(out)
    }

    fn content_string(&self, file: &FileEntry) -> Result<String, FetchError> {
        let req = if file.is_google_native() {
            self.client
                .get(format!("{DRIVE_FILES_URL}/{}/export", file.id))
                .query(&[("mimeType", "text/html")])
        } else {
            self.client
                .get(format!("{DRIVE_FILES_URL}/{}", file.id))
                .query(&[("alt", "media")])
        };
        let resp = req.bearer_auth(&self.access_token).send()?;
        let text = check_status(resp)?.text()?;
        logf!("Downloaded {:?}: {} bytes", file.name, text.len());
        Ok(text)
    }
}
