// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub source: Source,
    pub fetch: FetchOptions,
    pub export: ExportOptions,
    pub show: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            source: Source::Remote,
            fetch: FetchOptions::default(),
            export: ExportOptions::default(),
            show: true,
        }
    }
}

/// Where the export text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Latest matching file in the Drive account root.
    Remote,
    /// A local path, or literal HTML when no such file exists.
    Local(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub search: String,
    pub credentials_path: PathBuf,
    pub client_secrets_path: PathBuf,
    pub redirect_port: u16,
    /// Whether a browser login may be started when credentials are missing or expired.
    pub interactive: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            search: s!(DEFAULT_SEARCH),
            credentials_path: PathBuf::from(CREDENTIALS_FILE),
            client_secrets_path: PathBuf::from(CLIENT_SECRETS_FILE),
            redirect_port: REDIRECT_PORT,
            interactive: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub file_stem: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE_STEM),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

impl ExportOptions {
    pub fn png_path(&self) -> PathBuf {
        self.out_dir.join(join!(&self.file_stem, ".png"))
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.out_dir.join(join!(&self.file_stem, ".pdf"))
    }
}
