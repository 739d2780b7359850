// src/store.rs
//
// Credential file persistence. The file is JSON owned by the fetcher; a
// missing or unreadable file reads as "no credentials".

use std::{fs, io, path::Path};

use crate::fetch::auth::Credentials;

pub fn load_credentials(path: &Path) -> Option<Credentials> {
    let txt = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            logd!("Credentials: {} not readable ({})", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&txt) {
        Ok(c) => Some(c),
        Err(e) => {
            loge!("Credentials: {} is malformed ({}), ignoring", path.display(), e);
            None
        }
    }
}

pub fn save_credentials(path: &Path, creds: &Credentials) -> io::Result<()> {
    // Ensure parent directories exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(creds)?;
    fs::write(path, json)?;
    logd!("Credentials: saved to {}", path.display());
    Ok(())
}
