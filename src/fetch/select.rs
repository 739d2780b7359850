// src/fetch/select.rs

use super::{FetchError, FileEntry};

/// Filter by case-sensitive name containment, then take the newest by
/// modification time. Equal timestamps resolve to the later listing entry.
pub fn select_latest<'a>(files: &'a [FileEntry], search: &str) -> Result<&'a FileEntry, FetchError> {
    if search.is_empty() {
        return Err(FetchError::EmptySearch);
    }
    files
        .iter()
        .filter(|f| f.name.contains(search))
        .max_by_key(|f| f.modified)
        .ok_or_else(|| FetchError::NoMatch { search: s!(search) })
}
