// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Create the parent directory of `path` if there is one.
pub fn ensure_parent(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

/// The positional input: a readable file, or the text itself when it is HTML.
pub fn read_source(arg: &str) -> Result<String, Box<dyn std::error::Error>> {
    let path = PathBuf::from(normalize_separators(arg));
    if path.is_file() {
        logf!("Source: reading {}", path.display());
        return Ok(fs::read_to_string(&path)?);
    }
    if arg.to_ascii_lowercase().contains("<table") {
        logf!("Source: argument is inline HTML ({} bytes)", arg.len());
        return Ok(s!(arg));
    }
    Err(format!("No such file: {}", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("bg_file_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn ensure_parent_creates_nested_dirs() {
        let dir = tmp_dir("nested");
        let target = dir.join("a").join("b").join("out.png");
        ensure_parent(&target).unwrap();
        assert!(dir.join("a").join("b").is_dir());
    }

    #[test]
    fn ensure_directory_rejects_file() {
        let dir = tmp_dir("isfile");
        fs::create_dir_all(&dir).unwrap();
        let f = dir.join("x");
        fs::write(&f, "x").unwrap();
        assert!(ensure_directory(&f).is_err());
    }

    #[test]
    fn read_source_file_inline_or_missing() {
        let dir = tmp_dir("source");
        fs::create_dir_all(&dir).unwrap();
        let f = dir.join("export.html");
        fs::write(&f, "<table></table>").unwrap();
        assert_eq!(read_source(f.to_str().unwrap()).unwrap(), "<table></table>");

        let inline = "<TABLE><tr><th>Weight</th></tr></TABLE>";
        assert_eq!(read_source(inline).unwrap(), inline);

        let missing = dir.join("nope.html");
        assert!(read_source(missing.to_str().unwrap()).is_err());
    }
}
