// file: src/loader.rs
// description: document discovery and loading with per-file failure isolation
// reference: https://docs.rs/walkdir

use crate::error::Result;
use crate::models::Document;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Load every supported document under `folder`. A missing folder is
/// created and yields an empty set. Unreadable files are skipped; a
/// single bad file never aborts the run.
pub fn load_documents(folder: &Path) -> Result<Vec<Document>> {
    if !folder.exists() {
        info!("Creating documents folder: {}", folder.display());
        fs::create_dir_all(folder)?;
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
        if !supported {
            continue;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded: {}", filename);
                documents.push(Document::new(
                    content,
                    filename,
                    path.display().to_string(),
                ));
            }
            Err(e) => {
                warn!("Error loading {}: {}", filename, e);
            }
        }
    }

    info!("Loaded {} documents from {}", documents.len(), folder.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_folder_created_and_empty() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("does_not_exist_yet");

        let documents = load_documents(&folder).unwrap();

        assert!(documents.is_empty());
        assert!(folder.is_dir());
    }

    #[test]
    fn test_only_supported_extensions_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.md"), "# Notes").unwrap();
        fs::write(temp.path().join("todo.txt"), "buy milk").unwrap();
        fs::write(temp.path().join("image.png"), [0_u8, 1, 2]).unwrap();

        let documents = load_documents(temp.path()).unwrap();

        let mut filenames: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
        filenames.sort_unstable();
        assert_eq!(filenames, vec!["notes.md", "todo.txt"]);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.md"), "readable").unwrap();
        // Invalid UTF-8 makes read_to_string fail for this one.
        fs::write(temp.path().join("bad.md"), [0xff_u8, 0xfe, 0xfd]).unwrap();

        let documents = load_documents(temp.path()).unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].filename, "good.md");
    }

    #[test]
    fn test_nested_folders_are_walked() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("projects/alpha");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("plan.md"), "the plan").unwrap();

        let documents = load_documents(temp.path()).unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].filename, "plan.md");
        assert!(documents[0].source.contains("alpha"));
    }
}
