//! Clipboard and file export for the generated artifact.
//!
//! Both operations act on snapshots of the content and selected keyword;
//! neither touches workflow state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

/// File name derived from the selected keyword, whitespace collapsed to
/// underscores.
pub fn export_file_name(keyword: &str) -> String {
    let base = keyword.split_whitespace().collect::<Vec<_>>().join("_");
    if base.is_empty() {
        "content.txt".to_string()
    } else {
        format!("{base}_content.txt")
    }
}

/// Write the content into `dir` under the keyword-derived name, creating
/// the directory if needed. Returns the full path written.
pub fn write_export(dir: &Path, keyword: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(keyword));
    fs::write(&path, content)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;
    debug!(path = %path.display(), "exported content");
    Ok(path)
}

/// Put the content on the system clipboard.
pub fn copy_to_clipboard(content: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to open system clipboard")?;
    clipboard
        .set_text(content)
        .context("Failed to copy content to clipboard")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_from_keyword() {
        assert_eq!(export_file_name("seo tips"), "seo_tips_content.txt");
        assert_eq!(export_file_name("  digital   marketing "), "digital_marketing_content.txt");
        assert_eq!(export_file_name("single"), "single_content.txt");
        assert_eq!(export_file_name(""), "content.txt");
    }

    #[test]
    fn test_write_export_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("exports");

        let path = write_export(&target, "seo tips", "Article body").unwrap();
        assert_eq!(path, target.join("seo_tips_content.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Article body");
    }

    #[test]
    fn test_write_export_overwrites_previous() {
        let dir = TempDir::new().unwrap();

        write_export(dir.path(), "seo tips", "first").unwrap();
        let path = write_export(dir.path(), "seo tips", "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
