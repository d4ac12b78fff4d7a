use std::fs;
use std::path::Path;

use crate::core::errors::ApiError;

#[cfg(windows)]
const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEP: &str = "\n";

/// Raw extracted text from one input file, before splitting.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub text: String,
    pub source_name: String,
}

/// Ingest every `.pdf` file (case-insensitive) in `pdf_dir`.
///
/// Per-file failures and files that yield no text are logged and skipped;
/// one bad file never aborts the batch. Output order follows directory
/// listing order.
pub fn load_documents(pdf_dir: &Path) -> Result<Vec<SourceDocument>, ApiError> {
    let entries = fs::read_dir(pdf_dir).map_err(|e| {
        ApiError::Internal(format!("Cannot read PDF directory {:?}: {}", pdf_dir, e))
    })?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !is_pdf(&path) {
            continue;
        }

        let source_name = entry.file_name().to_string_lossy().to_string();
        tracing::info!("Processing {}", source_name);

        let text = match extract_pdf_text(&path, &source_name) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error extracting text from {}: {}", source_name, e);
                continue;
            }
        };

        let cleaned = clean_text(&text);
        if cleaned.is_empty() {
            tracing::warn!("Skipping {} due to no extracted text", source_name);
            continue;
        }

        documents.push(SourceDocument {
            text: cleaned,
            source_name,
        });
    }

    if documents.is_empty() {
        tracing::warn!("No documents found or extracted in {:?}", pdf_dir);
    }

    Ok(documents)
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
}

/// Extract text page-by-page so a single unreadable page only warns.
fn extract_pdf_text(path: &Path, source_name: &str) -> Result<String, ApiError> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut text = String::new();
    for (page_num, page) in pages.iter().enumerate() {
        if page.trim().is_empty() {
            tracing::warn!(
                "Could not extract text from page {} of {}",
                page_num + 1,
                source_name
            );
        } else {
            text.push_str(page);
        }
    }

    Ok(text)
}

/// Collapse to non-blank lines joined with the platform line separator,
/// then strip leading/trailing whitespace.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(LINE_SEP)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_blank_lines() {
        let raw = "first line\n\n   \nsecond line\n\t\nthird line\n";
        assert_eq!(
            clean_text(raw),
            format!("first line{0}second line{0}third line", LINE_SEP)
        );
    }

    #[test]
    fn clean_strips_outer_whitespace() {
        assert_eq!(clean_text("  \n  hello  \n  "), "hello");
    }

    #[test]
    fn clean_of_blank_input_is_empty() {
        assert_eq!(clean_text("\n \n\t\n"), "");
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let upper = dir.path().join("DOC.PDF");
        let lower = dir.path().join("doc.pdf");
        let other = dir.path().join("notes.txt");
        for p in [&upper, &lower, &other] {
            std::fs::write(p, b"x").unwrap();
        }
        assert!(is_pdf(&upper));
        assert!(is_pdf(&lower));
        assert!(!is_pdf(&other));
    }

    #[test]
    fn unreadable_pdf_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // Not a real PDF; extraction fails and the batch continues.
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        let docs = load_documents(dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(load_documents(&missing).is_err());
    }
}
