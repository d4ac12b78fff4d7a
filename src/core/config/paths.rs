use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolved filesystem layout for the service.
///
/// All directories live under a single data root, overridable with
/// `LEXA_DATA_DIR`. The vector store directory is deliberately NOT created
/// here: its absence at startup means ingestion has not been run yet, which
/// the server treats as a fatal initialization error.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Source PDFs consumed by the ingestion pipeline.
    pub pdf_dir: PathBuf,
    /// Document template text files.
    pub template_dir: PathBuf,
    /// Persisted vector store (owned by the store implementation).
    pub store_dir: PathBuf,
    /// Filled documents written by the document filler.
    pub output_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let data_dir = discover_data_dir();
        let paths = AppPaths {
            log_dir: data_dir.join("logs"),
            pdf_dir: data_dir.join("legal_data_pdfs"),
            template_dir: data_dir.join("document_templates"),
            store_dir: data_dir.join("vector_store"),
            output_dir: data_dir.join("generated_documents"),
            data_dir,
        };

        for dir in [&paths.log_dir, &paths.output_dir] {
            let _ = fs::create_dir_all(dir);
        }

        paths
    }

    /// Layout rooted at an arbitrary directory, for tests.
    pub fn rooted_at(data_dir: PathBuf) -> Self {
        let paths = AppPaths {
            log_dir: data_dir.join("logs"),
            pdf_dir: data_dir.join("legal_data_pdfs"),
            template_dir: data_dir.join("document_templates"),
            store_dir: data_dir.join("vector_store"),
            output_dir: data_dir.join("generated_documents"),
            data_dir,
        };
        for dir in [&paths.log_dir, &paths.output_dir] {
            let _ = fs::create_dir_all(dir);
        }
        paths
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("LEXA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if cfg!(debug_assertions) {
        return env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    if cfg!(target_os = "windows") {
        let base = env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string()));
        return PathBuf::from(base).join("Lexa");
    }

    if cfg!(target_os = "macos") {
        return home_dir()
            .join("Library")
            .join("Application Support")
            .join("Lexa");
    }

    let xdg = env::var("XDG_DATA_HOME").unwrap_or_else(|_| {
        home_dir()
            .join(".local/share")
            .to_string_lossy()
            .to_string()
    });
    PathBuf::from(xdg).join("lexa")
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
