use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Static mapping of template keys to template files.
///
/// Built-in entries cover the NDA template under both names users ask for;
/// config can add or override entries. Loaded once at startup, immutable for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    template_dir: PathBuf,
    entries: BTreeMap<String, String>,
}

fn builtin_entries() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("nda".to_string(), "simple_nda_template.txt".to_string()),
        (
            "non-disclosure agreement".to_string(),
            "simple_nda_template.txt".to_string(),
        ),
    ])
}

impl TemplateRegistry {
    pub fn new(template_dir: &Path, overrides: &BTreeMap<String, String>) -> Self {
        let mut entries = builtin_entries();
        for (key, filename) in overrides {
            entries.insert(key.trim().to_lowercase(), filename.clone());
        }
        Self {
            template_dir: template_dir.to_path_buf(),
            entries,
        }
    }

    /// Built-in entries only, rooted at the default template directory name.
    pub fn with_defaults() -> Self {
        Self {
            template_dir: PathBuf::from("document_templates"),
            entries: builtin_entries(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn filename(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn template_path(&self, key: &str) -> Option<PathBuf> {
        self.filename(key)
            .map(|filename| self.template_dir.join(filename))
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }
}
