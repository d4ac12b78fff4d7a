use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::Local;

use super::placeholder::CURRENT_DATE;
use super::registry::TemplateRegistry;
use crate::core::errors::ApiError;

/// A generated document, already persisted to disk.
#[derive(Debug, Clone)]
pub struct FilledDocument {
    pub filename: String,
    pub path: PathBuf,
    pub content: String,
}

/// Fills template placeholders and persists the result.
///
/// Placeholders present in the template but absent from the supplied values
/// are left as literal text in the output. That pass-through is documented
/// behavior, not an oversight.
pub struct DocumentFiller {
    registry: TemplateRegistry,
    output_dir: PathBuf,
}

impl DocumentFiller {
    pub fn new(registry: TemplateRegistry, output_dir: PathBuf) -> Self {
        Self {
            registry,
            output_dir,
        }
    }

    /// Fill the template named by `template_key` and write the result under a
    /// timestamped filename. Nothing is written for an unknown key or a
    /// missing template file.
    pub fn generate(
        &self,
        template_key: &str,
        filled_data: BTreeMap<String, String>,
    ) -> Result<FilledDocument, ApiError> {
        let template_content = self.load_template(template_key)?;
        let content = fill_template(&template_content, filled_data);

        let filename = format!(
            "filled_{}_{}.txt",
            template_key,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.output_dir.join(&filename);

        fs::create_dir_all(&self.output_dir).map_err(ApiError::internal)?;
        fs::write(&path, &content)
            .map_err(|e| ApiError::Internal(format!("Error saving document: {}", e)))?;
        tracing::info!("Document saved as '{}'", filename);

        Ok(FilledDocument {
            filename,
            path,
            content,
        })
    }

    pub fn load_template(&self, template_key: &str) -> Result<String, ApiError> {
        let filename = self.registry.filename(template_key).ok_or_else(|| {
            ApiError::BadRequest(format!("No template found for '{}'.", template_key))
        })?;

        let path = self.registry.template_path(template_key).ok_or_else(|| {
            ApiError::BadRequest(format!("No template found for '{}'.", template_key))
        })?;

        if !path.exists() {
            return Err(ApiError::NotFound(format!(
                "Template file '{}' not found.",
                filename
            )));
        }

        fs::read_to_string(&path)
            .map_err(|e| ApiError::Internal(format!("Error reading template file: {}", e)))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }
}

/// Substitute every `[name]` and `{{name}}` occurrence for each supplied
/// value. When the template mentions `current_date` anywhere, the current
/// date ("Month DD, YYYY") is injected, overriding any caller value.
pub fn fill_template(
    template_content: &str,
    mut filled_data: BTreeMap<String, String>,
) -> String {
    if template_content.contains(CURRENT_DATE) {
        filled_data.insert(
            CURRENT_DATE.to_string(),
            Local::now().format("%B %d, %Y").to_string(),
        );
    }

    let mut filled = template_content.to_string();
    for (placeholder, value) in &filled_data {
        filled = filled.replace(&format!("[{}]", placeholder), value);
        filled = filled.replace(&format!("{{{{{}}}}}", placeholder), value);
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::placeholder::discover_placeholders;
    use std::collections::BTreeMap;
    use std::path::Path;

    const TEMPLATE: &str = "\
NON-DISCLOSURE AGREEMENT

Date: [current_date]

Between [PARTY_ONE_NAME], residing at {{PARTY_ONE_ADDRESS}},
and [PARTY_TWO_NAME]. This agreement lasts {{agreement_term_months}} months.
Signed: [PARTY_ONE_NAME]";

    fn filler_with_template(dir: &Path) -> DocumentFiller {
        let template_dir = dir.join("document_templates");
        std::fs::create_dir_all(&template_dir).unwrap();
        std::fs::write(template_dir.join("simple_nda_template.txt"), TEMPLATE).unwrap();
        let registry = TemplateRegistry::new(&template_dir, &BTreeMap::new());
        DocumentFiller::new(registry, dir.join("generated_documents"))
    }

    fn full_data() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("PARTY_ONE_NAME".to_string(), "Acme GmbH".to_string()),
            ("PARTY_ONE_ADDRESS".to_string(), "1 Main St".to_string()),
            ("PARTY_TWO_NAME".to_string(), "Jordan Doe".to_string()),
            ("agreement_term_months".to_string(), "12".to_string()),
        ])
    }

    #[test]
    fn complete_fill_leaves_no_placeholder_syntax() {
        let filled = fill_template(TEMPLATE, full_data());
        assert!(discover_placeholders(&filled).is_empty());
        assert!(!filled.contains('['));
        assert!(!filled.contains("{{"));
        assert!(filled.contains("Acme GmbH"));
        // Every occurrence is replaced, including the repeated signature.
        assert_eq!(filled.matches("Acme GmbH").count(), 2);
    }

    #[test]
    fn current_date_overrides_caller_value() {
        let mut data = full_data();
        data.insert("current_date".to_string(), "January 01, 1970".to_string());
        let filled = fill_template(TEMPLATE, data);

        let today = Local::now().format("%B %d, %Y").to_string();
        assert!(filled.contains(&format!("Date: {}", today)));
        assert!(!filled.contains("January 01, 1970"));
    }

    #[test]
    fn missing_values_pass_through_unchanged() {
        let mut data = full_data();
        data.remove("PARTY_TWO_NAME");
        let filled = fill_template(TEMPLATE, data);
        assert!(filled.contains("[PARTY_TWO_NAME]"));
    }

    #[test]
    fn unknown_template_key_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let filler = filler_with_template(dir.path());

        let err = filler.generate("lease agreement", full_data()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(!dir.path().join("generated_documents").exists()
            || std::fs::read_dir(dir.path().join("generated_documents"))
                .unwrap()
                .next()
                .is_none());
    }

    #[test]
    fn missing_template_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("document_templates");
        std::fs::create_dir_all(&template_dir).unwrap();
        let registry = TemplateRegistry::new(&template_dir, &BTreeMap::new());
        let filler = DocumentFiller::new(registry, dir.path().join("generated_documents"));

        let err = filler.generate("nda", full_data()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn generate_persists_with_timestamped_filename() {
        let dir = tempfile::tempdir().unwrap();
        let filler = filler_with_template(dir.path());

        let doc = filler.generate("nda", full_data()).unwrap();
        assert!(doc.filename.starts_with("filled_nda_"));
        assert!(doc.filename.ends_with(".txt"));
        // filled_nda_YYYYMMDD_HHMMSS.txt
        assert_eq!(doc.filename.len(), "filled_nda_".len() + 15 + 4);
        assert!(doc.path.exists());
        assert_eq!(std::fs::read_to_string(&doc.path).unwrap(), doc.content);
    }
}
