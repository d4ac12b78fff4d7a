use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reserved placeholder name, auto-filled with the current date and never
/// shown to callers.
pub const CURRENT_DATE: &str = "current_date";

/// Curated human-readable descriptions for known placeholder names.
const PLACEHOLDER_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "PARTY_ONE_NAME",
        "The full legal name of the Disclosing Party (the one sharing confidential information)",
    ),
    (
        "PARTY_ONE_ADDRESS",
        "The complete address of the Disclosing Party",
    ),
    (
        "PARTY_TWO_NAME",
        "The full legal name of the Receiving Party (the one receiving confidential information)",
    ),
    (
        "PARTY_TWO_ADDRESS",
        "The complete address of the Receiving Party",
    ),
    (
        "CONFIDENTIAL_INFO_DESCRIPTION",
        "A brief description of the type of confidential information being shared (e.g., business plans, product designs, customer lists)",
    ),
    (
        "CONFIDENTIAL_INFO_EXAMPLES",
        "Specific examples of confidential information (e.g., 'technical data, formulas, marketing strategies')",
    ),
    (
        "agreement_term_months",
        "The duration of the agreement in months (e.g., 12 for one year)",
    ),
];

/// A placeholder presented to the caller for filling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceholderDetail {
    pub name: String,
    pub description: String,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(.*?)\]|\{\{(.*?)\}\}").expect("placeholder regex"))
}

/// Distinct placeholder names in `template_text`, both `[NAME]` and
/// `{{NAME}}` syntaxes, trimmed, with `current_date` removed. Sorted.
pub fn discover_placeholders(template_text: &str) -> Vec<String> {
    let mut names = BTreeSet::new();
    for caps in placeholder_regex().captures_iter(template_text) {
        let captured = caps.get(1).or_else(|| caps.get(2));
        if let Some(m) = captured {
            let name = m.as_str().trim();
            if !name.is_empty() {
                names.insert(name.to_string());
            }
        }
    }
    names.remove(CURRENT_DATE);
    names.into_iter().collect()
}

/// Discovered placeholders paired with descriptions, in sorted order.
pub fn placeholder_details(template_text: &str) -> Vec<PlaceholderDetail> {
    discover_placeholders(template_text)
        .into_iter()
        .map(|name| {
            let description = describe(&name);
            PlaceholderDetail { name, description }
        })
        .collect()
}

/// Curated description when known, else title-cased name with underscores
/// replaced by spaces.
pub fn describe(name: &str) -> String {
    PLACEHOLDER_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| title_case(&name.replace('_', " ")))
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
