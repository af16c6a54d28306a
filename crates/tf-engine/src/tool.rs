//! The `Tool` trait and lookup helpers shared by every template.

use crate::flavor::FlavorSource;
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::{FormError, FormState};
use tf_core::request::GenerationRequest;
use tf_core::schema::ToolSchema;

/// One tool page: its schema and its template.
pub trait Tool: Send + Sync {
    fn schema(&self) -> &'static ToolSchema;

    /// Expand the template for a form snapshot.
    ///
    /// Must not panic for any value the form holder can produce: every lookup
    /// resolves to an entry or a named default.
    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String;

    fn id(&self) -> &'static str {
        self.schema().id
    }
}

/// Replay a request into a fresh form, then render it.
pub fn generate(
    tool: &dyn Tool,
    request: &GenerationRequest,
    flavor: &mut dyn FlavorSource,
) -> Result<String, FormError> {
    let form = FormState::from_request(tool.schema(), request)?;
    let _span = tracing::debug_span!("render", tool = tool.id()).entered();
    let out = tool.render(&form, flavor);
    tracing::debug!(bytes = out.len(), "rendered");
    Ok(out)
}

/// Free text, or `fallback` when the field is empty or whitespace.
pub fn text_or<'a>(form: &'a FormState, name: &str, fallback: &'a str) -> &'a str {
    let value = form.text(name).trim();
    if value.is_empty() { fallback } else { value }
}

/// Resolve a single-select field to its catalog entry (or the catalog default).
pub fn chosen(form: &FormState, name: &str, catalog: &OptionCatalog) -> &'static CatalogEntry {
    catalog.resolve(form.choice(name))
}

/// Resolve a multi-select field to entries in click order. Unknown ids are
/// dropped; an empty result falls back to `fallback` ids.
pub fn chosen_many(
    form: &FormState,
    name: &str,
    catalog: &OptionCatalog,
    fallback: &[&str],
) -> Vec<&'static CatalogEntry> {
    let picked: Vec<&'static CatalogEntry> = form
        .multi(name)
        .iter()
        .filter_map(|id| catalog.lookup(id))
        .collect();
    if !picked.is_empty() {
        return picked;
    }
    let defaults: Vec<&'static CatalogEntry> =
        fallback.iter().filter_map(|id| catalog.lookup(id)).collect();
    if defaults.is_empty() {
        vec![catalog.default_entry()]
    } else {
        defaults
    }
}

/// Comma-separated labels, or `(none selected)` when empty.
pub fn join_labels(entries: &[&CatalogEntry]) -> String {
    if entries.is_empty() {
        return "(none selected)".to_string();
    }
    entries
        .iter()
        .map(|e| e.label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Leading digits of a choice id such as `"10"` or `"4-weeks"`, else `fallback`.
pub fn leading_number(entry: &CatalogEntry, fallback: usize) -> usize {
    let digits: String = entry.id.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(fallback)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Enabled" } else { "Disabled" }
}

/// Title-case a free-text subject for headings ("machine learning" -> "Machine Learning").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        let ten = CatalogEntry::new("10", "10 Questions", "");
        let weeks = CatalogEntry::new("4-weeks", "4 Weeks", "");
        let none = CatalogEntry::new("self-paced", "Self-paced", "");
        assert_eq!(leading_number(&ten, 5), 10);
        assert_eq!(leading_number(&weeks, 1), 4);
        assert_eq!(leading_number(&none, 6), 6);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("machine   learning"), "Machine Learning");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_join_labels() {
        let a = CatalogEntry::new("a", "Alpha", "");
        let b = CatalogEntry::new("b", "Beta", "");
        assert_eq!(join_labels(&[&a, &b]), "Alpha, Beta");
        assert_eq!(join_labels(&[]), "(none selected)");
    }
}
