//! Option catalogs: static `{id, label, description}` lists behind every choice widget.

use serde::Serialize;

/// One selectable option. Defined at compile time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    pub const fn new(id: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            id,
            label,
            description,
        }
    }
}

/// A flat, ordered catalog for one choice dimension (difficulty, audience, ...).
///
/// `default_id` names the entry used whenever a form value has no match, so
/// [`OptionCatalog::resolve`] always yields a real entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptionCatalog {
    pub name: &'static str,
    pub entries: &'static [CatalogEntry],
    pub default_id: &'static str,
}

impl OptionCatalog {
    pub const fn new(
        name: &'static str,
        entries: &'static [CatalogEntry],
        default_id: &'static str,
    ) -> Self {
        Self {
            name,
            entries,
            default_id,
        }
    }

    /// Find an entry by id.
    pub fn lookup(&self, id: &str) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Find an entry by id, falling back to the catalog default.
    pub fn resolve(&self, id: &str) -> &'static CatalogEntry {
        match self.lookup(id) {
            Some(entry) => entry,
            None => {
                tracing::debug!(
                    catalog = self.name,
                    id,
                    fallback = self.default_id,
                    "catalog miss, using default"
                );
                self.default_entry()
            }
        }
    }

    /// The documented default entry.
    ///
    /// Falls back to the first entry if `default_id` is misspelled; catalog tests
    /// catch that case.
    pub fn default_entry(&self) -> &'static CatalogEntry {
        self.lookup(self.default_id)
            .or_else(|| self.entries.first())
            .unwrap_or(&MISSING)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// Labels for the given ids, in the given order. Unknown ids are skipped.
    pub fn labels_for<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&'static str> {
        ids.iter()
            .filter_map(|id| self.lookup(id.as_ref()))
            .map(|e| e.label)
            .collect()
    }

    /// Check catalog invariants: non-empty, unique ids, default present.
    pub fn validate(&self) -> Result<(), String> {
        if self.entries.is_empty() {
            return Err(format!("catalog '{}' is empty", self.name));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(format!(
                    "catalog '{}' has duplicate id '{}'",
                    self.name, entry.id
                ));
            }
            if entry.label.is_empty() {
                return Err(format!(
                    "catalog '{}' entry '{}' has an empty label",
                    self.name, entry.id
                ));
            }
        }
        if !self.contains(self.default_id) {
            return Err(format!(
                "catalog '{}' default '{}' is not an entry",
                self.name, self.default_id
            ));
        }
        Ok(())
    }
}

static MISSING: CatalogEntry = CatalogEntry::new("", "Standard", "");
