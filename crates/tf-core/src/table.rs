//! Content tables keyed by one or two form values, with an explicit default branch.
//!
//! Mirrors the `table[key] ?? table.default` convention: every lookup yields a
//! value. Use [`LookupTable::find`] / [`LookupTable::find_pair`] when a miss
//! needs to be observed (coverage tests).

/// Wildcard key segment for two-key tables: `("contract", ANY)` matches any jurisdiction.
pub const ANY: &str = "*";

/// Static table of `(key, value)` rows plus a default value.
#[derive(Debug, Clone, Copy)]
pub struct LookupTable<K: 'static, V: 'static> {
    pub name: &'static str,
    pub entries: &'static [(K, V)],
    pub default: V,
}

/// Table keyed by a single field value.
pub type KeyedTable<V> = LookupTable<&'static str, V>;

/// Table keyed by two field values, e.g. `(documentType, jurisdiction)`.
pub type PairTable<V> = LookupTable<(&'static str, &'static str), V>;

impl<K, V> LookupTable<K, V> {
    pub const fn new(name: &'static str, entries: &'static [(K, V)], default: V) -> Self {
        Self {
            name,
            entries,
            default,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> LookupTable<&'static str, V> {
    pub fn find(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Exact match or the table default.
    pub fn get(&self, key: &str) -> &V {
        self.find(key).unwrap_or_else(|| {
            tracing::debug!(table = self.name, key, "table miss, using default");
            &self.default
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl<V> LookupTable<(&'static str, &'static str), V> {
    /// Exact `(a, b)` match only.
    pub fn find_pair(&self, a: &str, b: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|((ka, kb), _)| *ka == a && *kb == b)
            .map(|(_, v)| v)
    }

    /// Resolution order: `(a, b)`, `(a, *)`, `(*, b)`, default.
    pub fn get_pair(&self, a: &str, b: &str) -> &V {
        self.find_pair(a, b)
            .or_else(|| self.find_pair(a, ANY))
            .or_else(|| self.find_pair(ANY, b))
            .unwrap_or_else(|| {
                tracing::debug!(table = self.name, a, b, "pair table miss, using default");
                &self.default
            })
    }
}
