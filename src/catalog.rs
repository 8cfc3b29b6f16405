// Symbol catalog: fixed mapping from symbol id to display reference

use rand::Rng;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{DisplayRef, ResolvedSymbol, Result, SlotError, SymbolId};

/// Mapping from symbol id to its raw display value (glyph or image URL)
///
/// Entries keep insertion order so a seeded RNG draws a reproducible filler
/// stream. Config validation guarantees the catalog is never empty by the
/// time a reel asks it for a random symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolCatalog {
    entries: Vec<(SymbolId, String)>,
}

impl SymbolCatalog {
    pub fn new(entries: Vec<(SymbolId, String)>) -> SymbolCatalog {
        SymbolCatalog { entries }
    }

    /// The default 8-entry emoji catalog
    pub fn default_symbols() -> SymbolCatalog {
        SymbolCatalog::new(
            [
                ("apple", "🍎"),
                ("cherry", "🍒"),
                ("lemon", "🍋"),
                ("seven", "7️⃣"),
                ("bell", "🔔"),
                ("star", "⭐"),
                ("diamond", "💎"),
                ("coin", "🪙"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    /// Resolve a symbol id to its display reference.
    ///
    /// Unknown ids degrade to rendering the raw id as literal text instead of
    /// failing; use [`resolve_strict`](Self::resolve_strict) to surface the
    /// mismatch as an error.
    pub fn resolve(&self, id: &str) -> ResolvedSymbol {
        let display = match self.entries.iter().find(|(k, _)| k == id) {
            Some((_, value)) => DisplayRef::classify(value),
            None => DisplayRef::Glyph(id.to_string()),
        };
        ResolvedSymbol {
            id: id.to_string(),
            display,
        }
    }

    /// Resolve a symbol id, failing on ids missing from the catalog
    pub fn resolve_strict(&self, id: &str) -> Result<ResolvedSymbol> {
        if !self.contains(id) {
            return Err(SlotError::UnknownSymbol(id.to_string()));
        }
        Ok(self.resolve(id))
    }

    /// Draw a uniformly random symbol id from the catalog
    ///
    /// Panics if the catalog is empty; configuration validation rejects empty
    /// catalogs before any reel exists.
    pub fn random_symbol_id<R: Rng + ?Sized>(&self, rng: &mut R) -> &SymbolId {
        let index = rng.gen_range(0..self.entries.len());
        &self.entries[index].0
    }

    pub fn ids(&self) -> impl Iterator<Item = &SymbolId> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl Serialize for SymbolCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SymbolCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = SymbolCatalog;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of symbol id to display value")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<SymbolCatalog, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    entries.push((k, v));
                }
                Ok(SymbolCatalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
