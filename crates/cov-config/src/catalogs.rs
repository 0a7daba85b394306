use std::collections::BTreeMap;

use cov_core::WeightedCatalog;

pub const USER_ROLES: &str = "user_roles";
pub const DOCUMENT_PERMISSIONS: &str = "document_permissions";
pub const ORGANIZATIONS: &str = "organizations";
pub const DOCUMENT_TYPES: &str = "document_types";
pub const MAIN_AREAS: &str = "main_areas";
pub const SUB_AREAS: &str = "sub_areas";
pub const PRODUCTS: &str = "products";
pub const PLACEMENTS: &str = "placements";

/// Catalogs required by every command.
pub const REQUIRED: &[&str] = &[USER_ROLES];

/// Named weighted catalogs from the `[catalogs.<name>]` tables.
///
/// Entries keep the order they are written in the file; that order breaks
/// weight ties during sampling.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    tables: BTreeMap<String, WeightedCatalog>,
}

impl Catalogs {
    pub(crate) fn from_raw(raw: BTreeMap<String, toml::Table>) -> anyhow::Result<Self> {
        let mut tables = BTreeMap::new();
        for (name, table) in raw {
            let mut entries = Vec::with_capacity(table.len());
            for (label, value) in table {
                let weight = match value {
                    toml::Value::Float(f) => f,
                    toml::Value::Integer(i) => i as f64,
                    other => anyhow::bail!(
                        "catalogs.{name}.{label}: weight must be a number, got {}",
                        other.type_str()
                    ),
                };
                entries.push((label, weight));
            }
            let catalog = WeightedCatalog::new(entries)
                .and_then(|c| c.validate().map(|_| c))
                .map_err(|e| anyhow::anyhow!("catalogs.{name}: {e}"))?;
            tables.insert(name, catalog);
        }
        Ok(Self { tables })
    }

    pub fn get(&self, name: &str) -> Option<&WeightedCatalog> {
        self.tables.get(name)
    }

    /// Like [`Catalogs::get`] but fails with a message naming the missing table.
    pub fn require(&self, name: &str) -> anyhow::Result<&WeightedCatalog> {
        self.tables
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("missing [catalogs.{name}] table"))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
