use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LookupKind, Result, SaveError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorationInfo {
    pub name: String,
    /// Id in the item box namespace.
    pub item_id: u32,
    /// Id written into an equipment record's decoration slot.
    pub equipped_id: u32,
}

/// Read-only decoration reference data consulted while decoding.
pub trait DecorationLookup {
    fn by_item_id(&self, item_id: u32) -> Result<&DecorationInfo>;
    fn by_equipped_id(&self, equipped_id: u32) -> Result<&DecorationInfo>;
    fn by_name(&self, name: &str) -> Result<&DecorationInfo>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationCatalog {
    entries: Vec<DecorationInfo>,
    by_item: BTreeMap<u32, usize>,
    by_equipped: BTreeMap<u32, usize>,
    by_name: BTreeMap<String, usize>,
}

// Shape of the published jewel table.
#[derive(Deserialize)]
struct JewelRecord {
    id: u32,
    #[serde(rename = "equipmentId")]
    equipment_id: u32,
    name: LocalizedName,
}

#[derive(Deserialize)]
struct LocalizedName {
    eng: String,
}

impl DecorationCatalog {
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DecorationInfo>,
    {
        let mut catalog = Self::default();
        for info in entries {
            if info.name.trim().is_empty() {
                return Err(SaveError::Catalog(format!(
                    "decoration {} has an empty name",
                    info.item_id
                )));
            }
            if info.item_id == u32::MAX {
                return Err(SaveError::Catalog(format!(
                    "decoration {} uses the empty-slot id",
                    info.name
                )));
            }

            let index = catalog.entries.len();
            if catalog.by_item.insert(info.item_id, index).is_some()
                || catalog.by_equipped.insert(info.equipped_id, index).is_some()
                || catalog.by_name.insert(info.name.clone(), index).is_some()
            {
                return Err(SaveError::Catalog(format!(
                    "duplicate decoration entry {} ({})",
                    info.name, info.item_id
                )));
            }
            catalog.entries.push(info);
        }
        Ok(catalog)
    }

    /// Parse the jewel table JSON: `[{"id", "equipmentId", "name": {"eng"}}]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<JewelRecord> =
            serde_json::from_str(json).map_err(|e| SaveError::Catalog(e.to_string()))?;
        Self::new(records.into_iter().map(|record| DecorationInfo {
            name: record.name.eng,
            item_id: record.id,
            equipped_id: record.equipment_id,
        }))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| SaveError::Catalog(format!("failed to read {}: {e}", path.display())))?;
        let catalog = Self::from_json_str(&json)?;
        debug!(path = %path.display(), entries = catalog.len(), "loaded decoration catalog");
        Ok(catalog)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecorationInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, index: Option<&usize>, kind: LookupKind, value: String) -> Result<&DecorationInfo> {
        index
            .map(|&index| &self.entries[index])
            .ok_or(SaveError::UnknownDecoration { kind, value })
    }
}

impl DecorationLookup for DecorationCatalog {
    fn by_item_id(&self, item_id: u32) -> Result<&DecorationInfo> {
        self.resolve(self.by_item.get(&item_id), LookupKind::ItemId, item_id.to_string())
    }

    fn by_equipped_id(&self, equipped_id: u32) -> Result<&DecorationInfo> {
        self.resolve(
            self.by_equipped.get(&equipped_id),
            LookupKind::EquippedId,
            equipped_id.to_string(),
        )
    }

    fn by_name(&self, name: &str) -> Result<&DecorationInfo> {
        self.resolve(self.by_name.get(name), LookupKind::Name, name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JEWELS: &str = r#"[
        {"id": 727, "equipmentId": 1, "name": {"eng": "Antidote Jewel 1", "fre": "Joyau antidote 1"}},
        {"id": 728, "equipmentId": 2, "name": {"eng": "Antipara Jewel 1"}}
    ]"#;

    #[test]
    fn json_table_supports_all_three_lookups() {
        let catalog = DecorationCatalog::from_json_str(JEWELS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_item_id(728).unwrap().name, "Antipara Jewel 1");
        assert_eq!(catalog.by_equipped_id(1).unwrap().item_id, 727);
        assert_eq!(catalog.by_name("Antidote Jewel 1").unwrap().equipped_id, 1);
    }

    #[test]
    fn missing_ids_are_errors() {
        let catalog = DecorationCatalog::from_json_str(JEWELS).unwrap();
        assert!(matches!(
            catalog.by_equipped_id(99),
            Err(SaveError::UnknownDecoration {
                kind: LookupKind::EquippedId,
                ..
            })
        ));
        assert!(catalog.by_item_id(1).is_err());
        assert!(catalog.by_name("Attack Jewel 1").is_err());
    }

    #[test]
    fn rejects_duplicate_and_sentinel_entries() {
        let info = |name: &str, item_id, equipped_id| DecorationInfo {
            name: name.to_string(),
            item_id,
            equipped_id,
        };
        assert!(DecorationCatalog::new([info("A", 1, 1), info("B", 1, 2)]).is_err());
        assert!(DecorationCatalog::new([info("A", u32::MAX, 1)]).is_err());
        assert!(DecorationCatalog::new([info(" ", 3, 3)]).is_err());
    }

    #[test]
    fn malformed_json_is_a_catalog_error() {
        assert!(matches!(
            DecorationCatalog::from_json_str("{\"id\": 1}"),
            Err(SaveError::Catalog(_))
        ));
    }
}
