use crate::error::{MaternaError, MaternaResult};
use serde::{de::DeserializeOwned, Serialize};

/// Unified access to all persistent trees.
#[derive(Clone)]
pub struct DbOperations {
    /// The underlying sled database instance
    db: sled::Db,
    /// Cached trees
    pub(crate) officers_tree: sled::Tree,
    pub(crate) caregivers_tree: sled::Tree,
    pub(crate) patients_tree: sled::Tree,
    pub(crate) patients_by_national_id_tree: sled::Tree,
    pub(crate) visits_tree: sled::Tree,
    pub(crate) pregnancy_profiles_tree: sled::Tree,
    pub(crate) delivery_outcomes_tree: sled::Tree,
    pub(crate) care_plans_tree: sled::Tree,
    /// Pending credential notifications awaiting delivery
    pub(crate) outbox_tree: sled::Tree,
}

impl DbOperations {
    /// Creates a new DbOperations instance with all required trees.
    pub fn new(db: sled::Db) -> Result<Self, sled::Error> {
        let officers_tree = db.open_tree("officers")?;
        let caregivers_tree = db.open_tree("caregivers")?;
        let patients_tree = db.open_tree("patients")?;
        let patients_by_national_id_tree = db.open_tree("patients_by_national_id")?;
        let visits_tree = db.open_tree("visit_records")?;
        let pregnancy_profiles_tree = db.open_tree("pregnancy_profiles")?;
        let delivery_outcomes_tree = db.open_tree("delivery_outcomes")?;
        let care_plans_tree = db.open_tree("care_plans")?;
        let outbox_tree = db.open_tree("notification_outbox")?;

        Ok(Self {
            db,
            officers_tree,
            caregivers_tree,
            patients_tree,
            patients_by_national_id_tree,
            visits_tree,
            pregnancy_profiles_tree,
            delivery_outcomes_tree,
            care_plans_tree,
            outbox_tree,
        })
    }

    /// Open a database at the given path and wrap it.
    pub fn open(path: &std::path::Path) -> MaternaResult<Self> {
        let db = sled::open(path)?;
        Ok(Self::new(db)?)
    }

    /// Allocate the next monotonic entity id.
    pub fn next_id(&self) -> MaternaResult<u64> {
        Ok(self.db.generate_id()?)
    }

    /// Store a serializable item under `key` in `tree`, durably.
    pub(crate) fn store_item<T: Serialize>(
        &self,
        tree: &sled::Tree,
        key: &str,
        item: &T,
    ) -> MaternaResult<()> {
        let bytes = serde_json::to_vec(item)?;
        tree.insert(key.as_bytes(), bytes)?;
        // Ensure the write is durably on disk before the request returns
        tree.flush()?;
        Ok(())
    }

    /// Retrieve a deserializable item from `tree`.
    pub(crate) fn get_item<T: DeserializeOwned>(
        &self,
        tree: &sled::Tree,
        key: &str,
    ) -> MaternaResult<Option<T>> {
        match tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Remove an item from `tree`, durably.
    pub(crate) fn remove_item(&self, tree: &sled::Tree, key: &str) -> MaternaResult<()> {
        tree.remove(key.as_bytes())?;
        tree.flush()?;
        Ok(())
    }

    /// Scan a whole tree in key order, deserializing every value.
    pub(crate) fn scan_items<T: DeserializeOwned>(
        &self,
        tree: &sled::Tree,
    ) -> MaternaResult<Vec<T>> {
        let mut items = Vec::new();
        for entry in tree.iter() {
            let (_, bytes) = entry?;
            items.push(
                serde_json::from_slice(&bytes)
                    .map_err(|e| MaternaError::Serialization(e.to_string()))?,
            );
        }
        Ok(items)
    }
}

/// Zero-padded key so lexicographic tree order matches id order.
pub(crate) fn id_key(id: u64) -> String {
    format!("{:020}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (DbOperations, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ops = DbOperations::open(dir.path()).unwrap();
        (ops, dir)
    }

    #[test]
    fn store_get_remove_round_trip() {
        let (ops, _dir) = test_db();
        ops.store_item(&ops.officers_tree, "alpha", &42u32).unwrap();
        assert_eq!(
            ops.get_item::<u32>(&ops.officers_tree, "alpha").unwrap(),
            Some(42)
        );
        ops.remove_item(&ops.officers_tree, "alpha").unwrap();
        assert_eq!(
            ops.get_item::<u32>(&ops.officers_tree, "alpha").unwrap(),
            None
        );
    }

    #[test]
    fn id_keys_preserve_order() {
        let (ops, _dir) = test_db();
        for id in [3u64, 12, 100, 5] {
            ops.store_item(&ops.visits_tree, &id_key(id), &id).unwrap();
        }
        let scanned: Vec<u64> = ops.scan_items(&ops.visits_tree).unwrap();
        assert_eq!(scanned, vec![3, 5, 12, 100]);
    }

    #[test]
    fn next_id_is_monotonic() {
        let (ops, _dir) = test_db();
        let first = ops.next_id().unwrap();
        let second = ops.next_id().unwrap();
        assert!(second > first);
    }
}
