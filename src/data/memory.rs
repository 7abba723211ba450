use chrono::Utc;
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{RecordId, SalesRecord};
use crate::error::{VizError, VizResult};

use super::{NewSalesRecord, SalesDataService, SalesRecordPatch};

/// Process-local store with the same rules as the HTTP service.
///
/// Ids start at 1 and are never reused. `IndexMap` keeps insertion order so
/// `list` is stable across deletes.
#[derive(Debug, Clone)]
pub struct InMemorySalesStore {
    records: IndexMap<RecordId, SalesRecord>,
    next_id: u64,
}

impl Default for InMemorySalesStore {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl InMemorySalesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store, validating every row.
    pub fn with_records(rows: impl IntoIterator<Item = NewSalesRecord>) -> VizResult<Self> {
        let mut store = Self::new();
        for row in rows {
            store.create(row)?;
        }
        Ok(store)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&SalesRecord> {
        self.records.get(&id)
    }
}

impl SalesDataService for InMemorySalesStore {
    fn list(&self) -> VizResult<Vec<SalesRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn create(&mut self, record: NewSalesRecord) -> VizResult<SalesRecord> {
        record.validate()?;
        let id = RecordId(self.next_id);
        self.next_id += 1;
        let now = Utc::now();
        let stored = SalesRecord {
            id,
            product_name: record.product_name,
            q1_sales: record.q1_sales,
            q2_sales: record.q2_sales,
            q3_sales: record.q3_sales,
            q4_sales: record.q4_sales,
            target: record.target,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.records.insert(id, stored.clone());
        debug!(id = %id, "sales record created");
        Ok(stored)
    }

    fn update(&mut self, id: RecordId, patch: SalesRecordPatch) -> VizResult<SalesRecord> {
        patch.validate()?;
        let record = self
            .records
            .get_mut(&id)
            .ok_or(VizError::RecordNotFound { id: id.0 })?;
        patch.apply_to(record);
        record.updated_at = Some(Utc::now());
        debug!(id = %id, "sales record updated");
        Ok(record.clone())
    }

    fn delete(&mut self, id: RecordId) -> VizResult<()> {
        self.records
            .shift_remove(&id)
            .ok_or(VizError::RecordNotFound { id: id.0 })?;
        debug!(id = %id, "sales record deleted");
        Ok(())
    }
}
