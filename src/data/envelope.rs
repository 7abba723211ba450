use serde::{Deserialize, Serialize};

use crate::core::SalesRecord;

pub(crate) const RECORD_CREATED: &str = "Record Created";
pub(crate) const RECORD_UPDATED: &str = "Record updated successfully";
pub(crate) const RECORD_DELETED: &str = "Record deleted successfully";

/// `{ "message": ..., "data": record }` body of create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEnvelope {
    pub message: String,
    pub data: SalesRecord,
}

impl RecordEnvelope {
    #[must_use]
    pub fn created(record: SalesRecord) -> Self {
        Self {
            message: RECORD_CREATED.to_owned(),
            data: record,
        }
    }

    #[must_use]
    pub fn updated(record: SalesRecord) -> Self {
        Self {
            message: RECORD_UPDATED.to_owned(),
            data: record,
        }
    }
}

/// Message-only body, as returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: RECORD_DELETED.to_owned(),
        }
    }
}
