//! Sales-data service contract consumed by the dashboard.
//!
//! The visualization only ever reads records through `SalesDataService::list`;
//! mutations live here so the table side of the dashboard shares one set of
//! validation rules with whichever backend is plugged in.

mod envelope;
#[cfg(feature = "http-client")]
mod http;
mod memory;

use serde::{Deserialize, Serialize};

use crate::core::{RecordId, SalesRecord};
use crate::error::{VizError, VizResult};

pub use envelope::{MessageEnvelope, RecordEnvelope};
#[cfg(feature = "http-client")]
pub use http::{DEFAULT_BASE_URL, HttpSalesClient};
pub use memory::InMemorySalesStore;

pub const PRODUCT_NAME_MAX_CHARS: usize = 255;

/// List/create/update/delete over sales records.
pub trait SalesDataService {
    /// Every record, in storage order.
    fn list(&self) -> VizResult<Vec<SalesRecord>>;

    fn create(&mut self, record: NewSalesRecord) -> VizResult<SalesRecord>;

    /// Applies the fields present in `patch`; absent fields keep their value.
    fn update(&mut self, id: RecordId, patch: SalesRecordPatch) -> VizResult<SalesRecord>;

    fn delete(&mut self, id: RecordId) -> VizResult<()>;
}

/// Create payload: every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalesRecord {
    pub product_name: String,
    pub q1_sales: f64,
    pub q2_sales: f64,
    pub q3_sales: f64,
    pub q4_sales: f64,
    pub target: f64,
}

impl NewSalesRecord {
    #[must_use]
    pub fn new(product_name: impl Into<String>, quarters: [f64; 4], target: f64) -> Self {
        Self {
            product_name: product_name.into(),
            q1_sales: quarters[0],
            q2_sales: quarters[1],
            q3_sales: quarters[2],
            q4_sales: quarters[3],
            target,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        validate_product_name(&self.product_name)?;
        for (field, value) in [
            ("q1_sales", self.q1_sales),
            ("q2_sales", self.q2_sales),
            ("q3_sales", self.q3_sales),
            ("q4_sales", self.q4_sales),
            ("target", self.target),
        ] {
            validate_amount(field, value)?;
        }
        Ok(())
    }
}

/// Partial update payload; `None` fields are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q4_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl SalesRecordPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> VizResult<()> {
        if let Some(name) = &self.product_name {
            validate_product_name(name)?;
        }
        for (field, value) in [
            ("q1_sales", self.q1_sales),
            ("q2_sales", self.q2_sales),
            ("q3_sales", self.q3_sales),
            ("q4_sales", self.q4_sales),
            ("target", self.target),
        ] {
            if let Some(value) = value {
                validate_amount(field, value)?;
            }
        }
        Ok(())
    }

    /// Copies present fields onto `record`. Does not validate.
    pub fn apply_to(&self, record: &mut SalesRecord) {
        if let Some(name) = &self.product_name {
            record.product_name.clone_from(name);
        }
        for (slot, value) in [
            (&mut record.q1_sales, self.q1_sales),
            (&mut record.q2_sales, self.q2_sales),
            (&mut record.q3_sales, self.q3_sales),
            (&mut record.q4_sales, self.q4_sales),
            (&mut record.target, self.target),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

fn validate_product_name(name: &str) -> VizResult<()> {
    if name.trim().is_empty() {
        return Err(VizError::InvalidData(
            "product_name must not be empty".to_owned(),
        ));
    }
    if name.chars().count() > PRODUCT_NAME_MAX_CHARS {
        return Err(VizError::InvalidData(format!(
            "product_name must be at most {PRODUCT_NAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_amount(field: &str, value: f64) -> VizResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(VizError::InvalidData(format!(
            "{field} must be a finite number >= 0"
        )));
    }
    Ok(())
}
