use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Drawing target dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height. Only meaningful for valid surfaces.
    #[must_use]
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Opaque record identifier assigned by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product row of the sales table.
///
/// Numeric fields are expected to be finite and `>= 0`; the data service
/// enforces that, the visualization does not re-check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: RecordId,
    pub product_name: String,
    pub q1_sales: f64,
    pub q2_sales: f64,
    pub q3_sales: f64,
    pub q4_sales: f64,
    pub target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SalesRecord {
    #[must_use]
    pub fn new(id: u64, product_name: impl Into<String>, quarters: [f64; 4], target: f64) -> Self {
        Self {
            id: RecordId(id),
            product_name: product_name.into(),
            q1_sales: quarters[0],
            q2_sales: quarters[1],
            q3_sales: quarters[2],
            q4_sales: quarters[3],
            target,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn quarters(&self) -> [f64; 4] {
        [self.q1_sales, self.q2_sales, self.q3_sales, self.q4_sales]
    }

    #[must_use]
    pub fn total_sales(&self) -> f64 {
        self.q1_sales + self.q2_sales + self.q3_sales + self.q4_sales
    }

    #[must_use]
    pub fn average_sales(&self) -> f64 {
        self.total_sales() / 4.0
    }

    /// Largest of the four quarters and the target.
    #[must_use]
    pub fn max_metric(&self) -> f64 {
        self.quarters()
            .into_iter()
            .fold(self.target, f64::max)
    }
}
