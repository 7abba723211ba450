use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::SalesRecord;
use crate::error::{VizError, VizResult};

/// Shared value-to-height mapping for one scene build.
///
/// The largest metric in the input (any quarter or target) maps exactly to
/// `target_span`. When every metric is zero the scale degenerates to a zero
/// factor and all bars collapse to the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarScale {
    target_span: f64,
    max_value: f64,
    scale_factor: f64,
}

/// Reference tick drawn beside the bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub height: f64,
    pub value: f64,
    pub label: String,
}

impl BarScale {
    pub fn from_max_value(max_value: f64, target_span: f64) -> VizResult<Self> {
        if !target_span.is_finite() || target_span <= 0.0 {
            return Err(VizError::InvalidData(
                "target bar span must be finite and > 0".to_owned(),
            ));
        }
        if !max_value.is_finite() || max_value < 0.0 {
            return Err(VizError::InvalidData(
                "max metric value must be finite and >= 0".to_owned(),
            ));
        }

        let scale_factor = if max_value > 0.0 {
            target_span / max_value
        } else {
            debug!(target_span, "degenerate bar scale, all metrics are zero");
            0.0
        };

        Ok(Self {
            target_span,
            max_value,
            scale_factor,
        })
    }

    /// Builds the scale from the flattened quarter and target values of `records`.
    pub fn from_records(records: &[SalesRecord], target_span: f64) -> VizResult<Self> {
        let max_value = records
            .iter()
            .map(SalesRecord::max_metric)
            .fold(0.0_f64, f64::max);
        Self::from_max_value(max_value, target_span)
    }

    #[must_use]
    pub fn target_span(self) -> f64 {
        self.target_span
    }

    #[must_use]
    pub fn max_value(self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn scale_factor(self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.scale_factor == 0.0
    }

    /// `value * scale_factor`, evaluated as a ratio of the maximum so the
    /// largest metric lands on `target_span` without rounding drift.
    #[must_use]
    pub fn height_for(self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            value / self.max_value * self.target_span
        }
    }

    /// Inverse of `height_for`. A degenerate scale maps every height to zero.
    #[must_use]
    pub fn value_at_height(self, height: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            height / self.scale_factor
        }
    }

    /// Ticks at every `step` scene units from the ground up to the target span.
    pub fn reference_ticks(self, step: f64) -> VizResult<Vec<AxisTick>> {
        if !step.is_finite() || step <= 0.0 {
            return Err(VizError::InvalidData(
                "axis tick step must be finite and > 0".to_owned(),
            ));
        }

        let count = (self.target_span / step + 1e-9).floor() as usize;
        Ok((0..=count)
            .map(|index| {
                let height = index as f64 * step;
                let value = self.value_at_height(height);
                AxisTick {
                    height,
                    value,
                    label: format!("{:.0}", value.round()),
                }
            })
            .collect())
    }
}
