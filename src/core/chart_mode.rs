use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Which metrics become bars and how they are grouped per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartMode {
    /// Four bars per record, one per fiscal quarter.
    #[default]
    QuarterlyComparison,
    /// Two bars per record: quarterly average and target.
    PerformanceVsTarget,
    /// One bar per record: total of the four quarters.
    ProductComparison,
}

impl ChartMode {
    pub const ALL: [ChartMode; 3] = [
        ChartMode::QuarterlyComparison,
        ChartMode::PerformanceVsTarget,
        ChartMode::ProductComparison,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuarterlyComparison => "quarterly-comparison",
            Self::PerformanceVsTarget => "performance-vs-target",
            Self::ProductComparison => "product-comparison",
        }
    }

    #[must_use]
    pub const fn bars_per_record(self) -> usize {
        match self {
            Self::QuarterlyComparison => 4,
            Self::PerformanceVsTarget => 2,
            Self::ProductComparison => 1,
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartMode {
    type Err = VizError;

    /// Accepts the canonical identifiers and the short dashboard button ids,
    /// so both spellings select the same mode.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "quarterly-comparison" | "quarterly" => Ok(Self::QuarterlyComparison),
            "performance-vs-target" | "performance" => Ok(Self::PerformanceVsTarget),
            "product-comparison" | "products" => Ok(Self::ProductComparison),
            other => Err(VizError::InvalidData(format!(
                "unknown chart mode `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChartMode;

    #[test]
    fn short_and_canonical_ids_resolve_to_same_mode() {
        for mode in ChartMode::ALL {
            assert_eq!(mode.as_str().parse::<ChartMode>().expect("canonical"), mode);
        }
        assert_eq!(
            "quarterly".parse::<ChartMode>().expect("short"),
            ChartMode::QuarterlyComparison
        );
        assert_eq!(
            "performance".parse::<ChartMode>().expect("short"),
            ChartMode::PerformanceVsTarget
        );
        assert_eq!(
            "products".parse::<ChartMode>().expect("short"),
            ChartMode::ProductComparison
        );
        assert!("pie".parse::<ChartMode>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case_identifiers() {
        let json = serde_json::to_string(&ChartMode::PerformanceVsTarget).expect("serialize");
        assert_eq!(json, "\"performance-vs-target\"");
    }
}
