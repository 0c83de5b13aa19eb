//! Per-column Feature record.

use serde::{Deserialize, Serialize};

/// Descriptive profile of one column.
///
/// Numeric statistics are `None` for non-numeric columns and vice versa;
/// `None` fields emit as empty strings in the final JSON (see
/// [`crate::blank_nulls`]). Formatted statistics carry fixed 3-decimal
/// strings produced by [`crate::round3`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub feat_physical_name: String,
    pub feat_index: usize,
    pub feat_datatype: String,
    pub feat_vartype: String,
    pub feat_count: u64,
    /// Missing cells as "`count (percent%)`", percent to 3 decimals.
    pub feat_missing: String,
    pub feat_unique: u64,
    pub feat_average: Option<String>,
    pub feat_median: Option<String>,
    /// Space-joined modal values, or `None` when there is no mode.
    pub feat_mode: Option<String>,
    pub feat_max: Option<String>,
    pub feat_min: Option<String>,
    pub feat_stddev: Option<String>,
    pub feat_variance: Option<String>,
    pub feat_quantile25: Option<String>,
    pub feat_quantile75: Option<String>,
    pub feat_iqr: Option<String>,
    pub feat_skew: Option<String>,
    pub feat_kurtosis: Option<String>,
    pub feat_mostcommon: Option<String>,
    pub feat_5_mostcommon_values: Vec<String>,
    pub feat_5_mostcommon_counts: Vec<u64>,
    pub feat_leastcommon: Option<String>,
    pub feat_5_leastcommon_values: Vec<String>,
    pub feat_5_leastcommon_counts: Vec<u64>,
    pub feat_max_length: Option<u64>,
    pub feat_min_length: Option<u64>,
    /// Validation error count carried over from the errors artifact.
    pub feat_errors: u64,
    pub feat_warnings: Vec<String>,
    pub feat_notes: Vec<String>,
    /// Count of non-missing values inside [q25, q75] inclusive.
    pub feat_outlierscore: Option<u64>,
    pub feat_is_pii: bool,
    /// Winning PII category carried over from the PII record.
    pub feat_pii_type: Option<String>,
}

impl Feature {
    /// Create a record for a named column at its table index.
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            feat_physical_name: name.into(),
            feat_index: index,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blank_nulls;

    #[test]
    fn test_new_defaults() {
        let feat = Feature::new("age", 3);
        assert_eq!(feat.feat_physical_name, "age");
        assert_eq!(feat.feat_index, 3);
        assert!(!feat.feat_is_pii);
        assert!(feat.feat_average.is_none());
    }

    #[test]
    fn test_nulls_blank_in_json() {
        let feat = Feature::new("city", 0);
        let mut json = serde_json::to_value(&feat).unwrap();
        blank_nulls(&mut json);
        assert_eq!(json["feat_average"], "");
        assert_eq!(json["feat_mode"], "");
        assert_eq!(json["feat_physical_name"], "city");
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut feat = Feature::new("amount", 1);
        feat.feat_datatype = "Float".to_string();
        feat.feat_average = Some("12.500".to_string());
        feat.feat_5_mostcommon_values = vec!["12.5".to_string()];
        feat.feat_5_mostcommon_counts = vec![3];

        let json = serde_json::to_string(&feat).unwrap();
        let back: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(feat, back);
    }
}
