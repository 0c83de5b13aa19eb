//! Report-facing shapes derived from the PII records.

use serde_json::{Value, json};

use dataprof_model::{FeaturePii, PiiScore};

/// Winner-only compact map: `{column: {category: score}}`.
pub fn build_pii_map(records: &[FeaturePii]) -> Value {
    let mut out = serde_json::Map::new();
    for record in records {
        let mut entry = serde_json::Map::new();
        if let Some(category) = record.winning_category() {
            entry.insert(category.to_string(), Value::from(record.winning_score()));
        }
        out.insert(record.feat_name.clone(), Value::Object(entry));
    }
    Value::Object(out)
}

/// Tree shape consumed by the report front-end's sunburst/flare chart.
pub fn build_flare_tree(records: &[FeaturePii]) -> Value {
    let children: Vec<Value> = records
        .iter()
        .map(|record| {
            let leaves: Vec<Value> = record
                .pii_types_and_scores
                .iter()
                .map(|(category, score)| {
                    json!({"name": category, "size": PiiScore::effective(score)})
                })
                .collect();
            json!({"name": record.feat_name, "children": leaves})
        })
        .collect();
    json!({"name": "pii", "children": children})
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(name: &str, pairs: &[(&str, u32)]) -> FeaturePii {
        let scores: BTreeMap<String, PiiScore> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), PiiScore::Single(*v)))
            .collect();
        FeaturePii::from_scores(name, scores)
    }

    #[test]
    fn test_pii_map_winners_only() {
        let records = vec![record("email", &[("emails", 97), ("dates", 0)])];
        let map = build_pii_map(&records);
        assert_eq!(map["email"]["emails"], 97);
        assert!(map["email"].get("dates").is_none());
    }

    #[test]
    fn test_flare_tree_shape() {
        let records = vec![record("zip", &[("zip_codes", 100)])];
        let tree = build_flare_tree(&records);
        assert_eq!(tree["name"], "pii");
        assert_eq!(tree["children"][0]["name"], "zip");
        assert_eq!(tree["children"][0]["children"][0]["size"], 100);
    }
}
