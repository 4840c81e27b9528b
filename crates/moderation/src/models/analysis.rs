//! Classification result model
//!
//! Field names match the JSON returned by the classification service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one successful analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Toxicity score in [0, 1]
    pub toxic_score: f64,
    /// Negative-semantics score, when the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_score: Option<f64>,
    /// Human-readable verdict
    pub reason: String,
    pub is_microaggression: bool,
    /// Detected categories keyed by name
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryMatch>,
}

/// Per-category detail within an [`AnalysisResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Terms that triggered the category, in service order
    pub matching_terms: Vec<String>,
}

impl AnalysisResult {
    /// Categories worth showing: only reported for microaggressions
    pub fn detected_categories(&self) -> impl Iterator<Item = (&String, &CategoryMatch)> {
        self.categories
            .iter()
            .filter(move |_| self.is_microaggression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_response() {
        let json = r#"{
            "toxic_score": 0.82,
            "negative_score": 0.4,
            "reason": "high",
            "is_microaggression": true,
            "categories": {
                "insult": { "confidence": 0.9, "matching_terms": ["garbage"] }
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.toxic_score, 0.82);
        assert_eq!(result.negative_score, Some(0.4));
        assert!(result.is_microaggression);
        let insult = &result.categories["insult"];
        assert_eq!(insult.confidence, 0.9);
        assert_eq!(insult.matching_terms, vec!["garbage".to_string()]);
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let json = r#"{"toxic_score": 0.1, "reason": "No microaggression detected.", "is_microaggression": false}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.categories.is_empty());
        assert_eq!(result.negative_score, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"reason": "x", "is_microaggression": false}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_detected_categories_hidden_when_not_microaggression() {
        let mut result: AnalysisResult = serde_json::from_str(
            r#"{"toxic_score": 0.2, "reason": "ok", "is_microaggression": false,
                "categories": {"racism": {"confidence": 0.3, "matching_terms": ["exotic"]}}}"#,
        )
        .unwrap();
        assert_eq!(result.detected_categories().count(), 0);

        result.is_microaggression = true;
        assert_eq!(result.detected_categories().count(), 1);
    }
}
