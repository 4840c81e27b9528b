//! Plain-text analysis report

use std::fmt;

use crate::models::AnalysisResult;

/// Display adapter that renders a result the way the report panel shows it
pub struct AnalysisReport<'a>(pub &'a AnalysisResult);

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Analysis Report")?;
        writeln!(f, "Toxicity Score: {:.3}", result.toxic_score)?;
        write!(f, "Status: {}", result.reason)?;

        let mut categories = result.detected_categories().peekable();
        if categories.peek().is_some() {
            write!(f, "\nDetected Categories:")?;
            for (name, detail) in categories {
                write!(f, "\n  {}:", name)?;
                write!(f, "\n    Confidence: {:.1}%", detail.confidence * 100.0)?;
                write!(f, "\n    Terms: {}", detail.matching_terms.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AnalysisResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_report_with_categories() {
        let result = parse(
            r#"{"toxic_score": 0.82, "reason": "high", "is_microaggression": true,
                "categories": {
                    "insult": {"confidence": 0.9, "matching_terms": ["garbage", "trash"]},
                    "racism": {"confidence": 0.125, "matching_terms": ["exotic"]}
                }}"#,
        );

        let expected = "Analysis Report\n\
                        Toxicity Score: 0.820\n\
                        Status: high\n\
                        Detected Categories:\n  \
                        insult:\n    \
                        Confidence: 90.0%\n    \
                        Terms: garbage, trash\n  \
                        racism:\n    \
                        Confidence: 12.5%\n    \
                        Terms: exotic";
        assert_eq!(AnalysisReport(&result).to_string(), expected);
    }

    #[test]
    fn test_report_without_microaggression_skips_categories() {
        let result = parse(
            r#"{"toxic_score": 0.0123, "reason": "No microaggression detected.", "is_microaggression": false,
                "categories": {"insult": {"confidence": 0.9, "matching_terms": ["garbage"]}}}"#,
        );
        assert_eq!(
            AnalysisReport(&result).to_string(),
            "Analysis Report\nToxicity Score: 0.012\nStatus: No microaggression detected."
        );
    }
}
