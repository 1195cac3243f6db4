//! Exchange types for the external data-analysis service.
//!
//! The analysis itself is a pass-through call the host makes (an edge
//! function forwarding to a text-generation API); the crate only defines the
//! data contract and the sampling rule: at most the first
//! [`SAMPLE_ROW_LIMIT`] rows leave the player.

use serde::{Deserialize, Serialize};

use crate::types::Dataset;

/// Maximum number of body rows included in an analysis request.
pub const SAMPLE_ROW_LIMIT: usize = 10;

/// Table sample sent to the analyzer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSample {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Request body for the analyze endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub api_key: String,
    pub data: AnalyzeSample,
}

impl AnalyzeRequest {
    /// Build a request from a dataset, truncating to the sample limit.
    pub fn sample(dataset: &Dataset, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            data: AnalyzeSample {
                headers: dataset.headers.clone(),
                rows: dataset
                    .rows
                    .iter()
                    .take(SAMPLE_ROW_LIMIT)
                    .cloned()
                    .collect(),
            },
        }
    }
}

/// Successful analyzer response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub insight: String,
}

/// Analyzer error response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_truncates_rows() {
        let dataset = Dataset {
            headers: vec!["n".to_string()],
            rows: (0..25).map(|i| vec![i.to_string()]).collect(),
            source_id: "big.xlsx".to_string(),
            styles: None,
        };
        let req = AnalyzeRequest::sample(&dataset, "sk-test");
        assert_eq!(req.data.rows.len(), SAMPLE_ROW_LIMIT);
        assert_eq!(req.data.headers, dataset.headers);
    }

    #[test]
    fn test_request_wire_shape() {
        let req = AnalyzeRequest {
            api_key: "sk-x".to_string(),
            data: AnalyzeSample {
                headers: vec!["A".to_string()],
                rows: vec![],
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"apiKey\":\"sk-x\""));
        assert!(json.contains("\"headers\":[\"A\"]"));
    }
}
