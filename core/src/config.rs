use serde::{Deserialize, Serialize};

/// Ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on results returned by one ranked query.
    pub max_results: usize,
    /// Relevances closer than this are treated as equal and ordered by rating.
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 5, relevance_epsilon: 1e-6 }
    }
}

impl SearchConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SearchConfig::from_json_str(r#"{ "max_results": 10 }"#).unwrap();
        assert_eq!(cfg.max_results, 10);
        assert_eq!(cfg.relevance_epsilon, 1e-6);
        assert_eq!(SearchConfig::from_json_str("{}").unwrap(), SearchConfig::default());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(SearchConfig::from_json_str(r#"{ "max_results": -1 }"#).is_err());
    }
}
