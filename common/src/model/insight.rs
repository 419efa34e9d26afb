use crate::model::activity::ActivityType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One rule-based recommendation returned by `GET /api/insights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub suggestion: String,
    pub impact: Impact,
    /// Category the recommendation targets, if any.
    pub category: Option<ActivityType>,
}

/// Templated narrative returned by `POST /api/insights/ai`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub content: String,
}
