//! Records exchanged with the analysis backend.

use serde::{Deserialize, Serialize};

/// One row of the analysis history list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Server-assigned identifier.
    #[serde(deserialize_with = "id_string::deserialize")]
    pub id: String,
    /// Overall rubric score, 0–100.
    pub overall_score: u8,
    /// ISO-8601 creation timestamp as sent by the server.
    pub created_at: String,
}

/// Score and feedback for a single rubric metric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricResult {
    pub name: String,
    pub score: u8,
    /// Markdown feedback text.
    pub feedback: String,
}

/// Fully detailed analysis record returned by `GET /analysis/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetail {
    #[serde(deserialize_with = "id_string::deserialize")]
    pub id: String,
    pub created_at: String,
    pub overall_score: u8,
    #[serde(default)]
    pub metrics: Vec<MetricResult>,
    /// Markdown recommendation items, in server order.
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub transcript: String,
}

/// Wire shape of a `POST /analyze` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalyzeScores,
    #[serde(default)]
    pub transcript: String,
}

/// Scores nested inside [`AnalyzeResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeScores {
    #[serde(default)]
    pub metrics: Vec<MetricResult>,
    pub overall_score: u8,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Result of a fresh upload, ready for the result view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    pub metrics: Vec<MetricResult>,
    pub overall_score: u8,
    pub recommendations: Vec<String>,
    pub transcript: String,
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            metrics: response.analysis.metrics,
            overall_score: response.analysis.overall_score,
            recommendations: response.analysis.recommendations,
            transcript: response.transcript,
        }
    }
}

/// Credentials posted to `/login` and `/register`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Backends hand out numeric or string ids; the client always keeps strings.
mod id_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        })
    }
}
