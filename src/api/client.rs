//! HTTP implementation of [`AnalysisBackend`].

use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::AnalysisBackend;
use crate::http_client;
use crate::model::{AnalysisDetail, AnalysisSummary, AnalyzeResponse, Credentials};
use crate::upload::UploadFile;

const MAX_LIST_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
const MAX_DETAIL_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MAX_AUTH_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_ERROR_RESPONSE_BYTES: usize = 64 * 1024;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response. `message` is the body's `error` field when present.
    #[error("{}", .message.clone().unwrap_or_else(|| format!("HTTP {status}")))]
    Api { status: u16, message: Option<String> },
    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The recording could not be read from disk.
    #[error("Could not read recording: {0}")]
    File(String),
}

impl ApiError {
    /// Text for the user: the server's reason, else the operation's fallback.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Api { message: None, .. } | Self::Decode(_) => {
                operation.fallback_message().to_string()
            }
            Self::Network(_) | Self::File(_) => self.to_string(),
        }
    }
}

/// User-facing operations, each with its own generic failure text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ListAnalyses,
    RefreshAnalyses,
    AnalysisDetail,
    Analyze,
    Login,
    Register,
}

impl Operation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::ListAnalyses => "Failed to fetch analyses",
            Self::RefreshAnalyses => "Failed to refresh analyses",
            Self::AnalysisDetail => "Failed to fetch analysis details",
            Self::Analyze => "Failed to analyze the recording",
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct LoginBody {
    token: Option<String>,
}

/// Talks to the backend rooted at `base_url`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
        max_bytes: usize,
    ) -> Result<T, ApiError> {
        let request = http_client::agent()
            .get(url.as_str())
            .set("Accept", "application/json")
            .set("Authorization", &bearer(token));
        let response = check_status(request.call())?;
        decode_body(response, max_bytes)
    }

    fn post_credentials(&self, path: &str, credentials: &Credentials) -> Result<ureq::Response, ApiError> {
        let url = self.endpoint(&[path]);
        let request = http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json");
        check_status(request.send_json(credentials))
    }
}

impl AnalysisBackend for HttpBackend {
    fn list_analyses(&self, token: &str) -> Result<Vec<AnalysisSummary>, ApiError> {
        self.get_json(&self.endpoint(&["analyses"]), token, MAX_LIST_RESPONSE_BYTES)
    }

    fn analysis_detail(&self, token: &str, id: &str) -> Result<AnalysisDetail, ApiError> {
        self.get_json(&self.endpoint(&["analysis", id]), token, MAX_DETAIL_RESPONSE_BYTES)
    }

    fn analyze(&self, token: &str, file: &UploadFile) -> Result<AnalyzeResponse, ApiError> {
        let bytes = std::fs::read(&file.path).map_err(|err| ApiError::File(err.to_string()))?;
        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type())
            .map_err(|err| ApiError::File(err.to_string()))?;
        let client = http_client::upload_client().map_err(ApiError::Network)?;
        let response = client
            .post(self.endpoint(&["analyze"]))
            .bearer_auth(token.trim())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(Form::new().part("file", part))
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        let body = http_client::read_upload_response_text(response, MAX_DETAIL_RESPONSE_BYTES)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        parse_json(&body)
    }

    fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self.post_credentials("login", credentials)?;
        let body: LoginBody = decode_body(response, MAX_AUTH_RESPONSE_BYTES)?;
        body.token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("login response has no token".to_string()))
    }

    fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.post_credentials("register", credentials).map(|_| ())
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token.trim())
}

fn check_status(result: Result<ureq::Response, ureq::Error>) -> Result<ureq::Response, ApiError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(code, response)) => {
            let body = http_client::read_response_text(response, MAX_ERROR_RESPONSE_BYTES)
                .unwrap_or_default();
            Err(status_error(code, &body))
        }
        Err(ureq::Error::Transport(err)) => Err(ApiError::Network(err.to_string())),
    }
}

fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body.trim())
        .ok()
        .and_then(|body| body.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty());
    ApiError::Api { status, message }
}

fn decode_body<T: DeserializeOwned>(response: ureq::Response, max_bytes: usize) -> Result<T, ApiError> {
    let body = http_client::read_response_text(response, max_bytes)
        .map_err(|err| ApiError::Decode(err.to_string()))?;
    parse_json(&body)
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body.trim()).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::{json_response, serve_once};
    use std::time::Duration;

    fn backend_for(url: &str) -> HttpBackend {
        HttpBackend::new(Url::parse(url).unwrap())
    }

    fn creds() -> Credentials {
        Credentials {
            username: "sam".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let backend = backend_for("https://calls.example.com/api/");
        assert_eq!(
            backend.endpoint(&["analysis", "a b/c"]).as_str(),
            "https://calls.example.com/api/analysis/a%20b%2Fc"
        );
        let backend = backend_for("https://calls.example.com/api");
        assert_eq!(
            backend.endpoint(&["analyses"]).as_str(),
            "https://calls.example.com/api/analyses"
        );
    }

    #[test]
    fn list_sends_bearer_token_and_parses_rows() {
        let body = r#"[{"id": "a1", "overall_score": 91, "created_at": "2024-03-05T14:07:00Z"}]"#;
        let (url, requests) = serve_once(json_response("200 OK", body));
        let rows = backend_for(&url).list_analyses("tok-123").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a1");
        let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("GET /analyses "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tok-123"));
    }

    #[test]
    fn status_error_uses_server_message() {
        let (url, _) = serve_once(json_response("401 Unauthorized", r#"{"error": "Token expired"}"#));
        let err = backend_for(&url).analysis_detail("tok", "7").unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 401,
                message: Some("Token expired".into())
            }
        );
        assert_eq!(err.user_message(Operation::AnalysisDetail), "Token expired");
    }

    #[test]
    fn status_error_without_message_falls_back_per_operation() {
        let (url, _) = serve_once(json_response("500 Internal Server Error", "oops"));
        let err = backend_for(&url).list_analyses("tok").unwrap_err();
        assert_eq!(
            err.user_message(Operation::RefreshAnalyses),
            "Failed to refresh analyses"
        );
        assert_eq!(err.user_message(Operation::ListAnalyses), "Failed to fetch analyses");
    }

    #[test]
    fn transport_failure_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = backend_for(&format!("http://{addr}")).list_analyses("tok").unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn login_returns_token_and_posts_json() {
        let (url, requests) = serve_once(json_response("200 OK", r#"{"token": "abc"}"#));
        assert_eq!(backend_for(&url).login(&creds()).unwrap(), "abc");
        let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("POST /login "));
        assert!(request.contains(r#""username":"sam""#));
    }

    #[test]
    fn login_without_token_is_decode_error() {
        let (url, _) = serve_once(json_response("200 OK", "{}"));
        let err = backend_for(&url).login(&creds()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.user_message(Operation::Login), "Login failed");
    }

    #[test]
    fn register_ignores_success_body() {
        let (url, _) = serve_once(json_response("201 Created", ""));
        assert!(backend_for(&url).register(&creds()).is_ok());
    }

    #[test]
    fn analyze_uploads_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call.wav");
        std::fs::write(&path, b"RIFF....WAVE").unwrap();
        let file = UploadFile {
            path,
            file_name: "call.wav".into(),
            size_bytes: 12,
        };
        let body = r#"{"analysis": {"metrics": [], "overallScore": 64, "recommendations": []}, "transcript": ""}"#;
        let (url, requests) = serve_once(json_response("200 OK", body));
        let response = backend_for(&url).analyze("tok", &file).unwrap();
        assert_eq!(response.analysis.overall_score, 64);
        let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("POST /analyze "));
        assert!(request.contains(r#"name="file"; filename="call.wav""#));
    }
}
