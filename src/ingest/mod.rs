//! Remote question-set ingestion: fetch a delimited file, decode it, map its
//! rows into a [`QuestionBank`] and replace the on-disk cache.

pub mod decode;
pub mod fetch;
pub mod rows;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::info;

use crate::config::Delimiter;
use crate::quiz::question::QuestionBank;
use crate::quiz::subject::Subject;
use crate::store::json_store::JsonStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no URL given")]
    EmptyUrl,
    #[error("URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("request timed out after {} seconds", fetch::FETCH_TIMEOUT_SECS)]
    Timeout,
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("built without network support")]
    Disabled,
}

impl IngestError {
    /// Transport-level failures, timeouts and bad statuses included.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            IngestError::Network(_) | IngestError::Timeout | IngestError::Status(_)
        )
    }
}

#[derive(Clone, Debug)]
pub struct IngestReport {
    pub bank: QuestionBank,
    pub count: usize,
    pub encoding: &'static str,
    pub delimiter: Delimiter,
    pub finished_at: DateTime<Local>,
}

/// Trim and check the scheme; nothing is fetched for a rejected URL.
pub fn validate_url(url: &str) -> Result<&str, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ValidationError::UnsupportedScheme(url.to_string()));
    }
    Ok(url)
}

/// Decode and map already-downloaded bytes. Pure: no network, no disk.
pub fn ingest_bytes(bytes: &[u8], url: &str, delimiter: Delimiter) -> IngestReport {
    let decoded = decode::decode_or_lossy(bytes);
    let fallback = Subject::infer_from_url(url);
    let parsed = rows::parse_rows(&decoded.text, delimiter, fallback);
    IngestReport {
        bank: parsed.bank,
        count: parsed.accepted,
        encoding: decoded.encoding,
        delimiter,
        finished_at: Local::now(),
    }
}

/// Fetch `url`, build the bank and overwrite the cache file. The cache is only
/// touched after the whole pipeline succeeded; a failed cache write is logged
/// and does not fail the ingestion.
pub fn ingest(url: &str, delimiter: Delimiter, store: &JsonStore) -> Result<IngestReport, IngestError> {
    let url = validate_url(url)?;
    info!(url, delimiter = delimiter.label(), "fetching question set");
    let bytes = fetch::fetch_bytes(url)?;

    let report = ingest_bytes(&bytes, url, delimiter);
    info!(
        count = report.count,
        subjects = ?report.bank.keys().collect::<Vec<_>>(),
        encoding = report.encoding,
        "question set parsed"
    );
    store.save_question_bank(&report.bank);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::Difficulty;

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url("  https://a.b/c.csv "), Ok("https://a.b/c.csv"));
        assert_eq!(validate_url("HTTP://a.b/c.csv"), Ok("HTTP://a.b/c.csv"));
        assert_eq!(validate_url("   "), Err(ValidationError::EmptyUrl));
        assert_eq!(
            validate_url("ftp://a.b/c.csv"),
            Err(ValidationError::UnsupportedScheme("ftp://a.b/c.csv".to_string()))
        );
        assert!(validate_url("httpfoo").is_err());
    }

    #[test]
    fn test_rejected_url_never_touches_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let err = ingest("file:///etc/passwd", Delimiter::Comma, &store).unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
        assert!(!err.is_network());
        assert!(!store.file_path(crate::store::json_store::CACHE_FILE).exists());
    }

    #[test]
    fn test_ingest_bytes_end_to_end() {
        let csv = "question_text,correct_answer,topic,difficulty\n\"2+2=?\",\"4\",Arithmetic,easy\n";
        let report = ingest_bytes(
            csv.as_bytes(),
            "https://example.com/db/mathematic.csv",
            Delimiter::Comma,
        );
        assert_eq!(report.count, 1);
        assert_eq!(report.encoding, "utf-8");
        assert_eq!(report.bank.len(), 1);
        let rec = &report.bank["math"][0];
        assert_eq!(rec.question, "2+2=?");
        assert_eq!(rec.answer, "4");
        assert_eq!(rec.topic, "Arithmetic");
        assert_eq!(rec.difficulty, Difficulty::Easy);
        assert_eq!(rec.explanation, "");
    }

    #[test]
    fn test_ingest_bytes_is_deterministic() {
        let csv = "subject,question_text,correct_answer\nrussian,a,1\nmath,b,2\nphysics,c,3\nmath,d,4\n";
        let url = "https://example.com/mixed.csv";
        let first = ingest_bytes(csv.as_bytes(), url, Delimiter::Comma);
        let second = ingest_bytes(csv.as_bytes(), url, Delimiter::Comma);
        assert_eq!(
            serde_json::to_string_pretty(&first.bank).unwrap(),
            serde_json::to_string_pretty(&second.bank).unwrap()
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(IngestError::Timeout.is_network());
        assert!(IngestError::Status(404).is_network());
        assert!(IngestError::Network("refused".into()).is_network());
        assert!(!IngestError::Disabled.is_network());
        assert_eq!(
            IngestError::Timeout.to_string(),
            "request timed out after 10 seconds"
        );
    }
}
