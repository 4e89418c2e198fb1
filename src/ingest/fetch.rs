use crate::ingest::IngestError;

pub const FETCH_TIMEOUT_SECS: u64 = 10;

#[cfg(feature = "network")]
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, IngestError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| IngestError::Network(e.to_string()))?;
    let response = client.get(url).send().map_err(classify)?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::Status(status.as_u16()));
    }
    let body = response.bytes().map_err(classify)?;
    Ok(body.to_vec())
}

#[cfg(feature = "network")]
fn classify(err: reqwest::Error) -> IngestError {
    if err.is_timeout() {
        IngestError::Timeout
    } else {
        IngestError::Network(err.to_string())
    }
}

#[cfg(not(feature = "network"))]
pub fn fetch_bytes(_url: &str) -> Result<Vec<u8>, IngestError> {
    Err(IngestError::Disabled)
}
