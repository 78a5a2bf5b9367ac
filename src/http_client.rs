//! The ureq agent the prediction client posts through, plus a capped body reader.
//!
//! The agent sets no connect, read or write timeouts, so a prediction request
//! runs until the backend answers or the connection drops.

use std::io::{self, Read};
use std::sync::OnceLock;

pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .user_agent(concat!("ckd-predictor/", env!("CARGO_PKG_VERSION")))
            .build()
    })
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum BodyError {
    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read response body: {0}")]
    Read(#[from] io::Error),
    #[error("response body is not UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Read a response body as text, refusing anything over `limit` bytes.
///
/// A declared `Content-Length` over the limit fails before any byte is read.
pub(crate) fn read_text_capped(response: ureq::Response, limit: usize) -> Result<String, BodyError> {
    if declared_length(&response).is_some_and(|length| length > limit as u64) {
        return Err(BodyError::TooLarge { limit });
    }
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        return Err(BodyError::TooLarge { limit });
    }
    Ok(String::from_utf8(bytes)?)
}

fn declared_length(response: &ureq::Response) -> Option<u64> {
    response.header("Content-Length")?.trim().parse().ok()
}
