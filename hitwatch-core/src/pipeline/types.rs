use serde::Serialize;

/// The quoted `"method path protocol"` triple of a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
    pub protocol_version: String,
}

/// One common log format line.
///
/// `timestamp` is kept exactly as it appeared between the brackets; nothing
/// downstream orders or buckets by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub remote_host: String,
    pub user_identifier: String,
    pub authenticated_user: String,
    pub timestamp: String,
    pub request: RequestLine,
    /// 0 when the field is not a number
    pub response_code: u16,
    /// 0 when the field is not a number (e.g. `-`)
    pub bytes_sent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line does not match the common log format")]
    NoMatch,
}
