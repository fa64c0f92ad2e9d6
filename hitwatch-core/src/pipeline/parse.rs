use crate::pipeline::types::{LogEntry, ParseError, RequestLine};
use once_cell::sync::Lazy;
use regex::Regex;

// remotehost rfc931 authuser [date] "method path protocol" status bytes ...
// Anything after the byte count (referrer, user agent) is ignored.
static COMMON_LOG_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(\S+)\s",       // remote host
        r"(\S+)\s",        // rfc931 identifier
        r"(\S+)\s",        // authenticated user
        r"\[(.*)\]\s",     // date
        r#""(\S+)\s"#,     // request method
        r"(\S+)\s",        // request path
        r#"(\S+)"\s"#,     // protocol version
        r"(\S+)\s",        // status
        r"(\S+)",          // bytes
    ))
    .expect("common log format regex is valid")
});

/// Parse one raw line into a [`LogEntry`].
///
/// Only the structural shape is validated. Status and byte count are
/// coerced leniently: a token that is not a number becomes 0 and the entry
/// is still produced.
pub fn parse_line(line: &str) -> Result<LogEntry, ParseError> {
    let caps = COMMON_LOG_FORMAT
        .captures(line)
        .ok_or(ParseError::NoMatch)?;

    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

    Ok(LogEntry {
        remote_host: field(1),
        user_identifier: field(2),
        authenticated_user: field(3),
        timestamp: field(4),
        request: RequestLine {
            method: field(5),
            path: field(6),
            protocol_version: field(7),
        },
        response_code: lenient(&caps[8]),
        bytes_sent: lenient(&caps[9]),
    })
}

fn lenient<T: std::str::FromStr + Default>(token: &str) -> T {
    token.parse().unwrap_or_default()
}
