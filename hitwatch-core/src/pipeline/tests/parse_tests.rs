use crate::pipeline::{LogEntry, ParseError, RequestLine, parse_line};

fn expect_entry(line: &str) -> LogEntry {
    match parse_line(line) {
        Ok(entry) => entry,
        Err(e) => panic!("Expected entry for {line:?}, got {e:?}"),
    }
}

//-----------------------------------------------------------------------------
// Well-formed lines
//-----------------------------------------------------------------------------
#[test]
fn parses_every_field() {
    // Arrange
    let line = r#"127.0.0.1 user-identifier frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;

    // Act
    let entry = expect_entry(line);

    // Assert
    assert_eq!(
        entry,
        LogEntry {
            remote_host: "127.0.0.1".into(),
            user_identifier: "user-identifier".into(),
            authenticated_user: "frank".into(),
            timestamp: "10/Oct/2000:13:55:36 -0700".into(),
            request: RequestLine {
                method: "GET".into(),
                path: "/apache_pb.gif".into(),
                protocol_version: "HTTP/1.0".into(),
            },
            response_code: 200,
            bytes_sent: 2326,
        }
    );
}

#[test]
fn accepts_dash_placeholders() {
    let line = r#"127.0.0.1 - - [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;

    let entry = expect_entry(line);

    assert_eq!(entry.user_identifier, "-");
    assert_eq!(entry.authenticated_user, "-");
}

#[test]
fn date_is_kept_verbatim() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 512"#;

    let entry = expect_entry(line);

    assert_eq!(entry.timestamp, "01/May/2018 12:29:13");
}

#[test]
fn trailing_fields_are_ignored() {
    // Arrange
    let line = r#"83.149.9.216 - - [17/May/2015:10:05:03 +0000] "GET /presentations/logstash-monitorama-2013/images/kibana-search.png HTTP/1.1" 200 203023 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#;

    // Act
    let entry = expect_entry(line);

    // Assert
    assert_eq!(entry.remote_host, "83.149.9.216");
    assert_eq!(
        entry.request.path,
        "/presentations/logstash-monitorama-2013/images/kibana-search.png"
    );
    assert_eq!(entry.response_code, 200);
    assert_eq!(entry.bytes_sent, 203023);
}

//-----------------------------------------------------------------------------
// Lenient numeric coercion
//-----------------------------------------------------------------------------
#[test]
fn dash_bytes_become_zero() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 -"#;

    let entry = expect_entry(line);

    assert_eq!(entry.response_code, 200);
    assert_eq!(entry.bytes_sent, 0);
}

#[test]
fn non_numeric_status_becomes_zero() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" abc 100"#;

    let entry = expect_entry(line);

    assert_eq!(entry.response_code, 0);
    assert_eq!(entry.bytes_sent, 100);
}

#[test]
fn negative_bytes_become_zero() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 -15"#;

    let entry = expect_entry(line);

    assert_eq!(entry.bytes_sent, 0);
}

//-----------------------------------------------------------------------------
// Structural rejection
//-----------------------------------------------------------------------------
#[test]
fn rejects_free_text() {
    assert_eq!(parse_line("something broke"), Err(ParseError::NoMatch));
}

#[test]
fn rejects_missing_request_triple() {
    let line = "127.0.0.1 - - [01/May/2018 12:29:13] code 404, message File not found";

    assert_eq!(parse_line(line), Err(ParseError::NoMatch));
}

#[test]
fn rejects_missing_bracketed_date() {
    let line = r#"127.0.0.1 - - 01/May/2018 "GET / HTTP/1.1" 200 512"#;

    assert_eq!(parse_line(line), Err(ParseError::NoMatch));
}

#[test]
fn rejects_short_request_triple() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET /" 200 512"#;

    assert_eq!(parse_line(line), Err(ParseError::NoMatch));
}

#[test]
fn rejects_missing_byte_field() {
    let line = r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200"#;

    assert_eq!(parse_line(line), Err(ParseError::NoMatch));
}

#[test]
fn match_is_anchored_at_line_start() {
    let line = r#" 127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 512"#;

    assert_eq!(parse_line(line), Err(ParseError::NoMatch));
}

#[test]
fn empty_line_is_rejected() {
    assert_eq!(parse_line(""), Err(ParseError::NoMatch));
}
