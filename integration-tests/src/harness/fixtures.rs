/// Five requests to `/`, five to `/default-styles.css`, and five
/// `code 404` diagnostics that are not access log lines.
pub const SIMPLE_HTTP_SERVER_LINES: &[&str] = &[
    r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:13] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:13] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:21] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET / HTTP/1.1" 200 -"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] code 404, message File not found"#,
    r#"127.0.0.1 - - [01/May/2018 12:29:22] "GET /default-styles.css HTTP/1.1" 404 -"#,
];

/// Apache combined format lines with referrer and user agent trailers.
pub const COMBINED_FORMAT_LINES: &[&str] = &[
    r#"83.149.9.216 - - [17/May/2015:10:05:03 +0000] "GET /presentations/logstash-monitorama-2013/images/kibana-search.png HTTP/1.1" 200 203023 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
    r#"83.149.9.216 - - [17/May/2015:10:05:43 +0000] "GET /presentations/logstash-monitorama-2013/images/kibana-dashboard3.png HTTP/1.1" 200 171717 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
    r#"83.149.9.216 - - [17/May/2015:10:05:47 +0000] "GET /presentations/logstash-monitorama-2013/plugin/highlight/highlight.js HTTP/1.1" 200 26185 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
    r#"83.149.9.216 - - [17/May/2015:10:05:12 +0000] "GET /presentations/logstash-monitorama-2013/plugin/zoom-js/zoom.js HTTP/1.1" 200 7697 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
    r#"83.149.9.216 - - [17/May/2015:10:05:07 +0000] "GET /presentations/logstash-monitorama-2013/plugin/notes/notes.js HTTP/1.1" 200 2892 "http://semicomplete.com/presentations/logstash-monitorama-2013/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
    r#"83.149.9.216 - - [17/May/2015:10:05:24 +0000] "GET /favicon.ico HTTP/1.1" 404 209 "-" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.77 Safari/537.36""#,
];

/// Sum of the byte fields in [`COMBINED_FORMAT_LINES`].
pub const COMBINED_FORMAT_BYTES: u64 = 203023 + 171717 + 26185 + 7697 + 2892 + 209;

pub fn as_file_contents(lines: &[&str]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
