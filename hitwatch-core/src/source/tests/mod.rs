
use crate::source::{LineSource, decode_line};
use std::path::{Path, PathBuf};

#[test]
fn dash_selects_stdin() {
    assert_eq!(LineSource::from_path(Path::new("-")), LineSource::Stdin);
    assert_eq!(
        LineSource::from_path(Path::new("/var/log/access.log")),
        LineSource::File(PathBuf::from("/var/log/access.log"))
    );
}

#[test]
fn decode_strips_line_terminators() {
    assert_eq!(decode_line(b"abc\n".to_vec()), "abc");
    assert_eq!(decode_line(b"abc\r\n".to_vec()), "abc");
    assert_eq!(decode_line(b"abc".to_vec()), "abc");
    assert_eq!(decode_line(b"\n".to_vec()), "");
}

#[test]
fn decode_replaces_invalid_utf8() {
    assert_eq!(decode_line(b"a\xffb\n".to_vec()), "a\u{fffd}b");
}
