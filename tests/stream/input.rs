// Integration tests for the bounded input stream.
//
// Covers:
//   - reads clamp at the end of the source and never fail
//   - seek from every origin, including rejected targets
//   - the std::io::Read / BufRead / Seek views agree with the inherent API

use std::io::{self, BufRead, Read, Seek, SeekFrom};

use lzmadapt::stream::StreamError;
use lzmadapt::{InputStream, SeekOrigin};

// ─────────────────────────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn read_delivers_remaining_then_zero() {
    let src = [10u8, 20, 30, 40, 50];
    let mut s = InputStream::new(&src);
    let mut buf = [0u8; 3];

    assert_eq!(s.read(&mut buf), 3);
    assert_eq!(buf, [10, 20, 30]);
    assert_eq!(s.read(&mut buf), 2);
    assert_eq!(&buf[..2], &[40, 50]);
    assert_eq!(s.read(&mut buf), 0);
    assert_eq!(s.offset(), 5);
}

#[test]
fn empty_source_reads_nothing() {
    let mut s = InputStream::new(&[]);
    let mut buf = [0xAAu8; 4];
    assert_eq!(s.read(&mut buf), 0);
    assert_eq!(buf, [0xAA; 4]);
    assert_eq!(s.size(), 0);
}

#[test]
fn zero_length_read_does_not_move() {
    let src = [1u8, 2, 3];
    let mut s = InputStream::new(&src);
    assert_eq!(s.read(&mut []), 0);
    assert_eq!(s.offset(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Seek
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn seek_from_each_origin() {
    let src = [0u8; 10];
    let mut s = InputStream::new(&src);
    assert_eq!(s.seek(4, SeekOrigin::Start), Ok(4));
    assert_eq!(s.seek(3, SeekOrigin::Current), Ok(7));
    assert_eq!(s.seek(-2, SeekOrigin::Current), Ok(5));
    assert_eq!(s.seek(-10, SeekOrigin::End), Ok(0));
    assert_eq!(s.seek(0, SeekOrigin::End), Ok(10));
}

#[test]
fn seek_outside_bounds_is_rejected_and_harmless() {
    let src = [1u8, 2, 3, 4];
    let mut s = InputStream::new(&src);
    s.seek(2, SeekOrigin::Start).unwrap();

    assert_eq!(s.seek(5, SeekOrigin::Start), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.seek(-3, SeekOrigin::Current), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.seek(1, SeekOrigin::End), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.seek(i64::MIN, SeekOrigin::End), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.offset(), 2);

    let mut b = [0u8; 1];
    assert_eq!(s.read(&mut b), 1);
    assert_eq!(b[0], 3);
}

#[test]
fn seek_back_then_reread() {
    let src = b"rewind";
    let mut s = InputStream::new(src);
    let mut all = [0u8; 6];
    assert_eq!(s.read(&mut all), 6);
    s.seek(-4, SeekOrigin::End).unwrap();
    let mut tail = [0u8; 8];
    assert_eq!(s.read(&mut tail), 4);
    assert_eq!(&tail[..4], b"wind");
}

// ─────────────────────────────────────────────────────────────────────────────
// std::io views
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn io_read_to_end() {
    let src = b"std::io::Read over a borrowed slice";
    let mut s = InputStream::new(src);
    let mut out = Vec::new();
    Read::read_to_end(&mut s, &mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn io_buf_read_lines() {
    let src = b"one\ntwo\n";
    let s = InputStream::new(src);
    let lines: Vec<String> = s.lines().map(|l| l.unwrap()).collect();
    assert_eq!(lines, ["one", "two"]);
}

#[test]
fn io_seek_errors_are_invalid_input() {
    let src = [0u8; 3];
    let mut s = InputStream::new(&src);
    assert_eq!(Seek::seek(&mut s, SeekFrom::End(-1)).unwrap(), 2);
    let err = Seek::seek(&mut s, SeekFrom::Start(4)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert_eq!(s.offset(), 2);
}
