// Integration tests for the bounded output stream.
//
// Covers:
//   - writes clamp at capacity and report the accepted length
//   - written_size is a high-water mark, unaffected by backwards seeks
//   - End-relative seeks use written_size, bounds use capacity
//   - set_size only validates

use std::io::{self, Seek, SeekFrom, Write};

use lzmadapt::stream::StreamError;
use lzmadapt::{OutputStream, SeekOrigin};

#[test]
fn write_past_capacity_is_clamped() {
    let mut buf = [0u8; 5];
    let mut s = OutputStream::new(&mut buf);
    assert_eq!(s.write(b"abc"), 3);
    assert_eq!(s.write(b"defg"), 2);
    assert_eq!(s.write(b"h"), 0);
    assert_eq!(s.written_size(), 5);
    drop(s);
    assert_eq!(&buf, b"abcde");
}

#[test]
fn zero_capacity_accepts_nothing() {
    let mut buf: [u8; 0] = [];
    let mut s = OutputStream::new(&mut buf);
    assert_eq!(s.write(b"x"), 0);
    assert_eq!(s.capacity(), 0);
    assert_eq!(s.seek(0, SeekOrigin::End), Ok(0));
}

#[test]
fn high_water_mark_survives_rewind() {
    let mut buf = [0u8; 10];
    let mut s = OutputStream::new(&mut buf);
    s.write(b"0123456");
    s.seek(2, SeekOrigin::Start).unwrap();
    s.write(b"xy");
    assert_eq!(s.offset(), 4);
    assert_eq!(s.written_size(), 7);
    assert_eq!(s.written(), b"01xy456");
    assert_eq!(s.seek(0, SeekOrigin::End), Ok(7));
}

#[test]
fn seek_bounded_by_capacity_not_written_size() {
    let mut buf = [0u8; 8];
    let mut s = OutputStream::new(&mut buf);
    s.write(b"abc");
    assert_eq!(s.seek(8, SeekOrigin::Start), Ok(8));
    assert_eq!(s.seek(5, SeekOrigin::End), Ok(8));
    assert_eq!(s.seek(6, SeekOrigin::End), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.seek(-9, SeekOrigin::Current), Err(StreamError::SeekOutOfRange));
    assert_eq!(s.offset(), 8);
    assert_eq!(s.write(b"z"), 0);
}

#[test]
fn gap_write_raises_written_size() {
    let mut buf = [0xFFu8; 6];
    let mut s = OutputStream::new(&mut buf);
    s.seek(4, SeekOrigin::Start).unwrap();
    s.write(b"!");
    assert_eq!(s.written_size(), 5);
}

#[test]
fn set_size_validates_only() {
    let mut buf = [0u8; 4];
    let mut s = OutputStream::new(&mut buf);
    s.write(b"ab");
    assert_eq!(s.set_size(4), Ok(()));
    assert_eq!(s.set_size(0), Ok(()));
    assert_eq!(s.set_size(5), Err(StreamError::MediumFull));
    assert_eq!(s.written_size(), 2);
    assert_eq!(s.capacity(), 4);
}

#[test]
fn io_write_all_fails_when_full() {
    let mut buf = [0u8; 3];
    let mut s = OutputStream::new(&mut buf);
    let err = s.write_all(b"four").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    assert_eq!(s.written_size(), 3);
    s.flush().unwrap();
}

#[test]
fn io_seek_matches_inherent_seek() {
    let mut buf = [0u8; 6];
    let mut s = OutputStream::new(&mut buf);
    Write::write(&mut s, b"abcd").unwrap();
    assert_eq!(Seek::seek(&mut s, SeekFrom::End(-1)).unwrap(), 3);
    assert_eq!(Seek::seek(&mut s, SeekFrom::Current(3)).unwrap(), 6);
    assert!(Seek::seek(&mut s, SeekFrom::Start(u64::MAX)).is_err());
}
