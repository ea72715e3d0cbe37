// Single-threaded ring semantics: round trips, wraparound, overwrite of a
// lapped reader, oversized writes and reader lifecycle.
use dmxp_ringcast::{new_ring_buffer, RingBuilder, RingError};
use std::io::{Read, Write};

fn read_now(reader: &dmxp_ringcast::Reader, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    let n = reader
        .try_read(&mut buf)
        .expect("reader open")
        .expect("data available");
    buf.truncate(n);
    buf
}

#[test]
fn simple_write_read() {
    let mut writer = new_ring_buffer(16);
    let reader = writer.new_reader();

    assert_eq!(writer.write(b"hello").unwrap(), 5);

    let mut buf = [0u8; 32];
    let n = reader.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"hello");
    assert_eq!(reader.try_read(&mut buf).unwrap(), None);
}

#[test]
fn round_trip_up_to_capacity() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    assert_eq!(writer.write(b"abcdefgh").unwrap(), 8);
    assert_eq!(read_now(&reader, 64), b"abcdefgh");
}

#[test]
fn writer_wraps() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    assert_eq!(writer.write(b"1234").unwrap(), 4);
    assert_eq!(writer.position(), 4);
    assert_eq!(read_now(&reader, 12), b"1234");

    // Crosses the end of storage.
    assert_eq!(writer.write(b"56789a").unwrap(), 6);
    assert_eq!(writer.position(), 10);
    assert_eq!(read_now(&reader, 12), b"56789a");
}

#[test]
fn oversized_write_keeps_latest_bytes() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    let err = writer.write(b"0123456789abcdef").unwrap_err();
    assert_eq!(
        err,
        RingError::Truncated {
            written: 8,
            requested: 16
        }
    );
    assert_eq!(err.bytes_written(), 8);
    assert_eq!(writer.position(), 8);

    assert_eq!(read_now(&reader, 16), b"89abcdef");
}

#[test]
fn oversized_write_with_small_destination() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    assert!(writer.write(b"0123456789abcdef").is_err());
    assert_eq!(read_now(&reader, 4), b"89ab");
    assert_eq!(read_now(&reader, 4), b"cdef");
}

#[test]
fn oversized_write_from_unaligned_position() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    writer.write(b"xyz").unwrap();
    assert_eq!(read_now(&reader, 8), b"xyz");

    assert!(writer.write(b"ABCDEFGHIJKL").is_err());
    assert_eq!(writer.position(), 11);
    assert_eq!(read_now(&reader, 16), b"EFGHIJKL");
}

#[test]
fn lapped_reader_is_snapped_forward() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    writer.write(b"abcd").unwrap();
    writer.write(b"efghij").unwrap();

    let stats = reader.stats().unwrap();
    assert_eq!(stats.read_pos, 2);
    assert_eq!(stats.write_pos, 10);
    assert_eq!(stats.bytes_skipped, 2);
    assert_eq!(stats.lag(), 8);

    assert_eq!(read_now(&reader, 16), b"cdefghij");
    let stats = reader.stats().unwrap();
    assert!(stats.is_caught_up());
    assert_eq!(stats.bytes_read, 8);
}

#[test]
fn reader_lapped_many_times_sees_only_last_pass() {
    let mut writer = new_ring_buffer(4);
    let reader = writer.new_reader();

    for chunk in [b"aaa", b"bbb", b"ccc", b"ddd", b"eee"] {
        writer.write(chunk).unwrap();
    }

    assert_eq!(read_now(&reader, 16), b"deee");
    assert_eq!(reader.stats().unwrap().bytes_skipped, 11);
}

#[test]
fn reader_exactly_one_capacity_behind_keeps_everything() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    writer.write(b"abc").unwrap();
    assert_eq!(read_now(&reader, 2), b"ab");
    writer.write(b"defghij").unwrap();

    assert_eq!(reader.available().unwrap(), 8);
    assert_eq!(read_now(&reader, 16), b"cdefghij");
    assert_eq!(reader.stats().unwrap().bytes_skipped, 0);
}

#[test]
fn partial_reads_drain_in_order() {
    let mut writer = new_ring_buffer(16);
    let reader = writer.new_reader();

    writer.write(b"0123456789").unwrap();
    assert_eq!(read_now(&reader, 3), b"012");
    assert_eq!(read_now(&reader, 3), b"345");
    assert_eq!(read_now(&reader, 3), b"678");
    assert_eq!(read_now(&reader, 3), b"9");
}

#[test]
fn late_reader_never_sees_history() {
    let mut writer = new_ring_buffer(8);
    writer.write(b"old").unwrap();

    let reader = writer.new_reader();
    let mut buf = [0u8; 8];
    assert_eq!(reader.try_read(&mut buf).unwrap(), None);
    assert_eq!(reader.available().unwrap(), 0);

    writer.write(b"new").unwrap();
    assert_eq!(read_now(&reader, 8), b"new");
}

#[test]
fn readers_are_independent() {
    let mut writer = new_ring_buffer(8);
    let fast = writer.new_reader();
    let slow = writer.new_reader();

    writer.write(b"abcd").unwrap();
    assert_eq!(read_now(&fast, 8), b"abcd");

    writer.write(b"efgh").unwrap();
    assert_eq!(read_now(&fast, 8), b"efgh");
    assert_eq!(read_now(&slow, 8), b"abcdefgh");
    assert_ne!(fast.id(), slow.id());
}

#[test]
fn zero_length_operations() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();

    assert_eq!(writer.write(b"").unwrap(), 0);
    assert_eq!(writer.position(), 0);

    let mut empty: [u8; 0] = [];
    assert_eq!(reader.read(&mut empty).unwrap(), 0);
    assert_eq!(reader.try_read(&mut [0u8; 4]).unwrap(), None);
}

#[test]
fn closed_reader_fails_and_is_forgotten() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();
    let other = writer.new_reader();
    assert_eq!(writer.reader_count(), 2);

    reader.close();
    reader.close();
    assert!(reader.is_closed());
    assert_eq!(writer.reader_count(), 1);

    writer.write(b"data").unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf), Err(RingError::ReaderClosed));
    assert_eq!(reader.try_read(&mut buf), Err(RingError::ReaderClosed));
    assert_eq!(reader.read(&mut []), Err(RingError::ReaderClosed));
    assert_eq!(reader.stats(), Err(RingError::ReaderClosed));

    assert_eq!(read_now(&other, 8), b"data");
}

#[test]
fn dropping_reader_unregisters_it() {
    let writer = new_ring_buffer(8);
    {
        let _reader = writer.new_reader();
        assert_eq!(writer.reader_count(), 1);
    }
    assert_eq!(writer.reader_count(), 0);
}

#[test]
fn dropped_writer_ends_stream_after_drain() {
    let mut writer = new_ring_buffer(8);
    let reader = writer.new_reader();
    writer.write(b"tail").unwrap();
    drop(writer);

    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).unwrap(), 4);
    assert_eq!(&buf[..4], b"tail");
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert_eq!(reader.try_read(&mut buf).unwrap(), Some(0));
}

#[test]
fn io_traits_compose_with_std() {
    let mut writer = new_ring_buffer(64);
    let mut reader = writer.new_reader();

    writer.write_all(b"streamed through io::Write").unwrap();
    writer.flush().unwrap();
    drop(writer);

    let mut out = Vec::new();
    std::io::copy(&mut reader, &mut out).unwrap();
    assert_eq!(out, b"streamed through io::Write");
}

#[test]
fn io_errors_carry_ring_error() {
    let mut writer = new_ring_buffer(4);
    let reader = writer.new_reader();

    let err = Write::write(&mut writer, b"too long").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    reader.close();
    let err = Read::read(&mut &reader, &mut [0u8; 4]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
}

#[test]
fn builder_configures_ring() {
    let writer = RingBuilder::new().with_capacity(100).with_channel_id(7).build();
    assert_eq!(writer.capacity(), 128);
    assert_eq!(writer.channel_id(), 7);

    assert_eq!(RingBuilder::new().build().capacity(), 4096);
    assert_eq!(
        RingBuilder::new().with_capacity(1).try_build().unwrap_err(),
        RingError::InvalidCapacity(1)
    );

    let debug = format!("{:?}", writer);
    assert!(debug.contains("channel_id: 7"), "{debug}");
}

#[test]
#[should_panic(expected = "invalid ring capacity 1")]
fn capacity_below_two_panics() {
    let _ = new_ring_buffer(1);
}

#[test]
#[should_panic(expected = "too large to round up")]
fn capacity_too_large_to_round_panics() {
    let _ = new_ring_buffer(usize::MAX);
}

#[test]
fn oversized_capacity_is_reported_by_try_build() {
    let err = RingBuilder::new()
        .with_capacity(usize::MAX)
        .try_build()
        .unwrap_err();
    assert_eq!(err, RingError::InvalidCapacity(usize::MAX));
    assert!(err.to_string().contains("too large"), "{err}");
}
