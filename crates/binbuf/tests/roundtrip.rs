#![allow(missing_docs)]
use binbuf::{BinaryReader, BinaryWriter, CodecError, MAX_STRING_LEN};
use quickcheck_macros::quickcheck;
use rstest::rstest;

#[test]
fn u32_scenario() {
    let mut writer = BinaryWriter::new();
    writer.write_u32(0x0102_0304);
    assert_eq!(writer.to_bytes(), [0x01, 0x02, 0x03, 0x04]);

    let mut reader = BinaryReader::from_writer(&writer);
    assert_eq!(reader.read_u32(), Ok(0x0102_0304));
}

#[test]
fn hello_scenario() {
    let mut writer = BinaryWriter::new();
    writer.write_string("hello").unwrap();
    assert_eq!(writer.to_bytes(), [0x00, 0x05, b'h', b'e', b'l', b'l', b'o']);

    let mut reader = BinaryReader::from_writer(&writer);
    assert_eq!(reader.read_string().unwrap(), "hello");
}

#[test]
fn negative_one_from_writer() {
    let mut writer = BinaryWriter::new();
    writer.write_i16(-1);
    assert_eq!(writer.to_bytes(), [0xff, 0xff]);

    let mut reader = BinaryReader::from(&writer);
    assert_eq!(reader.read_i16(), Ok(-1));
}

#[test]
fn reading_back_through_the_writer_buffer() {
    let mut writer = BinaryWriter::new();
    writer.write_u64(u64::MAX - 1);
    writer.write_string("tail").unwrap();

    let mut buffer = writer.into_buffer();
    buffer.seek_to_start();
    let mut reader = BinaryReader::from_buffer(buffer);
    assert_eq!(reader.read_u64(), Ok(u64::MAX - 1));
    assert_eq!(reader.read_string().unwrap(), "tail");
}

#[rstest]
#[case::empty("")]
#[case::ascii("hello")]
#[case::latin("grüße")]
#[case::cjk("日本語")]
#[case::emoji("🦀🦀")]
fn string_roundtrip(#[case] value: &str) {
    let mut writer = BinaryWriter::new();
    writer.write_string(value).unwrap();
    assert_eq!(writer.position(), 2 + value.len());

    let mut reader = BinaryReader::from_writer(&writer);
    assert_eq!(reader.read_string().unwrap(), value);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn missing_string_reads_back_empty() {
    let mut writer = BinaryWriter::new();
    writer.write_opt_string(None).unwrap();
    let mut reader = BinaryReader::from_writer(&writer);
    assert_eq!(reader.read_string().unwrap(), "");
}

#[test]
fn longest_string_roundtrip() {
    let value = "é".repeat(MAX_STRING_LEN / 2) + "e";
    assert_eq!(value.len(), MAX_STRING_LEN);

    let mut writer = BinaryWriter::new();
    writer.write_string(&value).unwrap();
    let mut reader = BinaryReader::from_writer(&writer);
    assert_eq!(reader.read_string().unwrap(), value);
}

#[test]
fn over_long_string_leaves_writer_untouched() {
    let value = "é".repeat(MAX_STRING_LEN / 2 + 1);
    let mut writer = BinaryWriter::new();
    writer.write_byte(1);

    let err = writer.write_string(&value).unwrap_err();
    assert!(matches!(err, CodecError::StringTooLong { len, .. } if len == value.len()));
    assert_eq!(writer.position(), 1);
    assert_eq!(writer.to_bytes(), [1]);
}

#[test]
fn empty_reader_fails_immediately() {
    let mut reader = BinaryReader::new();
    assert!(reader.read_byte().unwrap_err().is_out_of_range());
    assert!(reader.read_string().unwrap_err().is_out_of_range());
    assert!(reader.read_u64().unwrap_err().is_out_of_range());
}

#[quickcheck]
fn i16_roundtrip(value: i16) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_i16(value);
    BinaryReader::from_writer(&writer).read_i16() == Ok(value)
}

#[quickcheck]
fn u16_roundtrip(value: u16) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_u16(value);
    BinaryReader::from_writer(&writer).read_u16() == Ok(value)
}

#[quickcheck]
fn i32_roundtrip(value: i32) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_i32(value);
    BinaryReader::from_writer(&writer).read_i32() == Ok(value)
}

#[quickcheck]
fn u32_roundtrip(value: u32) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_u32(value);
    writer.to_bytes() == value.to_be_bytes()
        && BinaryReader::from_writer(&writer).read_u32() == Ok(value)
}

#[quickcheck]
fn i64_roundtrip(value: i64) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_i64(value);
    BinaryReader::from_writer(&writer).read_i64() == Ok(value)
}

#[quickcheck]
fn u64_roundtrip(value: u64) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_u64(value);
    BinaryReader::from_writer(&writer).read_u64() == Ok(value)
}

#[quickcheck]
fn byte_bool_char_roundtrip(byte: u8, flag: bool) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_byte(byte);
    writer.write_bool(flag);
    writer.write_char(char::from(byte));

    let mut reader = BinaryReader::from_writer(&writer);
    reader.read_byte() == Ok(byte)
        && reader.read_bool() == Ok(flag)
        && reader.read_char() == Ok(char::from(byte))
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn any_string_roundtrip(value: String) -> bool {
    let mut writer = BinaryWriter::new();
    writer.write_string(&value).unwrap();
    BinaryReader::from_writer(&writer).read_string() == Ok(value)
}
