#![no_main]
use arbitrary::Arbitrary;
use binbuf::{BinaryReader, BinaryWriter, MAX_STRING_LEN};
use libfuzzer_sys::fuzz_target;

/// One value to encode, chosen by the fuzzer.
#[derive(Debug, Clone, PartialEq, Arbitrary)]
enum Value {
    Byte(u8),
    Bool(bool),
    Char(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Str(String),
}

/// Writer-side operations interleaved with values.
#[derive(Debug, Arbitrary)]
enum Op {
    Write(Value),
    /// Drop everything written so far.
    Compact,
    /// Compact at the front, which moves nothing, then seek back to the end.
    CompactFront,
}

#[derive(Debug, Arbitrary)]
struct Input {
    ops: Vec<Op>,
    /// Raw bytes handed straight to a reader.
    garbage: Vec<u8>,
    /// Decode order for the garbage bytes.
    kinds: Vec<u8>,
}

fn write(writer: &mut BinaryWriter, value: &Value) {
    match value {
        Value::Byte(v) => writer.write_byte(*v),
        Value::Bool(v) => writer.write_bool(*v),
        Value::Char(v) => writer.write_char(char::from(*v)),
        Value::I16(v) => writer.write_i16(*v),
        Value::U16(v) => writer.write_u16(*v),
        Value::I32(v) => writer.write_i32(*v),
        Value::U32(v) => writer.write_u32(*v),
        Value::I64(v) => writer.write_i64(*v),
        Value::U64(v) => writer.write_u64(*v),
        Value::Str(v) => {
            let before = writer.position();
            let res = writer.write_string(v);
            assert_eq!(res.is_err(), v.len() > MAX_STRING_LEN);
            if res.is_err() {
                assert_eq!(writer.position(), before);
            }
        }
    }
}

fn read_like(reader: &mut BinaryReader, value: &Value) -> Value {
    match value {
        Value::Byte(_) => Value::Byte(reader.read_byte().unwrap()),
        Value::Bool(_) => Value::Bool(reader.read_bool().unwrap()),
        Value::Char(_) => Value::Char(reader.read_byte().unwrap()),
        Value::I16(_) => Value::I16(reader.read_i16().unwrap()),
        Value::U16(_) => Value::U16(reader.read_u16().unwrap()),
        Value::I32(_) => Value::I32(reader.read_i32().unwrap()),
        Value::U32(_) => Value::U32(reader.read_u32().unwrap()),
        Value::I64(_) => Value::I64(reader.read_i64().unwrap()),
        Value::U64(_) => Value::U64(reader.read_u64().unwrap()),
        Value::Str(_) => Value::Str(reader.read_string().unwrap()),
    }
}

/// Writes values, occasionally compacting, and checks that whatever is left
/// after the last compaction decodes back to the values written since.
fn roundtrip(ops: &[Op]) {
    let mut writer = BinaryWriter::new();
    let mut since_compact = Vec::new();

    for op in ops {
        match op {
            Op::Write(value) => {
                write(&mut writer, value);
                if !matches!(value, Value::Str(s) if s.len() > MAX_STRING_LEN) {
                    since_compact.push(value.clone());
                }
            }
            Op::Compact => {
                writer.compact();
                since_compact.clear();
            }
            Op::CompactFront => {
                let end = writer.position();
                writer.compact_from(0);
                writer.seek_to(end);
            }
        }
    }

    let mut reader = BinaryReader::from_writer(&writer);
    for value in &since_compact {
        assert_eq!(&read_like(&mut reader, value), value);
    }
    assert_eq!(reader.remaining(), 0);
}

/// Decoding arbitrary bytes must never panic.
fn decode_garbage(bytes: &[u8], kinds: &[u8]) {
    let mut reader = BinaryReader::from_bytes(bytes.to_vec());
    for kind in kinds {
        let before = reader.position();
        let res = match kind % 8 {
            0 => reader.read_byte().map(drop),
            1 => reader.read_bool().map(drop),
            2 => reader.read_u16().map(drop),
            3 => reader.read_i32().map(drop),
            4 => reader.read_u64().map(drop),
            5 => reader.read_string().map(drop),
            6 => reader.read_bytes(usize::from(*kind)).map(drop),
            _ => {
                reader.seek_to_start();
                Ok(())
            }
        };
        if res.is_err() {
            assert_eq!(reader.position(), before);
        }
    }
}

fuzz_target!(|input: Input| {
    roundtrip(&input.ops);
    decode_garbage(&input.garbage, &input.kinds);
});
