//! Encodes a small save-game record, hands the bytes over as if they had been
//! written to disk, and decodes them again.
//!
//! The record is laid out field by field with no tags:
//!
//! ```text
//! u16 version | string name | u32 level | i64 gold | bool hardcore | u16 count | count × string
//! ```
//!
//! Run with `cargo run --example save_record`.
#![allow(missing_docs)]

use binbuf::{BinaryReader, BinaryWriter, CodecError, Decode, Encode};

#[derive(Debug, PartialEq)]
struct SaveRecord {
    version: u16,
    name: String,
    level: u32,
    gold: i64,
    hardcore: bool,
    inventory: Vec<String>,
}

impl Encode for SaveRecord {
    fn encode(&self, writer: &mut BinaryWriter) -> Result<(), CodecError> {
        writer.write_u16(self.version);
        writer.write_string(&self.name)?;
        writer.write_u32(self.level);
        writer.write_i64(self.gold);
        writer.write_bool(self.hardcore);
        let count = u16::try_from(self.inventory.len()).unwrap_or(u16::MAX);
        writer.write_u16(count);
        for item in self.inventory.iter().take(usize::from(count)) {
            writer.write_string(item)?;
        }
        Ok(())
    }
}

impl Decode for SaveRecord {
    fn decode(reader: &mut BinaryReader) -> Result<Self, CodecError> {
        let version = reader.read_u16()?;
        let name = reader.read_string()?;
        let level = reader.read_u32()?;
        let gold = reader.read_i64()?;
        let hardcore = reader.read_bool()?;
        let count = reader.read_u16()?;
        let inventory = (0..count)
            .map(|_| reader.read_string())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SaveRecord {
            version,
            name,
            level,
            gold,
            hardcore,
            inventory,
        })
    }
}

fn main() -> Result<(), CodecError> {
    let record = SaveRecord {
        version: 3,
        name: "Grüne Wiese".into(),
        level: 42,
        gold: -150,
        hardcore: true,
        inventory: vec!["sword".into(), "lantern".into(), "🗝️".into()],
    };

    let mut writer = BinaryWriter::new();
    writer.write(&record)?;
    let bytes = writer.to_bytes();
    println!("encoded {} bytes: {bytes:02x?}", bytes.len());

    let mut reader = BinaryReader::from_bytes(bytes);
    let decoded: SaveRecord = reader.read()?;
    assert_eq!(decoded, record);
    println!("decoded {decoded:#?}");

    // Running past the end is an error, not a panic.
    match reader.read_byte() {
        Err(err) => println!("as expected: {err}"),
        Ok(byte) => println!("unexpected trailing byte {byte:#04x}"),
    }
    Ok(())
}
