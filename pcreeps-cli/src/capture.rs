//! Recorded transport traffic: `[key: u32 LE][len: u16 LE][len bytes]`
//! repeated until end of file.

use anyhow::{Context, bail};
use pcreeps_core::{Byte, Message, Result};
use std::io::{ErrorKind, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: u32,
    pub payload: Vec<Byte>,
}

impl Record {
    pub fn new(key: u32, payload: Vec<Byte>) -> Self {
        Self { key, payload }
    }
}

impl From<&Message> for Record {
    fn from(message: &Message) -> Self {
        let (key, payload) = message.encode();
        Self::new(key.id(), payload)
    }
}

pub fn read_records(mut reader: impl Read) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    loop {
        let mut key = [0; 4];
        match reader.read_exact(&mut key) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        }

        let mut len = [0; 2];
        reader
            .read_exact(&mut len)
            .with_context(|| format!("Truncated header in record {}", records.len()))?;

        let mut payload = vec![0; u16::from_le_bytes(len).into()];
        reader
            .read_exact(&mut payload)
            .with_context(|| format!("Truncated payload in record {}", records.len()))?;

        records.push(Record::new(u32::from_le_bytes(key), payload));
    }

    Ok(records)
}

pub fn write_records<'a>(
    mut writer: impl Write,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<()> {
    for record in records {
        let Ok(len) = u16::try_from(record.payload.len()) else {
            bail!(
                "Record with key {} is too large ({} bytes)",
                record.key,
                record.payload.len()
            );
        };

        writer.write_all(&record.key.to_le_bytes())?;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&record.payload)?;
    }
    writer.flush()?;

    Ok(())
}
