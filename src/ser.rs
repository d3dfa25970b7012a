//! # Serialize trait module

use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use crate::errors::Result;

pub trait Serialize {
    fn to_writer<W: io::Write>(&self, _: &mut W) -> Result<()>;
    fn write_len(&self) -> usize;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.write_len());
        self.to_writer(&mut buf)?;

        Ok(buf)
    }
}

/// Writes `data` as an SSH `string`.
pub fn write_string<W: io::Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    writer.write_u32::<BigEndian>(data.len().try_into()?)?;
    writer.write_all(data)?;

    Ok(())
}

/// Length of `data` once written with [`write_string`].
pub fn string_len(data: &[u8]) -> usize {
    4 + data.len()
}
