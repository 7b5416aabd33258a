//! ART archives of the 32-bit titles: Where's Waldo? Exploring Geography, Eraser Turnabout
//! and Virtual K'Nex.
//!
//! ```text
//! file header   "ART_DATA" u32:header size u32:reserved
//! entry table   (name[8] u32:offset u32:uncompressed size) * entries
//! bodies        chunks of u16:length then data, bit 15 of the length marks raw chunks
//! ```
//!
//! A body is a bitmap file without its 14 byte file header, cut in chunks of at most
//! [CHUNK_SIZE] bytes compressed independently.

use std::io::{Seek, SeekFrom, Write};

use bitstream_io::{ByteRead, ByteReader, ByteWrite, ByteWriter, LittleEndian};
use ipe_lzw::{decoder::HashLzwDecoder, encoder::HashLzwEncoder};

use crate::{
    error::{EntryError, FormatError},
    ipe16::{position, too_large},
    names::{decode_name, encode_name},
};

pub const NAME_SIZE: usize = 8;
pub const MAGIC: &[u8; 8] = b"ART_DATA";
/// Uncompressed size of every chunk but the last one of a picture.
pub const CHUNK_SIZE: usize = 0x3FFE;
const RAW_CHUNK: u16 = 0x8000;
const HEADER_SIZE: usize = 16;

/// A row of the entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub name: [u8; NAME_SIZE],
    pub offset: u32,
    pub uncompressed_size: u32,
}

impl EntryHeader {
    fn zeroed() -> Self {
        Self {
            name: [0; NAME_SIZE],
            offset: 0,
            uncompressed_size: 0,
        }
    }

    fn read(bytes: &[u8]) -> std::io::Result<Self> {
        let mut reader = ByteReader::endian(bytes, LittleEndian);
        let mut name = [0; NAME_SIZE];
        reader.read_bytes(&mut name)?;
        Ok(Self {
            name,
            offset: reader.read()?,
            uncompressed_size: reader.read()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut ByteWriter<W, LittleEndian>) -> std::io::Result<()> {
        writer.write_bytes(&self.name)?;
        writer.write(self.offset)?;
        writer.write(self.uncompressed_size)
    }

    /// Rows left zeroed by a failed pack.
    pub fn is_sentinel(&self) -> bool {
        self.name[0] == 0 || self.uncompressed_size == 0
    }

    /// Names use all 8 bytes when needed, without terminator.
    pub fn name(&self) -> String {
        decode_name(&self.name)
    }
}

/// The stored bytes of a picture and how its chunks were stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipe32Picture {
    pub data: Vec<u8>,
    pub compressed_chunks: usize,
    pub raw_chunks: usize,
}

pub struct Ipe32Archive {
    data: Vec<u8>,
    entries: Vec<EntryHeader>,
}

impl Ipe32Archive {
    /// Check the file header and read the entry table.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FormatError> {
        if data.len() < HEADER_SIZE {
            return Err(FormatError::TooShort {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut reader = ByteReader::endian(&data[..HEADER_SIZE], LittleEndian);
        let mut magic = [0; 8];
        reader.read_bytes(&mut magic)?;
        let header_size: u32 = reader.read()?;
        let reserved: u32 = reader.read()?;

        if &magic != MAGIC {
            return Err(FormatError::BadMagic);
        }
        if reserved != 0 {
            return Err(FormatError::ReservedNotZero(reserved));
        }
        if header_size as usize % HEADER_SIZE != 0 {
            return Err(FormatError::MisalignedHeaderSize(header_size));
        }

        let count = (header_size as usize / HEADER_SIZE)
            .checked_sub(1)
            .ok_or(FormatError::NoEntries)?;
        let table = data
            .get(HEADER_SIZE..header_size as usize)
            .ok_or(FormatError::EntryTableTruncated { count })?;
        let entries = table
            .chunks_exact(HEADER_SIZE)
            .map(EntryHeader::read)
            .collect::<std::io::Result<_>>()?;

        Ok(Self { data, entries })
    }

    pub fn entries(&self) -> &[EntryHeader] {
        &self.entries
    }

    /// Read and decompress the chunks of one entry until its uncompressed size is reached.
    pub fn read_picture(
        &self,
        entry: &EntryHeader,
        decoder: &mut HashLzwDecoder,
    ) -> Result<Ipe32Picture, EntryError> {
        let mut remaining = entry.uncompressed_size as usize;
        let mut picture = Ipe32Picture {
            data: Vec::with_capacity(remaining.min(CHUNK_SIZE)),
            compressed_chunks: 0,
            raw_chunks: 0,
        };

        let mut cursor = entry.offset as usize;
        let mut index = 0;
        while remaining > 0 {
            let prefix = self.slice(cursor, 2, index)?;
            let len = u16::from_le_bytes([prefix[0], prefix[1]]);
            cursor += 2;

            if len & RAW_CHUNK != 0 {
                let len = (len & !RAW_CHUNK) as usize;
                if len == 0 || len > remaining {
                    return Err(EntryError::BadRawChunk {
                        index,
                        len,
                        remaining,
                    });
                }
                tracing::debug!(index, len, "raw chunk");
                picture.data.extend_from_slice(self.slice(cursor, len, index)?);
                picture.raw_chunks += 1;
                remaining -= len;
                cursor += len;
            } else {
                let len = len as usize;
                let expected = remaining.min(CHUNK_SIZE);
                tracing::debug!(index, len, "compressed chunk");
                let chunk = decoder.decode(self.slice(cursor, len, index)?, expected)?;
                if chunk.len() != expected {
                    return Err(EntryError::ChunkSizeMismatch {
                        index,
                        expected,
                        actual: chunk.len(),
                    });
                }
                picture.data.extend_from_slice(&chunk);
                picture.compressed_chunks += 1;
                remaining -= expected;
                cursor += len;
            }
            index += 1;
        }

        Ok(picture)
    }

    fn slice(&self, start: usize, len: usize, index: usize) -> Result<&[u8], EntryError> {
        start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
            .ok_or(EntryError::ChunkOutOfBounds { index })
    }
}

/// A picture cut in chunks, ready to be appended to an archive.
pub struct Ipe32Body {
    name: [u8; NAME_SIZE],
    uncompressed_size: u32,
    bytes: Vec<u8>,
    compressed_chunks: usize,
    raw_chunks: usize,
}

impl Ipe32Body {
    pub fn compressed_chunks(&self) -> usize {
        self.compressed_chunks
    }

    pub fn raw_chunks(&self) -> usize {
        self.raw_chunks
    }
}

/// Writes an archive in two passes, like [crate::ipe16::Ipe16Writer].
pub struct Ipe32Writer<W: Write + Seek> {
    out: W,
    entries: Vec<EntryHeader>,
    current: usize,
    encoder: HashLzwEncoder,
}

impl<W: Write + Seek> Ipe32Writer<W> {
    /// Start an archive of `count` entries at the current position of `out`.
    pub fn new(mut out: W, count: usize) -> std::io::Result<Self> {
        let entries = vec![EntryHeader::zeroed(); count];
        write_headers(&mut ByteWriter::endian(&mut out, LittleEndian), &entries)?;

        Ok(Self {
            out,
            entries,
            current: 0,
            encoder: HashLzwEncoder::new(),
        })
    }

    /// Cut `data` in chunks and compress them. A chunk is only kept compressed when that
    /// makes it smaller.
    pub fn encode(&mut self, name: &str, data: &[u8]) -> Result<Ipe32Body, EntryError> {
        let name = encode_name::<NAME_SIZE>(name, NAME_SIZE)?;
        let uncompressed_size =
            u32::try_from(data.len()).map_err(|_| EntryError::DataTooLarge(data.len()))?;

        let mut body = Ipe32Body {
            name,
            uncompressed_size,
            bytes: Vec::with_capacity(data.len() + 2 * (data.len() / CHUNK_SIZE + 1)),
            compressed_chunks: 0,
            raw_chunks: 0,
        };
        for chunk in data.chunks(CHUNK_SIZE) {
            let compressed = self.encoder.encode(chunk)?;
            tracing::debug!(
                "chunk of {} bytes compresses to {} bytes with {} table resets",
                chunk.len(),
                compressed.len(),
                self.encoder.resets()
            );
            if compressed.len() < chunk.len() {
                body.bytes
                    .extend_from_slice(&(compressed.len() as u16).to_le_bytes());
                body.bytes.extend_from_slice(&compressed);
                body.compressed_chunks += 1;
            } else {
                body.bytes
                    .extend_from_slice(&(RAW_CHUNK | chunk.len() as u16).to_le_bytes());
                body.bytes.extend_from_slice(chunk);
                body.raw_chunks += 1;
            }
        }
        Ok(body)
    }

    /// Append a body and fill in the next entry.
    pub fn push(&mut self, body: &Ipe32Body) -> std::io::Result<()> {
        let offset = position(&mut self.out)?;
        self.out.write_all(&body.bytes)?;

        if let Some(entry) = self.entries.get_mut(self.current) {
            *entry = EntryHeader {
                name: body.name,
                offset,
                uncompressed_size: body.uncompressed_size,
            };
        }
        self.current += 1;
        Ok(())
    }

    /// Leave the next entry zeroed.
    pub fn skip(&mut self) {
        self.current += 1;
    }

    /// Rewrite the headers and hand back the output.
    pub fn finish(mut self) -> std::io::Result<W> {
        let end = self.out.stream_position()?;
        self.out.seek(SeekFrom::Start(0))?;
        write_headers(
            &mut ByteWriter::endian(&mut self.out, LittleEndian),
            &self.entries,
        )?;
        self.out.seek(SeekFrom::Start(end))?;
        self.out.flush()?;
        Ok(self.out)
    }
}

fn write_headers<W: Write>(
    writer: &mut ByteWriter<W, LittleEndian>,
    entries: &[EntryHeader],
) -> std::io::Result<()> {
    let header_size = (entries.len() + 1)
        .checked_mul(HEADER_SIZE)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(too_large)?;

    writer.write_bytes(MAGIC)?;
    writer.write(header_size)?;
    writer.write(0u32)?;
    for entry in entries {
        entry.write(writer)?;
    }
    Ok(())
}
