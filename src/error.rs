//! Errors of the archive layer.
//!
//! A [FormatError] means the archive itself cannot be trusted and stops the whole run. An
//! [EntryError] only concerns one picture: it is logged, the picture is skipped and the run
//! goes on.

use ipe_lzw::{decoder::DecodingError, encoder::EncodingError};

use crate::{bitmap::BitmapError, descriptor::DescriptorError};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unknown archive signature {0:02X?}")]
    UnknownSignature(Vec<u8>),
    #[error("archive is {actual} bytes long, too short for its {expected} byte header")]
    TooShort { expected: usize, actual: usize },
    #[error("bad magic tag")]
    BadMagic,
    #[error("bad header dummy byte {0:#04X}, expected '?'")]
    BadDummy(u8),
    #[error("header says the file is {declared} bytes long, it is {actual} bytes")]
    FileSizeMismatch { declared: u32, actual: usize },
    #[error("reserved header field is {0:#X}, expected 0")]
    ReservedNotZero(u32),
    #[error("header size {0} is not a whole number of entries")]
    MisalignedHeaderSize(u32),
    #[error("header declares no entry table")]
    NoEntries,
    #[error("entry table of {count} entries runs past the end of the file")]
    EntryTableTruncated { count: usize },
    #[error("name of entry {index} is not zero terminated")]
    UnterminatedName { index: usize },
    #[error("unreadable header: {0}")]
    Header(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("body at offset {offset} of {size} bytes runs past the end of the {file_len} byte file")]
    OutOfBounds {
        offset: u32,
        size: u32,
        file_len: usize,
    },
    #[error("body of {size} bytes is too small for its header and palette")]
    BodyTooSmall { size: u32 },
    #[error("unknown palette type {0:#04X}")]
    UnknownPaletteType(u8),
    #[error("unknown compression type {0:#04X}")]
    UnknownCompressionType(u8),
    #[error("compression type '{found}' does not belong to this game, expected '{expected}' or '{}'", expected.to_ascii_lowercase())]
    WrongLayout { found: char, expected: char },
    #[error("declared size {declared} does not match the {expected} bytes of header, pixels and palette")]
    SizeMismatch { declared: u32, expected: u64 },
    #[error("decoded {actual} bytes, expected {expected}")]
    DecodedSizeMismatch { expected: usize, actual: usize },
    #[error("chunk {index} decoded to {actual} bytes, expected {expected}")]
    ChunkSizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("chunk {index} is a raw chunk of {len} bytes, {remaining} bytes are left")]
    BadRawChunk {
        index: usize,
        len: usize,
        remaining: usize,
    },
    #[error("chunk {index} runs past the end of the file")]
    ChunkOutOfBounds { index: usize },
    #[error("name {name:?} is longer than {max} bytes")]
    NameTooLong { name: String, max: usize },
    #[error("picture of {width}x{height} does not fit the archive header")]
    PictureTooLarge { width: u32, height: u32 },
    #[error("picture data of {0} bytes does not fit the archive header")]
    DataTooLarge(usize),
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors stopping a whole pack or unpack run.
#[derive(Debug, thiserror::Error)]
pub enum ArtError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
