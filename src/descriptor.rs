//! The `index.txt` descriptor listing the pictures of an unpacked archive, one per line.

use std::{fmt, path::Path, str::FromStr};

use crate::ipe16::PaletteType;

pub const INDEX_FILE_NAME: &str = "index.txt";

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("{field} must be a single character, got {value:?}")]
    NotAChar { field: &'static str, value: String },
    #[error("unknown palette type '{0}'")]
    UnknownPaletteType(char),
    #[error("invalid {field} {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// A line of a 16-bit archive descriptor:
/// `<palette type> <compression type> <name> <bitmap> [<x offset> <y offset>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipe16Line {
    pub palette_type: PaletteType,
    pub compression_type: u8,
    pub name: String,
    pub file_name: String,
    /// Fine offsets, only listed for the wide header layout.
    pub offset: Option<(u16, u16)>,
}

impl FromStr for Ipe16Line {
    type Err = DescriptorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();

        let palette_type = single_char(fields.next(), "palette type")?;
        let palette_type = PaletteType::from_byte(palette_type as u8)
            .ok_or(DescriptorError::UnknownPaletteType(palette_type))?;
        let compression_type = single_char(fields.next(), "compression type")? as u8;
        let name = field(fields.next(), "name")?;
        let file_name = field(fields.next(), "bitmap file name")?;

        let offset_x = fields.next().map(|x| offset(x, "x offset")).transpose()?;
        let offset_y = fields.next().map(|y| offset(y, "y offset")).transpose()?;
        let offset = match (offset_x, offset_y) {
            (None, None) => None,
            (x, y) => Some((x.unwrap_or(0), y.unwrap_or(0))),
        };

        Ok(Self {
            palette_type,
            compression_type,
            name,
            file_name,
            offset,
        })
    }
}

impl fmt::Display for Ipe16Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.palette_type.as_byte() as char,
            self.compression_type as char,
            self.name,
            self.file_name
        )?;
        if let Some((x, y)) = self.offset {
            write!(f, " {x} {y}")?;
        }
        Ok(())
    }
}

/// A line of a 32-bit archive descriptor: `<name> <n>(C) <n>(R) <bitmap>`.
///
/// The chunk counts are informational, packing ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipe32Line {
    pub name: String,
    pub compressed_chunks: usize,
    pub raw_chunks: usize,
    pub file_name: String,
}

impl FromStr for Ipe32Line {
    type Err = DescriptorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();

        let name = field(fields.next(), "name")?;
        let compressed_chunks = field(fields.next(), "compressed chunk count")?;
        let raw_chunks = field(fields.next(), "raw chunk count")?;
        let file_name = field(fields.next(), "bitmap file name")?;

        Ok(Self {
            name,
            compressed_chunks: chunk_count(&compressed_chunks, "(C)"),
            raw_chunks: chunk_count(&raw_chunks, "(R)"),
            file_name,
        })
    }
}

impl fmt::Display for Ipe32Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}(C) {}(R) {}",
            self.name, self.compressed_chunks, self.raw_chunks, self.file_name
        )
    }
}

/// The non blank lines of the descriptor in `folder`, with their line numbers.
pub fn read_lines(folder: &Path) -> std::io::Result<Vec<(usize, String)>> {
    let text = std::fs::read_to_string(folder.join(INDEX_FILE_NAME))?;
    Ok(text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.to_owned()))
        .collect())
}

fn field(value: Option<&str>, name: &'static str) -> Result<String, DescriptorError> {
    value
        .map(str::to_owned)
        .ok_or(DescriptorError::MissingField(name))
}

fn single_char(value: Option<&str>, name: &'static str) -> Result<char, DescriptorError> {
    let value = value.ok_or(DescriptorError::MissingField(name))?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(DescriptorError::NotAChar {
            field: name,
            value: value.to_owned(),
        }),
    }
}

/// Offsets are signed in descriptors written by hand but stored as 16-bit words.
fn offset(value: &str, name: &'static str) -> Result<u16, DescriptorError> {
    let invalid = || DescriptorError::InvalidNumber {
        field: name,
        value: value.to_owned(),
    };
    let number: i32 = value.parse().map_err(|_| invalid())?;
    u16::try_from(number)
        .or_else(|_| i16::try_from(number).map(|n| n as u16))
        .map_err(|_| invalid())
}

fn chunk_count(value: &str, suffix: &str) -> usize {
    value
        .strip_suffix(suffix)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0)
}
