//! ART archives of the 16-bit titles: Blown Away, Panic in the Park and Where's Waldo? At
//! the Circus.
//!
//! ```text
//! file header   magic[23] dummy u32:entries+1 u32:file size
//! entry table   (name[23] palette type u32:offset u32:size) * entries
//! bodies        picture header, pixels (LZW or raw), optional 768 byte palette
//! ```

use std::io::{Seek, SeekFrom, Write};

use bitstream_io::{ByteRead, ByteReader, ByteWrite, ByteWriter, LittleEndian};
use ipe_lzw::{decoder::GifLzwDecoder, encoder::GifLzwEncoder};

use crate::{
    error::{EntryError, FormatError},
    names::{decode_name, encode_name},
    palette::Palette,
};

pub const NAME_SIZE: usize = 23;
const MAGIC: &[u8] = b"Art";
const DUMMY: u8 = b'?';
const FILE_HEADER_SIZE: usize = 32;
const ENTRY_HEADER_SIZE: usize = 32;

/// Where the palette of a picture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteType {
    /// `'X'`: the palette is stored after the pixels.
    Attached,
    /// `'C'`: the picture is drawn inside a parent picture and uses its palette.
    Parent,
}

impl PaletteType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'X' => Some(PaletteType::Attached),
            b'C' => Some(PaletteType::Parent),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            PaletteType::Attached => b'X',
            PaletteType::Parent => b'C',
        }
    }

    fn stored_size(self) -> usize {
        match self {
            PaletteType::Attached => Palette::SIZE,
            PaletteType::Parent => 0,
        }
    }
}

/// The two picture header layouts. Blown Away uses the narrow one, the later titles the
/// wide one with fine-tuning offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Narrow,
    Wide,
}

impl Layout {
    /// Compression type byte of LZW compressed pictures. Raw pictures use the lower case.
    pub fn lzw_tag(self) -> u8 {
        match self {
            Layout::Narrow => b'P',
            Layout::Wide => b'Q',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Lzw,
    Raw,
}

/// The header at the start of every picture body. Its first byte tells both the layout
/// and the compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureHeader {
    Narrow {
        compression: Compression,
        width: u16,
        height: u16,
    },
    Wide {
        compression: Compression,
        offset_x: u16,
        offset_y: u16,
        width: u16,
        height: u16,
    },
}

impl PictureHeader {
    const NARROW_SIZE: usize = 5;
    const WIDE_SIZE: usize = 9;

    /// Layout and compression selected by a compression type byte.
    pub fn classify(tag: u8) -> Option<(Layout, Compression)> {
        match tag {
            b'P' => Some((Layout::Narrow, Compression::Lzw)),
            b'p' => Some((Layout::Narrow, Compression::Raw)),
            b'Q' => Some((Layout::Wide, Compression::Lzw)),
            b'q' => Some((Layout::Wide, Compression::Raw)),
            _ => None,
        }
    }

    pub fn new(
        layout: Layout,
        compression: Compression,
        width: u16,
        height: u16,
        (offset_x, offset_y): (u16, u16),
    ) -> Self {
        match layout {
            Layout::Narrow => PictureHeader::Narrow {
                compression,
                width,
                height,
            },
            Layout::Wide => PictureHeader::Wide {
                compression,
                offset_x,
                offset_y,
                width,
                height,
            },
        }
    }

    /// Read the header at the start of `body`, peeking at its first byte to pick the layout.
    pub fn parse(body: &[u8]) -> Result<Self, EntryError> {
        let size = body.len() as u32;
        let tag = *body.first().ok_or(EntryError::BodyTooSmall { size })?;
        let (layout, compression) =
            Self::classify(tag).ok_or(EntryError::UnknownCompressionType(tag))?;

        let header_size = match layout {
            Layout::Narrow => Self::NARROW_SIZE,
            Layout::Wide => Self::WIDE_SIZE,
        };
        let fields = body
            .get(1..header_size)
            .ok_or(EntryError::BodyTooSmall { size })?;

        let mut reader = ByteReader::endian(fields, LittleEndian);
        let header = match layout {
            Layout::Narrow => PictureHeader::Narrow {
                compression,
                width: reader.read()?,
                height: reader.read()?,
            },
            Layout::Wide => PictureHeader::Wide {
                compression,
                offset_x: reader.read()?,
                offset_y: reader.read()?,
                width: reader.read()?,
                height: reader.read()?,
            },
        };
        Ok(header)
    }

    pub fn write<W: Write>(&self, writer: &mut ByteWriter<W, LittleEndian>) -> std::io::Result<()> {
        writer.write(self.tag())?;
        match *self {
            PictureHeader::Narrow { width, height, .. } => {
                writer.write(width)?;
                writer.write(height)
            }
            PictureHeader::Wide {
                offset_x,
                offset_y,
                width,
                height,
                ..
            } => {
                writer.write(offset_x)?;
                writer.write(offset_y)?;
                writer.write(width)?;
                writer.write(height)
            }
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            PictureHeader::Narrow { .. } => Layout::Narrow,
            PictureHeader::Wide { .. } => Layout::Wide,
        }
    }

    pub fn compression(&self) -> Compression {
        match *self {
            PictureHeader::Narrow { compression, .. } | PictureHeader::Wide { compression, .. } => {
                compression
            }
        }
    }

    pub fn tag(&self) -> u8 {
        let tag = self.layout().lzw_tag();
        match self.compression() {
            Compression::Lzw => tag,
            Compression::Raw => tag.to_ascii_lowercase(),
        }
    }

    pub fn width(&self) -> u16 {
        match *self {
            PictureHeader::Narrow { width, .. } | PictureHeader::Wide { width, .. } => width,
        }
    }

    pub fn height(&self) -> u16 {
        match *self {
            PictureHeader::Narrow { height, .. } | PictureHeader::Wide { height, .. } => height,
        }
    }

    /// Fine-tuning offsets, only part of the wide layout.
    pub fn offset(&self) -> Option<(u16, u16)> {
        match *self {
            PictureHeader::Narrow { .. } => None,
            PictureHeader::Wide {
                offset_x, offset_y, ..
            } => Some((offset_x, offset_y)),
        }
    }

    pub fn size(&self) -> usize {
        match self.layout() {
            Layout::Narrow => Self::NARROW_SIZE,
            Layout::Wide => Self::WIDE_SIZE,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// A row of the entry table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub name: [u8; NAME_SIZE],
    /// Raw palette type byte, see [PaletteType].
    pub palette_type: u8,
    pub offset: u32,
    pub size: u32,
}

impl EntryHeader {
    fn zeroed() -> Self {
        Self {
            name: [0; NAME_SIZE],
            palette_type: 0,
            offset: 0,
            size: 0,
        }
    }

    fn read(bytes: &[u8]) -> std::io::Result<Self> {
        let mut reader = ByteReader::endian(bytes, LittleEndian);
        let mut name = [0; NAME_SIZE];
        reader.read_bytes(&mut name)?;
        Ok(Self {
            name,
            palette_type: reader.read()?,
            offset: reader.read()?,
            size: reader.read()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut ByteWriter<W, LittleEndian>) -> std::io::Result<()> {
        writer.write_bytes(&self.name)?;
        writer.write(self.palette_type)?;
        writer.write(self.offset)?;
        writer.write(self.size)
    }

    /// Placeholder rows: no name or no body.
    pub fn is_sentinel(&self) -> bool {
        self.name[0] == 0 || self.size == 0
    }

    /// Whether the name leaves room for its zero terminator.
    pub fn is_terminated(&self) -> bool {
        self.name.contains(&0)
    }

    pub fn name(&self) -> String {
        decode_name(&self.name)
    }
}

/// A decoded picture, or one to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipe16Picture {
    pub name: String,
    pub palette_type: PaletteType,
    pub header: PictureHeader,
    /// Top-down rows of `header.width()` pixels.
    pub pixels: Vec<u8>,
    pub palette: Palette,
}

/// An archive loaded in memory.
pub struct Ipe16Archive {
    data: Vec<u8>,
    entries: Vec<EntryHeader>,
}

impl Ipe16Archive {
    /// Check the file header and read the entry table.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FormatError> {
        if data.len() < FILE_HEADER_SIZE {
            return Err(FormatError::TooShort {
                expected: FILE_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut reader = ByteReader::endian(&data[..FILE_HEADER_SIZE], LittleEndian);
        let mut magic = [0; NAME_SIZE];
        reader.read_bytes(&mut magic)?;
        let dummy: u8 = reader.read()?;
        let header_entries: u32 = reader.read()?;
        let total_file_size: u32 = reader.read()?;

        if decode_name(&magic).as_bytes() != MAGIC {
            return Err(FormatError::BadMagic);
        }
        if dummy != DUMMY {
            return Err(FormatError::BadDummy(dummy));
        }
        if total_file_size as usize != data.len() {
            return Err(FormatError::FileSizeMismatch {
                declared: total_file_size,
                actual: data.len(),
            });
        }

        let count = header_entries.checked_sub(1).ok_or(FormatError::NoEntries)? as usize;
        let table = count
            .checked_mul(ENTRY_HEADER_SIZE)
            .and_then(|len| data.get(FILE_HEADER_SIZE..FILE_HEADER_SIZE + len))
            .ok_or(FormatError::EntryTableTruncated { count })?;
        let entries = table
            .chunks_exact(ENTRY_HEADER_SIZE)
            .map(EntryHeader::read)
            .collect::<std::io::Result<_>>()?;

        Ok(Self { data, entries })
    }

    pub fn entries(&self) -> &[EntryHeader] {
        &self.entries
    }

    /// Decode the picture of one entry.
    pub fn read_picture(
        &self,
        entry: &EntryHeader,
        decoder: &mut GifLzwDecoder,
    ) -> Result<Ipe16Picture, EntryError> {
        let out_of_bounds = || EntryError::OutOfBounds {
            offset: entry.offset,
            size: entry.size,
            file_len: self.data.len(),
        };
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.size as usize)
            .ok_or_else(out_of_bounds)?;
        let body = self.data.get(start..end).ok_or_else(out_of_bounds)?;

        let header = PictureHeader::parse(body)?;
        let palette_type = PaletteType::from_byte(entry.palette_type)
            .ok_or(EntryError::UnknownPaletteType(entry.palette_type))?;

        let palette_size = palette_type.stored_size();
        let pixels_end = body
            .len()
            .checked_sub(palette_size)
            .filter(|&end| end >= header.size())
            .ok_or(EntryError::BodyTooSmall { size: entry.size })?;

        let palette = match palette_type {
            PaletteType::Attached => Palette::from_rgb_bytes(&body[pixels_end..]),
            PaletteType::Parent => Palette::gray_ramp(),
        };

        let pixel_data = &body[header.size()..pixels_end];
        let pixel_count = header.pixel_count();
        let pixels = match header.compression() {
            Compression::Lzw => {
                let pixels = decoder.decode(pixel_data, pixel_count)?;
                if pixels.len() != pixel_count {
                    return Err(EntryError::DecodedSizeMismatch {
                        expected: pixel_count,
                        actual: pixels.len(),
                    });
                }
                pixels
            }
            Compression::Raw => {
                let expected = (header.size() + pixel_count + palette_size) as u64;
                if expected != entry.size as u64 {
                    return Err(EntryError::SizeMismatch {
                        declared: entry.size,
                        expected,
                    });
                }
                pixel_data.to_vec()
            }
        };

        Ok(Ipe16Picture {
            name: entry.name(),
            palette_type,
            header,
            pixels,
            palette,
        })
    }
}

/// A picture body ready to be appended to an archive.
pub struct Ipe16Body {
    name: [u8; NAME_SIZE],
    palette_type: PaletteType,
    bytes: Vec<u8>,
}

/// Writes an archive in two passes: placeholders for the headers first, then the bodies,
/// then the real headers over the placeholders.
pub struct Ipe16Writer<W: Write + Seek> {
    out: W,
    entries: Vec<EntryHeader>,
    current: usize,
    encoder: GifLzwEncoder,
}

impl<W: Write + Seek> Ipe16Writer<W> {
    /// Start an archive of `count` entries at the current position of `out`.
    pub fn new(mut out: W, count: usize) -> std::io::Result<Self> {
        let entries = vec![EntryHeader::zeroed(); count];

        write_headers(&mut ByteWriter::endian(&mut out, LittleEndian), &entries, 0)?;

        Ok(Self {
            out,
            entries,
            current: 0,
            encoder: GifLzwEncoder::new(),
        })
    }

    /// Validate and encode a picture. Nothing is written yet.
    pub fn encode(&mut self, picture: &Ipe16Picture) -> Result<Ipe16Body, EntryError> {
        let name = encode_name::<NAME_SIZE>(&picture.name, NAME_SIZE - 1)?;

        let pixel_count = picture.header.pixel_count();
        if picture.pixels.len() != pixel_count {
            return Err(EntryError::DecodedSizeMismatch {
                expected: pixel_count,
                actual: picture.pixels.len(),
            });
        }

        let mut bytes = Vec::with_capacity(picture.header.size() + pixel_count + Palette::SIZE);
        picture
            .header
            .write(&mut ByteWriter::endian(&mut bytes, LittleEndian))?;
        match picture.header.compression() {
            Compression::Lzw => self.encoder.encode(&picture.pixels, &mut bytes)?,
            Compression::Raw => bytes.extend_from_slice(&picture.pixels),
        }
        if picture.palette_type == PaletteType::Attached {
            bytes.extend_from_slice(&picture.palette.to_rgb_bytes());
        }

        Ok(Ipe16Body {
            name,
            palette_type: picture.palette_type,
            bytes,
        })
    }

    /// Append a body and fill in the next entry.
    pub fn push(&mut self, body: &Ipe16Body) -> std::io::Result<()> {
        let offset = position(&mut self.out)?;
        let size = u32::try_from(body.bytes.len()).map_err(|_| too_large())?;
        self.out.write_all(&body.bytes)?;

        if let Some(entry) = self.entries.get_mut(self.current) {
            *entry = EntryHeader {
                name: body.name,
                palette_type: body.palette_type.as_byte(),
                offset,
                size,
            };
        }
        self.current += 1;
        Ok(())
    }

    /// Leave the next entry zeroed, it will be skipped when unpacking.
    pub fn skip(&mut self) {
        self.current += 1;
    }

    /// Rewrite the headers and hand back the output.
    pub fn finish(mut self) -> std::io::Result<W> {
        let file_size = position(&mut self.out)?;
        self.out.seek(SeekFrom::Start(0))?;

        write_headers(
            &mut ByteWriter::endian(&mut self.out, LittleEndian),
            &self.entries,
            file_size,
        )?;

        self.out.seek(SeekFrom::Start(file_size as u64))?;
        self.out.flush()?;
        Ok(self.out)
    }
}

fn write_headers<W: Write>(
    writer: &mut ByteWriter<W, LittleEndian>,
    entries: &[EntryHeader],
    file_size: u32,
) -> std::io::Result<()> {
    let mut magic = [0; NAME_SIZE];
    magic[..MAGIC.len()].copy_from_slice(MAGIC);
    let header_entries = u32::try_from(entries.len() + 1).map_err(|_| too_large())?;

    writer.write_bytes(&magic)?;
    writer.write(DUMMY)?;
    writer.write(header_entries)?;
    writer.write(file_size)?;
    for entry in entries {
        entry.write(writer)?;
    }
    Ok(())
}

pub(crate) fn position<S: Seek>(out: &mut S) -> std::io::Result<u32> {
    u32::try_from(out.stream_position()?).map_err(|_| too_large())
}

pub(crate) fn too_large() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::Other,
        "archive does not fit in 32-bit offsets",
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ipe_lzw::decoder::DecodingError;

    use super::*;

    fn picture(name: &str, tag: u8, palette_type: PaletteType) -> Ipe16Picture {
        let (layout, compression) = PictureHeader::classify(tag).unwrap();
        let header = PictureHeader::new(layout, compression, 20, 10, (3, 4));
        Ipe16Picture {
            name: name.into(),
            palette_type,
            header,
            pixels: (0..200).map(|i| (i / 7) as u8).collect(),
            palette: match palette_type {
                PaletteType::Attached => {
                    Palette::from_rgb_bytes(&(0..768).map(|i| (i % 256) as u8).collect::<Vec<_>>())
                }
                PaletteType::Parent => Palette::gray_ramp(),
            },
        }
    }

    fn pack(pictures: &[Ipe16Picture]) -> Result<Vec<u8>, EntryError> {
        let mut writer = Ipe16Writer::new(Cursor::new(vec![]), pictures.len())?;
        for picture in pictures {
            let body = writer.encode(picture)?;
            writer.push(&body)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    #[test]
    fn header_layout_follows_tag() -> Result<(), EntryError> {
        let narrow = PictureHeader::parse(&[b'p', 20, 0, 10, 0])?;
        assert_eq!(
            narrow,
            PictureHeader::Narrow {
                compression: Compression::Raw,
                width: 20,
                height: 10
            }
        );

        let wide = PictureHeader::parse(&[b'Q', 1, 0, 2, 0, 20, 0, 10, 0])?;
        assert_eq!(wide.offset(), Some((1, 2)));
        assert_eq!(wide.size(), 9);
        assert_eq!(wide.pixel_count(), 200);

        assert!(matches!(
            PictureHeader::parse(&[b'Z', 0, 0, 0, 0]),
            Err(EntryError::UnknownCompressionType(b'Z'))
        ));
        assert!(matches!(
            PictureHeader::parse(&[b'Q', 0, 0]),
            Err(EntryError::BodyTooSmall { size: 3 })
        ));
        Ok(())
    }

    #[test]
    fn pack_then_read_every_kind() -> Result<(), Box<dyn std::error::Error>> {
        let pictures = [
            picture("LZWX", b'P', PaletteType::Attached),
            picture("RAWX", b'p', PaletteType::Attached),
            picture("LZWC", b'Q', PaletteType::Parent),
            picture("RAWC", b'q', PaletteType::Parent),
        ];
        let data = pack(&pictures)?;

        let archive = Ipe16Archive::from_bytes(data)?;
        let mut decoder = GifLzwDecoder::new();
        assert_eq!(archive.entries().len(), 4);
        for (entry, expected) in archive.entries().iter().zip(&pictures) {
            assert_eq!(&archive.read_picture(entry, &mut decoder)?, expected);
        }
        Ok(())
    }

    #[test]
    fn headers_are_back_patched() -> Result<(), Box<dyn std::error::Error>> {
        let data = pack(&[picture("RAWX", b'p', PaletteType::Attached)])?;

        assert_eq!(&data[..4], b"Art\0");
        assert_eq!(data[23], b'?');
        assert_eq!(data[24..28], 2u32.to_le_bytes());
        assert_eq!(data[28..32], (data.len() as u32).to_le_bytes());

        let entry = EntryHeader::read(&data[32..64])?;
        assert_eq!(entry.name(), "RAWX");
        assert_eq!(entry.palette_type, b'X');
        assert_eq!(entry.offset, 64);
        assert_eq!(entry.size, 5 + 200 + 768);
        Ok(())
    }

    #[test]
    fn skipped_entries_stay_zeroed() -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = Ipe16Writer::new(Cursor::new(vec![]), 2)?;
        writer.skip();
        let body = writer.encode(&picture("KEPT", b'P', PaletteType::Parent))?;
        writer.push(&body)?;
        let archive = Ipe16Archive::from_bytes(writer.finish()?.into_inner())?;

        assert!(archive.entries()[0].is_sentinel());
        assert_eq!(archive.entries()[1].name(), "KEPT");
        Ok(())
    }

    #[test]
    fn parent_palette_is_a_gray_ramp() -> Result<(), Box<dyn std::error::Error>> {
        let mut parent = picture("CHILD", b'p', PaletteType::Parent);
        parent.palette = Palette::from_rgb_bytes(&[9; 768]);
        let archive = Ipe16Archive::from_bytes(pack(&[parent])?)?;

        let read = archive.read_picture(&archive.entries()[0], &mut GifLzwDecoder::new())?;
        assert_eq!(read.palette, Palette::gray_ramp());
        Ok(())
    }

    #[test]
    fn raw_size_mismatch_is_an_entry_error() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = pack(&[picture("RAWX", b'p', PaletteType::Attached)])?;
        // Grow the declared size by one byte and the file along with it.
        data.push(0);
        let file_size = data.len() as u32;
        data[28..32].copy_from_slice(&file_size.to_le_bytes());
        data[60..64].copy_from_slice(&(5u32 + 200 + 768 + 1).to_le_bytes());

        let archive = Ipe16Archive::from_bytes(data)?;
        let result = archive.read_picture(&archive.entries()[0], &mut GifLzwDecoder::new());
        assert!(matches!(
            result,
            Err(EntryError::SizeMismatch {
                declared: 974,
                expected: 973
            })
        ));
        Ok(())
    }

    #[test]
    fn huge_dimensions_with_a_small_body() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = pack(&[picture("LZWC", b'P', PaletteType::Parent)])?;
        // Width and height of the only body, which starts right after the entry table.
        data[65..69].copy_from_slice(&[0xFF; 4]);

        let archive = Ipe16Archive::from_bytes(data)?;
        let result = archive.read_picture(&archive.entries()[0], &mut GifLzwDecoder::new());
        assert!(matches!(
            result,
            Err(EntryError::Decoding(DecodingError::UnexpectedEnd {
                position: 200,
                ..
            }))
        ));
        Ok(())
    }

    #[test]
    fn body_past_end_of_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = pack(&[picture("LZWX", b'P', PaletteType::Attached)])?;
        data[56..60].copy_from_slice(&0x10000u32.to_le_bytes());

        let archive = Ipe16Archive::from_bytes(data)?;
        let result = archive.read_picture(&archive.entries()[0], &mut GifLzwDecoder::new());
        assert!(matches!(result, Err(EntryError::OutOfBounds { .. })));
        Ok(())
    }

    #[test]
    fn reject_bad_file_headers() -> Result<(), Box<dyn std::error::Error>> {
        let data = pack(&[picture("RAWX", b'p', PaletteType::Attached)])?;

        let mut bad_magic = data.clone();
        bad_magic[0] = b'a';
        assert!(matches!(
            Ipe16Archive::from_bytes(bad_magic),
            Err(FormatError::BadMagic)
        ));

        let mut bad_dummy = data.clone();
        bad_dummy[23] = b'!';
        assert!(matches!(
            Ipe16Archive::from_bytes(bad_dummy),
            Err(FormatError::BadDummy(b'!'))
        ));

        let mut longer = data.clone();
        longer.push(0);
        assert!(matches!(
            Ipe16Archive::from_bytes(longer),
            Err(FormatError::FileSizeMismatch { .. })
        ));

        let mut many_entries = data;
        many_entries[24..28].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            Ipe16Archive::from_bytes(many_entries),
            Err(FormatError::EntryTableTruncated { count: 999 })
        ));
        Ok(())
    }

    #[test]
    fn reject_long_names() -> std::io::Result<()> {
        let mut writer = Ipe16Writer::new(Cursor::new(vec![]), 1)?;
        let result = writer.encode(&picture(&"N".repeat(23), b'P', PaletteType::Parent));

        assert!(matches!(result, Err(EntryError::NameTooLong { max: 22, .. })));
        Ok(())
    }
}
