//! Windows bitmap files, as far as the ART archives need them.
//!
//! The 16-bit titles store bare 8-bit pixels and a palette, so pictures are converted from
//! and to complete 8 bpp bitmaps. The 32-bit titles store the bitmap itself minus its
//! 14 byte file header, which only has to be stripped and put back.

use std::io::Write;

use bitstream_io::{ByteRead, ByteReader, ByteWrite, ByteWriter, LittleEndian};

use crate::palette::{Palette, Rgb};

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
const SIGNATURE: [u8; 2] = *b"BM";
const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;
const COLOR_TABLE_SIZE: usize = 256 * 4;
/// `bfOffBits` of an 8 bpp bitmap with a 40 byte info header and 256 colors.
const PIXELS_OFFSET: u32 = (FILE_HEADER_SIZE + INFO_HEADER_SIZE + COLOR_TABLE_SIZE) as u32;

#[derive(Debug, thiserror::Error)]
pub enum BitmapError {
    #[error("not a bitmap file")]
    NotABitmap,
    #[error("only uncompressed bitmaps are supported, compression is {0}")]
    Compressed(u32),
    #[error("the color depth has to be 8 bpp, it is {0} bpp")]
    ColorDepth(u16),
    #[error("bitmap is truncated")]
    Truncated,
    #[error("pixel data starts at {actual}, right after the headers would be {expected}")]
    Gap { expected: u64, actual: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

struct FileHeader {
    file_size: u32,
    pixels_offset: u32,
}

impl FileHeader {
    fn read(bytes: &[u8]) -> Result<Self, BitmapError> {
        if bytes.len() < FILE_HEADER_SIZE || bytes[..2] != SIGNATURE {
            return Err(BitmapError::NotABitmap);
        }

        let mut reader = ByteReader::endian(&bytes[2..FILE_HEADER_SIZE], LittleEndian);
        let file_size = reader.read::<u32>()?;
        reader.skip(4)?;
        let pixels_offset = reader.read::<u32>()?;
        Ok(Self {
            file_size,
            pixels_offset,
        })
    }

    fn write<W: Write>(&self, writer: &mut ByteWriter<W, LittleEndian>) -> std::io::Result<()> {
        writer.write_bytes(&SIGNATURE)?;
        writer.write(self.file_size)?;
        writer.write(0u32)?;
        writer.write(self.pixels_offset)
    }
}

struct InfoHeader {
    size: u32,
    width: i32,
    height: i32,
    bit_count: u16,
    compression: u32,
    colors_used: u32,
}

impl InfoHeader {
    fn read(bytes: &[u8]) -> Result<Self, BitmapError> {
        if bytes.len() < INFO_HEADER_SIZE {
            return Err(BitmapError::NotABitmap);
        }

        let mut reader = ByteReader::endian(bytes, LittleEndian);
        let size = reader.read::<u32>()?;
        let width = reader.read::<i32>()?;
        let height = reader.read::<i32>()?;
        let _planes = reader.read::<u16>()?;
        let bit_count = reader.read::<u16>()?;
        let compression = reader.read::<u32>()?;
        // Image size and resolution.
        reader.skip(12)?;
        let colors_used = reader.read::<u32>()?;
        Ok(Self {
            size,
            width,
            height,
            bit_count,
            compression,
            colors_used,
        })
    }

    /// Entries in the color table that follows the header.
    fn color_count(&self) -> u64 {
        match (self.colors_used, self.bit_count) {
            (0, 1 | 4 | 8) => 1 << self.bit_count,
            (colors_used, _) => colors_used as u64,
        }
    }
}

/// An 8-bit paletted picture with top-down rows and no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub palette: Palette,
}

impl IndexedBitmap {
    /// Read an uncompressed 8 bpp bitmap file.
    ///
    /// Rows are turned top-down whatever their order in the file, and stripped of their
    /// padding.
    pub fn read(bytes: &[u8]) -> Result<Self, BitmapError> {
        let file_header = FileHeader::read(bytes)?;
        let info = InfoHeader::read(&bytes[FILE_HEADER_SIZE..])?;

        if info.compression != BI_RGB {
            return Err(BitmapError::Compressed(info.compression));
        }
        if info.bit_count != 8 {
            return Err(BitmapError::ColorDepth(info.bit_count));
        }
        if info.width < 0 {
            return Err(BitmapError::NotABitmap);
        }

        let table_start = FILE_HEADER_SIZE + info.size as usize;
        let table_len = info.color_count().min(256) as usize * 4;
        let table = bytes
            .get(table_start..table_start + table_len)
            .ok_or(BitmapError::Truncated)?;
        let mut colors = [Rgb::default(); 256];
        for (color, quad) in colors.iter_mut().zip(table.chunks_exact(4)) {
            // Color tables are stored as B, G, R, 0.
            *color = Rgb {
                r: quad[2],
                g: quad[1],
                b: quad[0],
            };
        }

        let width = info.width.unsigned_abs();
        let height = info.height.unsigned_abs();
        let padded_width = (width as usize + 3) & !3;
        let pixels_start = file_header.pixels_offset as usize;
        let data_len = padded_width
            .checked_mul(height as usize)
            .ok_or(BitmapError::Truncated)?;
        let data = pixels_start
            .checked_add(data_len)
            .and_then(|end| bytes.get(pixels_start..end))
            .ok_or(BitmapError::Truncated)?;

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        let rows = data.chunks_exact(padded_width.max(1)).take(height as usize);
        if info.height > 0 {
            for row in rows.rev() {
                pixels.extend_from_slice(&row[..width as usize]);
            }
        } else {
            for row in rows {
                pixels.extend_from_slice(&row[..width as usize]);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
            palette: Palette::from_colors(colors),
        })
    }

    /// Write a bottom-up 8 bpp bitmap file with a full 256 color table.
    pub fn write<W: Write>(&self, out: W) -> Result<(), BitmapError> {
        let width = self.width as usize;
        let padding = (4 - width % 4) % 4;
        let data_len = (width + padding) * self.height as usize;

        let mut writer = ByteWriter::endian(out, LittleEndian);
        FileHeader {
            file_size: PIXELS_OFFSET + data_len as u32,
            pixels_offset: PIXELS_OFFSET,
        }
        .write(&mut writer)?;

        writer.write(INFO_HEADER_SIZE as u32)?;
        writer.write(self.width as i32)?;
        writer.write(self.height as i32)?;
        writer.write(1u16)?;
        writer.write(8u16)?;
        writer.write(BI_RGB)?;
        // Image size, resolution, colors used and important.
        for _ in 0..5 {
            writer.write(0u32)?;
        }

        for color in self.palette.colors() {
            writer.write_bytes(&[color.b, color.g, color.r, 0])?;
        }

        let pad = [0; 3];
        if width > 0 {
            for row in self.pixels.chunks_exact(width).rev() {
                writer.write_bytes(row)?;
                writer.write_bytes(&pad[..padding])?;
            }
        }
        Ok(())
    }
}

/// Strip the file header of a bitmap, keeping what the 32-bit titles store in an archive.
///
/// The pixel data must follow the headers and color table without a gap, because the
/// games find it from the info header alone.
pub fn strip_file_header(bytes: &[u8]) -> Result<&[u8], BitmapError> {
    let file_header = FileHeader::read(bytes)?;
    let info = InfoHeader::read(&bytes[FILE_HEADER_SIZE..])?;

    let bitfields = if info.compression == BI_BITFIELDS { 12 } else { 0 };
    let expected = FILE_HEADER_SIZE as u64 + info.size as u64 + bitfields + 4 * info.color_count();
    if file_header.pixels_offset as u64 != expected {
        return Err(BitmapError::Gap {
            expected,
            actual: file_header.pixels_offset,
        });
    }

    Ok(&bytes[FILE_HEADER_SIZE..])
}

/// Put back the file header of a bitmap stored by the 32-bit titles.
pub fn with_file_header(data: &[u8]) -> Result<Vec<u8>, BitmapError> {
    let mut bytes = Vec::with_capacity(FILE_HEADER_SIZE + data.len());
    let mut writer = ByteWriter::endian(&mut bytes, LittleEndian);
    FileHeader {
        file_size: (FILE_HEADER_SIZE + data.len()) as u32,
        pixels_offset: PIXELS_OFFSET,
    }
    .write(&mut writer)?;
    drop(writer);

    bytes.extend_from_slice(data);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> IndexedBitmap {
        IndexedBitmap {
            width,
            height,
            pixels: (0..width * height).map(|i| (i % 7) as u8).collect(),
            palette: Palette::gray_ramp(),
        }
    }

    #[test]
    fn write_then_read_odd_width() -> Result<(), BitmapError> {
        let bitmap = checkerboard(5, 3);
        let mut bytes = vec![];
        bitmap.write(&mut bytes)?;

        // 3 rows padded to 8 bytes.
        assert_eq!(bytes.len(), PIXELS_OFFSET as usize + 24);
        assert_eq!(IndexedBitmap::read(&bytes)?, bitmap);
        Ok(())
    }

    #[test]
    fn rows_are_written_bottom_up() -> Result<(), BitmapError> {
        let bitmap = IndexedBitmap {
            width: 4,
            height: 2,
            pixels: vec![1, 1, 1, 1, 2, 2, 2, 2],
            palette: Palette::gray_ramp(),
        };
        let mut bytes = vec![];
        bitmap.write(&mut bytes)?;

        assert_eq!(&bytes[PIXELS_OFFSET as usize..], [2, 2, 2, 2, 1, 1, 1, 1]);
        Ok(())
    }

    #[test]
    fn palette_is_stored_as_bgr0() -> Result<(), BitmapError> {
        let mut colors = [Rgb::default(); 256];
        colors[0] = Rgb {
            r: 0x10,
            g: 0x20,
            b: 0x30,
        };
        let bitmap = IndexedBitmap {
            width: 1,
            height: 1,
            pixels: vec![0],
            palette: Palette::from_colors(colors),
        };
        let mut bytes = vec![];
        bitmap.write(&mut bytes)?;

        let table = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
        assert_eq!(bytes[table..table + 4], [0x30, 0x20, 0x10, 0]);
        Ok(())
    }

    #[test]
    fn reject_other_depths() -> Result<(), BitmapError> {
        let mut bytes = vec![];
        checkerboard(4, 4).write(&mut bytes)?;
        // biBitCount
        bytes[28] = 24;

        assert!(matches!(
            IndexedBitmap::read(&bytes),
            Err(BitmapError::ColorDepth(24))
        ));
        Ok(())
    }

    #[test]
    fn reject_negative_width() -> Result<(), BitmapError> {
        let mut bytes = vec![];
        checkerboard(4, 4).write(&mut bytes)?;
        // biWidth
        bytes[18..22].copy_from_slice(&(-4i32).to_le_bytes());

        assert!(matches!(
            IndexedBitmap::read(&bytes),
            Err(BitmapError::NotABitmap)
        ));
        Ok(())
    }

    #[test]
    fn reject_truncated_pixels() -> Result<(), BitmapError> {
        let mut bytes = vec![];
        checkerboard(8, 8).write(&mut bytes)?;
        bytes.truncate(bytes.len() - 1);

        assert!(matches!(
            IndexedBitmap::read(&bytes),
            Err(BitmapError::Truncated)
        ));
        Ok(())
    }

    #[test]
    fn strip_and_restore_file_header() -> Result<(), BitmapError> {
        let mut bytes = vec![];
        checkerboard(6, 2).write(&mut bytes)?;

        let stored = strip_file_header(&bytes)?;
        assert_eq!(stored.len(), bytes.len() - FILE_HEADER_SIZE);
        assert_eq!(with_file_header(stored)?, bytes);
        Ok(())
    }

    #[test]
    fn reject_gap_before_pixels() -> Result<(), BitmapError> {
        let mut bytes = vec![];
        checkerboard(4, 4).write(&mut bytes)?;
        // bfOffBits
        bytes[10] += 2;

        assert!(matches!(
            strip_file_header(&bytes),
            Err(BitmapError::Gap {
                expected: 1078,
                actual: 1080
            })
        ));
        Ok(())
    }
}
