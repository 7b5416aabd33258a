//! Build an archive from a folder of bitmaps and its `index.txt`.

use std::{
    fs::{self, File},
    io::{BufWriter, Seek, Write},
    path::Path,
};

use crate::{
    bitmap::{strip_file_header, IndexedBitmap},
    descriptor::{self, Ipe16Line, Ipe32Line, INDEX_FILE_NAME},
    error::{ArtError, EntryError},
    game::{Family, Game},
    ipe16::{Ipe16Body, Ipe16Picture, Ipe16Writer, Layout, PictureHeader},
    ipe32::{Ipe32Body, Ipe32Writer},
};

/// What happened to the lines of the descriptor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackReport {
    pub packed: usize,
    pub failed: usize,
}

impl PackReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Pack the pictures listed in `input_dir/index.txt` into the archive file `output`.
///
/// A line that cannot be packed is logged and leaves an empty entry behind, the other lines
/// are still packed.
///
/// # Errors
///
/// Fails if the descriptor cannot be read or the archive cannot be written.
pub fn pack(game: Game, input_dir: &Path, output: &Path) -> Result<PackReport, ArtError> {
    let lines = descriptor::read_lines(input_dir)?;
    tracing::info!(
        "{} contains {} entries",
        input_dir.join(INDEX_FILE_NAME).display(),
        lines.len()
    );

    let out = BufWriter::new(File::create(output)?);
    pack_lines(game, input_dir, &lines, out)
}

/// Pack descriptor lines into any seekable output. Bitmaps are looked up in `input_dir`.
pub fn pack_lines<W: Write + Seek>(
    game: Game,
    input_dir: &Path,
    lines: &[(usize, String)],
    out: W,
) -> Result<PackReport, ArtError> {
    let report = match game.family() {
        Family::Ipe16(layout) => pack_ipe16(layout, input_dir, lines, out)?,
        Family::Ipe32 => pack_ipe32(input_dir, lines, out)?,
    };

    if report.is_success() {
        tracing::info!("packed {} pictures", report.packed);
    } else {
        tracing::warn!(
            "packed {} pictures, {} failed",
            report.packed,
            report.failed
        );
    }
    Ok(report)
}

fn pack_ipe16<W: Write + Seek>(
    layout: Layout,
    input_dir: &Path,
    lines: &[(usize, String)],
    out: W,
) -> std::io::Result<PackReport> {
    let mut writer = Ipe16Writer::new(out, lines.len())?;
    let mut report = PackReport::default();

    for (number, line) in lines {
        match prepare_ipe16(layout, input_dir, line, &mut writer) {
            Ok(body) => {
                writer.push(&body)?;
                report.packed += 1;
                tracing::debug!("{INDEX_FILE_NAME}:{number}: packed {}", line.trim());
            }
            Err(err) => {
                tracing::warn!("{INDEX_FILE_NAME}:{number}: {err}");
                writer.skip();
                report.failed += 1;
            }
        }
    }

    writer.finish()?;
    Ok(report)
}

fn prepare_ipe16<W: Write + Seek>(
    layout: Layout,
    input_dir: &Path,
    line: &str,
    writer: &mut Ipe16Writer<W>,
) -> Result<Ipe16Body, EntryError> {
    let line: Ipe16Line = line.parse()?;
    let (found, compression) = PictureHeader::classify(line.compression_type)
        .ok_or(EntryError::UnknownCompressionType(line.compression_type))?;
    if found != layout {
        return Err(EntryError::WrongLayout {
            found: line.compression_type as char,
            expected: layout.lzw_tag() as char,
        });
    }

    let bitmap = IndexedBitmap::read(&fs::read(input_dir.join(&line.file_name))?)?;
    let too_large = || EntryError::PictureTooLarge {
        width: bitmap.width,
        height: bitmap.height,
    };
    let width = u16::try_from(bitmap.width).map_err(|_| too_large())?;
    let height = u16::try_from(bitmap.height).map_err(|_| too_large())?;

    let header = PictureHeader::new(
        layout,
        compression,
        width,
        height,
        line.offset.unwrap_or_default(),
    );
    writer.encode(&Ipe16Picture {
        name: line.name,
        palette_type: line.palette_type,
        header,
        pixels: bitmap.pixels,
        palette: bitmap.palette,
    })
}

fn pack_ipe32<W: Write + Seek>(
    input_dir: &Path,
    lines: &[(usize, String)],
    out: W,
) -> std::io::Result<PackReport> {
    let mut writer = Ipe32Writer::new(out, lines.len())?;
    let mut report = PackReport::default();

    for (number, line) in lines {
        match prepare_ipe32(input_dir, line, &mut writer) {
            Ok(body) => {
                writer.push(&body)?;
                report.packed += 1;
                tracing::debug!(
                    "{INDEX_FILE_NAME}:{number}: packed {} in {} compressed and {} raw chunks",
                    line.trim(),
                    body.compressed_chunks(),
                    body.raw_chunks()
                );
            }
            Err(err) => {
                tracing::warn!("{INDEX_FILE_NAME}:{number}: {err}");
                writer.skip();
                report.failed += 1;
            }
        }
    }

    writer.finish()?;
    Ok(report)
}

fn prepare_ipe32<W: Write + Seek>(
    input_dir: &Path,
    line: &str,
    writer: &mut Ipe32Writer<W>,
) -> Result<Ipe32Body, EntryError> {
    let line: Ipe32Line = line.parse()?;
    let bytes = fs::read(input_dir.join(&line.file_name))?;
    writer.encode(&line.name, strip_file_header(&bytes)?)
}
