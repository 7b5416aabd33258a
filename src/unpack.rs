//! Extract the pictures of an archive to bitmaps and an `index.txt` descriptor.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use ipe_lzw::decoder::{GifLzwDecoder, HashLzwDecoder};

use crate::{
    bitmap::{with_file_header, IndexedBitmap},
    descriptor::{Ipe16Line, Ipe32Line, INDEX_FILE_NAME},
    error::{ArtError, EntryError, FormatError},
    ipe16::{self, Ipe16Archive},
    ipe32::{self, Ipe32Archive},
    names::{export_file_name, DuplicateCounter},
};

/// The two archive families, told apart by their signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Ipe16,
    Ipe32,
}

/// Tell the family of an archive from its first bytes.
pub fn detect_kind(data: &[u8]) -> Result<ArchiveKind, FormatError> {
    if data.starts_with(ipe32::MAGIC) {
        Ok(ArchiveKind::Ipe32)
    } else if data.starts_with(b"Art\0") {
        Ok(ArchiveKind::Ipe16)
    } else {
        Err(FormatError::UnknownSignature(
            data.iter().take(8).copied().collect(),
        ))
    }
}

/// What happened to the entries of the archive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnpackReport {
    pub extracted: usize,
    /// Empty entries.
    pub skipped: usize,
    pub failed: usize,
    /// Names used by more than one entry, with their number of uses.
    pub duplicates: Vec<(String, usize)>,
}

impl UnpackReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Extract the archive at `archive` into `output_dir`, or only check it when there is no
/// output folder.
///
/// An entry that cannot be extracted is logged and left out of the descriptor.
///
/// # Errors
///
/// Fails when the archive is not a readable ART archive, or when the output cannot be
/// written.
pub fn unpack(archive: &Path, output_dir: Option<&Path>) -> Result<UnpackReport, ArtError> {
    let data = fs::read(archive)?;
    let kind = detect_kind(&data)?;
    tracing::info!("{} is a {kind:?} archive", archive.display());

    let archive = match kind {
        ArchiveKind::Ipe16 => Archive::Ipe16(Ipe16Archive::from_bytes(data)?),
        ArchiveKind::Ipe32 => Archive::Ipe32(Ipe32Archive::from_bytes(data)?),
    };

    let mut index = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Some(BufWriter::new(File::create(dir.join(INDEX_FILE_NAME))?))
        }
        None => None,
    };

    let report = match archive {
        Archive::Ipe16(archive) => unpack_ipe16(archive, output_dir, &mut index)?,
        Archive::Ipe32(archive) => unpack_ipe32(archive, output_dir, &mut index)?,
    };
    if let Some(mut index) = index {
        index.flush()?;
    }

    for (name, count) in &report.duplicates {
        tracing::info!("{name} is used by {count} pictures");
    }
    if report.is_success() {
        tracing::info!(
            "extracted {} pictures, skipped {} empty entries",
            report.extracted,
            report.skipped
        );
    } else {
        tracing::warn!(
            "extracted {} pictures, {} failed",
            report.extracted,
            report.failed
        );
    }
    Ok(report)
}

/// An archive whose headers were accepted.
enum Archive {
    Ipe16(Ipe16Archive),
    Ipe32(Ipe32Archive),
}

type Index = Option<BufWriter<File>>;

fn unpack_ipe16(
    archive: Ipe16Archive,
    output_dir: Option<&Path>,
    index: &mut Index,
) -> Result<UnpackReport, ArtError> {
    let mut report = UnpackReport::default();
    let mut names = DuplicateCounter::<{ ipe16::NAME_SIZE }>::new();
    let mut decoder = GifLzwDecoder::new();

    for (position, entry) in archive.entries().iter().enumerate() {
        let copy = names.next_copy(&entry.name);
        if entry.is_sentinel() {
            tracing::debug!("entry {position} is empty");
            report.skipped += 1;
            continue;
        }
        if !entry.is_terminated() {
            return Err(FormatError::UnterminatedName { index: position }.into());
        }

        let name = entry.name();
        let file_name = export_file_name(&name, copy);
        let result = archive
            .read_picture(entry, &mut decoder)
            .and_then(|picture| {
                let line = Ipe16Line {
                    palette_type: picture.palette_type,
                    compression_type: picture.header.tag(),
                    name: picture.name,
                    file_name,
                    offset: picture.header.offset(),
                };
                if let Some(dir) = output_dir {
                    let bitmap = IndexedBitmap {
                        width: picture.header.width().into(),
                        height: picture.header.height().into(),
                        pixels: picture.pixels,
                        palette: picture.palette,
                    };
                    let mut bytes = vec![];
                    bitmap.write(&mut bytes)?;
                    fs::write(dir.join(&line.file_name), bytes)?;
                }
                Ok(line.to_string())
            });
        record(&mut report, index, &name, result)?;
    }

    report.duplicates = names.duplicates().collect();
    Ok(report)
}

fn unpack_ipe32(
    archive: Ipe32Archive,
    output_dir: Option<&Path>,
    index: &mut Index,
) -> Result<UnpackReport, ArtError> {
    let mut report = UnpackReport::default();
    let mut names = DuplicateCounter::<{ ipe32::NAME_SIZE }>::new();
    let mut decoder = HashLzwDecoder::new();

    for (position, entry) in archive.entries().iter().enumerate() {
        let copy = names.next_copy(&entry.name);
        if entry.is_sentinel() {
            tracing::debug!("entry {position} is empty");
            report.skipped += 1;
            continue;
        }

        let name = entry.name();
        let file_name = export_file_name(&name, copy);
        let result = archive
            .read_picture(entry, &mut decoder)
            .and_then(|picture| {
                if let Some(dir) = output_dir {
                    fs::write(dir.join(&file_name), with_file_header(&picture.data)?)?;
                }
                let line = Ipe32Line {
                    name: name.clone(),
                    compressed_chunks: picture.compressed_chunks,
                    raw_chunks: picture.raw_chunks,
                    file_name,
                };
                Ok(line.to_string())
            });
        record(&mut report, index, &name, result)?;
    }

    report.duplicates = names.duplicates().collect();
    Ok(report)
}

/// Count an entry and list it in the descriptor when it was extracted.
fn record(
    report: &mut UnpackReport,
    index: &mut Index,
    name: &str,
    result: Result<String, EntryError>,
) -> std::io::Result<()> {
    match result {
        Ok(line) => {
            tracing::info!("{line}");
            if let Some(index) = index {
                writeln!(index, "{line}")?;
            }
            report.extracted += 1;
        }
        Err(err) => {
            tracing::warn!("{name}: {err}");
            report.failed += 1;
        }
    }
    Ok(())
}
