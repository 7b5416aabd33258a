use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ipe_art::{
    ipe16::{
        Compression, Ipe16Archive, Ipe16Picture, Ipe16Writer, Layout, PaletteType, PictureHeader,
    },
    ipe32::{Ipe32Archive, Ipe32Writer},
    palette::Palette,
};
use ipe_lzw::decoder::{GifLzwDecoder, HashLzwDecoder};
use rand::{prelude::StdRng, Rng, SeedableRng};

const WIDTH: u16 = 640;
const HEIGHT: u16 = 480;

fn pictures() -> Vec<Ipe16Picture> {
    let mut rand = StdRng::seed_from_u64(16);
    (0..8)
        .map(|n| Ipe16Picture {
            name: format!("PIC{n}"),
            palette_type: PaletteType::Attached,
            header: PictureHeader::new(Layout::Wide, Compression::Lzw, WIDTH, HEIGHT, (0, 0)),
            pixels: (0..WIDTH as usize * HEIGHT as usize)
                .map(|i| (i / 2048) as u8 ^ if rand.gen_ratio(1, 16) { 1 } else { 0 })
                .collect(),
            palette: Palette::gray_ramp(),
        })
        .collect()
}

fn pack_ipe16(pictures: &[Ipe16Picture]) -> Vec<u8> {
    let mut writer = Ipe16Writer::new(Cursor::new(vec![]), pictures.len()).unwrap();
    for picture in pictures {
        let body = writer.encode(picture).unwrap();
        writer.push(&body).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn pack_ipe32(pictures: &[Ipe16Picture]) -> Vec<u8> {
    let mut writer = Ipe32Writer::new(Cursor::new(vec![]), pictures.len()).unwrap();
    for picture in pictures {
        let body = writer.encode(&picture.name, &picture.pixels).unwrap();
        writer.push(&body).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn bench_ipe16(c: &mut Criterion) {
    let pictures = pictures();
    let archive = pack_ipe16(&pictures);

    let mut group = c.benchmark_group("16-bit archive");
    group.throughput(Throughput::Bytes(
        (pictures.len() * WIDTH as usize * HEIGHT as usize) as u64,
    ));
    group.bench_function("pack", |b| b.iter(|| pack_ipe16(black_box(&pictures))));
    group.bench_function("unpack", |b| {
        let mut decoder = GifLzwDecoder::new();
        b.iter(|| {
            let archive = Ipe16Archive::from_bytes(black_box(archive.clone())).unwrap();
            for entry in archive.entries() {
                archive.read_picture(entry, &mut decoder).unwrap();
            }
        })
    });
}

fn bench_ipe32(c: &mut Criterion) {
    let pictures = pictures();
    let archive = pack_ipe32(&pictures);

    let mut group = c.benchmark_group("32-bit archive");
    group.throughput(Throughput::Bytes(
        (pictures.len() * WIDTH as usize * HEIGHT as usize) as u64,
    ));
    group.bench_function("pack", |b| b.iter(|| pack_ipe32(black_box(&pictures))));
    group.bench_function("unpack", |b| {
        let mut decoder = HashLzwDecoder::new();
        b.iter(|| {
            let archive = Ipe32Archive::from_bytes(black_box(archive.clone())).unwrap();
            for entry in archive.entries() {
                archive.read_picture(entry, &mut decoder).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_ipe16, bench_ipe32);
criterion_main!(benches);
