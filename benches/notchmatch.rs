use criterion::{criterion_group, criterion_main, Criterion};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use notchmatch::lowlevel::{detect_edges, Kernel, ScanParams, TemplatePlan, ZnccScalar};
use notchmatch::{EdgeParams, Locator, RasterImage};
use std::hint::black_box;
use std::io::Cursor;

const WIDTH: u32 = 316;
const HEIGHT: u32 = 184;
const PIECE: u32 = 50;

fn in_shape(x: u32, y: u32) -> bool {
    let (fx, fy) = (x as f32, y as f32);
    let body = (7..41).contains(&x) && (8..42).contains(&y);
    let tab = (fx - 41.0).powi(2) + (fy - 25.0).powi(2) <= 36.0;
    body || tab
}

fn make_scene() -> (GrayImage, GrayImage) {
    let slots = [(10u32, 67u32), (220, 67)];
    let background = GrayImage::from_fn(WIDTH, HEIGHT, |x, y| {
        for &(sx, sy) in &slots {
            if x >= sx && y >= sy && x < sx + PIECE && y < sy + PIECE && in_shape(x - sx, y - sy)
            {
                return Luma([230]);
            }
        }
        Luma([40 + ((x * 13) ^ (y * 7)) as u8 % 8])
    });
    let piece = GrayImage::from_fn(PIECE, PIECE, |x, y| {
        Luma([if in_shape(x, y) { 230 } else { 40 }])
    });
    (background, piece)
}

fn png(img: &GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn bench_locator(c: &mut Criterion) {
    let (background, piece) = make_scene();
    let bg_png = png(&background);
    let piece_png = png(&piece);
    let locator = Locator::default();

    c.bench_function("locate_png", |b| {
        b.iter(|| black_box(locator.locate(&bg_png, &piece_png).unwrap()));
    });

    let bg_raster = RasterImage::new(DynamicImage::ImageLuma8(background.clone())).unwrap();
    let piece_raster = RasterImage::new(DynamicImage::ImageLuma8(piece.clone())).unwrap();
    c.bench_function("locate_decoded", |b| {
        b.iter(|| black_box(locator.locate_rasters(&bg_raster, &piece_raster).unwrap()));
    });

    let bg_edges = detect_edges(&background, EdgeParams::default()).unwrap();
    let piece_edges = detect_edges(&piece, EdgeParams::default()).unwrap();
    c.bench_function("canny_background", |b| {
        b.iter(|| black_box(detect_edges(&background, EdgeParams::default()).unwrap()));
    });

    let plan = TemplatePlan::from_view(piece_edges.view()).unwrap();
    c.bench_function("zncc_scalar_surface", |b| {
        b.iter(|| {
            black_box(
                ZnccScalar::score_surface(bg_edges.view(), &plan, ScanParams::default()).unwrap(),
            )
        });
    });

    #[cfg(feature = "simd")]
    {
        use notchmatch::lowlevel::ZnccSimd;
        c.bench_function("zncc_simd_surface", |b| {
            b.iter(|| {
                black_box(
                    ZnccSimd::score_surface(bg_edges.view(), &plan, ScanParams::default())
                        .unwrap(),
                )
            });
        });
    }

    #[cfg(feature = "rayon")]
    {
        use notchmatch::lowlevel::score_surface_par;
        c.bench_function("zncc_rayon_surface", |b| {
            b.iter(|| {
                black_box(
                    score_surface_par::<ZnccScalar>(
                        bg_edges.view(),
                        &plan,
                        ScanParams::default(),
                    )
                    .unwrap(),
                )
            });
        });
    }
}

criterion_group!(benches, bench_locator);
criterion_main!(benches);
