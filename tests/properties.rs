//! Randomized checks of the locator's output guarantees.

use image::{DynamicImage, GrayImage, Luma};
use notchmatch::{
    EdgeMap, ErrorKind, Locator, LocatorConfig, OwnedImage, RasterImage, SelectionStrategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_blob_scene(rng: &mut StdRng, width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([30]));
    for _ in 0..rng.random_range(3..8) {
        let w = rng.random_range(4..width / 3);
        let h = rng.random_range(4..height / 3);
        let x0 = rng.random_range(0..width - w);
        let y0 = rng.random_range(0..height - h);
        let v = rng.random_range(150..=255u8);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Luma([v]));
            }
        }
    }
    img
}

#[test]
fn results_respect_output_guarantees() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let strategies = [
        SelectionStrategy::LeftmostIsOrigin,
        SelectionStrategy::HighestScore,
        SelectionStrategy::GeometricOffset { origin_x: 3 },
    ];

    for case in 0..24 {
        let (bg_w, bg_h) = (rng.random_range(60..110), rng.random_range(40..70));
        let background = random_blob_scene(&mut rng, bg_w, bg_h);
        let (pw, ph) = (rng.random_range(8..20), rng.random_range(8..20));
        let px = rng.random_range(0..bg_w - pw);
        let py = rng.random_range(0..bg_h - ph);
        let piece = image::imageops::crop_imm(&background, px, py, pw, ph).to_image();

        let background = RasterImage::new(DynamicImage::ImageLuma8(background)).unwrap();
        let piece = RasterImage::new(DynamicImage::ImageLuma8(piece)).unwrap();
        let strategy = strategies[case % strategies.len()];
        let locator = Locator::new(LocatorConfig::default().with_strategy(strategy));

        match locator.locate_rasters(&background, &piece) {
            Ok(loc) => {
                let r = loc.result;
                assert!(r.x < bg_w as usize, "case {case}: x={} out of range", r.x);
                assert!(r.y < bg_h as usize, "case {case}: y={} out of range", r.y);
                assert_eq!(r.distance_from_bottom + r.y, bg_h as usize);
                assert!((-1.0..=1.0).contains(&r.confidence));
                let (_, _, x1, y1) = loc.bounding_box();
                assert!(x1 <= bg_w as usize && y1 <= bg_h as usize);

                let again = locator.locate_rasters(&background, &piece).unwrap();
                assert_eq!(again, loc);
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::NoMatch, "case {case}: {err}"),
        }
    }
}

fn random_pattern(rng: &mut StdRng, size: usize) -> Vec<u8> {
    loop {
        let data: Vec<u8> = (0..size * size)
            .map(|_| if rng.random_bool(0.3) { 255 } else { 0 })
            .collect();
        let edges = data.iter().filter(|&&v| v != 0).count();
        if edges > 0 && edges < data.len() {
            return data;
        }
    }
}

#[test]
fn right_of_two_identical_patterns_always_wins() {
    let mut rng = StdRng::seed_from_u64(42);
    let size = 10usize;
    let (bg_w, bg_h) = (160usize, 50usize);

    for _ in 0..16 {
        let pattern = random_pattern(&mut rng, size);
        let x1 = rng.random_range(0..40);
        let x2 = rng.random_range(x1 + size + 25..bg_w - size);
        let y1 = rng.random_range(0..bg_h - size);
        let y2 = rng.random_range(0..bg_h - size);

        let mut data = vec![0u8; bg_w * bg_h];
        for &(ox, oy) in &[(x1, y1), (x2, y2)] {
            for y in 0..size {
                let row = (oy + y) * bg_w + ox;
                data[row..row + size].copy_from_slice(&pattern[y * size..(y + 1) * size]);
            }
        }
        let background = EdgeMap::from_owned(OwnedImage::new(data, bg_w, bg_h).unwrap());
        let piece = EdgeMap::from_owned(OwnedImage::new(pattern, size, size).unwrap());

        let loc = Locator::default()
            .locate_edge_maps(&background, &piece)
            .unwrap();
        assert_eq!((loc.chosen.x, loc.chosen.y), (x2, y2));
        assert!((loc.result.confidence - 1.0).abs() < 1e-5);
    }
}
