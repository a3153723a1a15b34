//! Synthetic slider-puzzle scenes shared by the integration tests.

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use std::io::Cursor;

pub const SCENE_WIDTH: u32 = 316;
pub const SCENE_HEIGHT: u32 = 184;
pub const PIECE_SIZE: u32 = 50;
pub const ORIGIN_X: u32 = 10;
pub const NOTCH_X: u32 = 220;
pub const SLOT_Y: u32 = 67;

/// Grey levels of the backdrop (at its left edge) and of the notch shape.
#[derive(Clone, Copy, Debug)]
pub struct Tones {
    pub backdrop: u8,
    pub shape: u8,
}

/// Crisp cutouts, far above the edge thresholds.
pub const HIGH_CONTRAST: Tones = Tones {
    backdrop: 40,
    shape: 230,
};

/// A faint notch: roughly 55-70 grey levels of contrast.
pub const LOW_CONTRAST: Tones = Tones {
    backdrop: 90,
    shape: 160,
};

/// Jigsaw-like silhouette inside a 50x50 cell: a square body with a round
/// tab on the right and a round socket on the left.
pub fn in_notch(x: u32, y: u32) -> bool {
    let (fx, fy) = (x as f32, y as f32);
    let in_body = (7..41).contains(&x) && (8..42).contains(&y);
    let tab = (fx - 41.0).powi(2) + (fy - 25.0).powi(2) <= 36.0;
    let socket = (fx - 7.0).powi(2) + (fy - 25.0).powi(2) <= 20.0;
    (in_body || tab) && !socket
}

/// Smooth horizontal shading that produces no edges on its own.
fn backdrop(base: u8, x: u32) -> u8 {
    base + (x * 20 / SCENE_WIDTH) as u8
}

/// 316x184 background with the notch silhouette at each of `slots`.
pub fn scene_with(slots: &[(u32, u32)]) -> GrayImage {
    scene_toned(slots, HIGH_CONTRAST)
}

pub fn scene_toned(slots: &[(u32, u32)], tones: Tones) -> GrayImage {
    GrayImage::from_fn(SCENE_WIDTH, SCENE_HEIGHT, |x, y| {
        for &(sx, sy) in slots {
            if x >= sx && y >= sy && x < sx + PIECE_SIZE && y < sy + PIECE_SIZE
                && in_notch(x - sx, y - sy)
            {
                return Luma([tones.shape]);
            }
        }
        Luma([backdrop(tones.backdrop, x)])
    })
}

/// The standard scene: resting slot at x=10, notch at x=220.
pub fn scene() -> GrayImage {
    scene_with(&[(ORIGIN_X, SLOT_Y), (NOTCH_X, SLOT_Y)])
}

/// The 50x50 piece template on a flat backdrop.
pub fn piece() -> GrayImage {
    piece_toned(HIGH_CONTRAST)
}

pub fn piece_toned(tones: Tones) -> GrayImage {
    GrayImage::from_fn(PIECE_SIZE, PIECE_SIZE, |x, y| {
        if in_notch(x, y) {
            Luma([tones.shape])
        } else {
            Luma([tones.backdrop])
        }
    })
}

/// The piece padded by `pad` fully transparent pixels on every side.
pub fn padded_rgba_piece(pad: u32) -> RgbaImage {
    let gray = piece();
    let size = PIECE_SIZE + 2 * pad;
    RgbaImage::from_fn(size, size, |x, y| {
        if x < pad || y < pad || x >= pad + PIECE_SIZE || y >= pad + PIECE_SIZE {
            return Rgba([0, 0, 0, 0]);
        }
        let v = gray.get_pixel(x - pad, y - pad)[0];
        Rgba([v, v, v, 255])
    })
}

pub fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

pub fn scene_png() -> Vec<u8> {
    png_bytes(DynamicImage::ImageLuma8(scene()))
}

pub fn piece_png() -> Vec<u8> {
    png_bytes(DynamicImage::ImageLuma8(piece()))
}
