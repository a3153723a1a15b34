//! Annotated debug output.
//!
//! Draws the chosen bounding box, a crosshair through its centre, any
//! rejected candidates and a short `x:.. y:.. c:..` caption onto a copy of
//! the background. Nothing here affects the located result.

use crate::image::RasterImage;
use crate::locator::Localization;
use crate::util::{NotchMatchError, NotchMatchResult};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

const CHOSEN: Rgb<u8> = Rgb([255, 0, 0]);
const REJECTED: Rgb<u8> = Rgb([0, 96, 255]);
const CROSSHAIR: Rgb<u8> = Rgb([0, 255, 0]);

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;
const TEXT_SCALE: u32 = 2;

/// 3x5 bitmap rows, most significant of the low three bits on the left.
///
/// The caption only needs digits and a few separators, so a tiny built-in
/// font keeps font files and a rasterizer out of the dependency tree.
fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        'x' => [0b000, 0b101, 0b010, 0b101, 0b000],
        'y' => [0b000, 0b101, 0b111, 0b001, 0b111],
        'c' => [0b000, 0b111, 0b100, 0b100, 0b111],
        ' ' => [0; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

fn draw_caption(canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
    let scale = TEXT_SCALE as i32;
    let advance = (GLYPH_WIDTH as i32 + 1) * scale;
    let mut pen_x = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row_idx, &bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits >> (GLYPH_WIDTH - 1 - col) & 1 == 0 {
                        continue;
                    }
                    let cell = Rect::at(pen_x + col as i32 * scale, y + row_idx as i32 * scale)
                        .of_size(TEXT_SCALE, TEXT_SCALE);
                    draw_filled_rect_mut(canvas, cell, color);
                }
            }
        }
        pen_x += advance;
    }
}

fn draw_box(canvas: &mut RgbImage, x: usize, y: usize, w: usize, h: usize, color: Rgb<u8>) {
    let outer = Rect::at(x as i32, y as i32).of_size(w as u32, h as u32);
    draw_hollow_rect_mut(canvas, outer, color);
    if w > 2 && h > 2 {
        let inner = Rect::at(x as i32 + 1, y as i32 + 1).of_size(w as u32 - 2, h as u32 - 2);
        draw_hollow_rect_mut(canvas, inner, color);
    }
}

/// Renders the annotated background.
pub fn render_diagnostics(background: &RasterImage, loc: &Localization) -> RgbImage {
    let mut canvas = background.as_dynamic().to_rgb8();
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let (piece_width, piece_height) = loc.piece_size;

    for cand in loc.candidates.iter().filter(|c| **c != loc.chosen) {
        let rect = Rect::at(cand.x as i32, cand.y as i32)
            .of_size(piece_width as u32, piece_height as u32);
        draw_hollow_rect_mut(&mut canvas, rect, REJECTED);
    }

    draw_box(
        &mut canvas,
        loc.chosen.x,
        loc.chosen.y,
        piece_width,
        piece_height,
        CHOSEN,
    );

    let cx = loc.result.x as f32;
    let cy = loc.result.y as f32;
    draw_line_segment_mut(&mut canvas, (cx, 0.0), (cx, height - 1.0), CROSSHAIR);
    draw_line_segment_mut(&mut canvas, (0.0, cy), (width - 1.0, cy), CROSSHAIR);

    let line_height = (GLYPH_HEIGHT as i32 + 2) * TEXT_SCALE as i32;
    draw_caption(
        &mut canvas,
        &format!("x:{} y:{}", loc.result.x, loc.result.y),
        4,
        4,
        CROSSHAIR,
    );
    draw_caption(
        &mut canvas,
        &format!("c:{:.2}", loc.result.confidence),
        4,
        4 + line_height,
        CROSSHAIR,
    );

    canvas
}

/// Renders the annotated background and writes it as PNG to `path`.
pub fn write_diagnostics(
    background: &RasterImage,
    loc: &Localization,
    path: &Path,
) -> NotchMatchResult<()> {
    render_diagnostics(background, loc)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| NotchMatchError::DiagnosticsIo {
            reason: format!("{}: {err}", path.display()),
        })
}
