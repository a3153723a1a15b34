#![cfg(feature = "rayon")]

mod common;

use common::{piece_png, scene_png};
use notchmatch::lowlevel::{score_surface_par, Kernel, ScanParams, TemplatePlan, ZnccScalar};
use notchmatch::{Locator, LocatorConfig, OwnedImage};

#[test]
fn parallel_locate_matches_sequential() {
    let sequential = Locator::default()
        .locate_detailed(&scene_png(), &piece_png())
        .unwrap();
    let cfg = LocatorConfig {
        parallel: true,
        ..LocatorConfig::default()
    };
    let parallel = Locator::new(cfg)
        .locate_detailed(&scene_png(), &piece_png())
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn parallel_surface_is_bitwise_identical() {
    let bg: Vec<u8> = (0..64 * 40)
        .map(|i| if (i * 7 + i / 64) % 5 == 0 { 255 } else { 0 })
        .collect();
    let background = OwnedImage::new(bg, 64, 40).unwrap();
    let tpl: Vec<u8> = (0..9 * 7).map(|i| if i % 4 == 0 { 255 } else { 0 }).collect();
    let template = OwnedImage::new(tpl, 9, 7).unwrap();
    let plan = TemplatePlan::from_view(template.view()).unwrap();
    let params = ScanParams::default();

    let seq = ZnccScalar::score_surface(background.view(), &plan, params).unwrap();
    let par = score_surface_par::<ZnccScalar>(background.view(), &plan, params).unwrap();
    assert_eq!(seq.width(), par.width());
    for (a, b) in seq.as_slice().iter().zip(par.as_slice()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
