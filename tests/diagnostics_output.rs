mod common;

use common::{piece_png, scene_png, SCENE_HEIGHT, SCENE_WIDTH};
use notchmatch::{Locator, LocatorConfig};

#[test]
fn enabled_diagnostics_write_annotated_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("annotated.png");
    let cfg = LocatorConfig::default().with_diagnostics(&out);

    let result = Locator::new(cfg).locate(&scene_png(), &piece_png()).unwrap();

    let written = image::open(&out).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (SCENE_WIDTH, SCENE_HEIGHT));
    // The crosshair passes through the reported centre.
    let px = written.get_pixel(result.x as u32, result.y as u32);
    assert!(px[1] > px[0] && px[1] > px[2], "centre pixel is {px:?}");
}

#[test]
fn disabled_diagnostics_leave_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("annotated.png");
    let cfg = LocatorConfig {
        diagnostics_path: out.clone(),
        ..LocatorConfig::default()
    };

    Locator::new(cfg).locate(&scene_png(), &piece_png()).unwrap();
    assert!(!out.exists());
}

#[test]
fn unwritable_diagnostics_path_does_not_fail_the_call() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("annotated.png");
    let cfg = LocatorConfig::default().with_diagnostics(&out);

    let with_failure = Locator::new(cfg).locate(&scene_png(), &piece_png()).unwrap();
    let plain = Locator::default().locate(&scene_png(), &piece_png()).unwrap();
    assert_eq!(with_failure, plain);
    assert!(!out.exists());
}
