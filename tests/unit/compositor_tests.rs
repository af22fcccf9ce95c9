// Compositor behaviour through the public API

use image::{Rgb, RgbImage};
use rstest::rstest;
use watermarker::watermark::{
    font_metrics_for_width, overlay_text, BlendWeights, Compositor, FontScale, WatermarkError,
};

fn uniform(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

fn checkerboard(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([30, 60, 90])
        } else {
            Rgb([220, 200, 180])
        }
    })
}

#[rstest]
#[case(4500, 81, 25)]
#[case(999, 11, 2)]
#[case(5000, 101, 30)]
#[case(1000, 21, 5)]
#[case(3500, 61, 18)]
fn test_ladder_examples(#[case] width: u32, #[case] tenths: u32, #[case] thickness: u32) {
    let metrics = font_metrics_for_width(width);
    assert_eq!(metrics.scale, FontScale::from_tenths(tenths));
    assert_eq!(metrics.thickness, thickness);
}

#[rstest]
#[case(1, 1)]
#[case(64, 48)]
#[case(640, 480)]
#[case(1280, 720)]
#[case(2100, 300)]
fn test_output_dimensions_match_input(#[case] width: u32, #[case] height: u32) {
    let image = checkerboard(width, height);
    match overlay_text(&image, "Sample") {
        Ok(out) => assert_eq!(out.dimensions(), (width, height)),
        Err(e) => assert!(matches!(e, WatermarkError::Layout { .. }), "{e}"),
    }
}

#[test]
fn test_shrink_never_grows_and_fits() {
    let compositor = Compositor::new().unwrap();
    let text = "Internal use only - do not distribute outside the organisation";
    for width in [300, 640, 1024, 2500, 4200, 6000] {
        let start = font_metrics_for_width(width).scale;
        let spec = compositor.plan(text, width).unwrap();
        assert!(spec.font_scale <= start, "width {width}");
        assert!(spec.text_width <= width, "width {width}");
        let total = 2 * spec.origin_x as u32 + spec.text_width;
        assert!(width - total <= 1, "width {width} not centered");
    }
}

#[test]
fn test_ten_pixel_image_terminates() {
    let image = uniform(10, 10, 50);
    let long = "x".repeat(500);
    let err = overlay_text(&image, &long).unwrap_err();
    assert!(matches!(err, WatermarkError::Layout { width: 10, .. }));
}

#[test]
fn test_repeated_application_keeps_changing() {
    let image = uniform(500, 400, 128);
    let once = overlay_text(&image, "Proof").unwrap();
    let twice = overlay_text(&once, "Proof").unwrap();
    assert_ne!(image, once);
    assert_ne!(once, twice);
    assert_eq!(once.get_pixel(0, 0), &Rgb([167, 167, 167]));
    assert_eq!(twice.get_pixel(0, 0), &Rgb([194, 194, 194]));
}

#[test]
fn test_text_rows_cover_three_bands() {
    let image = uniform(600, 400, 128);
    let out = overlay_text(&image, "Banded").unwrap();

    let rows_with_text: Vec<u32> = (0..400)
        .filter(|&y| (0..600).any(|x| out.get_pixel(x, y)[0] == 107))
        .collect();

    for baseline in [100, 200, 300] {
        assert!(
            rows_with_text.iter().any(|&y| y < baseline && y + 40 > baseline),
            "no text above baseline {baseline}"
        );
    }
    // Nothing in the top strip
    assert!(rows_with_text.iter().all(|&y| y > 40));
}

#[test]
fn test_shared_compositor_across_threads() {
    let compositor = std::sync::Arc::new(Compositor::new().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let compositor = compositor.clone();
            std::thread::spawn(move || {
                let image = uniform(320 + i * 10, 200, 90);
                compositor.overlay_text(&image, "Threaded").unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out.dimensions(), (320 + i as u32 * 10, 200));
    }
}

#[test]
fn test_configured_weights_apply() {
    let weights = BlendWeights {
        alpha: 0.5,
        beta: 0.5,
        gamma: 0.0,
    };
    let compositor = Compositor::new().unwrap().with_weights(weights);
    let out = compositor.overlay_text(&uniform(300, 200, 100), "Half").unwrap();
    // 0.5 * 100 + 0.5 * 255 = 177.5, rounds away from zero
    assert_eq!(out.get_pixel(0, 0), &Rgb([178, 178, 178]));
}
