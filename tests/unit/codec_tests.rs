// Byte pipeline tests: decode -> watermark -> encode

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use watermarker::codec::{
    decode_image, detect_format, watermark_image, DecodeLimits, EncoderQuality, ImageOptions,
    OutputFormat,
};
use watermarker::WatermarkError;

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

fn gray(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
}

#[test]
fn test_every_format_roundtrips_through_watermarking() {
    let source = gray(240, 160);
    for (image_format, format) in [
        (ImageFormat::Png, OutputFormat::Png),
        (ImageFormat::Jpeg, OutputFormat::Jpeg),
        (ImageFormat::Tiff, OutputFormat::Tiff),
        (ImageFormat::Bmp, OutputFormat::Bmp),
    ] {
        let data = encode(&source, image_format);
        let encoded = watermark_image(&data, "Copy", None, &ImageOptions::default()).unwrap();

        assert_eq!(encoded.format, format);
        assert_eq!(detect_format(&encoded.data), Some(format));
        let out = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!((out.width(), out.height()), (240, 160));
    }
}

#[test]
fn test_lossless_output_has_exact_blend_values() {
    let data = encode(&gray(300, 200), ImageFormat::Png);
    let encoded = watermark_image(&data, "Exact", Some(OutputFormat::Png), &ImageOptions::default())
        .unwrap();
    let out = image::load_from_memory(&encoded.data).unwrap().to_rgb8();

    let mut values: Vec<u8> = out.pixels().map(|p| p[0]).collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values, vec![107, 167]);
}

#[test]
fn test_transparent_png_is_flattened() {
    let img = RgbaImage::from_pixel(120, 80, Rgba([128, 128, 128, 0]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();

    let rgb = decode_image(buffer.get_ref(), &DecodeLimits::default()).unwrap();
    assert_eq!(rgb.get_pixel(0, 0), &Rgb([128, 128, 128]));
}

#[test]
fn test_jpeg_quality_option() {
    let source = RgbImage::from_fn(256, 256, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
    let data = encode(&source, ImageFormat::Png);

    let low = ImageOptions {
        quality: EncoderQuality::with_quality(20),
        ..Default::default()
    };
    let high = ImageOptions {
        quality: EncoderQuality::with_quality(95),
        ..Default::default()
    };

    let small = watermark_image(&data, "Q", Some(OutputFormat::Jpeg), &low).unwrap();
    let large = watermark_image(&data, "Q", Some(OutputFormat::Jpeg), &high).unwrap();
    assert!(small.data.len() < large.data.len());
}

#[test]
fn test_decode_errors() {
    let err = watermark_image(b"GIF89a....", "x", None, &ImageOptions::default()).unwrap_err();
    assert!(matches!(err, WatermarkError::Decode(_)));

    let options = ImageOptions {
        limits: DecodeLimits {
            max_pixels: 100,
            ..Default::default()
        },
        ..Default::default()
    };
    let data = encode(&gray(20, 20), ImageFormat::Png);
    let err = watermark_image(&data, "x", None, &options).unwrap_err();
    assert!(matches!(err, WatermarkError::ImageTooLarge { .. }));
}

#[test]
fn test_layout_error_surfaces() {
    let data = encode(&gray(4, 4), ImageFormat::Png);
    let text = "much too long for four pixels".repeat(4);
    let err = watermark_image(&data, &text, None, &ImageOptions::default()).unwrap_err();
    assert!(matches!(err, WatermarkError::Layout { width: 4, .. }));
}
