// Media dispatch tests that need no external tools

use image::{Rgb, RgbImage};
use watermarker::config::Config;
use watermarker::media::{MediaError, MediaKind, Watermarker};
use watermarker::OutputFormat;

fn watermarker() -> Watermarker {
    Watermarker::from_config(&Config::default()).unwrap()
}

#[test]
fn test_image_bytes_use_kind_format() {
    let img = RgbImage::from_pixel(200, 120, Rgb([10, 20, 30]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();

    let out = watermarker()
        .watermark_bytes(
            &MediaKind::Image(OutputFormat::Tiff),
            buffer.get_ref(),
            "Kind",
        )
        .unwrap();
    assert_eq!(
        watermarker::codec::detect_format(&out),
        Some(OutputFormat::Tiff)
    );
}

#[test]
fn test_file_batch_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    let w = watermarker();

    for (name, format) in [("a.png", image::ImageFormat::Png), ("b.bmp", image::ImageFormat::Bmp)] {
        let path = dir.path().join(name);
        RgbImage::from_pixel(160, 90, Rgb([128, 128, 128]))
            .save_with_format(&path, format)
            .unwrap();
        let output = dir.path().join(format!("marked_{name}"));
        w.watermark_file(&path, &output, "Batch").unwrap();
        assert!(output.metadata().unwrap().len() > 0);
    }
}

#[test]
fn test_corrupt_image_file_is_watermark_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.jpg");
    std::fs::write(&input, b"\xFF\xD8\xFF garbage").unwrap();

    let err = watermarker()
        .watermark_file(&input, &dir.path().join("out.jpg"), "Mark")
        .unwrap_err();
    assert!(matches!(err, MediaError::Watermark(_)));
}

#[test]
fn test_video_with_missing_ffmpeg() {
    let mut config = Config::default();
    config.video.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
    let w = Watermarker::from_config(&config).unwrap();

    let err = w
        .watermark_bytes(&MediaKind::Video("mp4".into()), b"\0\0\0\x18ftypmp42", "Mark")
        .unwrap_err();
    assert!(matches!(err, MediaError::ToolUnavailable { .. }));
}

#[test]
fn test_audio_with_missing_tts() {
    let mut config = Config::default();
    config.audio.tts_program = "/nonexistent/espeak-ng".to_string();
    let w = Watermarker::from_config(&config).unwrap();

    let err = w
        .watermark_bytes(&MediaKind::Audio("wav".into()), b"RIFF\0\0\0\0WAVE", "Mark")
        .unwrap_err();
    assert!(matches!(err, MediaError::ToolUnavailable { .. }));
}

#[cfg(not(feature = "pdf"))]
#[test]
fn test_pdf_needs_feature() {
    let err = watermarker()
        .watermark_bytes(&MediaKind::Pdf, b"%PDF-1.4", "Mark")
        .unwrap_err();
    assert!(matches!(err, MediaError::UnsupportedMedia(_)));
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_enabled_by_default() {
    // Without libpdfium the bind fails; with it the bytes are rejected
    let err = watermarker()
        .watermark_bytes(&MediaKind::Pdf, b"not a pdf", "Mark")
        .unwrap_err();
    assert!(matches!(err, MediaError::Pdf(_)));
}
