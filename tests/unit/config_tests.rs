// Configuration loading tests

use std::io::Write;
use tempfile::NamedTempFile;
use watermarker::config::Config;
use watermarker::Watermarker;

#[test]
fn test_example_config_loads_and_validates() {
    let yaml = include_str!("../../config.example.yaml");
    let config = Config::from_yaml_with_env(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.output.jpeg_quality, 80);
    assert_eq!(config.video.ffmpeg_path, "ffmpeg");
}

#[test]
fn test_watermarker_from_config_with_missing_font_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "watermark:\n  font_path: /nonexistent/Font.ttf").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert!(Watermarker::from_config(&config).is_err());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = Config::from_yaml_with_env("output:\n  jpeg_quality: 70\n  progressive: true\n")
        .unwrap();
    assert_eq!(config.output.jpeg_quality, 70);
}

#[test]
fn test_config_serializes_back() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed = Config::from_yaml_with_env(&yaml).unwrap();
    assert_eq!(parsed, config);
}
