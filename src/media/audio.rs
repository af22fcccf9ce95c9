//! Audio watermarking: synthesized speech mixed over the original track.
//!
//! The text is spoken into a WAV by an espeak-ng compatible program, then
//! ffmpeg mixes it over the original with `amix`. The result keeps the
//! original duration and levels (no normalisation); the output container
//! follows the output file extension.

use super::command::ToolCommand;
use super::config::AudioConfig;
use super::error::MediaError;
use crate::watermark::validate_text;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Filter graph mixing input 1 over input 0 for the length of input 0.
pub const MIX_FILTER: &str =
    "[0:a][1:a]amix=inputs=2:duration=first:dropout_transition=0:normalize=0";

/// Speech synthesis reading `text_file` and writing a WAV to `wav_out`.
///
/// The text goes through a file rather than argv so leading dashes are
/// never taken as options.
pub fn speech_command(config: &AudioConfig, text_file: &Path, wav_out: &Path) -> ToolCommand {
    ToolCommand::new(&config.tts_program)
        .arg("-s")
        .arg(config.speech_rate.to_string())
        .arg("-w")
        .arg(wav_out)
        .arg("-f")
        .arg(text_file)
}

/// ffmpeg invocation mixing `speech` over `input`, writing `output`.
pub fn mix_command(config: &AudioConfig, input: &Path, speech: &Path, output: &Path) -> ToolCommand {
    ToolCommand::new(&config.ffmpeg_path)
        .args(["-y", "-hide_banner", "-loglevel", "error"])
        .arg("-i")
        .arg(input)
        .arg("-i")
        .arg(speech)
        .arg("-filter_complex")
        .arg(MIX_FILTER)
        .arg(output)
}

/// Watermark an audio file on disk.
pub fn watermark_audio_file(
    input: &Path,
    output: &Path,
    text: &str,
    config: &AudioConfig,
) -> Result<(), MediaError> {
    validate_text(text)?;

    let workdir = tempfile::tempdir()?;
    let text_file = workdir.path().join("speech.txt");
    let speech = workdir.path().join("speech.wav");

    let mut file = std::fs::File::create(&text_file)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    speech_command(config, &text_file, &speech).run()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        rate = config.speech_rate,
        "Mixing speech over audio"
    );

    mix_command(config, input, &speech, output).run()
}

/// Watermark audio bytes; `extension` selects the container on both sides.
pub fn watermark_audio_bytes(
    data: &[u8],
    extension: &str,
    text: &str,
    config: &AudioConfig,
) -> Result<Vec<u8>, MediaError> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(format!("input.{}", extension));
    let output = dir.path().join(format!("output.{}", extension));

    std::fs::write(&input, data)?;
    watermark_audio_file(&input, &output, text, config)?;
    Ok(std::fs::read(&output)?)
}
