use anyhow::{bail, Context};
use clap::Parser;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use watermarker::config::Config;
use watermarker::logging::{init_subscriber, LoggingConfig};
use watermarker::media::{default_output_path, MediaKind, Watermarker};
use watermarker::OutputFormat;

/// Watermarker - stamp text onto images, PDFs, video and audio
#[derive(Parser, Debug)]
#[command(name = "watermarker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Watermark text
    #[arg(short, long, required_unless_present = "check_config")]
    text: Option<String>,

    /// Output file, or output directory when several inputs are given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output image format (jpg, png, tiff, bmp); images only
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Log as JSON regardless of configuration
    #[arg(long)]
    json_logs: bool,

    /// Validate configuration and exit
    #[arg(long)]
    check_config: bool,

    /// Files to watermark
    #[arg(required_unless_present = "check_config")]
    inputs: Vec<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    Ok(config)
}

/// Where each input is written.
///
/// Fails when `-f` contradicts an explicit image output name, or when two
/// inputs would land on the same output file.
fn plan_outputs(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: Option<OutputFormat>,
) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let jobs: Vec<(PathBuf, PathBuf)> = match (inputs, output) {
        ([input], Some(output)) => {
            if let (Some(format), Ok(MediaKind::Image(named))) =
                (format, MediaKind::from_path(output))
            {
                if named != format {
                    bail!(
                        "Output {} is {} but --format asks for {}",
                        output.display(),
                        named,
                        format
                    );
                }
            }
            vec![(input.clone(), output.to_path_buf())]
        }
        (inputs, Some(dir)) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            inputs
                .iter()
                .map(|input| {
                    let name = default_output_path(input, format);
                    let file_name = name.file_name().map(PathBuf::from).unwrap_or(name);
                    (input.clone(), dir.join(file_name))
                })
                .collect()
        }
        (inputs, None) => inputs
            .iter()
            .map(|input| (input.clone(), default_output_path(input, format)))
            .collect(),
    };

    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    for (input, output) in &jobs {
        if let Some(first) = seen.insert(output.as_path(), input.as_path()) {
            bail!(
                "{} and {} would both be written to {}",
                first.display(),
                input.display(),
                output.display()
            );
        }
    }

    Ok(jobs)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the file, so report on stderr directly
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };

    let logging = LoggingConfig {
        json: config.logging.json || args.json_logs,
        ..config.logging.clone()
    };
    if let Err(e) = init_subscriber(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if args.check_config {
        tracing::info!(
            config_file = ?args.config,
            font = ?config.watermark.font_path,
            jpeg_quality = config.output.jpeg_quality,
            "Configuration is valid"
        );
        return Ok(());
    }

    let Some(text) = args.text.as_deref() else {
        bail!("--text is required");
    };

    let watermarker = Watermarker::from_config(&config).context("Failed to set up watermarker")?;
    let jobs = plan_outputs(&args.inputs, args.output.as_deref(), args.format)?;

    tracing::info!(
        inputs = jobs.len(),
        text_len = text.chars().count(),
        "Starting watermarking"
    );

    let failures = jobs
        .par_iter()
        .filter(|(input, output)| {
            match watermarker.watermark_file_as(input, output, text, args.format) {
                Ok(_) => false,
                Err(e) => {
                    tracing::error!(
                        input = %input.display(),
                        output = %output.display(),
                        error = %e,
                        "Failed to watermark file"
                    );
                    true
                }
            }
        })
        .count();

    if failures > 0 {
        bail!("{} of {} inputs failed", failures, jobs.len());
    }

    tracing::info!(files = jobs.len(), "Watermarking complete");
    Ok(())
}
