//! `tonematch`: derive a develop preset that matches a source image to a
//! reference image.

mod config;
mod image_loader;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use config::RunConfig;
use image_loader::load_image;
use tonematch_core::{MatchRequest, PresetSerializer, analyze};

#[derive(Debug, Parser)]
#[command(name = "tonematch", version)]
#[command(about = "Match a source photo's tone and color to a reference and export an XMP preset")]
struct Cli {
    /// Image whose look should be reproduced
    #[arg(short, long, required_unless_present = "print_default_config")]
    reference: Option<PathBuf>,

    /// Image the preset will be applied to
    #[arg(short, long, required_unless_present = "print_default_config")]
    source: Option<PathBuf>,

    /// Destination .xmp file
    #[arg(short, long, required_unless_present = "print_default_config")]
    output: Option<PathBuf>,

    /// JSON config file (falls back to $TONEMATCH_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset name, overrides the config
    #[arg(long)]
    name: Option<String>,

    /// Preset group, overrides the config
    #[arg(long)]
    group: Option<String>,

    /// Omit the BOM and xpacket header/footer
    #[arg(long)]
    no_packet: bool,

    /// Also write the raw adjustment set as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print the default configuration as JSON and exit
    #[arg(long, exclusive = true)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.print_default_config {
        println!("{}", serde_json::to_string_pretty(&RunConfig::default())?);
        return Ok(());
    }

    run(&cli)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tonematch={level},tonematch_core={level}").into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (Some(reference), Some(source), Some(output)) = (&cli.reference, &cli.source, &cli.output)
    else {
        anyhow::bail!("--reference, --source and --output are required");
    };

    let mut config =
        RunConfig::resolve(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(name) = &cli.name {
        config.preset.name = name.clone();
    }
    if let Some(group) = &cli.group {
        config.preset.group = group.clone();
    }
    if cli.no_packet {
        config.preset.packet_wrapper = false;
    }

    let request = MatchRequest::new(load(reference, "reference")?, load(source, "source")?);
    let analysis = analyze(&request, &config.analysis)?;

    if let Some(path) = &cli.json {
        let json = serde_json::to_string_pretty(&analysis.adjustments)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote adjustment set");
    }

    let document = PresetSerializer::new(config.preset).render(&analysis.adjustments)?;
    document
        .save(output)
        .with_context(|| format!("failed to write preset to {}", output.display()))?;

    println!(
        "{} ({} warning{})",
        output.display(),
        analysis.warnings.len(),
        if analysis.warnings.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn load(path: &Path, role: &str) -> anyhow::Result<tonematch_core::AnalysisImage> {
    load_image(path).with_context(|| format!("failed to load {role} image {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonematch_core::AdjustmentSet;

    fn write_png(dir: &Path, name: &str, f: impl Fn(u32, u32) -> [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        image::RgbImage::from_fn(32, 32, |x, y| image::Rgb(f(x, y)))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_print_default_config_needs_no_paths() {
        let cli = Cli::try_parse_from(["tonematch", "--print-default-config"]).unwrap();
        assert!(cli.print_default_config);
        assert!(cli.reference.is_none());
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Cli::try_parse_from(["tonematch", "--reference", "a.png"]).is_err());
    }

    #[test]
    fn test_print_default_config_is_exclusive() {
        let parsed = Cli::try_parse_from([
            "tonematch",
            "--print-default-config",
            "--reference",
            "a.png",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from([
            "tonematch", "-r", "a.png", "-s", "b.png", "-o", "c.xmp", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_writes_preset_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let reference = write_png(dir.path(), "ref.png", |x, y| {
            [(x * 8) as u8, (y * 8) as u8, 200]
        });
        let source = write_png(dir.path(), "src.png", |x, _| {
            let v = 40 + (x * 4) as u8;
            [v, v, v]
        });
        let output = dir.path().join("look.xmp");
        let json = dir.path().join("look.json");

        let cli = Cli::try_parse_from([
            "tonematch",
            "-r",
            reference.to_str().unwrap(),
            "-s",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--json",
            json.to_str().unwrap(),
            "--name",
            "Blue Hour",
            "--no-packet",
        ])
        .unwrap();
        run(&cli).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("<x:xmpmeta"));
        assert!(text.contains(">Blue Hour</rdf:li>"));
        assert!(text.contains("crs:UUID=\""));

        let set: AdjustmentSet =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert!(text.contains(&format!(
            "crs:Contrast2012=\"{}{}\"",
            if set.tone.contrast > 0 { "+" } else { "" },
            set.tone.contrast
        )));
    }

    #[test]
    fn test_run_reports_unreadable_reference() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let source = write_png(dir.path(), "src.png", |_, _| [1, 2, 3]);
        let output = dir.path().join("out.xmp");
        let cli = Cli::try_parse_from([
            "tonematch",
            "-r",
            missing.to_str().unwrap(),
            "-s",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("reference image"), "{err:#}");
        assert!(!output.exists());
    }
}
