//! Command-line interface

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use damage::{BrushSize, DEFAULT_BRUSH_SIZE};
use qrlab_config::{
    ContrastAdvice, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_PAYLOAD, DEFAULT_PIXEL_SIZE,
    SetOutcome, SettingUpdate, SettingsModel,
};
use qrlab_render::QrCodeRenderer;

use crate::config::QrLabConfig;
use crate::session::QrLabSession;

#[derive(Debug, Parser)]
#[command(name = "qrlab", version, about = "Explore QR code capacity and damage tolerance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a symbol to PNG and print its capacity estimate
    Render {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Output path (defaults to qrcode-<ms>.png in QRLAB_EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the capacity estimate and encoding breakdown
    Estimate {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Apply random damage and print the scannability verdict
    Damage {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Target damage percentage
        #[arg(long, default_value_t = 5.0)]
        percent: f64,
        /// Brush size 1-5
        #[arg(long, default_value_t = DEFAULT_BRUSH_SIZE)]
        brush: u8,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Write the damaged symbol to this PNG
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the project document for the given settings, or load one
    ///
    /// With `--load`, the settings arguments form the base that fields in
    /// the file override.
    Project {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Project file to load
        #[arg(long)]
        load: Option<PathBuf>,
    },
}

/// QR settings shared by all subcommands
#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// Text or URL to encode
    #[arg(long, default_value = DEFAULT_PAYLOAD)]
    pub payload: String,
    /// Pixel size (clamped to 100-1000)
    #[arg(long, default_value_t = i64::from(DEFAULT_PIXEL_SIZE), allow_negative_numbers = true)]
    pub size: i64,
    /// Error correction level: L, M, Q or H
    #[arg(long, default_value = "M")]
    pub ec: String,
    /// Foreground color
    #[arg(long, default_value_t = DEFAULT_FOREGROUND.to_string())]
    pub fg: String,
    /// Background color
    #[arg(long, default_value_t = DEFAULT_BACKGROUND.to_string())]
    pub bg: String,
}

impl SettingsArgs {
    fn updates(&self) -> Vec<SettingUpdate> {
        vec![
            SettingUpdate::Payload(self.payload.clone()),
            SettingUpdate::PixelSize(self.size),
            SettingUpdate::ErrorCorrection(self.ec.clone()),
            SettingUpdate::ForegroundColor(self.fg.clone()),
            SettingUpdate::BackgroundColor(self.bg.clone()),
        ]
    }

    /// Settings model with every argument applied
    fn model(&self) -> SettingsModel {
        let mut model = SettingsModel::new();
        for update in self.updates() {
            report_outcome(&model.set(update));
        }
        model
    }
}

fn report_outcome(outcome: &SetOutcome) {
    match outcome {
        SetOutcome::Applied => {}
        SetOutcome::Clamped(reason) => warn!("{}", reason),
        SetOutcome::Rejected(reason) => warn!("Ignored: {}", reason),
    }
}

fn rendered_session(settings: &SettingsArgs) -> Result<QrLabSession<QrCodeRenderer>> {
    let mut session = QrLabSession::with_settings(QrCodeRenderer::new(), settings.model());
    session.refresh().context("Error generating QR code")?;
    Ok(session)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Load a project file over the settings given on the command line
fn load_project_file(settings: &SettingsArgs, path: &Path) -> Result<QrLabSession<QrCodeRenderer>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut session = QrLabSession::with_settings(QrCodeRenderer::new(), settings.model());
    let outcomes = session
        .load_project(&json)
        .with_context(|| format!("Invalid project file {}", path.display()))?;
    outcomes.iter().for_each(report_outcome);
    Ok(session)
}

/// Run a parsed command
pub fn run(cli: Cli, config: &QrLabConfig) -> Result<()> {
    match cli.command {
        Command::Render { settings, out } => {
            let mut session = rendered_session(&settings)?;
            let artifact = session.export()?;
            let path = out.unwrap_or_else(|| config.export_dir.join(&artifact.filename));
            write_file(&path, &artifact.bytes)?;

            let capacity = session.capacity();
            println!("{}", path.display());
            println!(
                "Version {} ({}x{} modules), capacity {} bytes{}",
                capacity.version,
                capacity.module_dimension,
                capacity.module_dimension,
                capacity.byte_capacity,
                if capacity.extrapolated { " (extrapolated)" } else { "" }
            );
        }
        Command::Estimate { settings, json } => {
            let session = QrLabSession::with_settings(QrCodeRenderer::new(), settings.model());
            let capacity = session.capacity();
            let breakdown = session.encoding_breakdown();

            if json {
                let value = serde_json::json!({
                    "capacity": capacity,
                    "encoding": breakdown,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                let level = session.settings().error_correction;
                println!(
                    "Payload: {} characters, {} bytes, {} bits",
                    breakdown.char_count, breakdown.byte_count, breakdown.bit_count
                );
                println!(
                    "EC {}: {}% recovery, {}% data",
                    level.label(),
                    breakdown.ec_percent,
                    breakdown.data_percent
                );
                println!(
                    "Version {} ({}x{} modules), capacity {} bytes{}",
                    capacity.version,
                    capacity.module_dimension,
                    capacity.module_dimension,
                    capacity.byte_capacity,
                    if capacity.extrapolated { " (extrapolated)" } else { "" }
                );
                println!("Estimated modules: {}", breakdown.estimated_modules);
                println!("{}", breakdown.binary_preview);
                if session.contrast_advice() != ContrastAdvice::Good {
                    warn!("Low contrast between foreground and background colors");
                }
            }
        }
        Command::Damage {
            settings,
            percent,
            brush,
            seed,
            out,
            json,
        } => {
            let brush = BrushSize::new(brush)?;
            let mut session = rendered_session(&settings)?;
            session.set_brush_size(brush);

            let mut rng = StdRng::seed_from_u64(seed);
            let report = session.add_random_damage(percent, &mut rng);
            let estimate = session.damage_estimate();

            if json {
                let value = serde_json::json!({
                    "report": report,
                    "estimate": estimate,
                    "verdict_label": estimate.verdict.label(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "{} marks added ({} requested) with {} brush",
                    report.added, report.requested, brush
                );
                println!(
                    "Damage: {} at EC {}: {}",
                    estimate.display_percentage(),
                    session.settings().error_correction.label(),
                    estimate.verdict
                );
            }

            if let Some(path) = out {
                let Some(image) = session.damage_overlay(None) else {
                    bail!("No QR code to export");
                };
                image
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
        }
        Command::Project { settings, load } => match load {
            Some(path) => {
                let session = load_project_file(&settings, &path)?;
                println!("{}", serde_json::to_string_pretty(session.settings())?);
            }
            None => {
                let mut session = QrLabSession::with_settings(QrCodeRenderer::new(), settings.model());
                println!("{}", session.serialize_project()?);
            }
        },
    }
    Ok(())
}
