#![deny(unsafe_code)]
//! CLI binary for the tint-engine color-scale generator.
//!
//! Subcommands:
//! - `generate` — expand a base color into a full scale, print a table or JSON
//! - `list` — print preset base colors and their swatches

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::process;
use tint_engine_core::{generate, ColorFamily, ContrastTargets, ScaleOptions, Srgb};

#[derive(Parser)]
#[command(name = "tint-engine", about = "OKLCH color scale generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a color scale from a base color.
    Generate {
        /// Base color as a hex string (e.g. "#3355cc").
        #[arg(short, long, conflicts_with_all = ["preset", "lightness", "hue"])]
        base: Option<String>,

        /// Preset base color name (see `list`).
        #[arg(short, long, conflicts_with_all = ["lightness", "hue"])]
        preset: Option<String>,

        /// Base lightness in [0, 1], used together with --hue.
        #[arg(long, default_value_t = 0.6)]
        lightness: f64,

        /// Base hue in degrees [0, 360), used together with --lightness.
        #[arg(long, default_value_t = 260.0)]
        hue: f64,

        /// Chroma shared by every step.
        #[arg(short, long, default_value_t = 0.15)]
        chroma: f64,

        /// Number of steps in the scale.
        #[arg(short, long, default_value_t = 18)]
        steps: usize,

        /// Per-step contrast targets as a JSON object, e.g. '{"0": 4.5}'.
        #[arg(short, long, default_value = "{}")]
        targets: String,

        /// Reference color for contrast, as a hex string.
        #[arg(short, long, default_value = "#ffffff")]
        reference: String,
    },
    /// List preset base colors.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = ColorFamily::preset_names();
            if cli.json {
                let entries: Vec<serde_json::Value> = presets
                    .iter()
                    .map(|name| {
                        let family = ColorFamily::from_preset(name)?;
                        let swatch = family.swatch(0.15);
                        Ok(serde_json::json!({
                            "name": name,
                            "l": family.l,
                            "h": family.h,
                            "hex": swatch.hex,
                        }))
                    })
                    .collect::<Result<_, CliError>>()?;
                let info = serde_json::json!({ "presets": entries });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    let family = ColorFamily::from_preset(name)?;
                    let swatch = family.swatch(0.15);
                    println!("  {name:<8} {}", swatch.hex);
                }
            }
        }
        Command::Generate {
            base,
            preset,
            lightness,
            hue,
            chroma,
            steps,
            targets,
            reference,
        } => {
            let targets: ContrastTargets = serde_json::from_str(&targets)
                .map_err(|e| CliError::Input(format!("invalid --targets JSON: {e}")))?;
            let reference = Srgb::from_hex(&reference)?;

            let family = match (base, preset) {
                (Some(hex), _) => ColorFamily::from_hex("base", &hex)?,
                (None, Some(name)) => ColorFamily::from_preset(&name)?,
                (None, None) => ColorFamily::new("base", lightness, hue),
            };

            let mut options = ScaleOptions::new(chroma, steps);
            options.targets = targets;
            options.reference = reference;
            let scale = generate(&family, &options)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&scale)?);
            } else {
                println!("{} steps, chroma {chroma}, hue {}", scale.len(), family.h);
                for step in &scale {
                    let marker = if step.contrast_forced { " *" } else { "" };
                    println!(
                        "  {:>4}  {}  {:<26} {:>5.2}:1{}",
                        step.name, step.hex, step.css, step.contrast, marker
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
