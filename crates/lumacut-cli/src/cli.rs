// crates/lumacut-cli/src/cli.rs
//
// Argument definitions (clap derive).
//
//   lumacut presets --category vintage
//   lumacut css --preset Noir --invert 10
//   lumacut apply -i shot.png -o graded.png --preset "Golden Hour" --rotate 90
//   lumacut suggest --action enhance --frame shot.png
//   echo '{"action":"enhance","frameBase64":"..."}' | lumacut gateway --kind video
//   lumacut text --transform title_case --stats -i notes.txt
//   lumacut trim --duration 187 --start 12.5 --end 90 --speed 1.5

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use lumacut_core::filter::{FieldUpdate, FilterField, FilterValue};
use lumacut_core::presets::{self, Category};
use lumacut_core::render::ImageExtras;
use lumacut_core::suggestion::ActionKind;
use lumacut_core::transform::TextTransform;
use lumacut_suggest::GatewayKind;

#[derive(Parser, Debug)]
#[command(
    name = "lumacut",
    version,
    about = "Filter presets, render strings and AI filter suggestions for media editors"
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to read instead of the default location.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List presets, optionally limited to one category.
    Presets {
        /// Category tag, e.g. vintage, cinematic, social.
        #[arg(short, long)]
        category: Option<Category>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List preset categories with their preset counts.
    Categories,

    /// Print the CSS filter string for a preset and/or explicit values.
    Css {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Apply a filter and orientation to a PNG frame.
    Apply {
        #[arg(short, long, value_name = "IN.png")]
        input: PathBuf,

        #[arg(short, long, value_name = "OUT.png")]
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Clockwise rotation in degrees, rounded to a quarter turn.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotate: i32,

        #[arg(long)]
        flip_h: bool,

        #[arg(long)]
        flip_v: bool,
    },

    /// Ask the suggestion endpoint for filter values and print the result.
    Suggest {
        /// enhance, color_grade, style_transfer, scene_analysis, auto_correct.
        #[arg(short, long)]
        action: ActionKind,

        /// Look to aim for (color_grade, style_transfer).
        #[arg(short, long)]
        prompt: Option<String>,

        /// Still frame to analyse (PNG or JPEG).
        #[arg(short, long, value_name = "FILE")]
        frame: Option<PathBuf>,

        /// Preset to start from before the suggestion is merged.
        #[arg(long)]
        preset: Option<String>,

        /// Suggestion endpoint URL.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Request timeout in seconds.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Transform text from a file or stdin and print it.
    Text {
        /// uppercase, lowercase, title_case, sentence_case, reverse, trim_whitespace.
        #[arg(short, long)]
        transform: Option<TextTransform>,

        /// Read this file instead of stdin.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Also print character, word and line counts (to stderr).
        #[arg(long)]
        stats: bool,
    },

    /// Show trim markers and playback length for an audio or video clip.
    Trim {
        /// Media length in seconds.
        #[arg(long, value_name = "SECS")]
        duration: f64,

        #[arg(long, value_name = "SECS")]
        start: Option<f64>,

        #[arg(long, value_name = "SECS")]
        end: Option<f64>,

        /// Playback rate, 0.25 to 4.
        #[arg(long, default_value_t = 1.0)]
        speed: f32,
    },

    /// Answer one suggestion request: request JSON on stdin, response JSON on stdout.
    Gateway {
        /// Prompt wording: image or video.
        #[arg(long, default_value = "image")]
        kind: GatewayKind,

        /// HTTP method of the incoming request (OPTIONS answers a preflight).
        #[arg(long, default_value = "POST")]
        method: String,

        /// Chat-completions URL of the upstream model.
        #[arg(long, value_name = "URL")]
        upstream: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
}

/// Filter flags shared by `css` and `apply`. Fields override the preset.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Start from this preset (case-insensitive name).
    #[arg(long)]
    pub preset: Option<String>,

    #[arg(long, value_name = "0-200")]
    pub brightness: Option<f32>,
    #[arg(long, value_name = "0-200")]
    pub contrast: Option<f32>,
    #[arg(long, value_name = "0-200")]
    pub saturation: Option<f32>,
    #[arg(long, value_name = "0-360")]
    pub hue: Option<f32>,
    #[arg(long, value_name = "0-20")]
    pub blur: Option<f32>,
    #[arg(long, value_name = "0-100")]
    pub sepia: Option<f32>,
    #[arg(long, value_name = "0-100")]
    pub grayscale: Option<f32>,

    /// Image-only: invert percentage.
    #[arg(long, value_name = "0-100")]
    pub invert: Option<f32>,
    /// Image-only: opacity percentage.
    #[arg(long, value_name = "0-100")]
    pub opacity: Option<f32>,
}

impl FilterArgs {
    fn field(&self, field: FilterField) -> Option<f32> {
        match field {
            FilterField::Brightness => self.brightness,
            FilterField::Contrast   => self.contrast,
            FilterField::Saturation => self.saturation,
            FilterField::Hue        => self.hue,
            FilterField::Blur       => self.blur,
            FilterField::Sepia      => self.sepia,
            FilterField::Grayscale  => self.grayscale,
        }
    }

    /// Preset (or identity) with explicit fields applied, clamped to slider ranges.
    pub fn to_value(&self) -> Result<FilterValue> {
        let mut value = match &self.preset {
            Some(name) => presets::find(name)
                .map(|p| p.value)
                .ok_or_else(|| anyhow!("no preset named \"{name}\" (see `lumacut presets`)"))?,
            None => FilterValue::IDENTITY,
        };
        for field in FilterField::ALL {
            if let Some(v) = self.field(field) {
                value.set(FieldUpdate::new(field, v).clamped());
            }
        }
        Ok(value)
    }

    pub fn extras(&self) -> ImageExtras {
        ImageExtras {
            invert:  self.invert.map_or(ImageExtras::IDENTITY.invert, |v| v.clamp(0.0, 100.0)),
            opacity: self.opacity.map_or(ImageExtras::IDENTITY.opacity, |v| v.clamp(0.0, 100.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fields_override_preset() {
        let args = FilterArgs {
            preset:   Some("noir".into()),
            contrast: Some(999.0),
            ..Default::default()
        };
        let v = args.to_value().unwrap();
        let noir = presets::find("Noir").unwrap().value;
        assert_eq!(v.brightness, noir.brightness);
        assert_eq!(v.contrast, FilterField::Contrast.range().1);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = FilterArgs { preset: Some("Nope".into()), ..Default::default() };
        assert!(args.to_value().is_err());
    }

    #[test]
    fn parses_apply_flags() {
        let cli = Cli::try_parse_from([
            "lumacut", "apply", "-i", "a.png", "-o", "b.png",
            "--preset", "Noir", "--rotate", "-90", "--flip-h",
        ])
        .unwrap();
        match cli.command {
            Command::Apply { rotate, flip_h, flip_v, filter, .. } => {
                assert_eq!(rotate, -90);
                assert!(flip_h);
                assert!(!flip_v);
                assert_eq!(filter.preset.as_deref(), Some("Noir"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_suggest_action_tag() {
        let cli = Cli::try_parse_from(["lumacut", "suggest", "--action", "color_grade", "-p", "teal"]).unwrap();
        assert!(matches!(cli.command, Command::Suggest { action: ActionKind::ColorGrade, .. }));
    }

    #[test]
    fn parses_text_transform_tag() {
        let cli = Cli::try_parse_from(["lumacut", "text", "--transform", "title_case", "--stats"]).unwrap();
        match cli.command {
            Command::Text { transform, input, stats } => {
                assert_eq!(transform, Some(TextTransform::TitleCase));
                assert!(input.is_none());
                assert!(stats);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Cli::try_parse_from(["lumacut", "text", "-t", "shout"]).is_err());
    }

    #[test]
    fn parses_trim_flags() {
        let cli = Cli::try_parse_from(["lumacut", "trim", "--duration", "187", "--end", "90", "--speed", "1.5"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Trim { start: None, end: Some(e), speed, .. } if e == 90.0 && speed == 1.5
        ));
    }
}
