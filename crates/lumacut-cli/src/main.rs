// crates/lumacut-cli/src/main.rs
//
// `lumacut` binary. Thin shell over lumacut-core and lumacut-suggest: parse
// args, resolve config, run one subcommand, print the result.

mod cli;
mod config;
mod helpers;
mod paths;

use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use lumacut_core::commands::{EditorCommand, EditorSession};
use lumacut_core::media::{self, MediaKind};
use lumacut_core::presets::{self, Category};
use lumacut_core::raster;
use lumacut_core::suggestion::{EncodedImage, SuggestPayload};
use lumacut_core::transform::{Orientation, Rotation, TextTransform};
use lumacut_core::{render, ActionKind};
use lumacut_suggest::gateway::{self, GatewayRequest};
use lumacut_suggest::{apply_outcome, GatewayKind, SuggestClient, SuggestWorker, UreqTransport};

use crate::cli::{Cli, Command, FilterArgs};
use crate::config::{FileConfig, Overrides};
use crate::helpers::png_io::{self, RgbaImage};
use crate::helpers::report::{self, TrimReport};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(paths::config_file);
    let file = FileConfig::load(&config_path)?;
    presets::validate_catalog(presets::list_all())?;

    match cli.command {
        Command::Presets { category, json } => list_presets(category, json)?,
        Command::Categories                 => list_categories(),
        Command::Css { filter }             => print_css(&filter)?,
        Command::Apply { input, output, filter, rotate, flip_h, flip_v } => {
            let orientation = Orientation { rotation: Rotation::from_degrees(rotate), flip_h, flip_v };
            apply_png(&input, &output, &filter, &orientation)?;
        }
        Command::Suggest { action, prompt, frame, preset, endpoint, timeout } => {
            let flags = Overrides { suggest_url: endpoint, timeout_secs: timeout, ..Default::default() };
            let cfg = config::suggest_config(&flags, &file, &config::process_env);
            suggest(cfg, action, prompt, frame.as_deref(), preset.as_deref())?;
        }
        Command::Text { transform, input, stats } => print_text(transform, input.as_deref(), stats)?,
        Command::Trim { duration, start, end, speed } => {
            for line in TrimReport::new(duration, start, end, speed).lines() {
                println!("{line}");
            }
        }
        Command::Gateway { kind, method, upstream, model, timeout } => {
            let flags = Overrides { upstream_url: upstream, model, timeout_secs: timeout, ..Default::default() };
            return serve_gateway(&flags, &file, kind, method);
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ── presets / categories / css ────────────────────────────────────────────────

fn list_presets(category: Option<Category>, json: bool) -> Result<()> {
    let list: Vec<_> = match category {
        Some(c) => presets::by_category(c),
        None    => presets::list_all().iter().collect(),
    };

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &list)?;
        writeln!(out)?;
        return Ok(());
    }
    for p in list {
        writeln!(
            out,
            "{}  {:<20} {:<16} {}",
            p.emoji,
            p.name,
            p.category.display_name(),
            render::to_render_string(&p.value),
        )?;
    }
    Ok(())
}

fn list_categories() {
    for &c in presets::categories() {
        println!("{:<12} {:<16} {}", c.as_str(), c.display_name(), presets::by_category(c).len());
    }
}

fn print_css(filter: &FilterArgs) -> Result<()> {
    let value = filter.to_value()?;
    let extras = filter.extras();
    let css = if extras.is_identity() {
        render::to_render_string(&value)
    } else {
        render::to_image_render_string(&value, &extras)
    };
    println!("{css}");
    Ok(())
}

// ── apply ─────────────────────────────────────────────────────────────────────

fn apply_png(
    input:       &std::path::Path,
    output:      &std::path::Path,
    filter:      &FilterArgs,
    orientation: &Orientation,
) -> Result<()> {
    let value  = filter.to_value()?;
    let extras = filter.extras();

    let mut img = png_io::read_rgba(input)?;
    raster::apply_filter(&mut img.data, img.width, img.height, &value, &extras)?;
    let (data, width, height) = raster::apply_orientation(&img.data, img.width, img.height, orientation)?;
    png_io::write_rgba(output, &RgbaImage { width, height, data })?;

    log::info!("[apply] {} → {} ({width}x{height})", input.display(), output.display());
    println!("{}", render::to_image_render_string(&value, &extras));
    Ok(())
}

// ── suggest ───────────────────────────────────────────────────────────────────

fn suggest(
    cfg:    lumacut_suggest::SuggestConfig,
    action: ActionKind,
    prompt: Option<String>,
    frame:  Option<&std::path::Path>,
    preset: Option<&str>,
) -> Result<()> {
    let mut session = EditorSession::new(MediaKind::Image);
    if let Some(name) = preset {
        if let Some(note) = session.execute(EditorCommand::ApplyPreset(name.to_string())) {
            if note.is_error() {
                bail!(note.message);
            }
        }
    }

    let mut payload = SuggestPayload::default();
    if let Some(p) = prompt {
        payload = payload.with_prompt(p);
    }
    if let Some(path) = frame {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let mime = media::mime_from_path(path);
        media::validate_upload(MediaKind::Image, &path.display().to_string(), mime, bytes.len() as u64)?;
        payload = payload.with_frame(EncodedImage::from_bytes(mime, &bytes));
    }

    let wait = cfg.timeout + Duration::from_secs(5);
    let worker: SuggestWorker<UreqTransport> = SuggestWorker::new(SuggestClient::new(cfg));
    worker.request(action, payload)?;

    let Some(outcome) = worker.recv_timeout(wait) else {
        bail!("no answer from the suggestion service within {}s", wait.as_secs());
    };
    let note = apply_outcome(&mut session, outcome);
    if note.is_error() {
        bail!(note.message);
    }

    eprintln!("{}", note.message);
    println!("{}", session.render_string());
    Ok(())
}

// ── text ──────────────────────────────────────────────────────────────────────

fn print_text(transform: Option<TextTransform>, input: Option<&std::path::Path>, stats: bool) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading text from stdin")?;
            buf
        }
    };

    let (out, counts) = report::transform_text(&text, transform);
    println!("{out}");
    if stats {
        eprintln!("{}", report::stats_line(&counts));
    }
    Ok(())
}

// ── gateway ───────────────────────────────────────────────────────────────────

fn serve_gateway(flags: &Overrides, file: &FileConfig, kind: GatewayKind, method: String) -> Result<ExitCode> {
    let cfg = config::gateway_config(flags, file, kind, &config::process_env);
    let timeout = config::suggest_config(flags, file, &config::process_env).timeout;
    let transport = UreqTransport::new(timeout);

    let mut body = String::new();
    if !method.eq_ignore_ascii_case("OPTIONS") {
        io::stdin().read_to_string(&mut body).context("reading request from stdin")?;
    }

    let resp = gateway::handle(&cfg, &transport, &GatewayRequest { method, body });
    log::info!("[gateway] → {}", resp.status);

    let mut out = io::stdout().lock();
    writeln!(out, "{}", resp.body)?;
    Ok(if resp.status < 400 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
