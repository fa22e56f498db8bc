use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use draft_core::{
    config::load_config, render::RasterSurface, Dimension, Session, TracingNotifier,
};
use shared::domain::{Mode, Settings, ThreadAction};
use tracing_subscriber::EnvFilter;

/// Headless operations on exported weave drafts.
#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes an empty draft using configured defaults.
    New {
        #[arg(long)]
        shafts: Option<i64>,
        #[arg(long)]
        treadles: Option<i64>,
        #[arg(long)]
        width: Option<i64>,
        #[arg(long)]
        height: Option<i64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Regenerates the chart from threading, tie-up and treadling.
    Drawdown(Transform),
    /// Colors the drawdown from the warp and weft colors.
    Colorize(Transform),
    /// Derives threading, tie-up and treadling from the chart.
    Infer(Transform),
    /// Renders the draft to a PNG image.
    Render {
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Transform {
    input: PathBuf,
    /// Overrides the document's thread action.
    #[arg(long, value_parser = parse_thread_action)]
    thread_action: Option<ThreadAction>,
    /// Destination file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_thread_action(raw: &str) -> Result<ThreadAction, String> {
    match raw.to_ascii_lowercase().as_str() {
        "up" => Ok(ThreadAction::Up),
        "down" => Ok(ThreadAction::Down),
        other => Err(format!("expected 'up' or 'down', got '{other}'")),
    }
}

fn main() -> Result<()> {
    let config = load_config();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for note in &config.notes {
        tracing::warn!(note = %note, "ignored config value");
    }

    run(Cli::parse(), config.settings)
}

fn run(cli: Cli, defaults: Settings) -> Result<()> {
    match cli.command {
        Command::New {
            shafts,
            treadles,
            width,
            height,
            out,
        } => {
            let mut session = Session::new(defaults, TracingNotifier);
            let edits = [
                (Dimension::ShaftCount, shafts),
                (Dimension::TreadleCount, treadles),
                (Dimension::ChartWidth, width),
                (Dimension::ChartHeight, height),
            ];
            for (dimension, value) in edits {
                if let Some(value) = value {
                    session.set_dimension(dimension, value);
                }
            }
            session.initialize();
            write_document(&session, out.as_deref())?;
        }
        Command::Drawdown(args) => {
            let mut session = open_for(&args, Mode::ToDraft)?;
            session.generate_drawdown()?;
            write_document(&session, args.out.as_deref())?;
        }
        Command::Colorize(args) => {
            let mut session = open_for(&args, Mode::ToDraft)?;
            session.generate_color_chart()?;
            write_document(&session, args.out.as_deref())?;
        }
        Command::Infer(args) => {
            let mut session = open_for(&args, Mode::FromDraft)?;
            session.generate_from_draft()?;
            write_document(&session, args.out.as_deref())?;
        }
        Command::Render { input, out } => {
            let session = open(&input)?;
            let mut surface = RasterSurface::for_settings(session.settings());
            session.render(&mut surface)?;
            let png = surface.encode_png()?;
            fs::write(&out, png).with_context(|| format!("failed to write '{}'", out.display()))?;
            let (width, height) = session.canvas_size();
            println!("rendered {}x{} to {}", width, height, out.display());
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<Session> {
    let bytes = fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let mut session = Session::new(Settings::default(), TracingNotifier);
    session
        .import_document(&bytes)
        .with_context(|| format!("failed to import '{}'", path.display()))?;
    Ok(session)
}

/// Loads `args.input` and switches it to the direction the command needs.
fn open_for(args: &Transform, mode: Mode) -> Result<Session> {
    let mut session = open(&args.input)?;
    if session.settings().mode != mode {
        tracing::info!(?mode, "switching document mode");
        session.set_mode(mode);
    }
    if let Some(action) = args.thread_action {
        session.set_thread_action(action);
    }
    Ok(session)
}

fn write_document(session: &Session, out: Option<&Path>) -> Result<()> {
    let bytes = session.export_document(chrono::Utc::now())?;
    match out {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
