use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use classboard::Config;
use classboard::export;
use classboard::input::Whiteboard;
use classboard::script::ReplayScript;

#[derive(Parser, Debug)]
#[command(name = "classboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CLASSBOARD_GIT_HASH"), ")"),
    about = "Raster whiteboard with snapshot undo/redo"
)]
struct Cli {
    /// Replay a TOML gesture script against a fresh whiteboard
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the final surface to this PNG instead of the export directory
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Use this config file instead of ~/.config/classboard/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Surface width in pixels (overrides [canvas] width)
    #[arg(long, value_name = "PX")]
    width: Option<i32>,

    /// Surface height in pixels (overrides [canvas] height)
    #[arg(long, value_name = "PX")]
    height: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script else {
        // No script: show usage
        println!("classboard: Raster whiteboard with snapshot undo/redo");
        println!();
        println!("Usage:");
        println!("  classboard --script lesson.toml               Replay and export to ~/Pictures/Classboard");
        println!("  classboard --script lesson.toml -o out.png    Replay and export to out.png");
        println!("  classboard --help                             Show help");
        println!();
        println!("Script steps ([[step]] tables, selected with op = \"...\"):");
        println!("  down, move, up, stroke, text, commit_text, cancel_text,");
        println!("  undo, redo, clear, tool, brush, color, size, font_size, key, focus");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    config.validate_and_clamp();

    let script = ReplayScript::load(&script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;

    let mut board = Whiteboard::from_config(&config)?;
    let summary = script
        .apply(&mut board)
        .with_context(|| format!("Failed to replay {}", script_path.display()))?;

    log::info!(
        "Replayed {} steps ({} history changes, {} text prompts)",
        summary.steps,
        summary.history_changes,
        summary.text_requests
    );

    let background = config.canvas.background_color.to_color();
    let saved = match &cli.output {
        Some(path) => {
            let flatten = config.export.flatten.then_some(background);
            export::write_png(board.surface(), flatten, path)
                .with_context(|| format!("Failed to export {}", path.display()))?;
            path.clone()
        }
        None => export::save_to_directory(board.surface(), background, &config.export)
            .context("Failed to export whiteboard")?,
    };

    println!(
        "Saved {} (history {}/{}, undo: {}, redo: {})",
        saved.display(),
        board.history().cursor() + 1,
        board.history().len(),
        if board.undo_available() { "yes" } else { "no" },
        if board.redo_available() { "yes" } else { "no" }
    );

    Ok(())
}
