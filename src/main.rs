//! BBAT command line entry point.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use bbat::constants::window;
use bbat::{App, AppConfig, Dispatcher, LogLevel, ScriptInput, Session, TextRenderer};
use clap::Parser;

/// Label images with bounding boxes and export normalized annotations.
#[derive(Debug, Parser)]
#[command(name = window::TITLE, version)]
struct Opts {
    /// Folder with images to label (.jpg and .png)
    image_dir: PathBuf,

    /// Annotation table to merge into (created if missing)
    output_file: PathBuf,

    /// Number of distinct labels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    labels: u32,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read input events from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    if let Err(e) = run(opts) {
        eprintln!("Application error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(opts: Opts) -> bbat::Result<()> {
    let config = match &opts.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let log_level = opts.log_level.unwrap_or(config.preferences.log_level);
    env_logger::Builder::new()
        .filter_level(log_level.to_level_filter())
        .parse_default_env()
        .init();

    let session = Session::open(&opts.image_dir, &opts.output_file, opts.labels)?;
    let dispatcher = Dispatcher::new(config.key_bindings(), opts.labels)
        .with_max_image_box(config.preferences.max_image_box());
    let renderer = TextRenderer::new(io::stdout());
    let tick_interval = config.preferences.tick_interval();

    match &opts.script {
        Some(path) => {
            let input = ScriptInput::new(BufReader::new(File::open(path)?));
            App::new(session, dispatcher, input, renderer)
                .with_tick_interval(tick_interval)
                .run()
        }
        None => {
            // Reading stdin already blocks until the next line arrives
            let input = ScriptInput::new(io::stdin().lock());
            App::new(session, dispatcher, input, renderer).run()
        }
    }
}
