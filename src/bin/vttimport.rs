use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vttimport::{
    Anchor, CompressionMode, DirectoryStore, ImportOptions, Importer, Point, TracingNotifier, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "vttimport", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print what a VTT file contains as JSON.
    Inspect(InspectArgs),
    /// Create a new scene (map image plus walls and doors) from a UVTT file.
    Scene(SceneArgs),
    /// Append walls and doors from a UVTT or Foundry file to a scene directory.
    Add(AddArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input VTT file (.uvtt, .dd2vtt or .json).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input VTT file (.uvtt or .dd2vtt).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene directory.
    #[arg(long)]
    out: PathBuf,

    /// Map image compression.
    #[arg(long, value_enum, default_value_t = CompressionMode::Standard)]
    compression: CompressionMode,

    /// Target scene grid density (pixels per grid cell).
    #[arg(long, default_value_t = 150.0)]
    dpi: f64,

    /// Prefix for generated item ids [default: random per run].
    #[arg(long)]
    id_prefix: Option<String>,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Input VTT file (.uvtt, .dd2vtt or .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output scene directory; items are appended to `items.jsonl`.
    #[arg(long)]
    out: PathBuf,

    /// Target scene grid density (pixels per grid cell).
    #[arg(long, default_value_t = 150.0)]
    dpi: f64,

    /// Place items at this position, as `X,Y`.
    #[arg(long, value_parser = parse_pair)]
    anchor: Option<(f64, f64)>,

    /// Scale point coordinates per axis, as `SX,SY`.
    #[arg(long, value_parser = parse_pair)]
    scale: Option<(f64, f64)>,

    /// Items per store submission.
    #[arg(long, default_value_t = 50)]
    batch_size: usize,

    /// Import Foundry doors as open instead of closed.
    #[arg(long)]
    legacy_doors_open: bool,

    /// Prefix for generated item ids [default: random per run].
    #[arg(long)]
    id_prefix: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Add(args) => cmd_add(args),
    }
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{v}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn read_input(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, bytes))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{s}");
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (_, bytes) = read_input(&args.in_path)?;
    let summary = vttimport::inspect(&bytes)
        .with_context(|| format!("inspect '{}'", args.in_path.display()))?;
    print_json(&summary)
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let (name, bytes) = read_input(&args.in_path)?;
    let mut store = DirectoryStore::create(&args.out, args.dpi)?;
    let opts = ImportOptions {
        compression: args.compression,
        id_prefix: args.id_prefix,
        ..ImportOptions::default()
    };

    let report = Importer::new(&mut store, &TracingNotifier, opts).create_scene(&name, &bytes)?;
    print_json(&report)?;
    eprintln!("wrote {}", store.scene_path().display());
    Ok(())
}

fn cmd_add(args: AddArgs) -> anyhow::Result<()> {
    let (name, bytes) = read_input(&args.in_path)?;

    let anchor = match (args.anchor, args.scale) {
        (None, None) => None,
        (pos, scale) => {
            let (x, y) = pos.unwrap_or((0.0, 0.0));
            let (sx, sy) = scale.unwrap_or((1.0, 1.0));
            Some(Anchor::new(Point::new(x, y), Vec2::new(sx, sy)))
        }
    };

    let mut store = DirectoryStore::create(&args.out, args.dpi)?.with_anchor(anchor);
    let opts = ImportOptions {
        batch_size: args.batch_size,
        legacy_doors_closed: !args.legacy_doors_open,
        anchor_from_selection: anchor.is_some(),
        id_prefix: args.id_prefix,
        ..ImportOptions::default()
    };

    let report = Importer::new(&mut store, &TracingNotifier, opts).add_to_scene(&name, &bytes)?;
    print_json(&report)?;
    eprintln!("wrote {}", store.items_path().display());
    Ok(())
}
