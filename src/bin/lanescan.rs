use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use lanescan::{RunManifest, RunOpts, RunThreading};

#[derive(Parser, Debug)]
#[command(name = "lanescan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every configuration in a manifest, writing PNG frame sequences.
    Run(RunArgs),
    /// Write the built-in preset manifest as JSON.
    Manifest(ManifestArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input run manifest JSON. Defaults to the built-in presets.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Directory receiving one frame subdirectory (and GIF) per configuration.
    #[arg(long, default_value = "frames")]
    frames_root: PathBuf,

    /// Assemble each configuration's frames into a GIF (requires `ffmpeg` on PATH).
    #[arg(long)]
    encode: bool,

    /// Run configurations on a worker pool instead of sequentially.
    #[arg(long)]
    parallel: bool,

    /// Worker count for --parallel (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Manifest(args) => cmd_manifest(args),
    }
}

fn read_manifest(path: &Path) -> anyhow::Result<RunManifest> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let r = BufReader::new(f);
    let manifest: RunManifest =
        serde_json::from_reader(r).with_context(|| "parse manifest JSON")?;
    Ok(manifest)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let manifest = match &args.in_path {
        Some(path) => read_manifest(path)?,
        None => RunManifest::presets(),
    };
    manifest.validate()?;

    let opts = RunOpts {
        frames_root: args.frames_root,
        encode: args.encode,
        fps: manifest.fps,
        threading: RunThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };

    let outcomes = lanescan::run_all(&manifest.configs, &opts)?;

    for outcome in &outcomes {
        match &outcome.stats {
            Ok(stats) => eprintln!(
                "{}: {} chunks, {} frames",
                outcome.name, stats.chunks, stats.frames
            ),
            Err(e) => eprintln!("{}: failed: {e}", outcome.name),
        }
        match &outcome.encode {
            Some(Ok(path)) => eprintln!("{}: wrote {}", outcome.name, path.display()),
            Some(Err(e)) => eprintln!("{}: encode failed: {e}", outcome.name),
            None => {}
        }
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} configurations failed", outcomes.len());
    }
    Ok(())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let manifest = RunManifest::presets();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let f = File::create(&args.out)
        .with_context(|| format!("create manifest '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(f, &manifest).with_context(|| "write manifest JSON")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
