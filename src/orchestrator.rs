use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    encode_ffmpeg::{EncodeConfig, encode_gif},
    error::{LanescanError, LanescanResult},
    model::Configuration,
    sequencer::{SequenceStats, run_sequence},
    sink::PngDirSink,
};

/// Worker scheduling for a run. Configurations share no state, so results
/// are identical whether they run sequentially or on a pool.
#[derive(Clone, Debug, Default)]
pub struct RunThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct RunOpts {
    /// Root directory receiving one frame subdirectory per configuration.
    pub frames_root: PathBuf,
    /// Assemble each configuration's frames into a GIF after it completes.
    pub encode: bool,
    /// Animation rate handed to the encoder.
    pub fps: u32,
    pub threading: RunThreading,
}

/// What happened to one configuration, independent of its siblings.
#[derive(Debug)]
pub struct ConfigOutcome {
    pub name: String,
    pub stats: LanescanResult<SequenceStats>,
    /// `None` when encoding was not requested or frames never completed.
    pub encode: Option<LanescanResult<PathBuf>>,
}

impl ConfigOutcome {
    pub fn succeeded(&self) -> bool {
        self.stats.is_ok() && !matches!(self.encode, Some(Err(_)))
    }
}

/// Runs every configuration to completion and returns one outcome per
/// configuration, in input order.
///
/// Failures are configuration-scoped: a bad schedule, a sink error or a
/// failed encode is recorded in that configuration's outcome and never blocks
/// a sibling. Returns only after all configurations have finished.
pub fn run_all(configs: &[Configuration], opts: &RunOpts) -> LanescanResult<Vec<ConfigOutcome>> {
    if !opts.threading.parallel {
        return Ok(configs.iter().map(|cfg| run_one(cfg, opts)).collect());
    }

    let pool = build_thread_pool(opts.threading.threads)?;
    Ok(pool.install(|| configs.par_iter().map(|cfg| run_one(cfg, opts)).collect()))
}

fn run_one(cfg: &Configuration, opts: &RunOpts) -> ConfigOutcome {
    let stats = sequence_frames(cfg, opts);
    let encode = match (&stats, opts.encode) {
        (Ok(_), true) => Some(encode_one(cfg, opts)),
        _ => None,
    };
    if let Err(err) = &stats {
        tracing::warn!(name = %cfg.name, %err, "configuration failed");
    }
    ConfigOutcome {
        name: cfg.name.clone(),
        stats,
        encode,
    }
}

fn sequence_frames(cfg: &Configuration, opts: &RunOpts) -> LanescanResult<SequenceStats> {
    // Validate before touching the filesystem; a bad name must not create
    // stray directories.
    cfg.validate()?;
    let mut sink = PngDirSink::create(opts.frames_root.join(&cfg.name), &cfg.name)?;
    run_sequence(cfg, &mut sink)
}

fn encode_one(cfg: &Configuration, opts: &RunOpts) -> LanescanResult<PathBuf> {
    let out_path = opts.frames_root.join(format!("{}.gif", cfg.name));
    encode_gif(&EncodeConfig {
        frames_dir: opts.frames_root.join(&cfg.name),
        name: cfg.name.clone(),
        fps: opts.fps,
        out_path: out_path.clone(),
        overwrite: true,
    })?;
    Ok(out_path)
}

fn build_thread_pool(threads: Option<usize>) -> LanescanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LanescanError::validation(
            "run threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        assert!(build_thread_pool(Some(0)).is_err());
        assert!(build_thread_pool(Some(1)).is_ok());
        assert!(build_thread_pool(None).is_ok());
    }
}
