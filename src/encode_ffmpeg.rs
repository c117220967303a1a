use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::{LanescanError, LanescanResult};

/// Settings for assembling one configuration's persisted frames into a GIF.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub frames_dir: PathBuf,
    pub name: String,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> LanescanResult<()> {
        if self.name.trim().is_empty() {
            return Err(LanescanError::validation("encode name must be non-empty"));
        }
        if self.fps == 0 {
            return Err(LanescanError::validation("encode fps must be non-zero"));
        }
        Ok(())
    }

    /// ffmpeg image2 pattern matching the sink's `<name>_NNNNNN.png` layout.
    pub fn input_pattern(&self) -> PathBuf {
        self.frames_dir.join(format!("{}_%06d.png", self.name))
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> LanescanResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Assembles a frame sequence into a GIF by invoking the system `ffmpeg`
/// binary. Frames must already be on disk, indexed from zero in zero-padded
/// ascending order.
///
/// We intentionally shell out to `ffmpeg` rather than linking FFmpeg, to
/// avoid native dev header/lib requirements. Failure leaves the persisted
/// frames untouched.
pub fn encode_gif(cfg: &EncodeConfig) -> LanescanResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(LanescanError::validation(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if !is_ffmpeg_on_path() {
        return Err(LanescanError::encode(
            "ffmpeg is required for GIF assembly, but was not found on PATH",
        ));
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    if cfg.overwrite {
        cmd.arg("-y");
    } else {
        cmd.arg("-n");
    }

    cmd.args([
        "-loglevel",
        "error",
        "-f",
        "image2",
        "-framerate",
        &cfg.fps.to_string(),
        "-i",
    ])
    .arg(cfg.input_pattern())
    .arg(&cfg.out_path);

    let child = cmd.spawn().map_err(|e| {
        LanescanError::encode(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })?;

    let output = child
        .wait_with_output()
        .map_err(|e| LanescanError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LanescanError::encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(
            EncodeConfig {
                frames_dir: PathBuf::from("frames/serial"),
                name: String::new(),
                fps: 50,
                out_path: PathBuf::from("frames/serial.gif"),
                overwrite: true,
            }
            .validate()
            .is_err()
        );

        assert!(
            EncodeConfig {
                frames_dir: PathBuf::from("frames/serial"),
                name: "serial".to_string(),
                fps: 0,
                out_path: PathBuf::from("frames/serial.gif"),
                overwrite: true,
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn input_pattern_matches_sink_layout() {
        let cfg = EncodeConfig {
            frames_dir: PathBuf::from("frames/avx2"),
            name: "avx2".to_string(),
            fps: 50,
            out_path: PathBuf::from("frames/avx2.gif"),
            overwrite: true,
        };
        assert_eq!(
            cfg.input_pattern(),
            PathBuf::from("frames/avx2/avx2_%06d.png")
        );
    }
}
