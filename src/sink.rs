use std::path::{Path, PathBuf};

use crate::{canvas::FrameRgb, core::FrameIndex, error::LanescanResult};

/// Receives finished frames. The order of `persist` calls is the animation's
/// temporal order; implementations must preserve it.
pub trait FrameSink {
    fn persist(&mut self, frame: &FrameRgb, index: FrameIndex) -> LanescanResult<()>;
}

/// Writes frames as `<dir>/<name>_NNNNNN.png`, the layout the GIF encoder
/// consumes.
pub struct PngDirSink {
    dir: PathBuf,
    name: String,
}

impl PngDirSink {
    /// Creates `dir` (and any missing parents) up front.
    pub fn create(dir: impl Into<PathBuf>, name: impl Into<String>) -> LanescanResult<Self> {
        use anyhow::Context as _;
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create frame directory '{}'", dir.display()))?;
        Ok(Self {
            dir,
            name: name.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:06}.png", self.name, index.0))
    }
}

impl FrameSink for PngDirSink {
    fn persist(&mut self, frame: &FrameRgb, index: FrameIndex) -> LanescanResult<()> {
        use anyhow::Context as _;
        let path = self.frame_path(index);
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("failed to write frame '{}'", path.display()))?;
        Ok(())
    }
}
