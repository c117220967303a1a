#![forbid(unsafe_code)]

pub mod canvas;
pub mod core;
pub mod encode_ffmpeg;
pub mod error;
pub mod geom;
pub mod model;
pub mod orchestrator;
pub mod schedule;
pub mod sequencer;
pub mod sink;

pub use canvas::{Canvas, FrameRgb};
pub use core::{FrameIndex, GridSize, Phase, Rgb8};
pub use error::{LanescanError, LanescanResult};
pub use geom::{Classification, Point, Triangle, classify, point_in_triangle};
pub use model::{Configuration, Palette, RunManifest};
pub use orchestrator::{ConfigOutcome, RunOpts, RunThreading, run_all};
pub use schedule::{Chunk, Chunks, WidthSchedule};
pub use sequencer::{SequenceStats, run_sequence};
pub use sink::{FrameSink, PngDirSink};
