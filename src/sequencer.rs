use crate::{
    canvas::Canvas,
    core::FrameIndex,
    error::LanescanResult,
    geom::{Point, point_in_triangle},
    model::Configuration,
    sink::FrameSink,
};

/// Totals for one configuration's completed frame sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub chunks: u64,
    pub frames: u64,
}

/// Drives the full animation for one configuration.
///
/// Walks the grid's canonical scan order in chunks drawn from the width
/// schedule, widest lane first. Each chunk's points are classified against
/// the triangle once, then two frames go to `sink` in order: the chunk
/// highlighted as in-flight, then the chunk in its resolved colors. Frame
/// indices count up from 0 with no gaps.
///
/// The configuration is validated before any frame is produced.
#[tracing::instrument(skip(cfg, sink), fields(name = %cfg.name))]
pub fn run_sequence(cfg: &Configuration, sink: &mut dyn FrameSink) -> LanescanResult<SequenceStats> {
    cfg.validate()?;

    if !cfg.widths.reaches_unit_width() {
        tracing::warn!("width schedule does not reach 1; trailing points will never be processed");
    }

    let mut canvas = Canvas::new(cfg.size, cfg.palette.background);
    let mut stats = SequenceStats::default();
    let mut next_frame = FrameIndex(0);

    // Scratch for the current chunk's partition; points never outlive it.
    let mut inside: Vec<Point> = Vec::new();
    let mut outside: Vec<Point> = Vec::new();

    for chunk in cfg.widths.chunks(cfg.size.num_points()) {
        inside.clear();
        outside.clear();
        for idx in chunk.range() {
            let p = cfg.size.point_at(idx);
            if point_in_triangle(p, &cfg.triangle) {
                inside.push(p);
            } else {
                outside.push(p);
            }
        }

        canvas.set_pixels(&inside, cfg.palette.in_flight_inside);
        canvas.set_pixels(&outside, cfg.palette.in_flight_outside);
        sink.persist(&canvas.render_scaled(cfg.scale), next_frame)?;
        next_frame.0 += 1;

        canvas.set_pixels(&inside, cfg.palette.resolved_inside);
        canvas.set_pixels(&outside, cfg.palette.resolved_outside);
        sink.persist(&canvas.render_scaled(cfg.scale), next_frame)?;
        next_frame.0 += 1;

        stats.chunks += 1;
    }

    stats.frames = next_frame.0;
    tracing::debug!(chunks = stats.chunks, frames = stats.frames, "sequence complete");
    Ok(stats)
}
