use crate::core::{GridSize, Rgb8};
use crate::geom::Point;

/// Finished pixels for one frame: straight RGB8, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Pixel buffer owned by a single configuration's run.
///
/// Pixels keep whatever color they were last marked with; chunks partition
/// the grid without overlap, so a resolved pixel is never overwritten.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: GridSize,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(size: GridSize, background: Rgb8) -> Self {
        let mut data = vec![0u8; size.num_points() * 3];
        for px in data.chunks_exact_mut(3) {
            px[0] = background.r;
            px[1] = background.g;
            px[2] = background.b;
        }
        Self { size, data }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Marks every listed point. Points outside the grid are ignored.
    pub fn set_pixels(&mut self, points: &[Point], color: Rgb8) {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        for p in points {
            if p.x < 0 || p.x >= w || p.y < 0 || p.y >= h {
                continue;
            }
            let idx = (p.y as usize * self.size.width as usize + p.x as usize) * 3;
            self.data[idx] = color.r;
            self.data[idx + 1] = color.g;
            self.data[idx + 2] = color.b;
        }
    }

    /// Nearest-neighbor upscale into a frame value. `scale` of 1 copies the
    /// buffer as-is; 0 is treated as 1.
    pub fn render_scaled(&self, scale: u32) -> FrameRgb {
        let scale = scale.max(1) as usize;
        let src_w = self.size.width as usize;
        let src_h = self.size.height as usize;

        if scale == 1 {
            return FrameRgb {
                width: self.size.width,
                height: self.size.height,
                data: self.data.clone(),
            };
        }

        let out_w = src_w * scale;
        let mut data = Vec::with_capacity(out_w * src_h * scale * 3);
        let mut scaled_row = vec![0u8; out_w * 3];
        for y in 0..src_h {
            let row = &self.data[y * src_w * 3..(y + 1) * src_w * 3];
            for (x, px) in row.chunks_exact(3).enumerate() {
                for rep in 0..scale {
                    let o = (x * scale + rep) * 3;
                    scaled_row[o..o + 3].copy_from_slice(px);
                }
            }
            for _ in 0..scale {
                data.extend_from_slice(&scaled_row);
            }
        }

        FrameRgb {
            width: (src_w * scale) as u32,
            height: (src_h * scale) as u32,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(frame: &FrameRgb, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * frame.width + x) * 3) as usize;
        [frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]]
    }

    #[test]
    fn new_canvas_is_filled_with_background() {
        let canvas = Canvas::new(GridSize::new(2, 2).unwrap(), Rgb8::new(9, 8, 7));
        let frame = canvas.render_scaled(1);
        assert_eq!(px(&frame, 0, 0), [9, 8, 7]);
        assert_eq!(px(&frame, 1, 1), [9, 8, 7]);
    }

    #[test]
    fn set_pixels_marks_only_listed_points() {
        let mut canvas = Canvas::new(GridSize::new(3, 2).unwrap(), Rgb8::BLACK);
        canvas.set_pixels(&[Point::new(1, 0), Point::new(2, 1)], Rgb8::new(255, 0, 0));
        let frame = canvas.render_scaled(1);
        assert_eq!(px(&frame, 1, 0), [255, 0, 0]);
        assert_eq!(px(&frame, 2, 1), [255, 0, 0]);
        assert_eq!(px(&frame, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn out_of_grid_points_are_ignored() {
        let mut canvas = Canvas::new(GridSize::new(2, 2).unwrap(), Rgb8::BLACK);
        canvas.set_pixels(
            &[Point::new(-1, 0), Point::new(2, 0), Point::new(0, 5)],
            Rgb8::WHITE,
        );
        let frame = canvas.render_scaled(1);
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn scaling_replicates_pixels_into_blocks() {
        let mut canvas = Canvas::new(GridSize::new(2, 1).unwrap(), Rgb8::BLACK);
        canvas.set_pixels(&[Point::new(1, 0)], Rgb8::new(10, 20, 30));
        let frame = canvas.render_scaled(3);
        assert_eq!(frame.width, 6);
        assert_eq!(frame.height, 3);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(px(&frame, x, y), [0, 0, 0]);
                assert_eq!(px(&frame, x + 3, y), [10, 20, 30]);
            }
        }
    }
}
