// Frame composition module
// CPU rendering of the current slide into a window-sized BGRA canvas

use crate::image_loader::LoadedImage;
use std::thread;
use std::time::{Duration, Instant};

/// Clear `canvas` to opaque black and copy `image` at `position`, clipped
/// to the canvas bounds.
pub fn compose_frame(
    canvas: &mut [u8],
    canvas_width: u32,
    canvas_height: u32,
    image: &LoadedImage,
    position: (i32, i32),
) {
    for pixel in canvas.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[0, 0, 0, 255]);
    }

    let (x, y) = (position.0 as i64, position.1 as i64);
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + image.width as i64).min(canvas_width as i64);
    let y_end = (y + image.height as i64).min(canvas_height as i64);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let row_bytes = ((x_end - x_start) * 4) as usize;
    for dst_y in y_start..y_end {
        let src_y = (dst_y - y) as usize;
        let src_x = (x_start - x) as usize;
        let src_idx = (src_y * image.width as usize + src_x) * 4;
        let dst_idx = (dst_y as usize * canvas_width as usize + x_start as usize) * 4;

        if src_idx + row_bytes <= image.bgra_data.len() && dst_idx + row_bytes <= canvas.len() {
            canvas[dst_idx..dst_idx + row_bytes]
                .copy_from_slice(&image.bgra_data[src_idx..src_idx + row_bytes]);
        }
    }
}

/// Caps the rate at which frames are presented
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_tick: None,
        }
    }

    /// Sleep for whatever is left of the current frame, then start the next
    pub fn tick(&mut self) {
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < self.frame_time {
                thread::sleep(self.frame_time - elapsed);
            }
        }
        self.last_tick = Some(Instant::now());
    }

    #[cfg(test)]
    fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> LoadedImage {
        LoadedImage {
            width,
            height,
            bgra_data: vec![value; (width * height * 4) as usize],
        }
    }

    fn pixel(canvas: &[u8], width: u32, x: u32, y: u32) -> &[u8] {
        let idx = ((y * width + x) * 4) as usize;
        &canvas[idx..idx + 4]
    }

    #[test]
    fn test_centered_blit() {
        let mut canvas = vec![7u8; 8 * 6 * 4];
        compose_frame(&mut canvas, 8, 6, &solid(4, 2, 200), (2, 2));

        assert_eq!(pixel(&canvas, 8, 0, 0), &[0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 8, 1, 2), &[0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 8, 2, 2), &[200; 4]);
        assert_eq!(pixel(&canvas, 8, 5, 3), &[200; 4]);
        assert_eq!(pixel(&canvas, 8, 6, 3), &[0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 8, 2, 4), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_negative_offset_is_clipped() {
        let mut canvas = vec![0u8; 4 * 4 * 4];
        let mut image = solid(4, 8, 0);
        // Mark the first visible row (source row 2)
        for b in &mut image.bgra_data[2 * 4 * 4..3 * 4 * 4] {
            *b = 99;
        }
        compose_frame(&mut canvas, 4, 4, &image, (0, -2));

        assert_eq!(pixel(&canvas, 4, 0, 0), &[99; 4]);
        assert_eq!(pixel(&canvas, 4, 3, 0), &[99; 4]);
        assert_eq!(pixel(&canvas, 4, 0, 1), &[0; 4]);
    }

    #[test]
    fn test_image_outside_canvas() {
        let mut canvas = vec![5u8; 4 * 4 * 4];
        compose_frame(&mut canvas, 4, 4, &solid(2, 2, 9), (10, 10));
        assert!(canvas.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_frame_clock() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame_time(), Duration::from_secs(1) / 60);

        let mut clock = FrameClock::new(1000);
        let start = Instant::now();
        clock.tick();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(1));
    }
}
