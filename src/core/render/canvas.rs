//=========================================================================
// Frame Canvas
//=========================================================================
//
// Software `RenderTarget` over an RGBA8 frame buffer (the `pixels` frame).
//
// Every draw is clipped against the surface, so off-screen or partially
// visible entities are safe to draw. Source pixels with zero alpha are
// skipped; everything else overwrites the destination.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Color, RenderTarget};
use crate::core::assets::ImageData;
use crate::core::geometry::{Point, Rect, Size};

//=== FrameCanvas =========================================================

/// Borrowed RGBA frame buffer of `width * height * 4` bytes.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    /// Wraps `frame`. Returns `None` if the buffer size is wrong.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Option<Self> {
        if frame.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self { frame, width, height })
    }

    /// Fills the whole surface.
    pub fn clear(&mut self, color: Color) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Reads back a pixel (used by tests and debugging).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x as usize, y as usize);
        Some([self.frame[i], self.frame[i + 1], self.frame[i + 2], self.frame[i + 3]])
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 4
    }

    /// Clips `[x0, x1) × [y0, y1)` to the surface.
    fn clip(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(usize, usize, usize, usize)> {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64);
        let y1 = y1.min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

impl RenderTarget for FrameCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    fn draw_image(&mut self, image: &ImageData, src: Rect, dst: Point) {
        // Source region limited to the image itself
        let sx0 = src.left().max(0) as i64;
        let sy0 = src.top().max(0) as i64;
        let sx1 = (src.right() as i64).min(image.width() as i64);
        let sy1 = (src.bottom() as i64).min(image.height() as i64);
        if sx0 >= sx1 || sy0 >= sy1 {
            return;
        }

        // Destination of that region, relative to where `src` was anchored
        let dx0 = dst.x as i64 + (sx0 - src.left() as i64);
        let dy0 = dst.y as i64 + (sy0 - src.top() as i64);
        let Some((cx0, cy0, cx1, cy1)) = self.clip(dx0, dy0, dx0 + (sx1 - sx0), dy0 + (sy1 - sy0)) else {
            return;
        };

        for y in cy0..cy1 {
            let image_y = (sy0 + (y as i64 - dy0)) as u32;
            let row = image.row(image_y);
            for x in cx0..cx1 {
                let image_x = (sx0 + (x as i64 - dx0)) as usize;
                let s = &row[image_x * 4..image_x * 4 + 4];
                if s[3] == 0 {
                    continue;
                }
                let d = self.index(x, y);
                self.frame[d..d + 4].copy_from_slice(s);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(
            rect.left() as i64,
            rect.top() as i64,
            rect.right() as i64,
            rect.bottom() as i64,
        ) else {
            return;
        };

        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = self.index(x1, y);
            for px in self.frame[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const BLUE: Color = [0, 0, 255, 255];
    const CLEAR: Color = [0, 0, 0, 255];

    fn buffer(w: u32, h: u32) -> Vec<u8> {
        vec![0; (w * h * 4) as usize]
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        let mut buf = vec![0u8; 10];
        assert!(FrameCanvas::new(&mut buf, 4, 4).is_none());
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut buf = buffer(4, 4);
        let mut canvas = FrameCanvas::new(&mut buf, 4, 4).unwrap();
        canvas.clear(CLEAR);
        canvas.fill_rect(Rect::new(-2, -2, 4, 4), RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(CLEAR));
    }

    #[test]
    fn fill_rect_fully_offscreen_is_noop() {
        let mut buf = buffer(4, 4);
        let mut canvas = FrameCanvas::new(&mut buf, 4, 4).unwrap();
        canvas.clear(CLEAR);
        canvas.fill_rect(Rect::new(10, 10, 4, 4), RED);
        canvas.fill_rect(Rect::new(-48, 0, 48, 4), RED);
        assert!((0..4).all(|x| canvas.pixel(x, 0) == Some(CLEAR)));
    }

    #[test]
    fn draw_image_copies_source_region() {
        let mut rgba = Vec::new();
        for _ in 0..2 {
            rgba.extend_from_slice(&RED);
            rgba.extend_from_slice(&BLUE);
        }
        let image = ImageData::from_rgba(2, 2, rgba).unwrap();

        let mut buf = buffer(4, 4);
        let mut canvas = FrameCanvas::new(&mut buf, 4, 4).unwrap();
        canvas.clear(CLEAR);
        canvas.draw_image(&image, Rect::new(1, 0, 1, 2), Point::new(3, 2));

        assert_eq!(canvas.pixel(3, 2), Some(BLUE));
        assert_eq!(canvas.pixel(3, 3), Some(BLUE));
        assert_eq!(canvas.pixel(2, 2), Some(CLEAR));
    }

    #[test]
    fn draw_image_clips_negative_destination() {
        let image = ImageData::filled(4, 4, RED);
        let mut buf = buffer(4, 4);
        let mut canvas = FrameCanvas::new(&mut buf, 4, 4).unwrap();
        canvas.clear(CLEAR);
        canvas.draw_image(&image, Rect::new(0, 0, 4, 4), Point::new(-3, -3));

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 0), Some(CLEAR));
        assert_eq!(canvas.pixel(0, 1), Some(CLEAR));
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let image = ImageData::filled(2, 2, [9, 9, 9, 0]);
        let mut buf = buffer(2, 2);
        let mut canvas = FrameCanvas::new(&mut buf, 2, 2).unwrap();
        canvas.clear(BLUE);
        canvas.draw_image(&image, Rect::new(0, 0, 2, 2), Point::ORIGIN);
        assert_eq!(canvas.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn source_rect_outside_image_is_noop() {
        let image = ImageData::filled(2, 2, RED);
        let mut buf = buffer(2, 2);
        let mut canvas = FrameCanvas::new(&mut buf, 2, 2).unwrap();
        canvas.clear(CLEAR);
        canvas.draw_image(&image, Rect::new(5, 5, 2, 2), Point::ORIGIN);
        assert_eq!(canvas.pixel(0, 0), Some(CLEAR));
    }
}
