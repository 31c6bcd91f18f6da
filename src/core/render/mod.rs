//=========================================================================
// Rendering
//=========================================================================
//
// Drawable variants and the surface they draw onto.
//
// Architecture:
//   Renderable::{Sprite, Image} ──draw()──> dyn RenderTarget
//                                              ├─ FrameCanvas (pixels buffer)
//                                              └─ test recorders
//
// Drawing is a side effect of the frame; it never feeds back into game
// state. A drawable whose image has not loaded yet draws nothing.
//
//=========================================================================

//=== Module Declarations =================================================

mod canvas;

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::assets::ImageData;
use super::geometry::{Point, Rect, Size};

//=== Public API ==========================================================

pub use canvas::FrameCanvas;

/// RGBA colour.
pub type Color = [u8; 4];

//=== RenderTarget ========================================================

/// A 2D surface accepting image and rectangle draws.
///
/// Implementations clip to their own bounds; callers may pass positions
/// that lie partially or fully off-surface.
pub trait RenderTarget {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Copies the `src` region of `image` so its top-left lands at `dst`.
    fn draw_image(&mut self, image: &ImageData, src: Rect, dst: Point);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

//=== Animation ===========================================================

/// Horizontal sprite-strip animation advanced by elapsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: u32,
    frame_duration: Duration,
    current: u32,
    elapsed: Duration,
}

impl Animation {
    /// Creates an animation over `frames` equal-width frames.
    ///
    /// # Panics
    ///
    /// Panics if `frames == 0`.
    pub fn new(frames: u32, frame_duration: Duration) -> Self {
        assert!(frames > 0, "Animation needs at least one frame");
        Self {
            frames,
            frame_duration,
            current: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Single-frame animation (a still image).
    pub fn still() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Advances by `dt`, stepping as many frames as fully elapsed.
    pub fn advance(&mut self, dt: Duration) {
        if self.frames <= 1 || self.frame_duration.is_zero() {
            return;
        }

        self.elapsed += dt;
        while self.elapsed >= self.frame_duration {
            self.elapsed -= self.frame_duration;
            self.current = (self.current + 1) % self.frames;
        }
    }

    /// Returns to the first frame.
    pub fn reset(&mut self) {
        self.current = 0;
        self.elapsed = Duration::ZERO;
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

//=== AnimatedSprite ======================================================

/// Sprite strip; draws one frame-wide slice of its image.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    pub position: Point,
    pub animation: Animation,
    image: Option<Arc<ImageData>>,
}

impl AnimatedSprite {
    pub fn new(position: Point, animation: Animation) -> Self {
        Self {
            position,
            animation,
            image: None,
        }
    }

    /// Source rectangle of the current frame, once the image is known.
    pub fn frame_rect(&self) -> Option<Rect> {
        let image = self.image.as_ref()?;
        let frame_width = (image.width() / self.animation.frames()) as i32;
        let height = image.height() as i32;
        if frame_width <= 0 || height <= 0 {
            return None;
        }

        Some(Rect::new(
            frame_width * self.animation.current() as i32,
            0,
            frame_width,
            height,
        ))
    }
}

//=== StaticImage =========================================================

/// Whole image drawn at a position.
#[derive(Debug, Clone)]
pub struct StaticImage {
    pub position: Point,
    image: Option<Arc<ImageData>>,
}

impl StaticImage {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            image: None,
        }
    }
}

//=== Renderable ==========================================================

/// Closed set of drawable kinds.
#[derive(Debug, Clone)]
pub enum Renderable {
    Sprite(AnimatedSprite),
    Image(StaticImage),
}

impl Renderable {
    pub fn sprite(position: Point, animation: Animation) -> Self {
        Self::Sprite(AnimatedSprite::new(position, animation))
    }

    pub fn image(position: Point) -> Self {
        Self::Image(StaticImage::new(position))
    }

    #[inline]
    pub fn position(&self) -> Point {
        match self {
            Self::Sprite(s) => s.position,
            Self::Image(i) => i.position,
        }
    }

    #[inline]
    pub fn position_mut(&mut self) -> &mut Point {
        match self {
            Self::Sprite(s) => &mut s.position,
            Self::Image(i) => &mut i.position,
        }
    }

    /// Installs a freshly loaded image.
    pub fn set_image(&mut self, image: Arc<ImageData>) {
        match self {
            Self::Sprite(s) => s.image = Some(image),
            Self::Image(i) => i.image = Some(image),
        }
    }

    /// Mutable animation state, for sprites only.
    pub fn animation_mut(&mut self) -> Option<&mut Animation> {
        match self {
            Self::Sprite(s) => Some(&mut s.animation),
            Self::Image(_) => None,
        }
    }

    /// Draws onto `target`; no-op until the image has loaded.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        match self {
            Self::Sprite(sprite) => {
                if let (Some(image), Some(src)) = (&sprite.image, sprite.frame_rect()) {
                    target.draw_image(image, src, sprite.position);
                }
            }
            Self::Image(still) => {
                let Some(image) = &still.image else {
                    return;
                };
                if image.width() == 0 || image.height() == 0 {
                    return;
                }
                let src = Rect::new(0, 0, image.width() as i32, image.height() as i32);
                target.draw_image(image, src, still.position);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
