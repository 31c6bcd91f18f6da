//=========================================================================
// Asset Loader
//=========================================================================
//
// Fire-and-forget image decoding.
//
// Architecture:
//   request(key, path) → worker thread → image::open() → channel
//                                                          ↓
//   GameLoop step → poll() ─────────────────────> install into renderables
//
// Decoding never blocks the frame loop. Until an image arrives, whatever
// uses it simply draws nothing. Failed loads are logged and dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, info, warn};
use thiserror::Error;

//=== AssetKey ============================================================

/// Identifies which drawable an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Background,
    Foreground,
    Player,
}

//=== AssetError ==========================================================

/// Image loading failures.
#[derive(Debug, Error)]
pub enum AssetError {
    /// File missing, unreadable or not a supported image.
    #[error("failed to load {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer of {len} bytes does not fit {width}x{height} RGBA")]
    BufferSize { width: u32, height: u32, len: usize },
}

//=== ImageData ===========================================================

/// Decoded RGBA8 image, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageData {
    /// Wraps an RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(AssetError::BufferSize {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    /// Creates a solid-colour image.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba = color.repeat(width as usize * height as usize);
        Self { width, height, rgba }
    }

    /// Opens and decodes an image file.
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let decoded = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.rgba[start..start + stride]
    }
}

//=== AssetLoader =========================================================

type LoadResult = (AssetKey, Result<ImageData, AssetError>);

/// Decodes images on background threads and hands them over on `poll()`.
pub struct AssetLoader {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
    pending: usize,
}

impl AssetLoader {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Starts loading `path` for `key`. Returns immediately.
    pub fn request(&mut self, key: AssetKey, path: impl Into<PathBuf>) {
        let path = path.into();
        let sender = self.sender.clone();
        debug!(target: "assets", "Loading {:?} from {}", key, path.display());

        self.pending += 1;
        let spawned = thread::Builder::new()
            .name(format!("asset-{:?}", key).to_lowercase())
            .spawn(move || {
                let result = ImageData::open(&path);
                // Receiver gone means the game shut down first
                let _ = sender.send((key, result));
            });

        if let Err(e) = spawned {
            warn!(target: "assets", "Could not spawn loader for {:?}: {}", key, e);
            self.pending -= 1;
        }
    }

    /// Returns every image finished since the last poll.
    ///
    /// Failed loads are logged here and not returned.
    pub fn poll(&mut self) -> Vec<(AssetKey, Arc<ImageData>)> {
        let mut ready = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok((key, result)) => {
                    self.pending = self.pending.saturating_sub(1);
                    match result {
                        Ok(image) => {
                            info!(
                                target: "assets",
                                "Loaded {:?} ({}x{})",
                                key,
                                image.width(),
                                image.height()
                            );
                            ready.push((key, Arc::new(image)));
                        }
                        Err(e) => warn!(target: "assets", "{:?} will not be drawn: {}", key, e),
                    }
                }
                // The loader holds a sender, so the channel cannot disconnect
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        ready
    }

    /// Number of requests not yet delivered by `poll()`.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
