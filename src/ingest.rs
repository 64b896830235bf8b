// Background loading of dropped files.
// Visual: pictures pop onto the canvas as soon as they finish decoding,
// while the window keeps responding the whole time.
//
// One walker thread per batch expands directories and reads the files;
// each file is then decoded on its own rayon task. Finished images land in
// a shared inbox that the frame loop empties once per frame with `try_lock`,
// so the loop never waits on a decode.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use image::RgbaImage;
use tracing::{error, info, warn};

use crate::collection::VisageCollection;
use crate::surface::PixelSurface;
use crate::visage::Visage;

/// Where freshly loaded pictures appear.
pub const SPAWN_ORIGIN: (i32, i32) = (40, 40);

/// A batch could not be read. Fatal: the session stops.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot scan {path}: {source}")]
    Pattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },
    #[error("walking {path} failed: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: glob::GlobError,
    },
    #[error("opening {path} failed: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Bytes → RGBA pixmap. The container format is the decoder's business.
pub trait Decode: Send + Sync + 'static {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, image::ImageError>;
}

/// Decoder backed by the `image` crate (format guessed from the content).
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl Decode for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
        Ok(image::load_from_memory(bytes)?.to_rgba8())
    }
}

/// One finished decode waiting for the frame loop.
#[derive(Debug)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub image: RgbaImage,
}

#[derive(Default)]
struct Inbox {
    ready: Vec<DecodedImage>,
    error: Option<IngestError>,
    /// Only the first error is ever reported.
    error_recorded: bool,
}

impl Inbox {
    fn record_error(&mut self, err: IngestError) {
        if self.error_recorded {
            warn!(error = %err, "further ingest error dropped");
            return;
        }
        error!(error = %err, "ingest batch failed");
        self.error = Some(err);
        self.error_recorded = true;
    }
}

#[derive(Clone)]
pub struct Ingest {
    inbox: Arc<Mutex<Inbox>>,
    in_flight: Arc<AtomicUsize>,
    decoder: Arc<dyn Decode>,
}

impl Ingest {
    pub fn new() -> Self {
        Self::with_decoder(ImageDecoder)
    }

    pub fn with_decoder(decoder: impl Decode) -> Self {
        Self {
            inbox: Arc::new(Mutex::new(Inbox::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            decoder: Arc::new(decoder),
        }
    }

    /// Walkers + decodes that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start loading a dropped batch (files and/or directories). Returns immediately.
    pub fn submit(&self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        info!(count = paths.len(), "drop batch submitted");
        let this = self.clone();
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        std::thread::spawn(move || {
            if let Err(err) = this.walk_batch(&paths) {
                lock(&this.inbox).record_error(err);
            }
            this.in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Move finished images into the collection (front-most, at SPAWN_ORIGIN).
    /// Never blocks: if a producer holds the lock, nothing happens this frame.
    /// Returns how many visages were added, or the batch error.
    pub fn drain(&self, visages: &mut VisageCollection) -> Result<usize, IngestError> {
        let (ready, err) = {
            let mut inbox = match self.inbox.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::WouldBlock) => return Ok(0),
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            };
            (std::mem::take(&mut inbox.ready), inbox.error.take())
        };

        let added = ready.len();
        for decoded in ready {
            let (x, y) = SPAWN_ORIGIN;
            let visage = Visage::new(x, y, PixelSurface::from_image(decoded.image));
            info!(path = %decoded.path.display(), w = visage.w, h = visage.h, "visage added");
            visages.insert_front(visage);
        }
        match err {
            Some(err) => Err(err),
            None => Ok(added),
        }
    }

    fn walk_batch(&self, paths: &[PathBuf]) -> Result<(), IngestError> {
        for path in paths {
            if path.is_dir() {
                let pattern = Path::new(&glob::Pattern::escape(&path.to_string_lossy())).join("**").join("*");
                let entries = glob::glob(&pattern.to_string_lossy())
                    .map_err(|source| IngestError::Pattern { path: path.clone(), source })?;
                for entry in entries {
                    let file = entry.map_err(|source| IngestError::Walk { path: path.clone(), source })?;
                    if file.is_file() {
                        self.read_and_decode(file)?;
                    }
                }
            } else {
                self.read_and_decode(path.clone())?;
            }
        }
        Ok(())
    }

    fn read_and_decode(&self, path: PathBuf) -> Result<(), IngestError> {
        let mut bytes = Vec::new();
        std::fs::File::open(&path)
            .and_then(|mut f| f.read_to_end(&mut bytes))
            .map_err(|source| IngestError::Open { path: path.clone(), source })?;
        info!(path = %path.display(), size = bytes.len(), "dropped file read");

        let inbox = Arc::clone(&self.inbox);
        let in_flight = Arc::clone(&self.in_flight);
        let decoder = Arc::clone(&self.decoder);
        in_flight.fetch_add(1, Ordering::SeqCst);
        rayon::spawn(move || {
            match decoder.decode(&bytes) {
                Ok(image) => lock(&inbox).ready.push(DecodedImage { path, image }),
                Err(err) => warn!(path = %path.display(), error = %err, "failed to decode image, skipped"),
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
        Ok(())
    }
}

fn lock(inbox: &Mutex<Inbox>) -> std::sync::MutexGuard<'_, Inbox> {
    inbox.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
