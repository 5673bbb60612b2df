use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use log::error;
use parking_lot::Mutex;
use thiserror::Error;

/// Image files behind the fixed texture units 0, 1 and 2.
pub const TEXTURE_FILES: [&str; 3] = ["texture0.png", "sky.png", "grass.png"];

/// A texture file that could not be read or decoded.
#[derive(Debug, Error)]
#[error("failed to load texture {}: {source}", .path.display())]
pub struct TextureError {
    path: PathBuf,
    #[source]
    source: image::ImageError,
}

/// Decoded RGBA payload ready for upload to one texture unit.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub unit: u32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Reads and decodes one image file, flipped vertically for upload.
pub fn load_image(path: &Path, unit: u32) -> Result<LoadedImage, TextureError> {
    let image = image::open(path).map_err(|source| TextureError {
        path: path.to_owned(),
        source,
    })?;
    let rgba = image.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        unit,
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Background texture loader.
///
/// Decoding happens off-thread; finished payloads queue up here and the
/// render loop drains them between frames. A file that fails to load is
/// reported and abandoned, and its unit keeps rendering with the
/// placeholder.
#[derive(Debug, Default)]
pub struct TextureLoader {
    ready: Arc<Mutex<Vec<LoadedImage>>>,
}

impl TextureLoader {
    /// Spawns one thread decoding the scene's textures from `dir`.
    pub fn spawn(dir: &Path) -> Self {
        let ready = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ready);
        let dir = dir.to_owned();
        thread::spawn(move || {
            for (unit, file) in TEXTURE_FILES.iter().enumerate() {
                match load_image(&dir.join(file), unit as u32) {
                    Ok(image) => sink.lock().push(image),
                    Err(err) => error!("{err}"),
                }
            }
        });
        Self { ready }
    }

    /// Takes the images that finished since the last call.
    pub fn drain(&self) -> Vec<LoadedImage> {
        std::mem::take(&mut *self.ready.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn write_test_png(path: &Path) {
        // 1x2: red on top, blue underneath.
        let mut image = image::RgbaImage::new(1, 2);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        image.save(path).expect("write test png");
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = load_image(&dir.path().join("nope.png"), 0);
        assert!(result.is_err());
    }

    #[test]
    fn images_are_flipped_vertically_on_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("flip.png");
        write_test_png(&path);

        let loaded = load_image(&path, 1).expect("load");
        assert_eq!((loaded.width, loaded.height), (1, 2));
        // The blue bottom row now comes first.
        assert_eq!(loaded.pixels[..4], [0, 0, 255, 255][..]);
        assert_eq!(loaded.pixels[4..], [255, 0, 0, 255][..]);
    }

    #[test]
    fn loader_delivers_decoded_files_and_skips_missing_ones() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_test_png(&dir.path().join("sky.png"));

        let loader = TextureLoader::spawn(dir.path());
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut delivered = Vec::new();
        while delivered.is_empty() && Instant::now() < deadline {
            delivered = loader.drain();
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(delivered.len(), 1, "only sky.png exists");
        assert_eq!(delivered[0].unit, 1);
    }
}
