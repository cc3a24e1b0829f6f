//! Asset lookup
//!
//! Logical names map to files under `<base>/images` and `<base>/sounds`.
//! A missing image yields a placeholder, a missing sound yields `None`;
//! neither is ever fatal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A drawable, sized image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// File backing the image; `None` for a placeholder outline
    pub source: Option<PathBuf>,
}

impl Image {
    pub fn placeholder(name: &str, (width, height): (u32, u32)) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            source: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source.is_none()
    }
}

/// A playable sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundHandle {
    pub name: String,
    pub path: PathBuf,
}

/// Source of images, sounds and music
pub trait AssetProvider {
    /// Image scaled to `size`; a placeholder when the file is absent
    fn image(&mut self, name: &str, size: (u32, u32)) -> Image;

    /// Sound by file name, `None` when absent
    fn sound(&mut self, name: &str) -> Option<SoundHandle>;

    /// Queue background music; false when the file is absent
    fn load_music(&mut self, name: &str) -> bool;
}

/// Filesystem-backed provider with a per-(name, size) image cache
#[derive(Debug)]
pub struct AssetCatalog {
    base_dir: PathBuf,
    images: HashMap<(String, (u32, u32)), Image>,
    sounds: HashMap<String, SoundHandle>,
    music: Option<PathBuf>,
}

impl AssetCatalog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        log::info!("Asset catalog rooted at {}", base_dir.display());
        Self {
            base_dir,
            images: HashMap::new(),
            sounds: HashMap::new(),
            music: None,
        }
    }

    fn path(&self, kind: &str, name: &str) -> PathBuf {
        self.base_dir.join(kind).join(name)
    }

    /// Number of distinct (name, size) images resolved so far
    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    /// Music file queued by the last successful `load_music`
    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }
}

impl AssetProvider for AssetCatalog {
    fn image(&mut self, name: &str, size: (u32, u32)) -> Image {
        let key = (name.to_string(), size);
        if let Some(image) = self.images.get(&key) {
            return image.clone();
        }

        let path = self.path("images", name);
        let image = if path.is_file() {
            Image {
                name: name.to_string(),
                width: size.0,
                height: size.1,
                source: Some(path),
            }
        } else {
            log::debug!("Image {} missing, using placeholder", name);
            Image::placeholder(name, size)
        };

        self.images.insert(key, image.clone());
        image
    }

    fn sound(&mut self, name: &str) -> Option<SoundHandle> {
        if let Some(handle) = self.sounds.get(name) {
            return Some(handle.clone());
        }

        let path = self.path("sounds", name);
        if !path.is_file() {
            log::debug!("Sound {} missing", name);
            return None;
        }

        let handle = SoundHandle {
            name: name.to_string(),
            path,
        };
        self.sounds.insert(name.to_string(), handle.clone());
        Some(handle)
    }

    fn load_music(&mut self, name: &str) -> bool {
        let path = self.path("sounds", name);
        if !path.is_file() {
            log::info!("No background music at {}", path.display());
            return false;
        }
        self.music = Some(path);
        true
    }
}
