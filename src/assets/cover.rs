use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::BookstrokeResult;

const COVER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded cover art in premultiplied RGBA8.
pub struct CoverImage {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Where tooltips get cover art from. Missing art is `None`, never an error.
pub trait CoverSource {
    fn cover_for(&mut self, title: &str) -> Option<CoverImage>;
}

#[derive(Clone, Copy, Debug, Default)]
/// A source with no cover art at all.
pub struct NoCovers;

impl CoverSource for NoCovers {
    fn cover_for(&mut self, _title: &str) -> Option<CoverImage> {
        None
    }
}

#[derive(Clone, Debug)]
/// Covers read from `<root>/<slug>.{png,jpg,jpeg}` on first request, cached by title.
///
/// Misses are cached too, so a title is looked up on disk at most once.
pub struct CoverStore {
    root: PathBuf,
    by_title: HashMap<String, Option<CoverImage>>,
}

impl CoverStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            by_title: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn insert(&mut self, title: impl Into<String>, cover: CoverImage) {
        self.by_title.insert(title.into(), Some(cover));
    }

    pub fn cached_titles(&self) -> usize {
        self.by_title.len()
    }

    fn load(&self, title: &str) -> Option<CoverImage> {
        let slug = cover_slug(title);
        if slug.is_empty() {
            return None;
        }
        let path = COVER_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{slug}.{ext}")))
            .find(|p| p.is_file())?;

        match read_cover(&path) {
            Ok(cover) => Some(cover),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cover art unreadable, skipping");
                None
            }
        }
    }
}

impl CoverSource for CoverStore {
    fn cover_for(&mut self, title: &str) -> Option<CoverImage> {
        if let Some(hit) = self.by_title.get(title) {
            return hit.clone();
        }
        let loaded = self.load(title);
        self.by_title.insert(title.to_string(), loaded.clone());
        loaded
    }
}

/// File stem used for a title's cover: lowercase alphanumerics joined by single dashes.
pub fn cover_slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn read_cover(path: &Path) -> BookstrokeResult<CoverImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read cover '{}'", path.display()))?;
    decode_cover(&bytes)
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_cover(bytes: &[u8]) -> BookstrokeResult<CoverImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode cover image")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(CoverImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cover.rs"]
mod tests;
