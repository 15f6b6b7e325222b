use crate::clothing::{tier_for, TIERS};
use crate::models::ClothingImage;
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Reference outfit images, one directory per temperature tier.
///
/// ```text
/// img/
///   very-hot/sleeveless.jpg
///   chilly/jacket.png
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    by_tier: HashMap<&'static str, Vec<ClothingImage>>,
}

impl ImageCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scans `root` once. A missing or unreadable root gives an empty catalog.
    pub fn load(root: &Path) -> Self {
        if !root.is_dir() {
            warn!("🖼️  Image directory {} not found, serving no images", root.display());
            return Self::empty();
        }

        let mut by_tier = HashMap::new();
        for tier in TIERS.iter() {
            let dir = root.join(tier.slug);
            let mut images: Vec<ClothingImage> = match fs::read_dir(&dir) {
                Ok(entries) => entries
                    .filter_map(Result::ok)
                    .filter_map(|e| e.file_name().into_string().ok())
                    .filter(|name| is_image(name))
                    .map(|name| ClothingImage {
                        filename: format!("{}/{}", tier.slug, name),
                    })
                    .collect(),
                Err(_) => Vec::new(),
            };
            images.sort_by(|a, b| a.filename.cmp(&b.filename));
            by_tier.insert(tier.slug, images);
        }

        let total: usize = by_tier.values().map(Vec::len).sum();
        info!("🖼️  Loaded {} clothing images from {}", total, root.display());

        Self { by_tier }
    }

    pub fn images_for_temp(&self, temp_c: f64) -> Vec<ClothingImage> {
        self.by_tier
            .get(tier_for(temp_c).slug)
            .cloned()
            .unwrap_or_default()
    }
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
