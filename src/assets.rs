//! Image handles supplied by the host
//!
//! The core never decodes images. Objects carry a variant index; the host's
//! catalog turns `(category, variant)` back into whatever handle it draws with.

use crate::sim::{Category, VariantCounts};

/// Interchangeable image handles per category plus a background
#[derive(Debug, Clone)]
pub struct AssetCatalog<H> {
    pub fruits: Vec<H>,
    pub flowers: Vec<H>,
    pub pests: Vec<H>,
    pub background: H,
}

impl<H> AssetCatalog<H> {
    pub fn new(fruits: Vec<H>, flowers: Vec<H>, pests: Vec<H>, background: H) -> Self {
        if fruits.is_empty() || flowers.is_empty() || pests.is_empty() {
            log::warn!("Asset catalog has a category without images");
        }
        Self {
            fruits,
            flowers,
            pests,
            background,
        }
    }

    fn handles(&self, category: Category) -> &[H] {
        match category {
            Category::Fruit => &self.fruits,
            Category::Flower => &self.flowers,
            Category::Pest => &self.pests,
        }
    }

    /// Handle for an object's variant (wraps if the catalog is smaller than the spawner assumed)
    pub fn pick(&self, category: Category, variant: usize) -> Option<&H> {
        let handles = self.handles(category);
        if handles.is_empty() {
            None
        } else {
            handles.get(variant % handles.len())
        }
    }

    /// Variant counts for the spawner
    pub fn variant_counts(&self) -> VariantCounts {
        VariantCounts {
            fruit: self.fruits.len(),
            flower: self.flowers.len(),
            pest: self.pests.len(),
        }
    }
}
