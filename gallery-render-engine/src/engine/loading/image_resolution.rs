use super::progress::{IMAGE_FAILED, IMAGE_LOADED, IMAGE_PENDING};
use crate::engine::assets::image_asset::ImageAsset;
use bevy::prelude::*;

#[derive(Debug, Clone)]
pub enum ImageSlot {
    Pending,
    Resolved(ImageAsset),
    Failed,
}

impl ImageSlot {
    pub fn state_code(&self) -> i32 {
        match self {
            Self::Pending => IMAGE_PENDING,
            Self::Resolved(_) => IMAGE_LOADED,
            Self::Failed => IMAGE_FAILED,
        }
    }
}

/// Collects image loads that finish in any order into manifest-order slots.
///
/// Each slot settles exactly once. Later results for a settled slot are ignored.
#[derive(Resource, Debug, Default)]
pub struct ImageResolution {
    slots: Vec<ImageSlot>,
}

impl ImageResolution {
    pub fn new(image_count: usize) -> Self {
        Self {
            slots: (0..image_count).map(|_| ImageSlot::Pending).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    pub fn is_pending(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(ImageSlot::Pending))
    }

    pub fn resolve(&mut self, index: usize, asset: ImageAsset) {
        if self.is_pending(index) {
            self.slots[index] = ImageSlot::Resolved(asset);
        }
    }

    pub fn fail(&mut self, index: usize) {
        if self.is_pending(index) {
            self.slots[index] = ImageSlot::Failed;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self
            .slots
            .iter()
            .any(|slot| matches!(slot, ImageSlot::Pending))
    }

    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, ImageSlot::Failed))
            .count()
    }

    /// Resolved images with their manifest index, in manifest order.
    pub fn ordered(&self) -> impl Iterator<Item = (usize, &ImageAsset)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                ImageSlot::Resolved(asset) => Some((index, asset)),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::gallery_manifest::ImageEntry;

    fn asset(name: &str, width: u32) -> ImageAsset {
        let entry = ImageEntry::Path(name.into());
        ImageAsset::resolve(&entry, name.into(), UVec2::new(width, 100), 3.0, Handle::default())
            .unwrap()
    }

    fn sources(resolution: &ImageResolution) -> Vec<(usize, String)> {
        resolution
            .ordered()
            .map(|(index, asset)| (index, asset.source.clone()))
            .collect()
    }

    #[test]
    fn out_of_order_loads_keep_manifest_order() {
        let mut resolution = ImageResolution::new(3);
        resolution.resolve(2, asset("c.jpg", 300));
        resolution.resolve(0, asset("a.jpg", 100));
        assert!(!resolution.is_complete());

        resolution.resolve(1, asset("b.jpg", 200));
        assert!(resolution.is_complete());
        assert_eq!(
            sources(&resolution),
            vec![(0, "a.jpg".into()), (1, "b.jpg".into()), (2, "c.jpg".into())]
        );
    }

    #[test]
    fn failed_images_are_left_out() {
        let mut resolution = ImageResolution::new(3);
        resolution.resolve(1, asset("b.jpg", 200));
        resolution.fail(0);
        resolution.resolve(2, asset("c.jpg", 300));

        assert!(resolution.is_complete());
        assert_eq!(resolution.failed_count(), 1);
        assert_eq!(
            sources(&resolution),
            vec![(1, "b.jpg".into()), (2, "c.jpg".into())]
        );
        let codes: Vec<i32> = resolution.slots().iter().map(ImageSlot::state_code).collect();
        assert_eq!(codes, vec![IMAGE_FAILED, IMAGE_LOADED, IMAGE_LOADED]);
    }

    #[test]
    fn settled_slots_ignore_later_results() {
        let mut resolution = ImageResolution::new(1);
        resolution.fail(0);
        resolution.resolve(0, asset("late.jpg", 100));
        resolution.resolve(5, asset("stray.jpg", 100));

        assert!(resolution.ordered().next().is_none());
        assert_eq!(resolution.len(), 1);
    }

    #[test]
    fn empty_manifest_is_complete() {
        assert!(ImageResolution::new(0).is_complete());
    }
}
