use bevy::prelude::*;

/// Image load state codes reported to the web host.
pub const IMAGE_PENDING: i32 = 0;
pub const IMAGE_LOADED: i32 = 1;
pub const IMAGE_FAILED: i32 = -1;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub manifest_failed: bool,
    pub images_resolved: bool,
    /// Per image, in manifest order: file path and load state code.
    pub image_loading_states: Vec<(String, i32)>,
    pub gallery_created: bool,
}

impl LoadingProgress {
    /// Fraction of images that have settled, loaded or failed.
    pub fn image_fraction(&self) -> f32 {
        if self.image_loading_states.is_empty() {
            return if self.images_resolved { 1.0 } else { 0.0 };
        }
        let settled = self
            .image_loading_states
            .iter()
            .filter(|(_, state)| *state != IMAGE_PENDING)
            .count();
        settled as f32 / self.image_loading_states.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_counts_failures_as_settled() {
        let progress = LoadingProgress {
            image_loading_states: vec![
                ("a.jpg".into(), IMAGE_LOADED),
                ("b.jpg".into(), IMAGE_FAILED),
                ("c.jpg".into(), IMAGE_PENDING),
                ("d.jpg".into(), IMAGE_PENDING),
            ],
            ..default()
        };
        assert_eq!(progress.image_fraction(), 0.5);
    }

    #[test]
    fn empty_gallery_is_done_once_resolved() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.image_fraction(), 0.0);
        progress.images_resolved = true;
        assert_eq!(progress.image_fraction(), 1.0);
    }
}
