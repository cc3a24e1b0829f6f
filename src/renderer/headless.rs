//! Output sinks that run without a window

use crate::assets::AssetProvider;

use super::frame::{Frame, Overlay};

/// Consumer of finished frames
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Resolves every sprite through the asset provider and logs a summary.
///
/// Stands in for a windowed backend: image lookups and caching happen
/// exactly as they would for real drawing.
pub struct HeadlessRenderer<A: AssetProvider> {
    assets: A,
    frames: u64,
    placeholders: u64,
    last_overlay: Option<Overlay>,
}

impl<A: AssetProvider> HeadlessRenderer<A> {
    pub fn new(assets: A) -> Self {
        Self {
            assets,
            frames: 0,
            placeholders: 0,
            last_overlay: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sprites drawn with a placeholder so far
    pub fn placeholders(&self) -> u64 {
        self.placeholders
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }
}

impl<A: AssetProvider> RenderSink for HeadlessRenderer<A> {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        for item in &frame.items {
            let image = self.assets.image(item.sprite(), item.pixel_size());
            if image.is_placeholder() {
                self.placeholders += 1;
            }
        }

        if self.last_overlay != Some(frame.overlay) {
            log::debug!("Screen overlay now {:?}", frame.overlay);
            self.last_overlay = Some(frame.overlay);
        }
        if let Some(hud) = &frame.hud
            && self.frames % 300 == 0
        {
            log::debug!(
                "frame {}: score {} wave {} hp {}/{} energy {:.0}% tier {} sprites {}",
                self.frames,
                hud.score,
                hud.wave,
                hud.health,
                hud.max_health,
                hud.energy * 100.0,
                hud.weapon_tier,
                frame.items.len()
            );
        }
    }
}

/// Keeps the most recent frame; useful in tests
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub last: Option<Frame>,
    pub presented: usize,
}

impl RenderSink for CaptureSink {
    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        self.last = Some(frame.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::renderer::build_frame;
    use crate::sim::Session;

    #[test]
    fn test_headless_counts_placeholders() {
        let catalog = AssetCatalog::new("/nonexistent/star-sweep-assets");
        let mut renderer = HeadlessRenderer::new(catalog);
        let session = Session::new(5, 0);
        let frame = build_frame(&session);

        renderer.present(&frame);
        renderer.present(&frame);
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.placeholders(), 2 * frame.items.len() as u64);
        // Player plus light and/or heavy enemy art
        assert!(renderer.assets_mut().cached_images() >= 2);
    }
}
