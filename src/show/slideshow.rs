use crate::{
    assets::store::{ImageHandle, ImageLoader},
    compose::viewport::{Compositor, MonitorView, ViewportDraw},
    eval::{
        clock::Clock,
        timeline::{EvaluatedFrame, Evaluator},
    },
    foundation::error::SlideshowResult,
    parse::directive::parse_config,
    show::registry::PresentationRegistry,
};

/// A loaded slideshow: the parsed registry plus one resolved image per entry.
///
/// Built once at startup and read-only afterwards. Every per-frame call takes
/// the show time explicitly.
#[derive(Clone, Debug)]
pub struct Slideshow {
    registry: PresentationRegistry,
    images: Vec<ImageHandle>,
}

impl Slideshow {
    /// Parse `text` and resolve every entry's image through `loader`.
    ///
    /// Parse failures and missing images abort the load; there is no partial
    /// slideshow.
    #[tracing::instrument(skip(text, loader))]
    pub fn load(text: &str, loader: &mut dyn ImageLoader) -> SlideshowResult<Self> {
        let registry = parse_config(text)?;
        Self::from_registry(registry, loader)
    }

    pub fn from_registry(
        registry: PresentationRegistry,
        loader: &mut dyn ImageLoader,
    ) -> SlideshowResult<Self> {
        let images = registry
            .iter()
            .map(|entry| loader.load(&entry.source))
            .collect::<SlideshowResult<Vec<_>>>()?;
        tracing::info!(entries = registry.len(), "slideshow loaded");
        Ok(Self { registry, images })
    }

    pub fn registry(&self) -> &PresentationRegistry {
        &self.registry
    }

    /// Image handle per registry entry, same order.
    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    pub fn eval(&self, time: f64) -> EvaluatedFrame {
        Evaluator::eval_frame(&self.registry, time)
    }

    /// Draw lists for every monitor at show time `time`.
    pub fn draw(&self, time: f64, views: &[MonitorView]) -> SlideshowResult<Vec<ViewportDraw>> {
        let frame = self.eval(time);
        views
            .iter()
            .map(|view| Compositor::compose(&frame, &self.registry, &self.images, *view))
            .collect()
    }

    /// Sample `clock` once and build draw lists for every monitor.
    pub fn draw_now(
        &self,
        clock: &dyn Clock,
        views: &[MonitorView],
    ) -> SlideshowResult<(f64, Vec<ViewportDraw>)> {
        let time = clock.now_secs();
        Ok((time, self.draw(time, views)?))
    }

    /// Whether nothing is on screen from `time` onwards.
    pub fn is_finished(&self, time: f64) -> bool {
        time >= self.registry.show_end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/slideshow.rs"]
mod tests;
