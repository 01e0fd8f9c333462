use crate::{
    assets::store::ImageHandle,
    eval::timeline::EvaluatedFrame,
    foundation::{
        core::{Affine, Rect, Vec2},
        error::{SlideshowError, SlideshowResult},
    },
    show::registry::PresentationRegistry,
};

/// The part of the virtual screen one monitor shows, in screen-fraction
/// space (`[0, 1]` on both axes, origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MonitorView {
    pub visible: Rect,
}

impl MonitorView {
    /// A monitor that shows the whole virtual screen.
    pub fn full() -> Self {
        Self {
            visible: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    pub fn new(visible: Rect) -> SlideshowResult<Self> {
        if !(visible.width() > 0.0 && visible.height() > 0.0) {
            return Err(SlideshowError::validation(format!(
                "monitor view must have a positive area, got {visible:?}"
            )));
        }
        Ok(Self { visible })
    }

    /// Derive the view from this monitor's frustum and the frustum of the
    /// whole display, both given as `[left, right, bottom, top]`.
    ///
    /// Each bound is expressed as a fraction of the matching master bound, so
    /// a monitor covering the left half of a symmetric display has
    /// fractions `(1, 0, 1, 1)`.
    pub fn from_frustums(frustum: [f64; 4], master: [f64; 4]) -> SlideshowResult<Self> {
        if master.iter().any(|m| *m == 0.0 || !m.is_finite()) {
            return Err(SlideshowError::validation(
                "master frustum bounds must be finite and non-zero",
            ));
        }
        let [left, right, bottom, top] = [
            frustum[0] / master[0],
            frustum[1] / master[1],
            frustum[2] / master[2],
            frustum[3] / master[3],
        ];
        // Fractions are relative to the display centre, which sits at 0.5.
        Self::new(Rect::new(
            (1.0 - left) * 0.5,
            (1.0 - bottom) * 0.5,
            (1.0 + right) * 0.5,
            (1.0 + top) * 0.5,
        ))
    }

    /// Split the virtual screen into `count` equal side-by-side monitors,
    /// left to right.
    pub fn columns(count: u32) -> SlideshowResult<Vec<Self>> {
        if count == 0 {
            return Err(SlideshowError::validation("monitor count must be > 0"));
        }
        let w = 1.0 / f64::from(count);
        (0..count)
            .map(|i| {
                let x0 = f64::from(i) * w;
                Self::new(Rect::new(x0, 0.0, x0 + w, 1.0))
            })
            .collect()
    }

    /// Maps this monitor's visible region, in the `[-1, 1]` display space
    /// used by [`DrawInstruction::model`], onto normalized device
    /// coordinates.
    pub fn projection(&self) -> Affine {
        let display = to_display_space(self.visible);
        Affine::scale_non_uniform(2.0 / display.width(), 2.0 / display.height())
            * Affine::translate(-display.center().to_vec2())
    }
}

fn to_display_space(r: Rect) -> Rect {
    Rect::new(
        r.x0 * 2.0 - 1.0,
        r.y0 * 2.0 - 1.0,
        r.x1 * 2.0 - 1.0,
        r.y1 * 2.0 - 1.0,
    )
}

/// One image to draw, renderer agnostic.
///
/// `position` and `size` are the entry's values in screen-fraction space, kept
/// as written: a negative size extends the quad left of or below `position`
/// and mirrors the image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DrawInstruction {
    pub position: Vec2,
    pub size: Vec2,
    /// Alpha in `(0, 1]`.
    pub opacity: f64,
    pub image: ImageHandle,
}

impl DrawInstruction {
    /// Screen-fraction area covered, regardless of mirroring.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position.to_point(), self.size.to_size())
    }

    /// Places the unit quad `[0, 1]²` at `position` with extent `size` in the
    /// `[-1, 1]` display space.
    pub fn model(&self) -> Affine {
        Affine::translate(self.position * 2.0 - Vec2::new(1.0, 1.0))
            * Affine::scale_non_uniform(self.size.x * 2.0, self.size.y * 2.0)
    }
}

/// Draw list for one monitor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ViewportDraw {
    pub view: MonitorView,
    pub projection: Affine,
    /// In draw order; later instructions are drawn over earlier ones.
    pub instructions: Vec<DrawInstruction>,
}

/// Turns evaluated frames into per-monitor draw lists.
pub struct Compositor;

impl Compositor {
    /// `images[i]` must be the handle of `registry.entries()[i]`.
    pub fn compose(
        frame: &EvaluatedFrame,
        registry: &PresentationRegistry,
        images: &[ImageHandle],
        view: MonitorView,
    ) -> SlideshowResult<ViewportDraw> {
        let instructions = frame
            .nodes
            .iter()
            .filter(|node| node.opacity > 0.0)
            .map(|node| {
                let entry = registry.get(node.index).ok_or_else(|| {
                    SlideshowError::validation(format!("no entry at index {}", node.index))
                })?;
                let image = images.get(node.index).copied().ok_or_else(|| {
                    SlideshowError::validation(format!("no image handle for entry {}", node.index))
                })?;
                Ok(DrawInstruction {
                    position: entry.position,
                    size: entry.size,
                    opacity: node.opacity,
                    image,
                })
            })
            .collect::<SlideshowResult<Vec<_>>>()?;

        Ok(ViewportDraw {
            view,
            projection: view.projection(),
            instructions,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/viewport.rs"]
mod tests;
