use crate::show::registry::{PresentationRegistry, Timing};

/// Opacity of an entry at show time `time`, in `[0, 1]`.
///
/// Three phases: a linear fade in over `fade_in`, full opacity, then a linear
/// fade out over the last `fade_out` seconds. Before `start` and from
/// `start + duration` on the entry is invisible. When the fade windows
/// overlap, fade in wins while it lasts.
pub fn opacity(timing: &Timing, time: f64) -> f64 {
    if time.is_nan() || time < timing.start {
        return 0.0;
    }

    let elapsed = time - timing.start;
    if elapsed >= timing.duration {
        return 0.0;
    }

    let remaining = timing.duration - elapsed;
    let alpha = if timing.fade_in > 0.0 && elapsed < timing.fade_in {
        elapsed / timing.fade_in
    } else if timing.fade_out > 0.0 && remaining < timing.fade_out {
        remaining / timing.fade_out
    } else {
        1.0
    };
    alpha.clamp(0.0, 1.0)
}

/// Visible entries for one show time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    pub time: f64,
    /// Entries with non-zero opacity, in registry (draw) order.
    pub nodes: Vec<EvaluatedEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedEntry {
    /// Index into [`PresentationRegistry::entries`].
    pub index: usize,
    pub opacity: f64,
}

/// Stateless evaluator from registry timeline to visible entries.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate every entry against the same `time`.
    #[tracing::instrument(skip(registry), fields(entries = registry.len()))]
    pub fn eval_frame(registry: &PresentationRegistry, time: f64) -> EvaluatedFrame {
        let nodes = registry
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let opacity = opacity(&entry.timing, time);
                (opacity > 0.0).then_some(EvaluatedEntry { index, opacity })
            })
            .collect();

        EvaluatedFrame { time, nodes }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timeline.rs"]
mod tests;
