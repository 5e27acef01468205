//! Mock inference stage sequencer.
//!
//! Walks the fixed stage list with illustrative pauses. Nothing is computed at
//! any stage; the walk only exists so the UI can show progress. The walk can be
//! cancelled between stages through a [`CancelToken`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::timing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    Preprocessing,
    FeatureExtraction,
    Classification,
    ExplanationGeneration,
    InterpretationGeneration,
    Complete,
}

impl Stage {
    /// Stages shown in the system log panel, in order.
    pub const PIPELINE: [Stage; 5] = [
        Stage::Preprocessing,
        Stage::FeatureExtraction,
        Stage::Classification,
        Stage::ExplanationGeneration,
        Stage::InterpretationGeneration,
    ];

    pub fn next(self) -> Option<Stage> {
        match self {
            Self::Idle => Some(Self::Preprocessing),
            Self::Preprocessing => Some(Self::FeatureExtraction),
            Self::FeatureExtraction => Some(Self::Classification),
            Self::Classification => Some(Self::ExplanationGeneration),
            Self::ExplanationGeneration => Some(Self::InterpretationGeneration),
            Self::InterpretationGeneration => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    pub fn is_running(self) -> bool {
        !matches!(self, Self::Idle | Self::Complete)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Preprocessing => "Preprocessing Image...",
            Self::FeatureExtraction => "CNN Feature Extraction...",
            Self::Classification => "ML Classification (Random Forest)...",
            Self::ExplanationGeneration => "Generating SHAP Explanations...",
            Self::InterpretationGeneration => "Generating AI Clinical Insights...",
            Self::Complete => "Complete",
        }
    }

    pub fn log_tag(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Preprocessing => "PRE_PROCESS_IO",
            Self::FeatureExtraction => "CNN_FEAT_V3",
            Self::Classification => "RAND_FOREST_EXE",
            Self::ExplanationGeneration => "SHAP_INTERPRET",
            Self::InterpretationGeneration => "GEMINI_LLM_SUMMARY",
            Self::Complete => "COMPLETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("stage {to:?} cannot follow {from:?}")]
    OutOfOrder { from: Stage, to: Stage },
}

/// Holds the observable stage of one run and refuses to move backwards or skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTracker {
    current: Stage,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self {
            current: Stage::Idle,
        }
    }
}

impl StageTracker {
    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn advance(&mut self, to: Stage) -> Result<(), StageError> {
        if self.current.next() == Some(to) {
            self.current = to;
            Ok(())
        } else {
            Err(StageError::OutOfOrder {
                from: self.current,
                to,
            })
        }
    }

    pub fn reset(&mut self) {
        self.current = Stage::Idle;
    }
}

/// Pause after entering each timed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    pub preprocessing: Duration,
    pub feature_extraction: Duration,
    pub classification: Duration,
    pub explanation: Duration,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            preprocessing: Duration::from_millis(800),
            feature_extraction: Duration::from_millis(1_000),
            classification: Duration::from_millis(800),
            explanation: Duration::from_millis(900),
        }
    }
}

impl StageTimings {
    pub fn uniform(pause: Duration) -> Self {
        Self {
            preprocessing: pause,
            feature_extraction: pause,
            classification: pause,
            explanation: pause,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        let scale = |d: Duration| d.mul_f64(factor.max(0.0));
        Self {
            preprocessing: scale(self.preprocessing),
            feature_extraction: scale(self.feature_extraction),
            classification: scale(self.classification),
            explanation: scale(self.explanation),
        }
    }

    fn timed_stages(&self) -> [(Stage, Duration); 4] {
        [
            (Stage::Preprocessing, self.preprocessing),
            (Stage::FeatureExtraction, self.feature_extraction),
            (Stage::Classification, self.classification),
            (Stage::ExplanationGeneration, self.explanation),
        ]
    }
}

/// Shared abort flag for one run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stage walk cancelled at {at:?}")]
pub struct Cancelled {
    /// Last stage that was entered before the abort was noticed.
    pub at: Stage,
}

/// Walk Preprocessing through ExplanationGeneration with their pauses, then
/// enter InterpretationGeneration. `on_stage` sees every transition in order.
pub async fn walk_timed_stages<F>(
    timings: &StageTimings,
    cancel: &CancelToken,
    mut on_stage: F,
) -> Result<(), Cancelled>
where
    F: FnMut(Stage),
{
    let mut reached = Stage::Idle;

    for (stage, pause) in timings.timed_stages() {
        if cancel.is_cancelled() {
            return Err(Cancelled { at: reached });
        }
        debug!(tag = stage.log_tag(), pause_ms = pause.as_millis() as u64, "entering stage");
        on_stage(stage);
        reached = stage;
        timing::sleep(pause).await;
    }

    if cancel.is_cancelled() {
        return Err(Cancelled { at: reached });
    }
    on_stage(Stage::InterpretationGeneration);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_the_whole_sequence() {
        let mut stage = Stage::Idle;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(seen.last(), Some(&Stage::Complete));
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn tracker_rejects_skips_and_rewinds() {
        let mut tracker = StageTracker::default();
        assert!(tracker.advance(Stage::Preprocessing).is_ok());
        assert_eq!(
            tracker.advance(Stage::Classification),
            Err(StageError::OutOfOrder {
                from: Stage::Preprocessing,
                to: Stage::Classification
            })
        );
        assert!(tracker.advance(Stage::Idle).is_err());
        tracker.reset();
        assert_eq!(tracker.current(), Stage::Idle);
    }

    #[test]
    fn running_excludes_idle_and_complete() {
        assert!(!Stage::Idle.is_running());
        assert!(!Stage::Complete.is_running());
        assert!(Stage::PIPELINE.iter().all(|s| s.is_running()));
    }

    #[tokio::test]
    async fn walk_reports_each_stage_once_in_order() {
        let mut tracker = StageTracker::default();
        let mut seen = Vec::new();
        let outcome = walk_timed_stages(
            &StageTimings::uniform(Duration::from_millis(1)),
            &CancelToken::new(),
            |stage| {
                tracker.advance(stage).expect("forward only");
                seen.push(stage);
            },
        )
        .await;

        assert!(outcome.is_ok());
        assert_eq!(seen, Stage::PIPELINE.to_vec());
    }

    #[tokio::test]
    async fn cancelled_before_start_emits_nothing() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut seen = Vec::new();
        let outcome =
            walk_timed_stages(&StageTimings::default(), &cancel, |stage| seen.push(stage)).await;
        assert_eq!(outcome, Err(Cancelled { at: Stage::Idle }));
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn cancel_during_pause_stops_at_next_boundary() {
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let mut seen = Vec::new();
        let outcome = walk_timed_stages(
            &StageTimings::uniform(Duration::from_millis(2)),
            &cancel,
            |stage| {
                seen.push(stage);
                if stage == Stage::FeatureExtraction {
                    trigger.cancel();
                }
            },
        )
        .await;

        assert_eq!(
            outcome,
            Err(Cancelled {
                at: Stage::FeatureExtraction
            })
        );
        assert_eq!(seen, vec![Stage::Preprocessing, Stage::FeatureExtraction]);
    }

    #[test]
    fn scaling_multiplies_each_pause() {
        let half = StageTimings::default().scaled(0.5);
        assert_eq!(half.preprocessing, Duration::from_millis(400));
        assert_eq!(half.explanation, Duration::from_millis(450));
        assert_eq!(StageTimings::default().scaled(0.0), StageTimings::uniform(Duration::ZERO));
    }
}
