//! One simulated analysis run: stage walk, mock generation, interpretation.

use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use super::generator;
use super::inputs::AnalysisRequest;
use super::interpretation::Interpreter;
use super::model::DiagnosisResult;
use super::stages::{walk_timed_stages, CancelToken, Cancelled, Stage, StageTimings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

#[derive(Clone)]
pub struct Pipeline {
    timings: StageTimings,
    interpreter: Interpreter,
}

impl Pipeline {
    pub fn new(timings: StageTimings, interpreter: Interpreter) -> Self {
        Self {
            timings,
            interpreter,
        }
    }

    /// Run to completion unless `cancel` fires. `on_stage` observes every stage
    /// from Preprocessing through Complete, in order.
    pub async fn run<R, F>(
        &self,
        request: AnalysisRequest,
        rng: &mut R,
        cancel: &CancelToken,
        mut on_stage: F,
    ) -> Result<DiagnosisResult, PipelineError>
    where
        R: Rng + ?Sized,
        F: FnMut(Stage),
    {
        info!(mode = request.mode().as_str(), "analysis started");
        walk_timed_stages(&self.timings, cancel, &mut on_stage).await?;

        let outcome = generator::generate(&request, rng);
        let interpretation = self
            .interpreter
            .interpret(outcome.prediction, &outcome.features)
            .await;

        if cancel.is_cancelled() {
            return Err(Cancelled {
                at: Stage::InterpretationGeneration,
            }
            .into());
        }

        let image = match &request {
            AnalysisRequest::Scan(scan) => scan.preview.clone(),
            AnalysisRequest::Markers(_) => None,
        };

        let result = DiagnosisResult {
            id: outcome.id,
            created_at: OffsetDateTime::now_utc(),
            mode: request.mode(),
            prediction: outcome.prediction,
            confidence: outcome.confidence,
            image,
            features: outcome.features,
            interpretation: Some(interpretation.text),
            published: false,
        };

        on_stage(Stage::Complete);
        info!(id = %result.id, prediction = %result.prediction, "analysis complete");
        Ok(result)
    }
}
