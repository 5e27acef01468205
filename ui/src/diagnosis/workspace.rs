//! State of the diagnosis workspace, kept free of UI types so it can be tested.

use super::inputs::{AnalysisRequest, ClinicalMarkers, MarkerField, ScanFile};
use super::model::{DiagnosisMode, DiagnosisResult};
use super::stages::{Stage, StageTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Initialize,
    Running,
    Restart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceState {
    pub mode: DiagnosisMode,
    pub scan: Option<ScanFile>,
    pub markers: ClinicalMarkers,
    pub result: Option<DiagnosisResult>,
    stages: StageTracker,
    run_id: u64,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self {
            mode: DiagnosisMode::Image,
            scan: None,
            markers: ClinicalMarkers::default(),
            result: None,
            stages: StageTracker::default(),
            run_id: 0,
        }
    }
}

impl WorkspaceState {
    pub fn stage(&self) -> Stage {
        self.stages.current()
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_processing(&self) -> bool {
        self.stage().is_running()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_processing()
            && AnalysisRequest::from_workspace(self.mode, self.scan.as_ref(), &self.markers)
                .is_some()
    }

    pub fn submit_label(&self) -> SubmitLabel {
        match self.stage() {
            Stage::Complete => SubmitLabel::Restart,
            stage if stage.is_running() => SubmitLabel::Running,
            _ => SubmitLabel::Initialize,
        }
    }

    /// Switching mode clears everything, like pressing reset.
    pub fn select_mode(&mut self, mode: DiagnosisMode) {
        self.reset();
        self.mode = mode;
    }

    pub fn select_scan(&mut self, scan: ScanFile) {
        self.invalidate_run();
        self.scan = Some(scan);
        self.result = None;
    }

    pub fn set_marker(&mut self, field: MarkerField, value: String) {
        self.markers.set(field, value);
    }

    pub fn reset(&mut self) {
        self.invalidate_run();
        self.scan = None;
        self.result = None;
        self.markers = ClinicalMarkers::default();
    }

    /// Start a run if the inputs allow it. Returns the run id that stage
    /// updates and the final result must carry.
    pub fn begin_run(&mut self) -> Option<(u64, AnalysisRequest)> {
        if self.is_processing() {
            return None;
        }
        let request = AnalysisRequest::from_workspace(self.mode, self.scan.as_ref(), &self.markers)?;
        self.run_id += 1;
        self.stages.reset();
        self.result = None;
        Some((self.run_id, request))
    }

    /// Apply a stage reported by run `run_id`. Stale or out-of-order updates
    /// are dropped.
    pub fn apply_stage(&mut self, run_id: u64, stage: Stage) -> bool {
        run_id == self.run_id && self.stages.advance(stage).is_ok()
    }

    pub fn finish_run(&mut self, run_id: u64, result: DiagnosisResult) -> bool {
        if run_id != self.run_id || self.stage() != Stage::Complete {
            return false;
        }
        self.result = Some(result);
        true
    }

    /// Publish the active result in place.
    pub fn publish_result(&mut self) -> Option<&DiagnosisResult> {
        let result = self.result.as_mut()?;
        result.publish();
        Some(result)
    }

    fn invalidate_run(&mut self) {
        self.run_id += 1;
        self.stages.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::model::Prediction;
    use time::OffsetDateTime;

    fn sample_result(id: &str) -> DiagnosisResult {
        DiagnosisResult {
            id: id.into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            mode: DiagnosisMode::Image,
            prediction: Prediction::Normal,
            confidence: 0.9,
            image: None,
            features: Vec::new(),
            interpretation: None,
            published: false,
        }
    }

    fn walk_to_complete(state: &mut WorkspaceState, run_id: u64) {
        let mut stage = Stage::Idle;
        while let Some(next) = stage.next() {
            assert!(state.apply_stage(run_id, next));
            stage = next;
        }
    }

    #[test]
    fn submit_needs_input() {
        let mut state = WorkspaceState::default();
        assert!(!state.can_submit());
        assert!(state.begin_run().is_none());

        state.select_scan(ScanFile::new("scan.png", 12));
        assert!(state.can_submit());
        assert_eq!(state.submit_label(), SubmitLabel::Initialize);
    }

    #[test]
    fn submit_disabled_while_running() {
        let mut state = WorkspaceState::default();
        state.select_scan(ScanFile::new("scan.png", 12));
        let (run_id, _) = state.begin_run().expect("run starts");
        assert!(state.apply_stage(run_id, Stage::Preprocessing));
        assert!(state.is_processing());
        assert!(!state.can_submit());
        assert!(state.begin_run().is_none());
        assert_eq!(state.submit_label(), SubmitLabel::Running);
    }

    #[test]
    fn full_run_installs_result() {
        let mut state = WorkspaceState::default();
        state.select_scan(ScanFile::new("scan.png", 12));
        let (run_id, _) = state.begin_run().expect("run starts");
        assert!(!state.finish_run(run_id, sample_result("early")));
        walk_to_complete(&mut state, run_id);
        assert!(state.finish_run(run_id, sample_result("ONCO-N00000")));
        assert_eq!(state.submit_label(), SubmitLabel::Restart);
        assert!(state.can_submit());

        let published = state.publish_result().map(|r| r.published);
        assert_eq!(published, Some(true));
    }

    #[test]
    fn stale_updates_are_ignored_after_reset() {
        let mut state = WorkspaceState::default();
        state.select_scan(ScanFile::new("scan.png", 12));
        let (run_id, _) = state.begin_run().expect("run starts");
        assert!(state.apply_stage(run_id, Stage::Preprocessing));

        state.select_mode(DiagnosisMode::Clinical);
        assert_eq!(state.stage(), Stage::Idle);
        assert!(state.scan.is_none());
        assert!(!state.apply_stage(run_id, Stage::FeatureExtraction));
        assert!(!state.finish_run(run_id, sample_result("late")));
        assert!(state.result.is_none());
    }

    #[test]
    fn snapshots_do_not_copy_the_scan_preview() {
        let mut state = WorkspaceState::default();
        state.select_scan(ScanFile::new("mammo.png", 0).with_bytes(&[7u8; 2048]));
        state.set_marker(MarkerField::TextureMean, "10.1".into());

        let snapshot = state.clone();
        let original = state.scan.as_ref().and_then(|s| s.preview.as_ref());
        let copied = snapshot.scan.as_ref().and_then(|s| s.preview.as_ref());
        match (original, copied) {
            (Some(a), Some(b)) => assert!(std::sync::Arc::ptr_eq(&a.data_url, &b.data_url)),
            _ => panic!("preview missing"),
        }
    }

    #[test]
    fn restart_clears_previous_result() {
        let mut state = WorkspaceState::default();
        state.mode = DiagnosisMode::Clinical;
        state.set_marker(MarkerField::RadiusMean, "17.9".into());
        let (first, _) = state.begin_run().expect("first run");
        walk_to_complete(&mut state, first);
        assert!(state.finish_run(first, sample_result("one")));

        let (second, request) = state.begin_run().expect("second run");
        assert_ne!(first, second);
        assert!(matches!(request, AnalysisRequest::Markers(_)));
        assert!(state.result.is_none());
        assert_eq!(state.stage(), Stage::Idle);
    }
}
