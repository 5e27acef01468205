//! Mock result generator.
//!
//! Image mode is deterministic (file-name length mod 3); clinical mode draws
//! from the injected random source. Feature triples are fixed per label.

use rand::Rng;

use super::inputs::AnalysisRequest;
use super::model::{FeatureImportance, Prediction};

pub const FEATURE_NAMES: [&str; 3] = ["radius_mean", "texture_worst", "concavity_mean"];

const CONFIDENCE_FLOOR: f64 = 0.85;
const CONFIDENCE_SPAN: f64 = 0.14;

pub const REPORT_ID_PREFIX: &str = "ONCO-";
const REPORT_ID_BODY_LEN: usize = 5;
/// Base-36 without the letters the share decoder keys on.
const REPORT_ID_ALPHABET: &[u8] = b"0123456789ACDEFGHIJKLNOPQRSTUVWXYZ";

/// Length is counted in UTF-16 code units, like a browser `File.name.length`.
pub fn prediction_for_file_name(name: &str) -> Prediction {
    match name.encode_utf16().count() % 3 {
        0 => Prediction::Malignant,
        1 => Prediction::Benign,
        _ => Prediction::Normal,
    }
}

/// `draw` is expected in `[0, 1)`.
pub fn prediction_for_draw(draw: f64) -> Prediction {
    if draw < 0.33 {
        Prediction::Normal
    } else if draw < 0.66 {
        Prediction::Benign
    } else {
        Prediction::Malignant
    }
}

pub fn clinical_prediction<R: Rng + ?Sized>(rng: &mut R) -> Prediction {
    prediction_for_draw(rng.gen::<f64>())
}

pub fn feature_importances(prediction: Prediction) -> Vec<FeatureImportance> {
    let values: [f64; 3] = match prediction {
        Prediction::Malignant => [0.45, 0.38, 0.22],
        Prediction::Benign => [0.15, -0.10, -0.15],
        Prediction::Normal => [-0.32, -0.21, -0.15],
    };
    FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| FeatureImportance::new(*name, value))
        .collect()
}

pub fn draw_confidence<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    CONFIDENCE_FLOOR + rng.gen::<f64>() * CONFIDENCE_SPAN
}

/// `ONCO-` followed by a class tag (`M`, `B` or `N`) and five random characters
/// that never contain `M` or `B`, so a shared link decodes to the same label.
pub fn report_id<R: Rng + ?Sized>(prediction: Prediction, rng: &mut R) -> String {
    let tag = match prediction {
        Prediction::Malignant => 'M',
        Prediction::Benign => 'B',
        Prediction::Normal => 'N',
    };
    let body: String = (0..REPORT_ID_BODY_LEN)
        .map(|_| REPORT_ID_ALPHABET[rng.gen_range(0..REPORT_ID_ALPHABET.len())] as char)
        .collect();
    format!("{REPORT_ID_PREFIX}{tag}{body}")
}

/// Everything the generator decides for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOutcome {
    pub id: String,
    pub prediction: Prediction,
    pub confidence: f64,
    pub features: Vec<FeatureImportance>,
}

pub fn generate<R: Rng + ?Sized>(request: &AnalysisRequest, rng: &mut R) -> GeneratedOutcome {
    let prediction = match request {
        AnalysisRequest::Scan(scan) => prediction_for_file_name(&scan.name),
        AnalysisRequest::Markers(_) => clinical_prediction(rng),
    };
    GeneratedOutcome {
        id: report_id(prediction, rng),
        prediction,
        confidence: draw_confidence(rng),
        features: feature_importances(prediction),
    }
}
