//! Result model shared by the workspace and the public report page.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisMode {
    Image,
    Clinical,
}

impl DiagnosisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Clinical => "clinical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Malignant,
    Benign,
    Normal,
}

impl Prediction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Malignant => "Malignant",
            Self::Benign => "Benign",
            Self::Normal => "Normal",
        }
    }

    /// Modifier used for the result card colour scheme.
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Malignant => "malignant",
            Self::Benign => "benign",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
}

impl Impact {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// One bar of the SHAP-style chart. `impact` always agrees with the sign of
/// `value`; the fields are private so that cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFeature")]
pub struct FeatureImportance {
    feature: String,
    value: f64,
    impact: Impact,
}

#[derive(Deserialize)]
struct RawFeature {
    feature: String,
    value: f64,
}

impl From<RawFeature> for FeatureImportance {
    fn from(raw: RawFeature) -> Self {
        Self::new(raw.feature, raw.value)
    }
}

impl FeatureImportance {
    pub fn new(feature: impl Into<String>, value: f64) -> Self {
        Self {
            feature: feature.into(),
            value,
            impact: Impact::of(value),
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn impact(&self) -> Impact {
        self.impact
    }
}

/// Transient reference to the uploaded scan (a `data:` URL). Never persisted.
/// The URL is shared, so cloning a workspace snapshot or a result does not
/// copy the encoded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPreview {
    pub file_name: String,
    pub data_url: Arc<str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub mode: DiagnosisMode,
    pub prediction: Prediction,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ScanPreview>,
    pub features: Vec<FeatureImportance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl DiagnosisResult {
    /// The only mutation a result sees after creation.
    pub fn publish(&mut self) {
        self.published = true;
    }
}
