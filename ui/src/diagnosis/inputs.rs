//! Workspace inputs: the uploaded scan's metadata and the numeric marker form.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::model::{DiagnosisMode, ScanPreview};

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("dcm", "application/dicom"),
];

/// Metadata of the selected scan. Content is only ever used for the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFile {
    pub name: String,
    pub size_bytes: u64,
    pub preview: Option<ScanPreview>,
}

impl ScanFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            preview: None,
        }
    }

    /// Attach a `data:` URL built from the raw bytes.
    pub fn with_bytes(mut self, bytes: &[u8]) -> Self {
        let mime = mime_for(&self.name).unwrap_or("application/octet-stream");
        self.size_bytes = bytes.len() as u64;
        self.preview = Some(ScanPreview {
            file_name: self.name.clone(),
            data_url: Arc::from(format!("data:{mime};base64,{}", STANDARD.encode(bytes))),
        });
        self
    }

    pub fn is_image(&self) -> bool {
        mime_for(&self.name).is_some()
    }
}

fn mime_for(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerField {
    RadiusMean,
    TextureMean,
    PerimeterMean,
    AreaMean,
    SmoothnessMean,
}

impl MarkerField {
    /// Fields rendered in the numeric form, in display order.
    pub const FORM: [MarkerField; 4] = [
        MarkerField::RadiusMean,
        MarkerField::TextureMean,
        MarkerField::PerimeterMean,
        MarkerField::AreaMean,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::RadiusMean => "radius_mean",
            Self::TextureMean => "texture_mean",
            Self::PerimeterMean => "perimeter_mean",
            Self::AreaMean => "area_mean",
            Self::SmoothnessMean => "smoothness_mean",
        }
    }

    pub fn label(self) -> String {
        self.key().replacen('_', " ", 1)
    }
}

/// Raw text of the marker inputs, kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClinicalMarkers {
    pub radius_mean: String,
    pub texture_mean: String,
    pub perimeter_mean: String,
    pub area_mean: String,
    pub smoothness_mean: String,
}

impl ClinicalMarkers {
    pub fn get(&self, field: MarkerField) -> &str {
        match field {
            MarkerField::RadiusMean => &self.radius_mean,
            MarkerField::TextureMean => &self.texture_mean,
            MarkerField::PerimeterMean => &self.perimeter_mean,
            MarkerField::AreaMean => &self.area_mean,
            MarkerField::SmoothnessMean => &self.smoothness_mean,
        }
    }

    pub fn set(&mut self, field: MarkerField, value: String) {
        let slot = match field {
            MarkerField::RadiusMean => &mut self.radius_mean,
            MarkerField::TextureMean => &mut self.texture_mean,
            MarkerField::PerimeterMean => &mut self.perimeter_mean,
            MarkerField::AreaMean => &mut self.area_mean,
            MarkerField::SmoothnessMean => &mut self.smoothness_mean,
        };
        *slot = value;
    }

    /// Submission is gated on a usable radius value; nothing else is read.
    pub fn has_required(&self) -> bool {
        self.radius_mean
            .trim()
            .parse::<f64>()
            .map(f64::is_finite)
            .unwrap_or(false)
    }
}

/// Validated input for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Scan(ScanFile),
    Markers(ClinicalMarkers),
}

impl AnalysisRequest {
    /// `None` when the selected mode's required input is missing; the generator
    /// must not run in that case.
    pub fn from_workspace(
        mode: DiagnosisMode,
        scan: Option<&ScanFile>,
        markers: &ClinicalMarkers,
    ) -> Option<Self> {
        match mode {
            DiagnosisMode::Image => scan.cloned().map(Self::Scan),
            DiagnosisMode::Clinical => markers
                .has_required()
                .then(|| Self::Markers(markers.clone())),
        }
    }

    pub fn mode(&self) -> DiagnosisMode {
        match self {
            Self::Scan(_) => DiagnosisMode::Image,
            Self::Markers(_) => DiagnosisMode::Clinical,
        }
    }
}
