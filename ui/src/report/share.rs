//! Share links: a result's identifier carried in the `reportId` query parameter.
//!
//! A link carries no payload beyond the identifier. Opening one synthesises a
//! mock report from the identifier text alone; nothing is fetched or stored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use url::Url;

use crate::diagnosis::model::{DiagnosisMode, DiagnosisResult, FeatureImportance, Prediction};

pub const REPORT_PARAM: &str = "reportId";

pub const SHARED_INTERPRETATION: &str = "This analysis indicates consistent patterns with the selected classification. SHAP values suggest the model prioritized structural density and boundary regularity. Further clinical correlation is recommended.";

const SHARED_CONFIDENCE_BASE: f64 = 0.92;
const SHARED_CONFIDENCE_JITTER: f64 = 0.05;

/// Link for `id` based on the current location: every other query parameter
/// and the fragment are dropped. Falls back to `base_url` when `current_href`
/// is not a valid absolute url.
pub fn share_link(current_href: &str, base_url: &str, id: &str) -> String {
    let mut url = match Url::parse(current_href).or_else(|_| Url::parse(base_url)) {
        Ok(url) => url,
        Err(_) => return format!("{base_url}?{REPORT_PARAM}={id}"),
    };
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(REPORT_PARAM, id);
    url.to_string()
}

/// The `reportId` parameter of `href`, if present and non-empty.
pub fn report_id_from_href(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == REPORT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// `href` without `reportId`. Other parameters survive; an emptied query is
/// removed entirely. Unparsable input is returned unchanged.
pub fn strip_report_id(href: &str) -> String {
    let Ok(mut url) = Url::parse(href) else {
        return href.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != REPORT_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.to_string()
}

/// `M` wins over `B`; anything else is Normal.
pub fn prediction_for_report_id(id: &str) -> Prediction {
    if id.contains('M') {
        Prediction::Malignant
    } else if id.contains('B') {
        Prediction::Benign
    } else {
        Prediction::Normal
    }
}

fn shared_features(prediction: Prediction) -> Vec<FeatureImportance> {
    let values: [f64; 3] = if prediction == Prediction::Malignant {
        [0.45, 0.38, 0.22]
    } else {
        [-0.22, -0.15, -0.10]
    };
    crate::diagnosis::generator::FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| FeatureImportance::new(*name, value))
        .collect()
}

/// FNV-1a over the identifier bytes; seeds the confidence jitter so that one
/// link always renders the same number.
fn id_seed(id: &str) -> u64 {
    id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

pub fn decode_report(id: &str) -> DiagnosisResult {
    let prediction = prediction_for_report_id(id);
    let mut rng = StdRng::seed_from_u64(id_seed(id));
    let confidence = SHARED_CONFIDENCE_BASE + rng.gen::<f64>() * SHARED_CONFIDENCE_JITTER;

    DiagnosisResult {
        id: id.to_string(),
        created_at: OffsetDateTime::now_utc(),
        mode: DiagnosisMode::Image,
        prediction,
        confidence,
        image: None,
        features: shared_features(prediction),
        interpretation: Some(SHARED_INTERPRETATION.to_string()),
        published: true,
    }
}

/// Decode whatever report the location points at.
pub fn report_from_href(href: &str) -> Option<DiagnosisResult> {
    report_id_from_href(href).map(|id| decode_report(&id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::model::Impact;

    const BASE: &str = "http://localhost:8080/";

    #[test]
    fn link_replaces_all_other_parameters() {
        let link = share_link(
            "https://demo.example/app/?lang=es&reportId=OLD#results",
            BASE,
            "ONCO-M1A2C3",
        );
        assert_eq!(link, "https://demo.example/app/?reportId=ONCO-M1A2C3");

        let parsed = Url::parse(&link).unwrap();
        let pairs: Vec<_> = parsed.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(report_id_from_href(&link).as_deref(), Some("ONCO-M1A2C3"));
    }

    #[test]
    fn link_falls_back_to_base_url() {
        assert_eq!(
            share_link("not a url", BASE, "ONCO-N12345"),
            "http://localhost:8080/?reportId=ONCO-N12345"
        );
    }

    #[test]
    fn absent_or_empty_parameter_reads_as_none() {
        assert_eq!(report_id_from_href("https://demo.example/"), None);
        assert_eq!(report_id_from_href("https://demo.example/?reportId="), None);
        assert_eq!(report_id_from_href("https://demo.example/?other=1"), None);
        assert_eq!(report_id_from_href("garbage"), None);
    }

    #[test]
    fn whitespace_id_still_opens_a_normal_report() {
        let id = report_id_from_href("https://demo.example/?reportId=%20");
        assert_eq!(id.as_deref(), Some(" "));
        let report = report_from_href("https://demo.example/?reportId=%20").expect("report");
        assert_eq!(report.prediction, Prediction::Normal);
    }

    #[test]
    fn strip_keeps_unrelated_parameters() {
        assert_eq!(
            strip_report_id("https://demo.example/?reportId=XM1"),
            "https://demo.example/"
        );
        assert_eq!(
            strip_report_id("https://demo.example/p?reportId=XM1&lang=fr"),
            "https://demo.example/p?lang=fr"
        );
    }

    #[test]
    fn decode_precedence_m_over_b() {
        assert_eq!(prediction_for_report_id("XM1"), Prediction::Malignant);
        assert_eq!(prediction_for_report_id("BM"), Prediction::Malignant);
        assert_eq!(prediction_for_report_id("ONCO-B77"), Prediction::Benign);
        assert_eq!(prediction_for_report_id("ONCO-N123"), Prediction::Normal);
        assert_eq!(prediction_for_report_id("mb"), Prediction::Normal);
    }

    #[test]
    fn decoded_report_is_published_and_stable() {
        let first = decode_report("XM1");
        let second = decode_report("XM1");
        assert!(first.published);
        assert_eq!(first.prediction, Prediction::Malignant);
        assert_eq!(first.confidence, second.confidence);
        assert!((0.92..0.97).contains(&first.confidence));
        assert!(first.features.iter().all(|f| f.impact() == Impact::Positive));

        let benign = decode_report("ONCO-B00000");
        let values: Vec<f64> = benign.features.iter().map(|f| f.value()).collect();
        assert_eq!(values, vec![-0.22, -0.15, -0.10]);
        assert!(benign.features.iter().all(|f| f.impact() == Impact::Negative));
    }
}
