use dioxus::prelude::*;

use crate::core::format;
use crate::diagnosis::model::{FeatureImportance, Impact};

const WIDTH: f64 = 520.0;
const LABEL_WIDTH: f64 = 150.0;
const VALUE_WIDTH: f64 = 70.0;
const ROW_HEIGHT: f64 = 40.0;
const BAR_HEIGHT: f64 = 22.0;
const PADDING: f64 = 12.0;

/// Smallest half-range of the axis, so small contributions do not fill the plot.
const MIN_EXTENT: f64 = 0.5;

/// Horizontal span `(x, width)` of a bar around a zero line at `zero_x`.
/// `extent` is the absolute value mapped to `half_width`.
pub fn bar_span(value: f64, extent: f64, zero_x: f64, half_width: f64) -> (f64, f64) {
    if !value.is_finite() || extent <= 0.0 {
        return (zero_x, 0.0);
    }
    let width = (value.abs() / extent).min(1.0) * half_width;
    if value > 0.0 {
        (zero_x, width)
    } else {
        (zero_x - width, width)
    }
}

fn axis_extent(features: &[FeatureImportance]) -> f64 {
    features
        .iter()
        .map(|f| f.value().abs())
        .filter(|v| v.is_finite())
        .fold(MIN_EXTENT, f64::max)
}

/// SHAP-style horizontal bar chart: positive contributions to the right in red,
/// negative to the left in blue.
#[component]
pub fn ShapChart(features: Vec<FeatureImportance>) -> Element {
    let extent = axis_extent(&features);
    let half_width = (WIDTH - LABEL_WIDTH - VALUE_WIDTH) / 2.0;
    let zero_x = LABEL_WIDTH + half_width;
    let height = PADDING * 2.0 + ROW_HEIGHT * features.len() as f64;
    let axis_bottom = height - PADDING;
    let label_x = LABEL_WIDTH - 10.0;
    let value_x = WIDTH - VALUE_WIDTH + 8.0;

    rsx! {
        svg {
            class: "shap-chart",
            view_box: "0 0 {WIDTH} {height}",
            role: "img",
            for (row, feature) in features.iter().enumerate() {
                {
                    let (x, width) = bar_span(feature.value(), extent, zero_x, half_width);
                    let y = PADDING + ROW_HEIGHT * row as f64 + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
                    let text_y = y + BAR_HEIGHT / 2.0 + 4.0;
                    let modifier = match feature.impact() {
                        Impact::Positive => "positive",
                        Impact::Negative => "negative",
                    };
                    let value_text = format::format_contribution(feature.value());
                    let name = feature.feature().to_string();
                    rsx! {
                        g { key: "{name}", class: "shap-chart__row",
                            text {
                                class: "shap-chart__label",
                                x: "{label_x}",
                                y: "{text_y}",
                                text_anchor: "end",
                                "{name}"
                            }
                            rect {
                                class: "shap-chart__bar shap-chart__bar--{modifier}",
                                x: "{x}",
                                y: "{y}",
                                width: "{width}",
                                height: "{BAR_HEIGHT}",
                                rx: "3",
                            }
                            text {
                                class: "shap-chart__value",
                                x: "{value_x}",
                                y: "{text_y}",
                                "{value_text}"
                            }
                        }
                    }
                }
            }
            line {
                class: "shap-chart__zero",
                x1: "{zero_x}",
                x2: "{zero_x}",
                y1: "{PADDING}",
                y2: "{axis_bottom}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_bars_grow_right_of_zero() {
        let (x, width) = bar_span(0.25, 0.5, 100.0, 80.0);
        assert_eq!(x, 100.0);
        assert!((width - 40.0).abs() < 1e-9);
    }

    #[test]
    fn negative_bars_end_at_zero() {
        let (x, width) = bar_span(-0.5, 0.5, 100.0, 80.0);
        assert!((x - 20.0).abs() < 1e-9);
        assert!((x + width - 100.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (_, width) = bar_span(3.0, 0.5, 0.0, 80.0);
        assert_eq!(width, 80.0);
        assert_eq!(bar_span(f64::NAN, 0.5, 10.0, 80.0), (10.0, 0.0));
    }

    #[test]
    fn extent_never_drops_below_floor() {
        let small = vec![FeatureImportance::new("a", 0.1)];
        assert_eq!(axis_extent(&small), MIN_EXTENT);
        let large = vec![
            FeatureImportance::new("a", -0.9),
            FeatureImportance::new("b", 0.3),
        ];
        assert_eq!(axis_extent(&large), 0.9);
    }
}
