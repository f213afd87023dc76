//! Typed chart payloads.
//!
//! Mirrors the bar chart data and options objects understood by Chart.js.
//! Keys the schema does not name are kept in `extra` and forwarded unchanged,
//! so the library still sees every option the caller supplied. Absent keys
//! stay absent on re-serialization; the library applies its own defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, Payload, Result};

/// Bar chart data: category labels and one or more series.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarData {
    /// Category labels. Numbers (e.g. years) are kept in their text form.
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One bar series.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_stroke: Option<String>,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bar chart options. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarOptions {
    // Global
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<bool>,
    #[serde(
        deserialize_with = "deserialize_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_easing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tooltips: Option<bool>,

    // Scale override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_override: Option<bool>,
    #[serde(
        deserialize_with = "deserialize_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_step_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_start_value: Option<f64>,

    // Bar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_show_grid_lines: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_grid_line_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_grid_line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_show_stroke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_value_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_dataset_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_template: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
    }

    let labels = Vec::<Label>::deserialize(deserializer)?;
    Ok(labels
        .into_iter()
        .map(|label| match label {
            Label::Text(s) => s,
            Label::Number(n) => n.to_string(),
        })
        .collect())
}

/// A step count: a whole number, written either as `60` or `60.0`.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "invalid count: {n}, expected a whole number"
        )));
    }
    Ok(Some(n as u32))
}

/// A shape rule violation, located by field path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeIssue {
    pub payload: Payload,
    pub field: String,
    pub message: String,
}

impl ShapeIssue {
    fn new(payload: Payload, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            payload,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ShapeIssue> for BridgeError {
    fn from(issue: ShapeIssue) -> Self {
        BridgeError::Shape {
            payload: issue.payload,
            field: issue.field,
            message: issue.message,
        }
    }
}

/// Decode the data payload.
pub fn decode_data(json: &str) -> Result<BarData> {
    serde_json::from_str(json).map_err(|e| BridgeError::from_json(Payload::Data, e))
}

/// Decode the options payload.
pub fn decode_options(json: &str) -> Result<BarOptions> {
    serde_json::from_str(json).map_err(|e| BridgeError::from_json(Payload::Options, e))
}

impl BarData {
    /// Check the data against the shape rules.
    pub fn validate(&self) -> Vec<ShapeIssue> {
        let mut issues = Vec::new();
        for (i, dataset) in self.datasets.iter().enumerate() {
            if dataset.data.len() != self.labels.len() {
                issues.push(ShapeIssue::new(
                    Payload::Data,
                    format!("datasets[{i}].data"),
                    format!(
                        "has {} values but there are {} labels",
                        dataset.data.len(),
                        self.labels.len()
                    ),
                ));
            }
        }
        issues
    }

    /// Number of bars a renderer draws: one per label per series.
    pub fn bar_count(&self) -> usize {
        self.datasets
            .iter()
            .map(|d| d.data.len().min(self.labels.len()))
            .sum()
    }
}

impl BarOptions {
    /// Check the options against the shape rules.
    pub fn validate(&self) -> Vec<ShapeIssue> {
        let mut issues = Vec::new();

        let non_negative = [
            ("barStrokeWidth", self.bar_stroke_width),
            ("barValueSpacing", self.bar_value_spacing),
            ("barDatasetSpacing", self.bar_dataset_spacing),
            ("scaleGridLineWidth", self.scale_grid_line_width),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value
                && v < 0.0
            {
                issues.push(ShapeIssue::new(
                    Payload::Options,
                    field,
                    format!("must not be negative, got {v}"),
                ));
            }
        }

        if self.animation_steps == Some(0) {
            issues.push(ShapeIssue::new(
                Payload::Options,
                "animationSteps",
                "must be greater than zero",
            ));
        }

        if let Some(width) = self.scale_step_width
            && width <= 0.0
        {
            issues.push(ShapeIssue::new(
                Payload::Options,
                "scaleStepWidth",
                format!("must be greater than zero, got {width}"),
            ));
        }

        if self.scale_override == Some(true) {
            let required = [
                ("scaleSteps", self.scale_steps.is_some()),
                ("scaleStepWidth", self.scale_step_width.is_some()),
                ("scaleStartValue", self.scale_start_value.is_some()),
            ];
            for (field, present) in required {
                if !present {
                    issues.push(ShapeIssue::new(
                        Payload::Options,
                        field,
                        "is required when scaleOverride is true",
                    ));
                }
            }
        }

        issues
    }
}
