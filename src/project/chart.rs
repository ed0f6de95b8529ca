//! Chart configuration types
//!
//! The configuration object handed to the chart library. Field names
//! serialize in the library's camelCase vocabulary; optional styling is
//! left out of the JSON when unset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Chart widgets on the dashboard, keyed by their container id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WidgetId {
    #[serde(rename = "chronicDiseaseChart")]
    ChronicDisease,
    #[serde(rename = "dentalAccessChart")]
    DentalAccess,
    #[serde(rename = "educationChart")]
    Education,
    #[serde(rename = "graduationChart")]
    Graduation,
    #[serde(rename = "migrationChart")]
    Migration,
    #[serde(rename = "infrastructureChart")]
    Infrastructure,
    #[serde(rename = "peerComparisonChart")]
    PeerComparison,
}

impl WidgetId {
    /// All chart widgets in page order
    pub fn all() -> &'static [WidgetId] {
        &[
            WidgetId::ChronicDisease,
            WidgetId::DentalAccess,
            WidgetId::Education,
            WidgetId::Graduation,
            WidgetId::Migration,
            WidgetId::Infrastructure,
            WidgetId::PeerComparison,
        ]
    }

    /// Container element id in the page markup
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetId::ChronicDisease => "chronicDiseaseChart",
            WidgetId::DentalAccess => "dentalAccessChart",
            WidgetId::Education => "educationChart",
            WidgetId::Graduation => "graduationChart",
            WidgetId::Migration => "migrationChart",
            WidgetId::Infrastructure => "infrastructureChart",
            WidgetId::PeerComparison => "peerComparisonChart",
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown chart widget: {}", s))
    }
}

/// Chart type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    Doughnut,
    Scatter,
}

/// Complete chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Number of data points across all datasets
    pub fn point_count(&self) -> usize {
        self.data.datasets.iter().map(|d| d.data.len()).sum()
    }

    /// Whether every dataset has one value per label. Point datasets
    /// (scatter) carry their own coordinates and always pass.
    pub fn is_consistent(&self) -> bool {
        self.data.datasets.iter().all(|d| match &d.data {
            DataValues::Values(values) => values.len() == self.data.labels.len(),
            DataValues::Points(_) => true,
        })
    }

    /// Attach an entrance animation
    pub fn with_animation(mut self, animation: AnimationDescriptor) -> Self {
        self.options.animation = Some(animation);
        self
    }
}

/// Labels and datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: DataValues,
    #[serde(flatten)]
    pub style: DatasetStyle,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
}

impl Dataset {
    pub fn values(label: Option<&str>, values: &[f64], style: DatasetStyle) -> Self {
        Self {
            label: label.map(str::to_string),
            data: DataValues::Values(values.to_vec()),
            style,
            y_axis_id: None,
        }
    }

    pub fn on_axis(mut self, axis: &str) -> Self {
        self.y_axis_id = Some(axis.to_string());
        self
    }
}

/// Dataset payload: one value per label, or free (x, y) points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValues {
    Values(Vec<f64>),
    Points(Vec<Point>),
}

impl DataValues {
    pub fn len(&self) -> usize {
        match self {
            DataValues::Values(v) => v.len(),
            DataValues::Points(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Either one color for the whole dataset or one per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Single(color.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(color: String) -> Self {
        ColorSpec::Single(color)
    }
}

/// Dataset styling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_width: Option<u32>,
}

/// Chart-level options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<String, Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationDescriptor>,
}

impl ChartOptions {
    /// Responsive chart filling its container, with the given legend
    pub fn new(legend: Legend) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins { legend },
            scales: BTreeMap::new(),
            layout: None,
            animation: None,
        }
    }

    pub fn scale(mut self, axis: &str, scale: Scale) -> Self {
        self.scales.insert(axis.to_string(), scale);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
}

impl Legend {
    pub fn hidden() -> Self {
        Self {
            display: false,
            position: None,
            labels: None,
            max_height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub padding: u32,
    pub use_point_style: bool,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl Font {
    pub fn size(size: u32) -> Self {
        Self { size, weight: None }
    }

    pub fn weighted(size: u32, weight: &str) -> Self {
        Self {
            size,
            weight: Some(weight.to_string()),
        }
    }
}

/// Axis scale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_labels: Option<PointLabels>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
    pub color: String,
    pub font: Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_on_chart_area: Option<bool>,
}

/// Tick styling. `suffix` is appended to every tick label by the page
/// (for example `%` on rate axes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub color: String,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLabels {
    pub color: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub padding: Padding,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<u32>,
}

/// Entrance animation applied when a chart is first drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDescriptor {
    pub duration_ms: u64,
    pub easing: String,
    /// Delay added per data point index
    pub stagger_ms: u64,
}

impl AnimationDescriptor {
    /// Start delay of one element: data points are staggered by index,
    /// everything else starts immediately.
    pub fn delay_for(&self, data_index: Option<usize>) -> u64 {
        match data_index {
            Some(index) => index as u64 * self.stagger_ms,
            None => 0,
        }
    }
}

impl Default for AnimationDescriptor {
    fn default() -> Self {
        Self {
            duration_ms: 1500,
            easing: "easeOutCubic".to_string(),
            stagger_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_round_trip() {
        for id in WidgetId::all() {
            assert_eq!(id.as_str().parse::<WidgetId>().unwrap(), *id);
            assert_eq!(
                serde_json::to_value(id).unwrap(),
                serde_json::Value::String(id.as_str().to_string())
            );
        }
        assert!("pieChart".parse::<WidgetId>().is_err());
    }

    #[test]
    fn test_animation_delay() {
        let animation = AnimationDescriptor::default();
        assert_eq!(animation.delay_for(None), 0);
        assert_eq!(animation.delay_for(Some(0)), 0);
        assert_eq!(animation.delay_for(Some(3)), 300);
    }

    #[test]
    fn test_dataset_serializes_flat_camel_case() {
        let style = DatasetStyle {
            background_color: Some("#3b82f6".into()),
            border_radius: Some(4),
            ..Default::default()
        };
        let dataset = Dataset::values(Some("Oxford"), &[1.0, 2.0], style).on_axis("y1");
        let json = serde_json::to_value(&dataset).unwrap();

        assert_eq!(json["label"], "Oxford");
        assert_eq!(json["backgroundColor"], "#3b82f6");
        assert_eq!(json["borderRadius"], 4);
        assert_eq!(json["yAxisID"], "y1");
        assert!(json.get("tension").is_none());
    }
}
