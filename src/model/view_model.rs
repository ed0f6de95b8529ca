//! Resolved view model
//!
//! Mirrors [`SourceDocument`](crate::source::SourceDocument) with every field
//! present. Built once by [`resolve`](super::resolve) and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully resolved dashboard data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub hero: HeroStats,
    pub summary: SummaryScores,
    pub sidebar: SidebarMetrics,
    pub charts: ChartSeries,
    pub primary_area: GeoArea,
    pub peer_areas: Vec<GeoArea>,
}

impl ViewModel {
    /// Primary area followed by every peer
    pub fn areas(&self) -> impl Iterator<Item = &GeoArea> {
        std::iter::once(&self.primary_area).chain(self.peer_areas.iter())
    }
}

/// The three scoring pillars of the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    /// Health & wellness
    Health,
    /// Talent pipeline
    Talent,
    /// Economic competitiveness
    Competitiveness,
}

impl Pillar {
    /// All pillars in display order
    pub fn all() -> &'static [Pillar] {
        &[Pillar::Health, Pillar::Talent, Pillar::Competitiveness]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Health => "health",
            Pillar::Talent => "talent",
            Pillar::Competitiveness => "competitiveness",
        }
    }

    /// Human-readable title used in popups and legends
    pub fn title(&self) -> &'static str {
        match self {
            Pillar::Health => "Health & Wellness",
            Pillar::Talent => "Talent Pipeline",
            Pillar::Competitiveness => "Competitiveness",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hero banner counters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroStats {
    pub population: u64,
    pub pillars: u32,
    pub metrics: u32,
}

/// Summary card scores, one per pillar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryScores {
    pub health: f64,
    pub talent: f64,
    pub competitiveness: f64,
}

impl SummaryScores {
    pub fn get(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Health => self.health,
            Pillar::Talent => self.talent,
            Pillar::Competitiveness => self.competitiveness,
        }
    }
}

/// Direction of a sidebar metric's change, used as a CSS class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl ChangeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeDirection::Positive => "positive",
            ChangeDirection::Negative => "negative",
            ChangeDirection::Neutral => "neutral",
        }
    }

    /// Parse a direction class; unknown classes yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(ChangeDirection::Positive),
            "negative" => Some(ChangeDirection::Negative),
            "neutral" => Some(ChangeDirection::Neutral),
            _ => None,
        }
    }
}

/// One sidebar metric triple
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarMetric {
    pub value: String,
    pub label: String,
    pub change: String,
    pub direction: ChangeDirection,
}

impl SidebarMetric {
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        change: impl Into<String>,
        direction: ChangeDirection,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            change: change.into(),
            direction,
        }
    }
}

/// Sidebar metric lists, one per pillar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarMetrics {
    pub health: Vec<SidebarMetric>,
    pub talent: Vec<SidebarMetric>,
    pub competitiveness: Vec<SidebarMetric>,
}

impl SidebarMetrics {
    pub fn get(&self, pillar: Pillar) -> &[SidebarMetric] {
        match pillar {
            Pillar::Health => &self.health,
            Pillar::Talent => &self.talent,
            Pillar::Competitiveness => &self.competitiveness,
        }
    }
}

/// Categories compared between the subject town and a reference average
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSeries {
    pub labels: Vec<String>,
    pub subject: Vec<f64>,
    pub reference: Vec<f64>,
}

/// One series over an ordered label sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Two independent series over the same label sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DualSeries {
    pub labels: Vec<String>,
    pub primary: Vec<f64>,
    pub secondary: Vec<f64>,
}

/// Data behind every chart widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub chronic_disease: ComparisonSeries,
    pub dental_access: LabeledSeries,
    pub education: ComparisonSeries,
    pub graduation: LabeledSeries,
    pub migration: DualSeries,
    pub infrastructure: LabeledSeries,
}

impl ChartSeries {
    /// Every series whose value count differs from its label count, as
    /// `(chart, labels, values)`.
    pub fn length_mismatches(&self) -> Vec<(&'static str, usize, usize)> {
        let mut out = Vec::new();
        let mut check = |chart: &'static str, labels: usize, values: usize| {
            if labels != values {
                out.push((chart, labels, values));
            }
        };

        let c = &self.chronic_disease;
        check("chronicDisease", c.labels.len(), c.subject.len());
        check("chronicDisease", c.labels.len(), c.reference.len());
        let d = &self.dental_access;
        check("dentalAccess", d.labels.len(), d.values.len());
        let e = &self.education;
        check("education", e.labels.len(), e.subject.len());
        check("education", e.labels.len(), e.reference.len());
        let g = &self.graduation;
        check("graduation", g.labels.len(), g.values.len());
        let m = &self.migration;
        check("migration", m.labels.len(), m.primary.len());
        check("migration", m.labels.len(), m.secondary.len());
        let i = &self.infrastructure;
        check("infrastructure", i.labels.len(), i.values.len());

        out
    }
}

/// Latitude / longitude pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Pillar scores of one area, each nominally in `[0, 100]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PillarScores {
    pub health: f64,
    pub talent: f64,
    pub competitiveness: f64,
}

impl PillarScores {
    pub fn get(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Health => self.health,
            Pillar::Talent => self.talent,
            Pillar::Competitiveness => self.competitiveness,
        }
    }
}

/// A geographic area placed on the map and the peer chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeoArea {
    pub name: String,
    pub coordinates: Coordinates,
    pub pillars: PillarScores,
    pub color: String,
    pub is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_direction_parse() {
        assert_eq!(ChangeDirection::parse("positive"), Some(ChangeDirection::Positive));
        assert_eq!(ChangeDirection::parse(" Negative "), Some(ChangeDirection::Negative));
        assert_eq!(ChangeDirection::parse("sideways"), None);
    }

    #[test]
    fn test_pillar_order() {
        let names: Vec<_> = Pillar::all().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["health", "talent", "competitiveness"]);
    }

    #[test]
    fn test_length_mismatches_reports_each_series() {
        let mut charts = crate::model::defaults::chart_series();
        assert!(charts.length_mismatches().is_empty());

        charts.migration.secondary.pop();
        charts.graduation.labels.push("Trade School".to_string());

        let mismatches = charts.length_mismatches();
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches.contains(&("graduation", 5, 4)));
        assert!(mismatches.contains(&("migration", 6, 5)));
    }
}
