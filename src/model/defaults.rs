//! Default data table
//!
//! The static value behind every view model field. Used field by field
//! when the data document omits something, and wholesale when no document
//! could be loaded.

use super::view_model::*;

/// Color assigned to the primary area
pub const PRIMARY_AREA_COLOR: &str = "#ef4444";

/// Colors handed to peers that arrive without one, by position
pub const PEER_COLORS: [&str; 4] = ["#3b82f6", "#10b981", "#8b5cf6", "#f59e0b"];

/// The complete default view model
pub fn view_model() -> ViewModel {
    ViewModel {
        hero: hero_stats(),
        summary: summary_scores(),
        sidebar: sidebar_metrics(),
        charts: chart_series(),
        primary_area: primary_area(),
        peer_areas: peer_areas(),
    }
}

pub fn hero_stats() -> HeroStats {
    HeroStats {
        population: 25_416,
        pillars: 3,
        metrics: 24,
    }
}

pub fn summary_scores() -> SummaryScores {
    SummaryScores {
        health: 72.0,
        talent: 89.0,
        competitiveness: 67.0,
    }
}

pub fn sidebar_metrics() -> SidebarMetrics {
    use ChangeDirection::*;

    SidebarMetrics {
        health: vec![
            SidebarMetric::new("8.2%", "Diabetes Rate", "-2.9% vs state", Positive),
            SidebarMetric::new("78%", "Dental Access", "+10% since 2019", Positive),
            SidebarMetric::new("92%", "Insured", "+3.1% vs state", Positive),
        ],
        talent: vec![
            SidebarMetric::new("89%", "HS Attainment", "+4% vs national", Positive),
            SidebarMetric::new("35%", "Bachelor's+", "+7% vs national", Positive),
            SidebarMetric::new("93%", "Grad Rate", "+6% vs state", Positive),
        ],
        competitiveness: vec![
            SidebarMetric::new("2.3%", "Net Migration", "+1.1% since 2018", Positive),
            SidebarMetric::new("$52.4K", "Median Income", "+4.8% YoY", Positive),
            SidebarMetric::new("68", "Broadband Affordability", "-7 vs target", Negative),
        ],
    }
}

pub fn chart_series() -> ChartSeries {
    ChartSeries {
        chronic_disease: ComparisonSeries {
            labels: strings(&["Diabetes", "Heart Disease", "COPD", "Cancer", "Stroke"]),
            subject: vec![8.2, 5.8, 4.1, 22.4, 3.2],
            reference: vec![11.1, 7.2, 5.9, 24.8, 4.1],
        },
        dental_access: LabeledSeries {
            labels: strings(&["2019", "2020", "2021", "2022", "2023"]),
            values: vec![68.0, 71.0, 73.0, 75.0, 78.0],
        },
        education: ComparisonSeries {
            labels: strings(&[
                "High School",
                "Some College",
                "Associates",
                "Bachelors",
                "Masters",
                "Doctoral",
            ]),
            subject: vec![89.0, 45.0, 22.0, 35.0, 20.0, 8.0],
            reference: vec![85.0, 38.0, 18.0, 28.0, 15.0, 5.0],
        },
        graduation: LabeledSeries {
            labels: strings(&[
                "High School",
                "Community College",
                "University",
                "Graduate School",
            ]),
            values: vec![93.0, 78.0, 89.0, 85.0],
        },
        migration: DualSeries {
            labels: strings(&["2018", "2019", "2020", "2021", "2022", "2023"]),
            primary: vec![1.2, 1.8, 0.9, 2.1, 2.8, 2.3],
            secondary: vec![2.1, 3.2, 1.8, 4.5, 5.2, 4.8],
        },
        infrastructure: LabeledSeries {
            labels: strings(&["Broadband Speed", "Coverage %", "Reliability", "Affordability"]),
            values: vec![78.0, 85.0, 72.0, 68.0],
        },
    }
}

pub fn primary_area() -> GeoArea {
    GeoArea {
        name: "Oxford, MS".to_string(),
        coordinates: Coordinates {
            lat: 34.3664,
            lng: -89.5192,
        },
        pillars: PillarScores {
            health: 72.0,
            talent: 89.0,
            competitiveness: 67.0,
        },
        color: PRIMARY_AREA_COLOR.to_string(),
        is_primary: true,
    }
}

pub fn peer_areas() -> Vec<GeoArea> {
    vec![
        peer("Clemson, SC Micro", 34.6834, -82.8374, (68.0, 85.0, 71.0), PEER_COLORS[0]),
        peer("Boone, NC Micro", 36.2168, -81.6746, (75.0, 87.0, 73.0), PEER_COLORS[1]),
        peer("Starkville, MS Micro", 33.4504, -88.8184, (65.0, 82.0, 69.0), PEER_COLORS[2]),
        peer(
            "Athens-Clarke County, GA Micro",
            33.9519,
            -83.3576,
            (82.0, 91.0, 78.0),
            PEER_COLORS[3],
        ),
    ]
}

/// Fallback for one field of a peer entry
pub fn peer_pillars() -> PillarScores {
    PillarScores {
        health: 0.0,
        talent: 0.0,
        competitiveness: 0.0,
    }
}

/// Color for the peer at `index` when the document gives none
pub fn peer_color(index: usize) -> &'static str {
    PEER_COLORS[index % PEER_COLORS.len()]
}

fn peer(name: &str, lat: f64, lng: f64, pillars: (f64, f64, f64), color: &str) -> GeoArea {
    GeoArea {
        name: name.to_string(),
        coordinates: Coordinates { lat, lng },
        pillars: PillarScores {
            health: pillars.0,
            talent: pillars.1,
            competitiveness: pillars.2,
        },
        color: color.to_string(),
        is_primary: false,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
