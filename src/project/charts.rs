//! Chart Projectors
//!
//! One pure function per chart widget, each turning its slice of the view
//! model into a [`ChartConfig`]. Calling a projector twice on the same
//! slice yields equal configurations.

use super::chart::*;
use super::labels::AreaLabels;
use super::palette::*;
use crate::model::{ComparisonSeries, DualSeries, GeoArea, LabeledSeries, ViewModel};

/// Dental access y axis, fixed regardless of the data
pub const DENTAL_AXIS_RANGE: (f64, f64) = (60.0, 85.0);

/// Peer chart axis windows (health on x, talent on y)
pub const PEER_HEALTH_RANGE: (f64, f64) = (60.0, 90.0);
pub const PEER_TALENT_RANGE: (f64, f64) = (75.0, 95.0);

/// Project the chart identified by `id`
pub fn project_chart(id: WidgetId, vm: &ViewModel) -> ChartConfig {
    let charts = &vm.charts;
    match id {
        WidgetId::ChronicDisease => chronic_disease(&charts.chronic_disease),
        WidgetId::DentalAccess => dental_access(&charts.dental_access),
        WidgetId::Education => education(&charts.education),
        WidgetId::Graduation => graduation(&charts.graduation),
        WidgetId::Migration => migration(&charts.migration),
        WidgetId::Infrastructure => infrastructure(&charts.infrastructure),
        WidgetId::PeerComparison => peer_comparison(vm),
    }
}

/// Grouped bars: subject town first, state average second
pub fn chronic_disease(series: &ComparisonSeries) -> ChartConfig {
    let bar = |color: &str| DatasetStyle {
        background_color: Some(color.into()),
        border_radius: Some(4),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![
                Dataset::values(Some(SUBJECT_NAME), &series.subject, bar(SUBJECT_BLUE)),
                Dataset::values(Some(STATE_AVERAGE_NAME), &series.reference, bar(REFERENCE_GRAY)),
            ],
        },
        options: ChartOptions::new(bottom_legend())
            .scale("x", category_axis())
            .scale(
                "y",
                Scale {
                    begin_at_zero: Some(true),
                    grid: Some(grid_lines()),
                    ticks: Some(ticks(Some("%"))),
                    ..Default::default()
                },
            ),
    }
}

/// Filled single line on a fixed y range
pub fn dental_access(series: &LabeledSeries) -> ChartConfig {
    let style = DatasetStyle {
        border_color: Some(GREEN.to_string()),
        background_color: Some(fill(GREEN).into()),
        fill: Some(true),
        tension: Some(0.4),
        point_radius: Some(5),
        point_hover_radius: Some(8),
        point_background_color: Some(GREEN.to_string()),
        point_border_color: Some(WHITE.to_string()),
        point_border_width: Some(2),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset::values(
                Some("Dental Care Access Rate"),
                &series.values,
                style,
            )],
        },
        options: ChartOptions::new(Legend::hidden())
            .scale("x", category_axis())
            .scale(
                "y",
                Scale {
                    begin_at_zero: Some(false),
                    min: Some(DENTAL_AXIS_RANGE.0),
                    max: Some(DENTAL_AXIS_RANGE.1),
                    grid: Some(grid_lines()),
                    ticks: Some(ticks(Some("%"))),
                    ..Default::default()
                },
            ),
    }
}

/// Radar pair on a shared 0..100 radial scale
pub fn education(series: &ComparisonSeries) -> ChartConfig {
    let polygon = |line: &str, area: &str| DatasetStyle {
        border_color: Some(line.to_string()),
        background_color: Some(area.into()),
        point_background_color: Some(line.to_string()),
        point_radius: Some(4),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Radar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![
                Dataset::values(
                    Some(SUBJECT_NAME),
                    &series.subject,
                    polygon(SUBJECT_BLUE, &fill(SUBJECT_BLUE)),
                ),
                Dataset::values(
                    Some(NATIONAL_AVERAGE_NAME),
                    &series.reference,
                    polygon(NATIONAL_SLATE, &fill(NATIONAL_SLATE)),
                ),
            ],
        },
        options: ChartOptions::new(bottom_legend()).scale(
            "r",
            Scale {
                begin_at_zero: Some(true),
                max: Some(100.0),
                grid: Some(grid_lines()),
                point_labels: Some(PointLabels {
                    color: TICK_COLOR.to_string(),
                    font: Font::size(10),
                }),
                ticks: Some(Ticks {
                    color: TICK_COLOR.to_string(),
                    font: Font::size(9),
                    step_size: Some(20.0),
                    suffix: None,
                }),
                ..Default::default()
            },
        ),
    }
}

/// Doughnut with one slice per category, in the given order
pub fn graduation(series: &LabeledSeries) -> ChartConfig {
    let style = DatasetStyle {
        background_color: Some(ColorSpec::PerPoint(positional(
            &GRADUATION_SLICES,
            series.values.len(),
        ))),
        border_width: Some(3),
        border_color: Some(WHITE.to_string()),
        ..Default::default()
    };

    let mut legend = bottom_legend();
    legend.max_height = Some(100);
    if let Some(labels) = legend.labels.as_mut() {
        labels.box_width = Some(12);
        labels.box_height = Some(12);
    }

    let mut options = ChartOptions::new(legend);
    options.layout = Some(Layout {
        padding: Padding {
            bottom: Some(20),
            ..Default::default()
        },
    });

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset::values(None, &series.values, style)],
        },
        options,
    }
}

/// Two lines, each on its own vertical axis
pub fn migration(series: &DualSeries) -> ChartConfig {
    let line = |color: &str, fill_color: &str, filled: bool| DatasetStyle {
        border_color: Some(color.to_string()),
        background_color: Some(fill_color.into()),
        fill: Some(filled),
        tension: Some(0.4),
        point_radius: Some(5),
        point_background_color: Some(color.to_string()),
        point_border_color: Some(WHITE.to_string()),
        point_border_width: Some(2),
        ..Default::default()
    };
    let axis = |position: &str, grid: Grid| Scale {
        kind: Some("linear".to_string()),
        display: Some(true),
        position: Some(position.to_string()),
        grid: Some(grid),
        ticks: Some(ticks(Some("%"))),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![
                Dataset::values(
                    Some("Net Migration Rate"),
                    &series.primary,
                    line(PURPLE, &fill(PURPLE), true),
                )
                .on_axis("y"),
                Dataset::values(
                    Some("Median Income Growth"),
                    &series.secondary,
                    line(AMBER, &fill(AMBER), false),
                )
                .on_axis("y1"),
            ],
        },
        options: ChartOptions::new(bottom_legend())
            .scale("x", category_axis())
            .scale("y", axis("left", grid_lines()))
            .scale(
                "y1",
                axis(
                    "right",
                    Grid {
                        draw_on_chart_area: Some(false),
                        ..Default::default()
                    },
                ),
            ),
    }
}

/// Bars colored by category position
pub fn infrastructure(series: &LabeledSeries) -> ChartConfig {
    let style = DatasetStyle {
        background_color: Some(ColorSpec::PerPoint(positional(
            &INFRASTRUCTURE_BARS,
            series.values.len(),
        ))),
        border_radius: Some(6),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset::values(
                Some("Infrastructure Quality Score"),
                &series.values,
                style,
            )],
        },
        options: ChartOptions::new(Legend::hidden())
            .scale("x", category_axis())
            .scale(
                "y",
                Scale {
                    begin_at_zero: Some(true),
                    max: Some(100.0),
                    grid: Some(grid_lines()),
                    ticks: Some(ticks(None)),
                    ..Default::default()
                },
            ),
    }
}

/// Scatter of every area at (health, talent); the primary point is larger
pub fn peer_comparison(vm: &ViewModel) -> ChartConfig {
    let labels = AreaLabels::derive(vm);
    let point = |label: &str, area: &GeoArea, radius: u32, hover: u32| Dataset {
        label: Some(label.to_string()),
        data: DataValues::Points(vec![Point {
            x: area.pillars.health,
            y: area.pillars.talent,
        }]),
        style: DatasetStyle {
            background_color: Some(area.color.as_str().into()),
            border_color: Some(area.color.clone()),
            point_radius: Some(radius),
            point_hover_radius: Some(hover),
            ..Default::default()
        },
        y_axis_id: None,
    };

    let mut datasets = vec![point(
        labels.primary.as_str(),
        &vm.primary_area,
        PRIMARY_POINT_RADIUS,
        PRIMARY_POINT_HOVER_RADIUS,
    )];
    datasets.extend(
        vm.peer_areas
            .iter()
            .zip(labels.peers.iter())
            .map(|(area, label)| {
                point(label.as_str(), area, PEER_POINT_RADIUS, PEER_POINT_HOVER_RADIUS)
            }),
    );

    let axis = |title: &str, range: (f64, f64)| Scale {
        title: Some(AxisTitle {
            display: true,
            text: title.to_string(),
            color: TICK_COLOR.to_string(),
            font: Font::weighted(12, LEGEND_FONT_WEIGHT),
        }),
        min: Some(range.0),
        max: Some(range.1),
        grid: Some(grid_lines()),
        ticks: Some(ticks(None)),
        ..Default::default()
    };

    ChartConfig {
        kind: ChartKind::Scatter,
        data: ChartData {
            labels: Vec::new(),
            datasets,
        },
        options: ChartOptions::new(bottom_legend())
            .scale("x", axis("Health & Wellness Score", PEER_HEALTH_RANGE))
            .scale("y", axis("Talent Pipeline Score", PEER_TALENT_RANGE)),
    }
}

fn bottom_legend() -> Legend {
    Legend {
        display: true,
        position: Some(LegendPosition::Bottom),
        labels: Some(LegendLabels {
            padding: LEGEND_PADDING,
            use_point_style: true,
            font: Font::weighted(LEGEND_FONT_SIZE, LEGEND_FONT_WEIGHT),
            box_width: None,
            box_height: None,
        }),
        max_height: None,
    }
}

fn category_axis() -> Scale {
    Scale {
        grid: Some(Grid {
            display: Some(false),
            ..Default::default()
        }),
        ticks: Some(ticks(None)),
        ..Default::default()
    }
}

fn grid_lines() -> Grid {
    Grid {
        color: Some(GRID_COLOR.to_string()),
        ..Default::default()
    }
}

fn ticks(suffix: Option<&str>) -> Ticks {
    Ticks {
        color: TICK_COLOR.to_string(),
        font: Font::size(TICK_FONT_SIZE),
        step_size: None,
        suffix: suffix.map(str::to_string),
    }
}
