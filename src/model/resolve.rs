//! Data Resolver
//!
//! Reconciles an optional [`SourceDocument`] against the default table,
//! one field at a time:
//!
//! 1. the loaded value, when present and not `null`
//! 2. otherwise the default for that exact field
//! 3. otherwise (list entries with no default to fall back on) the entry
//!    is omitted
//!
//! Array leaves such as label and value lists replace the default array as
//! a whole. Nothing here fails: the resolver is the error boundary between
//! untrusted data and the widgets.

use super::defaults;
use super::view_model::*;
use crate::source::document::*;

/// Resolve a view model from an optional document
pub fn resolve(doc: Option<&SourceDocument>) -> ViewModel {
    let Some(doc) = doc else {
        tracing::info!("No dashboard data document, rendering from defaults");
        return defaults::view_model();
    };

    let charts = resolve_charts(doc.chart_data.as_ref());
    for (chart, labels, values) in charts.length_mismatches() {
        tracing::warn!(
            chart,
            labels,
            values,
            "Chart series length does not match its labels, passing through"
        );
    }

    ViewModel {
        hero: resolve_hero(doc.hero_stats.as_ref()),
        summary: resolve_summary(doc.summary_cards.as_ref()),
        sidebar: resolve_sidebar(doc.sidebar_metrics.as_ref()),
        charts,
        primary_area: resolve_primary(doc.primary_area.as_ref()),
        peer_areas: resolve_peers(doc.peer_areas.as_deref()),
    }
}

/// Resolve straight from parsed JSON (`None` when loading failed)
pub fn resolve_json(value: Option<&serde_json::Value>) -> ViewModel {
    let doc = value.and_then(SourceDocument::from_value);
    resolve(doc.as_ref())
}

fn resolve_hero(doc: Option<&HeroStatsDoc>) -> HeroStats {
    let d = defaults::hero_stats();
    HeroStats {
        population: doc.and_then(|h| h.population).unwrap_or(d.population),
        pillars: doc.and_then(|h| h.pillars).unwrap_or(d.pillars),
        metrics: doc.and_then(|h| h.metrics).unwrap_or(d.metrics),
    }
}

fn resolve_summary(doc: Option<&SummaryCardsDoc>) -> SummaryScores {
    let d = defaults::summary_scores();
    let score = |card: Option<&ScoreDoc>, default: f64| card.and_then(|c| c.score).unwrap_or(default);

    SummaryScores {
        health: score(doc.and_then(|s| s.health.as_ref()), d.health),
        talent: score(doc.and_then(|s| s.talent.as_ref()), d.talent),
        competitiveness: score(doc.and_then(|s| s.competitiveness.as_ref()), d.competitiveness),
    }
}

fn resolve_sidebar(doc: Option<&SidebarMetricsDoc>) -> SidebarMetrics {
    let d = defaults::sidebar_metrics();
    SidebarMetrics {
        health: resolve_metric_list(doc.and_then(|s| s.health.as_deref()), d.health, "health"),
        talent: resolve_metric_list(doc.and_then(|s| s.talent.as_deref()), d.talent, "talent"),
        competitiveness: resolve_metric_list(
            doc.and_then(|s| s.competitiveness.as_deref()),
            d.competitiveness,
            "competitiveness",
        ),
    }
}

fn resolve_metric_list(
    doc: Option<&[SidebarMetricDoc]>,
    fallback: Vec<SidebarMetric>,
    pillar: &str,
) -> Vec<SidebarMetric> {
    let Some(entries) = doc else {
        return fallback;
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match fallback.get(index) {
            Some(default) => Some(resolve_metric(entry, default)),
            None => {
                let metric = resolve_extra_metric(entry);
                if metric.is_none() {
                    tracing::warn!(pillar, index, "Omitting sidebar metric without value or label");
                }
                metric
            }
        })
        .collect()
}

fn resolve_metric(entry: &SidebarMetricDoc, default: &SidebarMetric) -> SidebarMetric {
    SidebarMetric {
        value: entry
            .value
            .as_ref()
            .map(DisplayValue::to_display)
            .unwrap_or_else(|| default.value.clone()),
        label: entry.label.clone().unwrap_or_else(|| default.label.clone()),
        change: entry
            .change
            .as_ref()
            .map(DisplayValue::to_display)
            .unwrap_or_else(|| default.change.clone()),
        direction: entry
            .kind
            .as_deref()
            .map(parse_direction)
            .unwrap_or(default.direction),
    }
}

/// Entries past the end of the default list have nothing to fall back on
/// for their value and label.
fn resolve_extra_metric(entry: &SidebarMetricDoc) -> Option<SidebarMetric> {
    Some(SidebarMetric {
        value: entry.value.as_ref()?.to_display(),
        label: entry.label.clone()?,
        change: entry
            .change
            .as_ref()
            .map(DisplayValue::to_display)
            .unwrap_or_default(),
        direction: entry.kind.as_deref().map(parse_direction).unwrap_or_default(),
    })
}

fn parse_direction(kind: &str) -> ChangeDirection {
    ChangeDirection::parse(kind).unwrap_or_else(|| {
        tracing::debug!(kind, "Unknown change direction, treating as neutral");
        ChangeDirection::Neutral
    })
}

fn resolve_charts(doc: Option<&ChartDataDoc>) -> ChartSeries {
    let d = defaults::chart_series();

    let chronic = doc.and_then(|c| c.chronic_disease.as_ref());
    let dental = doc.and_then(|c| c.dental_access.as_ref());
    let education = doc.and_then(|c| c.education.as_ref());
    let graduation = doc.and_then(|c| c.graduation.as_ref());
    let migration = doc.and_then(|c| c.migration.as_ref());
    let infrastructure = doc.and_then(|c| c.infrastructure.as_ref());

    ChartSeries {
        chronic_disease: ComparisonSeries {
            labels: chronic
                .and_then(|c| c.labels.clone())
                .unwrap_or(d.chronic_disease.labels),
            subject: chronic
                .and_then(|c| c.oxford.clone())
                .unwrap_or(d.chronic_disease.subject),
            reference: chronic
                .and_then(|c| c.state_average.clone())
                .unwrap_or(d.chronic_disease.reference),
        },
        dental_access: LabeledSeries {
            labels: dental
                .and_then(|c| c.years.clone())
                .unwrap_or(d.dental_access.labels),
            values: dental
                .and_then(|c| c.rates.clone())
                .unwrap_or(d.dental_access.values),
        },
        education: ComparisonSeries {
            labels: education
                .and_then(|c| c.labels.clone())
                .unwrap_or(d.education.labels),
            subject: education
                .and_then(|c| c.oxford.clone())
                .unwrap_or(d.education.subject),
            reference: education
                .and_then(|c| c.national.clone())
                .unwrap_or(d.education.reference),
        },
        graduation: LabeledSeries {
            labels: graduation
                .and_then(|c| c.labels.clone())
                .unwrap_or(d.graduation.labels),
            values: graduation
                .and_then(|c| c.rates.clone())
                .unwrap_or(d.graduation.values),
        },
        migration: DualSeries {
            labels: migration
                .and_then(|c| c.years.clone())
                .unwrap_or(d.migration.labels),
            primary: migration
                .and_then(|c| c.net_migration.clone())
                .unwrap_or(d.migration.primary),
            secondary: migration
                .and_then(|c| c.income_growth.clone())
                .unwrap_or(d.migration.secondary),
        },
        infrastructure: LabeledSeries {
            labels: infrastructure
                .and_then(|c| c.categories.clone())
                .unwrap_or(d.infrastructure.labels),
            values: infrastructure
                .and_then(|c| c.scores.clone())
                .unwrap_or(d.infrastructure.values),
        },
    }
}

fn resolve_primary(doc: Option<&GeoAreaDoc>) -> GeoArea {
    let d = defaults::primary_area();
    let Some(area) = doc else {
        return d;
    };

    GeoArea {
        name: area.name.clone().unwrap_or(d.name),
        coordinates: resolve_coordinates(area.coordinates.as_ref(), d.coordinates),
        pillars: resolve_pillars(area.pillars.as_ref(), d.pillars),
        color: area.color.clone().unwrap_or(d.color),
        is_primary: true,
    }
}

fn resolve_peers(doc: Option<&[GeoAreaDoc]>) -> Vec<GeoArea> {
    let Some(entries) = doc else {
        return defaults::peer_areas();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let peer = resolve_peer(index, entry);
            if peer.is_none() {
                tracing::warn!(index, "Omitting peer area without a name or coordinates");
            }
            peer
        })
        .collect()
}

/// A peer cannot be placed without a name and a position, so those two
/// fields have no default; the rest fall back individually.
fn resolve_peer(index: usize, entry: &GeoAreaDoc) -> Option<GeoArea> {
    let name = entry
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())?
        .to_string();
    let coordinates = entry.coordinates.as_ref()?;

    Some(GeoArea {
        name,
        coordinates: Coordinates {
            lat: coordinates.lat?,
            lng: coordinates.lng?,
        },
        pillars: resolve_pillars(entry.pillars.as_ref(), defaults::peer_pillars()),
        color: entry
            .color
            .clone()
            .unwrap_or_else(|| defaults::peer_color(index).to_string()),
        is_primary: false,
    })
}

fn resolve_coordinates(doc: Option<&CoordinatesDoc>, default: Coordinates) -> Coordinates {
    Coordinates {
        lat: doc.and_then(|c| c.lat).unwrap_or(default.lat),
        lng: doc.and_then(|c| c.lng).unwrap_or(default.lng),
    }
}

fn resolve_pillars(doc: Option<&PillarsDoc>, default: PillarScores) -> PillarScores {
    PillarScores {
        health: doc.and_then(|p| p.health).unwrap_or(default.health),
        talent: doc.and_then(|p| p.talent).unwrap_or(default.talent),
        competitiveness: doc
            .and_then(|p| p.competitiveness)
            .unwrap_or(default.competitiveness),
    }
}

impl From<&ViewModel> for SourceDocument {
    /// Write a view model back out in document form (used to publish the
    /// default document).
    fn from(vm: &ViewModel) -> Self {
        let metric_list = |metrics: &[SidebarMetric]| {
            Some(
                metrics
                    .iter()
                    .map(|m| SidebarMetricDoc {
                        value: Some(DisplayValue::Text(m.value.clone())),
                        label: Some(m.label.clone()),
                        change: Some(DisplayValue::Text(m.change.clone())),
                        kind: Some(m.direction.as_str().to_string()),
                    })
                    .collect::<Vec<_>>(),
            )
        };
        let area = |a: &GeoArea| GeoAreaDoc {
            name: Some(a.name.clone()),
            coordinates: Some(CoordinatesDoc {
                lat: Some(a.coordinates.lat),
                lng: Some(a.coordinates.lng),
            }),
            pillars: Some(PillarsDoc {
                health: Some(a.pillars.health),
                talent: Some(a.pillars.talent),
                competitiveness: Some(a.pillars.competitiveness),
            }),
            color: Some(a.color.clone()),
        };
        let charts = &vm.charts;

        SourceDocument {
            hero_stats: Some(HeroStatsDoc {
                population: Some(vm.hero.population),
                pillars: Some(vm.hero.pillars),
                metrics: Some(vm.hero.metrics),
            }),
            summary_cards: Some(SummaryCardsDoc {
                health: Some(ScoreDoc { score: Some(vm.summary.health) }),
                talent: Some(ScoreDoc { score: Some(vm.summary.talent) }),
                competitiveness: Some(ScoreDoc {
                    score: Some(vm.summary.competitiveness),
                }),
            }),
            sidebar_metrics: Some(SidebarMetricsDoc {
                health: metric_list(&vm.sidebar.health),
                talent: metric_list(&vm.sidebar.talent),
                competitiveness: metric_list(&vm.sidebar.competitiveness),
            }),
            chart_data: Some(ChartDataDoc {
                chronic_disease: Some(ChronicDiseaseDoc {
                    labels: Some(charts.chronic_disease.labels.clone()),
                    oxford: Some(charts.chronic_disease.subject.clone()),
                    state_average: Some(charts.chronic_disease.reference.clone()),
                }),
                dental_access: Some(DentalAccessDoc {
                    years: Some(charts.dental_access.labels.clone()),
                    rates: Some(charts.dental_access.values.clone()),
                }),
                education: Some(EducationDoc {
                    labels: Some(charts.education.labels.clone()),
                    oxford: Some(charts.education.subject.clone()),
                    national: Some(charts.education.reference.clone()),
                }),
                graduation: Some(GraduationDoc {
                    labels: Some(charts.graduation.labels.clone()),
                    rates: Some(charts.graduation.values.clone()),
                }),
                migration: Some(MigrationDoc {
                    years: Some(charts.migration.labels.clone()),
                    net_migration: Some(charts.migration.primary.clone()),
                    income_growth: Some(charts.migration.secondary.clone()),
                }),
                infrastructure: Some(InfrastructureDoc {
                    categories: Some(charts.infrastructure.labels.clone()),
                    scores: Some(charts.infrastructure.values.clone()),
                }),
            }),
            primary_area: Some(area(&vm.primary_area)),
            peer_areas: Some(vm.peer_areas.iter().map(area).collect()),
        }
    }
}
