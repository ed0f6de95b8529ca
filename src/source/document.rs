//! Source document types
//!
//! The external data document as it arrives on the wire. Every field is
//! optional: an absent key, an explicit `null` and a value of the wrong
//! type all read as `None`, and unknown keys are ignored.

use serde::Serialize;

/// Top-level dashboard data document (`dashboard-metrics.json`)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_stats: Option<HeroStatsDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_cards: Option<SummaryCardsDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_metrics: Option<SidebarMetricsDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartDataDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_area: Option<GeoAreaDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_areas: Option<Vec<GeoAreaDoc>>,
}

/// Hero banner counters
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroStatsDoc {
    pub population: Option<u64>,
    pub pillars: Option<u32>,
    pub metrics: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SummaryCardsDoc {
    pub health: Option<ScoreDoc>,
    pub talent: Option<ScoreDoc>,
    pub competitiveness: Option<ScoreDoc>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScoreDoc {
    pub score: Option<f64>,
}

/// Sidebar metric lists, one per pillar
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SidebarMetricsDoc {
    pub health: Option<Vec<SidebarMetricDoc>>,
    pub talent: Option<Vec<SidebarMetricDoc>>,
    pub competitiveness: Option<Vec<SidebarMetricDoc>>,
}

/// One sidebar metric triple
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SidebarMetricDoc {
    pub value: Option<DisplayValue>,
    pub label: Option<String>,
    pub change: Option<DisplayValue>,
    /// Direction class: `positive`, `negative` or `neutral`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A value shown verbatim in the markup
///
/// Authors write both `"8.2%"` and `78` in the sidebar, so either form
/// is accepted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
}

impl DisplayValue {
    pub fn to_display(&self) -> String {
        match self {
            DisplayValue::Text(s) => s.clone(),
            DisplayValue::Number(n) => format_score(*n),
        }
    }
}

/// Format a number the way it is written in the markup: integers without
/// a fractional part, everything else as-is.
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Per-chart data series
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataDoc {
    pub chronic_disease: Option<ChronicDiseaseDoc>,
    pub dental_access: Option<DentalAccessDoc>,
    pub education: Option<EducationDoc>,
    pub graduation: Option<GraduationDoc>,
    pub migration: Option<MigrationDoc>,
    pub infrastructure: Option<InfrastructureDoc>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChronicDiseaseDoc {
    pub labels: Option<Vec<String>>,
    pub oxford: Option<Vec<f64>>,
    pub state_average: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DentalAccessDoc {
    pub years: Option<Vec<String>>,
    pub rates: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EducationDoc {
    pub labels: Option<Vec<String>>,
    pub oxford: Option<Vec<f64>>,
    pub national: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GraduationDoc {
    pub labels: Option<Vec<String>>,
    pub rates: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationDoc {
    pub years: Option<Vec<String>>,
    pub net_migration: Option<Vec<f64>>,
    pub income_growth: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct InfrastructureDoc {
    pub categories: Option<Vec<String>>,
    pub scores: Option<Vec<f64>>,
}

/// A geographic area (the subject town or one of its peers)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GeoAreaDoc {
    pub name: Option<String>,
    pub coordinates: Option<CoordinatesDoc>,
    pub pillars: Option<PillarsDoc>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CoordinatesDoc {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PillarsDoc {
    pub health: Option<f64>,
    pub talent: Option<f64>,
    pub competitiveness: Option<f64>,
}

/// A document read from JSON, with the paths of every leaf that had to be
/// dropped because it had the wrong type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub document: SourceDocument,
    /// Dotted paths such as `chartData.dentalAccess.years` or `peerAreas[1]`
    pub dropped: Vec<String>,
}

impl SourceDocument {
    /// Parse a document from a JSON value, leaf by leaf.
    ///
    /// A leaf of the wrong type is dropped on its own and logged; its
    /// siblings are kept. Returns `None` only when the value is not a JSON
    /// object at all.
    pub fn parse(value: &serde_json::Value) -> Option<ParsedDocument> {
        let Some(root) = value.as_object() else {
            tracing::warn!("Data document is not a JSON object, ignoring it");
            return None;
        };

        let mut reader = Reader::default();
        let document = SourceDocument::read(&mut reader, root);
        Some(ParsedDocument {
            document,
            dropped: reader.dropped,
        })
    }

    /// Parse a document from a JSON value (see [`SourceDocument::parse`])
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        Self::parse(value).map(|parsed| parsed.document)
    }

    /// Parse a document from JSON text (see [`SourceDocument::parse`])
    pub fn from_json_str(text: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    fn read(r: &mut Reader, root: &Object) -> Self {
        Self {
            hero_stats: r.object(root, "", "heroStats").map(|(o, p)| HeroStatsDoc {
                population: r.count(o, &p, "population"),
                pillars: r.count(o, &p, "pillars"),
                metrics: r.count(o, &p, "metrics"),
            }),
            summary_cards: r.object(root, "", "summaryCards").map(|(o, p)| {
                let mut score = |key: &str| {
                    r.object(o, &p, key).map(|(card, path)| ScoreDoc {
                        score: r.number(card, &path, "score"),
                    })
                };
                SummaryCardsDoc {
                    health: score("health"),
                    talent: score("talent"),
                    competitiveness: score("competitiveness"),
                }
            }),
            sidebar_metrics: r.object(root, "", "sidebarMetrics").map(|(o, p)| {
                SidebarMetricsDoc {
                    health: r.entries(o, &p, "health", SidebarMetricDoc::read),
                    talent: r.entries(o, &p, "talent", SidebarMetricDoc::read),
                    competitiveness: r.entries(o, &p, "competitiveness", SidebarMetricDoc::read),
                }
            }),
            chart_data: r
                .object(root, "", "chartData")
                .map(|(o, p)| ChartDataDoc::read(r, o, &p)),
            primary_area: r
                .object(root, "", "primaryArea")
                .map(|(o, p)| GeoAreaDoc::read(r, o, &p)),
            peer_areas: r.entries(root, "", "peerAreas", GeoAreaDoc::read),
        }
    }
}

impl SidebarMetricDoc {
    fn read(r: &mut Reader, o: &Object, p: &str) -> Self {
        Self {
            value: r.display(o, p, "value"),
            label: r.display(o, p, "label").map(|l| l.to_display()),
            change: r.display(o, p, "change"),
            kind: r.text(o, p, "type"),
        }
    }
}

impl ChartDataDoc {
    fn read(r: &mut Reader, o: &Object, p: &str) -> Self {
        Self {
            chronic_disease: r.object(o, p, "chronicDisease").map(|(c, p)| ChronicDiseaseDoc {
                labels: r.labels(c, &p, "labels"),
                oxford: r.numbers(c, &p, "oxford"),
                state_average: r.numbers(c, &p, "stateAverage"),
            }),
            dental_access: r.object(o, p, "dentalAccess").map(|(c, p)| DentalAccessDoc {
                years: r.labels(c, &p, "years"),
                rates: r.numbers(c, &p, "rates"),
            }),
            education: r.object(o, p, "education").map(|(c, p)| EducationDoc {
                labels: r.labels(c, &p, "labels"),
                oxford: r.numbers(c, &p, "oxford"),
                national: r.numbers(c, &p, "national"),
            }),
            graduation: r.object(o, p, "graduation").map(|(c, p)| GraduationDoc {
                labels: r.labels(c, &p, "labels"),
                rates: r.numbers(c, &p, "rates"),
            }),
            migration: r.object(o, p, "migration").map(|(c, p)| MigrationDoc {
                years: r.labels(c, &p, "years"),
                net_migration: r.numbers(c, &p, "netMigration"),
                income_growth: r.numbers(c, &p, "incomeGrowth"),
            }),
            infrastructure: r.object(o, p, "infrastructure").map(|(c, p)| InfrastructureDoc {
                categories: r.labels(c, &p, "categories"),
                scores: r.numbers(c, &p, "scores"),
            }),
        }
    }
}

impl GeoAreaDoc {
    fn read(r: &mut Reader, o: &Object, p: &str) -> Self {
        Self {
            name: r.text(o, p, "name"),
            coordinates: r.object(o, p, "coordinates").map(|(c, p)| CoordinatesDoc {
                lat: r.number(c, &p, "lat"),
                lng: r.number(c, &p, "lng"),
            }),
            pillars: r.object(o, p, "pillars").map(|(c, p)| PillarsDoc {
                health: r.number(c, &p, "health"),
                talent: r.number(c, &p, "talent"),
                competitiveness: r.number(c, &p, "competitiveness"),
            }),
            color: r.text(o, p, "color"),
        }
    }
}

type Object = serde_json::Map<String, serde_json::Value>;

/// Reads typed leaves out of a JSON tree, collecting the paths of those
/// that have the wrong type. Absent keys and `null` are not errors.
#[derive(Debug, Default)]
struct Reader {
    dropped: Vec<String>,
}

impl Reader {
    fn get<'a>(&self, o: &'a Object, key: &str) -> Option<&'a serde_json::Value> {
        o.get(key).filter(|v| !v.is_null())
    }

    fn drop_leaf(&mut self, path: String, expected: &str, found: &serde_json::Value) {
        tracing::warn!(
            path = %path,
            expected,
            found = %found,
            "Dropping malformed document field"
        );
        self.dropped.push(path);
    }

    /// Read one leaf with `convert`; a leaf that does not convert is dropped
    fn leaf<T>(
        &mut self,
        o: &Object,
        parent: &str,
        key: &str,
        expected: &str,
        convert: impl FnOnce(&serde_json::Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.get(o, key)?;
        let converted = convert(value);
        if converted.is_none() {
            self.drop_leaf(join(parent, key), expected, value);
        }
        converted
    }

    fn object<'a>(&mut self, o: &'a Object, parent: &str, key: &str) -> Option<(&'a Object, String)> {
        let value = self.get(o, key)?;
        match value.as_object() {
            Some(object) => Some((object, join(parent, key))),
            None => {
                self.drop_leaf(join(parent, key), "object", value);
                None
            }
        }
    }

    /// Whole-number counter; integral floats such as `25416.0` are accepted
    fn count<T: TryFrom<u64>>(&mut self, o: &Object, parent: &str, key: &str) -> Option<T> {
        self.leaf(o, parent, key, "non-negative integer", |v| {
            as_count(v).and_then(|n| T::try_from(n).ok())
        })
    }

    fn number(&mut self, o: &Object, parent: &str, key: &str) -> Option<f64> {
        self.leaf(o, parent, key, "number", serde_json::Value::as_f64)
    }

    fn text(&mut self, o: &Object, parent: &str, key: &str) -> Option<String> {
        self.leaf(o, parent, key, "string", |v| v.as_str().map(str::to_string))
    }

    fn display(&mut self, o: &Object, parent: &str, key: &str) -> Option<DisplayValue> {
        self.leaf(o, parent, key, "string or number", as_display)
    }

    fn numbers(&mut self, o: &Object, parent: &str, key: &str) -> Option<Vec<f64>> {
        self.leaf(o, parent, key, "array of numbers", |v| {
            v.as_array()?.iter().map(serde_json::Value::as_f64).collect()
        })
    }

    /// Category labels; numbers (years, mostly) are written out as text
    fn labels(&mut self, o: &Object, parent: &str, key: &str) -> Option<Vec<String>> {
        self.leaf(o, parent, key, "array of strings or numbers", |v| {
            v.as_array()?
                .iter()
                .map(|item| as_display(item).map(|d| d.to_display()))
                .collect()
        })
    }

    /// A list whose entries are read one by one. An entry that is not an
    /// object is dropped and stands in as an empty entry, so the positions
    /// of the others do not shift.
    fn entries<T: Default>(
        &mut self,
        o: &Object,
        parent: &str,
        key: &str,
        read: impl Fn(&mut Reader, &Object, &str) -> T,
    ) -> Option<Vec<T>> {
        let value = self.get(o, key)?;
        let path = join(parent, key);
        let Some(items) = value.as_array() else {
            self.drop_leaf(path, "array", value);
            return None;
        };

        let entries = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let entry_path = format!("{}[{}]", path, index);
                match item.as_object() {
                    Some(entry) => read(self, entry, &entry_path),
                    None => {
                        self.drop_leaf(entry_path, "object", item);
                        T::default()
                    }
                }
            })
            .collect();
        Some(entries)
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn as_count(value: &serde_json::Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    (n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

fn as_display(value: &serde_json::Value) -> Option<DisplayValue> {
    match value {
        serde_json::Value::String(s) => Some(DisplayValue::Text(s.clone())),
        serde_json::Value::Number(n) => n.as_f64().map(DisplayValue::Number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ParsedDocument {
        SourceDocument::parse(&value).unwrap()
    }

    #[test]
    fn test_missing_and_null_fields_are_none() {
        let parsed = parse(json!({"heroStats": {"population": null, "pillars": 3}}));
        let hero = parsed.document.hero_stats.unwrap();
        assert_eq!(hero.population, None);
        assert_eq!(hero.pillars, Some(3));
        assert_eq!(hero.metrics, None);
        assert!(parsed.document.chart_data.is_none());
        assert!(parsed.dropped.is_empty());
    }

    #[test]
    fn test_display_value_accepts_text_and_numbers() {
        let parsed = parse(json!({
            "sidebarMetrics": {
                "health": [{"value": 78, "label": 2024, "change": "+10%", "type": "positive"}]
            }
        }));
        let metrics = parsed.document.sidebar_metrics.unwrap().health.unwrap();
        assert_eq!(metrics[0].value.as_ref().unwrap().to_display(), "78");
        assert_eq!(metrics[0].label.as_deref(), Some("2024"));
        assert_eq!(metrics[0].change.as_ref().unwrap().to_display(), "+10%");
        assert_eq!(metrics[0].kind.as_deref(), Some("positive"));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(72.0), "72");
        assert_eq!(format_score(8.2), "8.2");
        assert_eq!(format_score(-3.0), "-3");
    }

    #[test]
    fn test_bad_leaf_is_dropped_alone() {
        let parsed = parse(json!({
            "heroStats": {"population": "lots", "pillars": 4},
            "summaryCards": {"health": {"score": 80}, "talent": {"score": "high"}}
        }));
        let doc = &parsed.document;

        let hero = doc.hero_stats.as_ref().unwrap();
        assert_eq!(hero.population, None);
        assert_eq!(hero.pillars, Some(4));

        let cards = doc.summary_cards.as_ref().unwrap();
        assert_eq!(cards.health.as_ref().unwrap().score, Some(80.0));
        assert_eq!(cards.talent.as_ref().unwrap().score, None);

        assert_eq!(
            parsed.dropped,
            vec!["heroStats.population", "summaryCards.talent.score"]
        );
    }

    #[test]
    fn test_integral_float_counts_are_accepted() {
        let parsed = parse(json!({"heroStats": {"population": 25416.0, "metrics": 2.5}}));
        let hero = parsed.document.hero_stats.unwrap();
        assert_eq!(hero.population, Some(25416));
        assert_eq!(hero.metrics, None);
        assert_eq!(parsed.dropped, vec!["heroStats.metrics"]);
    }

    #[test]
    fn test_numeric_labels_become_text() {
        let parsed = parse(json!({
            "chartData": {
                "dentalAccess": {"years": [2019, 2020, "2021"]},
                "graduation": {"labels": ["A", {"b": 1}], "rates": [50, 60]}
            }
        }));
        let charts = parsed.document.chart_data.unwrap();

        let dental = charts.dental_access.unwrap();
        assert_eq!(
            dental.years.unwrap(),
            vec!["2019".to_string(), "2020".to_string(), "2021".to_string()]
        );

        let graduation = charts.graduation.unwrap();
        assert_eq!(graduation.labels, None);
        assert_eq!(graduation.rates, Some(vec![50.0, 60.0]));
        assert_eq!(parsed.dropped, vec!["chartData.graduation.labels"]);
    }

    #[test]
    fn test_bad_list_entry_keeps_positions() {
        let parsed = parse(json!({
            "peerAreas": [
                {"name": "Ithaca, NY Micro", "coordinates": {"lat": 42.4, "lng": -76.5}},
                "not an area",
                {"name": "Bad", "coordinates": {"lat": "n/a", "lng": -80.0}}
            ]
        }));
        let peers = parsed.document.peer_areas.unwrap();

        assert_eq!(peers.len(), 3);
        assert_eq!(peers[0].name.as_deref(), Some("Ithaca, NY Micro"));
        assert_eq!(peers[1], GeoAreaDoc::default());
        let bad = peers[2].coordinates.as_ref().unwrap();
        assert_eq!(bad.lat, None);
        assert_eq!(bad.lng, Some(-80.0));
        assert_eq!(
            parsed.dropped,
            vec!["peerAreas[1]", "peerAreas[2].coordinates.lat"]
        );
    }

    #[test]
    fn test_wrong_section_type_is_dropped() {
        let parsed = parse(json!({"chartData": [1, 2], "peerAreas": {"name": "x"}}));
        assert!(parsed.document.chart_data.is_none());
        assert!(parsed.document.peer_areas.is_none());
        assert_eq!(parsed.dropped, vec!["chartData", "peerAreas"]);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(SourceDocument::from_json_str("[1, 2, 3]").unwrap().is_none());
        assert!(SourceDocument::from_json_str("not json").is_err());
    }
}
