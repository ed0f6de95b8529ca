//! Map Projector
//!
//! Builds the peer map: one marker per area with an info popup, and a
//! static legend. The map library draws whatever this describes.

use serde::{Deserialize, Serialize};

use super::labels::{marker_code, AreaLabels, PRIMARY_CODE};
use super::palette::{HEADING_COLOR, NATIONAL_SLATE, RED, TICK_COLOR};
use crate::model::{GeoArea, Pillar, ViewModel};

/// Map viewport and tile source, set from the `[map]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Initial center as `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub subdomains: String,
    pub scroll_wheel_zoom: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: [33.5, -86.5],
            zoom: 6,
            min_zoom: 5,
            max_zoom: 10,
            tile_url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>".to_string(),
            subdomains: "abcd".to_string(),
            scroll_wheel_zoom: false,
        }
    }
}

/// Complete map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: u8,
    pub zoom_control: bool,
    pub scroll_wheel_zoom: bool,
    pub tile_layer: TileLayer,
    pub markers: Vec<Marker>,
    pub legend: LegendControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub subdomains: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

/// One area marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// `[lat, lng]`
    pub position: [f64; 2],
    pub label: String,
    pub code: String,
    pub is_primary: bool,
    pub icon: DivIcon,
    pub popup_html: String,
}

/// HTML marker icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivIcon {
    pub class_name: String,
    pub html: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
}

/// Static legend overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendControl {
    pub position: String,
    pub html: String,
}

/// Marker sizing for one kind of area
struct MarkerStyle {
    size: u32,
    font_weight: u32,
    font_size: u32,
}

const PRIMARY_MARKER: MarkerStyle = MarkerStyle {
    size: 32,
    font_weight: 700,
    font_size: 14,
};

const PEER_MARKER: MarkerStyle = MarkerStyle {
    size: 24,
    font_weight: 600,
    font_size: 12,
};

/// Project the map widget
pub fn project_map(vm: &ViewModel, settings: &MapSettings) -> MapConfig {
    let labels = AreaLabels::derive(vm);

    let mut markers = Vec::with_capacity(vm.peer_areas.len() + 1);
    markers.push(marker(
        &vm.primary_area,
        &labels.primary,
        PRIMARY_CODE.to_string(),
        &PRIMARY_MARKER,
    ));
    for (area, label) in vm.peer_areas.iter().zip(labels.peers.iter()) {
        markers.push(marker(area, label, marker_code(label), &PEER_MARKER));
    }

    MapConfig {
        center: settings.center,
        zoom: settings.zoom,
        zoom_control: true,
        scroll_wheel_zoom: settings.scroll_wheel_zoom,
        tile_layer: TileLayer {
            url_template: settings.tile_url.clone(),
            attribution: settings.attribution.clone(),
            subdomains: settings.subdomains.clone(),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        },
        markers,
        legend: legend(&vm.primary_area),
    }
}

fn marker(area: &GeoArea, label: &str, code: String, style: &MarkerStyle) -> Marker {
    let color = escape_html(&area.color);
    let html = format!(
        "<div style=\"background: white; border: 3px solid {color}; border-radius: 50%; \
         width: {size}px; height: {size}px; display: flex; align-items: center; \
         justify-content: center; font-weight: {weight}; font-size: {font}px; \
         color: {color}; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.2);\">{code}</div>",
        color = color,
        size = style.size,
        weight = style.font_weight,
        font = style.font_size,
        code = escape_html(&code),
    );
    let half = style.size / 2;

    Marker {
        position: [area.coordinates.lat, area.coordinates.lng],
        label: label.to_string(),
        code,
        is_primary: area.is_primary,
        icon: DivIcon {
            class_name: "custom-marker".to_string(),
            html,
            icon_size: [style.size, style.size],
            icon_anchor: [half, half],
        },
        popup_html: popup(area),
    }
}

/// Popup body: area name, the three pillar scores and, for the primary
/// area, a focus badge
pub fn popup(area: &GeoArea) -> String {
    let color = escape_html(&area.color);
    let score = |pillar: Pillar, span: bool| {
        let style = if span { " style=\"grid-column: span 2;\"" } else { "" };
        format!(
            "<div{style}><span style=\"color: {muted};\">{title}:</span> \
             <strong style=\"color: {color};\">{value}</strong></div>",
            style = style,
            muted = TICK_COLOR,
            title = escape_html(pillar.title()),
            color = color,
            value = crate::source::format_score(area.pillars.get(pillar)),
        )
    };

    let badge = if area.is_primary {
        "<div style=\"margin-top: 8px; padding: 4px 8px; background: #fef3f2; color: #dc2626; \
         border-radius: 4px; font-size: 12px; font-weight: 500;\">Primary Focus Area</div>"
    } else {
        ""
    };

    format!(
        "<div style=\"min-width: 200px;\">\
         <h4 style=\"margin: 0 0 12px 0; color: {heading}; font-size: 16px; font-weight: 600;\">{name}</h4>\
         <div style=\"display: grid; grid-template-columns: 1fr 1fr; gap: 8px; font-size: 13px;\">\
         {health}{talent}{competitiveness}</div>{badge}</div>",
        heading = HEADING_COLOR,
        name = escape_html(&area.name),
        health = score(Pillar::Health, false),
        talent = score(Pillar::Talent, false),
        competitiveness = score(Pillar::Competitiveness, true),
        badge = badge,
    )
}

fn legend(primary: &GeoArea) -> LegendControl {
    let html = format!(
        "<div style=\"font-weight: 600; margin-bottom: 8px; color: {heading};\">Micropolitan Areas</div>\
         <div style=\"display: flex; align-items: center; margin-bottom: 4px;\">\
         <div style=\"width: 16px; height: 16px; background: {primary_color}; border-radius: 50%; margin-right: 8px;\"></div>\
         <span style=\"color: {muted};\">{primary_name} (Primary)</span></div>\
         <div style=\"display: flex; align-items: center; margin-bottom: 4px;\">\
         <div style=\"width: 12px; height: 12px; background: {peer_color}; border-radius: 50%; margin-right: 8px;\"></div>\
         <span style=\"color: {muted};\">Peer Micros</span></div>",
        heading = HEADING_COLOR,
        primary_color = RED,
        muted = TICK_COLOR,
        primary_name = escape_html(&super::labels::short_label(&primary.name)),
        peer_color = NATIONAL_SLATE,
    );

    LegendControl {
        position: "bottomright".to_string(),
        html,
    }
}

/// Escape text for inclusion in HTML markup
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
