//! Presentation constants
//!
//! Colors, radii and type sizes shared by the projectors. These belong to
//! the page design, not to the data.

/// Subject town series color
pub const SUBJECT_BLUE: &str = "#3b82f6";

/// Reference series (state / national averages)
pub const REFERENCE_GRAY: &str = "#e2e8f0";
pub const NATIONAL_SLATE: &str = "#64748b";

pub const GREEN: &str = "#10b981";
pub const PURPLE: &str = "#8b5cf6";
pub const AMBER: &str = "#f59e0b";
pub const RED: &str = "#ef4444";
pub const WHITE: &str = "#ffffff";

/// Axis text and grid lines
pub const TICK_COLOR: &str = "#64748b";
pub const GRID_COLOR: &str = "#f1f5f9";
pub const HEADING_COLOR: &str = "#1a1a1a";

/// Doughnut slices, by category position
pub const GRADUATION_SLICES: [&str; 4] = [GREEN, SUBJECT_BLUE, PURPLE, AMBER];

/// Infrastructure bars, by category position
pub const INFRASTRUCTURE_BARS: [&str; 4] = [GREEN, SUBJECT_BLUE, AMBER, RED];

/// Series names shown in legends
pub const SUBJECT_NAME: &str = "Oxford";
pub const STATE_AVERAGE_NAME: &str = "Mississippi Average";
pub const NATIONAL_AVERAGE_NAME: &str = "National Average";

pub const LEGEND_PADDING: u32 = 20;
pub const LEGEND_FONT_SIZE: u32 = 11;
pub const LEGEND_FONT_WEIGHT: &str = "500";
pub const TICK_FONT_SIZE: u32 = 11;

/// Scatter point radii
pub const PRIMARY_POINT_RADIUS: u32 = 12;
pub const PRIMARY_POINT_HOVER_RADIUS: u32 = 15;
pub const PEER_POINT_RADIUS: u32 = 8;
pub const PEER_POINT_HOVER_RADIUS: u32 = 10;

/// Alpha of the area under a line and inside a radar polygon
pub const FILL_ALPHA: f64 = 0.1;

/// `#rrggbb` as an `rgba()` color with the given alpha. Channels that do
/// not parse as hex read as 0.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    format!(
        "rgba({}, {}, {}, {})",
        channel(0..2),
        channel(2..4),
        channel(4..6),
        alpha
    )
}

/// Translucent fill matching a series color
pub fn fill(hex: &str) -> String {
    with_alpha(hex, FILL_ALPHA)
}

/// Cycle through a positional color table
pub fn positional(table: &[&str], count: usize) -> Vec<String> {
    (0..count)
        .map(|i| table[i % table.len()].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_cycles() {
        let colors = positional(&INFRASTRUCTURE_BARS, 6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], GREEN);
        assert_eq!(colors[3], RED);
        assert_eq!(colors[4], GREEN);
        assert!(positional(&INFRASTRUCTURE_BARS, 0).is_empty());
    }

    #[test]
    fn test_fill_derives_from_series_color() {
        assert_eq!(fill(SUBJECT_BLUE), "rgba(59, 130, 246, 0.1)");
        assert_eq!(fill(GREEN), "rgba(16, 185, 129, 0.1)");
        assert_eq!(fill(NATIONAL_SLATE), "rgba(100, 116, 139, 0.1)");
        assert_eq!(with_alpha("#ffffff", 0.5), "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn test_with_alpha_tolerates_bad_hex() {
        assert_eq!(with_alpha("#zz", 1.0), "rgba(0, 0, 0, 1)");
        assert_eq!(with_alpha("", 0.1), "rgba(0, 0, 0, 0.1)");
    }
}
