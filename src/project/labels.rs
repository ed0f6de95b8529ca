//! Area labels
//!
//! Short labels for the peer chart legend and map markers, derived from
//! area names such as `"Boone, NC Micro"` -> `"Boone"`.

use std::collections::HashSet;

use crate::model::ViewModel;

/// Fixed marker code of the primary area
pub const PRIMARY_CODE: &str = "OX";

/// Labels for every area of a view model, primary first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaLabels {
    pub primary: String,
    /// One label per peer, in peer order
    pub peers: Vec<String>,
}

impl AreaLabels {
    /// Derive labels for the primary area and its peers.
    ///
    /// Distinct names never share a label: when a short label is already
    /// taken the full name is used, and when that is taken too an ordinal
    /// suffix is appended.
    pub fn derive(vm: &ViewModel) -> Self {
        let primary = short_label(&vm.primary_area.name);
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(primary.clone());

        let peers = vm
            .peer_areas
            .iter()
            .map(|area| {
                let short = short_label(&area.name);
                let label = if !taken.contains(&short) {
                    short
                } else {
                    let full = area.name.trim().to_string();
                    if !taken.contains(&full) {
                        full
                    } else {
                        let mut ordinal = 2;
                        let mut candidate = format!("{} ({})", full, ordinal);
                        while taken.contains(&candidate) {
                            ordinal += 1;
                            candidate = format!("{} ({})", full, ordinal);
                        }
                        candidate
                    }
                };
                taken.insert(label.clone());
                label
            })
            .collect();

        Self { primary, peers }
    }
}

/// First comma-separated segment of a name, trimmed. Names without a
/// usable first segment are returned whole.
pub fn short_label(name: &str) -> String {
    let first = name.split(',').next().unwrap_or("").trim();
    if first.is_empty() {
        name.trim().to_string()
    } else {
        first.to_string()
    }
}

/// Two-letter marker code of a peer label
pub fn marker_code(label: &str) -> String {
    label.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::defaults;

    fn with_peers(names: &[&str]) -> ViewModel {
        let mut vm = defaults::view_model();
        let template = vm.peer_areas[0].clone();
        vm.peer_areas = names
            .iter()
            .map(|name| {
                let mut area = template.clone();
                area.name = name.to_string();
                area
            })
            .collect();
        vm
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Boone, NC Micro"), "Boone");
        assert_eq!(short_label("  Athens-Clarke County , GA"), "Athens-Clarke County");
        assert_eq!(short_label("Tupelo"), "Tupelo");
        assert_eq!(short_label(", MS"), ", MS");
    }

    #[test]
    fn test_marker_code() {
        assert_eq!(marker_code("Boone"), "BO");
        assert_eq!(marker_code("Starkville"), "ST");
        assert_eq!(marker_code("X"), "X");
    }

    #[test]
    fn test_default_labels() {
        let labels = AreaLabels::derive(&defaults::view_model());
        assert_eq!(labels.primary, "Oxford");
        assert_eq!(
            labels.peers,
            vec!["Clemson", "Boone", "Starkville", "Athens-Clarke County"]
        );
    }

    #[test]
    fn test_colliding_short_labels_fall_back_to_full_name() {
        let vm = with_peers(&["Clemson, SC Micro", "Clemson, NC Micro", "Oxford, OH Micro"]);
        let labels = AreaLabels::derive(&vm);
        assert_eq!(
            labels.peers,
            vec!["Clemson", "Clemson, NC Micro", "Oxford, OH Micro"]
        );
    }

    #[test]
    fn test_distinct_names_never_collide() {
        let vm = with_peers(&["Clemson", "Clemson, SC", "Clemson, SC ", "Clemson (2)", "Clemson"]);
        let labels = AreaLabels::derive(&vm);

        let unique: HashSet<_> = labels.peers.iter().collect();
        assert_eq!(unique.len(), labels.peers.len());
        assert!(!labels.peers.contains(&labels.primary));
    }

    #[test]
    fn test_no_peers() {
        let labels = AreaLabels::derive(&with_peers(&[]));
        assert!(labels.peers.is_empty());
    }
}
