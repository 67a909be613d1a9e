use std::fmt;

// ---------------------------------------------------------------------------
// Position codes → readable labels
// ---------------------------------------------------------------------------

/// Known abbreviations in lookup order. The first one found inside a position
/// string wins, even when a later entry would also match.
const POSITION_LABELS: [(&str, &str); 10] = [
    ("GK", "arquero"),
    ("CB", "defensa central"),
    ("LB", "lateral izquierdo"),
    ("RB", "lateral derecho"),
    ("DMF", "mediocampista defensivo"),
    ("CMF", "mediocampista central"),
    ("AMF", "mediocampista ofensivo"),
    ("RW", "extremo derecho"),
    ("LW", "extremo izquierdo"),
    ("CF", "delantero centro"),
];

/// Translate a raw position field (e.g. `"LCMF, DMF"`) into a readable label.
/// Returns the input unchanged when no known abbreviation occurs in it.
pub fn translate_position(position: &str) -> &str {
    POSITION_LABELS
        .iter()
        .find(|(code, _)| position.contains(code))
        .map(|(_, label)| *label)
        .unwrap_or(position)
}

// ---------------------------------------------------------------------------
// Position categories offered by the search selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PositionCategory {
    #[default]
    Goalkeeper,
    CentreBack,
    LeftBack,
    RightBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    Winger,
    Forward,
}

impl PositionCategory {
    /// Selector order.
    pub const ALL: [PositionCategory; 9] = [
        PositionCategory::Goalkeeper,
        PositionCategory::CentreBack,
        PositionCategory::LeftBack,
        PositionCategory::RightBack,
        PositionCategory::DefensiveMidfielder,
        PositionCategory::CentralMidfielder,
        PositionCategory::AttackingMidfielder,
        PositionCategory::Winger,
        PositionCategory::Forward,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "Arquero",
            PositionCategory::CentreBack => "Defensa",
            PositionCategory::LeftBack => "Lateral Izquierdo",
            PositionCategory::RightBack => "Lateral Derecho",
            PositionCategory::DefensiveMidfielder => "Mediocampista Defensivo",
            PositionCategory::CentralMidfielder => "Mediocampista Central",
            PositionCategory::AttackingMidfielder => "Mediocampista Ofensivo",
            PositionCategory::Winger => "Extremos",
            PositionCategory::Forward => "Delantero",
        }
    }

    /// Raw codes any of which qualifies a player for this category.
    pub fn codes(self) -> &'static [&'static str] {
        match self {
            PositionCategory::Goalkeeper => &["GK"],
            PositionCategory::CentreBack => &["CB"],
            PositionCategory::LeftBack => &["LB", "LWB"],
            PositionCategory::RightBack => &["RB", "RWB"],
            PositionCategory::DefensiveMidfielder => &["DMF"],
            PositionCategory::CentralMidfielder => &["CMF"],
            PositionCategory::AttackingMidfielder => &["AMF"],
            PositionCategory::Winger => &["RW", "LW", "LWF", "RWF"],
            PositionCategory::Forward => &["CF"],
        }
    }

    /// Whether a raw position field contains any of this category's codes.
    /// Plain substring match: "RW" also accepts "RWB".
    pub fn matches(self, position: &str) -> bool {
        self.codes().iter().any(|code| position.contains(code))
    }

    /// Look a category up by its selector label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_returns_first_match_in_table_order() {
        assert_eq!(translate_position("GK"), "arquero");
        // "CB" precedes "LB" in the table.
        assert_eq!(translate_position("LB, CB"), "defensa central");
        // "DMF" precedes "CMF"; "LCMF" only contains the latter.
        assert_eq!(translate_position("LCMF"), "mediocampista central");
        assert_eq!(translate_position("RCMF, DMF"), "mediocampista defensivo");
    }

    #[test]
    fn translate_passes_unknown_through() {
        assert_eq!(translate_position("SS"), "SS");
        assert_eq!(translate_position(""), "");
    }

    #[test]
    fn categories_keep_selector_order_and_default() {
        let labels: Vec<_> = PositionCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.first(), Some(&"Arquero"));
        assert_eq!(labels.last(), Some(&"Delantero"));
        assert_eq!(labels.len(), 9);
        assert_eq!(PositionCategory::default(), PositionCategory::Goalkeeper);
    }

    #[test]
    fn category_matching_uses_alternation() {
        assert!(PositionCategory::LeftBack.matches("LWB"));
        assert!(PositionCategory::LeftBack.matches("LB, LCB"));
        assert!(!PositionCategory::LeftBack.matches("RB"));
        assert!(PositionCategory::Forward.matches("CF, LWF"));
        // Overlapping substrings are accepted as-is.
        assert!(PositionCategory::Winger.matches("RWB"));
    }

    #[test]
    fn from_label_ignores_case() {
        assert_eq!(
            PositionCategory::from_label("lateral izquierdo"),
            Some(PositionCategory::LeftBack)
        );
        assert_eq!(PositionCategory::from_label("Delantero"), Some(PositionCategory::Forward));
        assert_eq!(PositionCategory::from_label("Portero"), None);
    }
}
