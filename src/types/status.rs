//! Core enums: WearStatus, ExtruderType

use serde::{Deserialize, Serialize};

/// Three-level wear status for a measurement point or a whole extruder.
///
/// Derived from the deviation ("écart") against the 1.0 threshold.
/// The variants are ordered by escalation priority, so `Ord` gives the
/// overall-status reduction for free (`ToReplace > ToOrder > Ok`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WearStatus {
    #[default]
    Ok,
    /// Spare parts should be ordered (deviation exactly at threshold)
    ToOrder,
    /// Screw/barrel must be replaced (deviation above threshold)
    ToReplace,
}

impl WearStatus {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            WearStatus::Ok => "OK",
            WearStatus::ToOrder => "To Order",
            WearStatus::ToReplace => "To Replace",
        }
    }

    /// Get short code for logging
    pub fn short_code(&self) -> &'static str {
        match self {
            WearStatus::Ok => "OK",
            WearStatus::ToOrder => "ORDER",
            WearStatus::ToReplace => "REPLACE",
        }
    }
}

impl std::fmt::Display for WearStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which extruder of a production line a measurement session targets.
///
/// Each line carries two extruders with independent calibration constants
/// and independent status tracking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtruderType {
    #[default]
    Principal,
    Secondary,
}

impl ExtruderType {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ExtruderType::Principal => "Principal",
            ExtruderType::Secondary => "Secondary",
        }
    }

    /// Get short code for logging and storage keys
    pub fn short_code(&self) -> &'static str {
        match self {
            ExtruderType::Principal => "PRI",
            ExtruderType::Secondary => "SEC",
        }
    }

    /// Parse from string (for API query parameters)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "principal" | "principale" | "pri" => Some(ExtruderType::Principal),
            "secondary" | "secondaire" | "sec" => Some(ExtruderType::Secondary),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExtruderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_priority_ordering() {
        assert!(WearStatus::ToReplace > WearStatus::ToOrder);
        assert!(WearStatus::ToOrder > WearStatus::Ok);
    }

    #[test]
    fn test_extruder_parse_aliases() {
        assert_eq!(ExtruderType::parse("principale"), Some(ExtruderType::Principal));
        assert_eq!(ExtruderType::parse("SEC"), Some(ExtruderType::Secondary));
        assert_eq!(ExtruderType::parse("tertiary"), None);
    }
}
