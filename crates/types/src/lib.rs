//! Shared vocabulary for the duration input widgets.
//!
//! This crate holds the types that cross the boundary between the segment
//! and composite state machines and the host application: the fixed unit
//! enum, the ordered duration record, and the event/effect enums emitted by
//! the widgets. Keeping them out of the widget crate lets hosts consume the
//! aggregate change payload without depending on the state machines.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One duration granularity, from most to least significant.
///
/// The declaration order is the canonical significance order; everything
/// that iterates units (specifier parsing, record iteration, focus order)
/// derives from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Weeks (most significant)
    Weeks,
    /// Days
    Days,
    /// Hours
    Hours,
    /// Minutes
    Minutes,
    /// Seconds (least significant)
    Seconds,
}

/// Error returned when a unit token does not name one of the five units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized duration unit: {0:?}")]
pub struct ParseUnitError(pub String);

impl Unit {
    /// All units in canonical significance order.
    pub const ALL: [Unit; 5] = [Unit::Weeks, Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds];

    /// The lowercase token used in specifiers and serialized payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Weeks => "weeks",
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
        }
    }

    /// Default maximum for a segment of this unit.
    ///
    /// Applies to every active segment except the most significant one,
    /// which gets the configurable largest-unit maximum instead.
    pub const fn default_max(self) -> u32 {
        match self {
            Unit::Weeks => 52,
            Unit::Days => 7,
            Unit::Hours => 23,
            Unit::Minutes => 59,
            Unit::Seconds => 59,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weeks" => Ok(Unit::Weeks),
            "days" => Ok(Unit::Days),
            "hours" => Ok(Unit::Hours),
            "minutes" => Ok(Unit::Minutes),
            "seconds" => Ok(Unit::Seconds),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// Parses an active-units specifier (colon-separated tokens) into the
/// validated subset of units.
///
/// Unrecognized tokens are dropped silently and duplicates collapse; the
/// result is always in canonical significance order regardless of the
/// order tokens appear in the specifier. `"minutes:weeks:hours"` resolves
/// to weeks, hours, minutes.
pub fn parse_units_spec(spec: &str) -> Vec<Unit> {
    let requested: Vec<Unit> = spec.split(':').filter_map(|token| token.parse().ok()).collect();
    Unit::ALL.iter().copied().filter(|unit| requested.contains(unit)).collect()
}

/// Ordered mapping from active unit to its current value.
///
/// `None` means the segment is empty/unset, which is distinct from zero.
/// Iteration order is the canonical significance order of the active units.
/// Records are snapshots recomputed from segment state on demand, never the
/// owning store for values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationValues(IndexMap<Unit, Option<u64>>);

impl DurationValues {
    /// Creates a record for the given active units, all empty.
    pub fn new(units: &[Unit]) -> Self {
        Self(units.iter().map(|unit| (*unit, None)).collect())
    }

    /// Returns the value for `unit`, or `None` if it is empty or inactive.
    pub fn get(&self, unit: Unit) -> Option<u64> {
        self.0.get(&unit).copied().flatten()
    }

    /// Sets the value for `unit`; ignored (returns false) for inactive units.
    pub fn set(&mut self, unit: Unit, value: Option<u64>) -> bool {
        match self.0.get_mut(&unit) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Whether `unit` participates in this record.
    pub fn is_active(&self, unit: Unit) -> bool {
        self.0.contains_key(&unit)
    }

    /// Active units in significance order.
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        self.0.keys().copied()
    }

    /// Iterates `(unit, value)` pairs in significance order.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, Option<u64>)> + '_ {
        self.0.iter().map(|(unit, value)| (*unit, *value))
    }

    /// Number of active units.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no units are active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Unit, Option<u64>)> for DurationValues {
    fn from_iter<I: IntoIterator<Item = (Unit, Option<u64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Signal emitted by a single unit segment, consumed by the composite.
///
/// These are internal to the segment/composite pair; hosts observe
/// [`DurationEvent`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentEvent {
    /// The segment's value changed to the carried value (or became empty).
    Changed(Option<u64>),
    /// Request to move focus to the next (less significant) segment.
    Next,
    /// Request to move focus to the previous (more significant) segment.
    Previous,
}

/// Aggregate event emitted by the duration composite for its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationEvent {
    /// A segment committed a change; carries all active units' current
    /// values, not just the one that changed.
    Changed(DurationValues),
}

/// Whether a key event was swallowed by a widget.
///
/// Arrow keys and digit entry are consumed; everything else is reported as
/// ignored so hosts can layer their own bindings on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was recognized and handled; the host should not process it.
    Consumed,
    /// The key is not part of the widget's contract.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_parsing_restores_significance_order() {
        assert_eq!(parse_units_spec("minutes:weeks:hours"), vec![Unit::Weeks, Unit::Hours, Unit::Minutes]);
        assert_eq!(parse_units_spec("seconds:minutes:hours:days:weeks"), Unit::ALL.to_vec());
    }

    #[test]
    fn spec_parsing_drops_unknown_tokens_and_duplicates() {
        assert_eq!(parse_units_spec("fortnights:hours:parsecs"), vec![Unit::Hours]);
        assert_eq!(parse_units_spec("hours:hours:minutes"), vec![Unit::Hours, Unit::Minutes]);
        assert_eq!(parse_units_spec(""), Vec::new());
    }

    #[test]
    fn unit_tokens_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>(), Ok(unit));
        }
        assert_eq!(" Hours ".parse::<Unit>(), Ok(Unit::Hours));
        assert!("hour".parse::<Unit>().is_err());
    }

    #[test]
    fn record_ignores_inactive_units() {
        let mut record = DurationValues::new(&[Unit::Hours, Unit::Minutes]);
        assert!(record.set(Unit::Hours, Some(5)));
        assert!(!record.set(Unit::Days, Some(3)));
        assert_eq!(record.get(Unit::Hours), Some(5));
        assert_eq!(record.get(Unit::Days), None);
        assert!(!record.is_active(Unit::Days));
    }

    #[test]
    fn record_serializes_as_ordered_map() {
        let mut record = DurationValues::new(&[Unit::Weeks, Unit::Minutes]);
        record.set(Unit::Minutes, Some(30));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"weeks":null,"minutes":30}"#);
        let back: DurationValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
