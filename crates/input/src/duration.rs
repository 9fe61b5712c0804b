//! Duration composite: an ordered run of unit segments behaving as one field.
//!
//! The composite owns the active-unit list (fixed after configuration), maps
//! each unit to a [`SegmentState`], folds per-segment changes into aggregate
//! change events, and routes next/previous intents into focus transfer. It
//! holds the segments in an explicit ordered registry, so focus moves are
//! direct index calls rather than lookups.

use crossterm::event::KeyEvent;
use durin_types::{DurationEvent, DurationValues, KeyOutcome, SegmentEvent, Unit, parse_units_spec};
use tracing::debug;

use crate::segment::SegmentState;

/// Host-facing configuration for a duration input.
///
/// Mirrors the attribute surface of the control: which units participate,
/// the maximum for the most significant one, initial per-unit values, and
/// the presentation-only chrome flags that are stored but never interpreted
/// by the state machine.
#[derive(Debug, Clone)]
pub struct DurationInputConfig {
    /// Active-units specifier, colon-separated (e.g. `"hours:minutes"`).
    /// Unrecognized tokens are dropped and the canonical significance order
    /// always wins over specifier order.
    pub units: String,
    /// Maximum for the first (most significant) active segment; every other
    /// segment uses its per-unit default.
    pub largest_unit_max: u32,
    /// Initial values, applied verbatim to the matching active segments.
    pub weeks: Option<u64>,
    pub days: Option<u64>,
    pub hours: Option<u64>,
    pub minutes: Option<u64>,
    pub seconds: Option<u64>,
    /// Disables all entry when set; values remain readable.
    pub disabled: bool,
    /// Chrome: error styling flag, passed through to hosts.
    pub error: bool,
    /// Chrome: field label.
    pub label: Option<String>,
    /// Chrome: suppress visible label rendering.
    pub label_hidden: bool,
}

impl Default for DurationInputConfig {
    fn default() -> Self {
        Self {
            units: String::new(),
            largest_unit_max: 99,
            weeks: None,
            days: None,
            hours: None,
            minutes: None,
            seconds: None,
            disabled: false,
            error: false,
            label: None,
            label_hidden: false,
        }
    }
}

impl DurationInputConfig {
    fn initial_for(&self, unit: Unit) -> Option<u64> {
        match unit {
            Unit::Weeks => self.weeks,
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
        }
    }
}

/// The duration input composite.
///
/// Each segment exclusively owns its value and bounds; the composite reads
/// them only through the segment contract and recomputes the aggregate
/// record on demand. All operations are synchronous, so a blur commit
/// always completes before the next segment gains focus.
#[derive(Debug)]
pub struct DurationInput {
    units: Vec<Unit>,
    segments: Vec<SegmentState>,
    disabled: bool,
    error: bool,
    label: Option<String>,
    label_hidden: bool,
}

impl DurationInput {
    /// Builds the composite from its configuration. The active unit set and
    /// order are fixed from here on.
    pub fn new(config: DurationInputConfig) -> Self {
        let units = parse_units_spec(&config.units);
        let mut segments = Vec::with_capacity(units.len());
        for (index, unit) in units.iter().copied().enumerate() {
            let max = if index == 0 { config.largest_unit_max } else { unit.default_max() };
            let mut segment = SegmentState::new(unit, max);
            segment.set_disabled(config.disabled);
            segment.set_value(config.initial_for(unit));
            segments.push(segment);
        }
        debug!(units = ?units, largest_unit_max = config.largest_unit_max, "configured duration input");
        Self {
            units,
            segments,
            disabled: config.disabled,
            error: config.error,
            label: config.label,
            label_hidden: config.label_hidden,
        }
    }

    // ----- Getters -----

    /// Active units in significance order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The segment for `unit`, if it is active.
    pub fn segment(&self, unit: Unit) -> Option<&SegmentState> {
        self.index_of(unit).map(|index| &self.segments[index])
    }

    /// Index of the currently focused segment, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.segments.iter().position(SegmentState::is_focused)
    }

    /// Unit of the currently focused segment, if any.
    pub fn focused_unit(&self) -> Option<Unit> {
        self.focused_index().map(|index| self.units[index])
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
    pub fn has_error(&self) -> bool {
        self.error
    }
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    pub fn is_label_hidden(&self) -> bool {
        self.label_hidden
    }

    /// Snapshot of all active units' current values, recomputed from the
    /// segments; the record never owns the values.
    pub fn values(&self) -> DurationValues {
        self.segments.iter().map(|segment| (segment.unit(), segment.value())).collect()
    }

    // ----- Setters -----

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        for segment in &mut self.segments {
            segment.set_disabled(disabled);
        }
    }

    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    /// Overrides the bounds of one active segment (the minimum is zero
    /// everywhere unless overridden here); ignored for inactive units.
    pub fn set_unit_bounds(&mut self, unit: Unit, min: i64, max: i64) {
        if let Some(index) = self.index_of(unit) {
            self.segments[index].set_bounds(min, max);
        }
    }

    /// Applies the provided unit values to their segments, verbatim.
    ///
    /// Units absent from the record or not active here are ignored. Each
    /// segment that actually changes produces one aggregate event carrying
    /// the record as of that change.
    pub fn set_values(&mut self, values: &DurationValues) -> Vec<DurationEvent> {
        let mut events = Vec::new();
        for (unit, value) in values.iter() {
            let Some(index) = self.index_of(unit) else {
                continue;
            };
            if !self.segments[index].set_value(value).is_empty() {
                events.push(DurationEvent::Changed(self.values()));
            }
        }
        events
    }

    // ----- Event routing -----

    /// Offers a key event to the focused segment and folds the outcome.
    ///
    /// Value changes become aggregate change events; next/previous intents
    /// become focus transfer, which is a no-op past either end. A commit
    /// clamp triggered by the focus transfer also surfaces as an aggregate
    /// event. Keys the segment does not recognize are reported as ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> (KeyOutcome, Vec<DurationEvent>) {
        let Some(index) = self.focused_index() else {
            return (KeyOutcome::Ignored, Vec::new());
        };
        let (outcome, segment_events) = self.segments[index].handle_key(key);
        (outcome, self.route(index, segment_events))
    }

    /// Routes one keystroke's inserted text to the focused segment.
    pub fn handle_input(&mut self, data: Option<&str>) -> Vec<DurationEvent> {
        let Some(index) = self.focused_index() else {
            return Vec::new();
        };
        let segment_events = self.segments[index].handle_input(data);
        self.route(index, segment_events)
    }

    /// Moves focus to the segment at `index`.
    ///
    /// The outgoing segment is blurred first, so its commit clamp completes
    /// (and is reported) before the new segment gains focus. Out-of-range
    /// indices are ignored.
    pub fn focus_index(&mut self, index: usize) -> Vec<DurationEvent> {
        let mut events = Vec::new();
        if index >= self.segments.len() {
            return events;
        }
        if let Some(current) = self.focused_index() {
            if current == index {
                return events;
            }
            if !self.segments[current].on_blur().is_empty() {
                events.push(DurationEvent::Changed(self.values()));
            }
        }
        self.segments[index].on_focus();
        debug!(unit = %self.units[index], "focus moved");
        events
    }

    /// Moves focus to the segment for `unit`; ignored for inactive units.
    pub fn focus_unit(&mut self, unit: Unit) -> Vec<DurationEvent> {
        match self.index_of(unit) {
            Some(index) => self.focus_index(index),
            None => Vec::new(),
        }
    }

    /// Blurs the focused segment, committing its value.
    pub fn blur(&mut self) -> Vec<DurationEvent> {
        let Some(index) = self.focused_index() else {
            return Vec::new();
        };
        if self.segments[index].on_blur().is_empty() {
            Vec::new()
        } else {
            vec![DurationEvent::Changed(self.values())]
        }
    }

    fn index_of(&self, unit: Unit) -> Option<usize> {
        self.units.iter().position(|candidate| *candidate == unit)
    }

    fn route(&mut self, index: usize, segment_events: Vec<SegmentEvent>) -> Vec<DurationEvent> {
        let mut events = Vec::new();
        for event in segment_events {
            match event {
                SegmentEvent::Changed(_) => {
                    events.push(DurationEvent::Changed(self.values()));
                }
                SegmentEvent::Next => {
                    if index + 1 < self.segments.len() {
                        events.extend(self.focus_index(index + 1));
                    }
                }
                SegmentEvent::Previous => {
                    if index > 0 {
                        events.extend(self.focus_index(index - 1));
                    }
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_gets_the_largest_unit_max() {
        let input = DurationInput::new(DurationInputConfig {
            units: "hours:minutes:seconds".into(),
            largest_unit_max: 120,
            ..Default::default()
        });
        assert_eq!(input.units(), &[Unit::Hours, Unit::Minutes, Unit::Seconds]);
        assert_eq!(input.segment(Unit::Hours).unwrap().max(), 120);
        assert_eq!(input.segment(Unit::Minutes).unwrap().max(), 59);
        assert_eq!(input.segment(Unit::Seconds).unwrap().max(), 59);
    }

    #[test]
    fn initial_values_apply_verbatim() {
        let input = DurationInput::new(DurationInputConfig {
            units: "hours:minutes".into(),
            hours: Some(200),
            seconds: Some(10), // inactive, dropped
            ..Default::default()
        });
        assert_eq!(input.segment(Unit::Hours).unwrap().value(), Some(200));
        assert_eq!(input.segment(Unit::Minutes).unwrap().value(), None);
        assert!(input.segment(Unit::Seconds).is_none());
    }

    #[test]
    fn empty_specifier_yields_an_inert_composite() {
        let mut input = DurationInput::new(DurationInputConfig::default());
        assert!(input.units().is_empty());
        assert!(input.values().is_empty());
        assert!(input.focus_index(0).is_empty());
        assert!(input.handle_input(Some("5")).is_empty());
        let key = KeyEvent::new(crossterm::event::KeyCode::Up, crossterm::event::KeyModifiers::NONE);
        assert_eq!(input.handle_key(key).0, KeyOutcome::Ignored);
    }

    #[test]
    fn unit_bounds_can_be_overridden_after_configuration() {
        let mut input = DurationInput::new(DurationInputConfig {
            units: "hours:minutes".into(),
            ..Default::default()
        });
        input.set_unit_bounds(Unit::Minutes, 15, 45);
        input.set_unit_bounds(Unit::Seconds, 1, 2); // inactive, ignored
        let minutes = input.segment(Unit::Minutes).unwrap();
        assert_eq!(minutes.min(), 15);
        assert_eq!(minutes.max(), 45);
    }

    #[test]
    fn set_values_emits_one_aggregate_per_changed_segment() {
        let mut input = DurationInput::new(DurationInputConfig {
            units: "hours:minutes".into(),
            ..Default::default()
        });
        let mut update = DurationValues::new(&[Unit::Hours, Unit::Minutes, Unit::Days]);
        update.set(Unit::Hours, Some(4));
        update.set(Unit::Days, Some(2)); // inactive, ignored
        let events = input.set_values(&update);
        // Only hours actually changed; minutes stays empty, so exactly one
        // aggregate event is emitted.
        assert_eq!(events.len(), 1);
        let DurationEvent::Changed(record) = &events[0];
        assert_eq!(record.get(Unit::Hours), Some(4));
        assert!(record.is_active(Unit::Minutes));
        assert!(!record.is_active(Unit::Days));
    }
}
