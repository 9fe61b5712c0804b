//! Single-unit numeric segment with digit-shift entry semantics.
//!
//! A segment models typing digits one at a time into a fixed-width field
//! without cursor or selection tracking: each typed number shifts the
//! existing digits left and appends itself, and overflow digits fall off the
//! left. Interim values may exceed the segment maximum; they are only
//! clamped into `[min, max]` when the segment commits on blur.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use durin_types::{KeyOutcome, SegmentEvent, Unit};
use rat_focus::FocusFlag;

use crate::digits::{clamp, digit_count, pow10};

/// State for one unit's numeric input field.
///
/// Every mutating operation returns the [`SegmentEvent`]s it produced, so
/// the composite can relay changes and navigation intents without the
/// segment knowing about its siblings. Invalid input never surfaces an
/// error; the segment keeps its prior state instead.
#[derive(Debug)]
pub struct SegmentState {
    unit: Unit,
    value: Option<u64>,
    min: u32,
    max: u32,
    digit_width: u32,
    disabled: bool,
    focus: FocusFlag,
}

impl SegmentState {
    /// Creates an empty segment for `unit` with bounds `[0, max]`.
    pub fn new(unit: Unit, max: u32) -> Self {
        let mut segment = Self {
            unit,
            value: None,
            min: 0,
            max: 0,
            digit_width: 1,
            disabled: false,
            focus: FocusFlag::named(unit.as_str()),
        };
        segment.set_bounds(0, i64::from(max));
        segment
    }

    // ----- Getters -----

    pub fn unit(&self) -> Unit {
        self.unit
    }
    pub fn value(&self) -> Option<u64> {
        self.value
    }
    pub fn min(&self) -> u32 {
        self.min
    }
    pub fn max(&self) -> u32 {
        self.max
    }
    /// Field width in digits, derived from the maximum.
    pub fn digit_width(&self) -> u32 {
        self.digit_width
    }
    /// Largest value the field can display: `10^digit_width - 1`.
    pub fn max_literal(&self) -> u64 {
        pow10(self.digit_width) - 1
    }
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
    pub fn is_focused(&self) -> bool {
        self.focus.get()
    }
    /// Focus flag for registration with a host focus ring.
    pub fn focus(&self) -> &FocusFlag {
        &self.focus
    }
    /// Placeholder shown by hosts for an empty field, one dash per digit.
    pub fn placeholder(&self) -> String {
        "–".repeat(self.digit_width as usize)
    }

    // ----- Setters -----

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Sets the bounds, flooring negatives to zero, and recomputes the
    /// field width from the new maximum.
    pub fn set_bounds(&mut self, min: i64, max: i64) {
        self.min = min.clamp(0, i64::from(u32::MAX)) as u32;
        self.max = max.clamp(0, i64::from(u32::MAX)) as u32;
        self.digit_width = digit_count(u64::from(self.max));
    }

    /// Programmatic set: the value is stored verbatim, without clamping.
    ///
    /// Emits a change only when the stored value actually differs.
    pub fn set_value(&mut self, value: Option<u64>) -> Vec<SegmentEvent> {
        if self.value == value {
            return Vec::new();
        }
        self.value = value;
        vec![SegmentEvent::Changed(value)]
    }

    /// Consumes one keystroke's inserted text.
    ///
    /// `None` or empty text is a deletion and clears the field. Numeric
    /// text is clamped into `[0, max_literal]` and composed onto the
    /// current value by the digit-shift rule; anything else is ignored.
    pub fn handle_input(&mut self, data: Option<&str>) -> Vec<SegmentEvent> {
        if self.disabled {
            return Vec::new();
        }
        let Some(text) = data.filter(|text| !text.is_empty()) else {
            return self.set_value(None);
        };
        let Ok(number) = text.trim().parse::<i64>() else {
            return Vec::new();
        };
        let number = clamp(number.max(0) as u64, 0, self.max_literal());
        self.set_value(Some(self.shift_in(number)))
    }

    /// Digit-shift composition: left-shifts the current value by the width
    /// of `number`, appends it, and drops overflow digits from the left.
    fn shift_in(&self, number: u64) -> u64 {
        let shifted = u128::from(self.value.unwrap_or(0)) * u128::from(pow10(digit_count(number)))
            + u128::from(number);
        (shifted % u128::from(pow10(self.digit_width))) as u64
    }

    /// Marks the segment focused.
    ///
    /// Hosts rendering an editable field should pin the caret to position 0
    /// here so the content is not auto-selected on entry; entry itself
    /// never consults a caret.
    pub fn on_focus(&mut self) {
        self.focus.set(true);
    }

    /// Marks the segment unfocused and commits: a present value is clamped
    /// into `[min, max]`. This is the only point where interim overshoot
    /// from digit-shift entry is corrected.
    pub fn on_blur(&mut self) -> Vec<SegmentEvent> {
        self.focus.set(false);
        match self.value {
            Some(value) => {
                let committed = clamp(value, u64::from(self.min), u64::from(self.max));
                if committed != value {
                    tracing::debug!(unit = %self.unit, from = value, to = committed, "clamped on commit");
                }
                self.set_value(Some(committed))
            }
            None => Vec::new(),
        }
    }

    /// Handles a key event while the segment has focus.
    ///
    /// Arrows step the value or request navigation, digits enter via the
    /// digit-shift rule, and Backspace/Delete clear the field. All of those
    /// are consumed even when they change nothing (an up-arrow at the
    /// maximum stays swallowed); unrecognized keys are reported as ignored
    /// and leave the state untouched.
    pub fn handle_key(&mut self, key: KeyEvent) -> (KeyOutcome, Vec<SegmentEvent>) {
        if self.disabled {
            return (KeyOutcome::Ignored, Vec::new());
        }
        match key.code {
            KeyCode::Up => (KeyOutcome::Consumed, self.increment()),
            KeyCode::Down => (KeyOutcome::Consumed, self.decrement()),
            KeyCode::Left => (KeyOutcome::Consumed, vec![SegmentEvent::Previous]),
            KeyCode::Right => (KeyOutcome::Consumed, vec![SegmentEvent::Next]),
            KeyCode::Backspace | KeyCode::Delete => (KeyOutcome::Consumed, self.handle_input(None)),
            KeyCode::Char(character)
                if character.is_ascii_digit() && is_plain_entry(key.modifiers) =>
            {
                let text = character.to_string();
                (KeyOutcome::Consumed, self.handle_input(Some(&text)))
            }
            _ => (KeyOutcome::Ignored, Vec::new()),
        }
    }

    /// Steps the value up by one, treating empty as zero; out of range is a
    /// silent no-op.
    fn increment(&mut self) -> Vec<SegmentEvent> {
        let next = self.value.unwrap_or(0).saturating_add(1);
        if next <= u64::from(self.max) {
            self.set_value(Some(next))
        } else {
            Vec::new()
        }
    }

    /// Steps the value down by one, treating empty as zero; results below
    /// zero or below the minimum are silent no-ops.
    fn decrement(&mut self) -> Vec<SegmentEvent> {
        let current = self.value.unwrap_or(0);
        if current == 0 {
            return Vec::new();
        }
        let next = current - 1;
        if next >= u64::from(self.min) {
            self.set_value(Some(next))
        } else {
            Vec::new()
        }
    }
}

/// True when no chord modifier is held, i.e. the key is plain text entry.
fn is_plain_entry(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}
