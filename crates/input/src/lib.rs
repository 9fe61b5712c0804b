//! # Durin input widgets
//!
//! State machines for a segmented duration editor: one numeric segment per
//! unit (weeks/days/hours/minutes/seconds) composed into a single field.
//! Entry follows the digit-shift rule: each typed number left-shifts the
//! existing digits and appends itself, so no cursor tracking is needed.
//! Out-of-range interim values are only clamped when a segment commits on
//! blur.
//!
//! The crate is rendering-free by design: hosts feed it normalized
//! keyboard events ([`crossterm::event::KeyEvent`]) and character input,
//! and consume the aggregate change events it returns. Focus state is
//! exposed through `rat-focus` flags so segments can join a host focus
//! ring.

pub mod digits;
mod duration;
mod segment;

pub use duration::{DurationInput, DurationInputConfig};
pub use segment::SegmentState;
