//! Fixed text-field geometry for a 640x480 glasses canvas.

use crate::{SlotStyle, TextAlignment};

/// Canvas width in pixels.
pub const WIDTH: u16 = 640;
/// Canvas height in pixels.
pub const HEIGHT: u16 = 480;
/// Upper bound of text slots a canvas tracks.
pub const MAX_LINE_SLOTS: usize = 20;

/// Left inset of every text field.
pub const LEFT_MARGIN: u16 = 20;
/// Top inset of the first text field.
pub const TOP_MARGIN: u16 = 25;
/// Total horizontal padding subtracted from the canvas width.
pub const HORIZONTAL_PADDING: u16 = 40;
/// Distance between the tops of two consecutive text fields.
pub const LINE_SPACING: u16 = 48;
/// Text field height, kept below [`LINE_SPACING`] so fields never overlap.
pub const FIELD_HEIGHT: u16 = 35;

/// Number of stacked text fields that fit on the canvas.
pub const fn visible_line_capacity() -> usize {
    ((HEIGHT - TOP_MARGIN) / LINE_SPACING) as usize
}

/// Style of the text field for screen line `index`.
///
/// Fields are stacked top to bottom. Positions past the bottom edge are clamped so a
/// tall configuration still yields valid (overlapping) fields instead of failing.
pub fn line_slot_style(index: u8) -> SlotStyle {
    let y = TOP_MARGIN.saturating_add((index as u16).saturating_mul(LINE_SPACING));
    SlotStyle {
        x: LEFT_MARGIN,
        y: y.min(HEIGHT - FIELD_HEIGHT),
        width: WIDTH - HORIZONTAL_PADDING,
        height: FIELD_HEIGHT,
        alignment: TextAlignment::Left,
        lit: true,
    }
}
