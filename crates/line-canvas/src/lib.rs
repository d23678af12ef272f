#![cfg_attr(not(test), no_std)]

//! Line-slot canvas primitives for small line-oriented displays (smart-glasses canvases,
//! memory LCD text modes).
//!
//! A canvas exposes a bounded table of text slots. Writes are staged and only become
//! visible on [`LineCanvas::commit`].

extern crate alloc;

use log::trace;

mod frame;
pub mod layout;

pub use frame::{CanvasOp, FrameError, TextFrame};

/// Handle to one text slot created on a canvas.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotId(pub u8);

/// Horizontal text alignment inside a slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

/// Slot placement and text style.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotStyle {
    /// Left edge in canvas pixels.
    pub x: u16,
    /// Top edge in canvas pixels.
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub alignment: TextAlignment,
    /// Text drawn lit on a dark background.
    pub lit: bool,
}

/// Capability set a pagination run needs from the rendering collaborator.
pub trait LineCanvas {
    type Error: core::fmt::Debug;

    /// Creates a text slot for line `index` of a screen.
    fn create_line_slot(&mut self, index: u8, style: SlotStyle) -> Result<SlotId, Self::Error>;

    /// Stages new text for a slot.
    fn set_slot_text(&mut self, slot: SlotId, text: &str) -> Result<(), Self::Error>;

    /// Stages an empty slot.
    fn clear_slot(&mut self, slot: SlotId) -> Result<(), Self::Error>;

    /// Flushes staged changes to the physical display.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Releases a slot.
    fn remove_slot(&mut self, slot: SlotId) -> Result<(), Self::Error>;

    /// Drops every slot the canvas may hold and commits the empty canvas.
    ///
    /// The default walks the whole slot id space because the caller may not know which
    /// slots a previous owner left behind.
    fn clear_all(&mut self) -> Result<(), Self::Error> {
        for id in 0..layout::MAX_LINE_SLOTS {
            // Most ids were never handed out; failures here are expected.
            if let Err(err) = self.remove_slot(SlotId(id as u8)) {
                trace!("clear_all: slot {} not removed: {:?}", id, err);
            }
        }
        self.commit()
    }
}

impl<T: LineCanvas + ?Sized> LineCanvas for &mut T {
    type Error = T::Error;

    fn create_line_slot(&mut self, index: u8, style: SlotStyle) -> Result<SlotId, Self::Error> {
        (**self).create_line_slot(index, style)
    }

    fn set_slot_text(&mut self, slot: SlotId, text: &str) -> Result<(), Self::Error> {
        (**self).set_slot_text(slot, text)
    }

    fn clear_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        (**self).clear_slot(slot)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }

    fn remove_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        (**self).remove_slot(slot)
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        (**self).clear_all()
    }
}
