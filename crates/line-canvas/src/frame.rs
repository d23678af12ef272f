//! In-memory slot canvas that records every operation and committed frame.

use alloc::{string::String, vec::Vec};
use core::fmt;

use heapless::Vec as HeaplessVec;
use log::trace;

use crate::{LineCanvas, SlotId, SlotStyle, layout::MAX_LINE_SLOTS};

/// One canvas operation, in call order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CanvasOp {
    Create { index: u8, slot: SlotId },
    SetText { slot: SlotId, text: String },
    Clear { slot: SlotId },
    Commit,
    Remove { slot: SlotId },
    ClearAll,
}

/// Canvas errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameError {
    /// The slot was never created or has been removed.
    UnknownSlot(SlotId),
    /// All [`MAX_LINE_SLOTS`] slots are in use.
    SlotTableFull,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot(slot) => write!(f, "unknown text slot {}", slot.0),
            Self::SlotTableFull => write!(f, "all {} text slots are in use", MAX_LINE_SLOTS),
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    id: SlotId,
    style: SlotStyle,
    staged: String,
}

/// Slot canvas backed by memory.
///
/// Staged text becomes visible only on [`LineCanvas::commit`], which snapshots the
/// slot texts (in creation order) into the committed frame list.
#[derive(Clone, Debug, Default)]
pub struct TextFrame {
    slots: HeaplessVec<Slot, MAX_LINE_SLOTS>,
    next_id: u8,
    visible: Vec<String>,
    frames: Vec<Vec<String>>,
    ops: Vec<CanvasOp>,
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts currently shown on the display, one entry per slot.
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Every committed frame, oldest first.
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    /// Every operation, oldest first.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Committed frames that show at least one non-empty line.
    pub fn text_frames(&self) -> impl Iterator<Item = &[String]> {
        self.frames
            .iter()
            .filter(|frame| frame.iter().any(|line| !line.is_empty()))
            .map(Vec::as_slice)
    }

    /// Number of live slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops the recorded frame and operation history, keeping the live slots.
    pub fn clear_history(&mut self) {
        self.frames.clear();
        self.ops.clear();
    }

    /// Style a live slot was created with.
    pub fn slot_style(&self, slot: SlotId) -> Option<SlotStyle> {
        self.slots.iter().find(|s| s.id == slot).map(|s| s.style)
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut Slot, FrameError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == slot)
            .ok_or(FrameError::UnknownSlot(slot))
    }

    fn allocate_id(&mut self) -> Option<SlotId> {
        for _ in 0..MAX_LINE_SLOTS {
            let candidate = SlotId(self.next_id);
            self.next_id = ((self.next_id as usize + 1) % MAX_LINE_SLOTS) as u8;
            if !self.slots.iter().any(|s| s.id == candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

impl LineCanvas for TextFrame {
    type Error = FrameError;

    fn create_line_slot(&mut self, index: u8, style: SlotStyle) -> Result<SlotId, Self::Error> {
        let id = self.allocate_id().ok_or(FrameError::SlotTableFull)?;
        self.slots
            .push(Slot {
                id,
                style,
                staged: String::new(),
            })
            .map_err(|_| FrameError::SlotTableFull)?;
        self.ops.push(CanvasOp::Create { index, slot: id });
        Ok(id)
    }

    fn set_slot_text(&mut self, slot: SlotId, text: &str) -> Result<(), Self::Error> {
        let target = self.slot_mut(slot)?;
        target.staged.clear();
        target.staged.push_str(text);
        self.ops.push(CanvasOp::SetText {
            slot,
            text: String::from(text),
        });
        Ok(())
    }

    fn clear_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        self.slot_mut(slot)?.staged.clear();
        self.ops.push(CanvasOp::Clear { slot });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.visible = self.slots.iter().map(|s| s.staged.clone()).collect();
        self.frames.push(self.visible.clone());
        self.ops.push(CanvasOp::Commit);
        trace!("frame committed slots={}", self.visible.len());
        Ok(())
    }

    fn remove_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        let position = self
            .slots
            .iter()
            .position(|s| s.id == slot)
            .ok_or(FrameError::UnknownSlot(slot))?;
        self.slots.remove(position);
        self.ops.push(CanvasOp::Remove { slot });
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        self.slots.clear();
        self.ops.push(CanvasOp::ClearAll);
        self.commit()
    }
}
