use std::io::{self, Write};

use glance_core::{DeviceControl, SessionEvent};
use line_canvas::{FrameError, LineCanvas, SlotId, SlotStyle, TextFrame};
use log::{debug, info, warn};

use super::EventSender;

/// Widest box drawn; longer lines run past the right border.
const MAX_BOX_WIDTH: usize = 160;

/// Line canvas that prints every committed frame to stdout.
pub(super) struct TerminalCanvas {
    frame: TextFrame,
    width: usize,
    commits: usize,
}

impl TerminalCanvas {
    pub(super) fn new(width: usize) -> Self {
        Self {
            frame: TextFrame::new(),
            width: width.clamp(1, MAX_BOX_WIDTH),
            commits: 0,
        }
    }

    fn print_frame(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let rule = "-".repeat(self.width + 2);
        writeln!(out, "+{rule}+")?;
        for line in self.frame.visible() {
            writeln!(out, "| {line:<width$} |", width = self.width)?;
        }
        writeln!(out, "+{rule}+")?;
        out.flush()
    }
}

impl LineCanvas for TerminalCanvas {
    type Error = FrameError;

    fn create_line_slot(&mut self, index: u8, style: SlotStyle) -> Result<SlotId, Self::Error> {
        self.frame.create_line_slot(index, style)
    }

    fn set_slot_text(&mut self, slot: SlotId, text: &str) -> Result<(), Self::Error> {
        self.frame.set_slot_text(slot, text)
    }

    fn clear_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        self.frame.clear_slot(slot)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.frame.commit()?;
        self.commits += 1;
        debug!("terminal commit {}", self.commits);
        if self.frame.visible().iter().any(|line| !line.is_empty())
            && let Err(err) = self.print_frame()
        {
            warn!("stdout write failed: {}", err);
        }
        // Only the live slots matter here.
        self.frame.clear_history();
        Ok(())
    }

    fn remove_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        self.frame.remove_slot(slot)
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        self.frame.clear_all()?;
        self.frame.clear_history();
        Ok(())
    }
}

/// Stands in for a headset's exclusive-control arbitration: every request is
/// granted on the spot. The `revoke`/`grant` commands simulate the rest.
pub(super) struct HostControl {
    events: EventSender,
}

impl HostControl {
    pub(super) fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl DeviceControl for HostControl {
    fn request_control(&mut self) {
        info!("control requested");
        if self
            .events
            .try_send(SessionEvent::ControlChanged(true))
            .is_err()
        {
            warn!("event queue full; control grant dropped");
        }
    }

    fn release_control(&mut self) {
        info!("control released");
    }
}
