//! Timed, cancellable emission of screens onto a line canvas.

mod cancel;
mod status;

use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use heapless::Vec as HeaplessVec;
use line_canvas::{
    LineCanvas, SlotId,
    layout::{MAX_LINE_SLOTS, line_slot_style},
};
use log::{debug, info, warn};

use crate::{config::PaginationConfig, paginate::Screen};

pub use cancel::{CancelReason, CancelToken};
pub use status::{RunState, RunStatus, SessionPhase, StatusHandle};

/// How a run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// Every screen was shown.
    Completed { screens: usize },
    /// There was nothing to show.
    Empty,
    /// Stopped early after `shown` screens.
    Cancelled { shown: usize, reason: CancelReason },
}

/// Waits `ms` unless `cancel` fires first. Returns `false` when interrupted.
pub async fn cancellable_pause(cancel: &CancelToken, ms: u64) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if ms == 0 {
        return true;
    }
    matches!(
        select(Timer::after_millis(ms), cancel.cancelled()).await,
        Either::First(())
    )
}

type SlotTable = HeaplessVec<SlotId, MAX_LINE_SLOTS>;

/// Single-writer loop over a screen sequence.
///
/// Each screen is cleared, filled and committed synchronously. The only suspension
/// point is the dwell between screens, which is raced against the [`CancelToken`].
pub struct DisplayScheduler<'a> {
    config: PaginationConfig,
    cancel: &'a CancelToken,
    status: &'a StatusHandle,
}

impl<'a> DisplayScheduler<'a> {
    pub fn new(config: PaginationConfig, cancel: &'a CancelToken, status: &'a StatusHandle) -> Self {
        Self {
            config,
            cancel,
            status,
        }
    }

    pub fn state(&self) -> RunState {
        self.status.state()
    }

    /// Shows `screens` in order. Must only be called while holding device control.
    pub async fn run<C: LineCanvas>(&mut self, canvas: &mut C, screens: &[Screen]) -> RunOutcome {
        if screens.is_empty() {
            info!("run skipped: no screens");
            self.status.mark_idle();
            return RunOutcome::Empty;
        }

        if let Some(reason) = self.cancel.reason() {
            info!("run skipped: cancelled before start reason={:?}", reason);
            self.status.mark_cancelled();
            return RunOutcome::Cancelled { shown: 0, reason };
        }

        let slots = match self.create_slots(canvas) {
            Ok(slots) => slots,
            Err(partial) => {
                self.cleanup(canvas, &partial);
                self.status.mark_cancelled();
                return RunOutcome::Cancelled {
                    shown: 0,
                    reason: CancelReason::CanvasFault,
                };
            }
        };

        self.status.mark_running(screens.len());
        info!(
            "run started screens={} dwell_ms={}",
            screens.len(),
            self.config.screen_dwell_ms
        );

        let mut shown = 0usize;
        let mut interrupted = None;
        for (index, screen) in screens.iter().enumerate() {
            if let Some(reason) = self.cancel.reason() {
                interrupted = Some(reason);
                break;
            }

            self.emit_screen(canvas, &slots, index, screen);
            self.status.screen_shown(index);
            shown += 1;

            let is_last = index + 1 == screens.len();
            if !is_last && !cancellable_pause(self.cancel, self.config.screen_dwell_ms).await {
                interrupted = self.cancel.reason();
                break;
            }
        }

        self.cleanup(canvas, &slots);

        match interrupted {
            Some(reason) => {
                info!(
                    "run cancelled shown={}/{} reason={:?}",
                    shown,
                    screens.len(),
                    reason
                );
                self.status.mark_cancelled();
                RunOutcome::Cancelled { shown, reason }
            }
            None => {
                info!("run completed screens={}", shown);
                self.status.mark_idle();
                RunOutcome::Completed { screens: shown }
            }
        }
    }

    fn create_slots<C: LineCanvas>(&self, canvas: &mut C) -> Result<SlotTable, SlotTable> {
        let mut slots = SlotTable::new();
        let count = self.config.max_lines_per_screen.min(MAX_LINE_SLOTS);
        for index in 0..count {
            let index = index as u8;
            match canvas.create_line_slot(index, line_slot_style(index)) {
                Ok(slot) => {
                    if slots.push(slot).is_err() {
                        return Err(slots);
                    }
                }
                Err(err) => {
                    warn!("line slot {} creation failed: {:?}", index, err);
                    return Err(slots);
                }
            }
        }
        Ok(slots)
    }

    fn emit_screen<C: LineCanvas>(
        &self,
        canvas: &mut C,
        slots: &[SlotId],
        index: usize,
        screen: &Screen,
    ) {
        for &slot in slots {
            if let Err(err) = canvas.clear_slot(slot) {
                warn!("clear slot {} failed: {:?}", slot.0, err);
            }
        }

        for (line, &slot) in screen.lines().iter().zip(slots) {
            debug!(
                "screen {} slot {} len={} text={:?}",
                index + 1,
                slot.0,
                line.char_len(),
                line.as_str()
            );
            if let Err(err) = canvas.set_slot_text(slot, line.as_str()) {
                warn!("set slot {} failed: {:?}", slot.0, err);
            }
        }

        if let Err(err) = canvas.commit() {
            warn!("commit of screen {} failed: {:?}", index + 1, err);
        }
    }

    fn cleanup<C: LineCanvas>(&self, canvas: &mut C, slots: &[SlotId]) {
        for &slot in slots {
            if let Err(err) = canvas.clear_slot(slot) {
                warn!("cleanup clear slot {} failed: {:?}", slot.0, err);
            }
        }
        for &slot in slots {
            if let Err(err) = canvas.remove_slot(slot) {
                warn!("cleanup remove slot {} failed: {:?}", slot.0, err);
            }
        }
        if let Err(err) = canvas.commit() {
            warn!("cleanup commit failed: {:?}", err);
        }
    }
}
