use core::sync::atomic::{AtomicU8, AtomicU16, AtomicU32, Ordering};

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum RunState {
    Idle = 0,
    Running = 1,
    Cancelled = 2,
}

impl RunState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}

/// Immutable progress snapshot for observers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunStatus {
    pub state: RunState,
    /// Zero-based chapter being shown.
    pub chapter_index: u16,
    pub chapter_total: u16,
    /// Zero-based screen most recently emitted.
    pub screen_index: u32,
    pub screen_total: u32,
    /// Screens committed so far in the current chapter.
    pub screens_shown: u32,
    pub phase: SessionPhase,
    /// Bumped on every change.
    pub revision: u32,
}

/// What the session as a whole is doing, across runs and pauses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum SessionPhase {
    /// No content queued.
    Waiting = 0,
    /// A playlist is in progress, including its settle and chapter pauses.
    Playing = 1,
    /// Content is queued but the device has not granted control.
    AwaitingControl = 2,
}

impl SessionPhase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Playing,
            2 => Self::AwaitingControl,
            _ => Self::Waiting,
        }
    }
}

/// Lock-free shared run status, written by the scheduler and read by anyone.
#[derive(Debug)]
pub struct StatusHandle {
    state: AtomicU8,
    chapter_index: AtomicU16,
    chapter_total: AtomicU16,
    screen_index: AtomicU32,
    screen_total: AtomicU32,
    screens_shown: AtomicU32,
    phase: AtomicU8,
    revision: AtomicU32,
}

impl StatusHandle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(RunState::Idle as u8),
            chapter_index: AtomicU16::new(0),
            chapter_total: AtomicU16::new(0),
            screen_index: AtomicU32::new(0),
            screen_total: AtomicU32::new(0),
            screens_shown: AtomicU32::new(0),
            phase: AtomicU8::new(SessionPhase::Waiting as u8),
            revision: AtomicU32::new(0),
        }
    }

    pub fn snapshot(&self) -> RunStatus {
        RunStatus {
            state: RunState::from_raw(self.state.load(Ordering::Acquire)),
            chapter_index: self.chapter_index.load(Ordering::Acquire),
            chapter_total: self.chapter_total.load(Ordering::Acquire),
            screen_index: self.screen_index.load(Ordering::Acquire),
            screen_total: self.screen_total.load(Ordering::Acquire),
            screens_shown: self.screens_shown.load(Ordering::Acquire),
            phase: SessionPhase::from_raw(self.phase.load(Ordering::Acquire)),
            revision: self.revision.load(Ordering::Acquire),
        }
    }

    pub fn state(&self) -> RunState {
        RunState::from_raw(self.state.load(Ordering::Acquire))
    }

    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_raw(self.phase.load(Ordering::Acquire))
    }

    pub fn revision(&self) -> u32 {
        self.revision.load(Ordering::Acquire)
    }

    pub(crate) fn mark_running(&self, screen_total: usize) {
        let mut changed = false;
        changed |= store_u32(&self.screen_total, saturate(screen_total));
        changed |= store_u32(&self.screen_index, 0);
        changed |= store_u32(&self.screens_shown, 0);
        changed |= self.store_state(RunState::Running);
        if changed {
            self.bump_revision();
        }
    }

    /// Records that screen `index` has been committed.
    pub(crate) fn screen_shown(&self, index: usize) {
        let mut changed = false;
        changed |= store_u32(&self.screen_index, saturate(index));
        changed |= store_u32(&self.screens_shown, saturate(index.saturating_add(1)));
        if changed {
            self.bump_revision();
        }
    }

    pub(crate) fn set_phase(&self, phase: SessionPhase) {
        if self.phase.swap(phase as u8, Ordering::AcqRel) != phase as u8 {
            self.bump_revision();
        }
    }

    pub(crate) fn set_chapter(&self, index: usize, total: usize) {
        let mut changed = false;
        changed |= store_u16(&self.chapter_index, saturate_u16(index));
        changed |= store_u16(&self.chapter_total, saturate_u16(total));
        if changed {
            self.bump_revision();
        }
    }

    pub(crate) fn mark_idle(&self) {
        if self.store_state(RunState::Idle) {
            self.bump_revision();
        }
    }

    pub(crate) fn mark_cancelled(&self) {
        if self.store_state(RunState::Cancelled) {
            self.bump_revision();
        }
    }

    fn store_state(&self, next: RunState) -> bool {
        self.state.swap(next as u8, Ordering::AcqRel) != next as u8
    }

    fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for StatusHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn store_u32(slot: &AtomicU32, value: u32) -> bool {
    slot.swap(value, Ordering::AcqRel) != value
}

fn store_u16(slot: &AtomicU16, value: u16) -> bool {
    slot.swap(value, Ordering::AcqRel) != value
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn saturate_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
