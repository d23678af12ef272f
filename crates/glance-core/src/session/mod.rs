//! Run-start logic: device control arbitration, content replacement, and chapter
//! playlists on top of [`DisplayScheduler`].
//!
//! The session reacts to discrete [`SessionEvent`]s from a channel. Content starts
//! playing only while the device reports exclusive control; losing control cancels
//! the run and the same content restarts from the top when control comes back.

use alloc::{string::String, vec, vec::Vec};
use core::{convert::Infallible, future::Future};

use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Receiver};
use line_canvas::LineCanvas;
use log::{info, warn};

use crate::{
    config::{ConfigError, PaginationConfig, SessionConfig},
    paginate::paginate,
    schedule::{
        CancelReason, CancelToken, DisplayScheduler, RunOutcome, SessionPhase, StatusHandle,
        cancellable_pause,
    },
};

/// One playlist entry: a titled run of paragraphs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chapter {
    pub title: String,
    pub parts: Vec<String>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, parts: Vec<String>) -> Self {
        Self {
            title: title.into(),
            parts,
        }
    }

    pub fn untitled(parts: Vec<String>) -> Self {
        Self::new(String::new(), parts)
    }
}

/// Inputs that drive a [`ReadingSession`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEvent {
    /// Replace whatever is showing with these paragraphs.
    Show(Vec<String>),
    /// Replace whatever is showing with a chapter playlist.
    ShowChapters(Vec<Chapter>),
    /// The device reported gaining (`true`) or losing (`false`) exclusive control.
    ControlChanged(bool),
    /// Abort the current content.
    Stop,
    /// Abort and leave [`ReadingSession::run`].
    Shutdown,
}

/// Control-arbitration collaborator.
///
/// Grants and revocations are reported back as [`SessionEvent::ControlChanged`].
pub trait DeviceControl {
    fn request_control(&mut self);
    fn release_control(&mut self);
}

#[derive(Debug, Default)]
struct Arbiter {
    has_control: bool,
    pending: Option<Vec<Chapter>>,
    /// Restart the playing content once control returns.
    keep_current: bool,
    shutdown: bool,
}

/// Owns the canvas and plays submitted content one run at a time.
pub struct ReadingSession<'a, C, D> {
    canvas: C,
    control: D,
    config: PaginationConfig,
    timing: SessionConfig,
    cancel: &'a CancelToken,
    status: &'a StatusHandle,
    arbiter: Arbiter,
}

impl<'a, C, D> ReadingSession<'a, C, D>
where
    C: LineCanvas,
    D: DeviceControl,
{
    pub fn new(
        canvas: C,
        control: D,
        config: PaginationConfig,
        timing: SessionConfig,
        cancel: &'a CancelToken,
        status: &'a StatusHandle,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            canvas,
            control,
            config,
            timing,
            cancel,
            status,
            arbiter: Arbiter::default(),
        })
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn control(&self) -> &D {
        &self.control
    }

    pub fn has_control(&self) -> bool {
        self.arbiter.has_control
    }

    pub fn into_parts(self) -> (C, D) {
        (self.canvas, self.control)
    }

    /// Processes events until [`SessionEvent::Shutdown`], then releases control.
    ///
    /// The [`SessionPhase`] stays [`SessionPhase::Playing`] for the whole playlist,
    /// including the wipe after a replacement, so observers can tell queued content
    /// from a finished session.
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        events: Receiver<'_, M, SessionEvent, N>,
    ) {
        info!(
            "session ready chars_per_line={} lines_per_screen={} dwell_ms={}",
            self.config.max_chars_per_line,
            self.config.max_lines_per_screen,
            self.config.screen_dwell_ms
        );

        while !self.arbiter.shutdown {
            if self.arbiter.has_control
                && let Some(playlist) = self.arbiter.pending.take()
            {
                self.status.set_phase(SessionPhase::Playing);
                self.play(playlist, &events).await;
                continue;
            }

            self.status.set_phase(self.arbiter.idle_phase());
            let event = events.receive().await;
            self.arbiter
                .apply(event, &mut self.control, self.cancel, false);
        }

        self.status.set_phase(SessionPhase::Waiting);
        self.control.release_control();
        info!("session closed");
    }
}

include!("arbiter.rs");
include!("playback.rs");

#[cfg(test)]
mod tests;
