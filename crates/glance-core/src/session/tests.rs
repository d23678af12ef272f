use alloc::{string::String, vec, vec::Vec};

use embassy_futures::{block_on, join::join};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Sender},
};
use embassy_time::Timer;
use line_canvas::{CanvasOp, FrameError, LineCanvas, SlotId, SlotStyle, TextFrame};

use super::*;
use crate::schedule::{RunState, RunStatus, SessionPhase};

type Events = Channel<CriticalSectionRawMutex, SessionEvent, 8>;
type EventSender<'ch> = Sender<'ch, CriticalSectionRawMutex, SessionEvent, 8>;

/// Grants control immediately through the event channel when asked.
struct FakeControl<'ch> {
    grant: Option<EventSender<'ch>>,
    requests: usize,
    releases: usize,
}

impl<'ch> FakeControl<'ch> {
    fn granting(sender: EventSender<'ch>) -> Self {
        Self {
            grant: Some(sender),
            requests: 0,
            releases: 0,
        }
    }

    fn manual() -> Self {
        Self {
            grant: None,
            requests: 0,
            releases: 0,
        }
    }
}

impl DeviceControl for FakeControl<'_> {
    fn request_control(&mut self) {
        self.requests += 1;
        if let Some(sender) = &self.grant {
            let _ = sender.try_send(SessionEvent::ControlChanged(true));
        }
    }

    fn release_control(&mut self) {
        self.releases += 1;
    }
}

/// Reports a control revocation right after the first commit that shows text.
struct RevokingCanvas<'ch> {
    frame: TextFrame,
    events: EventSender<'ch>,
    revoked: bool,
}

impl LineCanvas for RevokingCanvas<'_> {
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
        let shows_text = self
            .frame
            .frames()
            .last()
            .is_some_and(|lines| lines.iter().any(|line| !line.is_empty()));
        if shows_text && !self.revoked {
            self.revoked = true;
            let _ = self.events.try_send(SessionEvent::ControlChanged(false));
        }
        Ok(())
    }

    fn remove_slot(&mut self, slot: SlotId) -> Result<(), Self::Error> {
        self.frame.remove_slot(slot)
    }
}

fn one_line_screens(dwell_ms: u64) -> PaginationConfig {
    PaginationConfig::new(12, 1, dwell_ms).with_min_fragment_chars(0)
}

fn instant() -> SessionConfig {
    SessionConfig {
        chapter_pause_ms: 0,
        settle_ms: 0,
    }
}

fn parts(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| String::from(*text)).collect()
}

fn text_frames(frame: &TextFrame) -> Vec<Vec<&str>> {
    frame
        .text_frames()
        .map(|lines| lines.iter().map(|line| line.as_str()).collect())
        .collect()
}

async fn wait_for(status: &StatusHandle, done: impl Fn(RunStatus) -> bool) {
    while !done(status.snapshot()) {
        Timer::after_millis(1).await;
    }
}

#[test]
fn content_waits_for_control_then_plays_to_completion() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::granting(events.sender()),
        one_line_screens(0),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events
        .try_send(SessionEvent::Show(parts(&["One is here. Two is here."])))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.phase == SessionPhase::Waiting && s.revision > 0).await;
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(
        text_frames(session.canvas()),
        [["One is here."], ["Two is here."]]
    );
    assert_eq!(session.canvas().ops().first(), Some(&CanvasOp::ClearAll));
    assert_eq!(session.canvas().slot_count(), 0);
    assert_eq!(session.control().requests, 1);
    assert_eq!(session.control().releases, 1);
}

#[test]
fn nothing_plays_without_control() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::manual(),
        one_line_screens(0),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events
        .try_send(SessionEvent::Show(parts(&["One is here."])))
        .unwrap();
    events.try_send(SessionEvent::Shutdown).unwrap();
    block_on(session.run(events.receiver()));

    assert!(session.canvas().ops().is_empty());
    assert!(!session.has_control());
    assert_eq!(session.control().requests, 1);
    assert_eq!(status.state(), RunState::Idle);
    assert_eq!(status.phase(), SessionPhase::Waiting);
}

#[test]
fn chapters_play_in_order() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::granting(events.sender()),
        one_line_screens(0),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events
        .try_send(SessionEvent::ShowChapters(vec![
            Chapter::new("I", parts(&["One is here."])),
            Chapter::new("II", parts(&["Two is here. Six is here."])),
        ]))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.phase == SessionPhase::Waiting && s.revision > 0).await;
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(
        text_frames(session.canvas()),
        [["One is here."], ["Two is here."], ["Six is here."]]
    );
    let snapshot = status.snapshot();
    assert_eq!((snapshot.chapter_index, snapshot.chapter_total), (1, 2));
}

#[test]
fn stop_cancels_the_running_content() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::manual(),
        one_line_screens(60_000),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events.try_send(SessionEvent::ControlChanged(true)).unwrap();
    events
        .try_send(SessionEvent::Show(parts(&["One is here. Two is here."])))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.state == RunState::Running).await;
        events.send(SessionEvent::Stop).await;
        wait_for(&status, |s| s.state == RunState::Cancelled).await;
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(text_frames(session.canvas()), [["One is here."]]);
    assert_eq!(session.canvas().slot_count(), 0);
    assert_eq!(cancel.reason(), Some(CancelReason::Stop));
    assert_eq!(session.control().requests, 0);
}

#[test]
fn control_loss_suspends_and_regain_restarts_from_the_top() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let canvas = RevokingCanvas {
        frame: TextFrame::new(),
        events: events.sender(),
        revoked: false,
    };
    let mut session = ReadingSession::new(
        canvas,
        FakeControl::granting(events.sender()),
        one_line_screens(60_000),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events
        .try_send(SessionEvent::Show(parts(&["One is here. Two is here."])))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.state == RunState::Cancelled).await;
        assert_eq!(status.phase(), SessionPhase::AwaitingControl);
        events.send(SessionEvent::ControlChanged(true)).await;
        wait_for(&status, |s| s.state == RunState::Running).await;
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(
        text_frames(&session.canvas().frame),
        [["One is here."], ["One is here."]]
    );
    assert_eq!(session.canvas().frame.slot_count(), 0);
    assert_eq!(session.control().requests, 1);
    assert_eq!(session.control().releases, 1);
}

#[test]
fn new_content_supersedes_the_running_content() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::manual(),
        one_line_screens(60_000),
        instant(),
        &cancel,
        &status,
    )
    .unwrap();

    events.try_send(SessionEvent::ControlChanged(true)).unwrap();
    events
        .try_send(SessionEvent::Show(parts(&["One is here. Two is here."])))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.state == RunState::Running).await;
        events
            .send(SessionEvent::Show(parts(&["Six is here. Ten is here."])))
            .await;
        Timer::after_millis(20).await;
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(
        text_frames(session.canvas()),
        [["One is here."], ["Six is here."]]
    );
    let wipes = session
        .canvas()
        .ops()
        .iter()
        .filter(|op| **op == CanvasOp::ClearAll)
        .count();
    assert_eq!(wipes, 2);
    assert_eq!(cancel.reason(), Some(CancelReason::Shutdown));
}

#[test]
fn replacement_stays_playing_through_the_settle_pause() {
    let events = Events::new();
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let mut session = ReadingSession::new(
        TextFrame::new(),
        FakeControl::manual(),
        one_line_screens(60_000),
        SessionConfig {
            chapter_pause_ms: 0,
            settle_ms: 50,
        },
        &cancel,
        &status,
    )
    .unwrap();

    events.try_send(SessionEvent::ControlChanged(true)).unwrap();
    events
        .try_send(SessionEvent::Show(parts(&["One is here. Two is here."])))
        .unwrap();

    let driver = async {
        wait_for(&status, |s| s.state == RunState::Running).await;
        events
            .send(SessionEvent::Show(parts(&["Six is here."])))
            .await;
        wait_for(&status, |s| s.state == RunState::Cancelled).await;
        // The replaced run is over and the new one is still settling.
        assert_eq!(status.phase(), SessionPhase::Playing);
        events.send(SessionEvent::Shutdown).await;
    };
    block_on(join(session.run(events.receiver()), driver));

    assert_eq!(text_frames(session.canvas()), [["One is here."]]);
    assert_eq!(cancel.reason(), Some(CancelReason::Shutdown));
    assert_eq!(status.phase(), SessionPhase::Waiting);
}

#[test]
fn invalid_configuration_is_rejected() {
    let cancel = CancelToken::new();
    let status = StatusHandle::new();
    let result = ReadingSession::new(
        TextFrame::new(),
        FakeControl::manual(),
        PaginationConfig::new(0, 6, 0),
        instant(),
        &cancel,
        &status,
    );

    assert_eq!(result.err(), Some(ConfigError::ZeroLineBudget));
}
