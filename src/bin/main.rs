//! Host runner: paginates text files and plays them on a terminal canvas.
//!
//! Usage: `glance [FILE...]`. Each file is one chapter; paragraphs are separated by
//! blank lines. Without files a built-in sample plays. Commands on stdin steer the
//! session (`stop`, `replay`, `revoke`, `grant`, `quit`).

use std::{process, sync::atomic::Ordering};

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Sender},
};
use embassy_time::Timer;
use glance_core::{
    CancelToken, ReadingSession, SessionConfig, SessionEvent, SessionPhase, StatusHandle,
};
use log::{error, info};
use static_cell::StaticCell;

use commands::INPUT_CLOSED;
use terminal::{HostControl, TerminalCanvas};

#[path = "main/commands.rs"]
mod commands;
#[path = "main/library.rs"]
mod library;
#[path = "main/settings.rs"]
mod settings;
#[path = "main/terminal.rs"]
mod terminal;

const EVENT_QUEUE_DEPTH: usize = 8;
const STATUS_POLL_INTERVAL_MS: u64 = 250;

type EventChannel = Channel<CriticalSectionRawMutex, SessionEvent, EVENT_QUEUE_DEPTH>;
type EventSender = Sender<'static, CriticalSectionRawMutex, SessionEvent, EVENT_QUEUE_DEPTH>;

static EVENTS: StaticCell<EventChannel> = StaticCell::new();
static CANCEL: CancelToken = CancelToken::new();
static STATUS: StatusHandle = StatusHandle::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (preset, pagination) = match settings::from_env() {
        Ok(resolved) => resolved,
        Err(err) => {
            error!("invalid settings: {}", err);
            process::exit(2);
        }
    };
    let paths: Vec<String> = std::env::args().skip(1).collect();
    let library = match library::load(&paths) {
        Ok(chapters) => chapters,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };
    info!(
        "glance preset={} chars_per_line={} lines_per_screen={} dwell_ms={} chapters={}",
        preset.label(),
        pagination.max_chars_per_line,
        pagination.max_lines_per_screen,
        pagination.screen_dwell_ms,
        library.len()
    );

    let events: &'static EventChannel = EVENTS.init(Channel::new());
    let mut session = match ReadingSession::new(
        TerminalCanvas::new(pagination.max_chars_per_line),
        HostControl::new(events.sender()),
        pagination,
        SessionConfig::default(),
        &CANCEL,
        &STATUS,
    ) {
        Ok(session) => session,
        Err(err) => {
            error!("invalid pagination config: {}", err);
            process::exit(2);
        }
    };

    if let Err(err) = commands::spawn_reader(events.sender(), library.clone()) {
        error!("stdin reader failed to start: {}", err);
        process::exit(1);
    }
    events.send(SessionEvent::ShowChapters(library)).await;

    match select(session.run(events.receiver()), watch_status(&STATUS)).await {
        Either::First(()) => info!("session shut down"),
        Either::Second(()) => info!("playback over and stdin closed"),
    }
    process::exit(0);
}

/// Logs progress changes. Returns once the session has no playlist in progress and
/// stdin is gone.
async fn watch_status(status: &StatusHandle) {
    let mut seen = 0;
    loop {
        Timer::after_millis(STATUS_POLL_INTERVAL_MS).await;

        let snapshot = status.snapshot();
        if snapshot.revision != seen {
            seen = snapshot.revision;
            info!(
                "status {:?} {:?} chapter {}/{} screen {}/{}",
                snapshot.phase,
                snapshot.state,
                snapshot.chapter_index.saturating_add(1),
                snapshot.chapter_total,
                snapshot.screens_shown,
                snapshot.screen_total
            );
        }

        // Without stdin nobody can grant control again, so queued content is over too.
        let finished = snapshot.phase != SessionPhase::Playing;
        if finished && snapshot.revision > 0 && INPUT_CLOSED.load(Ordering::Acquire) {
            return;
        }
    }
}
