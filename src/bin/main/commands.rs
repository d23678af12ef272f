use std::{
    io::{self, BufRead},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use glance_core::{Chapter, SessionEvent};
use log::{info, warn};

use super::EventSender;

/// Set once stdin reaches end of file.
pub(super) static INPUT_CLOSED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Command {
    Stop,
    Replay,
    Revoke,
    Grant,
    Quit,
    Help,
}

fn parse(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "stop" => Some(Command::Stop),
        "r" | "replay" => Some(Command::Replay),
        "revoke" => Some(Command::Revoke),
        "grant" => Some(Command::Grant),
        "q" | "quit" | "exit" => Some(Command::Quit),
        "h" | "help" | "?" => Some(Command::Help),
        _ => None,
    }
}

const HELP: &str = "commands: stop, replay, revoke, grant, quit";

/// Reads commands from stdin on a plain thread and forwards them as session events.
pub(super) fn spawn_reader(events: EventSender, library: Vec<Chapter>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || read_commands(events, library))
        .map(|_| ())
}

fn read_commands(events: EventSender, library: Vec<Chapter>) {
    info!("{}", HELP);
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("stdin read failed: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = match parse(&line) {
            Some(Command::Stop) => SessionEvent::Stop,
            Some(Command::Replay) => SessionEvent::ShowChapters(library.clone()),
            Some(Command::Revoke) => SessionEvent::ControlChanged(false),
            Some(Command::Grant) => SessionEvent::ControlChanged(true),
            Some(Command::Quit) => SessionEvent::Shutdown,
            Some(Command::Help) => {
                info!("{}", HELP);
                continue;
            }
            None => {
                warn!("unknown command {:?}; {}", line.trim(), HELP);
                continue;
            }
        };

        let quit = event == SessionEvent::Shutdown;
        embassy_futures::block_on(events.send(event));
        if quit {
            return;
        }
    }

    info!("stdin closed; exiting once playback ends");
    INPUT_CLOSED.store(true, Ordering::Release);
}
