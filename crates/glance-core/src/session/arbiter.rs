impl Arbiter {
    /// Folds one event into the session state. `running` tells whether a playback is
    /// in flight and must be cancelled by the event.
    fn apply<D: DeviceControl>(
        &mut self,
        event: SessionEvent,
        control: &mut D,
        cancel: &CancelToken,
        running: bool,
    ) {
        match event {
            SessionEvent::Show(parts) => {
                self.submit(vec![Chapter::untitled(parts)], control, cancel, running);
            }
            SessionEvent::ShowChapters(chapters) => {
                self.submit(chapters, control, cancel, running);
            }
            SessionEvent::ControlChanged(true) => {
                if !self.has_control {
                    info!("device control granted");
                }
                self.has_control = true;
            }
            SessionEvent::ControlChanged(false) => {
                if self.has_control {
                    info!("device control lost");
                }
                self.has_control = false;
                if running {
                    cancel.cancel(CancelReason::ControlLost);
                }
            }
            SessionEvent::Stop => {
                info!("stop requested running={}", running);
                self.pending = None;
                self.keep_current = false;
                if running {
                    cancel.cancel(CancelReason::Stop);
                }
            }
            SessionEvent::Shutdown => {
                info!("shutdown requested running={}", running);
                self.pending = None;
                self.keep_current = false;
                self.shutdown = true;
                if running {
                    cancel.cancel(CancelReason::Shutdown);
                }
            }
        }
    }

    fn idle_phase(&self) -> SessionPhase {
        if self.pending.is_some() {
            SessionPhase::AwaitingControl
        } else {
            SessionPhase::Waiting
        }
    }

    fn submit<D: DeviceControl>(
        &mut self,
        chapters: Vec<Chapter>,
        control: &mut D,
        cancel: &CancelToken,
        running: bool,
    ) {
        info!(
            "content submitted chapters={} running={} has_control={}",
            chapters.len(),
            running,
            self.has_control
        );
        self.pending = Some(chapters);
        self.keep_current = false;
        if running {
            cancel.cancel(CancelReason::Superseded);
        }
        if !self.has_control {
            control.request_control();
        }
    }
}

/// Feeds channel events into `arbiter` forever.
async fn pump_events<M: RawMutex, D: DeviceControl, const N: usize>(
    events: &Receiver<'_, M, SessionEvent, N>,
    arbiter: &mut Arbiter,
    control: &mut D,
    cancel: &CancelToken,
) -> Infallible {
    loop {
        let event = events.receive().await;
        arbiter.apply(event, control, cancel, true);
    }
}

/// Drives `work` to completion while still reacting to session events.
async fn with_events<F, M, D, const N: usize>(
    work: F,
    events: &Receiver<'_, M, SessionEvent, N>,
    arbiter: &mut Arbiter,
    control: &mut D,
    cancel: &CancelToken,
) -> F::Output
where
    F: Future,
    M: RawMutex,
    D: DeviceControl,
{
    match select(work, pump_events(events, arbiter, control, cancel)).await {
        Either::First(output) => output,
        Either::Second(never) => match never {},
    }
}
