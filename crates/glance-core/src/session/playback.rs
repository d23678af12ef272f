impl<C, D> ReadingSession<'_, C, D>
where
    C: LineCanvas,
    D: DeviceControl,
{
    /// Plays one playlist from its first chapter. Events keep flowing into the
    /// arbiter throughout, so any of them may cut the playback short.
    async fn play<M: RawMutex, const N: usize>(
        &mut self,
        playlist: Vec<Chapter>,
        events: &Receiver<'_, M, SessionEvent, N>,
    ) {
        let cancel = self.cancel;
        let status = self.status;
        let config = self.config;
        let timing = self.timing;
        let Self {
            canvas,
            control,
            arbiter,
            ..
        } = self;

        cancel.reset();
        arbiter.keep_current = true;
        let total = playlist.len();
        info!("playback starting chapters={}", total);

        if let Err(err) = canvas.clear_all() {
            warn!("canvas wipe failed: {:?}", err);
        }

        let mut stopped = None;
        let settled = with_events(
            cancellable_pause(cancel, timing.settle_ms),
            events,
            arbiter,
            control,
            cancel,
        )
        .await;
        if !settled {
            stopped = cancel.reason();
        }

        if stopped.is_none() {
            for (index, chapter) in playlist.iter().enumerate() {
                status.set_chapter(index, total);
                info!(
                    "chapter {}/{} title={:?} parts={}",
                    index + 1,
                    total,
                    chapter.title,
                    chapter.parts.len()
                );

                let screens = match paginate(chapter.parts.as_slice(), &config) {
                    Ok(screens) => screens,
                    Err(err) => {
                        warn!("chapter {} skipped: {}", index + 1, err);
                        continue;
                    }
                };

                let mut scheduler = DisplayScheduler::new(config, cancel, status);
                let outcome = with_events(
                    scheduler.run(&mut *canvas, &screens),
                    events,
                    arbiter,
                    control,
                    cancel,
                )
                .await;

                match outcome {
                    RunOutcome::Cancelled { reason, .. } => {
                        stopped = Some(reason);
                        break;
                    }
                    RunOutcome::Empty => continue,
                    RunOutcome::Completed { .. } => {}
                }

                let is_last = index + 1 == total;
                if !is_last
                    && !with_events(
                        cancellable_pause(cancel, timing.chapter_pause_ms),
                        events,
                        arbiter,
                        control,
                        cancel,
                    )
                    .await
                {
                    stopped = cancel.reason();
                    break;
                }
            }
        }

        match stopped {
            Some(reason) => {
                status.mark_cancelled();
                if reason == CancelReason::ControlLost
                    && arbiter.keep_current
                    && arbiter.pending.is_none()
                {
                    info!("playback suspended until control returns");
                    arbiter.pending = Some(playlist);
                } else {
                    info!("playback cancelled reason={:?}", reason);
                }
            }
            None => info!("playback finished chapters={}", total),
        }
        arbiter.keep_current = false;
    }
}
