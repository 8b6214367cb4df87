use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Produces frame, render, and terminal events.
///
/// Frames fire at a fixed interval; a render follows every frame or terminal event.
/// Terminal events arriving between two frames are delivered in order before the
/// next frame.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Duration,
    last_frame: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / 60.0))
    }
}

impl EventLoop {
    pub(super) fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            last_frame: Instant::now(),
            dirty: true, // initial render
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// Restarts frame timing so that the next frame does not account for time
    /// spent before this call.
    pub(super) fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Returns the next event, blocking until one is available.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let since_last = now.duration_since(self.last_frame);
            if since_last >= self.frame_interval {
                self.last_frame = now;
                self.dirty = true;
                return Ok(TuiEvent::Frame(since_last));
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = (self.last_frame + self.frame_interval).saturating_duration_since(now);
            if !event::poll(timeout)? {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
