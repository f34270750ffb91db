//! Frame scheduling state machine.
//!
//! The host supplies a [`FrameRequester`] ("call me before the next display
//! refresh") and calls [`Scheduler::on_frame`] from that callback. The
//! scheduler decides whether the tick runs and whether another frame is
//! requested, and guarantees at most one request is in flight.

use crate::api::error::DustError;

/// Host hook that asks for one callback before the next display refresh.
pub trait FrameRequester {
    /// Returns false if the request could not be made.
    fn request_frame(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A frame is scheduled after every tick.
    Running,
    /// No further frames are scheduled.
    Stopped,
}

/// Owns the running/stopped state of the render loop.
#[derive(Debug)]
pub struct Scheduler {
    state: LoopState,
    in_flight: bool,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            in_flight: false,
            frames: 0,
        }
    }

    /// Enter `Running` and request the first frame. Returns the resulting state.
    pub fn start(&mut self, requester: &mut dyn FrameRequester) -> LoopState {
        self.state = LoopState::Running;
        self.schedule(requester);
        self.state
    }

    /// Enter `Stopped`. A frame already in flight will be ignored when it arrives.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("render loop stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    /// Handle a delivered frame: run `tick` if running, then request the next frame.
    /// A tick error stops the loop.
    pub fn on_frame<T>(
        &mut self,
        requester: &mut dyn FrameRequester,
        tick: impl FnOnce() -> Result<T, DustError>,
    ) -> Option<T> {
        self.in_flight = false;
        if self.state == LoopState::Stopped {
            return None;
        }

        self.frames += 1;
        match tick() {
            Ok(out) => {
                self.schedule(requester);
                Some(out)
            }
            Err(e) => {
                log::warn!("{}; stopping render loop", e);
                self.state = LoopState::Stopped;
                None
            }
        }
    }

    fn schedule(&mut self, requester: &mut dyn FrameRequester) {
        if self.in_flight {
            return;
        }
        if requester.request_frame() {
            self.in_flight = true;
        } else {
            log::warn!("frame request failed; stopping render loop");
            self.state = LoopState::Stopped;
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Whether a requested frame has not been delivered yet.
    pub fn frame_pending(&self) -> bool {
        self.in_flight
    }

    /// Ticks run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
