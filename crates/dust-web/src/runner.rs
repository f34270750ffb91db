use dust_engine::{
    DustConfig, FrameRequester, FrameStats, InputEvent, InputQueue, LoopState, Scheduler,
    Simulation, Surface,
};

/// Wires the simulation to a surface and a frame source.
///
/// Generic over both so the browser bridge can plug in a canvas and
/// `requestAnimationFrame`, while tests use a raster surface and a fake clock.
pub struct DustRunner<S: Surface, F: FrameRequester> {
    sim: Simulation,
    surface: S,
    frames: F,
    input: InputQueue,
    scheduler: Scheduler,
    initialized: bool,
}

impl<S: Surface, F: FrameRequester> DustRunner<S, F> {
    pub fn new(config: DustConfig, seed: u64, surface: S, frames: F) -> Self {
        Self {
            sim: Simulation::new(config, seed),
            surface,
            frames,
            input: InputQueue::new(),
            scheduler: Scheduler::new(),
            initialized: false,
        }
    }

    /// Build the initial mask, dots and particles, then start the loop.
    pub fn init(&mut self) -> LoopState {
        self.sim.resize(&mut self.surface);
        self.initialized = true;
        self.scheduler.start(&mut self.frames)
    }

    /// Queue an input event for the next frame.
    ///
    /// While the loop is stopped pointer and touch events are dropped and only
    /// the latest resize is kept, so the queue holds at most one event.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.scheduler.is_running() {
            self.input.push(event);
        } else if let InputEvent::Resize { .. } = event {
            self.input.clear();
            self.input.push(event);
        }
    }

    /// Handle one delivered animation frame.
    ///
    /// Pending input is applied first so the tick sees one consistent pointer
    /// snapshot. Only the last queued resize is applied.
    pub fn frame(&mut self) -> Option<FrameStats> {
        if !self.initialized {
            return None;
        }
        let Self { sim, surface, frames, input, scheduler, .. } = self;
        scheduler.on_frame(frames, || {
            let mut resize = None;
            for event in input.drain() {
                match event {
                    InputEvent::Resize { width, height } => resize = Some((width, height)),
                    other => sim.handle_input(&other),
                }
            }
            if let Some((width, height)) = resize {
                surface.set_size(width, height);
                sim.resize(surface);
            }
            sim.tick(surface)
        })
    }

    /// Stop scheduling frames and drop pending input.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.input.clear();
    }

    pub fn state(&self) -> LoopState {
        self.scheduler.state()
    }

    /// Ticks run so far.
    pub fn frames(&self) -> u64 {
        self.scheduler.frames()
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn particle_count(&self) -> u32 {
        self.sim.particle_count() as u32
    }
}
