//! # SWINGSET Simulation Loop
//!
//! One tick, single-threaded, nothing interleaved:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. QUIT CHECK                                                       │
//! │    └─ Window close or a Quit action ends the loop here              │
//! │                                                                     │
//! │ 2. WIDGET PASS                                                      │
//! │    └─ Hit test + debounce, slider drags, button/dropdown commands   │
//! │                                                                     │
//! │ 3. ACTIONS                                                          │
//! │    └─ Drain the action bus: nudge, gravity, pause, reset            │
//! │                                                                     │
//! │ 4. CHAIN PASS                                                       │
//! │    ├─ Angle sliders that moved this tick                            │
//! │    ├─ Arrow keys move the anchor                                    │
//! │    ├─ Angular nudge (while running)                                 │
//! │    └─ Tension leaf→root, positions root→leaf                        │
//! │                                                                     │
//! │ 5. RENDER                                                           │
//! │    └─ Background, chain, widgets                                    │
//! │                                                                     │
//! │ 6. PACE                                                             │
//! │    └─ Sleep to the next frame boundary                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use swingset_ui::{
    Color, ControlsReport, InputSource, InputState, Key, Rect, RenderCommand, RenderSink,
    UIRenderer,
};
use tracing::{debug, info, warn};

use crate::chain::EvalReport;
use crate::config::SimulationConfig;
use crate::events::SimAction;
use crate::scene::Scene;

/// Waits out the rest of a frame.
pub trait Pacer {
    /// Blocks until the next frame boundary for `target_fps`.
    ///
    /// Returns the time since the previous call.
    fn tick(&mut self, target_fps: u32) -> Duration;
}

/// Sleeps on the calling thread to hold a fixed frame rate.
#[derive(Debug)]
pub struct FramePacer {
    last: Instant,
}

impl FramePacer {
    /// Starts pacing from now.
    #[must_use]
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for FramePacer {
    fn tick(&mut self, target_fps: u32) -> Duration {
        let frame = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let deadline = self.last + frame;
        let now = Instant::now();
        if now < deadline {
            std::thread::sleep(deadline - now);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Timing and counters for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Total tick time in microseconds.
    pub total_us: u64,
    /// Widget pass time in microseconds.
    pub widget_us: u64,
    /// Chain pass time in microseconds.
    pub chain_us: u64,
    /// Render collection time in microseconds.
    pub render_us: u64,
    /// Tick number.
    pub frame: u64,
    /// Actions applied this tick.
    pub actions_applied: u32,
    /// Recoverable faults raised this tick.
    pub faults: u32,
    /// Render commands produced.
    pub commands: u32,
}

/// Everything one tick produced besides the draw list, which stays in
/// [`Simulation::frame`].
#[derive(Clone, Debug)]
pub struct TickReport {
    /// Widget pass summary.
    pub controls: ControlsReport,
    /// Chain pass summary.
    pub chain: EvalReport,
    /// Timing and counters.
    pub stats: FrameStats,
}

/// Result of [`Simulation::tick`].
#[derive(Clone, Debug)]
pub enum TickOutcome {
    /// The tick ran.
    Continue(TickReport),
    /// Quit was requested; nothing ran.
    Quit,
}

/// Owns a scene and advances it one tick at a time.
pub struct Simulation {
    config: SimulationConfig,
    scene: Scene,
    gravity: f64,
    running: bool,
    stop_requested: bool,
    frame_count: u64,
    previous_keys: Vec<Key>,
    renderer: UIRenderer,
    stats: FrameStatsAccumulator,
}

impl Simulation {
    /// Creates a simulation around a built scene.
    #[must_use]
    pub fn new(config: SimulationConfig, mut scene: Scene) -> Self {
        let running = config.integrate;
        scene.set_running(running);
        let budget = config.frame_time();

        Self {
            gravity: config.gravity,
            running,
            stop_requested: false,
            frame_count: 0,
            previous_keys: Vec::new(),
            renderer: UIRenderer::new(),
            stats: FrameStatsAccumulator::new(budget),
            config,
            scene,
        }
    }

    /// Current gravitational acceleration.
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// True while angular integration runs.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks completed so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The configuration this simulation was built from.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Statistics recorded so far.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// Draw list of the last tick. The buffer is reused by the next tick.
    #[must_use]
    pub fn frame(&self) -> &[RenderCommand] {
        self.renderer.commands()
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self, input: &InputState) -> TickOutcome {
        if input.quit_requested || self.stop_requested {
            return TickOutcome::Quit;
        }
        let start = Instant::now();

        let controls = self.scene.controls_mut().update(input);
        let widget_done = Instant::now();

        let mut actions = self.scene.actions().drain();
        actions.extend(self.key_actions(input));
        for &action in &actions {
            self.apply(action);
        }

        self.scene.apply_angle_sliders(&controls.changed_sliders);
        let (dx, dy) = self.anchor_offset(input);
        if dx != 0.0 || dy != 0.0 {
            self.scene.chain_mut().move_anchor(dx, dy);
        }
        if self.running {
            self.scene.chain_mut().integrate(self.config.step_fraction);
        }
        let chain = self.scene.evaluate(self.gravity);
        let chain_done = Instant::now();

        self.renderer.begin_frame();
        let [width, height] = self.config.window;
        self.renderer.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, width, height),
            color: Color::CREAM,
            corner_radius: 0.0,
        });
        self.scene.render(self.renderer.commands_mut());
        let commands = self.renderer.end_frame().len();
        let end = Instant::now();

        let stats = FrameStats {
            total_us: micros(end - start),
            widget_us: micros(widget_done - start),
            chain_us: micros(chain_done - widget_done),
            render_us: micros(end - chain_done),
            frame: self.frame_count,
            actions_applied: count(actions.len()),
            faults: count(controls.faults.len() + chain.faults.len()),
            commands: count(commands),
        };
        self.stats.record(stats);
        self.frame_count += 1;
        self.previous_keys = input.held_keys().to_vec();

        TickOutcome::Continue(TickReport {
            controls,
            chain,
            stats,
        })
    }

    /// Polls, ticks, presents and paces until quit.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        sink: &mut impl RenderSink,
        pacer: &mut impl Pacer,
    ) -> FrameStatsAccumulator {
        info!(
            bodies = self.scene.chain().len(),
            widgets = self.scene.controls().len(),
            target_fps = self.config.target_fps,
            "simulation started"
        );

        loop {
            let snapshot = input.poll();
            match self.tick(&snapshot) {
                TickOutcome::Quit => break,
                TickOutcome::Continue(_) => sink.present(self.frame()),
            }
            pacer.tick(self.config.target_fps);
        }

        self.stats.log_summary();
        self.stats.clone()
    }

    fn apply(&mut self, action: SimAction) {
        debug!(?action, frame = self.frame_count, "applying action");
        match action {
            SimAction::NudgeAngle(delta) => self.scene.nudge_free_end(delta),
            SimAction::SetGravity(gravity) => {
                info!(from = self.gravity, to = gravity, "gravity changed");
                self.gravity = gravity;
            }
            SimAction::ToggleIntegration => {
                self.running = !self.running;
                self.scene.set_running(self.running);
            }
            SimAction::ResetAngles => self.scene.reset_angles(),
            SimAction::Quit => self.stop_requested = true,
        }
    }

    /// Keyboard shortcuts. Plus/minus repeat while held; the rest fire on
    /// the press edge only.
    fn key_actions(&self, input: &InputState) -> Vec<SimAction> {
        let fresh = |key: Key| input.key_held(key) && !self.previous_keys.contains(&key);
        let step = self.config.angle_step;

        let mut actions = Vec::new();
        if input.key_held(Key::Plus) {
            actions.push(SimAction::NudgeAngle(step));
        }
        if input.key_held(Key::Minus) {
            actions.push(SimAction::NudgeAngle(-step));
        }
        if fresh(Key::Space) {
            actions.push(SimAction::ToggleIntegration);
        }
        if fresh(Key::R) {
            actions.push(SimAction::ResetAngles);
        }
        if fresh(Key::Escape) || fresh(Key::Q) {
            actions.push(SimAction::Quit);
        }
        actions
    }

    fn anchor_offset(&self, input: &InputState) -> (f64, f64) {
        let speed = self.config.anchor_speed;
        let axis = |neg: Key, pos: Key| {
            let mut v = 0.0;
            if input.key_held(neg) {
                v -= speed;
            }
            if input.key_held(pos) {
                v += speed;
            }
            v
        };
        (axis(Key::Left, Key::Right), axis(Key::Up, Key::Down))
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Frame budget that `frames_over_budget` is measured against.
    pub budget: Duration,
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total tick times.
    pub total_us_sum: u64,
    /// Sum of widget pass times.
    pub widget_us_sum: u64,
    /// Sum of chain pass times.
    pub chain_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Min tick time.
    pub min_frame_us: u64,
    /// Max tick time.
    pub max_frame_us: u64,
    /// Ticks that exceeded the budget.
    pub frames_over_budget: u64,
    /// Recoverable faults across all ticks.
    pub faults: u64,
    /// Actions applied across all ticks.
    pub actions_applied: u64,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frames_recorded: 0,
            total_us_sum: 0,
            widget_us_sum: 0,
            chain_us_sum: 0,
            render_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            faults: 0,
            actions_applied: 0,
        }
    }

    /// Records a tick's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.widget_us_sum += stats.widget_us;
        self.chain_us_sum += stats.chain_us;
        self.render_us_sum += stats.render_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.faults += u64::from(stats.faults);
        self.actions_applied += u64::from(stats.actions_applied);

        if u128::from(stats.total_us) > self.budget.as_micros() {
            self.frames_over_budget += 1;
            warn!(
                frame = stats.frame,
                total_ms = stats.total_us as f64 / 1000.0,
                budget_ms = self.budget.as_secs_f64() * 1000.0,
                "tick exceeded frame budget"
            );
        }
    }

    /// Returns average tick time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns the fraction of ticks over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary of the statistics.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            info!("simulation stopped before the first tick");
            return;
        }
        let frames = self.frames_recorded as f64;
        info!(
            frames = self.frames_recorded,
            avg_ms = self.avg_frame_ms(),
            min_ms = self.min_frame_us as f64 / 1000.0,
            max_ms = self.max_frame_us as f64 / 1000.0,
            over_budget = self.frames_over_budget,
            over_budget_pct = self.over_budget_ratio() * 100.0,
            faults = self.faults,
            actions = self.actions_applied,
            "simulation stopped"
        );
        debug!(
            widget_ms = self.widget_us_sum as f64 / frames / 1000.0,
            chain_ms = self.chain_us_sum as f64 / frames / 1000.0,
            render_ms = self.render_us_sum as f64 / frames / 1000.0,
            "average tick breakdown"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default().frame_time())
    }
}
