//! The run-loop controller: a [`Model`] that owns one explorer and paces it
//! from the application's periodic ticks.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use maze_core::{Maze, MazeError, MazeGen};
use maze_paths::{Algorithm, ExploreState, Explorer, InvariantViolation, shortest_distance};
use maze_ui::{Effect, Key, ModMask, Model, Msg, Screen};
use rand::rngs::StdRng;

/// Fastest allowed step delay.
pub const MIN_DELAY: Duration = Duration::from_millis(10);
/// Slowest allowed step delay.
pub const MAX_DELAY: Duration = Duration::from_millis(1000);

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub algorithm: Algorithm,
    /// Minimum time between two explorer steps while running.
    pub step_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            step_delay: Duration::from_millis(50),
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Nothing shown; the explorer is freshly reset.
    Idle,
    Running,
    Paused,
    /// The explorer reached a terminal state.
    Finished,
    /// Stopped by the user; the last frame stays visible.
    Cancelled,
    /// The explorer reported corrupted state.
    Failed(InvariantViolation),
}

impl RunState {
    /// Whether an exploration is in progress (running or paused).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
            Self::Paused => f.write_str("paused"),
            Self::Finished => f.write_str("finished"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Random maze source kept around so `r` can draw a new maze.
struct Generator {
    mg: MazeGen<StdRng>,
    width: i32,
    height: i32,
}

impl Generator {
    fn next(&mut self) -> Result<Maze, MazeError> {
        self.mg.perfect(self.width, self.height)
    }
}

/// An interactive exploration session over one maze.
pub struct Session {
    maze: Arc<Maze>,
    explorer: Box<dyn Explorer + Send>,
    state: RunState,
    step_delay: Duration,
    last_step: Option<Instant>,
    reference: Option<usize>,
    generator: Option<Generator>,
}

impl Session {
    /// A session over a fixed maze.
    pub fn new(maze: Maze, config: SessionConfig) -> Self {
        let maze = Arc::new(maze);
        let reference = shortest_distance(&maze, maze.start(), maze.end());
        Self {
            explorer: config.algorithm.explorer(Arc::clone(&maze)),
            maze,
            state: RunState::Idle,
            step_delay: config.step_delay.clamp(MIN_DELAY, MAX_DELAY),
            last_step: None,
            reference,
            generator: None,
        }
    }

    /// A session over randomly generated perfect mazes of the given size;
    /// `r` regenerates.
    pub fn generated(
        width: i32,
        height: i32,
        rng: StdRng,
        config: SessionConfig,
    ) -> Result<Self, MazeError> {
        let mut generator = Generator {
            mg: MazeGen::new(rng),
            width,
            height,
        };
        let maze = generator.next()?;
        let mut session = Self::new(maze, config);
        session.generator = Some(generator);
        Ok(session)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn explorer(&self) -> &dyn Explorer {
        &*self.explorer
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn algorithm(&self) -> Algorithm {
        self.explorer.algorithm()
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Reference shortest-path length in edges, if the end is reachable.
    pub fn reference_distance(&self) -> Option<usize> {
        self.reference
    }

    // -------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key, modifiers: ModMask) -> Option<Effect> {
        match key {
            Key::Char('c') if modifiers.contains(ModMask::CTRL) => Some(Effect::End),
            Key::Char('q') => Some(Effect::End),
            Key::Enter | Key::Space => self.toggle_run(),
            Key::Char('c') | Key::Escape => {
                self.cancel();
                None
            }
            Key::Char('n') => {
                self.single_step();
                None
            }
            Key::Tab | Key::Char('a') => {
                self.switch_algorithm();
                None
            }
            Key::Char('+') | Key::Char('=') => {
                self.set_delay(self.step_delay / 2);
                None
            }
            Key::Char('-') => {
                self.set_delay(self.step_delay * 2);
                None
            }
            Key::Char('r') => {
                self.regenerate();
                None
            }
            _ => None,
        }
    }

    /// Start, pause, resume or restart. Starting posts a tick so the first
    /// step happens without waiting for the next poll.
    fn toggle_run(&mut self) -> Option<Effect> {
        match self.state {
            RunState::Running => {
                self.state = RunState::Paused;
                None
            }
            RunState::Paused => {
                self.state = RunState::Running;
                None
            }
            RunState::Idle => self.start(),
            RunState::Finished | RunState::Cancelled | RunState::Failed(_) => {
                self.explorer.reset();
                self.start()
            }
        }
    }

    fn start(&mut self) -> Option<Effect> {
        log::info!(
            "session: starting {} on a {}x{} maze",
            self.algorithm().label(),
            self.maze.size().x,
            self.maze.size().y
        );
        self.state = RunState::Running;
        self.last_step = None;
        Some(Effect::Post(Msg::tick()))
    }

    /// First press stops an active run; second press clears the board.
    fn cancel(&mut self) {
        match self.state {
            RunState::Running | RunState::Paused => {
                log::info!("session: cancelled after {} expansions", self.explorer.visited_count());
                self.state = RunState::Cancelled;
            }
            RunState::Finished | RunState::Cancelled | RunState::Failed(_) => self.clear(),
            RunState::Idle => {}
        }
    }

    fn clear(&mut self) {
        self.explorer.reset();
        self.state = RunState::Idle;
        self.last_step = None;
    }

    fn single_step(&mut self) {
        if matches!(self.state, RunState::Idle | RunState::Paused) {
            self.state = RunState::Paused;
            self.step_explorer();
        }
    }

    fn switch_algorithm(&mut self) {
        if self.state.is_active() {
            return;
        }
        let next = self.algorithm().toggle();
        self.explorer = next.explorer(Arc::clone(&self.maze));
        self.state = RunState::Idle;
        self.last_step = None;
        log::debug!("session: switched to {}", next.label());
    }

    fn set_delay(&mut self, delay: Duration) {
        self.step_delay = delay.clamp(MIN_DELAY, MAX_DELAY);
    }

    fn regenerate(&mut self) {
        let Some(generator) = self.generator.as_mut() else {
            return;
        };
        match generator.next() {
            Ok(maze) => {
                let algorithm = self.algorithm();
                self.maze = Arc::new(maze);
                self.reference = shortest_distance(&self.maze, self.maze.start(), self.maze.end());
                self.explorer = algorithm.explorer(Arc::clone(&self.maze));
                self.state = RunState::Idle;
                self.last_step = None;
            }
            Err(e) => log::warn!("session: could not regenerate maze: {e}"),
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if self.state != RunState::Running {
            return;
        }
        let due = self
            .last_step
            .is_none_or(|t| now.saturating_duration_since(t) >= self.step_delay);
        if due {
            self.last_step = Some(now);
            self.step_explorer();
        }
    }

    /// Step the explorer once and fold the outcome into the run state.
    fn step_explorer(&mut self) {
        match self.explorer.step() {
            Ok(true) => {}
            Ok(false) => {
                let found = self.explorer.state() == ExploreState::Found;
                log::info!(
                    "session: {} finished, {} after {} expansions",
                    self.algorithm().label(),
                    if found { "path found" } else { "no path" },
                    self.explorer.visited_count()
                );
                self.state = RunState::Finished;
            }
            Err(e) => {
                log::error!("session: {} explorer failed: {e}", self.algorithm().label());
                self.state = RunState::Failed(e);
            }
        }
    }
}

impl Model for Session {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::debug!("session: ready with {}", self.algorithm().label());
                None
            }
            Msg::KeyDown { key, modifiers, .. } => self.handle_key(key, modifiers),
            Msg::Tick(now) => {
                self.on_tick(now);
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        crate::view::draw(self, screen);
    }
}
