//! Top-level application state and main loop.
//!
//! `AppState` owns the gesture tracker and whichever consumers the current
//! [`Mode`] needs.  Each loop iteration takes at most one hand frame, runs the
//! tracker to completion, feeds the consumers, advances the game clock and
//! renders.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use hand_canvas::{seed_objects, ManipulableObject, ManipulationController, ObjectSnapshot};
use hand_gesture::{FrameMailbox, GestureTracker, HandFrame, Landmark, PinchConfig, Surface};
use hand_pong::{FixedTicker, GameConfig, PaddleGame};
use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::framebuffer::Framebuffer;
use crate::scene::{draw_scene, Hud, Scene};
use crate::source::{spawn_hand_source, ReplayHandSource, SimHandSource};
use crate::visualizer::{UiCommand, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// Which consumers are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Canvas,
    Paddle,
    Both,
}

impl Mode {
    pub fn has_canvas(self) -> bool { matches!(self, Mode::Canvas | Mode::Both) }
    pub fn has_game(self)   -> bool { matches!(self, Mode::Paddle | Mode::Both) }

    pub fn next(self) -> Mode {
        match self {
            Mode::Canvas => Mode::Paddle,
            Mode::Paddle => Mode::Both,
            Mode::Both   => Mode::Canvas,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Canvas => "CANVAS",
            Mode::Paddle => "PADDLE",
            Mode::Both   => "BOTH",
        }
    }
}

impl FromStr for Mode {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canvas" => Ok(Mode::Canvas),
            "paddle" => Ok(Mode::Paddle),
            "both"   => Ok(Mode::Both),
            other    => Err(StudioError::Usage(format!(
                "unknown mode {other:?} (expected canvas, paddle or both)"
            ))),
        }
    }
}

/// Where hand frames come from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Mouse-driven synthetic hand.
    #[default]
    Simulator,
    /// JSON-lines recording.
    Replay { path: PathBuf },
}

/// Configuration for the full application.  Every field has a default, so a
/// config file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub surface:   Surface,
    pub mode:      Mode,
    pub pinch:     PinchConfig,
    pub objects:   Vec<ManipulableObject>,
    pub game:      GameConfig,
    pub source:    SourceConfig,
    /// Start the game as soon as it exists.
    pub autostart: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            surface:   Surface::default(),
            mode:      Mode::default(),
            pinch:     PinchConfig::default(),
            objects:   seed_objects(),
            game:      GameConfig::default(),
            source:    SourceConfig::default(),
            autostart: false,
        }
    }
}

impl StudioConfig {
    pub fn load(path: &Path) -> Result<Self, StudioError> {
        let text = fs::read_to_string(path).map_err(|source| StudioError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StudioError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), StudioError> {
        self.surface.validate()?;
        self.pinch.validate()?;
        self.game.validate()?;
        let mut seen = HashSet::new();
        for obj in &self.objects {
            obj.validate(self.surface)?;
            if !seen.insert(obj.id) {
                return Err(StudioError::DuplicateObject(obj.id));
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command line
// ════════════════════════════════════════════════════════════════════════════

pub const USAGE: &str = "\
usage: hand_studio [--config <file.json>] [--mode canvas|paddle|both]
                   [--replay <recording.jsonl>] [--quick]";

/// Build the configuration from command-line arguments (program name
/// excluded).  `--config` is loaded first; the other flags override it.
pub fn config_from_args<I, S>(args: I) -> Result<StudioConfig, StudioError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config_path = None;
    let mut mode = None;
    let mut replay = None;
    let mut quick = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .map(|v| v.as_ref().to_string())
                .ok_or_else(|| StudioError::Usage(format!("{flag} needs a value\n{USAGE}")))
        };
        match arg.as_ref() {
            "--config" => config_path = Some(PathBuf::from(value("--config")?)),
            "--mode"   => mode = Some(value("--mode")?.parse::<Mode>()?),
            "--replay" => replay = Some(PathBuf::from(value("--replay")?)),
            "--quick"  => quick = true,
            other      => return Err(StudioError::Usage(format!("unknown argument {other:?}\n{USAGE}"))),
        }
    }

    let mut cfg = match config_path {
        Some(path) => StudioConfig::load(&path)?,
        None       => StudioConfig::default(),
    };
    if let Some(mode) = mode {
        cfg.mode = mode;
    }
    if let Some(path) = replay {
        cfg.source = SourceConfig::Replay { path };
    }
    if quick {
        cfg.autostart = true;
    }
    Ok(cfg)
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    mode:        Mode,
    tracker:     GestureTracker,

    // ── consumers ────────────────────────────────────────────────────────
    canvas:      Option<ManipulationController>,
    game:        Option<PaddleGame>,
    seed:        Vec<ManipulableObject>,
    game_config: GameConfig,
    autostart:   bool,

    ticker:      FixedTicker,
    /// Raw hands from the last frame, for the skeleton overlay.
    hands:       Vec<Vec<Landmark>>,
    frames:      u64,

    pub status:  String,
}

impl AppState {
    pub fn new(cfg: &StudioConfig) -> Result<Self, StudioError> {
        cfg.validate()?;
        let mut app = AppState {
            mode:        cfg.mode,
            tracker:     GestureTracker::new(cfg.surface, cfg.pinch),
            canvas:      None,
            game:        None,
            seed:        cfg.objects.clone(),
            game_config: cfg.game,
            autostart:   cfg.autostart,
            ticker:      FixedTicker::new(cfg.game.tick()),
            hands:       Vec::new(),
            frames:      0,
            status:      String::new(),
        };
        app.set_mode(cfg.mode)?;
        app.status = "READY".to_string();
        Ok(app)
    }

    // ── mode ──────────────────────────────────────────────────────────────

    /// Create the consumers `mode` needs and drop the others.  Consumers
    /// that stay active keep their state.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), StudioError> {
        self.canvas = if mode.has_canvas() {
            Some(self.canvas.take().unwrap_or_else(|| ManipulationController::new(self.seed.clone())))
        } else {
            None
        };
        self.game = if mode.has_game() {
            match self.game.take() {
                Some(game) => Some(game),
                None => {
                    let mut game = PaddleGame::new(self.game_config)?;
                    if self.autostart {
                        game.start();
                    }
                    Some(game)
                }
            }
        } else {
            None
        };
        if mode != self.mode {
            tracing::info!("[app] mode {} → {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
        self.status = format!("MODE {}", mode.label());
        Ok(())
    }

    pub fn cycle_mode(&mut self) -> Result<(), StudioError> {
        self.set_mode(self.mode.next())
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Run one landmark batch through the tracker, then the consumers.
    pub fn ingest_frame(&mut self, frame: HandFrame) {
        self.frames += 1;
        tracing::trace!(seq = frame.seq, hands = frame.hands.len(), "frame");
        self.tracker.update(&frame.hands);
        self.hands = frame.hands;

        let points = self.tracker.latest_points();
        let pinching = self.tracker.is_pinching();
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.update(points, pinching);
        }
        if let Some(game) = self.game.as_mut() {
            game.observe(points, self.tracker.surface());
        }
    }

    /// Advance the game clock; returns the number of ticks due.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        let due = self.ticker.advance(elapsed);
        if let Some(game) = self.game.as_mut() {
            game.advance(due);
        }
        due
    }

    pub fn start(&mut self) {
        match self.game.as_mut() {
            Some(game) => {
                game.start();
                self.status = "PLAYING".to_string();
            }
            None => self.status = "NO GAME IN THIS MODE".to_string(),
        }
    }

    /// Reset the game and put the shapes back where they started.
    pub fn reset(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.reset();
        }
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.restore_seed();
        }
        self.ticker.reset();
        self.status = "RESET".to_string();
    }

    /// Stop the hand source and leave every consumer idle.
    pub fn shutdown(&mut self, mailbox: &FrameMailbox) {
        mailbox.close();
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.reset();
        }
        if let Some(game) = self.game.as_mut() {
            game.stop();
        }
        tracing::info!(frames = self.frames, "[app] shut down");
    }

    // ── output ────────────────────────────────────────────────────────────

    pub fn render(&self, fb: &mut Framebuffer) {
        let snapshots: Option<Vec<ObjectSnapshot>> = self.canvas.as_ref().map(|c| c.snapshots());
        let scene = Scene {
            surface: self.tracker.surface(),
            objects: snapshots.as_deref(),
            game:    self.game.as_ref().map(|g| g.snapshot()),
            hands:   &self.hands,
            hud: Hud {
                mode:    self.mode.label(),
                gesture: self.tracker.state(),
                debug:   self.tracker.debug_info(),
                holding: self.canvas.as_ref().and_then(|c| c.drag_state().object_id()),
                status:  &self.status,
            },
        };
        draw_scene(fb, &scene);
    }

    pub fn mode(&self)    -> Mode                             { self.mode }
    pub fn tracker(&self) -> &GestureTracker                  { &self.tracker }
    pub fn canvas(&self)  -> Option<&ManipulationController>  { self.canvas.as_ref() }
    pub fn game(&self)    -> Option<&PaddleGame>              { self.game.as_ref() }
    pub fn frames(&self)  -> u64                              { self.frames }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window, start the hand source and drive everything at ~60 fps
/// until the window closes or `Q` is pressed.
pub fn run(cfg: StudioConfig) -> Result<(), StudioError> {
    let mut app = AppState::new(&cfg)?;
    let width = cfg.surface.width.round() as usize;
    let height = cfg.surface.height.round() as usize;

    let mailbox = FrameMailbox::new();
    let (sim_tx, sim_rx) = mpsc::channel();
    let source = match &cfg.source {
        SourceConfig::Simulator => {
            spawn_hand_source(SimHandSource::new(sim_rx, cfg.surface), mailbox.clone())
        }
        SourceConfig::Replay { path } => {
            spawn_hand_source(ReplayHandSource::open(path)?, mailbox.clone())
        }
    };

    let result = Visualizer::new("Hand Studio", width, height, sim_tx)
        .and_then(|mut vis| drive(&mut app, &mut vis, &mailbox, width, height));

    // The visualizer (and with it the simulator's sender) is gone by now.
    app.shutdown(&mailbox);
    if source.join().is_err() {
        tracing::warn!("[app] hand source thread panicked");
    }
    result
}

fn drive(
    app:     &mut AppState,
    vis:     &mut Visualizer,
    mailbox: &FrameMailbox,
    width:   usize,
    height:  usize,
) -> Result<(), StudioError> {
    let mut fb = Framebuffer::new(width, height);
    let mut last = Instant::now();

    while vis.is_open() {
        for cmd in vis.poll_input() {
            match cmd {
                UiCommand::Quit      => return Ok(()),
                UiCommand::Start     => app.start(),
                UiCommand::Reset     => app.reset(),
                UiCommand::CycleMode => app.cycle_mode()?,
            }
        }

        if let Some(frame) = mailbox.take_latest() {
            app.ingest_frame(frame);
        }

        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;

        app.render(&mut fb);
        vis.present(&fb)?;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
