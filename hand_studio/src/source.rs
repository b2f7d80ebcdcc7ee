//! Hand sources: anything that produces landmark batches on its own thread.
//!
//! Sources publish into a [`FrameMailbox`]; the main loop only ever sees the
//! newest batch.  A source stops once the mailbox is closed or its input runs
//! dry.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use hand_gesture::{FrameMailbox, HandFrame, Landmark, Point, Surface, LANDMARK_COUNT};
use serde::Deserialize;

use crate::error::StudioError;

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait HandSource: Send + 'static {
    /// Human-readable name for logs.
    fn name(&self) -> &'static str;

    fn run(self: Box<Self>, mailbox: FrameMailbox);
}

/// Run `source` on its own thread, publishing into `mailbox`.
pub fn spawn_hand_source<S: HandSource>(source: S, mailbox: FrameMailbox) -> JoinHandle<()> {
    let name = source.name();
    thread::spawn(move || {
        tracing::info!("[source] {name} started");
        Box::new(source).run(mailbox);
        tracing::info!("[source] {name} stopped");
    })
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — pointer-driven synthetic hand
// ════════════════════════════════════════════════════════════════════════════

/// Raw pointer input from the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer at surface pixel `(x, y)`; `pinch` while the button is held.
    Pointer { x: f32, y: f32, pinch: bool },
    /// Pointer left the window: no hand in view.
    Leave,
}

/// Turns [`SimInput`] into one synthetic hand per event.
pub struct SimHandSource {
    rx:      Receiver<SimInput>,
    surface: Surface,
}

impl SimHandSource {
    pub fn new(rx: Receiver<SimInput>, surface: Surface) -> Self {
        SimHandSource { rx, surface }
    }
}

impl HandSource for SimHandSource {
    fn name(&self) -> &'static str { "simulator" }

    fn run(self: Box<Self>, mailbox: FrameMailbox) {
        for input in self.rx.iter() {
            let hands = match input {
                SimInput::Pointer { x, y, pinch } => {
                    vec![synthesize_hand(Point::new(x, y), pinch, self.surface)]
                }
                SimInput::Leave => Vec::new(),
            };
            if mailbox.publish(HandFrame::new(hands)).is_none() {
                return;
            }
        }
    }
}

/// Open-hand pose as offsets from the index tip, in normalized units.
/// Row order follows the landmark indices.
const OPEN_POSE: [(f32, f32); LANDMARK_COUNT] = [
    ( 0.000, 0.30),                                                     // wrist
    ( 0.050, 0.26), ( 0.090, 0.21), ( 0.120, 0.16), ( 0.140, 0.11),     // thumb
    ( 0.000, 0.16), ( 0.000, 0.10), ( 0.000, 0.05), ( 0.000, 0.00),     // index
    (-0.030, 0.16), (-0.035, 0.09), (-0.040, 0.04), (-0.045, -0.01),    // middle
    (-0.060, 0.17), (-0.070, 0.11), (-0.075, 0.07), (-0.080, 0.03),     // ring
    (-0.090, 0.19), (-0.100, 0.15), (-0.105, 0.12), (-0.110, 0.09),     // pinky
];

/// Thumb joints folded onto the index tip.
const PINCH_THUMB: [(f32, f32); 2] = [(0.06, 0.08), (0.02, 0.02)];

/// Build a 21-landmark hand whose index tip projects to `tip` on `surface`.
pub fn synthesize_hand(tip: Point, pinch: bool, surface: Surface) -> Vec<Landmark> {
    let anchor = surface.unproject(tip);
    let mut pose = OPEN_POSE;
    if pinch {
        pose[3] = PINCH_THUMB[0];
        pose[4] = PINCH_THUMB[1];
    }
    pose.iter()
        .map(|&(dx, dy)| Landmark::new(anchor.x + dx, anchor.y + dy, 0.0))
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// ReplayHandSource — JSON-lines recording
// ════════════════════════════════════════════════════════════════════════════

/// One recorded batch: `{"t_ms": 16, "hands": [[{"x":..,"y":..,"z":..}, …]]}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReplayFrame {
    /// Offset from the start of the recording.
    pub t_ms:  u64,
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

/// Parse one recording line.  Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_replay_line(line: &str) -> Result<Option<ReplayFrame>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Publishes recorded frames on their recorded schedule.  Each frame is
/// sequenced by its timestamp, so out-of-order lines never replace a later
/// frame.
#[derive(Debug)]
pub struct ReplayHandSource {
    frames: Vec<ReplayFrame>,
}

impl ReplayHandSource {
    pub fn open(path: &Path) -> Result<Self, StudioError> {
        let file = File::open(path).map_err(|source| StudioError::Replay {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|source| StudioError::Replay {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read every line; lines that do not parse are logged and skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut frames = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_replay_line(&line) {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => {}
                Err(e) => tracing::warn!(line = n + 1, "skipping malformed recording line: {e}"),
            }
        }
        tracing::debug!(frames = frames.len(), "recording loaded");
        Ok(ReplayHandSource { frames })
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }
}

impl HandSource for ReplayHandSource {
    fn name(&self) -> &'static str { "replay" }

    fn run(self: Box<Self>, mailbox: FrameMailbox) {
        let start = Instant::now();
        for frame in self.frames {
            let due = start + Duration::from_millis(frame.t_ms);
            if !wait_until(due, &mailbox) {
                return;
            }
            // Sequenced by timestamp: a line recorded earlier than one
            // already published is stale.
            let seq = frame.t_ms + 1;
            if !mailbox.publish_sequenced(HandFrame { seq, hands: frame.hands }) {
                if mailbox.is_closed() {
                    return;
                }
                tracing::debug!(t_ms = frame.t_ms, "out-of-order recording line dropped");
            }
        }
    }
}

/// Sleep until `due`, waking periodically to notice a closed mailbox.
/// Returns `false` if the mailbox closed first.
fn wait_until(due: Instant, mailbox: &FrameMailbox) -> bool {
    const SLICE: Duration = Duration::from_millis(20);
    loop {
        if mailbox.is_closed() {
            return false;
        }
        let now = Instant::now();
        if now >= due {
            return true;
        }
        thread::sleep((due - now).min(SLICE));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{GestureTracker, PinchConfig};
    use std::io::Cursor;
    use std::sync::mpsc;

    fn hand_json(x: f32, y: f32) -> String {
        let lm = format!(r#"{{"x":{x},"y":{y},"z":0.0}}"#);
        format!("[{}]", vec![lm; 21].join(","))
    }

    #[test]
    fn synthetic_hand_lands_under_pointer() {
        let surface = Surface::new(800.0, 600.0);
        let mut tracker = GestureTracker::new(surface, PinchConfig::default());
        tracker.update(&[synthesize_hand(Point::new(200.0, 150.0), false, surface)]);
        let p = tracker.latest_points()[0];
        assert!((p.index_finger.x - 200.0).abs() < 1e-3);
        assert!((p.index_finger.y - 150.0).abs() < 1e-3);
        assert!(!tracker.is_pinching());
    }

    #[test]
    fn synthetic_pinch_is_a_pinch() {
        let surface = Surface::default();
        let mut tracker = GestureTracker::new(surface, PinchConfig::default());
        tracker.update(&[synthesize_hand(Point::new(400.0, 300.0), true, surface)]);
        assert!(tracker.is_pinching());
    }

    #[test]
    fn sim_source_publishes_per_input() {
        let (tx, rx) = mpsc::channel();
        let mailbox = FrameMailbox::new();
        let handle = spawn_hand_source(SimHandSource::new(rx, Surface::default()), mailbox.clone());
        tx.send(SimInput::Pointer { x: 10.0, y: 10.0, pinch: false }).unwrap();
        tx.send(SimInput::Leave).unwrap();
        drop(tx);
        handle.join().unwrap();
        let frame = mailbox.take_latest().unwrap();
        assert_eq!(frame.seq, 2);
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn parses_recording_lines() {
        let line = format!(r#"{{"t_ms": 16, "hands": [{}]}}"#, hand_json(0.5, 0.5));
        let frame = parse_replay_line(&line).unwrap().unwrap();
        assert_eq!(frame.t_ms, 16);
        assert_eq!(frame.hands[0].len(), 21);
        assert_eq!(frame.hands[0][0], Landmark::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        assert_eq!(parse_replay_line("   ").unwrap(), None);
        assert_eq!(parse_replay_line("# recorded on a laptop").unwrap(), None);
        assert!(parse_replay_line("{\"hands\": []}").is_err());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = format!(
            "{{\"t_ms\":0,\"hands\":[]}}\nnot json\n{{\"t_ms\":5,\"hands\":[{}]}}\n",
            hand_json(0.2, 0.3),
        );
        let src = ReplayHandSource::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(src.frames().len(), 2);
        assert_eq!(src.frames()[1].t_ms, 5);
    }

    #[test]
    fn replay_publishes_in_order() {
        let text = format!(
            "{{\"t_ms\":0,\"hands\":[]}}\n{{\"t_ms\":1,\"hands\":[{}]}}\n",
            hand_json(0.2, 0.3),
        );
        let src = ReplayHandSource::from_reader(Cursor::new(text)).unwrap();
        let mailbox = FrameMailbox::new();
        Box::new(src).run(mailbox.clone());
        let frame = mailbox.take_latest().unwrap();
        assert_eq!(frame.seq, 2);
        assert_eq!(frame.hands.len(), 1);
    }

    #[test]
    fn out_of_order_line_does_not_replace_later_frame() {
        let text = format!(
            "{{\"t_ms\":0,\"hands\":[]}}\n{{\"t_ms\":40,\"hands\":[{}]}}\n{{\"t_ms\":20,\"hands\":[]}}\n",
            hand_json(0.2, 0.3),
        );
        let src = ReplayHandSource::from_reader(Cursor::new(text)).unwrap();
        let mailbox = FrameMailbox::new();
        Box::new(src).run(mailbox.clone());
        let frame = mailbox.take_latest().unwrap();
        assert_eq!(frame.seq, 41);
        assert_eq!(frame.hands.len(), 1);
    }

    #[test]
    fn replay_stops_when_mailbox_closes() {
        let text = "{\"t_ms\":60000,\"hands\":[]}\n";
        let src = ReplayHandSource::from_reader(Cursor::new(text)).unwrap();
        let mailbox = FrameMailbox::new();
        let handle = spawn_hand_source(src, mailbox.clone());
        mailbox.close();
        handle.join().unwrap();
        assert!(mailbox.take_latest().is_none());
    }

    #[test]
    fn missing_recording_is_an_error() {
        let err = ReplayHandSource::open(Path::new("/nonexistent/hands.jsonl")).unwrap_err();
        assert!(matches!(err, StudioError::Replay { .. }));
    }
}
