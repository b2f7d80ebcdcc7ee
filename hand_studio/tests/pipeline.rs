//! End-to-end: hand frames in through the mailbox, tracker, consumers,
//! physics and rendering out.

use std::fs;
use std::io::Cursor;
use std::time::Duration;

use hand_canvas::DragState;
use hand_gesture::{FrameMailbox, HandFrame, Landmark, Point, Surface, INDEX_TIP, THUMB_TIP, WRIST};
use hand_studio::app::{config_from_args, AppState, Mode, SourceConfig, StudioConfig};
use hand_studio::framebuffer::Framebuffer;
use hand_studio::source::{HandSource, ReplayHandSource};

/// A flat hand with the index tip at normalized `(x, y)` and the thumb
/// `gap` away along x.
fn raw_hand(x: f32, y: f32, gap: f32) -> Vec<Landmark> {
    let mut hand = vec![Landmark::new(x, y + 0.2, 0.0); 21];
    hand[WRIST] = Landmark::new(x, y + 0.3, 0.0);
    hand[INDEX_TIP] = Landmark::new(x, y, 0.0);
    hand[THUMB_TIP] = Landmark::new(x + gap, y, 0.0);
    hand
}

/// Normalized coordinates whose mirrored projection on 800×600 is `(px, py)`.
fn at_px(px: f32, py: f32) -> (f32, f32) {
    (1.0 - px / 800.0, py / 600.0)
}

fn pinch_at(px: f32, py: f32) -> Vec<Landmark> {
    let (x, y) = at_px(px, py);
    raw_hand(x, y, 0.05)
}

fn open_at(px: f32, py: f32) -> Vec<Landmark> {
    let (x, y) = at_px(px, py);
    raw_hand(x, y, 0.30)
}

fn app(mode: Mode) -> AppState {
    AppState::new(&StudioConfig { mode, ..StudioConfig::default() }).unwrap()
}

fn deliver(app: &mut AppState, mailbox: &FrameMailbox, hands: Vec<Vec<Landmark>>) {
    mailbox.publish(HandFrame::new(hands));
    if let Some(frame) = mailbox.take_latest() {
        app.ingest_frame(frame);
    }
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 0.01 && (a.y - b.y).abs() < 0.01
}

#[test]
fn drag_session_through_the_mailbox() {
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();

    deliver(&mut app, &mb, vec![pinch_at(610.0, 190.0)]);
    assert_eq!(app.canvas().unwrap().drag_state().object_id(), Some(3));

    for step in 1..=10 {
        let x = 610.0 - 20.0 * step as f32;
        deliver(&mut app, &mb, vec![pinch_at(x, 190.0)]);
    }
    deliver(&mut app, &mb, vec![open_at(100.0, 100.0)]);

    let canvas = app.canvas().unwrap();
    assert_eq!(canvas.drag_state(), DragState::Idle);
    let tri = canvas.objects().iter().find(|o| o.id == 3).unwrap();
    assert!(close(tri.position, Point::new(410.0, 190.0)), "{:?}", tri.position);
    assert!(canvas.snapshots().iter().all(|s| !s.dragging));
}

#[test]
fn newest_frame_wins_when_consumer_lags() {
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();
    // Three detections land before the loop gets round to reading.
    mb.publish(HandFrame::new(vec![pinch_at(200.0, 200.0)]));
    mb.publish(HandFrame::new(vec![pinch_at(205.0, 205.0)]));
    mb.publish(HandFrame::new(vec![open_at(700.0, 550.0)]));
    app.ingest_frame(mb.take_latest().unwrap());
    assert!(mb.take_latest().is_none());
    assert_eq!(app.frames(), 1);
    assert_eq!(app.canvas().unwrap().drag_state(), DragState::Idle);
}

#[test]
fn stale_recorded_frame_is_not_delivered() {
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();
    assert!(mb.publish_sequenced(HandFrame { seq: 8, hands: vec![pinch_at(200.0, 200.0)] }));
    app.ingest_frame(mb.take_latest().unwrap());
    assert!(!mb.publish_sequenced(HandFrame { seq: 7, hands: vec![open_at(200.0, 200.0)] }));
    assert!(mb.take_latest().is_none());
    assert_eq!(app.canvas().unwrap().drag_state().object_id(), Some(1));
}

#[test]
fn bad_hand_does_not_hide_good_one() {
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();
    let broken = vec![Landmark::new(0.5, 0.5, 0.0); 7];
    deliver(&mut app, &mb, vec![broken, pinch_at(300.0, 400.0)]);
    assert_eq!(
        app.canvas().unwrap().drag_state(),
        DragState::Dragging { object_id: 4, hand_index: 1 }
    );
}

#[test]
fn losing_the_hand_freezes_the_drag() {
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();
    deliver(&mut app, &mb, vec![pinch_at(400.0, 300.0)]);
    deliver(&mut app, &mb, vec![pinch_at(450.0, 320.0)]);
    deliver(&mut app, &mb, vec![]);
    let canvas = app.canvas().unwrap();
    assert_eq!(canvas.drag_state().object_id(), Some(2));
    assert!(close(canvas.objects()[1].position, Point::new(450.0, 320.0)));
    // The pinch state survives too: the next open frame releases.
    assert!(app.tracker().is_pinching());
    deliver(&mut app, &mb, vec![open_at(10.0, 10.0)]);
    assert_eq!(app.canvas().unwrap().drag_state(), DragState::Idle);
}

#[test]
fn paddle_follows_hand_and_computer_scores() {
    let mut app = app(Mode::Paddle);
    let mb = FrameMailbox::new();
    // Hand near the top: the paddle parks at the top and the serve
    // eventually gets past it.
    deliver(&mut app, &mb, vec![open_at(100.0, 0.0)]);
    app.start();
    let mut conceded = false;
    for _ in 0..2_000 {
        app.tick(Duration::from_millis(16));
        let game = app.game().unwrap();
        assert!((game.state().player_y - 130.0).abs() < 1e-3);
        if game.state().score.computer > 0 {
            conceded = true;
            break;
        }
    }
    assert!(conceded);
    let snap = app.game().unwrap().snapshot();
    assert_eq!(snap.score.player, 0);
    assert_eq!((snap.ball.x, snap.ball.y), (400.0, 300.0));
    assert_eq!(app.game().unwrap().state().velocity.x, -5.0);
}

#[test]
fn game_ignores_frames_with_no_hands() {
    let mut app = app(Mode::Paddle);
    let mb = FrameMailbox::new();
    deliver(&mut app, &mb, vec![open_at(100.0, 300.0)]);
    let before = app.game().unwrap().hand_y();
    deliver(&mut app, &mb, vec![]);
    assert_eq!(app.game().unwrap().hand_y(), before);
    assert!(before.is_some());
}

#[test]
fn both_consumers_share_one_tracker() {
    let mut app = app(Mode::Both);
    let mb = FrameMailbox::new();
    app.start();
    deliver(&mut app, &mb, vec![pinch_at(200.0, 200.0)]);
    app.tick(Duration::from_millis(16));
    assert_eq!(app.canvas().unwrap().drag_state().object_id(), Some(1));
    assert!(app.game().unwrap().hand_y().is_some());
    assert_eq!(app.game().unwrap().ticks(), 1);

    let mut fb = Framebuffer::new(800, 600);
    app.render(&mut fb);
    assert!(fb.as_slice().iter().any(|&p| p == 0xFF3498DB));
}

#[test]
fn wild_landmarks_render_without_panicking() {
    let mut app = app(Mode::Both);
    let mb = FrameMailbox::new();
    // Grab the circle, then fling the finger far past the right edge.
    deliver(&mut app, &mb, vec![pinch_at(200.0, 200.0)]);
    deliver(&mut app, &mb, vec![raw_hand(-1e7, 0.3, 0.05)]);
    assert_eq!(app.canvas().unwrap().drag_state().object_id(), Some(1));

    let mut fb = Framebuffer::new(800, 600);
    app.render(&mut fb);
    // Neither the off-surface hand nor the dragged circle lands on screen.
    assert!(fb.as_slice().iter().all(|&p| p != 0xFF3498DB && p != 0xFF00FF00));
}

#[test]
fn replayed_recording_drives_the_canvas() {
    let line = |t: u64, hand: &[Landmark]| {
        let hand = serde_json::to_string(hand).unwrap();
        format!("{{\"t_ms\":{t},\"hands\":[{hand}]}}\n")
    };
    let mut text = line(0, &pinch_at(200.0, 200.0));
    text.push_str("garbage\n");
    text.push_str(&line(1, &pinch_at(260.0, 240.0)));

    let src = ReplayHandSource::from_reader(Cursor::new(text)).unwrap();
    assert_eq!(src.frames().len(), 2);

    // Deliver each recorded frame as the loop would, one per iteration.
    let mut app = app(Mode::Canvas);
    let mb = FrameMailbox::new();
    for frame in src.frames() {
        deliver(&mut app, &mb, frame.hands.clone());
    }
    let obj = &app.canvas().unwrap().objects()[0];
    assert!(close(obj.position, Point::new(260.0, 240.0)));

    // Played back on its own thread the newest frame is what remains.
    let mb = FrameMailbox::new();
    Box::new(src).run(mb.clone());
    assert_eq!(mb.take_latest().unwrap().seq, 2);
}

#[test]
fn config_file_and_flags_combine() {
    let dir = std::env::temp_dir().join(format!("hand_studio_cfg_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("studio.json");
    fs::write(
        &path,
        r##"{
            "surface": {"width": 1000, "height": 800},
            "mode": "paddle",
            "objects": [{"id": 9, "position": {"x": 500, "y": 400}, "size": 60,
                         "shape": "square", "color": "#123456"}]
        }"##,
    ).unwrap();

    let p = path.to_string_lossy().to_string();
    let cfg = config_from_args(["--config", p.as_str(), "--mode", "both"]).unwrap();
    assert_eq!(cfg.mode, Mode::Both);
    assert_eq!(cfg.surface, Surface::new(1000.0, 800.0));
    assert_eq!(cfg.source, SourceConfig::Simulator);

    let mut app = AppState::new(&cfg).unwrap();
    let mb = FrameMailbox::new();
    // Index tip at surface (500, 400) on the 1000×800 surface.
    deliver(&mut app, &mb, vec![raw_hand(0.5, 0.5, 0.05)]);
    assert_eq!(app.canvas().unwrap().drag_state().object_id(), Some(9));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn unreadable_config_is_reported() {
    let err = config_from_args(["--config", "/nonexistent/studio.json"]).unwrap_err();
    assert!(err.to_string().contains("could not read config"));
}
