//! `minifb` window: shows the framebuffer and turns keyboard and pointer
//! input into commands and simulator input.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::StudioError;
use crate::framebuffer::Framebuffer;
use crate::source::SimInput;

/// Keyboard commands for the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    Start,      // Space
    Reset,      // R
    CycleMode,  // Tab
    Quit,       // Q / Escape
}

pub struct Visualizer {
    window:  Window,
    sim_tx:  Sender<SimInput>,
    /// Last pointer state sent, so an idle mouse sends nothing.
    last:    Option<SimInput>,
}

impl Visualizer {
    pub fn new(title: &str, width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self, StudioError> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| StudioError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, sim_tx, last: None })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Forward pointer changes to the simulator and collect key commands.
    pub fn poll_input(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            commands.push(UiCommand::Quit);
        }
        if one_shot(Key::Space) {
            commands.push(UiCommand::Start);
        }
        if one_shot(Key::R) {
            commands.push(UiCommand::Reset);
        }
        if one_shot(Key::Tab) {
            commands.push(UiCommand::CycleMode);
        }

        let input = match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((x, y)) => SimInput::Pointer {
                x,
                y,
                pinch: self.window.get_mouse_down(MouseButton::Left),
            },
            None => SimInput::Leave,
        };
        if self.last != Some(input) {
            self.last = Some(input);
            // The receiver is gone when a replay is driving the hands.
            let _ = self.sim_tx.send(input);
        }

        commands
    }

    pub fn present(&mut self, fb: &Framebuffer) -> Result<(), StudioError> {
        self.window
            .update_with_buffer(fb.as_slice(), fb.width(), fb.height())
            .map_err(|e| StudioError::Window(e.to_string()))
    }
}
