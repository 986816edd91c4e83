use crate::config::WindowConfig;
use orrery_input::{Key, KeyTable};
use std::collections::BTreeMap;

/// Errors from the window collaborator.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("failed to open window: {0}")]
    OpenFailed(String),
}

/// Result of one event poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Continue,
    /// Termination signal; the loop treats this as a normal shutdown.
    Quit,
}

/// The narrow seam to the windowing system.
///
/// The driver never sees events; it polls once per tick and reads the
/// level-triggered key table and the cursor afterward.
pub trait Window {
    fn open(&mut self, config: &WindowConfig) -> Result<(), WindowError>;
    fn poll(&mut self) -> Poll;
    fn keys(&self) -> &KeyTable;
    fn cursor(&self) -> (f32, f32);
    fn swap_buffers(&mut self);
    fn clear_buffers(&mut self, r: f32, g: f32, b: f32);
    fn toggle_fullscreen(&mut self);
    fn close(&mut self);
}

/// Scripted window for tests and headless playback.
///
/// Polls succeed for a fixed frame budget, then report termination. Key
/// transitions can be scheduled against a frame number; they apply when
/// that frame is polled.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    open: bool,
    refuse_open: bool,
    fullscreen: bool,
    frame_budget: u64,
    frames_polled: u64,
    swaps: u64,
    keys: KeyTable,
    cursor: (f32, f32),
    script: BTreeMap<u64, Vec<(Key, bool)>>,
}

impl HeadlessWindow {
    /// A window that polls `frames` times before signalling termination.
    pub fn with_budget(frames: u64) -> Self {
        Self {
            frame_budget: frames,
            ..Self::default()
        }
    }

    /// A window whose `open` always fails, for the startup-abort path.
    pub fn refusing_open() -> Self {
        Self {
            refuse_open: true,
            ..Self::default()
        }
    }

    /// Schedule a key transition to apply when `frame` is polled.
    pub fn script_key(&mut self, frame: u64, key: Key, down: bool) {
        self.script.entry(frame).or_default().push((key, down));
    }

    /// Schedule a press at `frame` and its release at the next frame.
    pub fn script_tap(&mut self, frame: u64, key: Key) {
        self.script_key(frame, key, true);
        self.script_key(frame + 1, key, false);
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Frames presented via `swap_buffers`.
    pub fn frames_presented(&self) -> u64 {
        self.swaps
    }
}

impl Window for HeadlessWindow {
    fn open(&mut self, config: &WindowConfig) -> Result<(), WindowError> {
        if self.refuse_open {
            return Err(WindowError::OpenFailed("no display".into()));
        }
        self.open = true;
        self.fullscreen = config.fullscreen;
        tracing::debug!(title = %config.title, "headless window opened");
        Ok(())
    }

    fn poll(&mut self) -> Poll {
        if self.frames_polled >= self.frame_budget {
            return Poll::Quit;
        }
        if let Some(transitions) = self.script.get(&self.frames_polled) {
            for &(key, down) in transitions {
                self.keys.set(key, down);
            }
        }
        self.frames_polled += 1;
        Poll::Continue
    }

    fn keys(&self) -> &KeyTable {
        &self.keys
    }

    fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn clear_buffers(&mut self, _r: f32, _g: f32, _b: f32) {}

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_exhaustion_signals_quit() {
        let mut window = HeadlessWindow::with_budget(2);
        window.open(&WindowConfig::default()).unwrap();
        assert_eq!(window.poll(), Poll::Continue);
        assert_eq!(window.poll(), Poll::Continue);
        assert_eq!(window.poll(), Poll::Quit);
    }

    #[test]
    fn scripted_keys_apply_on_their_frame() {
        let mut window = HeadlessWindow::with_budget(3);
        window.script_tap(1, Key::Space);

        window.poll();
        assert!(!window.keys().is_pressed(Key::Space));
        window.poll();
        assert!(window.keys().is_pressed(Key::Space));
        window.poll();
        assert!(!window.keys().is_pressed(Key::Space));
    }

    #[test]
    fn refusing_open_fails() {
        let mut window = HeadlessWindow::refusing_open();
        assert!(window.open(&WindowConfig::default()).is_err());
        assert!(!window.is_open());
    }

    #[test]
    fn fullscreen_toggle_flips_state() {
        let mut window = HeadlessWindow::with_budget(1);
        window.open(&WindowConfig::default()).unwrap();
        assert!(!window.is_fullscreen());
        window.toggle_fullscreen();
        assert!(window.is_fullscreen());
    }
}
