/// The keys the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Key {
    Space,
    Escape,
    F11,
    Digit1,
    Digit2,
    Digit3,
    KeyF,
}

impl Key {
    pub const COUNT: usize = 7;

    pub const ALL: [Key; Self::COUNT] = [
        Key::Space,
        Key::Escape,
        Key::F11,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::KeyF,
    ];
}

/// Level-triggered key state: true while the key is held.
///
/// Owned by the window collaborator; the driver only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTable {
    pressed: [bool; Key::COUNT],
}

impl KeyTable {
    pub fn set(&mut self, key: Key, down: bool) {
        self.pressed[key as usize] = down;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key as usize]
    }
}

/// A discrete control the driver evaluates once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause or resume animation.
    TogglePlayback,
    /// End the frame loop.
    Quit,
    /// Delegate a fullscreen toggle to the window.
    ToggleFullscreen,
    /// Decrease the time-scale factor by one step.
    SlowTime,
    /// Increase the time-scale factor by one step.
    HastenTime,
    /// Restore the time-scale factor to 1.
    ResetTimeScale,
    /// Toggle the follow camera.
    ToggleFollow,
}

impl Action {
    /// The fixed key binding.
    pub fn key(self) -> Key {
        match self {
            Action::TogglePlayback => Key::Space,
            Action::Quit => Key::Escape,
            Action::ToggleFullscreen => Key::F11,
            Action::SlowTime => Key::Digit1,
            Action::HastenTime => Key::Digit2,
            Action::ResetTimeScale => Key::Digit3,
            Action::ToggleFollow => Key::KeyF,
        }
    }

    pub const ALL: [Action; 7] = [
        Action::TogglePlayback,
        Action::Quit,
        Action::ToggleFullscreen,
        Action::SlowTime,
        Action::HastenTime,
        Action::ResetTimeScale,
        Action::ToggleFollow,
    ];
}

/// Turns the held-key table into once-per-press action firing.
///
/// Keeps the previous tick's table; an action fires only when its key is
/// down now and was up last tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: KeyTable,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `action`'s key went down this tick.
    pub fn fired(&self, current: &KeyTable, action: Action) -> bool {
        let key = action.key();
        current.is_pressed(key) && !self.previous.is_pressed(key)
    }

    /// Retire the tick: the current table becomes the comparison baseline.
    /// Call exactly once per tick, after all actions have been evaluated.
    pub fn retire(&mut self, current: &KeyTable) {
        self.previous = *current;
    }
}
