//! Keyboard and touch input normalization
//!
//! Movement and fire are held levels; pause and mute are edges that fire
//! once per press and are consumed when read.

use crate::sim::TickInput;

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchControl {
    Left,
    Right,
    Fire,
    Pause,
}

/// Intent a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Left,
    Right,
    Fire,
    Pause,
    Mute,
}

impl Intent {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            " " | "Spacebar" => Some(Self::Fire),
            "Escape" | "p" | "P" => Some(Self::Pause),
            "m" | "M" => Some(Self::Mute),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Held {
    left: bool,
    right: bool,
    fire: bool,
    pause: bool,
    mute: bool,
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: Held,
    touch: Held,
    pause_pressed: bool,
    mute_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key is one the game handles (caller may suppress the
    /// browser default, e.g. page scroll on space)
    pub fn handles_key(key: &str) -> bool {
        Intent::from_key(key).is_some()
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(intent) = Intent::from_key(key) {
            Self::press(&mut self.keys, intent, &mut self.pause_pressed, &mut self.mute_pressed);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(intent) = Intent::from_key(key) {
            Self::release(&mut self.keys, intent);
        }
    }

    pub fn touch_start(&mut self, control: TouchControl) {
        Self::press(
            &mut self.touch,
            control.into(),
            &mut self.pause_pressed,
            &mut self.mute_pressed,
        );
    }

    pub fn touch_end(&mut self, control: TouchControl) {
        Self::release(&mut self.touch, control.into());
    }

    /// Request a pause from outside the input devices (window blur, tab hidden)
    pub fn request_pause(&mut self) {
        self.pause_pressed = true;
    }

    /// Toggle mute from an on-screen button
    pub fn request_mute(&mut self) {
        self.mute_pressed = true;
    }

    /// Drop everything held, e.g. when focus is lost and key-up events will
    /// never arrive
    pub fn release_all(&mut self) {
        self.keys = Held::default();
        self.touch = Held::default();
    }

    /// Current intents; consumes pending pause/mute edges
    pub fn intents(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.keys.left || self.touch.left,
            move_right: self.keys.right || self.touch.right,
            fire: self.keys.fire || self.touch.fire,
            pause: self.pause_pressed,
            mute: self.mute_pressed,
        };
        self.pause_pressed = false;
        self.mute_pressed = false;
        input
    }

    fn press(held: &mut Held, intent: Intent, pause_pressed: &mut bool, mute_pressed: &mut bool) {
        match intent {
            Intent::Left => held.left = true,
            Intent::Right => held.right = true,
            Intent::Fire => held.fire = true,
            // Auto-repeat keydown must not re-trigger the edge
            Intent::Pause => {
                if !held.pause {
                    *pause_pressed = true;
                }
                held.pause = true;
            }
            Intent::Mute => {
                if !held.mute {
                    *mute_pressed = true;
                }
                held.mute = true;
            }
        }
    }

    fn release(held: &mut Held, intent: Intent) {
        match intent {
            Intent::Left => held.left = false,
            Intent::Right => held.right = false,
            Intent::Fire => held.fire = false,
            Intent::Pause => held.pause = false,
            Intent::Mute => held.mute = false,
        }
    }
}

impl From<TouchControl> for Intent {
    fn from(control: TouchControl) -> Self {
        match control {
            TouchControl::Left => Intent::Left,
            TouchControl::Right => Intent::Right,
            TouchControl::Fire => Intent::Fire,
            TouchControl::Pause => Intent::Pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_are_held() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        assert!(input.intents().move_left);
        assert!(input.intents().move_left);
        input.key_up("ArrowLeft");
        assert!(!input.intents().move_left);

        input.key_down("D");
        input.key_down(" ");
        let intents = input.intents();
        assert!(intents.move_right);
        assert!(intents.fire);
    }

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down("Escape");
        assert!(input.intents().pause);
        assert!(!input.intents().pause);

        // Auto-repeat while held
        input.key_down("Escape");
        assert!(!input.intents().pause);

        input.key_up("Escape");
        input.key_down("p");
        assert!(input.intents().pause);
    }

    #[test]
    fn test_mute_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down("m");
        input.key_down("m");
        let first = input.intents();
        assert!(first.mute);
        assert!(!first.pause);
        assert!(!input.intents().mute);
    }

    #[test]
    fn test_touch_and_keyboard_combine() {
        let mut input = InputState::new();
        input.touch_start(TouchControl::Fire);
        input.key_down(" ");
        input.key_up(" ");
        assert!(input.intents().fire);

        input.touch_end(TouchControl::Fire);
        assert!(!input.intents().fire);

        input.touch_start(TouchControl::Pause);
        assert!(input.intents().pause);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputState::new();
        input.key_down("q");
        input.key_down("Enter");
        let intents = input.intents();
        assert_eq!(
            (intents.move_left, intents.move_right, intents.fire, intents.pause, intents.mute),
            (false, false, false, false, false)
        );
        assert!(!InputState::handles_key("q"));
        assert!(InputState::handles_key("ArrowRight"));
    }

    #[test]
    fn test_release_all_and_external_pause() {
        let mut input = InputState::new();
        input.key_down("a");
        input.touch_start(TouchControl::Right);
        input.release_all();
        input.request_pause();
        input.request_mute();
        let intents = input.intents();
        assert!(!intents.move_left);
        assert!(!intents.move_right);
        assert!(intents.pause);
        assert!(intents.mute);
    }
}
