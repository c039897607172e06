//! Input management system
//!
//! The host feeds key and mouse events in as they arrive. Once per frame the
//! manager turns the held keys into `Horizontal`/`Vertical` axes and button
//! edges, and hands the controllers a plain [`InputFrame`] snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space key
    Space,
    /// Left shift key
    LeftShift,
    /// Escape key
    Escape,
}

/// Named input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Strafe axis, positive to the right
    Horizontal,
    /// Forward axis, positive forward
    Vertical,
}

/// Key bindings for the movement axes and buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    /// Keys pushing `Horizontal` toward -1
    pub left: Vec<KeyCode>,
    /// Keys pushing `Horizontal` toward +1
    pub right: Vec<KeyCode>,
    /// Keys pushing `Vertical` toward -1
    pub back: Vec<KeyCode>,
    /// Keys pushing `Vertical` toward +1
    pub forward: Vec<KeyCode>,
    /// Keys bound to the `Jump` button
    pub jump: Vec<KeyCode>,
    /// Keys that count as sprint held
    pub sprint: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::A, KeyCode::Left],
            right: vec![KeyCode::D, KeyCode::Right],
            back: vec![KeyCode::S, KeyCode::Down],
            forward: vec![KeyCode::W, KeyCode::Up],
            jump: vec![KeyCode::Space],
            sprint: vec![KeyCode::LeftShift],
        }
    }
}

/// Response curve for the smoothed axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    /// Units per second the axis moves toward a held direction
    pub sensitivity: f32,
    /// Units per second the axis falls back to zero when released
    pub gravity: f32,
    /// Magnitudes below this read as zero
    pub dead: f32,
    /// Jump straight to zero when the held direction reverses
    pub snap: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            gravity: 3.0,
            dead: 0.001,
            snap: true,
        }
    }
}

/// Input configuration block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Key bindings
    pub bindings: InputBindings,
    /// Axis smoothing
    pub axis: AxisSettings,
    /// Scale from horizontal mouse travel to look input
    pub look_scale: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            bindings: InputBindings::default(),
            axis: AxisSettings::default(),
            look_scale: 0.1,
        }
    }
}

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    /// Unsmoothed axes, each in `[-1, 1]` (x = horizontal, y = vertical)
    pub raw_axes: Vec2,
    /// Axes after sensitivity/gravity smoothing, each in `[-1, 1]`
    pub smoothed_axes: Vec2,
    /// Sprint key held
    pub sprint_held: bool,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Horizontal look input accumulated this frame
    pub look_delta: f32,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            raw_axes: Vec2::zeros(),
            smoothed_axes: Vec2::zeros(),
            sprint_held: false,
            jump_pressed: false,
            look_delta: 0.0,
        }
    }
}

impl InputFrame {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Frame with both raw and smoothed axes set to `(x, y)`, clamped to `[-1, 1]`
    pub fn from_axes(x: f32, y: f32) -> Self {
        let axes = Vec2::new(clamp_axis(x), clamp_axis(y));
        Self {
            raw_axes: axes,
            smoothed_axes: axes,
            ..Self::default()
        }
    }

    /// Set sprint held
    pub fn with_sprint(mut self, held: bool) -> Self {
        self.sprint_held = held;
        self
    }

    /// Set jump pressed
    pub fn with_jump(mut self, pressed: bool) -> Self {
        self.jump_pressed = pressed;
        self
    }

    /// Set horizontal look input
    pub fn with_look(mut self, delta: f32) -> Self {
        self.look_delta = delta;
        self
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Input manager
#[derive(Debug)]
pub struct InputManager {
    settings: InputSettings,
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    smoothed: Vec2,
    mouse_position: Option<(f64, f64)>,
    mouse_delta: (f64, f64),
}

impl InputManager {
    /// Create a new input manager with default bindings
    pub fn new() -> Self {
        Self::with_settings(InputSettings::default())
    }

    /// Create an input manager with the given settings
    pub fn with_settings(settings: InputSettings) -> Self {
        Self {
            settings,
            held: HashSet::new(),
            pressed_this_frame: HashSet::new(),
            smoothed: Vec2::zeros(),
            mouse_position: None,
            mouse_delta: (0.0, 0.0),
        }
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.pressed_this_frame.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.mouse_position {
            self.mouse_delta.0 += x - last_x;
            self.mouse_delta.1 += y - last_y;
        }
        self.mouse_position = Some((x, y));
    }

    /// Whether any of the keys is held
    pub fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.held.contains(key))
    }

    /// Whether any of the keys went down this frame
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.pressed_this_frame.contains(key))
    }

    /// Unsmoothed axis value: -1, 0 or 1
    pub fn axis_raw(&self, axis: Axis) -> f32 {
        let bindings = &self.settings.bindings;
        let (negative, positive) = match axis {
            Axis::Horizontal => (&bindings.left, &bindings.right),
            Axis::Vertical => (&bindings.back, &bindings.forward),
        };

        let mut value = 0.0;
        if self.any_held(positive) {
            value += 1.0;
        }
        if self.any_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Smoothed axis value as of the last [`begin_frame`](Self::begin_frame)
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.smoothed.x,
            Axis::Vertical => self.smoothed.y,
        }
    }

    /// Advance the smoothed axes by one frame
    pub fn begin_frame(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        let raw = Vec2::new(self.axis_raw(Axis::Horizontal), self.axis_raw(Axis::Vertical));
        let axis = &self.settings.axis;

        for i in 0..2 {
            let mut value = self.smoothed[i];
            if raw[i] != 0.0 {
                if axis.snap && value * raw[i] < 0.0 {
                    value = 0.0;
                }
                value = move_towards(value, raw[i], axis.sensitivity * delta_time);
            } else {
                value = move_towards(value, 0.0, axis.gravity * delta_time);
            }

            if value.abs() < axis.dead {
                value = 0.0;
            }
            self.smoothed[i] = clamp_axis(value);
        }
    }

    /// Snapshot the current frame's input
    pub fn sample(&self) -> InputFrame {
        let bindings = &self.settings.bindings;
        InputFrame {
            raw_axes: Vec2::new(self.axis_raw(Axis::Horizontal), self.axis_raw(Axis::Vertical)),
            smoothed_axes: self.smoothed,
            sprint_held: self.any_held(&bindings.sprint),
            jump_pressed: self.any_pressed(&bindings.jump),
            look_delta: (self.mouse_delta.0 * f64::from(self.settings.look_scale)) as f32,
        }
    }

    /// Clear per-frame edges and mouse travel
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.mouse_delta = (0.0, 0.0);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_raw_axes_cancel() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::A, true);
        input.handle_key_input(KeyCode::D, true);

        assert_eq!(input.axis_raw(Axis::Horizontal), 0.0);

        input.handle_key_input(KeyCode::A, false);
        assert_eq!(input.axis_raw(Axis::Horizontal), 1.0);
    }

    #[test]
    fn test_jump_edge_lasts_one_frame() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::Space, true);

        assert!(input.sample().jump_pressed);
        input.end_frame();

        // Still held, but no longer a fresh press
        assert!(!input.sample().jump_pressed);

        // Key repeat must not re-trigger
        input.handle_key_input(KeyCode::Space, true);
        assert!(!input.sample().jump_pressed);
    }

    #[test]
    fn test_smoothed_axis_ramps_up_and_falls_back() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);

        input.begin_frame(0.125);
        assert_relative_eq!(input.axis(Axis::Vertical), 0.375);

        input.begin_frame(1.0);
        assert_relative_eq!(input.axis(Axis::Vertical), 1.0);

        input.handle_key_input(KeyCode::W, false);
        input.begin_frame(0.25);
        assert_relative_eq!(input.axis(Axis::Vertical), 0.25);
    }

    #[test]
    fn test_smoothed_axis_snaps_on_reversal() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::D, true);
        input.begin_frame(1.0);
        assert_relative_eq!(input.axis(Axis::Horizontal), 1.0);

        input.handle_key_input(KeyCode::D, false);
        input.handle_key_input(KeyCode::A, true);
        input.begin_frame(0.125);

        // Snapped to zero, then moved 0.375 toward -1
        assert_relative_eq!(input.axis(Axis::Horizontal), -0.375);
    }

    #[test]
    fn test_mouse_delta_scaled_and_cleared() {
        let mut input = InputManager::new();
        input.handle_mouse_move(100.0, 0.0);
        input.handle_mouse_move(130.0, 5.0);

        assert_relative_eq!(input.sample().look_delta, 3.0, epsilon = 1e-5);

        input.end_frame();
        assert_eq!(input.sample().look_delta, 0.0);
    }

    #[test]
    fn test_frame_builder_clamps_axes() {
        let frame = InputFrame::from_axes(2.0, -3.0).with_sprint(true);

        assert_eq!(frame.raw_axes, Vec2::new(1.0, -1.0));
        assert!(frame.sprint_held);
        assert!(!frame.jump_pressed);
    }
}
