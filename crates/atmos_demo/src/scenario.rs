//! Scripted input timeline
//!
//! A fixed sequence of phases, each holding a set of keys for a while. The
//! script turns phase changes into key press and release events on an
//! [`InputManager`], the same way a window event loop would.

use atmos_motion::input::{InputManager, KeyCode};

/// One stage of the script
#[derive(Debug, Clone)]
pub struct Phase {
    /// Label used in the logs
    pub name: &'static str,

    /// How long the phase lasts in seconds
    pub duration: f32,

    /// Keys held for the whole phase
    pub held: &'static [KeyCode],

    /// Tap jump on the first frame of the phase
    pub jump: bool,

    /// Sweep the mouse to the right while the phase runs
    pub turn: bool,
}

/// The standard demo script
pub fn standard() -> Vec<Phase> {
    vec![
        Phase { name: "idle", duration: 0.5, held: &[], jump: false, turn: false },
        Phase { name: "walk forward", duration: 1.5, held: &[KeyCode::W], jump: false, turn: false },
        Phase {
            name: "sprint diagonally",
            duration: 1.5,
            held: &[KeyCode::W, KeyCode::D, KeyCode::LeftShift],
            jump: false,
            turn: false,
        },
        Phase {
            name: "jump",
            duration: 0.25,
            held: &[KeyCode::W, KeyCode::D, KeyCode::LeftShift],
            jump: true,
            turn: false,
        },
        Phase { name: "release mid-air", duration: 1.0, held: &[], jump: false, turn: false },
        Phase { name: "turn and walk", duration: 1.5, held: &[KeyCode::W], jump: false, turn: true },
        Phase { name: "settle", duration: 1.0, held: &[], jump: false, turn: false },
    ]
}

/// Plays a list of phases into an input manager
#[derive(Debug)]
pub struct Timeline {
    phases: Vec<Phase>,
    current: Option<usize>,
    elapsed: f32,
    mouse_x: f64,
    mouse_speed: f64,
    jump_down: bool,
}

impl Timeline {
    /// Create a timeline over `phases`
    pub fn new(phases: Vec<Phase>, mouse_speed: f64) -> Self {
        Self {
            phases,
            current: None,
            elapsed: 0.0,
            mouse_x: 0.0,
            mouse_speed,
            jump_down: false,
        }
    }

    /// Total scripted time
    pub fn duration(&self) -> f32 {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    /// Whether every phase has played
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// Phase currently playing
    pub fn current(&self) -> Option<&Phase> {
        self.current.and_then(|index| self.phases.get(index))
    }

    /// Emit this frame's events and advance by `delta_time`.
    ///
    /// Returns the phase that just ended, if the frame crossed a boundary.
    pub fn advance(&mut self, input: &mut InputManager, delta_time: f32) -> Option<Phase> {
        if self.jump_down {
            input.handle_key_input(KeyCode::Space, false);
            self.jump_down = false;
        }

        let index = self.phase_at(self.elapsed);
        let mut ended = None;

        if index != self.current {
            let previous = self.current.and_then(|i| self.phases.get(i)).cloned();
            let next = index.and_then(|i| self.phases.get(i)).cloned();

            if let Some(previous) = &previous {
                for key in previous.held {
                    if next.as_ref().map_or(true, |phase| !phase.held.contains(key)) {
                        input.handle_key_input(*key, false);
                    }
                }
            }
            if let Some(next) = &next {
                for key in next.held {
                    input.handle_key_input(*key, true);
                }
                if next.jump {
                    input.handle_key_input(KeyCode::Space, true);
                    self.jump_down = true;
                }
                log::debug!("Phase '{}' started at {:.2}s", next.name, self.elapsed);
            }

            ended = previous;
            self.current = index;
        }

        if self.current().is_some_and(|phase| phase.turn) {
            self.mouse_x += self.mouse_speed * f64::from(delta_time);
            input.handle_mouse_move(self.mouse_x, 0.0);
        }

        self.elapsed += delta_time;
        ended
    }

    fn phase_at(&self, time: f32) -> Option<usize> {
        let mut start = 0.0;
        for (index, phase) in self.phases.iter().enumerate() {
            if time < start + phase.duration {
                return Some(index);
            }
            start += phase.duration;
        }
        None
    }
}
