use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// Input event types the engine understands.
/// Generic key codes, no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key was pressed. OS auto-repeats are tolerated and ignored.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The window lost focus; every held key is treated as released.
    FocusLost,
}

/// Per-frame state of a named action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    /// No bound key is held.
    #[default]
    Idle,
    /// A bound key went down this frame.
    Pressed,
    /// A bound key has been down for more than one frame.
    Held,
    /// The last bound key went up this frame.
    Released,
}

struct ActionEntry {
    state: ActionState,
    /// Key codes currently holding this action down.
    held: HashSet<u32>,
}

/// Maps raw key events onto named actions with edge detection.
///
/// The platform pushes events at any time; `update()` once per frame drains
/// them and advances every action one step: `Pressed` ages to `Held`,
/// `Released` ages to `Idle`, then the new events apply. A press and release
/// that land in the same frame collapse to `Released`.
pub struct InputManager {
    queue: Vec<InputEvent>,
    /// Key code to the actions it drives.
    bindings: HashMap<u32, Vec<String>>,
    actions: HashMap<String, ActionEntry>,
    pointer: Vec2,
    quit: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            queue: Vec::with_capacity(32),
            bindings: HashMap::new(),
            actions: HashMap::new(),
            pointer: Vec2::ZERO,
            quit: false,
        }
    }

    /// Register an action and the key codes that drive it. Binding the same
    /// action again extends its key set.
    pub fn bind_action(&mut self, action: impl Into<String>, key_codes: &[u32]) {
        let action = action.into();
        for &code in key_codes {
            let actions = self.bindings.entry(code).or_default();
            if !actions.contains(&action) {
                actions.push(action.clone());
            }
        }
        self.actions.entry(action).or_insert(ActionEntry {
            state: ActionState::Idle,
            held: HashSet::new(),
        });
    }

    /// Queue a raw event for the next `update()`.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Age edge states and apply the queued events. Call once per frame,
    /// before the scene input pass.
    pub fn update(&mut self) {
        for entry in self.actions.values_mut() {
            entry.state = match entry.state {
                ActionState::Pressed => ActionState::Held,
                ActionState::Released => ActionState::Idle,
                other => other,
            };
        }
        for event in std::mem::take(&mut self.queue) {
            match event {
                InputEvent::KeyDown { key_code } => self.apply_key_down(key_code),
                InputEvent::KeyUp { key_code } => self.apply_key_up(key_code),
                InputEvent::PointerMove { x, y } => self.pointer = Vec2::new(x, y),
                InputEvent::FocusLost => self.release_all(),
            }
        }
    }

    /// Last pointer position seen by `update()`, screen coordinates.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    /// Ask the frame loop to stop after this frame.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn action_state(&self, action: &str) -> ActionState {
        match self.actions.get(action) {
            Some(entry) => entry.state,
            None => {
                log::debug!("action_state: '{action}' has no binding");
                ActionState::Idle
            }
        }
    }

    /// True while any bound key is down (the press frame included).
    pub fn is_action_down(&self, action: &str) -> bool {
        matches!(
            self.action_state(action),
            ActionState::Pressed | ActionState::Held
        )
    }

    /// True only on the frame the action went down.
    pub fn was_action_pressed(&self, action: &str) -> bool {
        self.action_state(action) == ActionState::Pressed
    }

    /// True only on the frame the action went up.
    pub fn was_action_released(&self, action: &str) -> bool {
        self.action_state(action) == ActionState::Released
    }

    fn apply_key_down(&mut self, key_code: u32) {
        let Some(actions) = self.bindings.get(&key_code) else {
            return;
        };
        for action in actions {
            if let Some(entry) = self.actions.get_mut(action) {
                // HashSet::insert is false on auto-repeat, keeping the edge clean.
                if entry.held.insert(key_code) && entry.held.len() == 1 {
                    entry.state = ActionState::Pressed;
                }
            }
        }
    }

    fn apply_key_up(&mut self, key_code: u32) {
        let Some(actions) = self.bindings.get(&key_code) else {
            return;
        };
        for action in actions {
            if let Some(entry) = self.actions.get_mut(action) {
                entry.held.remove(&key_code);
                if entry.held.is_empty()
                    && matches!(entry.state, ActionState::Pressed | ActionState::Held)
                {
                    entry.state = ActionState::Released;
                }
            }
        }
    }

    fn release_all(&mut self) {
        for entry in self.actions.values_mut() {
            entry.held.clear();
            if matches!(entry.state, ActionState::Pressed | ActionState::Held) {
                entry.state = ActionState::Released;
            }
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
