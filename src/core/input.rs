use crate::game::chart::NoteColor;
use rustc_hash::{FxHashMap, FxHashSet};
use winit::keyboard::KeyCode;

pub const NUM_LANES: usize = 4;

/// Input collaborator: "was the action for this lane just pressed this tick?"
pub trait LaneInput {
    fn just_pressed(&self, color: NoteColor) -> bool;
}

/// Fixed per-tick press set, for scripted sessions in tests.
impl LaneInput for [bool; NUM_LANES] {
    #[inline(always)]
    fn just_pressed(&self, color: NoteColor) -> bool {
        self[color.lane()]
    }
}

/// Maps physical keys to the four lane actions.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: FxHashMap<KeyCode, NoteColor>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self { bindings: FxHashMap::default() };
        keymap.bind(KeyCode::KeyD, NoteColor::Red);
        keymap.bind(KeyCode::KeyF, NoteColor::Yellow);
        keymap.bind(KeyCode::KeyJ, NoteColor::Green);
        keymap.bind(KeyCode::KeyK, NoteColor::Blue);
        keymap
    }
}

impl Keymap {
    /// Binds `key` to a lane, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyCode, color: NoteColor) {
        self.bindings.retain(|_, c| *c != color);
        self.bindings.insert(key, color);
    }

    pub fn lane_for(&self, key: KeyCode) -> Option<NoteColor> {
        self.bindings.get(&key).copied()
    }

    pub fn key_for(&self, color: NoteColor) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find(|(_, c)| **c == color)
            .map(|(k, _)| *k)
    }
}

/// Edge-triggered input state. The host feeds raw key transitions with
/// `handle_key`; a held key produces a single edge until it is released.
/// The host clears edges once per logic tick via `end_tick`.
pub struct InputState {
    keymap: Keymap,
    held: FxHashSet<KeyCode>,
    edges: [bool; NUM_LANES],
}

impl InputState {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            held: FxHashSet::default(),
            edges: [false; NUM_LANES],
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key)
                && let Some(color) = self.keymap.lane_for(key)
            {
                self.edges[color.lane()] = true;
            }
        } else {
            self.held.remove(&key);
        }
    }

    pub fn end_tick(&mut self) {
        self.edges = [false; NUM_LANES];
    }
}

impl LaneInput for InputState {
    #[inline(always)]
    fn just_pressed(&self, color: NoteColor) -> bool {
        self.edges[color.lane()]
    }
}

/// Resolves a config key name ("D", "Space", "ArrowLeft", ...) to a key code.
pub fn key_code_from_name(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    let code = match name.to_ascii_lowercase().as_str() {
        "a" => KeyCode::KeyA,
        "b" => KeyCode::KeyB,
        "c" => KeyCode::KeyC,
        "d" => KeyCode::KeyD,
        "e" => KeyCode::KeyE,
        "f" => KeyCode::KeyF,
        "g" => KeyCode::KeyG,
        "h" => KeyCode::KeyH,
        "i" => KeyCode::KeyI,
        "j" => KeyCode::KeyJ,
        "k" => KeyCode::KeyK,
        "l" => KeyCode::KeyL,
        "m" => KeyCode::KeyM,
        "n" => KeyCode::KeyN,
        "o" => KeyCode::KeyO,
        "p" => KeyCode::KeyP,
        "q" => KeyCode::KeyQ,
        "r" => KeyCode::KeyR,
        "s" => KeyCode::KeyS,
        "t" => KeyCode::KeyT,
        "u" => KeyCode::KeyU,
        "v" => KeyCode::KeyV,
        "w" => KeyCode::KeyW,
        "x" => KeyCode::KeyX,
        "y" => KeyCode::KeyY,
        "z" => KeyCode::KeyZ,
        "0" => KeyCode::Digit0,
        "1" => KeyCode::Digit1,
        "2" => KeyCode::Digit2,
        "3" => KeyCode::Digit3,
        "4" => KeyCode::Digit4,
        "5" => KeyCode::Digit5,
        "6" => KeyCode::Digit6,
        "7" => KeyCode::Digit7,
        "8" => KeyCode::Digit8,
        "9" => KeyCode::Digit9,
        "space" => KeyCode::Space,
        "arrowup" | "up" => KeyCode::ArrowUp,
        "arrowdown" | "down" => KeyCode::ArrowDown,
        "arrowleft" | "left" => KeyCode::ArrowLeft,
        "arrowright" | "right" => KeyCode::ArrowRight,
        _ => return None,
    };
    Some(code)
}
