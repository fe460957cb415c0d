use std::collections::BTreeMap;

/// Chart-internal time unit: 192 frames per second of song time.
pub const FRAMES_PER_SECOND: f32 = 192.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl NoteColor {
    pub const ALL: [Self; 4] = [Self::Red, Self::Yellow, Self::Green, Self::Blue];

    #[inline(always)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }

    /// Lane index, left to right.
    #[inline(always)]
    pub const fn lane(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Yellow => 1,
            Self::Green => 2,
            Self::Blue => 3,
        }
    }

    /// Maps a chart `N <noteType>` code to a color. Codes outside 0-3
    /// carry no color and the note is dropped.
    #[inline(always)]
    pub const fn from_note_type(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Red),
            1 => Some(Self::Yellow),
            2 => Some(Self::Green),
            3 => Some(Self::Blue),
            _ => None,
        }
    }
}

/// Immutable spawn timetable for one song: frame -> colors registered at
/// that frame (in chart line order), plus the last frame seen while parsing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    pub frames: BTreeMap<u32, Vec<NoteColor>>,
    pub song_length: u32,
}

impl Chart {
    pub fn total_notes(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }
}
