use crate::game::chart::NoteColor;
use glam::Vec2;

// Hit zone geometry, shared by lifecycle sweeps and judging.
pub const HIT_ZONE_CENTER_Y: f32 = 1800.0;
pub const HIT_ZONE_HALF_HEIGHT: f32 = 128.0;

/// Generation-checked handle to a live note on the stage. Handles to
/// despawned notes go stale and every stage operation on them is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteHandle {
    index: u32,
    generation: u32,
}

/// Hit-zone overlap transition, delivered once per crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    ZoneEntered(NoteHandle),
    ZoneExited(NoteHandle),
}

#[derive(Clone, Debug)]
pub struct StageNote {
    pub color: NoteColor,
    pub position: Vec2,
    pub in_zone: bool,
    /// Elapsed-seconds deadline for the post-zone-exit grace despawn.
    /// Dies with the note, so an earlier hit cancels it.
    pub despawn_at: Option<f32>,
}

struct Slot {
    generation: u32,
    note: Option<StageNote>,
}

/// Headless scene host: owns live notes, hands out handles, and reports
/// hit-zone overlap transitions against a fixed detector region.
pub struct Stage {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    #[inline(always)]
    pub fn zone_center_y(&self) -> f32 {
        HIT_ZONE_CENTER_Y
    }

    pub fn spawn(&mut self, color: NoteColor, position: Vec2) -> NoteHandle {
        let note = StageNote {
            color,
            position,
            in_zone: false,
            despawn_at: None,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.note = Some(note);
            NoteHandle { index, generation: slot.generation }
        } else {
            self.slots.push(Slot { generation: 0, note: Some(note) });
            NoteHandle {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    /// Destroys a note. Idempotent: despawning a stale handle is a no-op.
    pub fn despawn(&mut self, handle: NoteHandle) -> bool {
        let Some(slot) = self.slot_mut(handle) else { return false };
        slot.note = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    pub fn note(&self, handle: NoteHandle) -> Option<&StageNote> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.note.as_ref())
    }

    fn slot_mut(&mut self, handle: NoteHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.note.is_some())
    }

    pub fn translate(&mut self, handle: NoteHandle, delta: Vec2) {
        if let Some(slot) = self.slot_mut(handle)
            && let Some(note) = slot.note.as_mut()
        {
            note.position += delta;
        }
    }

    /// Arms the grace despawn deadline on a live note.
    pub fn schedule_despawn(&mut self, handle: NoteHandle, deadline_s: f32) {
        if let Some(slot) = self.slot_mut(handle)
            && let Some(note) = slot.note.as_mut()
        {
            note.despawn_at = Some(deadline_s);
        }
    }

    pub fn live_handles(&self) -> Vec<NoteHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.note.is_some())
            .map(|(i, slot)| NoteHandle { index: i as u32, generation: slot.generation })
            .collect()
    }

    pub fn notes(&self) -> impl Iterator<Item = (NoteHandle, &StageNote)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.note.as_ref().map(|note| {
                (
                    NoteHandle { index: i as u32, generation: slot.generation },
                    note,
                )
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.note.is_none())
    }

    /// Recomputes hit-zone membership for every live note and returns one
    /// transition event per crossing since the previous sweep.
    pub fn sweep_zone_transitions(&mut self) -> Vec<StageEvent> {
        let mut events = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(note) = slot.note.as_mut() else { continue };
            let inside = (note.position.y - HIT_ZONE_CENTER_Y).abs() <= HIT_ZONE_HALF_HEIGHT;
            if inside != note.in_zone {
                note.in_zone = inside;
                let handle = NoteHandle { index: i as u32, generation: slot.generation };
                events.push(if inside {
                    StageEvent::ZoneEntered(handle)
                } else {
                    StageEvent::ZoneExited(handle)
                });
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::{HIT_ZONE_CENTER_Y, HIT_ZONE_HALF_HEIGHT, Stage, StageEvent};
    use crate::game::chart::NoteColor;
    use glam::Vec2;

    #[test]
    fn despawn_is_idempotent_and_invalidates_the_handle() {
        let mut stage = Stage::new();
        let h = stage.spawn(NoteColor::Red, Vec2::new(385.0, -100.0));
        assert!(stage.note(h).is_some());
        assert!(stage.despawn(h));
        assert!(!stage.despawn(h), "second despawn must be a no-op");
        assert!(stage.note(h).is_none());
        assert!(stage.is_empty());
    }

    #[test]
    fn reused_slot_does_not_resurrect_old_handles() {
        let mut stage = Stage::new();
        let old = stage.spawn(NoteColor::Red, Vec2::ZERO);
        stage.despawn(old);
        let new = stage.spawn(NoteColor::Blue, Vec2::ZERO);
        assert!(stage.note(old).is_none(), "stale handle must stay dead");
        assert_eq!(stage.note(new).map(|n| n.color), Some(NoteColor::Blue));
        stage.translate(old, Vec2::new(0.0, 50.0));
        assert_eq!(stage.note(new).map(|n| n.position.y), Some(0.0));
    }

    #[test]
    fn sweep_reports_each_zone_crossing_once() {
        let mut stage = Stage::new();
        let h = stage.spawn(NoteColor::Green, Vec2::new(641.0, 0.0));
        assert!(stage.sweep_zone_transitions().is_empty());

        stage.translate(h, Vec2::new(0.0, HIT_ZONE_CENTER_Y));
        assert_eq!(stage.sweep_zone_transitions(), vec![StageEvent::ZoneEntered(h)]);
        assert!(stage.sweep_zone_transitions().is_empty(), "no event while inside");

        stage.translate(h, Vec2::new(0.0, HIT_ZONE_HALF_HEIGHT + 1.0));
        assert_eq!(stage.sweep_zone_transitions(), vec![StageEvent::ZoneExited(h)]);
    }
}
