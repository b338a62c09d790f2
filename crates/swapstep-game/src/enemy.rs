//! Enemy registry
//!
//! Enemies live in generational slots. The teleport sequencer and the camera
//! hold `EnemyHandle`s, which go stale the moment an enemy is unregistered,
//! so nothing ever reaches a destroyed enemy.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use swapstep_core::Facing;
use tracing::trace;

/// A generational enemy handle
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyHandle {
    index: u32,
    generation: u32,
}

impl EnemyHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for EnemyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enemy({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EnemyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Melee walker
    Skeleton,
    /// Ranged caster that keeps turning toward the player
    Wizard,
}

impl EnemyKind {
    pub fn always_faces_player(self) -> bool {
        matches!(self, EnemyKind::Wizard)
    }
}

/// A live enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Feet position
    pub position: Vec2,
    pub facing: Facing,
    /// Touching this circle kills the player. It rests on the feet.
    pub contact_radius: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            facing: Facing::Left,
            contact_radius: 0.5,
        }
    }

    pub fn with_contact_radius(mut self, radius: f32) -> Self {
        self.contact_radius = radius.max(0.0);
        self
    }

    pub fn always_faces_player(&self) -> bool {
        self.kind.always_faces_player()
    }

    pub fn contact_center(&self) -> Vec2 {
        self.position + Vec2::new(0.0, self.contact_radius)
    }

    /// Turn toward a player standing at `player_x`
    pub fn face_toward(&mut self, player_x: f32) {
        self.facing = Facing::toward(self.position.x, player_x);
    }
}

struct Slot {
    generation: u32,
    enemy: Option<Enemy>,
}

/// Every enemy currently in the level
#[derive(Default)]
pub struct EnemyRegistry {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    len: usize,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy, reusing a freed slot if available
    pub fn register(&mut self, enemy: Enemy) -> EnemyHandle {
        self.len += 1;
        let handle = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.enemy = Some(enemy);
            EnemyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                enemy: Some(enemy),
            });
            EnemyHandle {
                index,
                generation: 0,
            }
        };
        trace!("Registered enemy {}", handle);
        handle
    }

    /// Remove an enemy. Returns it if the handle was still live.
    pub fn unregister(&mut self, handle: EnemyHandle) -> Option<Enemy> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let enemy = slot.enemy.take()?;
        slot.generation += 1;
        self.free_list.push(handle.index);
        self.len -= 1;
        trace!("Unregistered enemy {}", handle);
        Some(enemy)
    }

    pub fn contains(&self, handle: EnemyHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: EnemyHandle) -> Option<&Enemy> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.enemy.as_ref())
    }

    pub fn get_mut(&mut self, handle: EnemyHandle) -> Option<&mut Enemy> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.enemy.as_mut())
    }

    /// Live enemies with their handles
    pub fn iter(&self) -> impl Iterator<Item = (EnemyHandle, &Enemy)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.enemy.as_ref().map(|enemy| {
                (
                    EnemyHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    enemy,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EnemyHandle, &mut Enemy)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.enemy.as_mut().map(|enemy| {
                (
                    EnemyHandle {
                        index: index as u32,
                        generation,
                    },
                    enemy,
                )
            })
        })
    }

    /// The live enemy closest to `point`, with its distance
    pub fn nearest(&self, point: Vec2) -> Option<(EnemyHandle, f32)> {
        self.iter()
            .map(|(handle, enemy)| (handle, enemy.position.distance(point)))
            .fold(None, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
