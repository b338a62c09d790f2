//! Locomotion states and their published flags

use std::fmt;

/// Every locomotion state the player can be in. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Before the level has started
    #[default]
    None,
    Idle,
    Run,
    Crouch,
    Jump,
    Fall,
    Attack,
    JumpAttack,
    CrouchAttack,
    PreTeleport,
    Teleport,
    Dead,
}

impl PlayerState {
    pub const COUNT: usize = 12;

    pub const ALL: [PlayerState; Self::COUNT] = [
        PlayerState::None,
        PlayerState::Idle,
        PlayerState::Run,
        PlayerState::Crouch,
        PlayerState::Jump,
        PlayerState::Fall,
        PlayerState::Attack,
        PlayerState::JumpAttack,
        PlayerState::CrouchAttack,
        PlayerState::PreTeleport,
        PlayerState::Teleport,
        PlayerState::Dead,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// States that use the crouching hitbox
    pub fn is_crouching(self) -> bool {
        matches!(self, PlayerState::Crouch | PlayerState::CrouchAttack)
    }

    pub fn is_teleporting(self) -> bool {
        matches!(self, PlayerState::PreTeleport | PlayerState::Teleport)
    }

    /// States in which a jump request is dropped
    pub fn blocks_jump(self) -> bool {
        matches!(
            self,
            PlayerState::Attack
                | PlayerState::JumpAttack
                | PlayerState::PreTeleport
                | PlayerState::Teleport
        )
    }

    /// States in which the horizontal controller does not run
    pub fn locks_horizontal(self) -> bool {
        matches!(
            self,
            PlayerState::Attack
                | PlayerState::CrouchAttack
                | PlayerState::PreTeleport
                | PlayerState::Teleport
        )
    }

    /// Animator flag name
    pub fn name(self) -> &'static str {
        match self {
            PlayerState::None => "none",
            PlayerState::Idle => "idle",
            PlayerState::Run => "run",
            PlayerState::Crouch => "crouch",
            PlayerState::Jump => "jump",
            PlayerState::Fall => "fall",
            PlayerState::Attack => "attack",
            PlayerState::JumpAttack => "jump_attack",
            PlayerState::CrouchAttack => "crouch_attack",
            PlayerState::PreTeleport => "pre_teleport",
            PlayerState::Teleport => "teleport",
            PlayerState::Dead => "dead",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One boolean per state, as handed to the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFlags([bool; PlayerState::COUNT]);

impl StateFlags {
    /// Flags with only `state` set
    pub fn one_hot(state: PlayerState) -> Self {
        let mut flags = [false; PlayerState::COUNT];
        flags[state.index()] = true;
        Self(flags)
    }

    pub fn get(&self, state: PlayerState) -> bool {
        self.0[state.index()]
    }

    /// The first set flag
    pub fn active(&self) -> PlayerState {
        PlayerState::ALL
            .into_iter()
            .find(|state| self.get(*state))
            .unwrap_or_default()
    }

    pub fn count_set(&self) -> usize {
        self.0.iter().filter(|flag| **flag).count()
    }

    /// `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        PlayerState::ALL
            .into_iter()
            .map(move |state| (state.name(), self.get(state)))
    }
}
