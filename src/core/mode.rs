/// Top-level screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Menu,
    Settings,
    Playing,
    Paused,
    Combat,
    Transition,
    GameOver,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal mode transition {from:?} -> {to:?}")]
pub struct ModeTransitionError {
    pub from: GameMode,
    pub to: GameMode,
}

impl GameMode {
    /// Every transition the game is allowed to make.
    pub fn can_transition_to(self, to: GameMode) -> bool {
        use GameMode::*;
        matches!(
            (self, to),
            (Menu, Playing)
                | (Menu, Settings)
                | (Settings, Menu)
                | (Playing, Paused)
                | (Playing, Combat)
                | (Playing, Transition)
                | (Playing, Victory)
                | (Paused, Playing)
                | (Paused, Menu)
                | (Combat, Playing)
                | (Combat, Transition)
                | (Combat, GameOver)
                | (Transition, Playing)
                | (Transition, Victory)
                | (GameOver, Menu)
                | (Victory, Menu)
        )
    }

    /// Modes that belong to a run in progress and advance its clock.
    pub fn is_run_clock_running(self) -> bool {
        matches!(
            self,
            GameMode::Playing | GameMode::Paused | GameMode::Combat | GameMode::Transition
        )
    }

    /// Modes that end a run and ask for a name.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameMode::GameOver | GameMode::Victory)
    }
}
