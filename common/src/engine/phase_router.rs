use crate::protocol::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Lobby,
    Game,
    Gallery,
    Loading,
}

impl From<Phase> for ViewMode {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Lobby => ViewMode::Lobby,
            Phase::Game => ViewMode::Game,
            Phase::Gallery => ViewMode::Gallery,
            Phase::Unknown => ViewMode::Loading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
}

impl PhaseTransition {
    pub fn enters_lobby(&self) -> bool {
        self.to == Phase::Lobby && self.from != Phase::Lobby
    }

    pub fn leaves_game(&self) -> bool {
        self.from == Phase::Game && self.to != Phase::Game
    }
}

/// Detects phase changes between consecutive snapshots. It never decides a
/// phase itself; it only compares what the server sent last time with what
/// it sent now.
#[derive(Debug)]
pub struct PhaseRouter {
    previous: Phase,
}

impl Default for PhaseRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseRouter {
    pub fn new() -> Self {
        Self { previous: Phase::Lobby }
    }

    pub fn observe(&mut self, phase: Phase) -> Option<PhaseTransition> {
        if phase == self.previous {
            return None;
        }
        let transition = PhaseTransition { from: self.previous, to: phase };
        self.previous = phase;
        Some(transition)
    }

    pub fn phase(&self) -> Phase {
        self.previous
    }

    pub fn view_mode(&self) -> ViewMode {
        self.previous.into()
    }
}
