use core::fmt;
use serde::{Deserialize, Serialize};

/// What the player knows about a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Knowledge {
    Hidden,
    Flagged,
    Stepped,
}

impl Knowledge {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_stepped(self) -> bool {
        matches!(self, Self::Stepped)
    }
}

impl Default for Knowledge {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Hidden truth of a cell, fixed once mines are placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTruth {
    pub has_mine: bool,
    pub mine_neighbors: u8,
}

impl CellTruth {
    /// Safe cell with no mined neighbors.
    pub const fn is_bare(self) -> bool {
        !self.has_mine && self.mine_neighbors == 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndState {
    Victory,
    Defeat,
}

impl EndState {
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory)
    }
}

impl fmt::Display for EndState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => f.write_str("victory"),
            Self::Defeat => f.write_str("defeat"),
        }
    }
}
