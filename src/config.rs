//! Game setup as read from a front end.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::strategy::{Strategy, StrategyKind};
use crate::topology::Topology;
use crate::types::Player;

/// Who makes the moves for one side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    #[default]
    Human,
    /// Strategies are tried in order until one yields a move.
    Computer {
        #[serde(default)]
        strategies: Vec<StrategyKind>,
    },
}

impl PlayerKind {
    /// The composed strategy of a computer player, `None` for humans.
    pub fn strategy(&self) -> Option<Box<dyn Strategy>> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Computer { strategies } => Some(StrategyKind::chain(strategies)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub topology: Topology,
    pub width: usize,
    pub black: PlayerKind,
    pub white: PlayerKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Hex,
            width: 7,
            black: PlayerKind::Human,
            white: PlayerKind::Human,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.topology.is_valid_width(self.width) {
            Ok(())
        } else {
            Err(GameError::InvalidWidth {
                topology: self.topology,
                width: self.width,
            })
        }
    }

    pub fn player(&self, player: Player) -> &PlayerKind {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }
}
