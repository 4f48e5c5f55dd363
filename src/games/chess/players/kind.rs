//! Player kinds as named in match configuration.

use super::{HumanPlayer, MachinePlayer, Player, Strategy};
use crate::games::chess::Side;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// The kind of player configured for a side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// A person clicking on the board.
    Human,
    /// Machine picking uniformly among legal moves.
    Random,
    /// Machine preferring the most valuable capture.
    Greedy,
    /// Machine playing the first legal move.
    First,
}

impl PlayerKind {
    /// Builds the player for `side`. `seed` fixes the generator of
    /// random machines.
    #[instrument]
    pub fn build(self, side: Side, seed: Option<u64>) -> Box<dyn Player> {
        let name = format!("{} ({})", side, self);
        info!(%name, "Creating player");
        let strategy = match self {
            PlayerKind::Human => return Box::new(HumanPlayer::new(name, side)),
            PlayerKind::Random => Strategy::Random,
            PlayerKind::Greedy => Strategy::Greedy,
            PlayerKind::First => Strategy::First,
        };
        match seed {
            Some(seed) => Box::new(MachinePlayer::seeded(name, side, strategy, seed)),
            None => Box::new(MachinePlayer::new(name, side, strategy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::players::PlayerType;
    use std::str::FromStr;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(PlayerKind::from_str("Human"), Ok(PlayerKind::Human));
        assert_eq!(PlayerKind::from_str("GREEDY"), Ok(PlayerKind::Greedy));
        assert!(PlayerKind::from_str("stockfish").is_err());
    }

    #[test]
    fn test_build_matches_kind() {
        let human = PlayerKind::Human.build(Side::White, None);
        assert_eq!(human.kind(), PlayerType::Human);
        assert_eq!(human.side(), Side::White);
        assert_eq!(human.name(), "white (human)");

        let machine = PlayerKind::Random.build(Side::Black, Some(3));
        assert_eq!(machine.kind(), PlayerType::Machine);
        assert_eq!(machine.side(), Side::Black);
    }
}
