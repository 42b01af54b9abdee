use std::fmt;

/// Side that delivered mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    White,
    Black,
}

/// Game status as reported by the rules engine after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Winner },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
    /// The engine produced no legal moves but did not report a terminal state.
    NoLegalMoves,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("in progress"),
            Self::Checkmate {
                winner: Winner::White,
            } => f.write_str("white won by checkmate"),
            Self::Checkmate {
                winner: Winner::Black,
            } => f.write_str("black won by checkmate"),
            Self::Stalemate => f.write_str("stalemate"),
            Self::InsufficientMaterial => f.write_str("draw by insufficient material"),
            Self::FiftyMoveRule => f.write_str("draw by fifty-move rule"),
            Self::ThreefoldRepetition => f.write_str("draw by threefold repetition"),
            Self::NoLegalMoves => f.write_str("no legal moves"),
        }
    }
}

/// A freshly generated game with its full SAN move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullGame {
    pub seed: u64,
    pub moves: Vec<String>,
    pub status: GameStatus,
}

impl FullGame {
    pub fn half_moves(&self) -> usize {
        self.moves.len()
    }
}

/// A game loaded from the move log without replaying it through the engine.
///
/// `length` is the declared half-move count of the stored line; `moves` is the
/// stored SAN text, already checked to hold exactly `length` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubGame {
    pub seed: u64,
    pub length: usize,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameRecord {
    Stub(StubGame),
    Full(FullGame),
}

impl GameRecord {
    pub fn seed(&self) -> u64 {
        match self {
            Self::Stub(stub) => stub.seed,
            Self::Full(game) => game.seed,
        }
    }

    pub fn half_moves(&self) -> usize {
        match self {
            Self::Stub(stub) => stub.length,
            Self::Full(game) => game.half_moves(),
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub(_))
    }

    /// Absolute distance between this game's length and `target`.
    pub fn distance_to(&self, target: u32) -> usize {
        self.half_moves().abs_diff(target as usize)
    }
}
