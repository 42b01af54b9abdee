//! Rules engine adapter.
//!
//! The generator only needs a handful of capabilities from a chess library:
//! list legal moves, give each a stable ordering key, render SAN, apply a move
//! and report the resulting status. [`ShakmatyEngine`] provides them on top of
//! `shakmaty`; tests plug in smaller engines through the same traits.

use std::collections::HashMap;

use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, PlayError, Position, fen::Fen,
    san::SanPlus,
};

use super::error::EngineError;
use super::types::{GameStatus, Winner};

/// Factory for fresh games at the standard starting position.
pub trait RulesEngine {
    type Game: GameState;

    fn new_game(&self) -> Self::Game;
}

/// A game in progress.
pub trait GameState {
    type Move;

    /// Legal moves from the current position, in engine order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Ordering key used to put the legal moves into a total order.
    fn move_key(&self, mv: &Self::Move) -> String;

    /// Standard algebraic notation of `mv` relative to the current position.
    fn notate(&self, mv: &Self::Move) -> String;

    /// Plays `mv` and returns the status of the resulting position.
    fn apply_move(&mut self, mv: Self::Move) -> Result<GameStatus, EngineError>;

    fn status(&self) -> GameStatus;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyEngine;

impl RulesEngine for ShakmatyEngine {
    type Game = ShakmatyGame;

    fn new_game(&self) -> ShakmatyGame {
        ShakmatyGame::new(Chess::default())
    }
}

/// Standard chess game backed by `shakmaty`, with repetition tracking.
#[derive(Debug, Clone)]
pub struct ShakmatyGame {
    pos: Chess,
    repetitions: HashMap<String, u8>,
    status: GameStatus,
}

impl ShakmatyGame {
    pub fn new(pos: Chess) -> Self {
        let mut game = Self {
            pos,
            repetitions: HashMap::new(),
            status: GameStatus::InProgress,
        };
        game.record_position();
        game.status = game.evaluate_status();
        game
    }

    fn record_position(&mut self) {
        *self
            .repetitions
            .entry(repetition_key(&self.pos))
            .or_insert(0) += 1;
    }

    fn occurrences(&self) -> u8 {
        self.repetitions
            .get(&repetition_key(&self.pos))
            .copied()
            .unwrap_or(0)
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.pos.is_checkmate() {
            let winner = match self.pos.turn() {
                Color::White => Winner::Black,
                Color::Black => Winner::White,
            };
            return GameStatus::Checkmate { winner };
        }
        if self.pos.is_stalemate() {
            return GameStatus::Stalemate;
        }
        if self.pos.is_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }
        if self.pos.halfmoves() >= 100 {
            return GameStatus::FiftyMoveRule;
        }
        if self.occurrences() >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
        GameStatus::InProgress
    }
}

impl GameState for ShakmatyGame {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().into_iter().collect()
    }

    fn move_key(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    fn notate(&self, mv: &Move) -> String {
        SanPlus::from_move(self.pos.clone(), *mv).to_string()
    }

    fn apply_move(&mut self, mv: Move) -> Result<GameStatus, EngineError> {
        self.pos = match std::mem::take(&mut self.pos).play(mv) {
            Ok(next) => next,
            Err(PlayError { m, position }) => {
                let err = EngineError {
                    mv: m.to_uci(CastlingMode::Standard).to_string(),
                    reason: format!(
                        "not legal in {}",
                        Fen::from_position(&position, EnPassantMode::Legal)
                    ),
                };
                self.pos = position;
                return Err(err);
            }
        };
        self.record_position();
        self.status = self.evaluate_status();
        Ok(self.status)
    }

    fn status(&self) -> GameStatus {
        self.status
    }
}

/// FEN without the move counters: board, side to move, castling, en passant.
fn repetition_key(pos: &Chess) -> String {
    let fen = Fen::from_position(pos, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Take-away game: a pile of `stones`, each move removes 1 to 3 of them.
    ///
    /// `fail_at_ply` makes `apply_move` fail once that many moves were played.
    #[derive(Debug, Clone, Copy)]
    pub struct PileEngine {
        pub stones: u32,
        pub fail_at_ply: Option<usize>,
    }

    impl PileEngine {
        pub fn new(stones: u32) -> Self {
            Self {
                stones,
                fail_at_ply: None,
            }
        }
    }

    impl RulesEngine for PileEngine {
        type Game = PileGame;

        fn new_game(&self) -> PileGame {
            PileGame {
                stones: self.stones,
                ply: 0,
                fail_at_ply: self.fail_at_ply,
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct PileGame {
        stones: u32,
        ply: usize,
        fail_at_ply: Option<usize>,
    }

    impl GameState for PileGame {
        type Move = u32;

        fn legal_moves(&self) -> Vec<u32> {
            // Deliberately unsorted.
            (1..=self.stones.min(3)).rev().collect()
        }

        fn move_key(&self, mv: &u32) -> String {
            mv.to_string()
        }

        fn notate(&self, mv: &u32) -> String {
            format!("T{mv}")
        }

        fn apply_move(&mut self, mv: u32) -> Result<GameStatus, EngineError> {
            if self.fail_at_ply == Some(self.ply) || mv > self.stones {
                return Err(EngineError {
                    mv: mv.to_string(),
                    reason: format!("only {} stones left", self.stones),
                });
            }
            self.stones -= mv;
            self.ply += 1;
            Ok(self.status())
        }

        fn status(&self) -> GameStatus {
            if self.stones == 0 {
                GameStatus::Stalemate
            } else {
                GameStatus::InProgress
            }
        }
    }

    /// Engine whose game never offers a move yet never declares itself over.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StuckEngine;

    impl RulesEngine for StuckEngine {
        type Game = StuckGame;

        fn new_game(&self) -> StuckGame {
            StuckGame
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct StuckGame;

    impl GameState for StuckGame {
        type Move = ();

        fn legal_moves(&self) -> Vec<()> {
            Vec::new()
        }

        fn move_key(&self, _mv: &()) -> String {
            String::new()
        }

        fn notate(&self, _mv: &()) -> String {
            String::new()
        }

        fn apply_move(&mut self, _mv: ()) -> Result<GameStatus, EngineError> {
            Err(EngineError {
                mv: String::new(),
                reason: "no move was offered".into(),
            })
        }

        fn status(&self) -> GameStatus {
            GameStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_fen(fen: &str) -> ShakmatyGame {
        let setup: Fen = fen.parse().unwrap();
        let pos: Chess = setup.into_position(CastlingMode::Standard).unwrap();
        ShakmatyGame::new(pos)
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let game = ShakmatyEngine.new_game();
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_move_keys_are_uci() {
        let game = ShakmatyEngine.new_game();
        let mut keys: Vec<String> = game
            .legal_moves()
            .iter()
            .map(|mv| game.move_key(mv))
            .collect();
        keys.sort();
        assert_eq!(keys.first().map(String::as_str), Some("a2a3"));
        assert!(keys.iter().any(|k| k == "g1f3"));
    }

    #[test]
    fn test_notate_renders_san() {
        let game = ShakmatyEngine.new_game();
        let knight = game
            .legal_moves()
            .into_iter()
            .find(|mv| game.move_key(mv) == "g1f3")
            .unwrap();
        assert_eq!(game.notate(&knight), "Nf3");
    }

    #[test]
    fn test_fools_mate_reports_checkmate() {
        let mut game = ShakmatyEngine.new_game();
        let mut last = GameStatus::InProgress;
        let mut sans = Vec::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = game
                .legal_moves()
                .into_iter()
                .find(|mv| game.move_key(mv) == uci)
                .unwrap();
            sans.push(game.notate(&mv));
            last = game.apply_move(mv).unwrap();
        }
        assert_eq!(sans, ["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(
            last,
            GameStatus::Checkmate {
                winner: Winner::Black
            }
        );
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_position() {
        let game = from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_insufficient_material() {
        let game = from_fen("k7/8/8/8/8/8/8/1K6 w - - 0 1");
        assert_eq!(game.status(), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn test_fifty_move_rule() {
        let game = from_fen("k7/8/8/8/8/8/8/1KR5 w - - 100 80");
        assert_eq!(game.status(), GameStatus::FiftyMoveRule);
    }

    #[test]
    fn test_threefold_repetition_by_knight_shuffle() {
        let mut game = ShakmatyEngine.new_game();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let mut statuses = Vec::new();
        for uci in shuffle.iter().chain(shuffle.iter()) {
            let mv = game
                .legal_moves()
                .into_iter()
                .find(|mv| game.move_key(mv) == *uci)
                .unwrap();
            statuses.push(game.apply_move(mv).unwrap());
        }
        assert!(statuses[..7].iter().all(|s| *s == GameStatus::InProgress));
        assert_eq!(statuses[7], GameStatus::ThreefoldRepetition);
    }

    #[test]
    fn test_illegal_move_is_rejected_and_position_kept() {
        let mut game = ShakmatyEngine.new_game();
        let pawn = game
            .legal_moves()
            .into_iter()
            .find(|mv| game.move_key(mv) == "e2e4")
            .unwrap();
        game.apply_move(pawn).unwrap();

        let err = game.apply_move(pawn).unwrap_err();
        assert_eq!(err.mv, "e2e4");
        assert!(err.reason.contains(" b KQkq "));
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
