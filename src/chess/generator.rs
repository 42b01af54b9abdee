use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use super::engine::{GameState, RulesEngine};
use super::error::GenerateError;
use super::types::{FullGame, GameStatus};

type LegalMoves<M> = SmallVec<[(String, M); 64]>;

/// Plays one uniformly random game to completion.
///
/// The random source depends on `seed` alone, and the legal moves are sorted
/// by their ordering key before each draw, so a given seed always yields the
/// same game for a given engine version.
pub fn generate<E: RulesEngine>(engine: &E, seed: u64) -> Result<FullGame, GenerateError> {
    let mut game = engine.new_game();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut moves = Vec::new();
    let mut status = game.status();

    while !status.is_terminal() {
        let mut legal: LegalMoves<_> = game
            .legal_moves()
            .into_iter()
            .map(|mv| (game.move_key(&mv), mv))
            .collect();

        if legal.is_empty() {
            status = match game.status() {
                GameStatus::InProgress => GameStatus::NoLegalMoves,
                terminal => terminal,
            };
            break;
        }

        legal.sort_by(|a, b| a.0.cmp(&b.0));
        let index = rng.random_range(0..legal.len());
        let (_, mv) = legal.swap_remove(index);

        let san = game.notate(&mv);
        status = game
            .apply_move(mv)
            .map_err(|source| GenerateError::Engine {
                seed,
                ply: moves.len(),
                source,
            })?;
        moves.push(san);
    }

    log::debug!(
        "Game #{seed} finished after {} half-moves: {status}",
        moves.len()
    );

    Ok(FullGame {
        seed,
        moves,
        status,
    })
}
