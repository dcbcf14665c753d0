// This file is part of the gambit library.
// Copyright (C) 2024 The gambit developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Turn control.
//!
//! # Examples
//!
//! ```
//! use gambit::{Color, Config, Game, Square, Status};
//!
//! let mut game = Game::new(Config::default());
//! for (from, to) in [
//!     (Square::F2, Square::F3),
//!     (Square::E7, Square::E5),
//!     (Square::G2, Square::G4),
//!     (Square::D8, Square::H4),
//! ] {
//!     game.play(from, to)?;
//! }
//! assert_eq!(game.status(), Status::Checkmate { winner: Color::Black });
//! # Ok::<_, gambit::PlayError>(())
//! ```

use std::{error::Error, fmt};

use tracing::{debug, info, trace};

use crate::{
    attempt::{EngineError, MoveAttempt, Rejection},
    color::Color,
    movegen::LegalMoves,
    piece::PieceId,
    position::Position,
    setup::{Setup, SetupError},
    square::{Offset, Square},
};

/// Game configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of half-moves after which the game is drawn.
    pub turn_limit: u32,
    /// Trace the evaluation of every submitted move.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            turn_limit: 200,
            verbose: false,
        }
    }
}

/// State of a game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    Ongoing,
    Checkmate { winner: Color },
    DrawByTurnLimit,
}

impl Status {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Status::Ongoing)
    }
}

/// A move applied by [`Game::play()`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Played {
    pub attempt: MoveAttempt,
    /// Number of half-moves played, including this one.
    pub turn: u32,
    /// The moved piece attacks the enemy king.
    pub check: bool,
    pub checkmate: bool,
}

/// Error when a move is not played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlayError {
    /// The move is illegal.
    Rejected(Rejection),
    /// No piece stands on the origin square.
    EmptySquare(Square),
    /// The piece belongs to the side not to move, or has been captured.
    NotYourPiece(PieceId),
    /// The game has ended.
    GameOver(Status),
    Engine(EngineError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::Rejected(rejection) => write!(f, "illegal move: {rejection}"),
            PlayError::EmptySquare(square) => write!(f, "no piece on {square}"),
            PlayError::NotYourPiece(_) => f.write_str("piece cannot be moved by the side to move"),
            PlayError::GameOver(_) => f.write_str("game is over"),
            PlayError::Engine(err) => write!(f, "engine error: {err}"),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayError::Rejected(rejection) => Some(rejection),
            PlayError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EngineError> for PlayError {
    fn from(err: EngineError) -> PlayError {
        PlayError::Engine(err)
    }
}

/// A game: a position, the side to move, and the turn counter.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    turn: Color,
    turns: u32,
    check: bool,
    status: Status,
    config: Config,
}

impl Game {
    /// A game from the standard starting position, white to move.
    pub fn new(config: Config) -> Game {
        Game::with_position(Position::default(), Color::White, config)
    }

    /// A game from a custom layout.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the layout is not a playable position.
    pub fn from_setup(setup: &Setup, config: Config) -> Result<Game, SetupError> {
        Ok(Game::with_position(setup.position()?, setup.turn, config))
    }

    fn with_position(position: Position, turn: Color, config: Config) -> Game {
        Game {
            position,
            turn,
            turns: 0,
            check: false,
            status: Status::Ongoing,
            config,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Number of half-moves played.
    #[inline]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether the last move gave check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Legal moves of the side to move.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn legal_moves(&self) -> Result<LegalMoves, EngineError> {
        self.position.legal_moves(self.turn)
    }

    /// Plays the piece on `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move is not played. The game is then
    /// unchanged.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Played, PlayError> {
        let piece = self
            .position
            .piece_at(from)
            .ok_or(PlayError::EmptySquare(from))?;
        self.play_offset(piece, from.offset_to(to))
    }

    /// Displaces `piece` by `offset`.
    ///
    /// # Errors
    ///
    /// See [`Game::play()`].
    pub fn play_offset(&mut self, piece: PieceId, offset: Offset) -> Result<Played, PlayError> {
        if self.status.is_over() {
            return Err(PlayError::GameOver(self.status));
        }

        let label = match self.position.piece(piece) {
            Some(p) if p.is_active() && p.color == self.turn => p.label,
            _ => return Err(PlayError::NotYourPiece(piece)),
        };

        let attempt = self.position.evaluate(piece, offset)?;
        if self.config.verbose {
            trace!(
                piece = %label,
                from = %attempt.from,
                to = ?attempt.to,
                rejection = ?attempt.rejection,
                capture = ?attempt.capture,
                "evaluated move"
            );
        }

        if let Some(rejection) = attempt.rejection {
            debug!(piece = %label, %attempt, "rejected move");
            return Err(PlayError::Rejected(rejection));
        }

        self.position.play_unchecked(&attempt);
        self.turns += 1;
        self.turn = self.turn.other();
        debug!(piece = %label, %attempt, turn = self.turns, "played move");

        self.check = self.position.gives_check(piece)?;
        let checkmate = self.check && self.position.is_checkmate(self.turn)?;

        if checkmate {
            let winner = self.turn.other();
            info!(%winner, turn = self.turns, "checkmate");
            self.status = Status::Checkmate { winner };
        } else {
            if self.check {
                info!(color = %self.turn, turn = self.turns, "check");
            }
            if self.turns >= self.config.turn_limit {
                info!(turn = self.turns, "draw by turn limit");
                self.status = Status::DrawByTurnLimit;
            }
        }

        Ok(Played {
            attempt,
            turn: self.turns,
            check: self.check,
            checkmate,
        })
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing::Level;

    use super::*;
    use crate::attempt::Condition;

    #[test]
    fn test_wrong_side() {
        let mut game = Game::default();
        let pawn = game.position().piece_at(Square::E7).unwrap();
        assert_eq!(
            game.play(Square::E7, Square::E5),
            Err(PlayError::NotYourPiece(pawn))
        );
        assert_eq!(
            game.play(Square::E4, Square::E5),
            Err(PlayError::EmptySquare(Square::E4))
        );
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::default();
        let played = game.play(Square::E2, Square::E4).unwrap();
        assert_eq!(played.turn, 1);
        assert!(!played.check);
        assert_eq!(game.turn(), Color::Black);
        game.play(Square::E7, Square::E5).unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.turns(), 2);
    }

    #[test]
    fn test_second_double_step() {
        let mut game = Game::default();
        game.play(Square::A2, Square::A3).unwrap();
        game.play(Square::H7, Square::H6).unwrap();
        assert_eq!(
            game.play(Square::A3, Square::A5),
            Err(PlayError::Rejected(Rejection::Condition(Condition::OnFirst)))
        );
    }

    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Events {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(f: impl FnOnce()) -> String {
        let events = Events::default();
        let writer = events.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = events.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_events() {
        let mut game = Game::default();
        let log = captured(|| {
            game.play(Square::F2, Square::F3).unwrap();
            game.play(Square::E7, Square::E5).unwrap();
            assert!(game.play(Square::G2, Square::G5).is_err());
            game.play(Square::G2, Square::G4).unwrap();
            game.play(Square::D8, Square::H4).unwrap();
        });
        assert_eq!(log.matches("played move").count(), 4);
        assert_eq!(log.matches("rejected move").count(), 1);
        assert!(log.contains("checkmate"));
        assert!(!log.contains("evaluated move"));
    }

    #[test]
    fn test_verbose_trace() {
        let mut game = Game::new(Config {
            verbose: true,
            ..Config::default()
        });
        let log = captured(|| {
            game.play(Square::G1, Square::F3).unwrap();
        });
        assert_eq!(log.matches("evaluated move").count(), 1);
        assert!(log.contains("played move"));
        assert!(log.contains("TRACE"));
    }
}
