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

//! Chess move legality, check and checkmate detection.
//!
//! Moves are displacements of a piece, checked against the movement template
//! of its type, the occupancy of the squares along the way, conditional rules
//! such as the pawn's double step, and the safety of the mover's own king.
//!
//! # Examples
//!
//! Evaluate a candidate move:
//!
//! ```
//! use gambit::{Offset, Position, Square};
//!
//! let pos = Position::default();
//! let pawn = pos.piece_at(Square::A2).unwrap();
//!
//! let attempt = pos.evaluate(pawn, Offset::new(2, 0))?;
//! assert!(attempt.is_legal());
//! assert_eq!(attempt.to, Some(Square::A4));
//! # Ok::<_, gambit::EngineError>(())
//! ```
//!
//! Illegal moves carry the reason for their rejection:
//!
//! ```
//! use gambit::{Blocked, Offset, Position, Rejection, Square};
//!
//! let pos = Position::default();
//! let rook = pos.piece_at(Square::A1).unwrap();
//!
//! let attempt = pos.evaluate(rook, Offset::new(3, 0))?;
//! assert_eq!(
//!     attempt.rejection,
//!     Some(Rejection::PathBlocked(Blocked::General { square: Square::A2 }))
//! );
//! # Ok::<_, gambit::EngineError>(())
//! ```
//!
//! Play a game:
//!
//! ```
//! use gambit::{Config, Game, Square, Status};
//!
//! let mut game = Game::new(Config::default());
//! let played = game.play(Square::E2, Square::E4)?;
//! assert!(!played.check);
//! assert_eq!(game.status(), Status::Ongoing);
//! assert_eq!(game.legal_moves()?.len(), 20);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Castling, promotion, stalemate and draws other than by turn limit are not
//! supported.
//!
//! # Logging
//!
//! [`Game`] emits [`tracing`](https://docs.rs/tracing/0.1) events for
//! played and rejected moves, checks and game ends. No subscriber is
//! installed by this library.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for plain value types.

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

mod attempt;
mod color;
mod evaluate;
mod game;
mod movegen;
mod perft;
mod piece;
mod position;
mod role;
mod square;

pub mod bitboard;
pub mod board;
pub mod setup;
pub mod template;

pub use attempt::{Blocked, Capture, Condition, EngineError, MoveAttempt, Rejection};
pub use bitboard::Bitboard;
pub use board::Board;
pub use color::{ByColor, Color, ParseColorError};
pub use game::{Config, Game, PlayError, Played, Status};
pub use movegen::{LegalMoves, MoveList};
pub use perft::perft;
pub use piece::{Label, Piece, PieceId};
pub use position::{LastMove, Position, MAX_PIECES};
pub use role::Role;
pub use setup::{ParseSetupError, Setup, SetupError};
pub use square::{File, Offset, ParseSquareError, Rank, Square};
pub use template::{Tags, Template, TemplateMove};
