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

use std::{error::Error, fmt};

use crate::{
    piece::PieceId,
    role::Role,
    square::{Offset, Square},
};

/// A piece removed from play by a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Capture {
    pub piece: PieceId,
    /// Where the captured piece stood. Differs from the destination only
    /// for en passant.
    pub square: Square,
}

/// The evaluated candidate of displacing a piece.
///
/// An attempt is legal iff [`rejection`](MoveAttempt::rejection) is `None`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveAttempt {
    pub piece: PieceId,
    pub offset: Offset,
    pub from: Square,
    /// Destination, or `None` if the displacement is not a shape of the
    /// piece or leaves the board.
    pub to: Option<Square>,
    pub rejection: Option<Rejection>,
    pub capture: Option<Capture>,
}

impl MoveAttempt {
    #[inline]
    pub const fn is_legal(&self) -> bool {
        self.rejection.is_none()
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Converts into a `Result`, keeping a legal attempt or its rejection.
    pub fn legal(self) -> Result<MoveAttempt, Rejection> {
        match self.rejection {
            Some(rejection) => Err(rejection),
            None => Ok(self),
        }
    }
}

impl fmt::Display for MoveAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{}{}", self.from, to)?,
            None => write!(f, "{} by {}", self.from, self.offset)?,
        }
        if let Some(rejection) = self.rejection {
            write!(f, " ({rejection})")?;
        }
        Ok(())
    }
}

/// Squares standing in the way of a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Blocked {
    /// A piece on the path, or a piece of the mover's own team on the
    /// destination.
    General { square: Square },
    /// An enemy piece straight ahead of a pawn.
    PawnForward { square: Square },
    /// A piece of the knight's own team on its destination.
    Knight { square: Square },
}

impl Blocked {
    pub const fn square(self) -> Square {
        match self {
            Blocked::General { square }
            | Blocked::PawnForward { square }
            | Blocked::Knight { square } => square,
        }
    }
}

/// Tag of a template entry that did not hold.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Condition {
    /// The piece has already moved.
    OnFirst,
    /// The destination is empty.
    OnTake,
    /// No enemy pawn can be taken en passant.
    EnPassant,
}

/// Reasons for a move to be illegal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Rejection {
    /// No template entry has this displacement.
    Shape,
    /// The destination lies outside of the board.
    OutOfBounds { rank: i8, file: i8 },
    PathBlocked(Blocked),
    Condition(Condition),
    /// The move would leave the mover's king attacked by `attacker`.
    KingExposed {
        attacker: PieceId,
        role: Role,
        square: Square,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Rejection::Shape => f.write_str("piece cannot move that way"),
            Rejection::OutOfBounds { rank, file } => {
                write!(f, "destination rank {rank} file {file} is off the board")
            }
            Rejection::PathBlocked(Blocked::General { square }) => {
                write!(f, "path blocked at {square}")
            }
            Rejection::PathBlocked(Blocked::PawnForward { square }) => {
                write!(f, "pawn cannot take straight ahead on {square}")
            }
            Rejection::PathBlocked(Blocked::Knight { square }) => {
                write!(f, "knight blocked by own piece on {square}")
            }
            Rejection::Condition(Condition::OnFirst) => {
                f.write_str("only allowed as the first move of the piece")
            }
            Rejection::Condition(Condition::OnTake) => f.write_str("only allowed when capturing"),
            Rejection::Condition(Condition::EnPassant) => {
                f.write_str("no pawn to take en passant")
            }
            Rejection::KingExposed { role, square, .. } => {
                write!(f, "king would be attacked by the {role} on {square}")
            }
        }
    }
}

impl Error for Rejection {}

/// Violation of an internal invariant while evaluating a move.
///
/// These indicate a bug rather than an illegal move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EngineError {
    /// No one-square step of the template stays on the board.
    NoStep { piece: PieceId, square: Square },
    /// The destination was not reached within eight steps.
    PathExhausted { piece: PieceId, from: Square, to: Square },
    /// The piece does not exist or has been captured.
    NotInPlay { piece: PieceId },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EngineError::NoStep { piece, square } => {
                write!(f, "no step on the board for piece {piece} at {square}")
            }
            EngineError::PathExhausted { piece, from, to } => {
                write!(f, "path of piece {piece} from {from} to {to} exhausted")
            }
            EngineError::NotInPlay { piece } => write!(f, "piece {piece} is not in play"),
        }
    }
}

impl Error for EngineError {}
