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

//! Custom board layouts.
//!
//! Layouts are written in the board part of Forsyth-Edwards notation,
//! optionally followed by the side to move.
//!
//! # Examples
//!
//! ```
//! use gambit::{Color, Role, Setup, Square};
//!
//! let setup: Setup = "4k3/8/8/8/8/8/4P3/4K3 b".parse()?;
//! assert_eq!(setup.turn, Color::Black);
//! assert_eq!(setup.get(Square::E2), Some((Color::White, Role::Pawn)));
//! assert_eq!(setup.to_string(), "4k3/8/8/8/8/8/4P3/4K3 b");
//!
//! let pos = setup.position()?;
//! assert_eq!(pos.active(Color::White).count(), 2);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, fmt::Write as _, str::FromStr};

use crate::{
    color::{ByColor, Color},
    position::Position,
    role::Role,
    square::{File, Rank, Square},
};

/// Maximum number of pieces per team.
pub const MAX_PIECES_PER_TEAM: usize = 16;

/// A not necessarily legal layout: what stands on each square, and whose
/// turn it is.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    squares: [Option<(Color, Role)>; 64],
    /// Side to move.
    pub turn: Color,
}

impl Setup {
    pub const fn empty() -> Setup {
        Setup {
            squares: [None; 64],
            turn: Color::White,
        }
    }

    #[inline]
    pub const fn get(&self, sq: Square) -> Option<(Color, Role)> {
        self.squares[sq.index()]
    }

    pub fn put(&mut self, sq: Square, color: Color, role: Role) {
        self.squares[sq.index()] = Some((color, role));
    }

    pub fn remove(&mut self, sq: Square) -> Option<(Color, Role)> {
        self.squares[sq.index()].take()
    }

    /// Occupied squares from `A1` to `H8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Role)> + '_ {
        Square::iter().filter_map(move |sq| self.get(sq).map(|(color, role)| (sq, color, role)))
    }

    /// Validates the layout and builds a [`Position`] from it.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if a team has no king or more than one, more
    /// than 16 pieces, a pawn on the first or last rank, or if the side not
    /// to move is in check.
    pub fn position(&self) -> Result<Position, SetupError> {
        let mut pieces = ByColor::<usize>::default();
        let mut kings = ByColor::<usize>::default();
        for (sq, color, role) in self.pieces() {
            *pieces.get_mut(color) += 1;
            if role == Role::King {
                *kings.get_mut(color) += 1;
            }
            if role == Role::Pawn && matches!(sq.rank(), Rank::First | Rank::Eighth) {
                return Err(SetupError::PawnsOnBackrank);
            }
        }

        if pieces.find(|&n| n > MAX_PIECES_PER_TEAM).is_some() {
            return Err(SetupError::TooManyPieces);
        }
        if kings.find(|&n| n == 0).is_some() {
            return Err(SetupError::NoKing);
        }
        if kings.find(|&n| n > 1).is_some() {
            return Err(SetupError::TooManyKings);
        }

        let pos = Position::from_setup_unchecked(self);
        if !matches!(pos.is_check(self.turn.other()), Ok(false)) {
            return Err(SetupError::OppositeCheck);
        }
        Ok(pos)
    }
}

/// Whether `sq` is where the standard layout places a piece of this team and
/// type.
pub(crate) fn is_home_square(sq: Square, color: Color, role: Role) -> bool {
    if role == Role::Pawn {
        return sq.rank() == color.pawn_rank();
    }
    sq.rank() == color.backrank()
        && match role {
            Role::Rook => matches!(sq.file(), File::A | File::H),
            Role::Knight => matches!(sq.file(), File::B | File::G),
            Role::Bishop => matches!(sq.file(), File::C | File::F),
            Role::Queen => sq.file() == File::D,
            Role::King => sq.file() == File::E,
            Role::Pawn => false,
        }
}

impl Default for Setup {
    /// The standard starting layout, white to move.
    fn default() -> Setup {
        const OFFICERS: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut setup = Setup::empty();
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(OFFICERS) {
                setup.put(Square::from_coords(file, color.backrank()), color, role);
                setup.put(Square::from_coords(file, color.pawn_rank()), color, Role::Pawn);
            }
        }
        setup
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Setup").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.get(Square::from_coords(file, rank)) {
                    Some((color, role)) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        f.write_char(color.fold(role.upper_char(), role.char()))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > Rank::First {
                f.write_str("/")?;
            }
        }
        write!(f, " {}", self.turn.char())
    }
}

/// Error when parsing a malformed layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseSetupError {
    InvalidBoard,
    InvalidTurn,
}

impl fmt::Display for ParseSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseSetupError::InvalidBoard => "invalid board part in layout",
            ParseSetupError::InvalidTurn => "invalid turn part in layout",
        })
    }
}

impl Error for ParseSetupError {}

impl Setup {
    fn parse_board(&mut self, board: &str) -> Result<(), ParseSetupError> {
        let mut rank = Rank::ALL.len();
        let mut file = 0;

        for ch in board.chars() {
            if ch == '/' {
                if file != 8 || rank <= 1 {
                    return Err(ParseSetupError::InvalidBoard);
                }
                rank -= 1;
                file = 0;
            } else if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) || file + empty as usize > 8 {
                    return Err(ParseSetupError::InvalidBoard);
                }
                file += empty as usize;
            } else {
                let role = Role::from_char(ch).ok_or(ParseSetupError::InvalidBoard)?;
                let color = Color::from_white(ch.is_ascii_uppercase());
                if file >= 8 {
                    return Err(ParseSetupError::InvalidBoard);
                }
                self.put(
                    Square::from_coords(File::ALL[file], Rank::ALL[rank - 1]),
                    color,
                    role,
                );
                file += 1;
            }
        }

        if file != 8 || rank != 1 {
            return Err(ParseSetupError::InvalidBoard);
        }
        Ok(())
    }
}

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Setup, ParseSetupError> {
        let mut parts = s.split_ascii_whitespace();
        let mut setup = Setup::empty();

        setup.parse_board(parts.next().ok_or(ParseSetupError::InvalidBoard)?)?;

        setup.turn = match parts.next() {
            Some(turn) => turn.parse().map_err(|_| ParseSetupError::InvalidTurn)?,
            None => Color::White,
        };

        if parts.next().is_some() {
            return Err(ParseSetupError::InvalidTurn);
        }
        Ok(setup)
    }
}

/// Reasons for a [`Setup`] not being a playable position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetupError {
    /// A team has no king.
    NoKing,
    /// A team has more than one king.
    TooManyKings,
    /// A team has more than 16 pieces.
    TooManyPieces,
    /// A pawn stands on the first or last rank.
    PawnsOnBackrank,
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetupError::NoKing => "missing king",
            SetupError::TooManyKings => "too many kings",
            SetupError::TooManyPieces => "too many pieces",
            SetupError::PawnsOnBackrank => "pawns on backrank",
            SetupError::OppositeCheck => "opponent is in check",
        })
    }
}

impl Error for SetupError {}
