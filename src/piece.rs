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

use std::fmt;

use crate::{color::Color, role::Role, square::Square, template::Template};

/// Identifies a piece in the registry of a [`Position`](crate::Position).
///
/// Identities are assigned once per game, in square order, and stay valid
/// after the piece is captured.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Human-facing name of a piece, such as `wK`, `bQ`, `wp1` or `bR2`.
///
/// The ordinal counts pieces of the same team and type in square order. It is
/// omitted when the team starts with a single piece of that type.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Label {
    pub color: Color,
    pub role: Role,
    pub ordinal: Option<u8>,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.label_char())?;
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        Ok(())
    }
}

/// A registered piece and its state.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub square: Square,
    /// Number of moves applied to this piece.
    pub moves: u32,
    pub captured: bool,
    pub label: Label,
}

impl Piece {
    #[inline]
    pub fn template(&self) -> Template {
        Template::new(self.role, self.color)
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        !self.captured
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {}) on {}", self.label, self.color, self.role, self.square)
    }
}
