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

//! Movement templates.
//!
//! A template is the ordered list of displacements a piece type may attempt,
//! each optionally guarded by [`Tags`]. Tables are stored in white's
//! orientation; [`Template`] flips them for black.
//!
//! # Examples
//!
//! ```
//! use gambit::{Color, Offset, Role, Tags, Template};
//!
//! let pawn = Template::new(Role::Pawn, Color::Black);
//! let double = pawn.matching(Offset::new(-2, 0)).next().unwrap();
//! assert_eq!(double.tags, Tags::ON_FIRST);
//! assert!(!pawn.has_shape(Offset::new(2, 0)));
//! ```

use bitflags::bitflags;

use crate::{color::Color, role::Role, square::Offset};

bitflags! {
    /// Conditions guarding a template entry.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
    pub struct Tags: u8 {
        /// The piece has not moved yet.
        const ON_FIRST = 1;
        /// The destination is occupied.
        const ON_TAKE = 2;
        /// An enemy pawn beside the mover just advanced two squares.
        const EN_PASSANT = 4;
    }
}

/// A single template entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TemplateMove {
    pub offset: Offset,
    pub tags: Tags,
}

impl TemplateMove {
    const fn plain(up: i8, right: i8) -> TemplateMove {
        TemplateMove {
            offset: Offset::new(up, right),
            tags: Tags::empty(),
        }
    }

    const fn tagged(up: i8, right: i8, tags: Tags) -> TemplateMove {
        TemplateMove {
            offset: Offset::new(up, right),
            tags,
        }
    }

    #[must_use]
    #[inline]
    const fn flip_vertical(self) -> TemplateMove {
        TemplateMove {
            offset: self.offset.flip_vertical(),
            tags: self.tags,
        }
    }
}

const PLACEHOLDER: TemplateMove = TemplateMove::plain(0, 0);

const fn king_table() -> [TemplateMove; 8] {
    let mut table = [PLACEHOLDER; 8];
    let mut n = 0;
    let mut i = -1;
    while i <= 1 {
        let mut j = -1;
        while j <= 1 {
            if i != 0 || j != 0 {
                table[n] = TemplateMove::plain(i, j);
                n += 1;
            }
            j += 1;
        }
        i += 1;
    }
    table
}

const fn rook_table() -> [TemplateMove; 32] {
    let mut table = [PLACEHOLDER; 32];
    let mut n = 0;
    let mut i = -8;
    while i <= 8 {
        if i != 0 {
            table[n] = TemplateMove::plain(i, 0);
            table[n + 16] = TemplateMove::plain(0, i);
            n += 1;
        }
        i += 1;
    }
    table
}

const fn bishop_table() -> [TemplateMove; 32] {
    let mut table = [PLACEHOLDER; 32];
    let mut n = 0;
    let mut i = -8;
    while i <= 8 {
        if i != 0 {
            table[n] = TemplateMove::plain(i, i);
            table[n + 16] = TemplateMove::plain(i, -i);
            n += 1;
        }
        i += 1;
    }
    table
}

const fn queen_table() -> [TemplateMove; 64] {
    let rook = rook_table();
    let bishop = bishop_table();
    let mut table = [PLACEHOLDER; 64];
    let mut n = 0;
    while n < 32 {
        table[n] = rook[n];
        table[n + 32] = bishop[n];
        n += 1;
    }
    table
}

const fn knight_table() -> [TemplateMove; 8] {
    let mut table = [PLACEHOLDER; 8];
    let mut n = 0;
    let mut i: i8 = -2;
    while i <= 2 {
        let mut j: i8 = -2;
        while j <= 2 {
            if i.abs() + j.abs() == 3 {
                table[n] = TemplateMove::plain(i, j);
                n += 1;
            }
            j += 1;
        }
        i += 1;
    }
    table
}

const PAWN: [TemplateMove; 6] = [
    TemplateMove::tagged(1, -1, Tags::ON_TAKE),
    TemplateMove::tagged(1, -1, Tags::EN_PASSANT),
    TemplateMove::tagged(1, 1, Tags::ON_TAKE),
    TemplateMove::tagged(1, 1, Tags::EN_PASSANT),
    TemplateMove::tagged(2, 0, Tags::ON_FIRST),
    TemplateMove::plain(1, 0),
];
const KNIGHT: [TemplateMove; 8] = knight_table();
const BISHOP: [TemplateMove; 32] = bishop_table();
const ROOK: [TemplateMove; 32] = rook_table();
const QUEEN: [TemplateMove; 64] = queen_table();
const KING: [TemplateMove; 8] = king_table();

/// The movement template of a piece type, oriented for a team.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Template {
    table: &'static [TemplateMove],
    color: Color,
}

impl Template {
    pub fn new(role: Role, color: Color) -> Template {
        Template {
            table: match role {
                Role::Pawn => &PAWN,
                Role::Knight => &KNIGHT,
                Role::Bishop => &BISHOP,
                Role::Rook => &ROOK,
                Role::Queen => &QUEEN,
                Role::King => &KING,
            },
            color,
        }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.table.len()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.table.is_empty()
    }

    /// All entries in template order.
    pub fn iter(self) -> impl Iterator<Item = TemplateMove> + Clone {
        let color = self.color;
        self.table.iter().map(move |&m| match color {
            Color::White => m,
            Color::Black => m.flip_vertical(),
        })
    }

    /// Entries whose displacement equals `offset`, tags ignored.
    pub fn matching(self, offset: Offset) -> impl Iterator<Item = TemplateMove> + Clone {
        self.iter().filter(move |m| m.offset == offset)
    }

    pub fn has_shape(self, offset: Offset) -> bool {
        self.matching(offset).next().is_some()
    }

    /// Distinct displacements in template order.
    ///
    /// Entries sharing a displacement are adjacent in every table.
    pub fn shapes(self) -> impl Iterator<Item = Offset> + Clone {
        let mut last = None;
        self.iter().filter_map(move |m| {
            if last == Some(m.offset) {
                None
            } else {
                last = Some(m.offset);
                Some(m.offset)
            }
        })
    }

    /// Displacements of at most one square along each axis.
    pub fn unit_steps(self) -> impl Iterator<Item = Offset> + Clone {
        self.iter().map(|m| m.offset).filter(|o| o.is_unit())
    }
}
