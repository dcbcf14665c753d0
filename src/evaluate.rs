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

//! The move evaluation pipeline.
//!
//! A candidate passes through shape, boundary, path and condition filters
//! ([`candidate`]), then through the king safety filter ([`king_exposure`]).
//! King safety replays the first four filters for every enemy piece on a
//! [`Scene`] that overlays the candidate onto the unchanged position, so it
//! never recurses into itself.

use crate::{
    attempt::{Blocked, Capture, Condition, EngineError, MoveAttempt, Rejection},
    bitboard::Bitboard,
    color::{ByColor, Color},
    piece::{Piece, PieceId},
    position::{LastMove, Position},
    role::Role,
    square::{Offset, Square},
    template::{Tags, TemplateMove},
};

/// Upper bound on one-square steps along any path.
const MAX_STEPS: usize = 8;

/// A position with at most one move overlaid, read without mutating it.
#[derive(Clone, Debug)]
pub(crate) struct Scene<'a> {
    pos: &'a Position,
    moved: Option<(PieceId, Square, Square)>,
    removed: Option<PieceId>,
    occupied: ByColor<Bitboard>,
    last_move: Option<LastMove>,
}

impl<'a> Scene<'a> {
    pub fn new(pos: &'a Position) -> Scene<'a> {
        Scene {
            pos,
            moved: None,
            removed: None,
            occupied: ByColor::new_with(|color| pos.board().by_color(color)),
            last_move: pos.last_move(),
        }
    }

    /// The scene after a legal `attempt`. A captured king stays on the
    /// board.
    fn after(&self, attempt: &MoveAttempt) -> Scene<'a> {
        let mut scene = self.clone();
        let (Some(to), Some(mover)) = (attempt.to, self.piece(attempt.piece)) else {
            return scene;
        };

        scene.occupied.get_mut(mover.color).relocate(attempt.from, to);
        if let Some(capture) = attempt.capture {
            if let Some(victim) = self.piece(capture.piece).filter(|p| p.role != Role::King) {
                scene.occupied.get_mut(victim.color).discard(capture.square);
                scene.removed = Some(capture.piece);
            }
        }
        scene.moved = Some((attempt.piece, attempt.from, to));
        scene.last_move = Some(LastMove {
            piece: attempt.piece,
            from: attempt.from,
            to,
        });
        scene
    }

    /// The piece, if it is in play in this scene.
    fn piece(&self, id: PieceId) -> Option<&'a Piece> {
        if self.removed == Some(id) {
            return None;
        }
        self.pos.piece(id).filter(|p| p.is_active())
    }

    fn square_of(&self, id: PieceId, piece: &Piece) -> Square {
        match self.moved {
            Some((moved, _, to)) if moved == id => to,
            _ => piece.square,
        }
    }

    fn piece_at(&self, sq: Square) -> Option<PieceId> {
        if let Some((id, from, to)) = self.moved {
            if sq == to {
                return Some(id);
            } else if sq == from {
                return None;
            }
        }
        self.pos
            .board()
            .piece_at(sq)
            .filter(|&id| self.removed != Some(id))
    }

    #[inline]
    fn is_occupied(&self, sq: Square) -> bool {
        (self.occupied.white | self.occupied.black).contains(sq)
    }

    #[inline]
    fn color_at(&self, sq: Square) -> Option<Color> {
        self.occupied.find(|bb| bb.contains(sq))
    }

    fn active(&self, color: Color) -> impl Iterator<Item = (PieceId, &'a Piece)> + '_ {
        self.pos
            .active(color)
            .filter(move |&id| self.removed != Some(id))
            .filter_map(move |id| self.pos.piece(id).map(|piece| (id, piece)))
    }

    fn king(&self, color: Color) -> Option<Square> {
        self.active(color)
            .find(|(_, piece)| piece.role == Role::King)
            .map(|(id, piece)| self.square_of(id, piece))
    }
}

/// Failure of a single filter.
enum Fail {
    Rule(Rejection),
    Engine(EngineError),
}

impl From<Rejection> for Fail {
    fn from(rejection: Rejection) -> Fail {
        Fail::Rule(rejection)
    }
}

impl From<Blocked> for Fail {
    fn from(blocked: Blocked) -> Fail {
        Fail::Rule(Rejection::PathBlocked(blocked))
    }
}

impl From<EngineError> for Fail {
    fn from(err: EngineError) -> Fail {
        Fail::Engine(err)
    }
}

/// Runs the shape, boundary, path and condition filters.
///
/// The returned attempt carries the first rejection, if any.
pub(crate) fn candidate(
    scene: &Scene<'_>,
    id: PieceId,
    offset: Offset,
) -> Result<MoveAttempt, EngineError> {
    let piece = scene.piece(id).ok_or(EngineError::NotInPlay { piece: id })?;
    let from = scene.square_of(id, piece);
    let mut attempt = MoveAttempt {
        piece: id,
        offset,
        from,
        to: None,
        rejection: None,
        capture: None,
    };

    match filters(scene, piece, &mut attempt) {
        Ok(()) => Ok(attempt),
        Err(Fail::Rule(rejection)) => Ok(MoveAttempt {
            rejection: Some(rejection),
            ..attempt
        }),
        Err(Fail::Engine(err)) => Err(err),
    }
}

fn filters(scene: &Scene<'_>, piece: &Piece, attempt: &mut MoveAttempt) -> Result<(), Fail> {
    let template = piece.template();
    let offset = attempt.offset;
    let from = attempt.from;

    if !template.has_shape(offset) {
        return Err(Rejection::Shape.into());
    }

    attempt.to = from.offset(offset);
    let to = attempt.to.ok_or(Rejection::OutOfBounds {
        rank: from.rank().number().saturating_add(offset.up),
        file: from.file().number().saturating_add(offset.right),
    })?;

    attempt.capture = if piece.role.is_jumper() {
        jump(scene, piece, to)?
    } else {
        walk(scene, attempt.piece, piece, from, to)?
    };

    if let Some(capture) = conditions(scene, piece, from, to, template.matching(offset))? {
        attempt.capture = Some(capture);
    }
    Ok(())
}

fn jump(scene: &Scene<'_>, piece: &Piece, to: Square) -> Result<Option<Capture>, Fail> {
    match scene.color_at(to) {
        Some(color) if color == piece.color => Err(Blocked::Knight { square: to }.into()),
        Some(_) => Ok(scene.piece_at(to).map(|victim| Capture {
            piece: victim,
            square: to,
        })),
        None => Ok(None),
    }
}

/// Walks one-square steps from `from` towards `to`, always taking the step
/// that ends closest to the destination.
///
/// Every sliding shape in the movement tables is a straight or diagonal line
/// of at most 7 unit steps, so `NoStep` and `PathExhausted` are unreachable
/// with the built-in tables.
fn walk(
    scene: &Scene<'_>,
    id: PieceId,
    piece: &Piece,
    from: Square,
    to: Square,
) -> Result<Option<Capture>, Fail> {
    let steps = piece.template().unit_steps();
    let mut current = from;

    for _ in 0..MAX_STEPS {
        let next = steps
            .clone()
            .filter_map(|step| current.offset(step))
            .min_by_key(|sq| sq.manhattan(to))
            .ok_or(EngineError::NoStep {
                piece: id,
                square: current,
            })?;

        if next == to {
            return arrive(scene, piece, from, to);
        } else if scene.is_occupied(next) {
            return Err(Blocked::General { square: next }.into());
        }
        current = next;
    }

    Err(EngineError::PathExhausted { piece: id, from, to }.into())
}

fn arrive(
    scene: &Scene<'_>,
    piece: &Piece,
    from: Square,
    to: Square,
) -> Result<Option<Capture>, Fail> {
    match scene.color_at(to) {
        None => Ok(None),
        Some(color) if color == piece.color => Err(Blocked::General { square: to }.into()),
        Some(_) if piece.role == Role::Pawn && from.file() == to.file() => {
            Err(Blocked::PawnForward { square: to }.into())
        }
        Some(_) => Ok(scene.piece_at(to).map(|victim| Capture {
            piece: victim,
            square: to,
        })),
    }
}

/// Tries the matching template entries in order. The first entry whose tags
/// all hold wins; otherwise the last failing tag is reported.
fn conditions(
    scene: &Scene<'_>,
    piece: &Piece,
    from: Square,
    to: Square,
    entries: impl Iterator<Item = TemplateMove>,
) -> Result<Option<Capture>, Fail> {
    let mut failed = None;
    for entry in entries {
        match tags_hold(scene, piece, from, to, entry.tags) {
            Ok(capture) => return Ok(capture),
            Err(condition) => failed = Some(condition),
        }
    }
    match failed {
        Some(condition) => Err(Rejection::Condition(condition).into()),
        None => Ok(None),
    }
}

fn tags_hold(
    scene: &Scene<'_>,
    piece: &Piece,
    from: Square,
    to: Square,
    tags: Tags,
) -> Result<Option<Capture>, Condition> {
    if tags.contains(Tags::ON_FIRST) && piece.moves != 0 {
        return Err(Condition::OnFirst);
    }
    if tags.contains(Tags::ON_TAKE) && !scene.is_occupied(to) {
        return Err(Condition::OnTake);
    }
    if tags.contains(Tags::EN_PASSANT) {
        return en_passant(scene, piece, from, to)
            .map(Some)
            .ok_or(Condition::EnPassant);
    }
    Ok(None)
}

/// The enemy pawn beside the mover on the destination file, if it just
/// advanced two squares with its first move.
fn en_passant(scene: &Scene<'_>, piece: &Piece, from: Square, to: Square) -> Option<Capture> {
    let beside = Square::from_coords(to.file(), from.rank());
    let victim = scene.piece_at(beside)?;
    let theirs = scene.piece(victim)?;
    let last = scene.last_move?;

    let double_step = Offset::new(2 * theirs.color.forward(), 0);
    (theirs.color != piece.color
        && theirs.role == Role::Pawn
        && theirs.moves == 1
        && last.piece == victim
        && last.to == beside
        && last.from.offset(double_step) == Some(beside))
    .then_some(Capture {
        piece: victim,
        square: beside,
    })
}

/// The first enemy piece able to reach the king of `color` in `scene`.
pub(crate) fn king_exposure(
    scene: &Scene<'_>,
    color: Color,
) -> Result<Option<Rejection>, EngineError> {
    let Some(king) = scene.king(color) else {
        return Ok(None);
    };

    for (id, piece) in scene.active(color.other()) {
        let square = scene.square_of(id, piece);
        if !piece.template().has_shape(square.offset_to(king)) {
            continue;
        }
        if candidate(scene, id, square.offset_to(king))?.is_legal() {
            return Ok(Some(Rejection::KingExposed {
                attacker: id,
                role: piece.role,
                square,
            }));
        }
    }
    Ok(None)
}

/// Full legality: [`candidate`], then king safety on the resulting scene.
pub(crate) fn evaluate(
    pos: &Position,
    id: PieceId,
    offset: Offset,
) -> Result<MoveAttempt, EngineError> {
    let scene = Scene::new(pos);
    let mut attempt = candidate(&scene, id, offset)?;
    if attempt.is_legal() {
        if let Some(piece) = scene.piece(id) {
            attempt.rejection = king_exposure(&scene.after(&attempt), piece.color)?;
        }
    }
    Ok(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;

    fn position(layout: &str) -> Position {
        layout
            .parse::<Setup>()
            .expect("valid layout")
            .position()
            .expect("legal position")
    }

    fn at(pos: &Position, sq: Square) -> PieceId {
        pos.piece_at(sq).expect("occupied square")
    }

    #[test]
    fn test_shape_and_bounds() {
        let pos = Position::default();
        let rook = at(&pos, Square::A1);
        let attempt = evaluate(&pos, rook, Offset::new(1, 1)).unwrap();
        assert_eq!(attempt.rejection, Some(Rejection::Shape));
        let attempt = evaluate(&pos, rook, Offset::new(0, -1)).unwrap();
        assert_eq!(
            attempt.rejection,
            Some(Rejection::OutOfBounds { rank: 1, file: 0 })
        );
        assert_eq!(attempt.to, None);
    }

    #[test]
    fn test_far_displacement() {
        let pos = Position::default();
        let rook = at(&pos, Square::H8);
        for offset in [
            Offset::new(i8::MAX, 0),
            Offset::new(i8::MIN, 0),
            Offset::new(0, i8::MAX),
            Offset::new(i8::MAX, i8::MIN),
        ] {
            let attempt = evaluate(&pos, rook, offset).unwrap();
            assert_eq!(attempt.rejection, Some(Rejection::Shape));
            assert_eq!(attempt.to, None);
            assert_eq!(candidate(&Scene::new(&pos), rook, offset).unwrap(), attempt);
        }
    }

    #[test]
    fn test_walk_blocked() {
        let pos = Position::default();
        let queen = at(&pos, Square::D1);
        let attempt = evaluate(&pos, queen, Offset::new(3, 3)).unwrap();
        assert_eq!(
            attempt.rejection,
            Some(Rejection::PathBlocked(Blocked::General { square: Square::E2 }))
        );
    }

    #[test]
    fn test_pawn_forward_capture() {
        let pos = position("4k3/8/8/8/8/4p3/4P3/4K3 w");
        let pawn = at(&pos, Square::E2);
        let attempt = evaluate(&pos, pawn, Offset::new(1, 0)).unwrap();
        assert_eq!(
            attempt.rejection,
            Some(Rejection::PathBlocked(Blocked::PawnForward { square: Square::E3 }))
        );
    }

    #[test]
    fn test_pawn_diagonal_needs_target() {
        let pos = Position::default();
        let pawn = at(&pos, Square::E2);
        let attempt = evaluate(&pos, pawn, Offset::new(1, 1)).unwrap();
        assert_eq!(
            attempt.rejection,
            Some(Rejection::Condition(Condition::EnPassant))
        );
    }

    #[test]
    fn test_capture() {
        let pos = position("4k3/8/8/8/8/3p4/4P3/4K3 w");
        let pawn = at(&pos, Square::E2);
        let attempt = evaluate(&pos, pawn, Offset::new(1, -1)).unwrap();
        assert!(attempt.is_legal());
        assert_eq!(
            attempt.capture,
            Some(Capture {
                piece: at(&pos, Square::D3),
                square: Square::D3
            })
        );
    }

    #[test]
    fn test_pinned_piece() {
        let pos = position("4r1k1/8/8/8/8/8/4B3/4K3 w");
        let bishop = at(&pos, Square::E2);
        let attempt = evaluate(&pos, bishop, Offset::new(1, 1)).unwrap();
        assert_eq!(
            attempt.rejection,
            Some(Rejection::KingExposed {
                attacker: at(&pos, Square::E8),
                role: Role::Rook,
                square: Square::E8,
            })
        );
        let theoretical = candidate(&Scene::new(&pos), bishop, Offset::new(1, 1)).unwrap();
        assert!(theoretical.is_legal());
    }

    #[test]
    fn test_capturing_the_attacker() {
        let pos = position("4r1k1/8/8/8/8/8/8/R3K3 w");
        let rook = at(&pos, Square::A1);
        let king = at(&pos, Square::E1);
        assert!(evaluate(&pos, king, Offset::new(1, 0)).unwrap().rejection.is_some());
        assert!(evaluate(&pos, king, Offset::new(1, 1)).unwrap().is_legal());
        assert!(evaluate(&pos, rook, Offset::new(0, 1)).unwrap().rejection.is_some());
    }

    #[test]
    fn test_not_in_play() {
        let pos = Position::default();
        assert_eq!(
            evaluate(&pos, PieceId(40), Offset::new(1, 0)),
            Err(EngineError::NotInPlay { piece: PieceId(40) })
        );
    }
}
