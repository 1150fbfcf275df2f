//! Tetromino catalog and rotation tests

use blockfall::core::pieces::{canonical_shape, definition, Tetromino};
use blockfall::core::Shape;
use blockfall::types::{PieceKind, SPAWN_X, SPAWN_Y};

#[test]
fn test_bounding_boxes() {
    let expected = [
        (PieceKind::I, 1, 4),
        (PieceKind::O, 2, 2),
        (PieceKind::T, 2, 3),
        (PieceKind::S, 2, 3),
        (PieceKind::Z, 2, 3),
        (PieceKind::L, 3, 2),
        (PieceKind::J, 3, 2),
    ];
    for (kind, rows, cols) in expected {
        let shape = canonical_shape(kind);
        assert_eq!((shape.rows(), shape.cols()), (rows, cols), "{:?}", kind);
    }
}

#[test]
fn test_every_piece_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(canonical_shape(kind).occupied().count(), 4, "{:?}", kind);
        assert_eq!(definition(kind).color, kind);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let start = canonical_shape(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape = shape.rotate_cw();
        }
        assert_eq!(shape, start, "{:?}", kind);
    }
}

#[test]
fn test_rotation_swaps_dimensions() {
    for kind in PieceKind::ALL {
        let shape = canonical_shape(kind);
        let rotated = shape.rotate_cw();
        assert_eq!(rotated.rows(), shape.cols());
        assert_eq!(rotated.cols(), shape.rows());
        assert_eq!(rotated.occupied().count(), 4);
    }
}

#[test]
fn test_l_rotates_clockwise() {
    // X.    XXX
    // X. -> X..
    // XX
    let rotated = canonical_shape(PieceKind::L).rotate_cw();
    assert_eq!(rotated, Shape::from_matrix([[1, 1, 1], [1, 0, 0]]));
}

#[test]
fn test_i_rotates_to_vertical() {
    let rotated = canonical_shape(PieceKind::I).rotate_cw();
    assert_eq!(rotated, Shape::from_matrix([[1], [1], [1], [1]]));
}

#[test]
fn test_o_rotation_is_unchanged() {
    let o = canonical_shape(PieceKind::O);
    assert_eq!(o.rotate_cw(), o);
}

#[test]
fn test_spawn_position_and_rotation_keep_anchor() {
    let piece = Tetromino::new(PieceKind::T);
    assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));

    let rotated = piece.rotated();
    assert_eq!((rotated.x, rotated.y), (SPAWN_X, SPAWN_Y));
    assert_eq!(rotated.shape, piece.shape.rotate_cw());
    assert_eq!(rotated.kind, PieceKind::T);
}
