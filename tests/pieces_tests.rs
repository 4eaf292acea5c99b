//! Piece tests - shapes, rotation, queue and scoring

use blockfall::core::{
    calculate_line_score, canonical_shape, line_clear_points, PieceQueue, Randomizer, Tetromino,
};
use blockfall::types::{PieceKind, Rotation, LINE_SCORES};

#[test]
fn test_canonical_shapes() {
    let expected: [(PieceKind, Vec<Vec<u8>>); 7] = [
        (PieceKind::I, vec![vec![1, 1, 1, 1]]),
        (PieceKind::J, vec![vec![1, 0, 0], vec![1, 1, 1]]),
        (PieceKind::L, vec![vec![0, 0, 1], vec![1, 1, 1]]),
        (PieceKind::O, vec![vec![1, 1], vec![1, 1]]),
        (PieceKind::S, vec![vec![0, 1, 1], vec![1, 1, 0]]),
        (PieceKind::T, vec![vec![0, 1, 0], vec![1, 1, 1]]),
        (PieceKind::Z, vec![vec![1, 1, 0], vec![0, 1, 1]]),
    ];

    for (kind, matrix) in expected {
        assert_eq!(canonical_shape(kind).to_matrix(), matrix, "{kind:?}");
        assert_eq!(Tetromino::new(kind).cells().len(), 4);
    }
}

#[test]
fn test_piece_colors() {
    assert_eq!(Tetromino::new(PieceKind::I).color(), "#00f0f0");
    assert_eq!(Tetromino::new(PieceKind::T).color(), "#a000f0");
    assert_eq!(Tetromino::new(PieceKind::Z).color(), "#f00000");
}

#[test]
fn test_rotation_is_cyclic_of_order_four() {
    for kind in PieceKind::ALL {
        let original = Tetromino::new(kind);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, original, "{kind:?}");
    }
}

#[test]
fn test_rotation_transposes_dimensions() {
    let mut t = Tetromino::new(PieceKind::T);
    t.rotate();
    assert_eq!(t.rotation(), Rotation::East);
    assert_eq!(t.shape().to_matrix(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);

    t.rotate_back();
    assert_eq!(t, Tetromino::new(PieceKind::T));
}

#[test]
fn test_seeded_queue_is_deterministic() {
    let mut a = PieceQueue::seeded(Randomizer::Uniform, 42);
    let mut b = PieceQueue::seeded(Randomizer::Uniform, 42);
    let kinds_a: Vec<PieceKind> = a.fill(50).iter().map(|t| t.kind()).collect();
    let kinds_b: Vec<PieceKind> = b.fill(50).iter().map(|t| t.kind()).collect();
    assert_eq!(kinds_a, kinds_b);
}

#[test]
fn test_queue_lookahead_stays_full() {
    let mut queue = PieceQueue::seeded(Randomizer::Uniform, 3).with_lookahead(5);
    assert_eq!(queue.len(), 5);

    let front = queue.peek().copied().unwrap();
    assert_eq!(queue.take_next(), front);
    assert_eq!(queue.len(), 4);
    queue.push_random();
    assert_eq!(queue.len(), 5);
}

#[test]
fn test_seven_bag_deals_each_kind_once_per_bag() {
    let mut queue = PieceQueue::seeded(Randomizer::SevenBag, 9);
    // The lookahead buffer already dealt the first three kinds of bag one
    let mut first: Vec<PieceKind> = queue.upcoming().map(|t| t.kind()).collect();
    first.extend(queue.fill(4).iter().map(|t| t.kind()));
    first.sort();
    assert_eq!(first, PieceKind::ALL.to_vec());

    for _ in 0..3 {
        let mut bag: Vec<PieceKind> = queue.fill(7).iter().map(|t| t.kind()).collect();
        bag.sort();
        assert_eq!(bag, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_line_scores() {
    assert_eq!(calculate_line_score(0), 0);
    assert_eq!(calculate_line_score(1), 100);
    assert_eq!(calculate_line_score(2), 300);
    assert_eq!(calculate_line_score(3), 500);
    assert_eq!(calculate_line_score(4), 800);
    // Clamped to the four-line entry
    assert_eq!(line_clear_points(&LINE_SCORES, 6), 800);
}
