use battleship_solver::{BoardSpace, ConfigError, Orientation, Segment, SpaceConfig};
use rand::{rngs::SmallRng, SeedableRng};

fn space(width: usize, height: usize, ships: &[usize]) -> BoardSpace {
    BoardSpace::new(SpaceConfig::new(width, height, ships.to_vec())).unwrap()
}

#[test]
fn test_small_space_counts() {
    assert_eq!(space(3, 3, &[2, 3]).len(), 36);
    assert_eq!(space(5, 5, &[2, 3, 4]).len(), 9024);
    assert_eq!(space(3, 3, &[3, 3]).len(), 12);
    assert_eq!(space(2, 2, &[2]).len(), 4);
}

#[test]
fn test_single_row_has_no_vertical_placements() {
    let s = space(4, 1, &[2]);
    let cells: Vec<Vec<usize>> = s.boards().iter().map(|b| b.occupied().collect()).collect();
    assert_eq!(cells, vec![vec![0, 1], vec![1, 2], vec![2, 3]]);
    assert!(s
        .boards()
        .iter()
        .all(|b| b.segments()[0].orientation() == Orientation::Horizontal));
}

#[test]
fn test_single_column_has_only_vertical_placements() {
    let s = space(1, 3, &[2]);
    let cells: Vec<Vec<usize>> = s.boards().iter().map(|b| b.occupied().collect()).collect();
    assert_eq!(cells, vec![vec![0, 1], vec![1, 2]]);
}

#[test]
fn test_enumeration_order() {
    let s = space(3, 3, &[2, 3]);
    // Horizontal ship 2 at the origin; ship 3 cannot wrap from cell 2, so the
    // first fit is vertical down the last column.
    let first = &s.boards()[0];
    assert_eq!(first.occupied().collect::<Vec<_>>(), vec![0, 1, 2, 5, 8]);
    assert_eq!(
        first.segments(),
        &[
            Segment::new(0, 2, Orientation::Horizontal),
            Segment::new(2, 3, Orientation::Vertical),
        ]
    );
    assert_eq!(
        s.boards()[1].occupied().collect::<Vec<_>>(),
        vec![0, 1, 3, 4, 5]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let a = space(4, 4, &[3, 2]);
    let b = space(4, 4, &[3, 2]);
    assert_eq!(a.boards(), b.boards());
    for cell in 0..a.cells() {
        assert_eq!(a.cell_index(cell), b.cell_index(cell));
    }
}

#[test]
fn test_length_one_ship_keeps_both_orientations() {
    let s = space(1, 1, &[1]);
    assert_eq!(s.len(), 2);
    assert_eq!(s.boards()[0].occupied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(s.boards()[1].occupied().collect::<Vec<_>>(), vec![0]);
    assert_ne!(s.boards()[0], s.boards()[1]);
}

#[test]
fn test_empty_inventory_yields_one_empty_board() {
    let s = space(3, 2, &[]);
    assert_eq!(s.len(), 1);
    assert_eq!(s.boards()[0].occupied_count(), 0);
    assert_eq!(s.total_ship_cells(), 0);
}

#[test]
fn test_cell_index_matches_brute_force() {
    let s = space(5, 5, &[2, 3, 4]);
    for cell in 0..s.cells() {
        let expected: Vec<usize> = s
            .boards()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.contains(cell))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(s.cell_index(cell).ones().collect::<Vec<_>>(), expected);
    }
    // Corners are the least covered cells, the centre the most.
    assert_eq!(s.cell_index(0).count_ones(), 2342);
    assert_eq!(s.cell_index(12).count_ones(), 3704);
    assert!(s.try_cell_index(25).is_none());
}

#[test]
fn test_random_board_stays_in_range() {
    let s = space(2, 2, &[2]);
    let mut rng = SmallRng::seed_from_u64(7);
    let mut seen = [false; 4];
    for _ in 0..200 {
        let id = s.random_board_id(&mut rng);
        assert!(id < s.len());
        seen[id] = true;
    }
    // The last board must be reachable too.
    assert!(seen.iter().all(|&hit| hit));
    let board = s.random_board(&mut rng);
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_invalid_dimensions() {
    let err = BoardSpace::new(SpaceConfig::new(0, 3, vec![2])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidDimensions { width: 0, height: 3 });
    let err = BoardSpace::new(SpaceConfig::new(3, 0, vec![2])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDimensions { .. }));
}

#[test]
fn test_zero_length_ship() {
    let err = BoardSpace::new(SpaceConfig::new(3, 3, vec![2, 0])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidShipLength { index: 1 });
}

#[test]
fn test_ship_longer_than_grid() {
    let err = BoardSpace::new(SpaceConfig::new(2, 2, vec![3])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::ShipTooLong {
            length: 3,
            width: 2,
            height: 2
        }
    );
    // Fits along the long side only.
    assert!(BoardSpace::new(SpaceConfig::new(4, 1, vec![3])).is_ok());
}

#[test]
fn test_overcrowded_inventory() {
    let err = BoardSpace::new(SpaceConfig::new(2, 2, vec![2, 2, 2])).unwrap_err();
    assert!(matches!(err, ConfigError::NoPlacements { .. }));
}

#[test]
fn test_board_limit() {
    let config = SpaceConfig::new(5, 5, vec![2, 3, 4]).with_board_limit(1000);
    let err = BoardSpace::new(config).unwrap_err();
    assert_eq!(err, ConfigError::TooManyBoards { limit: 1000 });

    let config = SpaceConfig::new(3, 3, vec![2, 3]).with_board_limit(36);
    assert_eq!(BoardSpace::new(config).unwrap().len(), 36);
}
