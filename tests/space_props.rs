use battleship_solver::{BitSet, BoardSpace, ConfigError, Orientation, SpaceConfig};
use proptest::prelude::*;

fn small_config() -> impl Strategy<Value = SpaceConfig> {
    (1usize..=4, 1usize..=4, prop::collection::vec(1usize..=3, 0..=3))
        .prop_map(|(w, h, ships)| SpaceConfig::new(w, h, ships))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every board is a legal layout of the whole inventory.
    #[test]
    fn boards_are_legal_layouts(config in small_config()) {
        let space = match BoardSpace::new(config.clone()) {
            Ok(space) => space,
            Err(ConfigError::ShipTooLong { .. }) | Err(ConfigError::NoPlacements { .. }) => {
                return Ok(());
            }
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };
        let (w, h) = (config.width, config.height);
        for board in space.boards() {
            prop_assert_eq!(board.occupied_count(), config.total_ship_cells());
            prop_assert_eq!(board.segments().len(), config.ships.len());

            let mut union = BitSet::new(w * h);
            for (segment, &length) in board.segments().iter().zip(&config.ships) {
                prop_assert_eq!(segment.length(), length);
                prop_assert!(segment.in_bounds(w, h));
                let cells: Vec<usize> = segment.cells(w).collect();
                match segment.orientation() {
                    Orientation::Horizontal => {
                        prop_assert!(cells.iter().all(|c| c / w == segment.root() / w));
                        prop_assert!(cells.windows(2).all(|p| p[1] == p[0] + 1));
                    }
                    Orientation::Vertical => {
                        prop_assert!(cells.iter().all(|c| c % w == segment.root() % w));
                        prop_assert!(cells.windows(2).all(|p| p[1] == p[0] + w));
                    }
                }
                for c in cells {
                    prop_assert!(!union.contains(c), "segments overlap at {}", c);
                    union.set(c).unwrap();
                }
            }
            prop_assert_eq!(&union, board.cells());
        }
    }

    /// The inverted index agrees with a scan over all boards.
    #[test]
    fn index_matches_scan(config in small_config()) {
        if let Ok(space) = BoardSpace::new(config) {
            for cell in 0..space.cells() {
                let scanned = space.boards().iter().filter(|b| b.contains(cell)).count();
                prop_assert_eq!(space.cell_index(cell).count_ones(), scanned);
                for id in space.cell_index(cell).ones() {
                    prop_assert!(space.boards()[id].contains(cell));
                }
            }
        }
    }
}
