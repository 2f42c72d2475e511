use battleship_solver::ui::{coord_to_string, parse_coord, BeliefGrid, BoardGrid};
use battleship_solver::{BeliefEngine, BoardSpace, ProbabilityMap, SpaceConfig, Strategy};

#[test]
fn test_coord_to_string() {
    assert_eq!(coord_to_string(0, 5), "A1");
    assert_eq!(coord_to_string(7, 5), "C2");
    assert_eq!(coord_to_string(99, 10), "J10");
}

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("C2", 5, 5), Some(7));
    assert_eq!(parse_coord(" c2 ", 5, 5), Some(7));
    // Row first, both 1-based like the letter form.
    assert_eq!(parse_coord("2,3", 5, 5), Some(7));
    assert_eq!(parse_coord(" 5 , 5 ", 5, 5), Some(24));
    assert_eq!(parse_coord("1,1", 5, 5), parse_coord("A1", 5, 5));
    assert_eq!(parse_coord("J10", 10, 10), Some(99));

    assert_eq!(parse_coord("F1", 5, 5), None);
    assert_eq!(parse_coord("A0", 5, 5), None);
    assert_eq!(parse_coord("A6", 5, 5), None);
    assert_eq!(parse_coord("5,0", 5, 5), None);
    assert_eq!(parse_coord("0,1", 5, 5), None);
    assert_eq!(parse_coord("6,1", 5, 5), None);
    assert_eq!(parse_coord("", 5, 5), None);
    assert_eq!(parse_coord("?3", 5, 5), None);
}

#[test]
fn test_board_grid() {
    let space = BoardSpace::new(SpaceConfig::new(3, 3, vec![2, 3])).unwrap();
    let grid = BoardGrid {
        board: &space.boards()[0],
        width: 3,
    }
    .to_string();
    let lines: Vec<&str> = grid.lines().collect();
    assert_eq!(lines, vec!["    A B C", " 1  o o o", " 2  ~ ~ o", " 3  ~ ~ o"]);
}

#[test]
fn test_probability_map_display() {
    let map = ProbabilityMap::from_values(2, vec![0.0, 12.5, 100.0, 50.0]);
    let text = map.to_string();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains(" 12.5"));
    assert!(text.contains("100.0"));
}

#[test]
fn test_belief_grid_marks_guesses_and_suggestion() {
    let space = BoardSpace::new(SpaceConfig::new(3, 3, vec![2, 3])).unwrap();
    // Board 0 occupies 0, 1, 2, 5, 8.
    let mut engine = BeliefEngine::for_board(&space, 0, Strategy::Median).unwrap();
    engine.guess(0).unwrap();
    engine.guess(4).unwrap();
    let text = BeliefGrid {
        engine: &engine,
        suggestion: Some(1),
    }
    .to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with(" 1    X  "));
    assert!(lines[1].contains('>'));
    assert!(lines[2].contains("   O  "));
    assert!(!lines[3].contains('>'));
}
