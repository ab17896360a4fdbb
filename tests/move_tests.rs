use shipshape::{
    check_win, evaluate_move, resolve_move, Board, CellState, Coordinate, EngineError, Fleet, MoveLog,
    MoveRecord, Orientation, ShipKind, Side,
};

fn defender() -> (Board, Fleet, MoveLog) {
    let mut fleet = Fleet::new(Side::Opponent);
    fleet
        .place_ship(ShipKind::Destroyer, Coordinate::new(1, 1), Orientation::Horizontal)
        .unwrap();
    fleet
        .place_ship(ShipKind::Cruiser, Coordinate::new(5, 5), Orientation::Vertical)
        .unwrap();
    (Board::new(), fleet, MoveLog::new(Side::Opponent))
}

#[test]
fn test_miss_marks_cell_and_logs() {
    let (mut board, mut fleet, mut log) = defender();
    let struck = resolve_move(Coordinate::new(0, 0), &mut board, &mut fleet, &mut log).unwrap();
    assert_eq!(struck, None);
    assert_eq!(board.cell_at(Coordinate::new(0, 0)).unwrap(), CellState::Miss);
    assert_eq!(
        log.records(),
        &[MoveRecord {
            coordinate: Coordinate::new(0, 0),
            state: CellState::Miss,
            ship: None
        }]
    );
}

#[test]
fn test_hit_counts_against_ship() {
    let (mut board, mut fleet, mut log) = defender();
    let struck = resolve_move(Coordinate::new(5, 6), &mut board, &mut fleet, &mut log)
        .unwrap()
        .unwrap();
    assert_eq!(struck.kind(), ShipKind::Cruiser);
    assert_eq!(struck.hits(), 1);
    assert_eq!(fleet.get(ShipKind::Cruiser).unwrap().hits(), 1);
    assert_eq!(board.cell_at(Coordinate::new(5, 6)).unwrap(), CellState::Hit);
    assert_eq!(log.latest().unwrap().ship, Some(ShipKind::Cruiser));
}

#[test]
fn test_repeated_move_changes_nothing() {
    let (mut board, mut fleet, mut log) = defender();
    resolve_move(Coordinate::new(1, 1), &mut board, &mut fleet, &mut log).unwrap();
    let snapshot = (board, fleet.clone(), log.clone());

    let err = resolve_move(Coordinate::new(1, 1), &mut board, &mut fleet, &mut log).unwrap_err();
    assert_eq!(err, EngineError::RepeatedMove(Coordinate::new(1, 1)));
    assert_eq!((board, fleet.clone(), log.clone()), snapshot);

    resolve_move(Coordinate::new(9, 9), &mut board, &mut fleet, &mut log).unwrap();
    let err = resolve_move(Coordinate::new(9, 9), &mut board, &mut fleet, &mut log).unwrap_err();
    assert_eq!(err, EngineError::RepeatedMove(Coordinate::new(9, 9)));
    assert_eq!(log.len(), 2);
}

#[test]
fn test_out_of_bounds_shot_is_rejected() {
    let (mut board, mut fleet, mut log) = defender();
    let err = resolve_move(Coordinate::new(10, 3), &mut board, &mut fleet, &mut log).unwrap_err();
    assert_eq!(err, EngineError::OutOfBounds { x: 10, y: 3 });
    assert!(log.is_empty());
    assert_eq!(board, Board::new());
}

#[test]
fn test_evaluate_is_pure() {
    let (board, fleet, _) = defender();
    let outcome = evaluate_move(Coordinate::new(2, 1), &board, &fleet).unwrap();
    assert_eq!(outcome.state, CellState::Hit);
    assert_eq!(outcome.ship.unwrap().hits(), 1);
    assert_eq!(fleet.get(ShipKind::Destroyer).unwrap().hits(), 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_sinking_and_win() {
    let (mut board, mut fleet, mut log) = defender();
    resolve_move(Coordinate::new(1, 1), &mut board, &mut fleet, &mut log).unwrap();
    assert!(!log.is_sunk(ShipKind::Destroyer));
    let last = resolve_move(Coordinate::new(2, 1), &mut board, &mut fleet, &mut log)
        .unwrap()
        .unwrap();
    assert!(last.is_sunk());
    assert!(log.is_sunk(ShipKind::Destroyer));
    assert!(!check_win(&fleet));

    for y in 5..8 {
        resolve_move(Coordinate::new(5, y), &mut board, &mut fleet, &mut log).unwrap();
    }
    assert!(check_win(&fleet));
    assert_eq!(log.hits_on(ShipKind::Cruiser), 3);
}

#[test]
fn test_last_n_is_chronological() {
    let (mut board, mut fleet, mut log) = defender();
    for x in 0..4 {
        resolve_move(Coordinate::new(x, 9), &mut board, &mut fleet, &mut log).unwrap();
    }
    let tail: Vec<_> = log.last_n(2).iter().map(|r| r.coordinate).collect();
    assert_eq!(tail, vec![Coordinate::new(2, 9), Coordinate::new(3, 9)]);
    assert_eq!(log.last_n(10).len(), 4);
    assert!(MoveLog::new(Side::Human).last_n(2).is_empty());
}
