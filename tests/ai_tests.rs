use rand::rngs::SmallRng;
use rand::SeedableRng;
use shipshape::{
    random_empty, resolve_move, Board, CellState, ChooseMove, Coordinate, Fleet, HuntAndTarget, Mode, MoveLog,
    MoveRecord, OpponentKind, Orientation, Scan, ShipKind, Side,
};

struct Target {
    board: Board,
    fleet: Fleet,
    log: MoveLog,
}

impl Target {
    fn new(ships: &[(ShipKind, (i32, i32), Orientation)]) -> Self {
        let mut fleet = Fleet::new(Side::Human);
        for &(kind, (x, y), o) in ships {
            fleet.place_ship(kind, Coordinate::new(x, y), o).unwrap();
        }
        Self {
            board: Board::new(),
            fleet,
            log: MoveLog::new(Side::Human),
        }
    }

    fn shoot(&mut self, x: i32, y: i32) {
        resolve_move(Coordinate::new(x, y), &mut self.board, &mut self.fleet, &mut self.log).unwrap();
    }

    fn mode(&self, strategy: HuntAndTarget) -> Mode {
        strategy.mode(&self.board, &self.log)
    }
}

fn one_empty_cell_at_corner() -> Board {
    let mut encoded = "o".repeat(99);
    encoded.push('.');
    encoded.parse().unwrap()
}

#[test]
fn test_scan_finds_the_only_empty_cell() {
    let board = one_empty_cell_at_corner();
    let log = MoveLog::new(Side::Human);
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        assert_eq!(Scan.choose_move(&board, &log, &mut rng), Some(Coordinate::new(9, 9)));
        assert_eq!(
            HuntAndTarget::new().choose_move(&board, &log, &mut rng),
            Some(Coordinate::new(9, 9))
        );
    }
}

#[test]
fn test_full_board_has_no_move() {
    let board: Board = "x".repeat(100).parse().unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(random_empty(&board, &mut rng), None);
    assert_eq!(Scan.choose_move(&board, &MoveLog::new(Side::Human), &mut rng), None);
}

#[test]
fn test_extends_horizontal_line() {
    let mut t = Target::new(&[(ShipKind::Carrier, (2, 4), Orientation::Horizontal)]);
    t.shoot(3, 4);
    t.shoot(4, 4);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(5, 4)));

    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(
        HuntAndTarget::new().choose_move(&t.board, &t.log, &mut rng),
        Some(Coordinate::new(5, 4))
    );
}

#[test]
fn test_extends_leftward_line() {
    let mut t = Target::new(&[(ShipKind::Carrier, (2, 4), Orientation::Horizontal)]);
    t.shoot(5, 4);
    t.shoot(4, 4);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(3, 4)));
}

#[test]
fn test_vertical_line_steps_along_x() {
    let mut t = Target::new(&[(ShipKind::Battleship, (4, 3), Orientation::Vertical)]);
    t.shoot(4, 3);
    t.shoot(4, 4);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(5, 4)));
    assert_eq!(
        t.mode(HuntAndTarget::with_corrected_axis()),
        Mode::Targeting(Coordinate::new(4, 5))
    );
}

#[test]
fn test_blocked_line_falls_back_to_hunting() {
    let mut t = Target::new(&[(ShipKind::Battleship, (6, 0), Orientation::Horizontal)]);
    t.shoot(8, 0);
    t.shoot(9, 0);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);

    let mut t = Target::new(&[(ShipKind::Carrier, (2, 4), Orientation::Horizontal)]);
    t.shoot(5, 4);
    t.shoot(3, 4);
    t.shoot(4, 4);
    // (5, 4) is already a hit
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);
}

#[test]
fn test_lone_hit_probes_neighbours_in_order() {
    let mut t = Target::new(&[(ShipKind::Cruiser, (5, 4), Orientation::Vertical)]);
    t.shoot(0, 0);
    t.shoot(5, 5);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(6, 5)));

    let mut t = Target::new(&[(ShipKind::Cruiser, (5, 4), Orientation::Vertical)]);
    t.shoot(6, 5);
    t.shoot(5, 5);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(4, 5)));

    let mut t = Target::new(&[(ShipKind::Cruiser, (5, 4), Orientation::Vertical)]);
    t.shoot(6, 5);
    t.shoot(4, 5);
    t.shoot(5, 5);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(5, 6)));
}

#[test]
fn test_probe_skips_off_board_neighbours() {
    let mut t = Target::new(&[(ShipKind::Destroyer, (9, 0), Orientation::Vertical)]);
    t.shoot(0, 9);
    t.shoot(9, 0);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(8, 0)));
}

#[test]
fn test_hits_on_different_ships_probe_around_newest() {
    let mut t = Target::new(&[
        (ShipKind::Destroyer, (0, 0), Orientation::Horizontal),
        (ShipKind::Submarine, (0, 1), Orientation::Horizontal),
    ]);
    t.shoot(1, 0);
    t.shoot(1, 1);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Targeting(Coordinate::new(2, 1)));
}

#[test]
fn test_hunting_cases() {
    // nothing logged yet
    let t = Target::new(&[(ShipKind::Destroyer, (0, 0), Orientation::Horizontal)]);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);

    // a single entry is not enough to target
    let mut t = Target::new(&[(ShipKind::Destroyer, (0, 0), Orientation::Horizontal)]);
    t.shoot(0, 0);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);

    // newest shot missed
    let mut t = Target::new(&[(ShipKind::Destroyer, (0, 0), Orientation::Horizontal)]);
    t.shoot(0, 0);
    t.shoot(7, 7);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);

    // newest hit sank the ship
    let mut t = Target::new(&[(ShipKind::Destroyer, (0, 0), Orientation::Horizontal)]);
    t.shoot(0, 0);
    t.shoot(1, 0);
    assert_eq!(t.mode(HuntAndTarget::new()), Mode::Hunting);
}

#[test]
fn test_targeted_move_is_always_empty() {
    let mut t = Target::new(&[(ShipKind::Cruiser, (5, 4), Orientation::Vertical)]);
    for (x, y) in [(6, 5), (4, 5), (5, 6), (5, 4)] {
        t.board.set_cell(Coordinate::new(x, y), CellState::Miss).unwrap();
    }
    t.shoot(0, 0);
    t.shoot(5, 5);
    let mut rng = SmallRng::seed_from_u64(9);
    for _ in 0..50 {
        let c = OpponentKind::HuntTarget
            .choose_move(&t.board, &t.log, &mut rng)
            .unwrap();
        assert!(t.board.is_empty_at(c));
    }
}

#[test]
fn test_opponent_tags() {
    assert_eq!("scan".parse::<OpponentKind>().unwrap(), OpponentKind::Scan);
    assert_eq!("fry".parse::<OpponentKind>().unwrap(), OpponentKind::Scan);
    assert_eq!("hunt-target".parse::<OpponentKind>().unwrap(), OpponentKind::HuntTarget);
    assert!("sniper".parse::<OpponentKind>().is_err());
    assert_eq!(OpponentKind::HuntTarget.to_string(), "hunt-target");
}

fn stored_log(coords: &[(i32, i32)]) -> MoveLog {
    let records: Vec<MoveRecord> = coords
        .iter()
        .map(|&(x, y)| MoveRecord {
            coordinate: Coordinate::new(x, y),
            state: CellState::Hit,
            ship: Some(ShipKind::Carrier),
        })
        .collect();
    let bytes = bincode::serialize(&(Side::Human, records)).unwrap();
    bincode::deserialize(&bytes).unwrap()
}

#[test]
fn test_extreme_stored_coordinates_fall_back_to_hunting() {
    let board = Board::new();
    let mut rng = SmallRng::seed_from_u64(8);
    for coords in [
        [(i32::MIN, 0), (i32::MAX, 0)],
        [(0, i32::MIN), (0, i32::MAX)],
        [(i32::MAX - 1, 5), (i32::MAX, 5)],
        [(3, i32::MIN + 1), (3, i32::MIN)],
    ] {
        let log = stored_log(&coords);
        for strategy in [HuntAndTarget::new(), HuntAndTarget::with_corrected_axis()] {
            assert_eq!(strategy.mode(&board, &log), Mode::Hunting, "{:?}", coords);
            let shot = strategy.choose_move(&board, &log, &mut rng).unwrap();
            assert!(shot.in_bounds());
        }
    }
}
