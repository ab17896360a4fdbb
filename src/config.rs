use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;
pub const NUM_SHIPS: usize = 5;

/// Ships every side places exactly once, in definition order.
pub const CATALOGUE: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Submarine,
    ShipKind::Cruiser,
    ShipKind::Destroyer,
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = catalogue_cells();

const fn catalogue_cells() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < NUM_SHIPS {
        total += CATALOGUE[i].length();
        i += 1;
    }
    total
}

/// Attempts made by random placement before giving up on a single ship.
pub const RANDOM_PLACEMENT_ATTEMPTS: usize = 100;
