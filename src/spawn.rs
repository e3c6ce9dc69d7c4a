//! Random placement on a possibly crowded board.

use rand::Rng;

use crate::grid::{Cell, Grid};

/// Draws before placement gives up looking for a free cell.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Samples cells uniformly until one is not `blocked`. After
/// `MAX_PLACEMENT_ATTEMPTS` draws the last sample is returned even if it is
/// blocked, so a full board degrades instead of stalling the game.
pub fn random_free_cell(
    grid: &Grid,
    rng: &mut impl Rng,
    blocked: impl Fn(Cell) -> bool,
) -> Cell {
    let mut cell = random_cell(grid, rng);
    let mut attempts = 1;
    while blocked(cell) && attempts < MAX_PLACEMENT_ATTEMPTS {
        cell = random_cell(grid, rng);
        attempts += 1;
    }
    cell
}

pub fn random_cell(grid: &Grid, rng: &mut impl Rng) -> Cell {
    Cell::new(
        rng.gen_range(1..=grid.columns),
        rng.gen_range(1..=grid.rows),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn avoids_blocked_cells() {
        let grid = Grid::new(4, 4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let cell = random_free_cell(&grid, &mut rng, |c| c.x > 2 || c.y > 2);
            assert!(cell.x <= 2 && cell.y <= 2);
        }
    }

    #[test]
    fn full_board_falls_back_to_last_sample() {
        let grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(1);
        let cell = random_free_cell(&grid, &mut rng, |_| true);
        assert!(grid.contains(cell));
    }
}
