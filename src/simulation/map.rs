use bevy_ecs::prelude::*;

use crate::components::world::Position;
use crate::simulation::rng::SimRng;

pub const TILE_BUSH: u8 = 1;
pub const TILE_STONE: u8 = 3;
pub const TILE_WELL: u8 = 5;
pub const TILE_FIRE: u8 = 6;

/// Sampling is assumed to succeed quickly on any reasonable map; if it does
/// not, the map violates the density assumption and we fail loudly instead
/// of spinning forever.
const MAX_SAMPLE_ATTEMPTS: u32 = 1024;

/// Read-only walkability grid supplied by the server in the world-ready
/// payload. The core only uses it to pick valid spawn and wander targets.
#[derive(Resource, Debug, Clone)]
pub struct VtMap {
    /// Row-major tile codes.
    data: Vec<Vec<u8>>,
    tile_width: f32,
    tile_height: f32,
}

impl VtMap {
    pub fn new(data: Vec<Vec<u8>>, tile_width: f32, tile_height: f32) -> Self {
        Self {
            data,
            tile_width,
            tile_height,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.data.len()
    }

    pub fn n_cols(&self) -> usize {
        self.data.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn code_at(&self, row: usize, col: usize) -> Option<u8> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Bush, stone, and fire tiles are excluded from spawn/wander candidates.
    pub fn is_spawn_candidate(code: u8) -> bool {
        !matches!(code, TILE_BUSH | TILE_STONE | TILE_FIRE)
    }

    /// World-space center of a tile.
    pub fn tile_center(&self, row: usize, col: usize) -> Position {
        Position::new(
            col as f32 * self.tile_width + self.tile_width / 2.0,
            row as f32 * self.tile_height + self.tile_height / 2.0,
        )
    }

    /// Uniformly random walkable point (tile codes 1, 3, 6 excluded).
    ///
    /// Panics if no qualifying tile turns up within the attempt bound; an
    /// unbounded retry loop on a degenerate map would be a fatal defect.
    pub fn random_walkable_position(&self, rng: &mut SimRng) -> Position {
        let rows = self.n_rows();
        let cols = self.n_cols();
        assert!(rows > 0 && cols > 0, "walkability map is empty");

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let row = rng.next_below(rows as u64) as usize;
            let col = rng.next_below(cols as u64) as usize;
            if let Some(code) = self.code_at(row, col) {
                if Self::is_spawn_candidate(code) {
                    return self.tile_center(row, col);
                }
            }
        }

        panic!("no walkable tile found in {} attempts", MAX_SAMPLE_ATTEMPTS);
    }

    /// Random walkable point farther than `min_distance` from `from`, used
    /// for wander targets so monsters do not circle their own position.
    ///
    /// Panics under the same attempt bound as `random_walkable_position`.
    pub fn random_distant_position(
        &self,
        from: Position,
        min_distance: f32,
        rng: &mut SimRng,
    ) -> Position {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let candidate = self.random_walkable_position(rng);
            if from.distance_to(candidate) > min_distance {
                return candidate;
            }
        }

        panic!(
            "no walkable tile farther than {} units found in {} attempts",
            min_distance, MAX_SAMPLE_ATTEMPTS
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map(rows: usize, cols: usize) -> VtMap {
        VtMap::new(vec![vec![0; cols]; rows], 64.0, 64.0)
    }

    #[test]
    fn spawn_candidates_exclude_bush_stone_fire() {
        assert!(VtMap::is_spawn_candidate(0));
        assert!(VtMap::is_spawn_candidate(TILE_WELL));
        assert!(!VtMap::is_spawn_candidate(TILE_BUSH));
        assert!(!VtMap::is_spawn_candidate(TILE_STONE));
        assert!(!VtMap::is_spawn_candidate(TILE_FIRE));
    }

    #[test]
    fn random_walkable_position_lands_on_tile_center() {
        let map = open_map(4, 4);
        let mut rng = SimRng::new(1);
        let pos = map.random_walkable_position(&mut rng);
        assert!(pos.x >= 32.0 && pos.x <= 4.0 * 64.0 - 32.0);
        assert!(pos.y >= 32.0 && pos.y <= 4.0 * 64.0 - 32.0);
        // Tile centers sit at odd multiples of half a tile.
        assert_eq!((pos.x - 32.0) % 64.0, 0.0);
        assert_eq!((pos.y - 32.0) % 64.0, 0.0);
    }

    #[test]
    fn random_walkable_position_skips_excluded_codes() {
        // Single walkable tile in a field of stone.
        let mut data = vec![vec![TILE_STONE; 3]; 3];
        data[1][2] = 0;
        let map = VtMap::new(data, 10.0, 10.0);
        let mut rng = SimRng::new(9);
        for _ in 0..8 {
            let pos = map.random_walkable_position(&mut rng);
            assert_eq!(pos, map.tile_center(1, 2));
        }
    }

    #[test]
    fn random_distant_position_honors_minimum() {
        let map = open_map(20, 20); // 1280 x 1280 world
        let mut rng = SimRng::new(5);
        let from = map.tile_center(0, 0);
        for _ in 0..8 {
            let target = map.random_distant_position(from, 600.0, &mut rng);
            assert!(from.distance_to(target) > 600.0);
        }
    }

    #[test]
    #[should_panic(expected = "no walkable tile")]
    fn sampling_fails_loudly_on_degenerate_map() {
        let map = VtMap::new(vec![vec![TILE_STONE; 2]; 2], 10.0, 10.0);
        let mut rng = SimRng::new(3);
        map.random_walkable_position(&mut rng);
    }
}
