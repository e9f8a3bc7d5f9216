//! Flood-fill connectivity gate applied after generation.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::grid::TileGrid;
use crate::mapgen::ZoneSets;
use crate::types::TilePos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub reachable: usize,
    pub total_walkable: usize,
}

impl ConnectivityReport {
    /// Fraction of walkable tiles reached; an arena with no walkable tiles
    /// reports zero.
    pub fn ratio(&self) -> f64 {
        if self.total_walkable == 0 {
            return 0.0;
        }
        self.reachable as f64 / self.total_walkable as f64
    }
}

/// Accept/reject decision. A missing player spawn is its own variant since
/// every spawn and routing query assumes one exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted(ConnectivityReport),
    LowConnectivity(ConnectivityReport),
    MissingPlayerSpawn,
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&ConnectivityReport> {
        match self {
            ValidationOutcome::Accepted(report) | ValidationOutcome::LowConnectivity(report) => {
                Some(report)
            }
            ValidationOutcome::MissingPlayerSpawn => None,
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        self.report().map(ConnectivityReport::ratio)
    }
}

pub fn validate(grid: &TileGrid, zones: &ZoneSets, min_ratio: f64) -> ValidationOutcome {
    let Some(spawn) = zones.player_spawn() else {
        return ValidationOutcome::MissingPlayerSpawn;
    };

    let report = ConnectivityReport {
        reachable: reachable_walkable_tiles(grid, spawn).len(),
        total_walkable: grid.walkable_count(),
    };
    log::debug!(
        "connectivity {}/{} ({:.3})",
        report.reachable,
        report.total_walkable,
        report.ratio()
    );

    if report.ratio() >= min_ratio {
        ValidationOutcome::Accepted(report)
    } else {
        ValidationOutcome::LowConnectivity(report)
    }
}

/// 4-connected flood fill over walkable tiles. Empty when `start` itself is
/// not walkable.
pub fn reachable_walkable_tiles(grid: &TileGrid, start: TilePos) -> BTreeSet<TilePos> {
    let mut visited = BTreeSet::new();
    if !grid.is_walkable(start) {
        return visited;
    }
    visited.insert(start);
    let mut queue = VecDeque::from([start]);

    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbors() {
            if grid.is_walkable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    #[test]
    fn fully_open_ring_validates_with_full_ratio() {
        let grid = TileGrid::walled(10, 10, 64.0).unwrap();
        let zones = ZoneSets::with_player_spawn(TilePos::new(5, 5));

        let outcome = validate(&grid, &zones, 0.8);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.ratio(), Some(1.0));
        assert_eq!(
            outcome.report(),
            Some(&ConnectivityReport { reachable: 64, total_walkable: 64 })
        );
    }

    #[test]
    fn split_arena_reports_low_connectivity() {
        let mut grid = TileGrid::walled(10, 10, 64.0).unwrap();
        for y in 0..10 {
            grid.set_tile(TilePos::new(3, y), TileKind::Wall);
        }
        let zones = ZoneSets::with_player_spawn(TilePos::new(1, 1));

        let outcome = validate(&grid, &zones, 0.8);
        let ValidationOutcome::LowConnectivity(report) = outcome else {
            panic!("expected low connectivity, got {outcome:?}");
        };
        assert_eq!(report.reachable, 16);
        assert_eq!(report.total_walkable, 56);
    }

    #[test]
    fn missing_player_spawn_fails_regardless_of_ratio() {
        let grid = TileGrid::walled(10, 10, 64.0).unwrap();
        let outcome = validate(&grid, &ZoneSets::default(), 0.0);
        assert_eq!(outcome, ValidationOutcome::MissingPlayerSpawn);
        assert_eq!(outcome.ratio(), None);
    }

    #[test]
    fn flood_fill_counts_markers_as_walkable() {
        let mut grid = TileGrid::walled(6, 6, 8.0).unwrap();
        grid.set_tile(TilePos::new(2, 2), TileKind::Bush);
        grid.set_tile(TilePos::new(3, 3), TileKind::Decoration);
        grid.set_tile(TilePos::new(4, 1), TileKind::WallDestructible);
        let reached = reachable_walkable_tiles(&grid, TilePos::new(1, 1));
        assert_eq!(reached.len(), 15);
        assert!(reached.contains(&TilePos::new(2, 2)));
        assert!(!reached.contains(&TilePos::new(4, 1)));
    }

    #[test]
    fn flood_fill_from_wall_is_empty() {
        let grid = TileGrid::walled(6, 6, 8.0).unwrap();
        assert!(reachable_walkable_tiles(&grid, TilePos::new(0, 0)).is_empty());
    }
}
