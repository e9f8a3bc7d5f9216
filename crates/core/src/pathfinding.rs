//! Four-directional A* routing over walkable tiles.
//!
//! The open set is a plain vector scanned linearly for the lowest `f`, with
//! ties going to the earliest entry. Arenas stay around 40×40 tiles, where the
//! scan is cheap, and the insertion-order tie-break decides which of several
//! equal-length routes comes back. A heap would pick differently.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::TileGrid;
use crate::types::TilePos;

struct OpenEntry {
    pos: TilePos,
    f: u32,
}

/// Shortest route from `start` to `goal`, both ends included. Empty when
/// either end is blocked or out of bounds, or the goal is cut off.
pub fn find_path(grid: &TileGrid, start: TilePos, goal: TilePos) -> Vec<TilePos> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let mut open = vec![OpenEntry { pos: start, f: start.manhattan(goal) }];
    let mut closed = BTreeSet::new();
    let mut g_score = BTreeMap::from([(start, 0_u32)]);
    let mut came_from = BTreeMap::new();

    while let Some(index) = lowest_f(&open) {
        let current = open.remove(index).pos;
        if current == goal {
            return reconstruct(&came_from, goal);
        }
        closed.insert(current);

        let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
        for next in current.neighbors() {
            if !grid.is_walkable(next) || closed.contains(&next) {
                continue;
            }
            let tentative = current_g.saturating_add(1);
            let queued = open.iter().position(|entry| entry.pos == next);
            if queued.is_some() && tentative >= g_score.get(&next).copied().unwrap_or(u32::MAX) {
                continue;
            }

            came_from.insert(next, current);
            g_score.insert(next, tentative);
            let f = tentative.saturating_add(next.manhattan(goal));
            match queued {
                Some(index) => open[index].f = f,
                None => open.push(OpenEntry { pos: next, f }),
            }
        }
    }
    Vec::new()
}

/// Earliest entry with the strictly lowest `f`.
fn lowest_f(open: &[OpenEntry]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, entry) in open.iter().enumerate() {
        if best.is_none_or(|(_, f)| entry.f < f) {
            best = Some((index, entry.f));
        }
    }
    best.map(|(index, _)| index)
}

fn reconstruct(came_from: &BTreeMap<TilePos, TilePos>, goal: TilePos) -> Vec<TilePos> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}
