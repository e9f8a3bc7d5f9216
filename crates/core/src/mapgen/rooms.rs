//! Rectangular rooms joined by single-width L corridors.

use crate::config::RoomParams;
use crate::grid::TileGrid;
use crate::types::{TileKind, TilePos};

use super::carve::{carve_l_path, carve_rect};
use super::seed::ArenaRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Room {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Room {
    fn center(self) -> TilePos {
        TilePos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test that also rejects rooms closer than one tile apart.
    fn crowds(self, other: &Room) -> bool {
        !(self.x + self.width + 1 < other.x
            || self.x > other.x + other.width + 1
            || self.y + self.height + 1 < other.y
            || self.y > other.y + other.height + 1)
    }
}

pub(super) fn carve_rooms(
    grid: &mut TileGrid,
    params: &RoomParams,
    rng: &mut ArenaRng,
) -> Vec<TilePos> {
    grid.fill(TileKind::Wall);

    let rooms = place_rooms(grid, params, rng);
    for room in &rooms {
        carve_rect(
            grid,
            TilePos::new(room.x, room.y),
            room.width as usize,
            room.height as usize,
        );
    }

    for pair in rooms.windows(2) {
        connect(grid, pair[0], pair[1]);
    }
    if rooms.len() > 2 {
        connect(grid, rooms[0], rooms[rooms.len() - 1]);
    }
    for _ in 0..rooms.len() / 2 {
        let first = rooms[rng.below(rooms.len())];
        let second = rooms[rng.below(rooms.len())];
        if first != second {
            connect(grid, first, second);
        }
    }

    grid.stamp_border();

    let objective_size = params.objective_room_size as i32;
    rooms
        .iter()
        .filter(|room| room.width >= objective_size && room.height >= objective_size)
        .map(|room| room.center())
        .collect()
}

fn place_rooms(grid: &TileGrid, params: &RoomParams, rng: &mut ArenaRng) -> Vec<Room> {
    let size_span = params.max_room_size - params.min_room_size;
    let mut rooms: Vec<Room> = Vec::with_capacity(params.room_count);

    for _ in 0..params.room_count * 2 {
        if rooms.len() >= params.room_count {
            break;
        }
        let width = params.min_room_size + if size_span > 0 { rng.below(size_span) } else { 0 };
        let height = params.min_room_size + if size_span > 0 { rng.below(size_span) } else { 0 };
        let span_x = grid.width().saturating_sub(width + 4);
        let span_y = grid.height().saturating_sub(height + 4);
        let (Some(x), Some(y)) = (rng.coordinate(2, span_x), rng.coordinate(2, span_y)) else {
            continue;
        };

        let candidate = Room { x, y, width: width as i32, height: height as i32 };
        if rooms.iter().any(|room| room.crowds(&candidate)) {
            continue;
        }
        rooms.push(candidate);
    }

    rooms
}

fn connect(grid: &mut TileGrid, from: Room, to: Room) {
    carve_l_path(grid, from.center(), to.center(), 1);
}
