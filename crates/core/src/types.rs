use serde::{Deserialize, Serialize};

/// Integer tile coordinate. `(0, 0)` is the top-left tile.
///
/// Field order keeps the derived `Ord` row-major, which the generator and the
/// pathfinder rely on for deterministic iteration over ordered sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub y: i32,
    pub x: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Saturates at the `i32` limits; anything that far out is off the grid anyway.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y.saturating_add(dy), x: self.x.saturating_add(dx) }
    }

    /// North, east, south, west.
    pub fn neighbors(self) -> [TilePos; 4] {
        [self.offset(0, -1), self.offset(1, 0), self.offset(0, 1), self.offset(-1, 0)]
    }

    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// Pixel-space position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    WallDestructible,
    Bush,
    SpawnPlayer,
    SpawnEnemy,
    SpawnPowerup,
    Decoration,
    Objective,
}

impl TileKind {
    pub const fn blocks_movement(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::WallDestructible)
    }

    pub const fn is_walkable(self) -> bool {
        !self.blocks_movement()
    }

    /// Bushes hide whoever stands in them.
    pub const fn conceals(self) -> bool {
        matches!(self, TileKind::Bush)
    }

    pub const fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Floor => 1,
            TileKind::Wall => 2,
            TileKind::WallDestructible => 3,
            TileKind::Bush => 4,
            TileKind::SpawnPlayer => 5,
            TileKind::SpawnEnemy => 6,
            TileKind::SpawnPowerup => 7,
            TileKind::Decoration => 8,
            TileKind::Objective => 9,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::WallDestructible => '%',
            TileKind::Bush => '"',
            TileKind::SpawnPlayer => '@',
            TileKind::SpawnEnemy => 'E',
            TileKind::SpawnPowerup => '+',
            TileKind::Decoration => ',',
            TileKind::Objective => '*',
        }
    }
}

/// Visual sub-type of a decoration marker. Only renderers care about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Circle,
    Line,
    Glow,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 3] =
        [DecorationKind::Circle, DecorationKind::Line, DecorationKind::Glow];
}
