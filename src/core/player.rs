//! Sides of a duel and per-side data storage.
//!
//! Solo play still tracks two sides: the player who owns every card in the
//! simulation, and the opponent, who only has a life point total that
//! effects can raise or lower.
//!
//! ## SideMap
//!
//! Per-side storage indexed by `Side`, following the same shape as a
//! two-entry player map.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The simulated player. Owns every card instance.
    Player,
    /// The opposing side. Only its life points are modeled.
    Opponent,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use rust_duel::core::{Side, SideMap};
///
/// let mut life: SideMap<i64> = SideMap::with_value(8000);
/// life[Side::Opponent] -= 1000;
///
/// assert_eq!(life[Side::Player], 8000);
/// assert_eq!(life[Side::Opponent], 7000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Opponent)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Opponent);
        assert_eq!(Side::Opponent.opponent(), Side::Player);
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<i32> = SideMap::new(|s| if s == Side::Player { 1 } else { 2 });

        assert_eq!(map[Side::Player], 1);
        assert_eq!(map[Side::Opponent], 2);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i64> = SideMap::with_value(8000);

        map[Side::Player] -= 500;

        assert_eq!(map[Side::Player], 7500);
        assert_eq!(map[Side::Opponent], 8000);
    }

    #[test]
    fn test_side_map_iter() {
        let map: SideMap<i32> = SideMap::new(|s| if s == Side::Player { 10 } else { 20 });

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Player, &10), (Side::Opponent, &20)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Side::Player), "player");
        assert_eq!(format!("{}", Side::Opponent), "opponent");
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<i64> = SideMap::with_value(4000);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
