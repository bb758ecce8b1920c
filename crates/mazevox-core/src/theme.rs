//! Weighted block palettes, one per floor.
//!
//! A theme pairs a floor palette with a wall palette; each draw is an
//! independent weighted pick, so large fills come out speckled rather than
//! uniform. Themes are resolved by name at generation time; an unknown or
//! absent name falls back to a random stock palette, chosen independently
//! per floor.

use crate::world::Block;
use rand::Rng;

/// A weighted candidate list: `(block name, weight)`.
type Palette = &'static [(&'static str, u32)];

const STONE_FLOOR: Palette = &[("stone", 1)];
const STONE_WALLS: Palette = &[
    ("stone_bricks", 3),
    ("mossy_stone_bricks", 1),
    ("deepslate_bricks", 1),
    ("polished_blackstone_bricks", 1),
];

const CHERRY_FLOOR: Palette = &[("pink_glazed_terracotta", 1)];
const CHERRY_WALLS: Palette = &[
    ("cherry_wood", 1),
    ("cherry_planks", 3),
    ("stripped_cherry_wood", 1),
];

const STOCK_THEMES: &[(&str, Palette, Palette)] = &[
    ("stone", STONE_FLOOR, STONE_WALLS),
    ("cherry", CHERRY_FLOOR, CHERRY_WALLS),
];

/// Names of the stock themes, in registration order.
pub fn theme_names() -> Vec<&'static str> {
    STOCK_THEMES.iter().map(|&(name, _, _)| name).collect()
}

/// One floor's appearance provider.
#[derive(Debug, Clone, Copy)]
pub struct FloorTheme {
    name: &'static str,
    floor: Palette,
    walls: Palette,
}

impl FloorTheme {
    /// Resolve a theme by name. Unknown or absent names pick a random
    /// stock theme.
    pub fn resolve(name: Option<&str>, rng: &mut impl Rng) -> FloorTheme {
        let entry = name
            .and_then(|n| STOCK_THEMES.iter().find(|&&(t, _, _)| t == n))
            .unwrap_or_else(|| &STOCK_THEMES[rng.gen_range(0..STOCK_THEMES.len())]);
        FloorTheme {
            name: entry.0,
            floor: entry.1,
            walls: entry.2,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Weighted draw from the floor palette.
    pub fn pick_floor(&self, rng: &mut impl Rng) -> Block {
        Block::Cube(weighted_pick(self.floor, rng))
    }

    /// Weighted draw from the wall palette.
    pub fn pick_wall(&self, rng: &mut impl Rng) -> Block {
        Block::Cube(weighted_pick(self.walls, rng))
    }
}

/// Cumulative-weight draw. Palettes are static and non-empty with weights
/// of at least 1, so the roll always lands on an entry.
fn weighted_pick(palette: Palette, rng: &mut impl Rng) -> &'static str {
    let total: u32 = palette.iter().map(|&(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for &(block, weight) in palette {
        if roll < weight {
            return block;
        }
        roll -= weight;
    }
    unreachable!("weighted roll exceeded palette total")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_known_theme_resolves_by_name() {
        let mut rng = StdRng::seed_from_u64(0);
        let theme = FloorTheme::resolve(Some("cherry"), &mut rng);
        assert_eq!(theme.name(), "cherry");
        assert_eq!(theme.pick_floor(&mut rng), Block::Cube("pink_glazed_terracotta"));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_stock() {
        let mut rng = StdRng::seed_from_u64(7);
        let theme = FloorTheme::resolve(Some("does_not_exist"), &mut rng);
        assert!(theme_names().contains(&theme.name()));
        let theme = FloorTheme::resolve(None, &mut rng);
        assert!(theme_names().contains(&theme.name()));
    }

    #[test]
    fn test_wall_draws_stay_in_palette() {
        let mut rng = StdRng::seed_from_u64(11);
        let theme = FloorTheme::resolve(Some("stone"), &mut rng);
        for _ in 0..200 {
            let Block::Cube(name) = theme.pick_wall(&mut rng) else {
                panic!("wall pick must be a cube");
            };
            assert!(STONE_WALLS.iter().any(|&(b, _)| b == name));
        }
    }

    #[test]
    fn test_weights_bias_the_draw() {
        // stone_bricks carries half the total weight; over many draws it
        // should dominate every singleton entry.
        let mut rng = StdRng::seed_from_u64(42);
        let theme = FloorTheme::resolve(Some("stone"), &mut rng);
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..6000 {
            if let Block::Cube(name) = theme.pick_wall(&mut rng) {
                *counts.entry(name).or_default() += 1;
            }
        }
        let bricks = counts["stone_bricks"];
        for &(name, weight) in STONE_WALLS {
            if weight == 1 {
                assert!(
                    bricks > counts[name],
                    "stone_bricks ({}) should outnumber {} ({})",
                    bricks,
                    name,
                    counts[name]
                );
            }
        }
    }
}
