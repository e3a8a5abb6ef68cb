//! Level layout generation
//!
//! Every level is the same grid of cells; only the brick kinds (and Normal
//! brick colors) are random. The caller supplies the RNG so a seed fully
//! determines the layout.

use rand::Rng;

use super::rect::Rect;
use super::state::{Brick, BrickColor, BrickKind};
use crate::consts::ARENA_WIDTH;
use crate::tuning::Tuning;

const NORMAL_COLORS: [BrickColor; 3] = [BrickColor::Red, BrickColor::Green, BrickColor::Blue];

/// Width of one brick so that `cols` bricks and `cols + 1` gaps span the arena
pub fn brick_width(tuning: &Tuning) -> f32 {
    let cols = tuning.brick_cols.max(1) as f32;
    (ARENA_WIDTH - (cols + 1.0) * tuning.brick_spacing) / cols
}

/// Geometry of one grid cell
pub fn cell_rect(row: usize, col: usize, tuning: &Tuning) -> Rect {
    let w = brick_width(tuning);
    Rect::new(
        tuning.brick_spacing + col as f32 * (w + tuning.brick_spacing),
        tuning.brick_top + row as f32 * (tuning.brick_height + tuning.brick_spacing),
        w,
        tuning.brick_height,
    )
}

/// Build the bricks for a level (1-based), row by row, left to right.
///
/// The top row is always Tough. Below it each brick is Tough with
/// `Tuning::tough_chance(level)`, otherwise Normal with a random color.
pub fn generate_level<R: Rng + ?Sized>(level: u32, tuning: &Tuning, rng: &mut R) -> Vec<Brick> {
    let tough_chance = tuning.tough_chance(level).clamp(0.0, 1.0);
    let mut bricks = Vec::with_capacity(tuning.brick_rows * tuning.brick_cols);

    for row in 0..tuning.brick_rows {
        for col in 0..tuning.brick_cols {
            let kind = if row == 0 || rng.random_bool(tough_chance) {
                BrickKind::Tough
            } else {
                BrickKind::Normal
            };
            let base_color = match kind {
                BrickKind::Tough => BrickColor::Blue,
                BrickKind::Normal => NORMAL_COLORS[rng.random_range(0..NORMAL_COLORS.len())],
            };
            bricks.push(Brick::new(cell_rect(row, col, tuning), kind, base_color));
        }
    }

    let tough = bricks.iter().filter(|b| b.kind == BrickKind::Tough).count();
    log::debug!(
        "Level {}: {} bricks ({} tough, chance {:.2})",
        level,
        bricks.len(),
        tough,
        tough_chance
    );

    bricks
}
