use ftr_core::palette::{DARK_GRAY, GRAY, WHITE};
use ftr_core::{DrawCommand, MeshKind, Painter};

use crate::state::SceneState;
use crate::truck::draw_car;

pub const TILE_SIZE: f32 = 0.1;
pub const TILE_HEIGHT: f32 = 0.01;
/// Tiles per half side; the floor spans `[-FLOOR_HALF_TILES, FLOOR_HALF_TILES)`.
pub const FLOOR_HALF_TILES: i32 = 10;

/// Record the whole scene, floor first, in model space.
pub fn build_scene(scene: &SceneState) -> Vec<DrawCommand> {
    let mut painter = Painter::new(scene.render_mode);
    draw_floor(&mut painter);
    draw_car(&mut painter, scene);
    painter.finish()
}

fn draw_floor(p: &mut Painter) {
    for i in -FLOOR_HALF_TILES..FLOOR_HALF_TILES {
        for j in -FLOOR_HALF_TILES..FLOOR_HALF_TILES {
            let color = if (i + j) % 2 == 0 { DARK_GRAY } else { WHITE };
            p.scoped(|p| {
                p.translate(
                    i as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                    0.0,
                    j as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                );
                p.scale(TILE_SIZE, TILE_HEIGHT, TILE_SIZE);
                p.solid(MeshKind::Cube, color, GRAY);
            });
        }
    }
}
