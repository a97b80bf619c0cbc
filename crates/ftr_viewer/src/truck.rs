//! Fire truck model.
//!
//! Everything below is drawn relative to the car frame: translated to the
//! car position and turned by the body rotation. Part sizes are expressed in
//! terms of the wheel radius `r` and wheel width `ww` from [`TruckMetrics`].

use ftr_core::palette::*;
use ftr_core::{MeshKind, Painter};

use crate::blinker::Blinker;
use crate::state::{LadderState, SceneState, TruckMetrics};

/// Thickness of window panes.
const PANE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LadderSection {
    Base,
    Fly,
}

pub fn draw_car(p: &mut Painter, scene: &SceneState) {
    let m = &scene.metrics;
    let car = &scene.car;
    p.scoped(|p| {
        p.translate(car.position.x, car.position.y, car.position.z);
        p.rotate_y(car.body_rotation);
        draw_wheels(p, m, car.wheel_rotation);
        draw_body(p, m);
        draw_blinkers(p, m, &scene.blinkers);
        draw_ladder(p, m, &scene.ladder);
    });
}

fn draw_wheels(p: &mut Painter, m: &TruckMetrics, rotation: f32) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    for pos in m.wheel_positions {
        p.scoped(|p| {
            p.translate(pos.x, pos.y, pos.z);
            p.rotate_x(90.0);
            p.rotate_y(rotation);
            p.scale(r, ww, r);
            p.solid(MeshKind::Torus, BLACK, DARK_GRAY);
            p.scoped(|p| {
                p.scale(1.0, ww / 2.0, 1.0);
                p.solid(MeshKind::Cylinder, GRAY, DARK_GRAY);
            });
            for bar in 0..2 {
                p.scoped(|p| {
                    if bar == 0 {
                        p.rotate_y(90.0);
                    }
                    p.scale(1.0, ww / 2.0 + 0.1, 0.1);
                    p.solid(MeshKind::Cube, RED, DARK_RED);
                });
            }
        });
    }
}

fn draw_body(p: &mut Painter, m: &TruckMetrics) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    let base_width = m.dist_x + 3.0 * r;
    p.scoped(|p| {
        p.translate(0.0, r / 3.0, 0.0);
        p.scoped(|p| {
            p.scale(base_width, 0.7 * r, m.dist_z);
            p.solid(MeshKind::Cube, RED, DARK_RED);
        });
        for side in [-1.0, 1.0] {
            draw_bumpers(p, m, side);
        }
        // stripe
        p.scoped(|p| {
            p.translate(0.0, ww, 0.0);
            p.scale(base_width + 1.5 * ww, 0.55 * ww, m.dist_z + ww);
            p.solid(MeshKind::Cube, DARK_RED, RED);
        });
        draw_cabin(p, m);
    });
}

fn draw_bumpers(p: &mut Painter, m: &TruckMetrics, side: f32) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    let height = 0.7 * r;
    p.scoped(|p| {
        p.translate(0.0, 0.0, side * (m.dist_z + ww / 2.0) / 2.0);
        p.scale(m.dist_x - ww / 4.0, height, ww / 2.0);
        p.solid(MeshKind::Cube, WHITE, LIGHT_GRAY);
    });
    p.scoped(|p| {
        p.translate(side * (m.dist_x + ww), 0.0, 0.0);
        p.scale(ww, height, m.dist_z + ww);
        p.solid(MeshKind::Cube, WHITE, LIGHT_GRAY);
        draw_plate(p, side);
    });
}

/// License plate and grille, in the end bumper's unit frame.
fn draw_plate(p: &mut Painter, side: f32) {
    p.scoped(|p| {
        p.translate(side / 2.0, 0.0, 0.0);
        p.scale(0.01, 0.5, 0.45);
        p.solid(MeshKind::Cube, ORANGE, DARK_ORANGE);
        p.scoped(|p| {
            p.translate(side, 0.0, 0.4 * side);
            p.scale(0.0, 1.0, 0.25);
            p.solid(MeshKind::Cube, BLUE, LIGHT_BLUE);
        });
        draw_grille(p, side);
    });
}

fn draw_grille(p: &mut Painter, side: f32) {
    for j in 0..3 {
        let offset = 0.2 * j as f32;
        for bar in [-1.0, 1.0] {
            p.scoped(|p| {
                p.translate(0.1 * side, 0.25 * bar, -side * (offset - 0.07));
                p.scale(1.0, 0.05, 0.1);
                p.solid(MeshKind::Cube, BLACK, BLACK);
            });
        }
        p.scoped(|p| {
            let inset = if j == 2 { 0.07 } else { 0.12 };
            p.translate(side, 0.0, -side * (offset - inset));
            if j == 1 {
                p.scoped(|p| {
                    p.translate(0.0, -0.15, -0.1 * side);
                    p.scale(1.0, 0.2, 0.01);
                    p.solid(MeshKind::Cube, BLACK, BLACK);
                });
                p.scoped(|p| {
                    p.rotate_x(90.0);
                    p.translate(0.0, -0.08 * side, 0.05);
                    p.scale(1.0, 0.05, 0.01);
                    p.solid(MeshKind::Cube, BLACK, BLACK);
                });
            }
            p.scale(0.05, 0.5, 0.01);
            p.solid(MeshKind::Cube, BLACK, BLACK);
        });
    }
}

fn draw_cabin(p: &mut Painter, m: &TruckMetrics) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    p.scoped(|p| {
        p.translate(-2.0 * r, 1.64 * r, 0.0);
        p.scoped(|p| {
            p.scale(2.0 * r, 2.0 * r, m.dist_z + ww);
            p.solid(MeshKind::Cube, RED, DARK_RED);
        });
        for side in [-1.0, 1.0] {
            p.scoped(|p| {
                p.translate(-ww / 2.0, 0.1 * r, side * (m.dist_z / 2.0 + ww / 2.0));
                p.scale(1.3 * r, 1.3 * r, PANE);
                p.solid(MeshKind::Cube, LIGHT_BLUE, DARK_GRAY);
            });
        }
        p.scoped(|p| {
            p.translate(-r, 0.1 * r, 0.0);
            p.scale(PANE, 1.3 * r, 3.0 * r);
            p.solid(MeshKind::Cube, LIGHT_BLUE, DARK_GRAY);
        });
        draw_cargo(p, m);
    });
}

fn draw_cargo(p: &mut Painter, m: &TruckMetrics) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    p.scoped(|p| {
        p.translate(3.1 * r, -0.4 * ww, 0.0);
        p.scale(3.8 * r, 1.6 * r, m.dist_z + ww);
        p.solid(MeshKind::Cube, RED, DARK_RED);
        for side in [-1.0, 1.0] {
            p.scoped(|p| {
                p.translate(0.5, 0.0, 0.25 * side);
                p.scale(0.1 * PANE, 1.0, 0.5);
                p.solid(MeshKind::Cube, RED, DARK_RED);
                // handle
                p.translate(1.0, -0.1, -0.3 * side);
                p.scale(0.0, 0.03, 0.2);
                p.solid(MeshKind::Cube, GRAY, DARK_GRAY);
            });
        }
    });
}

fn draw_blinkers(p: &mut Painter, m: &TruckMetrics, blinkers: &[Blinker]) {
    for blinker in blinkers {
        p.scoped(|p| {
            let pos = blinker.position;
            p.translate(pos.x, pos.y, pos.z);
            p.scale(0.01, m.blinker_radius, m.blinker_radius);
            p.plain(MeshKind::Sphere, blinker.color);
        });
    }
}

fn draw_ladder(p: &mut Painter, m: &TruckMetrics, ladder: &LadderState) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    p.scoped(|p| {
        p.translate(2.0 * r, 5.4 * ww, 0.0);
        p.rotate_y(ladder.rotation);
        p.scoped(|p| {
            p.scale(1.3 * r, ww / 2.0, 1.3 * r);
            p.solid(MeshKind::Cylinder, ORANGE, DARK_ORANGE);
        });
        p.scoped(|p| {
            p.translate(0.0, 0.6 * ww, 0.0);
            p.scoped(|p| {
                p.scale(1.5 * ww, ww, 1.5 * ww);
                p.solid(MeshKind::Cube, GRAY, DARK_GRAY);
            });
            for section in [LadderSection::Base, LadderSection::Fly] {
                for rail in [-1.0, 1.0] {
                    p.scoped(|p| {
                        p.translate(0.0, 0.0, 0.8 * ww * rail);
                        p.rotate_z(ladder.angle);
                        if section == LadderSection::Fly {
                            p.translate(-ladder.extension - 0.1 * ww, 0.3 * ww, 0.0);
                        }
                        p.translate(-1.6 * r, 0.1 * ww, 0.0);
                        p.scoped(|p| {
                            p.scale(3.5 * r, 0.25 * ww, 0.2 * ww);
                            p.solid(MeshKind::Cube, GRAY, DARK_GRAY);
                        });
                        // Rungs hang off the second rail and reach back to the first.
                        if rail > 0.0 {
                            draw_rungs(p, m, ladder.steps, section);
                        }
                    });
                }
            }
        });
    });
}

fn draw_rungs(p: &mut Painter, m: &TruckMetrics, steps: u32, section: LadderSection) {
    let (r, ww) = (m.wheel_radius, m.wheel_width);
    let spacing = 2.9 * r / steps as f32;
    let start = match section {
        LadderSection::Base => -1.6 * r,
        LadderSection::Fly => -1.5 * r - 0.02,
    };
    for k in 0..steps {
        p.scoped(|p| {
            p.translate(spacing * k as f32 + start, 0.0, -0.8 * ww);
            p.scale(0.3 * spacing, 0.1 * ww, 1.5 * ww);
            p.solid(MeshKind::Cube, GRAY, DARK_GRAY);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftr_core::{DrawCommand, RenderMode};
    use glam::Vec3;

    const WHEEL_COMMANDS: usize = 4 * 8;
    const BODY_COMMANDS: usize = 82;
    const BLINKER_COMMANDS: usize = 4;

    fn car_commands(scene: &SceneState) -> Vec<DrawCommand> {
        let mut painter = Painter::new(scene.render_mode);
        draw_car(&mut painter, scene);
        painter.finish()
    }

    fn ladder_commands(m: &TruckMetrics, ladder: &LadderState) -> Vec<DrawCommand> {
        let mut painter = Painter::new(RenderMode::Filled);
        draw_ladder(&mut painter, m, ladder);
        painter.finish()
    }

    fn origin_of(command: &DrawCommand) -> Vec3 {
        command.transform.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn command_count_tracks_ladder_steps() {
        let mut scene = SceneState::default();
        let fixed = WHEEL_COMMANDS + BODY_COMMANDS + BLINKER_COMMANDS + 12;
        assert_eq!(car_commands(&scene).len(), fixed + 4 * 8);
        scene.ladder.steps = 20;
        assert_eq!(car_commands(&scene).len(), fixed + 4 * 20);
    }

    #[test]
    fn first_wheel_sits_at_its_axle() {
        let scene = SceneState::default();
        let commands = car_commands(&scene);
        let torus = &commands[0];
        assert_eq!(torus.mesh, MeshKind::Torus);
        let expected = scene.car.position + scene.metrics.wheel_positions[0];
        assert!((origin_of(torus) - expected).length() < 1e-5);
    }

    #[test]
    fn blinkers_are_drawn_once_in_their_color() {
        let mut scene = SceneState::default();
        scene.blinkers[2].color = YELLOW;
        let spheres: Vec<_> = car_commands(&scene)
            .into_iter()
            .filter(|c| c.mesh == MeshKind::Sphere)
            .collect();
        assert_eq!(spheres.len(), 4);
        assert_eq!(spheres[2].color, YELLOW);
        assert!(spheres.iter().all(|c| c.fill_mode == RenderMode::Filled));
    }

    #[test]
    fn outlines_stay_wireframe_in_filled_mode() {
        let scene = SceneState::default();
        let commands = car_commands(&scene);
        let torus_pair = &commands[0..2];
        assert_eq!(torus_pair[0].fill_mode, RenderMode::Filled);
        assert_eq!(torus_pair[1].fill_mode, RenderMode::Wireframe);
        assert_eq!(torus_pair[1].color, DARK_GRAY);
    }

    #[test]
    fn wireframe_mode_applies_to_every_part() {
        let mut scene = SceneState::default();
        scene.render_mode = RenderMode::Wireframe;
        assert!(car_commands(&scene)
            .iter()
            .all(|c| c.fill_mode == RenderMode::Wireframe));
    }

    #[test]
    fn body_rotation_turns_the_whole_car() {
        let mut scene = SceneState::default();
        let straight = car_commands(&scene);
        scene.car.body_rotation = 90.0;
        let turned = car_commands(&scene);
        let a = origin_of(&straight[0]) - scene.car.position;
        let b = origin_of(&turned[0]) - scene.car.position;
        assert!((b - Vec3::new(a.z, a.y, -a.x)).length() < 1e-5);
    }

    #[test]
    fn extension_slides_only_the_fly_section() {
        let m = TruckMetrics::new(0.2);
        let mut ladder = LadderState {
            angle: 0.0,
            rotation: 0.0,
            extension: 0.0,
            steps: 5,
        };
        let retracted = ladder_commands(&m, &ladder);
        ladder.extension = 0.3;
        let extended = ladder_commands(&m, &ladder);

        // hub 2, base 2, base rails 4, base rungs 10, then fly rails.
        let base_rail = 4;
        let fly_rail = 4 + 4 + 2 * 5;
        assert_eq!(
            origin_of(&retracted[base_rail]),
            origin_of(&extended[base_rail])
        );
        let shift = origin_of(&extended[fly_rail]) - origin_of(&retracted[fly_rail]);
        assert!((shift - Vec3::new(-0.3, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rungs_span_the_first_rail_length() {
        let m = TruckMetrics::new(0.2);
        let ladder = LadderState {
            angle: 0.0,
            rotation: 0.0,
            extension: 0.0,
            steps: 10,
        };
        let commands = ladder_commands(&m, &ladder);
        // Base rungs follow the hub, base block and both base rails.
        let first = origin_of(&commands[8]);
        let last = origin_of(&commands[8 + 2 * 9]);
        assert!((last.x - first.x - 0.9 * 2.9 * 0.2).abs() < 1e-5);
        // Rungs sit between the two rails.
        assert!(first.z.abs() < 1e-5);
    }
}
