//! 3D playback of arm solutions using kiss3d.

use kiss3d::prelude::*;

use statesearch::arm::{ArmConfig, Workspace};
use statesearch::geometry::Point;

/// World units per workspace unit.
const SCALE: f32 = 4.0;
/// Cubes drawn along each link.
const CUBES_PER_LINK: usize = 12;
/// Rendered frames between playback steps.
const FRAMES_PER_STEP: u32 = 6;

/// Maps a workspace point into the scene, with the unit square centered on
/// the origin in the XY plane.
fn to_world(p: Point) -> Vec3 {
    Vec3::new(
        (p.x as f32 - 0.5) * SCALE,
        (p.y as f32 - 0.5) * SCALE,
        0.0,
    )
}

/// Draws the obstacles and a thin floor outline; these never change.
fn build_workspace(scene: &mut SceneNode3d, workspace: &Workspace) {
    scene
        .add_cube(SCALE, SCALE, 0.02)
        .set_color(Color::new(0.3, 0.3, 0.3, 1.0))
        .set_position(Vec3::new(0.0, 0.0, -0.1));

    for obstacle in &workspace.obstacles {
        scene
            .add_cube(
                obstacle.width() as f32 * SCALE,
                obstacle.height() as f32 * SCALE,
                0.2,
            )
            .set_color(Color::new(1.0, 0.2, 0.2, 1.0))
            .set_position(to_world(obstacle.center()));
    }
}

/// Draws the arm at `config` as a chain of cubes along both links.
fn build_arm(scene: &mut SceneNode3d, workspace: &Workspace, config: &ArmConfig) -> Vec<SceneNode3d> {
    const CUBE_SIZE: f32 = 0.1;

    let [base, elbow, tip] = workspace.joints(config);
    let mut cubes = Vec::with_capacity(2 * CUBES_PER_LINK + 1);
    for (from, to, (r, g, b)) in [(base, elbow, (0.2, 0.6, 1.0)), (elbow, tip, (0.2, 1.0, 0.4))] {
        for i in 0..CUBES_PER_LINK {
            let t = i as f64 / CUBES_PER_LINK as f64;
            let node = scene
                .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .set_color(Color::new(r, g, b, 1.0))
                .set_position(to_world(from.lerp(to, t)));
            cubes.push(node);
        }
    }
    let tip_node = scene
        .add_cube(CUBE_SIZE * 1.5, CUBE_SIZE * 1.5, CUBE_SIZE * 1.5)
        .set_color(Color::new(1.0, 1.0, 0.2, 1.0))
        .set_position(to_world(tip));
    cubes.push(tip_node);
    cubes
}

fn title(step: usize, steps: usize, playing: bool) -> String {
    let mode = if playing { "playing" } else { "paused" };
    format!(
        "Step {}/{} ({mode}) - [Left/Right] step, [Up] play, [Down] pause, [R] reset",
        step + 1,
        steps
    )
}

/// Plays back `path` in an interactive 3D viewer.
pub fn display(workspace: Workspace, path: Vec<ArmConfig>) {
    pollster::block_on(display_async(workspace, path));
}

async fn display_async(workspace: Workspace, path: Vec<ArmConfig>) {
    if path.is_empty() {
        println!("No configurations to display");
        return;
    }

    let steps = path.len();
    let mut step = 0;
    let mut playing = false;
    let mut frames_since_step = 0;

    let mut window = Window::new(&title(step, steps, playing)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(8.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(0.0, 0.0, 6.0));

    build_workspace(&mut scene, &workspace);
    let mut arm = build_arm(&mut scene, &workspace, &path[step]);

    loop {
        let shown = (step, playing);
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => playing = true,
                        Key::Down => playing = false,
                        Key::R => {
                            step = 0;
                            playing = false;
                        }
                        Key::Right => step = (step + 1).min(steps - 1),
                        Key::Left => step = step.saturating_sub(1),
                        _ => {}
                    }
                }
            }
        }

        if playing {
            frames_since_step += 1;
            if frames_since_step >= FRAMES_PER_STEP {
                frames_since_step = 0;
                if step + 1 < steps {
                    step += 1;
                } else {
                    playing = false;
                }
            }
        }

        if (step, playing) != shown {
            if step != shown.0 {
                for mut cube in arm.drain(..) {
                    cube.remove();
                }
                arm = build_arm(&mut scene, &workspace, &path[step]);
            }
            window.set_title(&title(step, steps, playing));
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
