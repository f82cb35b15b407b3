use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::avatar::Avatar;
use crate::components::hitbox::Hitbox;
use crate::components::resourcenode::{FallbackShape, NodeVisual};
use crate::components::worldposition::WorldPosition;
use crate::resources::debugmode::DebugMode;
use crate::resources::hud::HudText;
use crate::resources::modelstore::ModelStore;
use crate::resources::orbitcamera::OrbitCamera;
use crate::resources::resourcemanager::ResourceManager;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;

/// Model drawn for the avatar when available.
pub const AVATAR_MODEL: &str = "assets/charwalk.glb";

const SKY: Color = Color::new(135, 206, 235, 255);
const GROUND: Color = Color::new(86, 125, 70, 255);
const GROUND_SIZE: f32 = 200.0;
const AVATAR_HEIGHT: f32 = 1.8;
const AVATAR_RADIUS: f32 = 0.4;

/// Exclusive system: open a drawing scope and render the whole frame.
///
/// The raylib handle and thread are taken out of the world for the duration
/// of the frame so the draw handle and world queries can coexist.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    pose_avatar(world, &mut rl, &thread);

    {
        let camera = world.resource::<OrbitCamera>().camera3d();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(SKY);
        {
            let mut d3 = d.begin_mode3D(camera);
            render_pass(world, &mut d3);
        }
        render_hud(world, &mut d);
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

/// Move the avatar model's skeleton to the current walk frame.
fn pose_avatar(world: &mut World, rl: &mut RaylibHandle, thread: &RaylibThread) {
    let avatar = {
        let mut q = world.query::<&Avatar>();
        q.iter(world).next().copied()
    };
    let Some(avatar) = avatar else {
        return;
    };
    let mut models = world.non_send_resource_mut::<ModelStore>();
    if let Some(frames) = models.clip_frames(AVATAR_MODEL) {
        models.pose(rl, thread, AVATAR_MODEL, avatar.walk_frame(frames));
    }
}

/// Draw the ground, every node entity and the avatar in 3D camera space.
pub fn render_pass(world: &mut World, d3: &mut RaylibMode3D<RaylibDrawHandle>) {
    d3.draw_plane(
        Vector3::new(0.0, 0.0, 0.0),
        Vector2 {
            x: GROUND_SIZE,
            y: GROUND_SIZE,
        },
        GROUND,
    );

    let nodes: Vec<(NodeVisual, WorldPosition, Hitbox)> = {
        let mut q = world.query::<(&NodeVisual, &WorldPosition, &Hitbox)>();
        q.iter(world)
            .map(|(v, p, h)| (v.clone(), *p, *h))
            .collect()
    };
    let avatars: Vec<(Avatar, WorldPosition)> = {
        let mut q = world.query::<(&Avatar, &WorldPosition)>();
        q.iter(world).map(|(a, p)| (*a, *p)).collect()
    };
    let debug = world.contains_resource::<DebugMode>();
    let models = world.non_send_resource::<ModelStore>();

    for (visual, pos, hitbox) in nodes.iter() {
        match models.get(&visual.model) {
            Some(model) => d3.draw_model(model, pos.pos, 1.0, Color::WHITE),
            None => draw_fallback(d3, visual, pos.pos),
        }
        if debug {
            let center = hitbox.center(pos.pos);
            d3.draw_cube_wires(center, hitbox.size.x, hitbox.size.y, hitbox.size.z, Color::RED);
        }
    }

    for (avatar, pos) in avatars.iter() {
        match models.get(AVATAR_MODEL) {
            Some(model) => d3.draw_model_ex(
                model,
                pos.pos,
                Vector3::new(0.0, 1.0, 0.0),
                avatar.facing.to_degrees(),
                Vector3::new(1.0, 1.0, 1.0),
                Color::WHITE,
            ),
            None => {
                d3.draw_cylinder(
                    pos.pos,
                    AVATAR_RADIUS,
                    AVATAR_RADIUS,
                    AVATAR_HEIGHT,
                    12,
                    Color::BLUE,
                );
                // Nose marker showing the facing direction
                let nose = pos.pos
                    + Vector3::new(avatar.facing.sin(), 0.0, avatar.facing.cos()) * AVATAR_RADIUS
                    + Vector3::new(0.0, AVATAR_HEIGHT * 0.8, 0.0);
                d3.draw_sphere(nose, 0.1, Color::YELLOW);
            }
        }
    }
}

fn draw_fallback(d3: &mut RaylibMode3D<RaylibDrawHandle>, visual: &NodeVisual, base: Vector3) {
    match visual.shape {
        FallbackShape::Column => {
            let trunk = visual.height * 0.4;
            let radius = visual.footprint * 0.15;
            d3.draw_cylinder(base, radius, radius, trunk, 8, Color::BROWN);
            let crown = base + Vector3::new(0.0, trunk, 0.0);
            d3.draw_cylinder(
                crown,
                0.0,
                visual.footprint * 0.5,
                visual.height - trunk,
                8,
                visual.color,
            );
        }
        FallbackShape::Block => {
            let center = base + Vector3::new(0.0, visual.height * 0.5, 0.0);
            d3.draw_cube(
                center,
                visual.footprint,
                visual.height,
                visual.footprint,
                visual.color,
            );
        }
    }
}

/// Inventory and skill lines in the top-left corner.
pub fn render_hud(world: &mut World, d: &mut RaylibDrawHandle) {
    let hud = world.resource::<HudText>();
    for (i, line) in hud.lines.iter().enumerate() {
        d.draw_text(line, 10, 10 + i as i32 * 22, 20, Color::BLACK);
    }
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if world.contains_resource::<DebugMode>() {
        let screen = *world.resource::<ScreenSize>();
        let manager = world.resource::<ResourceManager>();

        let fps = d.get_fps();
        let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
        d.draw_text(&text, 10, screen.h - 50, 10, Color::BLACK);

        let now = world.resource::<WorldTime>().elapsed;
        let next = match manager.next_respawn_at() {
            Some(at) => format!("{:.1}s", (at - now).max(0.0)),
            None => "-".to_string(),
        };
        let text = format!(
            "Nodes: {} | Pending respawns: {} | Next in: {}",
            manager.len(),
            manager.pending_respawn_count(),
            next
        );
        d.draw_text(&text, 10, screen.h - 30, 10, Color::BLACK);

        let cam = world.resource::<OrbitCamera>();
        let cam_text = format!(
            "Camera angle: {:.2} distance: {:.1}",
            cam.angle, cam.distance
        );
        d.draw_text(&cam_text, 10, screen.h - 70, 10, Color::BLACK);
    }
}
