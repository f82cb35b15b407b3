//! ECS integration tests: observers, picking, respawn and session lifecycle.
//!
//! These build a `World` the way `main` does, minus the raylib window, and
//! drive single systems with one-off schedules.

use bevy_ecs::prelude::*;
use raylib::prelude::{Vector2, Vector3};

use gatherer::components::avatar::Avatar;
use gatherer::components::hitbox::Hitbox;
use gatherer::components::resourcenode::{NodeHandle, NodeVisual};
use gatherer::components::worldposition::WorldPosition;
use gatherer::events::interaction::{NodeClickedEvent, node_interaction_observer};
use gatherer::events::progression::refresh_hud_observer;
use gatherer::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use gatherer::game;
use gatherer::resources::debugmode::DebugMode;
use gatherer::resources::gameconfig::{CameraSettings, GameConfig, SpawnArea};
use gatherer::resources::hud::HudText;
use gatherer::resources::input::InputState;
use gatherer::resources::nodeentities::{CommandsNodeView, NodeEntities};
use gatherer::resources::orbitcamera::OrbitCamera;
use gatherer::resources::progression::{ItemCategory, Progression, Skill};
use gatherer::resources::resourcekinds::ResourceKinds;
use gatherer::resources::resourcemanager::{NodeId, ResourceManager};
use gatherer::resources::screensize::ScreenSize;
use gatherer::resources::worldtime::WorldTime;
use gatherer::systems::picking::node_picking_system;
use gatherer::systems::respawn::respawn_system;
use gatherer::systems::time::update_world_time;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize { w: 800, h: 600 });
    world.insert_resource(InputState::default());
    world.insert_resource(OrbitCamera::from_settings(&CameraSettings::default()));
    world.insert_resource(Progression::new());
    world.insert_resource(HudText::default());
    world.insert_resource(NodeEntities::new());
    world.insert_resource(
        ResourceManager::new(ResourceKinds::default(), SpawnArea::default()).with_seed(3),
    );
    world.add_observer(switch_debug_observer);
    world.add_observer(node_interaction_observer);
    world.add_observer(refresh_hud_observer);
    world.flush();
    world
}

/// Create one node of `kind` at `position` through the ECS view.
fn spawn_node(world: &mut World, kind: &'static str, position: Vector3) -> NodeId {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        move |mut commands: Commands,
              mut manager: ResMut<ResourceManager>,
              mut entities: ResMut<NodeEntities>| {
            let kind = manager.kinds().expect_id(kind);
            let mut view = CommandsNodeView::new(&mut commands, &mut entities);
            manager.create_node(kind, position, &mut view);
        },
    );
    schedule.run(world);
    let manager = world.resource::<ResourceManager>();
    manager
        .iter()
        .filter(|n| n.position == position)
        .map(|n| n.id)
        .max()
        .unwrap()
}

fn tick_picking(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(node_picking_system);
    schedule.run(world);
}

fn tick_respawn(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(respawn_system);
    schedule.run(world);
}

fn node_entity_count(world: &mut World) -> usize {
    let mut q = world.query::<&NodeHandle>();
    q.iter(world).count()
}

#[test]
fn created_node_gets_an_entity() {
    let mut world = make_world();
    let id = spawn_node(&mut world, "rock", Vector3::new(2.0, 0.0, 3.0));

    let entity = world.resource::<NodeEntities>().get(id).unwrap();
    assert_eq!(world.get::<NodeHandle>(entity).unwrap().0, id);
    assert_eq!(world.get::<WorldPosition>(entity).unwrap().pos.x, 2.0);
    let hitbox = world.get::<Hitbox>(entity).unwrap();
    assert_eq!(hitbox.size.x, 1.5);
    assert_eq!(world.get::<NodeVisual>(entity).unwrap().model, "assets/rock1.glb");
}

#[test]
fn clicking_a_rock_five_times_depletes_it() {
    let mut world = make_world();
    let id = spawn_node(&mut world, "rock", Vector3::new(0.0, 0.0, -4.0));

    for _ in 0..4 {
        world.trigger(NodeClickedEvent { node: id });
    }
    assert_eq!(world.resource::<ResourceManager>().get(id).unwrap().health, 1);
    assert_eq!(node_entity_count(&mut world), 1);

    world.trigger(NodeClickedEvent { node: id });
    assert!(!world.resource::<ResourceManager>().contains(id));
    assert!(world.resource::<NodeEntities>().is_empty());
    assert_eq!(node_entity_count(&mut world), 0);

    let progression = world.resource::<Progression>();
    assert_eq!(progression.item_count(ItemCategory::Ore), 5);
    assert_eq!(progression.level(Skill::Mining), 3);
    assert_eq!(progression.skill(Skill::Mining).xp, 20);

    let hud = world.resource::<HudText>();
    assert!(hud.lines.iter().any(|l| l == "Ore: 5"));
    assert!(hud.lines.iter().any(|l| l == "Mining: level 3 (20/30 xp)"));
}

#[test]
fn ineligible_click_leaves_everything_alone() {
    let mut world = make_world();
    let id = spawn_node(&mut world, "advanced_tree", Vector3::new(0.0, 0.0, 0.0));

    world.trigger(NodeClickedEvent { node: id });

    assert_eq!(world.resource::<ResourceManager>().get(id).unwrap().health, 8);
    assert_eq!(world.resource::<Progression>().item_count(ItemCategory::Wood), 0);
    // No progression change, so the HUD was never rebuilt
    assert!(world.resource::<HudText>().lines.is_empty());
}

#[test]
fn stale_click_is_ignored() {
    let mut world = make_world();
    world.trigger(NodeClickedEvent { node: NodeId(999) });
    assert_eq!(world.resource::<Progression>().item_count(ItemCategory::Ore), 0);
}

#[test]
fn depleted_node_respawns_when_world_time_passes_delay() {
    let mut world = make_world();
    let position = Vector3::new(5.0, 0.0, 5.0);
    let id = spawn_node(&mut world, "rock", position);
    for _ in 0..5 {
        world.trigger(NodeClickedEvent { node: id });
    }
    assert_eq!(world.resource::<ResourceManager>().pending_respawn_count(), 1);

    update_world_time(&mut world, 44.0);
    tick_respawn(&mut world);
    assert!(world.resource::<ResourceManager>().is_empty());

    update_world_time(&mut world, 1.0);
    tick_respawn(&mut world);
    let manager = world.resource::<ResourceManager>();
    assert_eq!(manager.len(), 1);
    let node = manager.iter().next().unwrap();
    assert_ne!(node.id, id);
    assert_eq!(node.health, 5);
    assert_eq!(node.position, position);
    let new_id = node.id;
    assert!(world.resource::<NodeEntities>().get(new_id).is_some());
    assert_eq!(node_entity_count(&mut world), 1);
}

#[test]
fn click_at_screen_center_hits_node_under_camera_target() {
    let mut world = make_world();
    // Camera looks at the origin; a rock sits right there.
    let id = spawn_node(&mut world, "rock", Vector3::new(0.0, 0.0, 0.0));
    {
        let mut input = world.resource_mut::<InputState>();
        input.mouse_position = Vector2 { x: 400.0, y: 300.0 };
        input.interact = true;
    }

    tick_picking(&mut world);

    assert_eq!(world.resource::<ResourceManager>().get(id).unwrap().health, 4);
    assert_eq!(world.resource::<Progression>().item_count(ItemCategory::Ore), 1);
}

#[test]
fn no_click_no_interaction() {
    let mut world = make_world();
    let id = spawn_node(&mut world, "rock", Vector3::new(0.0, 0.0, 0.0));
    world.resource_mut::<InputState>().mouse_position = Vector2 { x: 400.0, y: 300.0 };

    tick_picking(&mut world);

    assert_eq!(world.resource::<ResourceManager>().get(id).unwrap().health, 5);
}

#[test]
fn session_startup_and_shutdown() {
    let mut world = make_world();
    let mut config = GameConfig::new();
    config.spawn_count = 10;
    world.insert_resource(config);

    let mut startup = Schedule::default();
    startup.add_systems(game::populate_world);
    startup.run(&mut world);

    // 8 basic trees, 2 advanced trees, 10 rocks
    assert_eq!(world.resource::<ResourceManager>().len(), 20);
    assert_eq!(world.resource::<NodeEntities>().len(), 20);
    assert_eq!(node_entity_count(&mut world), 20);
    let mut avatars = world.query::<&Avatar>();
    assert_eq!(avatars.iter(&world).count(), 1);
    assert_eq!(world.resource::<HudText>().lines.len(), 4);

    let rock = {
        let manager = world.resource::<ResourceManager>();
        let rock_kind = manager.kinds().expect_id("rock");
        manager.iter().find(|n| n.kind == rock_kind).unwrap().id
    };
    for _ in 0..5 {
        world.trigger(NodeClickedEvent { node: rock });
    }
    assert_eq!(world.resource::<ResourceManager>().pending_respawn_count(), 1);

    let mut teardown = Schedule::default();
    teardown.add_systems(game::shutdown);
    teardown.run(&mut world);

    let manager = world.resource::<ResourceManager>();
    assert!(manager.is_empty());
    assert_eq!(manager.pending_respawn_count(), 0);
    assert!(world.resource::<NodeEntities>().is_empty());
    assert_eq!(node_entity_count(&mut world), 0);
}

#[test]
fn switch_debug_toggles_debug_mode() {
    let mut world = make_world();
    assert!(!world.contains_resource::<DebugMode>());
    world.trigger(SwitchDebugEvent {});
    assert!(world.contains_resource::<DebugMode>());
    world.trigger(SwitchDebugEvent {});
    assert!(!world.contains_resource::<DebugMode>());
}
