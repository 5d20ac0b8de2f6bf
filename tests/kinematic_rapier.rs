//! Headless tests of the kinematic step against a live Rapier world.
//!
//! The app runs [`MinimalPlugins`], `TransformPlugin`, Rapier and the
//! kinematic plugin on a manual clock: every `update()` advances exactly one
//! fixed step.
//!
//! Covered scenarios:
//! 1. The Rapier caster reports obstacle normals pointing back at the body.
//! 2. A body dropped on flat ground lands, stays grounded and rests one
//!    shell above it without accumulating gravity.
//! 3. A body walking onto a 30° ramp adopts the ramp normal and climbs it.

use std::f32::consts::FRAC_PI_6;
use std::time::Duration;

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::*;
use kinematic_platformer::config::KinematicConfig;
use kinematic_platformer::constants::SHELL_RADIUS;
use kinematic_platformer::kinematic::{ContactBuffer, KinematicObject, ShapeCaster};
use kinematic_platformer::physics_world::RapierShapeCaster;
use kinematic_platformer::simulation::{KinematicPlugin, KinematicSet, TargetVelocity};

const STEP: Duration = Duration::from_millis(20);
const HALF_WIDTH: f32 = 0.4;
const HALF_HEIGHT: f32 = 0.6;
/// Slack for Rapier's iterative time-of-impact solver.
const TOI_TOLERANCE: f32 = 2e-3;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Horizontal speed every body is asked to walk at.
#[derive(Resource, Default)]
struct WalkSpeed(f32);

fn walk_policy_system(speed: Res<WalkSpeed>, mut q: Query<&mut TargetVelocity>) {
    for mut target in q.iter_mut() {
        target.0 = Vec2::new(speed.0, 0.0);
    }
}

fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0),
        KinematicPlugin,
    ));
    app.insert_resource(KinematicConfig::default())
        .insert_resource(Time::<Fixed>::from_duration(STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .init_resource::<WalkSpeed>()
        .add_systems(
            FixedUpdate,
            walk_policy_system.in_set(KinematicSet::ComputeVelocity),
        );
    app.finish();
    app.cleanup();
    app
}

fn spawn_block(app: &mut App, center: Vec2, half_extents: Vec2, angle: f32) {
    app.world_mut().spawn((
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y),
        Transform::from_translation(center.extend(0.0))
            .with_rotation(Quat::from_rotation_z(angle)),
    ));
}

/// Ground slab whose top face is y = 0.
fn spawn_ground(app: &mut App) {
    spawn_block(app, Vec2::new(0.0, -0.5), Vec2::new(20.0, 0.5), 0.0);
}

/// 30° ramp whose top face starts at the origin and rises to the right.
/// Returns the top face's normal.
fn spawn_ramp(app: &mut App) -> Vec2 {
    let half_extents = Vec2::new(3.0, 0.2);
    let rotation = Vec2::from_angle(FRAC_PI_6);
    let center = -rotation.rotate(Vec2::new(-half_extents.x, half_extents.y));
    spawn_block(app, center, half_extents, FRAC_PI_6);
    rotation.rotate(Vec2::Y)
}

fn spawn_body(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            KinematicObject::default(),
            TargetVelocity::default(),
            RigidBody::Dynamic,
            Collider::cuboid(HALF_WIDTH, HALF_HEIGHT),
            Velocity::zero(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

fn object(app: &App, entity: Entity) -> KinematicObject {
    app.world().get::<KinematicObject>(entity).unwrap().clone()
}

fn position(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .unwrap()
        .translation
        .truncate()
}

fn bottom_right_corner(app: &App, entity: Entity) -> Vec2 {
    position(app, entity) + Vec2::new(HALF_WIDTH, -HALF_HEIGHT)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn rapier_caster_reports_normals_facing_the_body() {
    let mut app = build_test_app();
    spawn_ground(&mut app);
    // Wall whose left face is x = 2.5.
    spawn_block(&mut app, Vec2::new(3.0, 2.0), Vec2::new(0.5, 2.0), 0.0);
    run(&mut app, 5);

    let shape = Collider::cuboid(HALF_WIDTH, HALF_HEIGHT);
    let mut context_state = SystemState::<ReadRapierContext>::new(app.world_mut());
    let read_context = context_state.get(app.world());
    let context = read_context.single().unwrap();
    let caster = RapierShapeCaster::new(&context, &shape, Entity::PLACEHOLDER, None);
    let mut hits = ContactBuffer::default();

    caster.cast(Vec2::new(0.0, 2.0), Vec2::NEG_Y, 5.0, &mut hits);
    assert_eq!(hits.len(), 1);
    let floor = hits.as_slice()[0];
    assert!(
        (floor.normal - Vec2::Y).length() < 1e-4,
        "floor normal must point up, got {:?}",
        floor.normal
    );
    assert!((floor.distance - 1.4).abs() < TOI_TOLERANCE);

    hits.clear();
    caster.cast(Vec2::new(0.0, 1.0), Vec2::X, 5.0, &mut hits);
    assert_eq!(hits.len(), 1);
    let wall = hits.as_slice()[0];
    assert!(
        (wall.normal - Vec2::NEG_X).length() < 1e-4,
        "wall normal must point left, got {:?}",
        wall.normal
    );
    assert!((wall.distance - 2.1).abs() < TOI_TOLERANCE);
}

#[test]
fn body_lands_and_rests_on_flat_ground() {
    let mut app = build_test_app();
    spawn_ground(&mut app);
    let body = spawn_body(&mut app, Vec2::new(-6.0, HALF_HEIGHT + 0.4));

    run(&mut app, 60);

    for _ in 0..50 {
        app.update();
        let state = object(&app, body);
        let gap = position(&app, body).y - HALF_HEIGHT;
        assert!(state.is_grounded(), "body left the ground at gap {gap}");
        assert!(
            state.velocity().y.abs() < 0.5,
            "resting velocity must not accumulate, got {}",
            state.velocity().y
        );
        assert!(gap >= SHELL_RADIUS - TOI_TOLERANCE, "sank to gap {gap}");
    }

    let state = object(&app, body);
    assert!((state.ground_normal() - Vec2::Y).length() < 1e-4);
    let gap = position(&app, body).y - HALF_HEIGHT;
    assert!(
        (gap - SHELL_RADIUS).abs() < TOI_TOLERANCE,
        "expected rest gap ≈ {SHELL_RADIUS}, got {gap}"
    );
}

#[test]
fn body_walks_onto_ramp_and_adopts_its_normal() {
    let mut app = build_test_app();
    spawn_ground(&mut app);
    let ramp_normal = spawn_ramp(&mut app);
    let body = spawn_body(&mut app, Vec2::new(-2.0, HALF_HEIGHT + 0.1));

    run(&mut app, 30);
    assert!(object(&app, body).is_grounded());

    app.insert_resource(WalkSpeed(3.0));
    for _ in 0..200 {
        app.update();
        let corner = bottom_right_corner(&app, body);
        if corner.x <= 0.0 {
            assert!(
                corner.y >= SHELL_RADIUS - TOI_TOLERANCE,
                "sank into the ground at {corner:?}"
            );
        }
        if corner.x > 1.5 {
            break;
        }
    }
    run(&mut app, 3);

    let corner = bottom_right_corner(&app, body);
    assert!(corner.x > 1.5, "body never climbed the ramp: {corner:?}");

    let state = object(&app, body);
    assert!(state.is_grounded());
    assert!(
        (state.ground_normal() - ramp_normal).length() < 1e-3,
        "ground normal should follow the ramp, got {:?}",
        state.ground_normal()
    );
    assert!(state.velocity().y.abs() < 1.0);

    let ramp_height = corner.x * FRAC_PI_6.tan();
    assert!(
        corner.y - ramp_height >= SHELL_RADIUS - TOI_TOLERANCE,
        "body sank into the ramp: corner {corner:?}, surface at {ramp_height}"
    );
}
