use cgmath::{vec2, vec3, Deg, InnerSpace, Quaternion, Rotation3};

use locomotion::config::{MovementConfig, TeleportConfig};
use locomotion::physics::InteractiveId;
use locomotion::teleport::curve_teleporter::{INVALID_TARGET_COLOR, VALID_TARGET_COLOR};
use locomotion::teleport::CurveSettings;
use locomotion::ui::{EyeRaycaster, InputEvent, InteractionEvent, VrButton};
use locomotion::{
    Blink, Button, CollisionQuery, CurveTeleporter, CurvedRaycast, Effect, GamepadMovement,
    InputContext, PhysicsWorld, PlayerRig, Pose, SurfaceTag, Time,
};

fn arena() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.add_ground(0.0, 50.0, SurfaceTag::TeleportArea);
    world
}

fn pointer_input(pitch_degrees: f32) -> InputContext {
    let mut input = InputContext::default();
    input.pointer = Pose::new(
        vec3(0.0, 1.2, 0.0),
        Quaternion::from_angle_x(Deg(pitch_degrees)),
    );
    input.head = Pose::new(vec3(0.0, 1.7, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0));
    input.gamepad.press(Button::Touchpad);
    input
}

fn release(input: &InputContext, button: Button) -> InputContext {
    let mut next = input.next_frame();
    next.gamepad.release(button);
    next
}

#[test]
fn curve_lands_on_rapier_ground() {
    let world = arena();
    let settings = CurveSettings::new(1.0, 0.1, 15.0).unwrap();

    let sample = CurvedRaycast::sample(
        vec3(0.0, 1.2, 0.0),
        vec3(0.0, 0.0, -1.0),
        &settings,
        &world,
    );

    let hit = sample.hit().expect("curve should reach the ground");
    assert!(hit.hit.point.y.abs() < 1e-3);
    assert_eq!(hit.hit.surface, SurfaceTag::TeleportArea);
    assert_eq!(sample.path.len(), hit.segment);
    assert!(sample.segments_queried() <= settings.max_segments());
    assert!(hit.arc_distance >= (hit.hit.point - vec3(0.0, 1.2, 0.0)).magnitude() - 1e-3);
}

#[test]
fn hold_and_release_teleports_rig() {
    let world = arena();
    let mut teleporter = CurveTeleporter::new(TeleportConfig {
        blinking: false,
        ..TeleportConfig::default()
    })
    .unwrap();
    let mut blink = Blink::default();
    let mut rig = PlayerRig::default();

    let held = pointer_input(-20.0);
    assert!(teleporter.update(&held, &world, &mut blink).is_empty());
    assert_eq!(teleporter.marker().ring, VALID_TARGET_COLOR);
    assert!(teleporter.nodes().active_count() <= teleporter.nodes().capacity());
    let target = teleporter.last_hit().unwrap().hit.point;

    let effects = teleporter.update(&release(&held, Button::Touchpad), &world, &mut blink);
    rig.apply_all(&effects, 1.0 / 72.0);

    assert!((rig.position - target).magnitude() < 1e-4);
    assert_eq!(teleporter.nodes().active_count(), 0);
    assert!(!teleporter.marker().active);
}

#[test]
fn wall_blocks_teleport() {
    let mut world = arena();
    world.add_box(vec3(0.0, 2.0, -3.5), vec3(5.0, 5.0, 0.5), SurfaceTag::Untagged);
    let mut teleporter = CurveTeleporter::new(TeleportConfig {
        blinking: false,
        ..TeleportConfig::default()
    })
    .unwrap();
    let mut blink = Blink::default();

    let held = pointer_input(10.0);
    teleporter.update(&held, &world, &mut blink);
    let hit = teleporter.last_hit().unwrap();
    assert_eq!(hit.hit.surface, SurfaceTag::Untagged);
    assert!((hit.hit.point.z + 3.0).abs() < 1e-3);
    assert_eq!(teleporter.marker().ring, INVALID_TARGET_COLOR);

    let effects = teleporter.update(&release(&held, Button::Touchpad), &world, &mut blink);
    assert!(effects.is_empty());
}

#[test]
fn blinked_gaze_teleport_moves_rig_once() {
    let world = arena();
    let mut movement = GamepadMovement::new(MovementConfig::default());
    let mut blink = Blink::default();
    let mut rig = PlayerRig::default();
    let mut time = Time::default();

    let mut input = InputContext::default();
    input.head = Pose::new(vec3(0.0, 1.7, 0.0), Quaternion::from_angle_x(Deg(-45.0)));
    input.gamepad.press(Button::Jump);
    movement.update(&input, &time, &world, &mut blink);
    let marker = movement.ground_marker().position;

    input = release(&input, Button::Jump);
    let mut applied = Vec::new();
    for _ in 0..200 {
        let mut effects = movement.update(&input, &time, &world, &mut blink);
        effects.extend(blink.update(time.delta));
        rig.apply_all(&effects, time.delta);
        applied.extend(effects);
        input = input.next_frame();
        time = time.advance(time.delta);
        if !blink.is_active() {
            break;
        }
    }

    assert_eq!(applied.len(), 1);
    assert!(matches!(applied[0], Effect::SetPlayerPosition { is_teleport: true, .. }));
    assert!((rig.position - (marker + vec3(0.0, 1.0, 0.0))).magnitude() < 1e-4);
}

#[test]
fn gaze_clicks_button_panel() {
    let mut world = arena();
    let mut button = VrButton::new(InteractiveId(42), vec2(1.0, 0.5));
    button.attach(&mut world, vec3(0.0, 1.7, -2.0));
    let mut raycaster = EyeRaycaster::default();
    let head = Pose::new(vec3(0.0, 1.7, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0));

    let hit = world.raycast(head.position, head.forward(), 10.0).unwrap();
    assert_eq!(hit.surface, SurfaceTag::Interactive(InteractiveId(42)));

    let interactions = raycaster.update(&head, &world, &[InputEvent::Up, InputEvent::Click], None);
    for interaction in &interactions {
        assert_eq!(interaction.item, button.id());
        button.handle(interaction.event);
    }

    assert_eq!(interactions[0].event, InteractionEvent::Over);
    assert_eq!(button.clicks(), 1);
}
