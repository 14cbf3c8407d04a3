// Sim Runtime - headless locomotion runtime
//
// Builds a small rapier scene, feeds scripted controller input to the
// locomotion components for a fixed number of frames and prints a JSON report
// of where the rig ended up.

use std::path::PathBuf;

use anyhow::Context;
use cgmath::{vec2, vec3, Deg, Quaternion, Rotation3, Vector3};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use locomotion::logging::{init_logging, DEFAULT_LOG_ENV};
use locomotion::physics::InteractiveId;
use locomotion::ui::{EyeRaycaster, FollowSmoothly, Reticle, VrButton, VrInput, VrMenu};
use locomotion::{
    Blink, CurveTeleporter, Effect, GamepadMovement, InputContext, LocomotionConfig,
    PhysicsWorld, PlayerRig, Pose, SurfaceTag, Time,
};

/// Head height above the rig origin.
const HEAD_HEIGHT: f32 = 1.7;
const HAND_OFFSET: Vector3<f32> = Vector3 {
    x: 0.2,
    y: 1.2,
    z: 0.0,
};
const INFO_PANEL: InteractiveId = InteractiveId(1);

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Scenario {
    /// Open floor that accepts teleports everywhere
    Flat,
    /// Untagged floor with a raised teleport platform ahead
    Platform,
    /// Teleport floor behind an untagged wall
    Wall,
}

#[derive(Parser)]
#[command(name = "sim_runtime")]
#[command(about = "Headless runtime that drives the locomotion components against a rapier scene")]
struct Args {
    /// JSON locomotion config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene to build
    #[arg(short, long, value_enum, default_value = "flat")]
    scenario: Scenario,

    /// Frames to simulate; the teleport button is held for the first half
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Controller pitch in degrees, negative aims down
    #[arg(long, default_value = "-20", allow_hyphen_values = true)]
    pitch: f32,

    /// Simulated frame rate
    #[arg(long, default_value = "72")]
    fps: f32,

    /// Teleport and turn without the blink transition
    #[arg(long)]
    no_blink: bool,
}

#[derive(Serialize)]
struct CurveReport {
    segments: usize,
    arc_distance: f32,
    point: [f32; 3],
    teleport_area: bool,
}

#[derive(Serialize)]
struct Report {
    scenario: Scenario,
    frames: u32,
    position: [f32; 3],
    yaw_degrees: f32,
    teleports: usize,
    blink_frames: u32,
    last_curve: Option<CurveReport>,
    reticle: [f32; 3],
    hud: [f32; 3],
    gazed_item: Option<u32>,
    menu_visible: bool,
}

fn build_scene(scenario: Scenario) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    match scenario {
        Scenario::Flat => {
            world.add_ground(0.0, 50.0, SurfaceTag::TeleportArea);
        }
        Scenario::Platform => {
            world.add_ground(0.0, 50.0, SurfaceTag::Untagged);
            world.add_box(vec3(0.0, 0.25, -4.0), vec3(2.0, 0.25, 2.0), SurfaceTag::TeleportArea);
        }
        Scenario::Wall => {
            world.add_ground(0.0, 50.0, SurfaceTag::TeleportArea);
            world.add_box(vec3(0.0, 2.0, -3.5), vec3(5.0, 2.0, 0.5), SurfaceTag::Untagged);
        }
    }
    world
}

fn to_array(v: Vector3<f32>) -> [f32; 3] {
    [v.x, v.y, v.z]
}

fn frame_input(rig: &PlayerRig, pitch: f32, previous: &InputContext) -> InputContext {
    let mut input = previous.next_frame();
    let rotation = rig.rotation();
    input.head_local = vec3(0.0, HEAD_HEIGHT, 0.0);
    input.head = Pose::new(rig.position + input.head_local, rotation);
    input.pointer = Pose::new(
        rig.position + rotation * HAND_OFFSET,
        rotation * Quaternion::from_angle_x(Deg(pitch)),
    );
    input
}

fn main() -> anyhow::Result<()> {
    init_logging(DEFAULT_LOG_ENV);
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LocomotionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LocomotionConfig::default(),
    };
    if args.no_blink {
        config.teleport.blinking = false;
        config.movement.blinking = false;
    }
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive, got {}", args.fps);

    info!(
        "Simulating {} frames of {:?} at {} fps",
        args.frames, args.scenario, args.fps
    );

    let mut world = build_scene(args.scenario);
    let panel = VrButton::new(INFO_PANEL, vec2(1.0, 0.5));
    panel.attach(&mut world, vec3(3.0, HEAD_HEIGHT, -3.0));

    let mut teleporter = CurveTeleporter::new(config.teleport.clone())?;
    let mut movement = GamepadMovement::new(config.movement.clone());
    let mut blink = Blink::new(&config.blink);
    let mut vr_input = VrInput::new(&config.input);
    let mut raycaster = EyeRaycaster::new(&config.input);
    let mut reticle = Reticle::new(&config.reticle);
    let mut menu = VrMenu::new(config.menu.clone());
    let mut rig = PlayerRig::default();
    let mut hud = FollowSmoothly::new(
        config.follow.clone(),
        vec3(0.0, HEAD_HEIGHT, -1.0),
        rig.rotation(),
    );

    let delta = 1.0 / args.fps;
    let mut time = Time::new(0.0, delta);
    let hold_frames = args.frames / 2;
    let teleport_button = config.teleport.teleport_button;

    let mut input = InputContext::default();
    let mut teleports = 0;
    let mut blink_frames = 0;
    let mut last_curve = None;

    for frame in 0..args.frames {
        input = frame_input(&rig, args.pitch, &input);
        if frame < hold_frames {
            input.gamepad.press(teleport_button);
        } else {
            input.gamepad.release(teleport_button);
        }

        let mut effects = teleporter.update(&input, &world, &mut blink);
        if let Some(hit) = teleporter.last_hit() {
            last_curve = Some(CurveReport {
                segments: hit.segment,
                arc_distance: hit.arc_distance,
                point: to_array(hit.hit.point),
                teleport_area: hit.hit.surface.is_teleport_area(),
            });
        }
        effects.extend(movement.update(&input, &time, &world, &mut blink));
        effects.extend(blink.update(time.delta));
        if blink.is_active() {
            blink_frames += 1;
        }

        teleports += effects
            .iter()
            .filter(|effect| matches!(effect, Effect::SetPlayerPosition { is_teleport: true, .. }))
            .count();
        rig.apply_all(&effects, time.delta);

        let events = vr_input.update(&input.gamepad, &time);
        raycaster.update(&input.head, &world, &events, Some(&mut reticle));
        menu.update(&input);
        hud.update(
            input.head.position + input.head.forward(),
            input.head.rotation,
            time.delta,
        );

        time = time.advance(delta);
    }

    let report = Report {
        scenario: args.scenario,
        frames: args.frames,
        position: to_array(rig.position),
        yaw_degrees: rig.yaw_degrees,
        teleports,
        blink_frames,
        last_curve,
        reticle: to_array(reticle.position()),
        hud: to_array(hud.position()),
        gazed_item: raycaster.hovered().map(|id| id.0),
        menu_visible: menu.is_visible(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
