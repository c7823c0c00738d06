//! Headless run of the pusher core on one of the reference maps
//!
//! Usage: `pusher_demo [map] [config.toml]` where map is one of
//! `reference`, `middle`, `corner` or `2-corners`.
//!
//! There is no renderer here, so the cameras show an empty arena and robots
//! wander. Pose integration is plain kinematics without collisions.

use anyhow::{bail, Context, Result};
use log::info;
use pusher_core::common::{Point2, Pose2D, WallSpec, WorldView};
use pusher_core::perception::sensors::{CameraFrame, CameraRing, InfraredRing, RobotSensors};
use pusher_core::{PusherConfig, SwarmCore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

const ROBOTS: usize = 10;
const STEPS: usize = 600;
const DT: f32 = 0.05;
const CAMERA_WIDTH: usize = 32;
const CAMERA_HEIGHT: usize = 24;

fn p(x: f32, y: f32) -> Point2 {
    Point2::new(x, y)
}

fn map_preset(name: &str) -> Result<WorldView> {
    let world = match name {
        "reference" => WorldView::open_arena(p(-1.0, -1.0), p(1.0, 1.0)),
        "middle" => WorldView::open_arena(p(0.0, -1.0), p(0.0, 1.0))
            .with_walls(vec![WallSpec::new(p(0.0, 0.0), p(1.5, 0.5))]),
        "corner" => WorldView::open_arena(p(-1.0, -1.0), p(-1.0, 1.0))
            .with_walls(vec![WallSpec::new(p(-0.5, 0.0), p(2.0, 0.5))]),
        "2-corners" => WorldView::open_arena(p(-1.0, -1.0), p(1.0, 1.0)).with_walls(vec![
            WallSpec::new(p(-0.5, -0.5), p(2.0, 0.3)),
            WallSpec::new(p(0.5, 0.5), p(2.0, 0.3)),
        ]),
        other => bail!("unknown map '{}'", other),
    };
    Ok(world)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let map_name = args.get(1).map(String::as_str).unwrap_or("reference");
    let config = match args.get(2) {
        Some(path) => PusherConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => PusherConfig::default(),
    };

    let world = map_preset(map_name)?;
    let mut rng = StdRng::seed_from_u64(0);
    let mut core = SwarmCore::new(config, ROBOTS)?;

    let mut poses: Vec<Pose2D> = core
        .place_robots(&world, &mut rng)
        .iter()
        .map(|placement| placement.pose())
        .collect();

    core.start()?;
    info!("Running {} robots on map '{}'", ROBOTS, map_name);

    let blank = vec![0u8; CAMERA_WIDTH * CAMERA_HEIGHT * 3];
    for step in 0..STEPS {
        let time = step as f32 * DT;
        let frames = [CameraFrame::new(CAMERA_WIDTH, CAMERA_HEIGHT, &blank, time); 4];
        let cameras = CameraRing::new(&frames)?;
        let sensors: Vec<RobotSensors<'_>> = poses
            .iter()
            .map(|&pose| RobotSensors {
                cameras,
                infrared: InfraredRing::uniform(1.0),
                pose,
            })
            .collect();

        let commands = core.tick(&world, &sensors, DT, &mut rng);
        for (pose, command) in poses.iter_mut().zip(&commands) {
            pose.position += command.linear * DT;
            pose.heading += command.angular * DT;
        }
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for index in 0..ROBOTS {
        if let Some(state) = core.robot_state(index) {
            *counts.entry(state.behavior.name()).or_default() += 1;
        }
    }
    info!("Final behaviors: {:?}", counts);

    if let Some(teleop) = core.last_teleop() {
        info!(
            "Teleop path with {} waypoints, pursuit point {:?}",
            teleop.plan.path.len(),
            teleop.pursuit_point
        );
    }

    core.stop()?;
    Ok(())
}
