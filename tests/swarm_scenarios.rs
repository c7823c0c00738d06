use approx::assert_abs_diff_eq;
use pusher_core::behaviors::{self, Behavior, BehaviorInput, RobotState};
use pusher_core::common::{Point2, Pose2D, WallSpec, WorldView};
use pusher_core::config::{BehaviorConfig, PlannerConfig};
use pusher_core::navigation::planner::{PathPlanner, VisibilityPlanner};
use pusher_core::navigation::visibility::{segments_intersect, VisibilityGraph};
use pusher_core::perception::sensors::{CameraFrame, CameraRing, InfraredRing, RobotSensors};
use pusher_core::perception::PerceptionPipeline;
use pusher_core::placement::PositionSampler;
use pusher_core::{ControllerScript, PusherConfig, SwarmCore};
use rand::rngs::StdRng;
use rand::SeedableRng;

const W: usize = 40;
const H: usize = 30;

/// Four camera images painted through panoramic coordinates
struct Panorama {
    images: Vec<Vec<u8>>,
}

impl Panorama {
    fn new() -> Self {
        Self {
            images: vec![vec![0u8; W * H * 3]; 4],
        }
    }

    fn paint_row(mut self, y: usize, xs: std::ops::Range<usize>, rgb: [u8; 3]) -> Self {
        for x in xs {
            let i = (y * W + x % W) * 3;
            self.images[(x / W) % 4][i..i + 3].copy_from_slice(&rgb);
        }
        self
    }

    fn frames(&self, t: f32) -> Vec<CameraFrame<'_>> {
        self.images.iter().map(|img| CameraFrame::new(W, H, img, t)).collect()
    }
}

fn p(x: f32, y: f32) -> Point2 {
    Point2::new(x, y)
}

fn maps() -> Vec<WorldView> {
    vec![
        WorldView::open_arena(p(-1.0, -1.0), p(1.0, 1.0)),
        WorldView::open_arena(p(0.0, -1.0), p(0.0, 1.0)).with_walls(vec![WallSpec::new(p(0.0, 0.0), p(1.5, 0.5))]),
        WorldView::open_arena(p(-1.0, -1.0), p(-1.0, 1.0)).with_walls(vec![WallSpec::new(p(-0.5, 0.0), p(2.0, 0.5))]),
        WorldView::open_arena(p(-1.0, -1.0), p(1.0, 1.0)).with_walls(vec![
            WallSpec::new(p(-0.5, -0.5), p(2.0, 0.3)),
            WallSpec::new(p(0.5, 0.5), p(2.0, 0.3)),
        ]),
    ]
}

#[test]
fn goal_straight_ahead_with_object_starts_approach() {
    let panorama = Panorama::new()
        .paint_row(10, W / 2 - 10..W / 2 + 10, [0, 255, 0])
        .paint_row(12, 2 * W..2 * W + 6, [255, 0, 0]);
    let frames = panorama.frames(0.5);
    let cameras = CameraRing::new(&frames).unwrap();

    let mut core = SwarmCore::new(PusherConfig::default(), 1).unwrap();
    core.start().unwrap();

    let world = WorldView::open_arena(p(-1.0, -1.0), p(1.0, 1.0));
    let sensors = [RobotSensors {
        cameras,
        infrared: InfraredRing::uniform(1.0),
        pose: Pose2D::new(0.0, 0.0, 0.0),
    }];
    let mut rng = StdRng::seed_from_u64(1);
    let commands = core.tick(&world, &sensors, 0.05, &mut rng);
    assert_eq!(commands.len(), 1);

    let percept = core.percept(0).unwrap();
    assert_abs_diff_eq!(percept.goal_bearing, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(percept.goal_distance, 10.0 / H as f32, epsilon = 1e-6);
    assert!(percept.can_see_object());
    assert_eq!(core.robot_state(0).unwrap().behavior, Behavior::ApproachObject);
}

#[test]
fn pipeline_and_controller_agree_over_a_run() {
    let config = BehaviorConfig::default();
    let ir = InfraredRing::uniform(1.0);

    let run = || {
        // Nothing, both landmarks, object only, goal only
        let scenes = [
            Panorama::new(),
            Panorama::new()
                .paint_row(8, 5..15, [0, 255, 0])
                .paint_row(20, 60..70, [255, 0, 0]),
            Panorama::new().paint_row(20, 60..70, [255, 0, 0]),
            Panorama::new().paint_row(8, 5..15, [0, 255, 0]),
        ];
        let mut pipeline = PerceptionPipeline::default();
        let mut state = RobotState::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut names = Vec::new();
        for tick in 0..80 {
            let scene = &scenes[(tick / 5) % scenes.len()];
            let frames = scene.frames(tick as f32 * 0.1);
            let cameras = CameraRing::new(&frames).unwrap();
            let percept = *pipeline.update(&cameras);
            let input = BehaviorInput {
                percept: &percept,
                infrared: &ir,
            };
            let transition = behaviors::step(&state, &input, &config, 0.1, &mut rng);
            state = transition.next;
            names.push((state.behavior.name(), transition.heading));
        }
        names
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.iter().any(|(name, _)| *name == "APPROACH_OBJECT"));
    assert!(first.iter().any(|(name, _)| *name == "BE_A_GOAL"));
}

#[test]
fn visibility_edges_never_cross_walls() {
    let config = PlannerConfig::default();
    for world in maps() {
        let graph = VisibilityGraph::build(&world, &config);
        for (i, j) in graph.edges() {
            for wall in &world.walls {
                for (a, b) in wall.edges() {
                    assert!(!segments_intersect(graph.nodes[i], graph.nodes[j], a, b, config.parallel_epsilon));
                }
            }
        }
        for node in &graph.nodes {
            assert!(world.in_arena(*node));
        }
    }
}

#[test]
fn every_reference_map_has_a_route() {
    let planner = VisibilityPlanner::new(PlannerConfig::default());
    for world in maps() {
        let plan = planner.plan(&world);
        assert!(!plan.is_empty());
        assert_eq!(plan.path[0], world.object_position);
        assert_eq!(*plan.path.last().unwrap(), world.goal_position);

        let direct = (world.goal_position - world.object_position).norm();
        assert!(plan.length.unwrap() >= direct - 1e-5);

        // Consecutive waypoints are graph neighbors
        for pair in plan.path.windows(2) {
            let i = plan.graph.nodes.iter().position(|n| *n == pair[0]).unwrap();
            let j = plan.graph.nodes.iter().position(|n| *n == pair[1]).unwrap();
            assert!(plan.graph.adjacency[i].iter().any(|&(k, _)| k == j));
        }
    }
}

#[test]
fn placement_keeps_robots_apart_on_every_map() {
    let config = PusherConfig::default().placement;
    let sampler = PositionSampler::new(config.clone());
    let min_separation = 2.0 * config.robot_radius + config.gap;

    for (seed, world) in maps().into_iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let placements = sampler.sample(&world, 15, &mut rng);
        let positions: Vec<Point2> = placements.iter().map(|pl| pl.pose().position).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!((a - b).norm() >= min_separation);
            }
        }
        assert!(placements.iter().all(|pl| !pl.is_degraded()));
    }
}

#[test]
fn teleoperated_episode_routes_robot_zero() {
    let config = PusherConfig {
        script: ControllerScript::Teleoperated,
        ..PusherConfig::default()
    };
    let mut core = SwarmCore::new(config, 3).unwrap();
    core.start().unwrap();

    let world = maps().remove(1);
    let panorama = Panorama::new();
    let frames = panorama.frames(0.0);
    let cameras = CameraRing::new(&frames).unwrap();
    let sensors: Vec<RobotSensors<'_>> = (0..3)
        .map(|i| RobotSensors {
            cameras,
            infrared: InfraredRing::uniform(1.0),
            pose: Pose2D::new(-1.0 + i as f32 * 0.5, 1.2, 0.0),
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(4);
    let commands = core.tick(&world, &sensors, 0.05, &mut rng);
    assert_eq!(commands.len(), 3);
    assert!(!commands[0].is_stopped());

    let teleop = core.last_teleop().unwrap();
    let point = teleop.pursuit_point.unwrap();
    // Half a meter from the object along the first leg of the route
    assert_abs_diff_eq!((point - world.object_position).norm(), 0.5, epsilon = 1e-4);
    assert!(core.appears_as_goal(0));
    assert!(!core.appears_as_goal(1));

    core.stop().unwrap();
}

#[test]
fn config_file_round_trips_through_disk() {
    let path = std::env::temp_dir().join(format!("pusher_core_{}.toml", std::process::id()));
    std::fs::write(&path, "script = \"baseline\"\n[planner]\nlookahead_distance = 0.3\n").unwrap();
    let config = PusherConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.script, ControllerScript::Baseline);
    assert_eq!(config.planner.lookahead_distance, 0.3);
    assert!(PusherConfig::load(std::env::temp_dir().join("does-not-exist.toml")).is_err());
}
