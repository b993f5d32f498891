//! Behaviour tests for mobile movement using rust-rspec.
//!
//! One entity walks straight at another that stands in its way. Each
//! collision policy must keep the pair from overlapping: clamp and slide stop
//! the walker touching the obstacle, steering walks round it.

use approx::assert_relative_eq;
use glam::Vec3;
use test_utils::{command_move, gap, is_moving, mob, position, registry_with, FRAME};
use warband::{CollisionPolicy, EntityId, MovementConfig, Registry, Role, ARRIVAL_EPSILON};

const GOAL: Vec3 = Vec3::new(4.0, 0.0, 0.0);
const FRAMES: usize = 240;

#[derive(Clone, Debug)]
struct Approach {
    registry: Registry,
    walker: EntityId,
    blocker: EntityId,
    gap_when_stopped: Option<f32>,
    min_gap: f32,
    walked: bool,
}

impl Approach {
    fn new(policy: CollisionPolicy) -> Self {
        let (registry, ids) = registry_with(
            MovementConfig::default().with_policy(policy),
            [
                mob(Role::PartyMember, 0.0, 0.0, 0.5),
                mob(Role::Enemy, 2.0, 0.0, 0.5),
            ],
        );
        Self {
            registry,
            walker: ids[0],
            blocker: ids[1],
            gap_when_stopped: None,
            min_gap: f32::INFINITY,
            walked: false,
        }
    }

    fn walk(&mut self) {
        if self.walked {
            return;
        }
        self.walked = true;
        command_move(&mut self.registry, self.walker, GOAL);
        for _ in 0..FRAMES {
            self.registry.update_all(FRAME);
            let current = gap(&self.registry, self.walker, self.blocker);
            self.min_gap = self.min_gap.min(current);
            if self.gap_when_stopped.is_none() && !is_moving(&self.registry, self.walker) {
                self.gap_when_stopped = Some(current);
            }
        }
    }

    fn assert_stopped_touching(&self) {
        let stopped = self.gap_when_stopped.expect("walker should have stopped");
        assert!(
            (0.999..=1.05).contains(&stopped),
            "walker stopped {stopped} from the blocker"
        );
        let settled = gap(&self.registry, self.walker, self.blocker);
        assert!(
            (1.0 - 1e-3..=1.2 + 1e-3).contains(&settled),
            "pair settled {settled} apart"
        );
        assert!(position(&self.registry, self.walker).x < position(&self.registry, self.blocker).x);
        assert!(!is_moving(&self.registry, self.walker));
    }

    fn assert_walked_round(&self) {
        let end = position(&self.registry, self.walker);
        assert!(end.distance(GOAL) <= ARRIVAL_EPSILON, "walker ended at {end:?}");
        assert!(self.min_gap >= 1.0 - 1e-3, "pair came {} close", self.min_gap);
        assert!(!is_moving(&self.registry, self.walker));
    }

    fn assert_radii_unchanged(&self) {
        for id in [self.walker, self.blocker] {
            let radius = self.registry.mobile(id).map(warband::MobileEntity::radius);
            assert_relative_eq!(radius.unwrap_or_default(), 0.5);
        }
    }
}

#[test]
fn clamp_stops_walker_at_the_blocker() {
    rspec::run(&rspec::given(
        "a walker heading straight through a standing blocker under clamp",
        Approach::new(CollisionPolicy::Clamp),
        |ctx| {
            ctx.when("the walker is sent past the blocker", |ctx| {
                ctx.before_each(Approach::walk);
                ctx.then("it stops touching the blocker", Approach::assert_stopped_touching);
                ctx.then("no radius changes", Approach::assert_radii_unchanged);
            });
        },
    ));
}

#[test]
fn slide_stops_walker_on_a_head_on_approach() {
    rspec::run(&rspec::given(
        "a walker heading straight through a standing blocker under slide",
        Approach::new(CollisionPolicy::Slide),
        |ctx| {
            ctx.when("the walker is sent past the blocker", |ctx| {
                ctx.before_each(Approach::walk);
                ctx.then(
                    "nothing is left to slide along so it stops touching",
                    Approach::assert_stopped_touching,
                );
            });
        },
    ));
}

#[test]
fn predictive_steering_walks_round_the_blocker() {
    rspec::run(&rspec::given(
        "a walker heading straight through a standing blocker under predictive steering",
        Approach::new(CollisionPolicy::Steering { predictive: true }),
        |ctx| {
            ctx.when("the walker is sent past the blocker", |ctx| {
                ctx.before_each(Approach::walk);
                ctx.then(
                    "it reaches the goal without overlapping the blocker",
                    Approach::assert_walked_round,
                );
                ctx.then("no radius changes", Approach::assert_radii_unchanged);
            });
        },
    ));
}
