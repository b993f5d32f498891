//! Behaviour tests for a full game session using rust-rspec.
//!
//! The demo world is driven through plain frame input: the player moves and
//! switches characters while enemies close in on the party.

use glam::{Vec2, Vec3};
use test_utils::FRAME;
use warband::{
    screen_to_ground, spawn_demo_world, ChaseDecision, EntityId, FrameInput, Game,
    SimulationConfig, ARRIVAL_EPSILON,
};

#[derive(Clone, Debug)]
struct Session {
    game: Game,
}

impl Default for Session {
    fn default() -> Self {
        let mut game = Game::new(&SimulationConfig::default());
        spawn_demo_world(&mut game).expect("demo world spawns");
        Self { game }
    }
}

impl Session {
    fn run(&mut self, frames: usize, input: FrameInput) -> Vec<ChaseDecision> {
        let mut decisions = Vec::new();
        for _ in 0..frames {
            self.game.handle_input(&input);
            decisions = self.game.update(FRAME);
        }
        decisions
    }

    fn active_position(&self) -> Vec3 {
        let id = self.game.active_member().expect("party exists");
        self.position(id)
    }

    fn position(&self, id: EntityId) -> Vec3 {
        self.game
            .registry()
            .mobile(id)
            .map(warband::MobileEntity::position)
            .expect("mobile exists")
    }
}

#[test]
fn demo_world_layout() {
    let session = Session::default();
    let game = &session.game;
    assert_eq!(game.party().len(), 3);
    assert_eq!(game.controllers().len(), 3);
    assert_eq!(game.render_items().len(), 7);
    let red = game.party()[0];
    assert_eq!(game.active_member(), Some(red));
    assert_eq!(session.position(red), Vec3::ZERO);
    assert_eq!(game.camera().focus(), Vec3::ZERO);
}

#[test]
fn player_moves_and_switches() {
    rspec::run(&rspec::given("the demo world", Session::default(), |ctx| {
        ctx.when("the move button is held over a ground point", |ctx| {
            ctx.before_each(|session| {
                *session = Session::default();
                session.run(120, FrameInput::hold_at(Vec3::new(0.0, 0.0, 5.0)));
            });
            ctx.then("the active character walks there", |session| {
                let goal = Vec3::new(0.0, 0.0, 5.0);
                assert!(session.active_position().distance(goal) <= ARRIVAL_EPSILON);
            });
            ctx.then("the camera follows it", |session| {
                assert_eq!(session.game.camera().focus(), session.active_position());
            });
        });
        ctx.when("the party switch key is pressed", |ctx| {
            ctx.before_each(|session| {
                *session = Session::default();
                session.run(1, FrameInput::switch());
            });
            ctx.then("the second character becomes active", |session| {
                assert_eq!(session.game.active_member(), Some(session.game.party()[1]));
            });
        });
    }));
}

#[test]
fn enemies_surround_idle_party() {
    let mut session = Session::default();
    let decisions = session.run(900, FrameInput::default());
    assert!(decisions
        .iter()
        .all(|decision| matches!(decision, ChaseDecision::Holding { .. })));

    let bodies = session.game.registry().neighbours();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let gap = a.position.distance(b.position);
            assert!(gap >= a.radius + b.radius - 1e-3, "{} and {} overlap", a.id, b.id);
        }
    }
}

#[test]
fn pointer_projection_drives_movement() {
    let mut session = Session::default();
    let viewport = Vec2::new(800.0, 600.0);
    let camera = session.game.camera();
    let point = screen_to_ground(
        Vec2::new(600.0, 300.0),
        viewport,
        camera.view_matrix(),
        camera.projection_matrix(viewport.x, viewport.y),
    )
    .expect("pointer hits the ground");
    assert!(point.x > 0.0);

    session.run(1, FrameInput::hold_at(point));
    let active = session.game.active_member().expect("party exists");
    let target = session.game.registry().mobile(active).and_then(warband::MobileEntity::target);
    assert_eq!(target, Some(point));

    session.run(1, FrameInput::release());
    let moving = session
        .game
        .registry()
        .mobile(active)
        .is_some_and(warband::MobileEntity::is_moving);
    assert!(!moving);
}
