//! Movement and behaviour constants used across systems.
//!
//! These are the defaults behind [`crate::MovementConfig`],
//! [`crate::ChaseConfig`] and [`crate::WaypointConfig`]. Configuration files
//! may override most of them at start-up.

/// Remaining distance at which a seeking entity snaps onto its target.
pub const ARRIVAL_EPSILON: f32 = 0.1;
/// Lengths below this are treated as zero when normalising directions.
pub const DISTANCE_EPSILON: f32 = 0.001;
/// Fraction of the tangential movement kept when sliding along a neighbour.
pub const SLIDE_FRICTION: f32 = 0.7;
/// Separation acts on neighbours closer than this multiple of the summed radii.
pub const SEPARATION_DISTANCE_FACTOR: f32 = 1.2;
/// Speed, in units per second, of the corrective separation nudge.
pub const SEPARATION_SPEED: f32 = 2.0;
/// Steering repulsion reaches this multiple of the summed radii.
pub const AVOIDANCE_RADIUS_FACTOR: f32 = 2.0;
/// Weight of the perpendicular push away from a predicted obstacle.
pub const AVOIDANCE_WEIGHT: f32 = 1.5;
/// Seconds of look-ahead used by predictive steering.
pub const PREDICTION_HORIZON: f32 = 0.5;

/// Gap kept between a chaser and its target once in range.
pub const STOP_GAP: f32 = 0.2;
/// Fraction of the stop distance below which a chaser backs away.
pub const BACKOFF_RATIO: f32 = 0.7;

/// Radius of the first waypoint ring.
pub const WAYPOINT_INITIAL_RADIUS: f32 = 3.0;
/// Each waypoint ring is this fraction of the previous one.
pub const WAYPOINT_SHRINK_FACTOR: f32 = 0.7;
/// Samples evaluated on every waypoint ring.
pub const WAYPOINT_RING_SAMPLES: usize = 16;
/// Minimum waypoint clearance as a fraction of the searcher's radius.
pub const WAYPOINT_CLEARANCE_RATIO: f32 = 0.5;
/// Upper bound on rings per pass, whatever the configuration says.
pub const WAYPOINT_MAX_ROUNDS: usize = 32;

/// Default movement speed in units per second.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 5.0;
/// Default collision radius of a mobile entity.
pub const DEFAULT_RADIUS: f32 = 0.5;
/// Default attacks per second. Not used by movement.
pub const DEFAULT_ATTACK_SPEED: f32 = 1.0;
/// Default health and energy pools.
pub const DEFAULT_POOL: f32 = 100.0;

/// Camera position relative to the followed character.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 15.0, 15.0];
/// Vertical field of view of the gameplay camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
/// Near clipping plane.
pub const CAMERA_NEAR: f32 = 0.1;
/// Far clipping plane.
pub const CAMERA_FAR: f32 = 100.0;

/// Fixed frame length used by the headless driver.
pub const DEFAULT_FRAME_SECONDS: f64 = 1.0 / 60.0;
