use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use kickabout_core::FrameTime;

use crate::ball::Ball;
use crate::config::PlayerConfig;
use crate::motion::{BoundaryPolicy, Bounds, MotionState};

/// Velocity added per `move_in` call.
pub const SPEED: f32 = 1.0;
/// Friction multiplier per step.
pub const FRICTION: f32 = 0.9;
/// Kick force at zero charge.
pub const MIN_KICK_FORCE: f32 = 3.0;
/// Kick force ceiling.
pub const MAX_KICK_FORCE: f32 = 15.0;
/// Kick force gained per second of charge.
pub const KICK_CHARGE_RATE: f32 = 10.0;
/// Maximum player-to-ball distance for a kick to connect.
pub const KICK_DISTANCE: f32 = 2.0;
/// Player body radius for ball contact.
pub const PLAYER_RADIUS: f32 = 0.5;
/// Extra reach added to the radius before contact pushes the ball.
pub const CONTACT_MARGIN: f32 = 0.2;
/// Fraction of the player's speed passed to the ball on contact.
pub const COLLISION_FORCE: f32 = 0.05;
/// Largest push a single frame of contact can give the ball.
pub const MAX_CONTACT_PUSH: f32 = 2.0;
/// Player spawn point.
pub const SPAWN_POINT: Vec3 = Vec3::new(-5.0, 0.0, 0.0);

/// Charge-kick state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum KickState {
    #[default]
    Idle,
    /// Kick key held since `started_at` (frame-clock seconds).
    Charging { started_at: f32 },
}

/// How a kick release resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KickOutcome {
    /// Released without a charge in progress.
    NotCharging,
    /// The ball was too far away; the charge is spent anyway.
    OutOfRange { distance: f32 },
    /// The ball received `force` along `direction`.
    Kicked { force: f32, direction: Vec2 },
}

/// Render-facing view of the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: f32,
    pub charging: bool,
}

/// Kick force for a charge held `hold` seconds.
pub fn kick_force(hold: f32, config: &PlayerConfig) -> f32 {
    (config.min_kick_force + hold * config.kick_charge_rate)
        .clamp(config.min_kick_force, config.max_kick_force)
}

/// Ground-plane vector from `from` to `to`.
fn planar_offset(from: Vec3, to: Vec3) -> Vec2 {
    Vec2::new(to.x - from.x, to.z - from.z)
}

/// The controllable player.
#[derive(Debug, Clone)]
pub struct Player {
    motion: MotionState,
    facing: f32,
    kick: KickState,
    bounds: Bounds,
    config: PlayerConfig,
}

impl Player {
    pub fn new(config: &PlayerConfig, bounds: Bounds) -> Self {
        let mut player = Self {
            motion: MotionState::new(Vec3::ZERO, config.friction),
            facing: 0.0,
            kick: KickState::Idle,
            bounds,
            config: config.clone(),
        };
        player.set_position(config.spawn.x, config.spawn.z);
        player
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    /// Yaw in radians, from the last non-zero movement direction.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn kick_state(&self) -> KickState {
        self.kick
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.kick, KickState::Charging { .. })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Place the player on the ground at (`x`, `z`) and stop.
    pub fn set_position(&mut self, x: f32, z: f32) {
        self.motion
            .reset_to(Vec3::new(x, 0.0, z), &self.bounds, BoundaryPolicy::Clamp);
    }

    /// Accelerate along `direction` (ground plane, any length) and turn to
    /// face it. A zero direction does nothing.
    pub fn move_in(&mut self, direction: Vec2) {
        let normalized = direction.normalize_or_zero();
        if normalized == Vec2::ZERO {
            return;
        }
        self.motion.add_to_velocity(normalized * self.config.speed);
        self.facing = direction.x.atan2(direction.y);
    }

    /// Begin charging a kick at time `now`. Ignored while already charging.
    pub fn start_kick(&mut self, now: f32) {
        if let KickState::Idle = self.kick {
            self.kick = KickState::Charging { started_at: now };
        }
    }

    /// Release the kick at time `now`. Always leaves the player idle.
    pub fn end_kick(&mut self, now: f32, ball: &mut Ball) -> KickOutcome {
        let KickState::Charging { started_at } = self.kick else {
            return KickOutcome::NotCharging;
        };
        self.kick = KickState::Idle;

        let offset = planar_offset(self.motion.position, ball.position());
        let distance = offset.length();
        if distance > self.config.kick_distance {
            return KickOutcome::OutOfRange { distance };
        }

        let force = kick_force(now - started_at, &self.config);
        let direction = offset.normalize_or_zero();
        ball.add_to_velocity(direction * force);
        tracing::debug!(force, distance, hold = now - started_at, "Ball kicked");
        KickOutcome::Kicked { force, direction }
    }

    /// Advance one frame and nudge the ball if the player is touching it.
    /// Returns the push given to the ball, if any.
    pub fn update(&mut self, frame: &FrameTime, ball: &mut Ball) -> Option<f32> {
        let dt = self.config.step.dt(frame);
        self.motion.step(dt, &self.bounds, BoundaryPolicy::Clamp);
        self.push_ball(ball)
    }

    fn push_ball(&self, ball: &mut Ball) -> Option<f32> {
        let offset = planar_offset(self.motion.position, ball.position());
        let distance = offset.length();
        if distance >= self.config.radius + self.config.contact_margin {
            return None;
        }
        // Coincident centres have no separation direction.
        let direction = offset.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }
        let push = (self.motion.speed() * self.config.collision_force)
            .min(self.config.max_contact_push);
        ball.add_to_velocity(direction * push);
        Some(push)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.motion.position,
            velocity: self.motion.velocity,
            facing: self.facing,
            charging: self.is_charging(),
        }
    }
}
