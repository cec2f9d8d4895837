use std::fmt;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use kickabout_core::FrameTime;

use crate::asset::{AssetError, LoadState, ModelData};
use crate::config::BallConfig;
use crate::motion::{BoundaryPolicy, Bounds, MotionState, StepUnit, WallContact};

/// Friction multiplier per step (velocity *= FRICTION).
pub const FRICTION: f32 = 0.9;
/// Share of the normal velocity kept when bouncing off a field edge.
pub const BOUNCE_FACTOR: f32 = 0.8;
/// Radians of visual roll per unit of speed.
pub const ROTATION_FACTOR: f32 = 5.0;
/// Squared speed below which the ball is not visually rolled.
pub const ROLL_EPSILON_SQ: f32 = 1e-4;
/// Default path of the ball mesh.
pub const MODEL_PATH: &str = "assets/ball.obj";
/// Uniform scale applied to the ball mesh.
pub const MODEL_SCALE: f32 = 0.2;
/// Where the ball is placed at kickoff and after every goal.
pub const KICKOFF_SPOT: Vec3 = Vec3::new(0.0, 0.2, 0.0);

/// Continuation run once the ball's model is ready.
pub type LoadCallback = Box<dyn FnOnce(&mut Ball)>;

/// Render-facing view of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub model_ready: bool,
}

/// The ball: bounces off the field edges and rolls visually while moving.
pub struct Ball {
    motion: MotionState,
    rotation: Quat,
    bounds: Bounds,
    policy: BoundaryPolicy,
    rotation_factor: f32,
    step_unit: StepUnit,
    model: LoadState,
    on_load: Option<LoadCallback>,
}

impl Ball {
    pub fn new(config: &BallConfig, bounds: Bounds) -> Self {
        Self {
            motion: MotionState::new(Vec3::ZERO, config.friction),
            rotation: Quat::IDENTITY,
            bounds,
            policy: BoundaryPolicy::Bounce {
                factor: config.bounce_factor,
            },
            rotation_factor: config.rotation_factor,
            step_unit: config.step,
            model: LoadState::Loading,
            on_load: None,
        }
    }

    /// Advance one frame: friction, movement, edge bounce, visual roll.
    pub fn update(&mut self, frame: &FrameTime) -> WallContact {
        let dt = self.step_unit.dt(frame);
        let contact = self.motion.step(dt, &self.bounds, self.policy);
        self.roll();
        contact
    }

    fn roll(&mut self) {
        let v = self.motion.velocity;
        if v.length_squared() <= ROLL_EPSILON_SQ {
            return;
        }
        let axis = Vec3::new(-v.z, 0.0, v.x).normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        let angle = v.length() * self.rotation_factor;
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Place the ball (clamped into the field) and stop it.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.motion
            .reset_to(Vec3::new(x, y, z), &self.bounds, self.policy);
    }

    pub fn add_to_velocity(&mut self, force: Vec2) {
        self.motion.add_to_velocity(force);
    }

    /// Run `callback` once the model is ready: immediately if it already is,
    /// otherwise when [`Ball::finish_load`] succeeds. Only one callback is
    /// kept; a later registration replaces an earlier pending one.
    pub fn on_load(&mut self, callback: impl FnOnce(&mut Ball) + 'static) {
        if self.model.is_ready() {
            callback(self);
        } else {
            if self.on_load.is_some() {
                tracing::debug!("Replacing pending ball load callback");
            }
            self.on_load = Some(Box::new(callback));
        }
    }

    /// Deliver the result of the model load. Success fires the pending
    /// callback; failure is logged and the ball carries on without a model.
    /// Results arriving after the first are ignored.
    pub fn finish_load(&mut self, result: Result<ModelData, AssetError>) {
        if !matches!(self.model, LoadState::Loading) {
            tracing::debug!("Ignoring duplicate ball model load result");
            return;
        }
        match result {
            Ok(model) => {
                tracing::debug!(
                    vertices = model.vertices.len(),
                    faces = model.face_count,
                    "Ball model loaded"
                );
                self.model = LoadState::Ready(model);
                if let Some(callback) = self.on_load.take() {
                    callback(self);
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Error loading ball model");
                self.model = LoadState::Failed(e);
                self.on_load = None;
            },
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.model
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_ready()
    }

    pub fn model(&self) -> Option<&ModelData> {
        match &self.model {
            LoadState::Ready(m) => Some(m),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            position: self.motion.position,
            velocity: self.motion.velocity,
            rotation: self.rotation,
            model_ready: self.is_loaded(),
        }
    }
}

impl fmt::Debug for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ball")
            .field("motion", &self.motion)
            .field("rotation", &self.rotation)
            .field("policy", &self.policy)
            .field("model", &self.model)
            .field("pending_on_load", &self.on_load.is_some())
            .finish()
    }
}
