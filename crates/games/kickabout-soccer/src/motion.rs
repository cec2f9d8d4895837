use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use kickabout_core::FrameTime;

/// Playable half-extents of the field on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub half_x: f32,
    pub half_z: f32,
}

impl Bounds {
    pub const fn new(half_x: f32, half_z: f32) -> Self {
        Self { half_x, half_z }
    }

    /// Half of each field dimension minus the boundary margin.
    pub fn from_field(width: f32, height: f32, margin: f32) -> Self {
        Self::new(width / 2.0 - margin, height / 2.0 - margin)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() <= self.half_x && p.z.abs() <= self.half_z
    }

    /// Clamp `p` into the playable area, leaving `y` untouched.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(-self.half_x, self.half_x),
            p.y,
            p.z.clamp(-self.half_z, self.half_z),
        )
    }
}

/// What happens when a body's step would carry it past the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Clamp to the boundary and reflect the normal velocity component,
    /// scaled by `factor`.
    Bounce { factor: f32 },
    /// Clamp to the boundary, keep velocity.
    Clamp,
    /// No confinement.
    Unbounded,
}

/// Unit of the integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepUnit {
    /// One step per frame regardless of wall-clock time (velocity is in
    /// units per frame).
    #[default]
    Frame,
    /// Step by the frame's elapsed seconds (velocity is in units per second).
    Elapsed,
}

impl StepUnit {
    pub fn dt(self, frame: &FrameTime) -> f32 {
        match self {
            StepUnit::Frame => 1.0,
            StepUnit::Elapsed => frame.dt,
        }
    }
}

/// Which axes hit the boundary during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub x: bool,
    pub z: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.x || self.z
    }
}

/// Position, velocity and friction of a body moving on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Vec3,
    /// `y` is unused; forces only ever touch `x` and `z`.
    pub velocity: Vec3,
    /// Per-step multiplicative decay, in (0, 1).
    pub friction: f32,
}

impl MotionState {
    pub fn new(position: Vec3, friction: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            friction,
        }
    }

    /// Speed on the ground plane.
    pub fn speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// Decay velocity by friction, then move by `velocity * dt`, resolving
    /// the boundary per axis according to `policy`.
    pub fn step(&mut self, dt: f32, bounds: &Bounds, policy: BoundaryPolicy) -> WallContact {
        self.velocity *= self.friction;

        let mut next = self.position + self.velocity * dt;
        let mut contact = WallContact::default();

        if let Some(x) = resolve_axis(next.x, &mut self.velocity.x, bounds.half_x, policy) {
            next.x = x;
            contact.x = true;
        }
        if let Some(z) = resolve_axis(next.z, &mut self.velocity.z, bounds.half_z, policy) {
            next.z = z;
            contact.z = true;
        }

        self.position = next;
        contact
    }

    /// Add a ground-plane force: `force.x` to `velocity.x`, `force.y` to
    /// `velocity.z`.
    pub fn add_to_velocity(&mut self, force: Vec2) {
        self.velocity.x += force.x;
        self.velocity.z += force.y;
    }

    /// Teleport to `position` (clamped unless the policy is unbounded) and
    /// stop.
    pub fn reset_to(&mut self, position: Vec3, bounds: &Bounds, policy: BoundaryPolicy) {
        self.position = match policy {
            BoundaryPolicy::Unbounded => position,
            BoundaryPolicy::Bounce { .. } | BoundaryPolicy::Clamp => bounds.clamp(position),
        };
        self.velocity = Vec3::ZERO;
    }
}

/// Returns the clamped coordinate when `value` is past `half`.
fn resolve_axis(value: f32, velocity: &mut f32, half: f32, policy: BoundaryPolicy) -> Option<f32> {
    if value.abs() <= half {
        return None;
    }
    let clamped = half.copysign(value);
    match policy {
        BoundaryPolicy::Bounce { factor } => {
            *velocity *= -factor;
            Some(clamped)
        },
        BoundaryPolicy::Clamp => Some(clamped),
        BoundaryPolicy::Unbounded => None,
    }
}
