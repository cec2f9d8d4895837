use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::motion::Bounds;

/// Field length along x.
pub const FIELD_WIDTH: f32 = 30.0;
/// Field length along z.
pub const FIELD_HEIGHT: f32 = 20.0;
/// Gap between the touchline and the playable area.
pub const FIELD_MARGIN: f32 = 1.0;
/// Goal mouth width.
pub const GOAL_WIDTH: f32 = 4.0;
/// Crossbar height.
pub const GOAL_HEIGHT: f32 = 2.0;
/// Goal box depth.
pub const GOAL_DEPTH: f32 = 1.0;
/// Distance of each goal from the centre spot along x.
pub const GOAL_LINE_X: f32 = 14.5;

/// An open box in front of the goal frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Goal {
    pub fn new(position: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            position,
            width,
            height,
            depth,
        }
    }

    /// Whether the ball centre is inside the goal box. The box is open below
    /// (no floor test) and measured in the goal's unrotated local frame.
    pub fn check_goal(&self, ball: Vec3) -> bool {
        let local = ball - self.position;
        local.x.abs() < self.width / 2.0 && local.y < self.height && local.z.abs() < self.depth / 2.0
    }
}

/// One of the two ends of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Result of testing the ball against both goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalCheck {
    None,
    /// Ball is inside the left goal.
    Left,
    /// Ball is inside the right goal.
    Right,
}

impl GoalCheck {
    pub fn is_goal(self) -> bool {
        !matches!(self, GoalCheck::None)
    }

    /// The goal the ball went into.
    pub fn goal_side(self) -> Option<Side> {
        match self {
            GoalCheck::None => None,
            GoalCheck::Left => Some(Side::Left),
            GoalCheck::Right => Some(Side::Right),
        }
    }

    /// The side credited with the goal: the one attacking that end.
    pub fn scoring_side(self) -> Option<Side> {
        self.goal_side().map(Side::opponent)
    }
}

/// The pitch: fixed extents and two goals. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    width: f32,
    height: f32,
    margin: f32,
    left_goal: Goal,
    right_goal: Goal,
}

impl Field {
    pub fn new(config: &FieldConfig) -> Self {
        let goal = |x: f32| {
            Goal::new(
                Vec3::new(x, 0.0, 0.0),
                config.goal.width,
                config.goal.height,
                config.goal.depth,
            )
        };
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
            left_goal: goal(-config.goal.line_x),
            right_goal: goal(config.goal.line_x),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Playable half-extents shared by the ball and the player.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_field(self.width, self.height, self.margin)
    }

    pub fn left_goal(&self) -> &Goal {
        &self.left_goal
    }

    pub fn right_goal(&self) -> &Goal {
        &self.right_goal
    }

    /// Test the ball against both goals. Each goal is evaluated on its own;
    /// if both ever matched the right goal is reported.
    pub fn check_goals(&self, ball: Vec3) -> GoalCheck {
        let in_right = self.right_goal.check_goal(ball);
        let in_left = self.left_goal.check_goal(ball);
        match (in_right, in_left) {
            (true, _) => GoalCheck::Right,
            (false, true) => GoalCheck::Left,
            (false, false) => GoalCheck::None,
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(&FieldConfig::default())
    }
}
