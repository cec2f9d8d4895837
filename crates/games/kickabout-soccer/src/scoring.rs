use serde::{Deserialize, Serialize};

use crate::field::Side;

/// Goals scored by each side this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub left: u32,
    pub right: u32,
}

impl Scoreboard {
    /// Credit a goal to `side`, returning its new tally.
    pub fn record(&mut self, side: Side) -> u32 {
        let tally = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *tally += 1;
        *tally
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }

    /// The side ahead, or `None` when level.
    pub fn leader(&self) -> Option<Side> {
        match self.left.cmp(&self.right) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Text shown when `scorer` scores.
pub fn goal_announcement(scorer: Side) -> &'static str {
    match scorer {
        Side::Left => "Goal for the left team!",
        Side::Right => "Goal for the right team!",
    }
}
