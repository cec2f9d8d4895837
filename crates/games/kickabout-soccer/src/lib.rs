pub mod asset;
pub mod ball;
pub mod config;
pub mod field;
pub mod motion;
pub mod player;
pub mod scoring;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use kickabout_core::FrameTime;

use asset::{AssetError, ModelData};
use ball::{Ball, BallSnapshot};
use config::SoccerConfig;
use field::{Field, Side};
use player::{KickOutcome, Player, PlayerSnapshot};
use scoring::{Scoreboard, goal_announcement};

/// A kick key transition, in the order the host saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KickEdge {
    Press,
    Release,
}

/// Player intent for one frame, already resolved from raw keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    /// Ground-plane movement direction; need not be normalized.
    pub direction: Vec2,
    /// Kick key transitions since the previous frame, oldest first.
    pub kick_edges: Vec<KickEdge>,
}

/// Something that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Kicked { force: f32 },
    KickMissed { distance: f32 },
    /// The ball entered `goal`; `scorer` is credited.
    Goal { goal: Side, scorer: Side },
}

/// Serializable view of the match for rendering or logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub ball: BallSnapshot,
    pub player: PlayerSnapshot,
    pub score: Scoreboard,
    pub paused: bool,
}

/// One ball, one player, one field.
#[derive(Debug)]
pub struct SoccerMatch {
    config: SoccerConfig,
    field: Field,
    ball: Ball,
    player: Player,
    scoreboard: Scoreboard,
    paused: bool,
}

impl SoccerMatch {
    pub fn new(config: SoccerConfig) -> Self {
        let field = Field::new(&config.field);
        let bounds = field.bounds();
        let mut ball = Ball::new(&config.ball, bounds);
        let kickoff = config.ball.kickoff;
        ball.on_load(move |ball| ball.set_position(kickoff.x, kickoff.y, kickoff.z));
        let player = Player::new(&config.player, bounds);
        Self {
            config,
            field,
            ball,
            player,
            scoreboard: Scoreboard::default(),
            paused: false,
        }
    }

    pub fn config(&self) -> &SoccerConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Hand the ball its model load result. On success the ball moves to the
    /// kickoff spot.
    pub fn finish_ball_load(&mut self, result: Result<ModelData, AssetError>) {
        self.ball.finish_load(result);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one frame.
    pub fn update(&mut self, frame: &FrameTime, input: &MatchInput) -> Vec<MatchEvent> {
        if self.paused {
            return Vec::new();
        }
        let mut events = Vec::new();

        for edge in &input.kick_edges {
            match edge {
                KickEdge::Press => self.player.start_kick(frame.elapsed),
                KickEdge::Release => match self.player.end_kick(frame.elapsed, &mut self.ball) {
                    KickOutcome::Kicked { force, .. } => {
                        events.push(MatchEvent::Kicked { force });
                    },
                    KickOutcome::OutOfRange { distance } => {
                        events.push(MatchEvent::KickMissed { distance });
                    },
                    KickOutcome::NotCharging => {},
                },
            }
        }
        self.player.move_in(input.direction);

        self.ball.update(frame);
        self.player.update(frame, &mut self.ball);

        let check = self.field.check_goals(self.ball.position());
        if let (Some(goal), Some(scorer)) = (check.goal_side(), check.scoring_side()) {
            let tally = self.scoreboard.record(scorer);
            tracing::info!(
                ?goal,
                ?scorer,
                tally,
                "{}",
                goal_announcement(scorer)
            );
            self.reset_ball();
            events.push(MatchEvent::Goal { goal, scorer });
        }

        events
    }

    /// Put the ball back on the kickoff spot, stopped.
    pub fn reset_ball(&mut self) {
        let k = self.config.ball.kickoff;
        self.ball.set_position(k.x, k.y, k.z);
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            ball: self.ball.snapshot(),
            player: self.player.snapshot(),
            score: self.scoreboard,
            paused: self.paused,
        }
    }
}

impl Default for SoccerMatch {
    fn default() -> Self {
        Self::new(SoccerConfig::default())
    }
}
