use tracing_subscriber::EnvFilter;

use kickabout_client::{FsModelLoader, GameSession, HeadlessSurface, RecordingHost, SessionConfig};
use kickabout_soccer::MatchEvent;
use kickabout_soccer::config::SoccerConfig;

const FRAME_DT: f64 = 1.0 / 60.0;

/// A scripted key action at a given frame.
enum Step {
    Down(&'static str),
    Up(&'static str),
    Resize(u32, u32),
}

/// Walk right onto the ball, charge a kick, then drive it towards the right
/// goal.
const SCRIPT: &[(u32, Step)] = &[
    (10, Step::Down("KeyD")),
    (70, Step::Down("Space")),
    (95, Step::Up("KeyD")),
    (100, Step::Up("Space")),
    (160, Step::Down("KeyD")),
    (240, Step::Resize(1024, 768)),
    (300, Step::Up("KeyD")),
    (310, Step::Down("Space")),
    (320, Step::Up("Space")),
];
const TOTAL_FRAMES: u32 = 600;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Kickabout headless session starting");

    let session_config = SessionConfig::load();
    let soccer_config = SoccerConfig::load();
    let mut session = GameSession::new(
        &session_config,
        soccer_config,
        RecordingHost::new(),
        HeadlessSurface::new(Some((1280, 720))),
        FsModelLoader::new(),
    );

    let mut now = 0.0;
    for frame in 0..TOTAL_FRAMES {
        for (_, step) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            match step {
                Step::Down(code) => session.on_key_down(code, false),
                Step::Up(code) => session.on_key_up(code),
                Step::Resize(w, h) => {
                    session.surface_mut().set_container(Some((*w, *h)));
                    session.on_resize();
                },
            }
        }

        let Some(report) = session.frame(now) else {
            break;
        };
        for event in &report.events {
            match event {
                MatchEvent::Kicked { force } => tracing::info!(frame, force, "Kick"),
                MatchEvent::KickMissed { distance } => {
                    tracing::info!(frame, distance, "Kick missed");
                },
                MatchEvent::Goal { .. } => {},
            }
        }
        now += FRAME_DT;
    }

    let score = session.soccer().scoreboard();
    tracing::info!(
        left = score.left,
        right = score.right,
        ball = ?session.soccer().ball().position(),
        player = ?session.soccer().player().position(),
        "Session finished"
    );
    session.dispose();
}
