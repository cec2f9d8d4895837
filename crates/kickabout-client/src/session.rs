use kickabout_core::{FrameClock, FrameTime, InputState, KeyBindings};
use kickabout_soccer::config::SoccerConfig;
use kickabout_soccer::{KickEdge, MatchEvent, MatchInput, MatchSnapshot, SoccerMatch};

use crate::camera::Camera;
use crate::config::SessionConfig;
use crate::host::{HostEvents, ListenerId, ListenerKind};
use crate::loader::ModelLoader;
use crate::surface::RenderSurface;

/// What one call to [`GameSession::frame`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub time: FrameTime,
    pub events: Vec<MatchEvent>,
    pub snapshot: MatchSnapshot,
}

/// The running game: the match plus everything wired to the host.
///
/// Key handlers only record state; the match sees input once per frame.
/// After [`GameSession::dispose`] every handler is inert.
pub struct GameSession<H: HostEvents, S: RenderSurface, L: ModelLoader> {
    soccer: SoccerMatch,
    input: InputState,
    kick_edges: Vec<KickEdge>,
    bindings: KeyBindings,
    clock: FrameClock,
    camera: Camera,
    host: H,
    surface: S,
    loader: L,
    listeners: Vec<ListenerId>,
    disposed: bool,
}

impl<H: HostEvents, S: RenderSurface, L: ModelLoader> GameSession<H, S, L> {
    pub fn new(
        config: &SessionConfig,
        soccer: SoccerConfig,
        mut host: H,
        surface: S,
        mut loader: L,
    ) -> Self {
        let listeners = [ListenerKind::KeyDown, ListenerKind::KeyUp, ListenerKind::Resize]
            .into_iter()
            .map(|kind| host.add_listener(kind))
            .collect();
        loader.start(&soccer.ball.model_path, soccer.ball.model_scale);

        let mut session = Self {
            soccer: SoccerMatch::new(soccer),
            input: InputState::new(),
            kick_edges: Vec::new(),
            bindings: config.controls.clone(),
            clock: FrameClock::new(),
            camera: Camera::new(&config.camera),
            host,
            surface,
            loader,
            listeners,
            disposed: false,
        };
        session.on_resize();
        tracing::info!("Game session started");
        session
    }

    /// Auto-repeat never starts a kick, even for a key the session does not
    /// think is held.
    pub fn on_key_down(&mut self, code: &str, repeat: bool) {
        if self.disposed {
            return;
        }
        let kick = self.bindings.is_kick(code);
        if repeat && (kick || self.input.is_key_down(code)) {
            return;
        }
        if self.input.on_key_down(code) && kick {
            self.kick_edges.push(KickEdge::Press);
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        if self.disposed {
            return;
        }
        self.input.on_key_up(code);
        if self.bindings.is_kick(code) {
            self.kick_edges.push(KickEdge::Release);
        }
    }

    /// Run one frame at host time `now` (seconds). `None` once disposed.
    pub fn frame(&mut self, now: f64) -> Option<FrameReport> {
        if self.disposed {
            return None;
        }
        let time = self.clock.tick(now);
        let input = MatchInput {
            direction: self.bindings.movement_direction(&self.input),
            kick_edges: std::mem::take(&mut self.kick_edges),
        };
        let events = self.soccer.update(&time, &input);
        for event in &events {
            if let MatchEvent::KickMissed { distance } = event {
                tracing::debug!(distance, "Kick released out of reach");
            }
        }

        if let Some(result) = self.loader.poll() {
            self.soccer.finish_ball_load(result);
        }
        self.input.end_frame();

        Some(FrameReport {
            time,
            events,
            snapshot: self.soccer.snapshot(),
        })
    }

    /// Fit camera and render target to the container. Returns false if there
    /// is no container (or it has no area) and nothing changed.
    pub fn on_resize(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let Some((width, height)) = self.surface.container_size() else {
            return false;
        };
        if !self.camera.set_aspect(width, height) {
            return false;
        }
        self.surface.set_size(width, height);
        true
    }

    /// Unregister every listener and release the surface. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for id in self.listeners.drain(..) {
            if !self.host.remove_listener(id) {
                tracing::warn!(?id, "Listener was already removed by the host");
            }
        }
        self.surface.release();
        self.input.clear();
        self.kick_edges.clear();
        self.disposed = true;
        tracing::info!("Game session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn soccer(&self) -> &SoccerMatch {
        &self.soccer
    }

    pub fn soccer_mut(&mut self) -> &mut SoccerMatch {
        &mut self.soccer
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use kickabout_soccer::asset::{AssetError, ModelData};
    use kickabout_soccer::field::Side;

    use super::*;
    use crate::host::RecordingHost;
    use crate::surface::HeadlessSurface;

    const DT: f64 = 1.0 / 60.0;

    /// Completes the load after a fixed number of polls.
    struct DelayedLoader {
        polls_left: u32,
        result: Option<Result<ModelData, AssetError>>,
        started: Option<String>,
    }

    impl DelayedLoader {
        fn ok_after(polls: u32) -> Self {
            let model = ModelData::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", 0.2).unwrap();
            Self {
                polls_left: polls,
                result: Some(Ok(model)),
                started: None,
            }
        }

        fn failing() -> Self {
            Self {
                polls_left: 0,
                result: Some(Err(AssetError::Empty)),
                started: None,
            }
        }
    }

    impl ModelLoader for DelayedLoader {
        fn start(&mut self, path: &str, _scale: f32) {
            self.started = Some(path.to_string());
        }

        fn poll(&mut self) -> Option<Result<ModelData, AssetError>> {
            if self.polls_left > 0 {
                self.polls_left -= 1;
                return None;
            }
            self.result.take()
        }
    }

    type TestSession = GameSession<RecordingHost, HeadlessSurface, DelayedLoader>;

    fn session_with(loader: DelayedLoader) -> TestSession {
        GameSession::new(
            &SessionConfig::default(),
            SoccerConfig::default(),
            RecordingHost::new(),
            HeadlessSurface::new(Some((800, 600))),
            loader,
        )
    }

    fn session() -> TestSession {
        session_with(DelayedLoader::ok_after(0))
    }

    /// Run frames until `frames` have elapsed, starting at `*now`.
    fn run(s: &mut TestSession, now: &mut f64, frames: u32) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            if let Some(report) = s.frame(*now) {
                events.extend(report.events);
            }
            *now += DT;
        }
        events
    }

    #[test]
    fn construction_registers_listeners_and_sizes_surface() {
        let s = session();
        assert_eq!(s.host().active().len(), 3);
        assert!(s.host().is_listening(ListenerKind::KeyDown));
        assert!(s.host().is_listening(ListenerKind::KeyUp));
        assert!(s.host().is_listening(ListenerKind::Resize));
        assert_eq!(s.surface().size(), (800, 600));
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(s.loader.started.as_deref(), Some("assets/ball.obj"));
    }

    #[test]
    fn model_arrives_on_a_later_frame_and_places_ball() {
        let mut s = session_with(DelayedLoader::ok_after(2));
        let mut now = 0.0;
        run(&mut s, &mut now, 2);
        assert!(!s.soccer().ball().is_loaded());
        assert_eq!(s.soccer().ball().position(), Vec3::ZERO);
        run(&mut s, &mut now, 1);
        assert!(s.soccer().ball().is_loaded());
        assert_eq!(s.soccer().ball().position(), Vec3::new(0.0, 0.2, 0.0));
    }

    #[test]
    fn failed_model_keeps_session_running() {
        let mut s = session_with(DelayedLoader::failing());
        let mut now = 0.0;
        run(&mut s, &mut now, 3);
        assert!(!s.soccer().ball().is_loaded());
        assert!(s.frame(now).is_some());
    }

    #[test]
    fn held_key_moves_player() {
        let mut s = session();
        let mut now = 0.0;
        s.on_key_down("KeyD", false);
        run(&mut s, &mut now, 30);
        assert!(s.soccer().player().position().x > -5.0);

        let x = s.soccer().player().position().x;
        s.on_key_up("KeyD");
        s.on_key_down("ArrowUp", false);
        run(&mut s, &mut now, 30);
        assert!(s.soccer().player().position().z < 0.0);
        assert!(s.soccer().player().position().x >= x);
    }

    #[test]
    fn space_press_and_release_kicks_ball_in_range() {
        let mut s = session();
        let mut now = 0.0;
        run(&mut s, &mut now, 1);
        s.soccer_mut().player_mut().set_position(-1.0, 0.0);

        s.on_key_down("Space", false);
        run(&mut s, &mut now, 30);
        s.on_key_up("Space");
        let events = run(&mut s, &mut now, 1);

        match events.as_slice() {
            [MatchEvent::Kicked { force }] => assert!(*force > 3.0 && *force <= 15.0),
            other => panic!("unexpected events: {other:?}"),
        }
        assert!(s.soccer().ball().velocity().x > 0.0);
    }

    #[test]
    fn auto_repeat_does_not_restart_charge() {
        let mut s = session();
        let mut now = 0.0;
        run(&mut s, &mut now, 1);
        s.soccer_mut().player_mut().set_position(-1.0, 0.0);

        s.on_key_down("Space", false);
        run(&mut s, &mut now, 1);
        let started = s.soccer().player().kick_state();
        for _ in 0..10 {
            s.on_key_down("Space", true);
            run(&mut s, &mut now, 1);
        }
        assert_eq!(s.soccer().player().kick_state(), started);
    }

    #[test]
    fn release_and_repress_within_a_frame_keeps_new_charge() {
        let mut s = session();
        let mut now = 0.0;
        run(&mut s, &mut now, 1);
        s.soccer_mut().player_mut().set_position(-1.0, 0.0);

        s.on_key_down("Space", false);
        run(&mut s, &mut now, 1);
        s.on_key_up("Space");
        s.on_key_down("Space", false);
        let events = run(&mut s, &mut now, 1);

        assert!(matches!(events.as_slice(), [MatchEvent::Kicked { .. }]));
        assert!(s.soccer().player().is_charging());
        assert!(s.input().is_key_down("Space"));
    }

    #[test]
    fn repeat_for_unheld_kick_key_does_not_charge() {
        let mut s = session();
        let mut now = 0.0;
        s.on_key_down("Space", true);
        run(&mut s, &mut now, 1);
        assert!(!s.soccer().player().is_charging());
        assert!(!s.input().is_key_down("Space"));
    }

    #[test]
    fn repeat_for_unheld_movement_key_still_moves() {
        let mut s = session();
        let mut now = 0.0;
        s.on_key_down("KeyD", true);
        run(&mut s, &mut now, 10);
        assert!(s.soccer().player().position().x > -5.0);
    }

    #[test]
    fn kick_far_from_ball_misses() {
        let mut s = session();
        let mut now = 0.0;
        s.on_key_down("Space", false);
        run(&mut s, &mut now, 1);
        s.on_key_up("Space");
        let events = run(&mut s, &mut now, 1);
        assert!(matches!(events.as_slice(), [MatchEvent::KickMissed { .. }]));
    }

    #[test]
    fn shot_into_goal_is_reported() {
        let mut s = session();
        let mut now = 0.0;
        run(&mut s, &mut now, 1);
        s.soccer_mut().ball_mut().set_position(12.0, 0.2, 0.0);
        s.soccer_mut().player_mut().set_position(11.0, 0.0);

        s.on_key_down("Space", false);
        s.on_key_up("Space");
        let events = run(&mut s, &mut now, 1);
        assert!(events.contains(&MatchEvent::Goal {
            goal: Side::Right,
            scorer: Side::Left,
        }));
        assert_eq!(s.soccer().scoreboard().goals(Side::Left), 1);
    }

    #[test]
    fn resize_tracks_container() {
        let mut s = session();
        s.surface_mut().set_container(Some((1000, 500)));
        assert!(s.on_resize());
        assert_eq!(s.surface().size(), (1000, 500));
        assert!((s.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn resize_without_container_is_noop() {
        let mut s = session();
        let before = s.camera().clone();
        let resizes = s.surface().resize_count();
        s.surface_mut().set_container(None);
        assert!(!s.on_resize());
        assert_eq!(s.camera(), &before);
        assert_eq!(s.surface().resize_count(), resizes);
    }

    #[test]
    fn resize_with_zero_height_is_noop() {
        let mut s = session();
        s.surface_mut().set_container(Some((800, 0)));
        assert!(!s.on_resize());
        assert_eq!(s.surface().size(), (800, 600));
    }

    #[test]
    fn dispose_unregisters_every_listener_once() {
        let mut s = session();
        let registered: Vec<ListenerId> = s.host().active().iter().map(|(id, _)| *id).collect();
        s.dispose();
        assert!(s.is_disposed());
        assert!(s.host().active().is_empty());
        assert_eq!(s.host().removed(), registered.as_slice());
        assert!(s.surface().is_released());

        s.dispose();
        assert_eq!(s.host().removed().len(), 3);
    }

    #[test]
    fn disposed_session_ignores_everything() {
        let mut s = session();
        s.dispose();
        s.on_key_down("KeyD", false);
        assert!(!s.input().is_key_down("KeyD"));
        assert!(s.frame(1.0).is_none());
        assert!(!s.on_resize());
    }
}
