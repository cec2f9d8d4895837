pub mod camera;
pub mod config;
pub mod host;
pub mod loader;
pub mod session;
pub mod surface;

pub use camera::Camera;
pub use config::SessionConfig;
pub use host::{HostEvents, ListenerId, ListenerKind, RecordingHost};
pub use loader::{FsModelLoader, ModelLoader};
pub use session::{FrameReport, GameSession};
pub use surface::{HeadlessSurface, RenderSurface};
