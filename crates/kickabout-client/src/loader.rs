use std::path::PathBuf;

use kickabout_soccer::asset::{AssetError, ModelData, load_obj};

/// Asynchronous model loading as seen from the frame loop: start once, then
/// poll each frame until a result comes back.
pub trait ModelLoader {
    fn start(&mut self, path: &str, scale: f32);
    /// The finished result, returned at most once per `start`.
    fn poll(&mut self) -> Option<Result<ModelData, AssetError>>;
}

/// Reads OBJ files from disk. The read happens on the first poll after
/// `start`, so the result still arrives on a later frame than the request.
#[derive(Debug, Default)]
pub struct FsModelLoader {
    pending: Option<(PathBuf, f32)>,
}

impl FsModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl ModelLoader for FsModelLoader {
    fn start(&mut self, path: &str, scale: f32) {
        tracing::debug!(path, "Loading model");
        self.pending = Some((PathBuf::from(path), scale));
    }

    fn poll(&mut self) -> Option<Result<ModelData, AssetError>> {
        let (path, scale) = self.pending.take()?;
        Some(load_obj(&path, scale))
    }
}
