use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::Vec3;
use obj::{Obj, ObjError, Position};

/// Geometry summary of a loaded model, already scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<Vec3>,
    pub face_count: usize,
    pub scale: f32,
}

impl ModelData {
    /// Parse OBJ source held in memory.
    pub fn parse_obj(source: &str, scale: f32) -> Result<Self, AssetError> {
        Self::read(source.as_bytes(), scale)
    }

    fn read(input: impl BufRead, scale: f32) -> Result<Self, AssetError> {
        let model: Obj<Position, u32> = obj::load_obj(input).map_err(AssetError::from)?;
        if model.vertices.is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(Self {
            vertices: model
                .vertices
                .iter()
                .map(|v| Vec3::from_array(v.position) * scale)
                .collect(),
            face_count: model.indices.len() / 3,
            scale,
        })
    }
}

/// Read and parse an OBJ file from disk.
pub fn load_obj(path: &Path, scale: f32) -> Result<ModelData, AssetError> {
    let file = File::open(path).map_err(|e| AssetError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    ModelData::read(BufReader::new(file), scale).map_err(|e| match e {
        AssetError::Io { message, .. } => AssetError::Io {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    Io { path: String, message: String },
    Parse(String),
    Empty,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse(message) => write!(f, "invalid OBJ data: {message}"),
            Self::Empty => write!(f, "model has no vertices"),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<ObjError> for AssetError {
    fn from(e: ObjError) -> Self {
        match e {
            ObjError::Io(io) => AssetError::Io {
                path: String::new(),
                message: io.to_string(),
            },
            other => AssetError::Parse(other.to_string()),
        }
    }
}

/// Where the ball's model is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(ModelData),
    Failed(AssetError),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}
