use thiserror::Error;

/// Problems loading or editing a scene. None of these can arise inside a render.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("A sphere named '{0}' already exists")]
    DuplicateName(String),

    #[error("No sphere named '{0}'")]
    UnknownSphere(String),

    #[error("Sphere '{name}' is invalid: {reason}")]
    InvalidSphere { name: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Render cancelled after {rows_done} rows")]
    Cancelled { rows_done: usize },
}
