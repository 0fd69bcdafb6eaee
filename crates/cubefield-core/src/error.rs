use crate::shader::ShaderStage;
use thiserror::Error;

/// Every failure the scene can report.
///
/// Startup failures (`BackendUnavailable`, `ShaderCompile`, `ShaderLink`,
/// `IndexOverflow`, `InvalidConfig`) abort before the frame loop starts.
/// `ContextLost` halts a running loop. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("graphics backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    ShaderLink { log: String },

    #[error("graphics context lost: {0}")]
    ContextLost(String),

    #[error("grid of {cells} cells overflows 32-bit index addressing")]
    IndexOverflow { cells: u64 },

    #[error("invalid scene configuration: {0}")]
    InvalidConfig(String),
}
