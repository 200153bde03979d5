//! Non-fatal failure taxonomy.
//!
//! None of these stop the program: the caller logs the error and carries on
//! with an invalid texture handle or a renderer that draws nothing. Fatal
//! setup failures (event loop, window, GPU device) use `anyhow` instead.

use std::fmt;
use std::path::PathBuf;

/// Shader stage a diagnostic refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VistaError {
    /// Image missing, unreadable or undecodable.
    ResourceLoad { path: PathBuf, reason: String },

    /// Shader source does not compile. `stage` is `None` when the failure is
    /// not attributable to one entry point (e.g. a syntax error).
    ShaderCompile {
        label: String,
        stage: Option<ShaderStage>,
        diagnostics: String,
    },

    /// Shader stages compile on their own but do not form a valid program.
    ShaderLink { label: String, diagnostics: String },
}

impl fmt::Display for VistaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VistaError::ResourceLoad { path, reason } => {
                write!(f, "failed to load texture {}: {reason}", path.display())
            }
            VistaError::ShaderCompile { label, stage: Some(stage), diagnostics } => {
                write!(f, "{label}: {stage} shader compilation failed\n{diagnostics}")
            }
            VistaError::ShaderCompile { label, stage: None, diagnostics } => {
                write!(f, "{label}: shader compilation failed\n{diagnostics}")
            }
            VistaError::ShaderLink { label, diagnostics } => {
                write!(f, "{label}: shader program linking failed\n{diagnostics}")
            }
        }
    }
}

impl std::error::Error for VistaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_load_message_names_the_path() {
        let err = VistaError::ResourceLoad {
            path: PathBuf::from("assets/sky.png"),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load texture assets/sky.png: No such file or directory"
        );
    }

    #[test]
    fn compile_message_names_the_stage() {
        let err = VistaError::ShaderCompile {
            label: "flat".into(),
            stage: Some(ShaderStage::Fragment),
            diagnostics: "missing entry point".into(),
        };
        assert!(err.to_string().starts_with("flat: fragment shader compilation failed"));
    }
}
