use std::path::PathBuf;

/// Failure reported by a script engine.
///
/// Messages carry the engine's own text (including any traceback) so they
/// can be logged verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script engine init failed: {0}")]
    Init(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Runtime(String),
}
