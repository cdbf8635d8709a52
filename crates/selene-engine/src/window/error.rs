/// Failure to bring up the host window.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Create(#[from] winit::error::OsError),

    #[error("platform never delivered a resumed event")]
    NotResumed,

    #[error("GPU initialization failed: {0:#}")]
    Gpu(anyhow::Error),
}
