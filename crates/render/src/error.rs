use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a visual resource.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load image {path:?}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read font {path:?}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0:?} is not a usable TrueType font")]
    FontInvalid(PathBuf),
}

/// Failure to open or draw to the display.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("failed to request device")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to acquire frame")]
    Frame(#[from] wgpu::SurfaceError),
    #[error("frame is {got:?}, display expects {expected:?}")]
    FrameSize {
        expected: (u32, u32),
        got: (u32, u32),
    },
}
