use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("a degree {degree} polynomial needs {expected} coefficients, got {found}")]
    CoefficientCount {
        degree: usize,
        expected: usize,
        found: usize,
    },

    #[error("leading coefficient must not be 0")]
    ZeroLeadingCoefficient,

    #[error("cannot enumerate 2^{} Littlewood polynomials of degree {degree}", .degree + 1)]
    DegreeTooLarge { degree: usize },

    #[error("index {index} is outside a family of {len} polynomials")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("failed to create device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("field shader failed to compile: {0}")]
    ShaderCompilation(String),

    #[error("{count} roots do not fit in a u32 root count")]
    TooManyRoots { count: usize },

    #[error("output surface needs {bytes} bytes, device allows {limit}")]
    SurfaceTooLarge { bytes: u64, limit: u64 },

    #[error("failed to map readback buffer")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("device dropped the readback request")]
    ReadbackDropped,

    #[error("expected {expected} pixels, got {found}")]
    PixelCount { expected: usize, found: usize },

    #[error("raster is {found:?}, expected {expected:?}")]
    RasterSize {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("failed to build worker thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode output image")]
    Image(#[from] image::ImageError),
}
