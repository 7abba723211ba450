use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("render surface unavailable: width={width}, height={height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("sales record not found: id={id}")]
    RecordNotFound { id: u64 },

    #[error("data service transport failure: {0}")]
    Transport(String),
}
