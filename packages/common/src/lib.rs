pub mod error;
pub mod id;

pub use error::*;
pub use id::*;

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;
