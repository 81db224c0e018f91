mod error;
mod inner;
pub mod model;

pub use error::{Error, FailureKind};
pub use inner::{PostSource, API, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub use reqwest;
pub use serde_json;
