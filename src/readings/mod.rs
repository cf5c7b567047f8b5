pub mod export;
pub mod payload;
pub mod service;

pub use service::{ReadingService, ServiceError};
