// src/lib.rs
pub mod extractors;
pub mod nrega;
pub mod sheets;
pub mod storage;
pub mod utils;

pub use utils::AppError;
