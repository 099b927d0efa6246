// src/sheets/mod.rs
pub mod client;
pub mod models;

pub use client::{SheetsClient, SHEETS_TOKEN_ENV};
pub use models::{SheetTarget, UpdateValuesResponse, ValueRange};
