pub mod analysis;
pub mod config;
pub mod extraction;
pub mod workbook;
