//! Data Transfer Objects (DTOs)
//!
//! Display-ready values for the presentation layer.

mod report_dto;

pub use report_dto::{PositionReportDto, format_amount, format_percent, format_ratio};
