// src/process/mod.rs
pub mod date_parser;
pub mod sheet;
pub mod status;

pub use date_parser::{format_date_time, CheckpointTime, FallbackReason};
pub use sheet::{MatchedRow, SheetTable};
pub use status::Tag;
