//! Parsing for the MVCC benchmark console log.

pub mod field;
pub mod parse;
pub mod record;

pub use parse::parse_log_file;
pub use record::{ConfigGroup, ConfigHeader, ParsedLog, ResultRecord};
