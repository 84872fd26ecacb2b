//! Output sinks: the HTML throughput plot and the JSON documents.

pub mod html;
pub mod json;

pub use html::render_html_report;
pub use json::{json_path_for, read_parsed_log, to_pretty_json, write_parsed_log};
