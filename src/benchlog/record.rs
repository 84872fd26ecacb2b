use serde::{Deserialize, Serialize};

/// Option values printed under a `mvcc bench` banner.
///
/// Values are kept as the digit text found in the log; consumers parse them.
/// Field order is the order the benchmark prints them and the order they are
/// serialized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigHeader {
    #[serde(rename = "#threads")]
    pub threads: String,
    #[serde(rename = "Initial Size")]
    pub initial_size: String,
    #[serde(rename = "Buckets")]
    pub buckets: String,
    /// Per-run wall time in milliseconds.
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Update Rate")]
    pub update_rate: String,
    #[serde(rename = "Range")]
    pub range: String,
}

/// Outcome values printed under a `#### total ####` banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Set Size")]
    pub set_size: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "#ops")]
    pub ops: String,
    #[serde(rename = "#read ops")]
    pub read_ops: String,
    #[serde(rename = "#update ops")]
    pub update_ops: String,
}

/// All records observed under one configuration, in log order.
///
/// `header` is `None` until the first configuration block has been seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigGroup {
    pub header: Option<ConfigHeader>,
    pub content: Vec<ResultRecord>,
}

/// Every group parsed from one log file, in order.
pub type ParsedLog = Vec<ConfigGroup>;
