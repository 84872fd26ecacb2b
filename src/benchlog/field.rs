//! Fixed-shape field blocks that follow a marker line.
//!
//! A block is exactly N lines, one value per line, in a fixed order. The value
//! of a line is the first match of the block's value pattern; the rest of the
//! line (label, units, trailing rates) is ignored.

use anyhow::{anyhow, bail};
use regex::Regex;

/// Option lines following `#### mvcc bench ####`, in print order.
pub const OPTION_FIELDS: [&str; 6] = [
    "#threads",
    "Initial Size",
    "Buckets",
    "Duration",
    "Update Rate",
    "Range",
];

/// Outcome lines following `#### total ####`, in print order.
pub const OUTCOME_FIELDS: [&str; 5] = ["Set Size", "Duration", "#ops", "#read ops", "#update ops"];

/// Consume exactly `N` lines from `lines` and extract one value per field.
///
/// `lines` yields `(zero_based_line_index, line)`. Fails if the input ends
/// before all fields were read or if a line has no match for `pattern`.
pub fn read_block<'a, I, const N: usize>(
    lines: &mut I,
    block: &str,
    fields: [&str; N],
    pattern: &Regex,
) -> anyhow::Result<[String; N]>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut values: [String; N] = std::array::from_fn(|_| String::new());

    for (slot, field) in values.iter_mut().zip(fields) {
        let Some((lineno, line)) = lines.next() else {
            bail!(
                "truncated {} block: input ended before field {:?}",
                block,
                field
            );
        };

        *slot = pattern
            .find(line)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                anyhow!(
                    "malformed {} line {}: no value for {:?} in {:?}",
                    block,
                    lineno + 1,
                    field,
                    line
                )
            })?;
    }

    Ok(values)
}
