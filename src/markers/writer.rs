use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::ConvertError;
use super::stats::Stats;
use super::types::OutputSet;

/// Prefix turning each stats line into a config comment
const COMMENT_PREFIX: &str = "#   ";

const INDENT: &[u8] = b"    ";

/// Pretty-print with a four space indent
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ConvertError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ConvertError::Internal(e.to_string()))
}

/// `"marker-sets": {...}` followed by a newline
pub fn format_marker_sets(sets: &IndexMap<String, OutputSet>) -> Result<String, ConvertError> {
    Ok(format!("\"marker-sets\": {}\n", to_pretty_json(sets)?))
}

/// The stats report as a block of comment lines
pub fn format_stats(stats: &Stats) -> Result<String, ConvertError> {
    let text = format!("\"conversion-result\": {}", to_pretty_json(stats)?);
    let commented: Vec<String> = text
        .lines()
        .map(|line| format!("{}{}", COMMENT_PREFIX, line))
        .collect();
    Ok(commented.join("\n"))
}

/// Full output text: marker sets, a blank line, then the stats comment block
pub fn render_output(
    sets: &IndexMap<String, OutputSet>,
    stats: &Stats,
) -> Result<String, ConvertError> {
    Ok(format!(
        "{}\n{}\n",
        format_marker_sets(sets)?,
        format_stats(stats)?
    ))
}
