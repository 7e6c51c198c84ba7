//! Pulling a JSON object out of free-form model output.
//!
//! Models wrap JSON in markdown fences or add a sentence before and after it.
//! Extraction removes fences, cuts from the first `{` to the last `}` and
//! parses strictly. Nothing is repaired.

use crate::error::GatewayError;
use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Remove code-fence markers. A marker counts only when it opens or closes a
/// line, so backticks quoted inside a JSON string value are left alone. A
/// language tag after an opening marker goes with it when the tag runs to the
/// end of the line.
pub fn strip_code_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(found) = raw[search..].find(FENCE) {
        let idx = search + found;
        let after = idx + FENCE.len();
        let line_start = raw[..idx].rfind('\n').map_or(0, |i| i + 1);
        let line_end = raw[after..].find('\n').map_or(raw.len(), |i| after + i);
        let opens_line = raw[line_start..idx].trim().is_empty();
        let closes_line = raw[after..line_end].trim().is_empty();

        if !opens_line && !closes_line {
            search = after;
            continue;
        }

        out.push_str(&raw[copied..idx]);
        let mut next = after;
        if opens_line {
            let tag = raw[after..line_end].trim_end_matches('\r');
            if is_language_tag(tag) {
                next += tag.len();
            }
        }
        copied = next;
        search = next;
    }
    out.push_str(&raw[copied..]);
    out
}

fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The substring spanning the first `{` through the last `}`.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Fence-strip, slice and deserialize a reply into `T`.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, GatewayError> {
    let cleaned = strip_code_fences(raw);
    let Some(object) = extract_json_object(&cleaned) else {
        return Err(GatewayError::malformed("reply contains no JSON object"));
    };
    serde_json::from_str(object)
        .map_err(|e| GatewayError::malformed(format!("reply JSON does not match the schema: {e}")))
}
