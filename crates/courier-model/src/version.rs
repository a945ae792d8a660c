use std::cmp::Ordering;

use crate::error::{ModelError, ModelResult};

/// Compares two dotted numeric versions segment by segment.
///
/// A missing segment counts as zero, so `"7"` and `"7.0.0"` compare equal.
/// A non-numeric segment is an error naming the offending version string.
pub fn compare_versions(a: &str, b: &str) -> ModelResult<Ordering> {
    let left = parse_segments(a)?;
    let right = parse_segments(b)?;

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);

        match l.cmp(&r) {
            Ordering::Equal => continue,
            decided => return Ok(decided),
        }
    }

    Ok(Ordering::Equal)
}

fn parse_segments(version: &str) -> ModelResult<Vec<u64>> {
    version
        .trim()
        .split('.')
        .map(|segment| {
            segment
                .parse::<u64>()
                .map_err(|_| ModelError::InvalidVersion(version.to_string()))
        })
        .collect()
}
