//! Version string ordering for duplicate jar detection.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

const SNAPSHOT: &str = "SNAPSHOT";
const RC_PREFIX: &str = "RC";

/// Version suffix naming a native platform, e.g. `natives-linux-amd64`
static PLATFORM_RE: OnceLock<Regex> = OnceLock::new();

fn platform_regex() -> &'static Regex {
    PLATFORM_RE.get_or_init(|| {
        Regex::new(r"^\S+-((?:linux|windows|macosx|android)-[A-Za-z0-9_]+)$").expect("valid regex")
    })
}

/// Platform classifier at the end of a version (`linux-amd64` in `2.3.2-natives-linux-amd64`)
pub fn library_platform(version: &str) -> Option<&str> {
    platform_regex()
        .captures(version)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Return whichever of two versions is the lower one.
///
/// Versions are compared segment by segment after splitting on `.` and `-`:
/// - a `SNAPSHOT` segment is lower than anything else,
/// - two `RC<n>` segments compare by `<n>`,
/// - a non-numeric segment is lower than a numeric one (pre-release),
/// - numeric segments compare as numbers, anything else as text.
///
/// When one version runs out of segments it is the lower one, unless the
/// longer version continues with an `RC` or `SNAPSHOT` segment. Equal
/// versions return `a`.
pub fn lowest_version<'v>(a: &'v str, b: &'v str) -> &'v str {
    let (mut longer, mut shorter) = (a, b);
    let mut long_parts: Vec<&str> = split_version(a);
    let mut short_parts: Vec<&str> = split_version(b);
    if short_parts.len() > long_parts.len() {
        std::mem::swap(&mut longer, &mut shorter);
        std::mem::swap(&mut long_parts, &mut short_parts);
    }

    for (i, &long_part) in long_parts.iter().enumerate() {
        let Some(&short_part) = short_parts.get(i) else {
            return if long_part == SNAPSHOT || long_part.starts_with(RC_PREFIX) {
                longer
            } else {
                shorter
            };
        };

        match (long_part == SNAPSHOT, short_part == SNAPSHOT) {
            (true, true) => continue,
            (true, false) => return longer,
            (false, true) => return shorter,
            (false, false) => {}
        }

        let (long_part, short_part) = match (
            long_part.strip_prefix(RC_PREFIX),
            short_part.strip_prefix(RC_PREFIX),
        ) {
            (Some(l), Some(s)) => (l, s),
            _ => (long_part, short_part),
        };

        let ordering = match (is_number(long_part), is_number(short_part)) {
            (true, false) => return shorter,
            (false, true) => return longer,
            (true, true) => compare_numbers(long_part, short_part),
            (false, false) => long_part.cmp(short_part),
        };
        match ordering {
            Ordering::Less => return longer,
            Ordering::Greater => return shorter,
            Ordering::Equal => {}
        }
    }

    longer
}

fn split_version(version: &str) -> Vec<&str> {
    version.split(['.', '-']).collect()
}

fn is_number(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit strings of any length numerically
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
