use crate::span::Span;

/// Rebuild `source` with every occurrence replaced by `replacement`, copying
/// the text between occurrences untouched.
///
/// `occurrences` must be sorted by start offset, must not overlap, and must
/// lie on character boundaries of `source`. Spans produced by the occurrence
/// finder always do.
pub fn splice(source: &str, occurrences: &[Span], replacement: &str) -> String {
    let mut result = String::with_capacity(source.len() + occurrences.len() * replacement.len());
    let mut cursor = 0;

    for occurrence in occurrences {
        debug_assert!(
            cursor <= occurrence.start && occurrence.start <= occurrence.end && occurrence.end <= source.len(),
            "occurrence {occurrence:?} is out of order or out of bounds (cursor {cursor})"
        );
        result.push_str(&source[cursor..occurrence.start]);
        result.push_str(replacement);
        cursor = occurrence.end;
    }
    result.push_str(&source[cursor..]);

    result
}
