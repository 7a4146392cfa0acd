//! Fragment boundary computation.

use crate::domain::model::{Directive, Fragment};

/// Slice `source` into one trimmed fragment per directive.
///
/// A fragment runs from the end of its marker to the start of the next marker, or to the end of
/// the input for the last directive. Directives must be ordered and non-overlapping, which every
/// [`MarkerScanner`](crate::app::scan::MarkerScanner) guarantees.
pub fn extract_fragments<'a>(source: &'a str, directives: &'a [Directive]) -> Vec<Fragment<'a>> {
    directives
        .iter()
        .enumerate()
        .map(|(index, directive)| {
            let end = directives
                .get(index + 1)
                .map_or(source.len(), |next| next.start_offset);
            debug_assert!(directive.end_offset <= end, "directives overlap");
            Fragment {
                path: &directive.path,
                contents: source[directive.end_offset..end].trim(),
            }
        })
        .collect()
}
