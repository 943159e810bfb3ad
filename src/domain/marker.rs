//! Task marker detection
//!
//! A line is a task line when it contains a marker followed by a colon,
//! anywhere in the line, case-insensitively. `"// TODO: later"` matches;
//! `"this is a todo item"` does not.

/// Markers recognized out of the box
const DEFAULT_MARKERS: [&str; 4] = ["todo", "hack", "undone", "unresolvedmergeconflict"];

/// The set of task markers to look for
///
/// Markers are stored lowercase with the trailing colon appended, so a
/// line lookup is a plain substring scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    patterns: Vec<String>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

impl MarkerSet {
    /// Creates a marker set from the given markers
    ///
    /// Markers are normalized to lowercase; a trailing colon is accepted
    /// and stripped. Empty and duplicate markers are dropped.
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut set = Self {
            patterns: Vec::new(),
        };
        for marker in markers {
            set.insert(&marker.into());
        }
        set
    }

    /// Returns this set extended with additional markers
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for marker in extra {
            self.insert(&marker.into());
        }
        self
    }

    fn insert(&mut self, marker: &str) {
        let normalized = marker.trim().trim_end_matches(':').to_lowercase();
        if normalized.is_empty() {
            return;
        }
        let pattern = format!("{}:", normalized);
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Returns the number of markers in the set
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set holds no markers
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if the line contains any marker followed by a colon
    ///
    /// The scan is case-insensitive with locale-independent folding.
    pub fn matches_line(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        let text = line.to_lowercase();
        self.patterns.iter().any(|pattern| text.contains(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_markers_match() {
        let markers = MarkerSet::default();
        assert!(markers.matches_line("// todo: fix this later"));
        assert!(markers.matches_line("# hack: workaround"));
        assert!(markers.matches_line("-- undone: revisit"));
        assert!(markers.matches_line("/* unresolvedmergeconflict: ours vs theirs */"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let markers = MarkerSet::default();
        assert!(markers.matches_line("// TODO: fix this later"));
        assert!(markers.matches_line("// Todo: fix this later"));
        assert!(markers.matches_line("// tOdO: fix this later"));
        assert!(markers.matches_line("int x = 1; // HACK: workaround"));
    }

    #[test]
    fn marker_requires_trailing_colon() {
        let markers = MarkerSet::default();
        assert!(!markers.matches_line("this is a todo item"));
        assert!(!markers.matches_line("// just a note"));
        assert!(!markers.matches_line("hackathon results"));
    }

    #[test]
    fn empty_line_does_not_match() {
        assert!(!MarkerSet::default().matches_line(""));
    }

    #[test]
    fn marker_matches_anywhere_in_line() {
        let markers = MarkerSet::default();
        assert!(markers.matches_line("let x = compute(); // todo: cache"));
        assert!(markers.matches_line("todo: at line start"));
    }

    #[test]
    fn extra_markers_extend_the_set() {
        let markers = MarkerSet::default().with_extra(["fixme", "XXX:"]);
        assert!(markers.matches_line("// FIXME: broken on windows"));
        assert!(markers.matches_line("// xxx: placeholder"));
        assert!(markers.matches_line("// todo: default set still applies"));
    }

    #[test]
    fn normalization_dedups_and_drops_empty() {
        let markers = MarkerSet::new(["todo", "TODO:", " todo ", "", ":"]);
        assert_eq!(markers.len(), 1);
    }

    proptest! {
        /// Any mixed-case rendering of a default marker followed by a
        /// colon matches, wherever it sits in the line.
        #[test]
        fn case_insensitivity_law(
            marker_idx in 0usize..4,
            flips in proptest::collection::vec(any::<bool>(), 24),
            prefix in "[a-z ()/*;=]{0,20}",
            suffix in "[a-z ()/*;=]{0,20}",
        ) {
            let marker = DEFAULT_MARKERS[marker_idx];
            let mixed: String = marker
                .chars()
                .zip(flips.iter().chain(std::iter::repeat(&false)))
                .map(|(c, flip)| if *flip { c.to_ascii_uppercase() } else { c })
                .collect();
            let line = format!("{}{}:{}", prefix, mixed, suffix);
            prop_assert!(MarkerSet::default().matches_line(&line));
        }
    }
}
