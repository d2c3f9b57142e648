use regex::{Captures, Regex};

/// An ordered list of anchored regular expressions sharing a common vocabulary of named groups
/// (`year`, `month`, `day`, `ordinal`, `hour`, `minute`, `second`, `tzinfo`). Not every pattern
/// defines every group.
#[derive(Debug)]
pub(crate) struct PatternGroup {
    /// Pairs of (label, compiled pattern). The label is only used for diagnostics.
    patterns: Vec<(&'static str, Regex)>,
}

impl PatternGroup {
    /// Compiles each `(label, pattern)` pair. Patterns are compiled in verbose, ASCII-only mode
    /// and anchored at both ends.
    ///
    /// Panics if a pattern is malformed; the patterns are constants of this crate.
    pub(crate) fn new(patterns: &[(&'static str, &str)]) -> Self {
        let patterns = patterns
            .iter()
            .map(|(label, pattern)| {
                let anchored = format!(r"(?x-u)\A(?:{pattern})\z");
                let rx = Regex::new(&anchored)
                    .unwrap_or_else(|e| panic!("invalid {label} pattern: {e}"));
                (*label, rx)
            })
            .collect();
        Self { patterns }
    }

    /// Tries each pattern in order and returns the first match.
    pub(crate) fn find<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        self.patterns.iter().find_map(|&(label, ref rx)| {
            rx.captures(text).map(|captures| {
                tracing::trace!(pattern = label, text, "pattern matched");
                PatternMatch { label, captures }
            })
        })
    }
}

/// A successful match from a [PatternGroup].
#[derive(Debug)]
pub(crate) struct PatternMatch<'t> {
    label: &'static str,
    captures: Captures<'t>,
}

impl<'t> PatternMatch<'t> {
    /// The label of the pattern that matched.
    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the text captured by the named group, or `None` if the group did not participate
    /// in the match or is not defined by the pattern that matched.
    pub(crate) fn group(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Parses the named group as a number. A `-` placeholder reads the same as an absent group.
    pub(crate) fn number(&self, name: &str) -> Option<i32> {
        self.group(name)
            .filter(|g| *g != "-")
            .and_then(|g| g.parse().ok())
    }
}
