//! Input normalization: comment stripping and blank line removal.

/// Marker that starts a comment running to the end of the line.
pub const COMMENT_MARKER: char = '#';

/// Strip comments and surrounding whitespace from each line, dropping lines
/// that end up empty. Order is preserved.
pub fn decomment<I, S>(lines: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().filter_map(|line| {
        let line = line.as_ref();
        let raw = match line.find(COMMENT_MARKER) {
            Some(idx) => &line[..idx],
            None => line,
        };
        let raw = raw.trim();
        (!raw.is_empty()).then(|| raw.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomment_strips_comments_and_blanks() {
        let input = "# header\n\n0;A;x  # first\n   \n2;B;y\n#only comment\n";
        let lines: Vec<String> = decomment(input.lines()).collect();
        assert_eq!(lines, vec!["0;A;x", "2;B;y"]);
    }

    #[test]
    fn test_decomment_trims_whitespace() {
        let lines: Vec<String> = decomment(["  1;A;x\t"]).collect();
        assert_eq!(lines, vec!["1;A;x"]);
    }

    #[test]
    fn test_decomment_everything_commented_is_empty() {
        let lines: Vec<String> = decomment(["# a", "   # b", ""]).collect();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_decomment_cuts_at_first_marker() {
        let lines: Vec<String> = decomment(["3;Issue #4;x"]).collect();
        assert_eq!(lines, vec!["3;Issue"]);
    }
}
