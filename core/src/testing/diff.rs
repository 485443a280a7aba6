use std::fmt;

use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    Both(&'a str),
    /// Expected, but missing from the actual output.
    Missing(&'a str),
    /// Present in the actual output only.
    Unexpected(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff<'a> {
    lines: Vec<DiffLine<'a>>,
}

/// Line-oriented diff from `expected` to `actual`.
pub fn line_diff<'a>(expected: &'a str, actual: &'a str) -> LineDiff<'a> {
    let old: Vec<&str> = expected.lines().collect();
    let new: Vec<&str> = actual.lines().collect();

    let diff = TextDiff::from_slices(&old, &new);
    let lines = diff
        .ops()
        .iter()
        .flat_map(|op| op.iter_changes(&old, &new))
        .map(|change| match change.tag() {
            ChangeTag::Equal => DiffLine::Both(change.value()),
            ChangeTag::Delete => DiffLine::Missing(change.value()),
            ChangeTag::Insert => DiffLine::Unexpected(change.value()),
        })
        .collect();

    LineDiff { lines }
}

impl<'a> LineDiff<'a> {
    pub fn lines(&self) -> &[DiffLine<'a>] {
        &self.lines
    }
}

impl fmt::Display for DiffLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiffLine::Both(s) => write!(f, "  {}", s),
            DiffLine::Missing(s) => write!(f, "- {}", s),
            DiffLine::Unexpected(s) => write!(f, "+ {}", s),
        }
    }
}

impl fmt::Display for LineDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use DiffLine::*;

    #[test]
    fn identical() {
        let d = line_diff("a\nb", "a\nb");
        assert_eq!(d.lines(), &[Both("a"), Both("b")]);
        assert_eq!(d.to_string(), "  a\n  b");
    }

    #[test]
    fn changed_middle_line() {
        let d = line_diff("foo\nbar\nbaz", "foo\nBAR\nbaz");
        assert_eq!(
            d.lines(),
            &[Both("foo"), Missing("bar"), Unexpected("BAR"), Both("baz")]
        );
        assert_eq!(d.to_string(), "  foo\n- bar\n+ BAR\n  baz");
    }

    #[test]
    fn last_line_without_newline() {
        let d = line_diff("x\ny", "x\ny\n");
        assert_eq!(d.lines(), &[Both("x"), Both("y")]);
    }

    #[test]
    fn long_outputs_are_still_diffed() {
        let expected = (0..3000).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let actual = expected.replace("\n1500\n", "\n1500!\n");
        let d = line_diff(&expected, &actual);
        assert_eq!(d.lines().len(), 3001);
        assert_eq!(d.lines()[1500], Missing("1500"));
        assert_eq!(d.lines()[1501], Unexpected("1500!"));
        assert!(d.lines()[..1500].iter().all(|l| matches!(l, Both(_))));
    }

    #[test]
    fn missing_and_extra_lines() {
        assert_eq!(line_diff("a\nb\nc", "a\nc").lines(), &[Both("a"), Missing("b"), Both("c")]);
        assert_eq!(line_diff("x", "x\ny").lines(), &[Both("x"), Unexpected("y")]);
        assert_eq!(line_diff("x", "").lines(), &[Missing("x")]);
        assert_eq!(line_diff("", "y").lines(), &[Unexpected("y")]);
    }
}
