//! Line-indexed, read-only view over a script.

use super::patterns::strip_comment;
use std::borrow::Cow;

/// Continuation lines gathered for one statement at most.
const MAX_CONTINUATION: usize = 32;

/// The script being analysed. Resolution only ever reads from it.
#[derive(Debug, Clone)]
pub struct ScriptSource<'a> {
    lines: Vec<&'a str>,
}

impl<'a> ScriptSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    pub fn line(&self, index: u32) -> Option<&'a str> {
        self.lines.get(index as usize).copied()
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Line indices strictly above `line`, nearest first.
    pub fn lines_above(&self, line: u32) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        let end = line.min(self.line_count());
        (0..end).rev().map(move |idx| (idx, self.lines[idx as usize]))
    }

    /// The statement starting at `line`, joined with the following lines
    /// while its parentheses stay open. Comments are dropped from joined lines.
    pub fn logical_line(&self, line: u32) -> Cow<'a, str> {
        let Some(first) = self.line(line) else {
            return Cow::Borrowed("");
        };
        let mut open = paren_balance(first);
        if open <= 0 {
            return Cow::Borrowed(first);
        }

        let mut joined = strip_comment(first).trim_end().to_string();
        let rest = self.lines.iter().skip(line as usize + 1).take(MAX_CONTINUATION);
        for next in rest {
            let code = strip_comment(next);
            joined.push(' ');
            joined.push_str(code.trim());
            open += paren_balance(code);
            if open <= 0 {
                break;
            }
        }
        Cow::Owned(joined)
    }
}

fn paren_balance(line: &str) -> i32 {
    strip_comment(line).chars().fold(0, |acc, c| match c {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}
