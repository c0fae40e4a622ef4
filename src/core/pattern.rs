//! Shell-style glob matching for directory entries
//!
//! Patterns apply to a single path segment (one directory entry name) and support:
//! - `*` - Matches any run of characters, including none
//! - `?` - Matches exactly one character
//! - `[0-9]`, `[abc]` - Matches one character from the class
//! - `[!0-9]`, `[^abc]` - Matches one character outside the class
//!
//! As with a shell glob, wildcards never match a leading `.`.

use regex::Regex;

/// A compiled single-segment glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob pattern
    ///
    /// Unterminated `[` classes are treated as a literal `[`.
    ///
    /// # Examples
    /// ```
    /// use cvelist::GlobPattern;
    ///
    /// let years = GlobPattern::new("[1-2][0-9][0-9][0-9]");
    /// assert!(years.matches("2021"));
    /// assert!(!years.matches("3000"));
    ///
    /// let ranges = GlobPattern::new("*xxx");
    /// assert!(ranges.matches("20xxx"));
    /// assert!(!ranges.matches(".xxx"));
    /// ```
    pub fn new(pattern: &str) -> Self {
        let regex = Regex::new(&Self::translate(pattern))
            .unwrap_or_else(|_| Regex::new(&format!("^{}$", regex::escape(pattern))).unwrap());

        Self {
            source: pattern.to_string(),
            regex,
        }
    }

    /// Check whether an entry name matches the pattern
    pub fn matches(&self, name: &str) -> bool {
        if name.starts_with('.') && !self.source.starts_with('.') {
            return false;
        }
        self.regex.is_match(name)
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Translate glob syntax into an anchored regular expression
    fn translate(pattern: &str) -> String {
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = String::with_capacity(pattern.len() * 2 + 2);
        out.push('^');

        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => out.push_str(".*"),
                '?' => out.push('.'),
                '[' => match Self::class_end(&chars, i) {
                    Some(end) => {
                        out.push('[');
                        let mut j = i + 1;
                        if chars[j] == '!' || chars[j] == '^' {
                            out.push('^');
                            j += 1;
                        }
                        Self::translate_class(&chars[j..end], &mut out);
                        out.push(']');
                        i = end;
                    }
                    None => out.push_str(r"\["),
                },
                c => out.push_str(&regex::escape(&c.to_string())),
            }
            i += 1;
        }

        out.push('$');
        out
    }

    /// Translate the members of a class, without its brackets
    ///
    /// Only `x-y` between two non-dash characters is a range; any other `-`,
    /// and the regex set operators `&&`, `~~` and `--`, match literally.
    fn translate_class(members: &[char], out: &mut String) {
        let mut k = 0;
        while k < members.len() {
            let c = members[k];
            let is_range = c != '-'
                && members.get(k + 1) == Some(&'-')
                && members.get(k + 2).is_some_and(|&end| end != '-');
            if is_range {
                Self::push_class_char(c, out);
                out.push('-');
                Self::push_class_char(members[k + 2], out);
                k += 3;
            } else {
                Self::push_class_char(c, out);
                k += 1;
            }
        }
    }

    fn push_class_char(c: char, out: &mut String) {
        if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }

    /// Index of the `]` closing the class opened at `start`, if any
    fn class_end(chars: &[char], start: usize) -> Option<usize> {
        let mut j = start + 1;
        if j < chars.len() && (chars[j] == '!' || chars[j] == '^') {
            j += 1;
        }
        // A `]` directly after the opening bracket is part of the class
        if j < chars.len() && chars[j] == ']' {
            j += 1;
        }
        while j < chars.len() {
            if chars[j] == ']' {
                return Some(j);
            }
            j += 1;
        }
        None
    }
}
