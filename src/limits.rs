//! Resource limits applied while parsing untrusted filter text.

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default maximum number of comparisons and bare literals.
pub const DEFAULT_MAX_TERMS: usize = 1024;

/// Default maximum input length in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 8 * 1024;

/// Ceiling used by [`Limits::unbounded`]; recursion past this risks the stack.
pub const HARD_MAX_DEPTH: usize = 256;

/// Bounds on how much work a single parse may do.
///
/// Depth counts every recursive step of the parser: a parenthesised group,
/// a `!`, and each level of array or object literal. Flat `&`/`|` chains are
/// parsed without recursion and bounded by `max_terms` instead, which also
/// bounds the height of the resulting tree.
///
/// # Examples
///
/// ```
/// use where_lang::Limits;
///
/// let limits = Limits::default().with_max_depth(8).with_max_input_len(256);
/// assert!(where_lang::parse_with_limits("a=1", &limits).is_ok());
/// assert!(where_lang::parse_with_limits("[[[[[[[[[1]]]]]]]]]", &limits).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: usize,
    pub max_terms: usize,
    pub max_input_len: usize,
}

impl Limits {
    /// No length or term limit and the largest depth the parser allows.
    pub fn unbounded() -> Self {
        Limits {
            max_depth: HARD_MAX_DEPTH,
            max_terms: usize::MAX,
            max_input_len: usize::MAX,
        }
    }

    /// Depths above [`HARD_MAX_DEPTH`] are clamped.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(HARD_MAX_DEPTH);
        self
    }

    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: DEFAULT_MAX_DEPTH,
            max_terms: DEFAULT_MAX_TERMS,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_clamped() {
        let limits = Limits::default().with_max_depth(1_000_000);
        assert_eq!(limits.max_depth, HARD_MAX_DEPTH);
    }

    #[test]
    fn unbounded_has_no_length_limit() {
        assert_eq!(Limits::unbounded().max_input_len, usize::MAX);
    }
}
