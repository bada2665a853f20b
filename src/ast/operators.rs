use std::fmt;

/// Comparison operators.
///
/// Each variant maps to exactly one source symbol. What a comparison means
/// against real data is up to the query builder consuming the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Equal (`=`)
    Eq,
    /// Not equal (`!=`)
    Ne,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Ge,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Le,
    /// Case-sensitive pattern match (`~`)
    Like,
    /// Case-insensitive pattern match (`~*`)
    ILike,
    /// Field's collection or text contains the value (`#`)
    Contains,
    /// Field's value is a member of the given collection (`@`)
    In,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 10] = [
        OperatorKind::Eq,
        OperatorKind::Ne,
        OperatorKind::Gt,
        OperatorKind::Ge,
        OperatorKind::Lt,
        OperatorKind::Le,
        OperatorKind::Like,
        OperatorKind::ILike,
        OperatorKind::Contains,
        OperatorKind::In,
    ];

    /// The symbol as written in filter text.
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Eq => "=",
            OperatorKind::Ne => "!=",
            OperatorKind::Gt => ">",
            OperatorKind::Ge => ">=",
            OperatorKind::Lt => "<",
            OperatorKind::Le => "<=",
            OperatorKind::Like => "~",
            OperatorKind::ILike => "~*",
            OperatorKind::Contains => "#",
            OperatorKind::In => "@",
        }
    }

    /// Stable lowercase name, used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Eq => "eq",
            OperatorKind::Ne => "ne",
            OperatorKind::Gt => "gt",
            OperatorKind::Ge => "ge",
            OperatorKind::Lt => "lt",
            OperatorKind::Le => "le",
            OperatorKind::Like => "like",
            OperatorKind::ILike => "ilike",
            OperatorKind::Contains => "contains",
            OperatorKind::In => "in",
        }
    }

    /// `>`, `>=`, `<`, `<=`
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            OperatorKind::Gt | OperatorKind::Ge | OperatorKind::Lt | OperatorKind::Le
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
