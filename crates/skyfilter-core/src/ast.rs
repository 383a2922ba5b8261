///
/// Expression AST
///
/// Parser-agnostic expression tree consumed by the resolver.
/// Nodes are produced by an external SQL parser and lowered into this shape
/// at the boundary; the resolver never sees parser-specific types.
///
/// This layer carries no schema knowledge and performs no validation.
///

///
/// LiteralKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiteralKind {
    String,
    Integer,
    Decimal,

    /// Any literal shape the resolver does not type (booleans, hex, ...).
    Other,
}

///
/// ExpressionNode
///

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionNode {
    Literal {
        raw: String,
        kind: LiteralKind,
    },
    Column {
        path: Vec<String>,
        quoted: bool,
    },
    Null,

    // unary
    Negate(Box<Self>),
    Not(Box<Self>),
    Nested(Box<Self>),

    // logical
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),

    // comparison
    Eq(Box<Self>, Box<Self>),
    NotEq(Box<Self>, Box<Self>),
    Is(Box<Self>, Box<Self>),
    Gt(Box<Self>, Box<Self>),
    Lt(Box<Self>, Box<Self>),
    GtEq(Box<Self>, Box<Self>),
    LtEq(Box<Self>, Box<Self>),
    PatternMatch(Box<Self>, Box<Self>),

    // arithmetic
    Add(Box<Self>, Box<Self>),
    Sub(Box<Self>, Box<Self>),
    Mul(Box<Self>, Box<Self>),
    Div(Box<Self>, Box<Self>),

    // special forms
    Between {
        subject: Box<Self>,
        low: Box<Self>,
        high: Box<Self>,
    },
    In {
        subject: Box<Self>,
        list: Vec<Self>,
    },
    Function {
        name: String,
        args: Vec<Self>,
    },

    /// A parser node with no counterpart here, kept as rendered SQL so the
    /// resolver can reject it with context.
    Unsupported {
        sql: String,
    },
}

impl ExpressionNode {
    #[must_use]
    pub fn string(raw: impl Into<String>) -> Self {
        Self::Literal {
            raw: raw.into(),
            kind: LiteralKind::String,
        }
    }

    #[must_use]
    pub fn integer(raw: impl Into<String>) -> Self {
        Self::Literal {
            raw: raw.into(),
            kind: LiteralKind::Integer,
        }
    }

    #[must_use]
    pub fn decimal(raw: impl Into<String>) -> Self {
        Self::Literal {
            raw: raw.into(),
            kind: LiteralKind::Decimal,
        }
    }

    /// Unquoted column reference from a dotted path (`host.name`).
    #[must_use]
    pub fn column(path: &str) -> Self {
        Self::Column {
            path: path.split('.').map(str::to_string).collect(),
            quoted: false,
        }
    }

    /// Double-quoted identifier; resolves to a text literal.
    #[must_use]
    pub fn quoted(ident: impl Into<String>) -> Self {
        Self::Column {
            path: vec![ident.into()],
            quoted: true,
        }
    }

    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Short, stable label for diagnostics and `InvalidQuery` messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Literal { .. } => "literal".to_string(),
            Self::Column { .. } => "column".to_string(),
            Self::Null => "NULL".to_string(),
            Self::Negate(_) => "negation".to_string(),
            Self::Not(_) => "NOT".to_string(),
            Self::Nested(_) => "parenthesized expression".to_string(),
            Self::And(..) => "AND".to_string(),
            Self::Or(..) => "OR".to_string(),
            Self::Eq(..) => "=".to_string(),
            Self::NotEq(..) => "!=".to_string(),
            Self::Is(..) => "IS".to_string(),
            Self::Gt(..) => ">".to_string(),
            Self::Lt(..) => "<".to_string(),
            Self::GtEq(..) => ">=".to_string(),
            Self::LtEq(..) => "<=".to_string(),
            Self::PatternMatch(..) => "pattern match".to_string(),
            Self::Add(..) => "+".to_string(),
            Self::Sub(..) => "-".to_string(),
            Self::Mul(..) => "*".to_string(),
            Self::Div(..) => "/".to_string(),
            Self::Between { .. } => "BETWEEN".to_string(),
            Self::In { .. } => "IN".to_string(),
            Self::Function { name, .. } => format!("function '{name}'"),
            Self::Unsupported { sql } => format!("expression `{sql}`"),
        }
    }
}
