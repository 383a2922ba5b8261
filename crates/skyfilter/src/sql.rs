//! SQL front end.
//!
//! Parses filter text with `sqlparser` and lowers its expression tree into
//! the core's parser-agnostic `ExpressionNode`. Lowering is purely
//! structural: every node `sqlparser` produces maps to exactly one node here,
//! and shapes without a counterpart become `ExpressionNode::Unsupported` so
//! the resolver can reject them with context.

use skyfilter_core::ast::{ExpressionNode, LiteralKind};
use sqlparser::{
    ast::{
        BinaryOperator, Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, Ident,
        UnaryOperator, Value as SqlValue,
    },
    dialect::Dialect,
    parser::{Parser, ParserError},
    tokenizer::Token,
};

/// Parse `text` as exactly one SQL expression.
/// Trailing semicolons are tolerated; any other trailing token is an error.
pub fn parse_expression(text: &str, dialect: &dyn Dialect) -> Result<Expr, ParserError> {
    let mut parser = Parser::new(dialect).try_with_sql(text)?;
    let expr = parser.parse_expr()?;

    while parser.consume_token(&Token::SemiColon) {}

    let next = parser.peek_token();
    if next.token != Token::EOF {
        return Err(ParserError::ParserError(format!(
            "unexpected trailing input starting at '{}'",
            next.token
        )));
    }

    Ok(expr)
}

/// Lower one `sqlparser` expression.
#[must_use]
pub fn lower_expr(expr: &Expr) -> ExpressionNode {
    match expr {
        Expr::Identifier(ident) => lower_column(std::slice::from_ref(ident)),
        Expr::CompoundIdentifier(idents) => lower_column(idents),
        Expr::Value(value) => lower_value(&value.value),
        Expr::Nested(inner) => ExpressionNode::Nested(lower_boxed(inner)),

        Expr::UnaryOp { op, expr: inner } => match op {
            UnaryOperator::Minus => ExpressionNode::Negate(lower_boxed(inner)),
            UnaryOperator::Plus => lower_expr(inner),
            UnaryOperator::Not => ExpressionNode::Not(lower_boxed(inner)),
            _ => unsupported(expr),
        },
        Expr::BinaryOp { left, op, right } => lower_binary(expr, left, op, right),

        Expr::IsNull(inner) => {
            ExpressionNode::Is(lower_boxed(inner), ExpressionNode::Null.boxed())
        }
        Expr::IsNotNull(inner) => {
            ExpressionNode::NotEq(lower_boxed(inner), ExpressionNode::Null.boxed())
        }

        Expr::Between {
            expr: subject,
            negated,
            low,
            high,
        } => negate_if(
            *negated,
            ExpressionNode::Between {
                subject: lower_boxed(subject),
                low: lower_boxed(low),
                high: lower_boxed(high),
            },
        ),
        Expr::InList {
            expr: subject,
            list,
            negated,
        } => negate_if(
            *negated,
            ExpressionNode::In {
                subject: lower_boxed(subject),
                list: list.iter().map(lower_expr).collect(),
            },
        ),
        Expr::RLike {
            negated,
            expr: subject,
            pattern,
            ..
        } => negate_if(
            *negated,
            ExpressionNode::PatternMatch(lower_boxed(subject), lower_boxed(pattern)),
        ),

        Expr::Function(function) => lower_function(expr, function),

        _ => unsupported(expr),
    }
}

fn lower_boxed(expr: &Expr) -> Box<ExpressionNode> {
    lower_expr(expr).boxed()
}

fn unsupported(expr: &Expr) -> ExpressionNode {
    ExpressionNode::Unsupported {
        sql: expr.to_string(),
    }
}

fn negate_if(negated: bool, node: ExpressionNode) -> ExpressionNode {
    if negated {
        ExpressionNode::Not(node.boxed())
    } else {
        node
    }
}

// Only double quotes turn an identifier into a string literal; backtick and
// bracket quoting still name columns.
fn lower_column(idents: &[Ident]) -> ExpressionNode {
    let quoted = idents.len() == 1 && idents[0].quote_style == Some('"');

    ExpressionNode::Column {
        path: idents.iter().map(|ident| ident.value.clone()).collect(),
        quoted,
    }
}

fn lower_value(value: &SqlValue) -> ExpressionNode {
    match value {
        SqlValue::Number(raw, _) => {
            let raw = raw.replace('_', "");
            let kind = number_kind(&raw);

            ExpressionNode::Literal { raw, kind }
        }
        SqlValue::SingleQuotedString(text)
        | SqlValue::DoubleQuotedString(text)
        | SqlValue::EscapedStringLiteral(text)
        | SqlValue::NationalStringLiteral(text) => ExpressionNode::string(text.clone()),
        SqlValue::Null => ExpressionNode::Null,
        other => ExpressionNode::Literal {
            raw: other.to_string(),
            kind: LiteralKind::Other,
        },
    }
}

// `sqlparser` keeps numbers as text, digit separators included. Separators
// are stripped first; plain digit runs are then integers and anything with a
// point or exponent is decimal.
fn number_kind(raw: &str) -> LiteralKind {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        LiteralKind::Integer
    } else {
        LiteralKind::Decimal
    }
}

fn lower_binary(expr: &Expr, left: &Expr, op: &BinaryOperator, right: &Expr) -> ExpressionNode {
    let build: fn(Box<ExpressionNode>, Box<ExpressionNode>) -> ExpressionNode = match op {
        BinaryOperator::And => ExpressionNode::And,
        BinaryOperator::Or => ExpressionNode::Or,
        BinaryOperator::Eq => ExpressionNode::Eq,
        BinaryOperator::NotEq => ExpressionNode::NotEq,
        BinaryOperator::Gt => ExpressionNode::Gt,
        BinaryOperator::Lt => ExpressionNode::Lt,
        BinaryOperator::GtEq => ExpressionNode::GtEq,
        BinaryOperator::LtEq => ExpressionNode::LtEq,
        BinaryOperator::Plus => ExpressionNode::Add,
        BinaryOperator::Minus => ExpressionNode::Sub,
        BinaryOperator::Multiply => ExpressionNode::Mul,
        BinaryOperator::Divide => ExpressionNode::Div,
        BinaryOperator::PGRegexMatch
        | BinaryOperator::PGRegexIMatch
        | BinaryOperator::Regexp => ExpressionNode::PatternMatch,
        BinaryOperator::PGRegexNotMatch | BinaryOperator::PGRegexNotIMatch => {
            return ExpressionNode::Not(
                ExpressionNode::PatternMatch(lower_boxed(left), lower_boxed(right)).boxed(),
            );
        }
        _ => return unsupported(expr),
    };

    build(lower_boxed(left), lower_boxed(right))
}

fn lower_function(expr: &Expr, function: &Function) -> ExpressionNode {
    let args = match &function.args {
        FunctionArguments::None => Vec::new(),
        FunctionArguments::List(list) => {
            match list
                .args
                .iter()
                .map(lower_function_arg)
                .collect::<Option<Vec<_>>>()
            {
                Some(args) => args,
                None => return unsupported(expr),
            }
        }
        FunctionArguments::Subquery(_) => return unsupported(expr),
    };

    ExpressionNode::Function {
        name: function.name.to_string(),
        args,
    }
}

// Named and wildcard arguments have no counterpart.
fn lower_function_arg(arg: &FunctionArg) -> Option<ExpressionNode> {
    match arg {
        FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => Some(lower_expr(expr)),
        _ => None,
    }
}

///
/// TESTS
///
