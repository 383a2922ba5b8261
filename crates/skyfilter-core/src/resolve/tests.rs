use crate::{
    ast::{ExpressionNode, LiteralKind},
    error::ResolveError,
    extra::Cone,
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    predicate::{ArithExpr, ArithOp, Operand, Predicate},
    resolve::{Resolution, Resolved, Resolver},
    test_fixtures::{OBJECT, sky_registry},
    value::Value,
};
use proptest::prelude::*;
use std::{cell::RefCell, rc::Rc};

type Binary = fn(Box<ExpressionNode>, Box<ExpressionNode>) -> ExpressionNode;

fn col(path: &str) -> ExpressionNode {
    ExpressionNode::column(path)
}

fn int(raw: &str) -> ExpressionNode {
    ExpressionNode::integer(raw)
}

fn dec(raw: &str) -> ExpressionNode {
    ExpressionNode::decimal(raw)
}

fn bin(op: Binary, left: ExpressionNode, right: ExpressionNode) -> ExpressionNode {
    op(left.boxed(), right.boxed())
}

fn cone(ra: &str, dec_: &str, radius: &str) -> ExpressionNode {
    ExpressionNode::function("cone", vec![dec(ra), dec(dec_), dec(radius)])
}

fn resolve(node: &ExpressionNode) -> Result<Resolution, ResolveError> {
    let registry = sky_registry();

    Resolver::new(&registry, OBJECT).resolve(node)
}

fn resolve_value(node: &ExpressionNode) -> Resolved {
    resolve(node).expect("node should resolve").value
}

fn resolve_predicate(node: &ExpressionNode) -> Predicate {
    let (predicate, _) = resolve(node)
        .expect("node should resolve")
        .into_predicate()
        .expect("root should be a predicate");

    predicate
}

fn resolve_err(node: &ExpressionNode) -> ResolveError {
    resolve(node).expect_err("node should fail to resolve")
}

fn field(path: &str) -> Operand {
    Operand::field(path)
}

fn lit(value: impl Into<Value>) -> Operand {
    Operand::literal(value)
}

//
// Literals
//

#[test]
fn literals_are_typed_by_kind() {
    assert_eq!(resolve_value(&int("42")), Resolved::Literal(Value::Int(42)));
    assert_eq!(resolve_value(&dec("4.5")), Resolved::Literal(Value::Float(4.5)));
    assert_eq!(
        resolve_value(&ExpressionNode::string("abc")),
        Resolved::Literal(Value::from("abc"))
    );
}

#[test]
fn malformed_literals_are_rejected() {
    let other = ExpressionNode::Literal {
        raw: "true".into(),
        kind: LiteralKind::Other,
    };
    assert_eq!(
        resolve_err(&other),
        ResolveError::InvalidLiteral {
            literal: "true".into()
        }
    );
    assert!(matches!(
        resolve_err(&int("9223372036854775808")),
        ResolveError::InvalidLiteral { .. }
    ));
    assert!(matches!(
        resolve_err(&dec("1e400")),
        ResolveError::InvalidLiteral { .. }
    ));
}

#[test]
fn quoted_identifier_is_a_string_literal_even_when_field_exists() {
    assert_eq!(
        resolve_value(&ExpressionNode::quoted("name")),
        Resolved::Literal(Value::from("name"))
    );

    let predicate = resolve_predicate(&bin(
        ExpressionNode::Eq,
        col("name"),
        ExpressionNode::quoted("Vega"),
    ));
    assert_eq!(predicate, Predicate::eq(field("name"), lit("Vega")));
}

//
// Negation
//

#[test]
fn negating_numeric_literals_folds() {
    assert_eq!(
        resolve_value(&ExpressionNode::Negate(int("5").boxed())),
        Resolved::Literal(Value::Int(-5))
    );
    assert_eq!(
        resolve_value(&ExpressionNode::Negate(dec("5.3").boxed())),
        Resolved::Literal(Value::Float(-5.3))
    );
    assert_eq!(
        resolve_value(&ExpressionNode::Negate(int("9223372036854775808").boxed())),
        Resolved::Literal(Value::Int(i64::MIN))
    );
}

#[test]
fn negating_fields_and_expressions_composes() {
    assert_eq!(
        resolve_value(&ExpressionNode::Negate(col("mag").boxed())),
        Resolved::Expr(Box::new(ArithExpr::Neg(field("mag"))))
    );

    let nested = ExpressionNode::Negate(
        ExpressionNode::Nested(bin(ExpressionNode::Add, int("1"), int("2")).boxed()).boxed(),
    );
    assert_eq!(resolve_value(&nested), Resolved::Literal(Value::Int(-3)));
}

#[test]
fn negating_text_or_conditions_fails() {
    let text = ExpressionNode::Negate(ExpressionNode::string("x").boxed());
    assert!(matches!(
        resolve_err(&text),
        ResolveError::InvalidLiteral { .. }
    ));

    let quoted = ExpressionNode::Negate(ExpressionNode::quoted("x").boxed());
    assert!(matches!(
        resolve_err(&quoted),
        ResolveError::InvalidLiteral { .. }
    ));

    let condition = ExpressionNode::Negate(bin(ExpressionNode::Eq, col("age"), int("1")).boxed());
    assert!(matches!(
        resolve_err(&condition),
        ResolveError::InvalidQuery { .. }
    ));
}

//
// Comparisons
//

#[test]
fn greater_than_compares_field_to_integer() {
    let predicate = resolve_predicate(&bin(ExpressionNode::Gt, col("age"), int("18")));

    assert_eq!(predicate, Predicate::gt(field("age"), lit(18_i64)));
}

#[test]
fn ordering_operators_map_one_to_one() {
    let cases: [(Binary, fn(Operand, Operand) -> Predicate); 4] = [
        (ExpressionNode::Gt, Predicate::gt),
        (ExpressionNode::Lt, Predicate::lt),
        (ExpressionNode::GtEq, Predicate::gte),
        (ExpressionNode::LtEq, Predicate::lte),
    ];

    for (node, expected) in cases {
        let predicate = resolve_predicate(&bin(node, col("mag"), dec("2.5")));
        assert_eq!(predicate, expected(field("mag"), lit(2.5)));
    }
}

#[test]
fn null_comparisons_become_null_checks() {
    let eq = resolve_predicate(&bin(ExpressionNode::Eq, col("name"), ExpressionNode::Null));
    assert_eq!(eq, Predicate::is_null(field("name"), true));

    let is = resolve_predicate(&bin(ExpressionNode::Is, col("name"), ExpressionNode::Null));
    assert_eq!(is, Predicate::is_null(field("name"), true));

    let ne = resolve_predicate(&bin(ExpressionNode::NotEq, col("name"), ExpressionNode::Null));
    assert_eq!(ne, Predicate::is_null(field("name"), false));
}

#[test]
fn not_equals_negates_equality() {
    let predicate = resolve_predicate(&bin(ExpressionNode::NotEq, col("flag"), int("0")));

    assert_eq!(predicate, !Predicate::eq(field("flag"), lit(0_i64)));
}

#[test]
fn pattern_match_is_case_insensitive_containment() {
    let predicate = resolve_predicate(&bin(
        ExpressionNode::PatternMatch,
        col("name"),
        ExpressionNode::string("^M3.*"),
    ));

    assert_eq!(predicate, Predicate::contains_ci(field("name"), lit("^M3.*")));
}

#[test]
fn null_outside_comparison_is_invalid() {
    let node = bin(ExpressionNode::Eq, ExpressionNode::Null, col("name"));

    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidQuery {
            node: "NULL".into()
        }
    );
}

//
// Logical structure
//

#[test]
fn logical_operators_compose_predicates() {
    let node = ExpressionNode::Not(
        ExpressionNode::Nested(
            bin(
                ExpressionNode::Or,
                bin(ExpressionNode::Gt, col("age"), int("1")),
                bin(ExpressionNode::Lt, col("age"), int("0")),
            )
            .boxed(),
        )
        .boxed(),
    );

    let expected = !(Predicate::gt(field("age"), lit(1_i64)) | Predicate::lt(field("age"), lit(0_i64)));
    assert_eq!(resolve_predicate(&node), expected);
}

#[test]
fn values_in_condition_position_are_rejected() {
    let node = bin(
        ExpressionNode::And,
        col("flag"),
        bin(ExpressionNode::Eq, col("age"), int("1")),
    );
    assert!(matches!(
        resolve_err(&node),
        ResolveError::InvalidQuery { .. }
    ));

    let node = ExpressionNode::Not(int("1").boxed());
    assert!(matches!(
        resolve_err(&node),
        ResolveError::InvalidQuery { .. }
    ));
}

#[test]
fn conditions_in_value_position_are_rejected() {
    let node = bin(
        ExpressionNode::Eq,
        bin(ExpressionNode::Eq, col("age"), int("1")),
        int("1"),
    );

    assert!(matches!(
        resolve_err(&node),
        ResolveError::InvalidQuery { .. }
    ));
}

//
// Arithmetic
//

#[test]
fn literal_arithmetic_folds() {
    let node = bin(
        ExpressionNode::Mul,
        ExpressionNode::Nested(bin(ExpressionNode::Add, int("1"), int("2")).boxed()),
        int("3"),
    );
    assert_eq!(resolve_value(&node), Resolved::Literal(Value::Int(9)));

    let node = bin(ExpressionNode::Div, int("1"), dec("4.0"));
    assert_eq!(resolve_value(&node), Resolved::Literal(Value::Float(0.25)));

    let node = bin(ExpressionNode::Sub, int("7"), int("10"));
    assert_eq!(resolve_value(&node), Resolved::Literal(Value::Int(-3)));
}

#[test]
fn field_arithmetic_stays_composed() {
    let node = bin(
        ExpressionNode::Gt,
        bin(ExpressionNode::Add, col("age"), int("1")),
        int("10"),
    );

    let sum = Operand::Expr(Box::new(ArithExpr::Binary {
        op: ArithOp::Add,
        left: field("age"),
        right: lit(1_i64),
    }));
    assert_eq!(resolve_predicate(&node), Predicate::gt(sum, lit(10_i64)));
}

#[test]
fn unfoldable_literal_arithmetic_stays_composed() {
    let node = bin(ExpressionNode::Div, int("1"), int("0"));

    assert_eq!(
        resolve_value(&node),
        Resolved::Expr(Box::new(ArithExpr::Binary {
            op: ArithOp::Div,
            left: lit(1_i64),
            right: lit(0_i64),
        }))
    );
}

#[test]
fn text_arithmetic_is_an_invalid_literal() {
    let node = bin(ExpressionNode::Add, ExpressionNode::string("a"), int("1"));

    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidLiteral {
            literal: "'a'".into()
        }
    );
}

//
// Special forms
//

#[test]
fn between_expands_to_inclusive_range() {
    let node = ExpressionNode::Between {
        subject: col("mag").boxed(),
        low: int("10").boxed(),
        high: int("20").boxed(),
    };

    let expected = Predicate::gte(field("mag"), lit(10_i64)) & Predicate::lte(field("mag"), lit(20_i64));
    assert_eq!(resolve_predicate(&node), expected);
}

#[test]
fn in_list_collects_literals() {
    let node = ExpressionNode::In {
        subject: col("id").boxed(),
        list: vec![int("1"), ExpressionNode::Negate(int("2").boxed()), dec("3.5")],
    };

    assert_eq!(
        resolve_predicate(&node),
        Predicate::in_(
            field("id"),
            vec![Value::Int(1), Value::Int(-2), Value::Float(3.5)]
        )
    );
}

#[test]
fn in_list_rejects_field_members() {
    let node = ExpressionNode::In {
        subject: col("id").boxed(),
        list: vec![int("1"), col("age")],
    };

    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidLiteral {
            literal: "age".into()
        }
    );
}

#[test]
fn unknown_nodes_are_invalid_queries() {
    let node = ExpressionNode::function("upper", vec![col("name")]);
    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidQuery {
            node: "function 'upper'".into()
        }
    );

    let node = ExpressionNode::Unsupported {
        sql: "x IS TRUE".into(),
    };
    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidQuery {
            node: "expression `x IS TRUE`".into()
        }
    );
}

//
// Field paths
//

#[test]
fn missing_field_is_reported_by_name() {
    let node = bin(ExpressionNode::Eq, col("missingfield"), int("1"));

    assert_eq!(
        resolve_err(&node),
        ResolveError::FieldDoesNotExist {
            field: "missingfield".into()
        }
    );
}

#[test]
fn relational_paths_are_flattened() {
    assert_eq!(
        resolve_value(&col("host.name")),
        Resolved::Field("host__name".into())
    );
    assert_eq!(
        resolve_value(&col("host.cluster.name")),
        Resolved::Field("host__cluster__name".into())
    );
}

#[test]
fn relational_paths_fail_at_offending_segment() {
    let cases = [
        ("host.missing", "missing"),
        ("name.length", "name"),
        ("bogus.name", "bogus"),
        ("host.cluster.redshift", "redshift"),
    ];

    for (path, offending) in cases {
        assert_eq!(
            resolve_err(&col(path)),
            ResolveError::FieldDoesNotExist {
                field: offending.into()
            },
            "path {path}"
        );
    }
}

#[test]
fn resolve_column_validates_without_a_pass() {
    let registry = sky_registry();
    let resolver = Resolver::new(&registry, OBJECT);

    let field = resolver
        .resolve_column(&["host".into(), "redshift".into()])
        .expect("path should resolve");
    assert_eq!(field.as_str(), "host__redshift");

    assert!(matches!(
        resolver.resolve_column(&[]),
        Err(ResolveError::InvalidQuery { .. })
    ));
}

//
// Cone search
//

#[test]
fn cone_and_flag_records_parameters() {
    let node = bin(
        ExpressionNode::And,
        ExpressionNode::function(
            "cone",
            vec![
                dec("10.5"),
                ExpressionNode::Negate(dec("5.3").boxed()),
                dec("0.1"),
            ],
        ),
        bin(ExpressionNode::Eq, col("flag"), int("1")),
    );

    let (predicate, extra) = resolve(&node)
        .expect("cone query should resolve")
        .into_predicate()
        .expect("root should be a predicate");

    assert_eq!(
        predicate,
        Predicate::eq(field("cone_query"), lit(true)) & Predicate::eq(field("flag"), lit(1_i64))
    );
    assert_eq!(extra.cones, vec![Cone::new(10.5, -5.3, 0.1)]);
    assert!(extra.aliases.is_empty());
}

#[test]
fn multiple_cones_are_numbered_in_call_order() {
    let node = bin(
        ExpressionNode::And,
        ExpressionNode::function("cone", vec![int("1"), int("2"), int("3")]),
        ExpressionNode::function("CONE", vec![int("4"), int("5"), int("6")]),
    );

    let (predicate, extra) = resolve(&node)
        .expect("cone query should resolve")
        .into_predicate()
        .expect("root should be a predicate");

    assert_eq!(
        predicate,
        Predicate::eq(field("cone_query"), lit(true))
            & Predicate::eq(field("cone_query1"), lit(true))
    );
    assert_eq!(
        extra.cones,
        vec![Cone::new(1.0, 2.0, 3.0), Cone::new(4.0, 5.0, 6.0)]
    );
}

#[test]
fn cone_argument_count_is_checked_first() {
    let node = ExpressionNode::function("cone", vec![col("missingfield"), int("2")]);

    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidConeNumberArguments { found: 2 }
    );
}

#[test]
fn cone_arguments_must_be_numeric_literals() {
    let node = ExpressionNode::function("cone", vec![int("1"), col("dec"), int("3")]);
    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidConeArgument { argument: "dec" }
    );

    let node = ExpressionNode::function(
        "cone",
        vec![int("1"), int("2"), ExpressionNode::string("wide")],
    );
    assert_eq!(
        resolve_err(&node),
        ResolveError::InvalidConeArgument { argument: "radius" }
    );
}

#[test]
fn cone_arguments_accept_folded_arithmetic() {
    let node = ExpressionNode::function(
        "cone",
        vec![
            bin(ExpressionNode::Div, int("360"), int("2")),
            dec("0.5"),
            bin(ExpressionNode::Mul, dec("0.5"), int("2")),
        ],
    );

    let extra = resolve(&node).expect("cone should resolve").extra;
    assert_eq!(extra.cones, vec![Cone::new(180.0, 0.5, 1.0)]);
}

//
// Observability
//

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn resolution_emits_events_in_traversal_order() {
    let capture = Rc::new(CaptureSink::default());
    let node = bin(
        ExpressionNode::Or,
        cone("1", "2", "3"),
        bin(ExpressionNode::Eq, col("host.name"), ExpressionNode::string("M31")),
    );

    with_metrics_sink(capture.clone(), || resolve(&node)).expect("query should resolve");

    assert_eq!(
        *capture.events.borrow(),
        vec![
            MetricsEvent::ResolveStart {
                model: OBJECT.into()
            },
            MetricsEvent::ConeRecorded { index: 0 },
            MetricsEvent::FieldResolved { depth: 1 },
            MetricsEvent::ResolveFinish {
                model: OBJECT.into(),
                cones: 1
            },
        ]
    );
}

#[test]
fn failed_resolution_reports_error_kind() {
    let capture = Rc::new(CaptureSink::default());
    let node = ExpressionNode::function("cone", vec![int("1")]);

    let err = with_metrics_sink(capture.clone(), || resolve(&node))
        .expect_err("cone arity should fail");

    assert_eq!(
        capture.events.borrow().last(),
        Some(&MetricsEvent::ResolveFailed {
            model: OBJECT.into(),
            kind: err.kind(),
        })
    );
}

//
// Properties
//

fn arb_cone_args() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0..360.0f64, -90.0..90.0f64, 0.0..10.0f64)
}

proptest! {
    #[test]
    fn integer_text_always_yields_integers(value in 0..=i64::MAX) {
        let resolved = resolve_value(&int(&value.to_string()));
        prop_assert_eq!(resolved, Resolved::Literal(Value::Int(value)));
    }

    #[test]
    fn decimal_text_always_yields_floats(value in -1.0e12..1.0e12f64) {
        let resolved = resolve_value(&dec(&format!("{value:?}")));
        prop_assert_eq!(resolved, Resolved::Literal(Value::Float(value)));
    }

    #[test]
    fn fresh_resolvers_are_idempotent_and_keep_cone_order(
        cones in prop::collection::vec(arb_cone_args(), 1..6)
    ) {
        let node = cones
            .iter()
            .map(|(ra, dec_, radius)| cone(&format!("{ra:?}"), &format!("{dec_:?}"), &format!("{radius:?}")))
            .reduce(|acc, next| bin(ExpressionNode::Or, acc, next))
            .expect("at least one cone");

        let first = resolve(&node).expect("first pass should resolve");
        let second = resolve(&node).expect("second pass should resolve");
        prop_assert_eq!(&first, &second);

        let recorded: Vec<_> = first
            .extra
            .cones
            .iter()
            .map(|c| (c.ra, c.dec, c.radius))
            .collect();
        prop_assert_eq!(recorded, cones);
    }
}
