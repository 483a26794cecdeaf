//! Integration tests for the constraint algebra and its text front end.

use polycons::prelude::*;
use num_rational::Ratio;
use polycons::utils::errors::{IndexError, TypeErrorKind, ValueErrorKind};

fn x() -> Variable {
    Variable::new(0)
}

fn y() -> Variable {
    Variable::new(1)
}

#[test]
fn test_variable_dimension() {
    for a in [0usize, 1, 2, 10, 4096] {
        assert_eq!(Variable::new(a).space_dimension(), a + 1);
        assert_eq!(LinearExpression::from_variable(Variable::new(a)).space_dimension(), a + 1);
    }
}

#[test]
fn test_self_subtraction_is_zero() {
    let exprs = vec![
        LinearExpression::zero(),
        LinearExpression::from_scalar(-17),
        3 * x() - 4 * y() + 5,
        LinearExpression::from_coefficients([1, 2, 3, 4], 5),
        LinearExpression::from_coefficients(
            vec![Scalar::from(u128::MAX), Scalar::from(-1)],
            Scalar::from(i128::MIN),
        ),
    ];
    for e in &exprs {
        let diff = e - e;
        assert!(diff.is_zero(), "{} - {} = {}", e, e, diff);
        assert_eq!(diff.to_string(), "0");
        assert_eq!(diff.space_dimension(), e.space_dimension());
    }
}

#[test]
fn test_rebuild_from_coefficients() {
    let exprs = vec![
        LinearExpression::zero(),
        -x() + 7,
        5 * Variable::new(3) - y(),
        LinearExpression::from_coefficients([0, 0, -2], 0),
    ];
    for e in &exprs {
        let rebuilt = LinearExpression::from_coefficients(
            e.coefficients().iter().cloned(),
            e.inhomogeneous_term().clone(),
        );
        assert_eq!(rebuilt.to_string(), e.to_string());
        assert!(rebuilt.is_equal_to(e));
    }
}

#[test]
fn test_rendering_examples() {
    let e = LinearExpression::from_coefficients([1, 2, 3, 4], 5);
    assert_eq!(e.to_string(), "x0+2*x1+3*x2+4*x3+5");

    let c = (5 * x() - 2 * y()).greater_than(x() + y() - 1);
    assert_eq!(c.to_string(), "4*x0-3*x1+1>0");

    let e = LinearExpression::try_from_coefficients(vec![2.0, -1.0], Ratio::new(-6i64, 2)).unwrap();
    assert_eq!(e.to_string(), "2*x0-x1-3");
}

#[test]
fn test_scalars_compare_to_bool() {
    assert_eq!(equal(0, 1).as_bool(), Some(false));
    assert_eq!(less_than(Scalar::from(-5), 0u64).as_bool(), Some(true));
    assert_eq!(greater_than(2, 2).as_bool(), Some(false));
    assert!(matches!(greater_or_equal(x(), 0), Comparison::Constraint(_)));
    assert!(matches!(less_or_equal(3, LinearExpression::from_scalar(4)), Comparison::Constraint(_)));
}

#[test]
fn test_system_dimension_is_max() {
    let dims = [3usize, 1, 7, 2, 7, 0];
    let mut system = ConstraintSystem::new();
    let mut expected = 0;
    for d in dims {
        let expr = LinearExpression::from_coefficients(vec![1; d], 0);
        system.insert(inequality(expr));
        expected = expected.max(d);
        assert_eq!(system.space_dimension(), expected);
    }
    assert_eq!(system.len(), dims.len());
}

#[test]
fn test_system_index_errors() {
    let system: ConstraintSystem = vec![x().greater_than(0), x().less_than(1)].into_iter().collect();
    assert_eq!(system.len(), 2);
    assert_eq!(system.iter().count(), 2);

    assert_eq!(system.get(0).unwrap().to_string(), "x0>0");
    assert_eq!(system.get(1).unwrap().to_string(), "-x0+1>0");
    assert_eq!(system.get(2).unwrap_err(), IndexError { index: 2, len: 2 });
    assert_eq!(system.get(-1).unwrap_err(), IndexError { index: -1, len: 2 });

    let err: PolyConsError = system.get(5).unwrap_err().into();
    assert!(err.to_string().starts_with("Index error"));
}

#[test]
fn test_degenerate_constraints() {
    assert!(!x().equals(0).is_tautological());
    assert!(!x().equals(0).is_inconsistent());
    assert!((0 * x()).greater_or_equal(0).is_tautological());
    assert!((0 * x()).greater_or_equal(1).is_inconsistent());
    assert!((0 * x()).greater_than(0).is_inconsistent());
    assert!(equation(LinearExpression::zero()).is_tautological());
    assert!(strict_inequality(LinearExpression::from_scalar(1)).is_tautological());
}

#[test]
fn test_equivalence() {
    let a = x().greater_or_equal(2);
    let b = (3 * x()).greater_or_equal(6);
    let c = (3 * x()).greater_than(6);
    assert!(a.is_equivalent_to(&b));
    assert!(!a.is_equivalent_to(&c));
    assert!((x() - y()).equals(0).is_equivalent_to(&(y() - x()).equals(0)));

    // Degenerate constraints compare equal across dimensions.
    let t1 = (0 * x()).greater_or_equal(0);
    let t2 = (0 * Variable::new(5)).equals(0);
    assert!(t1.is_equivalent_to(&t2));
}

#[test]
fn test_type_and_value_errors() {
    let err = Operand::from(x()).checked_mul(Operand::from(y())).unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::UnsupportedOperand);

    let err = LinearExpression::try_from_coefficients(vec![0.5], 0).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NotIntegral);
    let err = Operand::from_value(f64::NAN).unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::NotFinite);
    let err = Operand::from_value("seven").unwrap_err();
    assert_eq!(err.kind, ValueErrorKind::InvalidLiteral);
}

#[test]
fn test_serde_round_trips() {
    let e = 4 * x() - 3 * y() + 1;
    let json = serde_json::to_string(&e).unwrap();
    assert_eq!(json, "[[4,-3],1]");
    let back: LinearExpression = serde_json::from_str(&json).unwrap();
    assert!(back.is_equal_to(&e));

    let huge = LinearExpression::from_coefficients(vec![Scalar::from(u128::MAX)], 0);
    let json = serde_json::to_string(&huge).unwrap();
    assert_eq!(json, "[[\"340282366920938463463374607431768211455\"],0]");
    let back: LinearExpression = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), huge.to_string());

    let system: ConstraintSystem = vec![
        x().greater_or_equal(0),
        (x() + y()).less_than(4),
        y().equals(2),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_string(&system).unwrap();
    assert_eq!(
        json,
        "[[\"inequality\",[[1],0]],[\"strict_inequality\",[[-1,-1],4]],[\"equation\",[[0,1],-2]]]"
    );
    let back: ConstraintSystem = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), system.len());
    assert_eq!(back.space_dimension(), system.space_dimension());
    for (a, b) in back.iter().zip(system.iter()) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.to_string(), b.to_string());
    }

    assert!(serde_json::from_str::<Constraint>("[\"bogus\",[[1],0]]").is_err());
    assert!(serde_json::from_str::<LinearExpression>("[[18446744073709551617],0]").is_err());
    let exact: LinearExpression = serde_json::from_str("[[\"18446744073709551617\"],0]").unwrap();
    assert_eq!(exact.to_string(), "18446744073709551617*x0");

    let set = VariablesSet::from_range(Variable::new(1), Variable::new(3));
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");
    let v: Variable = serde_json::from_str("7").unwrap();
    assert_eq!(v.id(), 7);
}

#[test]
fn test_text_to_system() {
    let source = r#"
        # the triangle 0 <= x0, 0 <= x1, x0 + x1 <= 4
        x0 >= 0; x1 >= 0
        x0 + x1 <= 4
        2 * 2 == 4    // plain arithmetic stays a truth value
    "#;
    let session = process(source, &SessionConfig::default()).unwrap();
    assert_eq!(session.system.len(), 3);
    assert_eq!(session.system.to_string(), "{x0>=0, x1>=0, -x0-x1+4>=0}");
    assert_eq!(session.truths.len(), 1);
    assert!(session.truths[0].1);

    let point = [Scalar::from(1), Scalar::from(2)];
    assert!(session.system.is_satisfied_by(&point));
}

#[test]
fn test_text_and_api_agree() {
    let outcomes = evaluate("5*x0 - 2*x1 > x0 + x1 - 1", &[] as &[&str]).unwrap();
    let from_text = match &outcomes[0] {
        Outcome::Comparison(Comparison::Constraint(c)) => c.clone(),
        other => panic!("Expected constraint, found {}", other),
    };
    let from_api = (5 * x() - 2 * y()).greater_than(x() + y() - 1);
    assert!(from_text.is_equivalent_to(&from_api));
    assert_eq!(from_text.to_string(), from_api.to_string());
}

#[test]
fn test_pretty_output() {
    let system: ConstraintSystem = (0..4usize)
        .map(|i| Variable::new(i).greater_or_equal(i))
        .collect();
    assert_eq!(system.pretty(), system.to_string());
    let narrow = system.pretty_print(12);
    assert_eq!(narrow.lines().count(), 6);
    assert!(narrow.starts_with("{\n  x0>=0,"));
}
