//! Operator semantics over script values.
//!
//! The numeric promotion table: int with int stays int; any double operand
//! promotes the whole operation to double, the int side widening through
//! `DoubleCast::FromInt`. Comparisons build `Condition::Comparison` nodes.
//! String `+` concatenates strings only. Enum `==`/`!=` requires both sides
//! to be the same enum kind; a mixed comparison is a configuration error in
//! the script, reported when the operator binds its operands.
//!
//! `&`, `|`, and `~` compose conditions; a numeric operand converts through
//! an explicit `Condition::ValueTest` node, never through truthiness.

use voidwake_model::{
    BinaryOp, CompareOp, Condition, DoubleCast, DoubleRef, Error, IntCast, IntRef, Result,
    ValueRef,
};

use crate::value::Value;

/// Applies an arithmetic operator.
///
/// # Errors
/// Returns a type mismatch for operand combinations outside the promotion
/// table.
pub fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(ValueRef::binary(op, a, b))),
        (lhs @ (Value::Int(_) | Value::Double(_)), rhs @ (Value::Int(_) | Value::Double(_))) => {
            Ok(Value::Double(ValueRef::binary(
                op,
                lhs.into_double()?,
                rhs.into_double()?,
            )))
        }
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            Ok(Value::Str(ValueRef::binary(op, a, b)))
        }
        (lhs, rhs) => Err(Error::type_mismatch(
            "numeric operands (or string + string)",
            format!("{} {} {}", lhs.kind(), op.symbol(), rhs.kind()),
        )),
    }
}

/// Applies unary negation.
///
/// # Errors
/// Returns a type mismatch on non-numeric operands.
pub fn negate(operand: Value) -> Result<Value> {
    match operand {
        Value::Int(node) => Ok(Value::Int(ValueRef::negate(node))),
        Value::Double(node) => Ok(Value::Double(ValueRef::negate(node))),
        other => Err(Error::type_mismatch("numeric operand", other.kind())),
    }
}

/// Applies a comparison operator, producing a condition.
///
/// # Errors
/// Returns a type mismatch for cross-enum or enum/numeric comparisons, and
/// for enum operands with an ordering operator.
pub fn compare(op: CompareOp, lhs: Value, rhs: Value) -> Result<Value> {
    if is_enum(&lhs) || is_enum(&rhs) {
        return compare_enums(op, lhs, rhs);
    }
    let lhs = lhs.into_double()?;
    let rhs = rhs.into_double()?;
    Ok(Value::Cond(Condition::comparison(lhs, op, rhs)))
}

fn is_enum(value: &Value) -> bool {
    matches!(
        value,
        Value::PlanetType(_) | Value::PlanetSize(_) | Value::StarType(_)
    )
}

/// Enum comparison: both sides must be the same enum kind, and only equality
/// operators apply. The node compares the enums' int discriminants.
fn compare_enums(op: CompareOp, lhs: Value, rhs: Value) -> Result<Value> {
    if !matches!(op, CompareOp::Eq | CompareOp::Ne) {
        return Err(Error::type_mismatch(
            "an equality operator on enum operands",
            op.symbol(),
        ));
    }
    let (lhs, rhs) = match (lhs, rhs) {
        (Value::PlanetType(a), Value::PlanetType(b)) => (
            widen_int(IntRef::Cast(IntCast::FromPlanetType(Box::new(a)))),
            widen_int(IntRef::Cast(IntCast::FromPlanetType(Box::new(b)))),
        ),
        (Value::PlanetSize(a), Value::PlanetSize(b)) => (
            widen_int(IntRef::Cast(IntCast::FromPlanetSize(Box::new(a)))),
            widen_int(IntRef::Cast(IntCast::FromPlanetSize(Box::new(b)))),
        ),
        (Value::StarType(a), Value::StarType(b)) => (
            widen_int(IntRef::Cast(IntCast::FromStarType(Box::new(a)))),
            widen_int(IntRef::Cast(IntCast::FromStarType(Box::new(b)))),
        ),
        (lhs, rhs) => {
            return Err(Error::type_mismatch(
                format!("matching enum kinds, left is {}", lhs.kind()),
                rhs.kind(),
            ));
        }
    };
    Ok(Value::Cond(Condition::comparison(lhs, op, rhs)))
}

fn widen_int(node: IntRef) -> DoubleRef {
    DoubleRef::Cast(DoubleCast::FromInt(Box::new(node)))
}

/// Converts a value to a condition for logical composition. This is the one
/// place a numeric value becomes a condition, and it does so by building an
/// explicit non-zero test node.
///
/// # Errors
/// Returns a type mismatch for values that are neither conditions nor
/// numeric.
pub fn to_condition(value: Value) -> Result<Condition> {
    match value {
        Value::Cond(node) => Ok(node),
        numeric @ (Value::Int(_) | Value::Double(_)) => {
            Ok(Condition::value_test(numeric.into_double()?))
        }
        other => Err(Error::type_mismatch(
            "condition or numeric value",
            other.kind(),
        )),
    }
}

/// Logical and (`&`).
///
/// # Errors
/// Propagates operand conversion failures.
pub fn and(lhs: Value, rhs: Value) -> Result<Value> {
    Ok(Value::Cond(Condition::And(vec![
        to_condition(lhs)?,
        to_condition(rhs)?,
    ])))
}

/// Logical or (`|`).
///
/// # Errors
/// Propagates operand conversion failures.
pub fn or(lhs: Value, rhs: Value) -> Result<Value> {
    Ok(Value::Cond(Condition::Or(vec![
        to_condition(lhs)?,
        to_condition(rhs)?,
    ])))
}

/// Logical not (`~`).
///
/// # Errors
/// Propagates operand conversion failures.
pub fn not(operand: Value) -> Result<Value> {
    Ok(Value::Cond(Condition::Not(Box::new(to_condition(
        operand,
    )?))))
}
