//! Prefix expression reduction.
//!
//! The interpreter flattens an expression into a run of [`Term`]s and
//! [`evaluate`] reduces it in a single right-to-left scan over one working
//! stack. Operators find their operands already reduced on the stack, so
//! nesting needs no tree and no precedence rules.

use std::convert::TryFrom;

use crate::error::ErrorKind;
use crate::keyword::Keyword;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Raise,
    Root,
    Mean,
    Dist,
}

impl Operator {
    pub fn from_keyword(keyword: Keyword) -> Option<Operator> {
        let operator = match keyword {
            Keyword::Add => Operator::Add,
            Keyword::Sub => Operator::Sub,
            Keyword::Mul => Operator::Mul,
            Keyword::Div => Operator::Div,
            Keyword::Mod => Operator::Mod,
            Keyword::Raise => Operator::Raise,
            Keyword::Root => Operator::Root,
            Keyword::Mean => Operator::Mean,
            Keyword::Dist => Operator::Dist,
            _ => return None,
        };
        Some(operator)
    }
}

/// One element of a flattened expression, identifiers already resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Operator(Operator),
    And,
    Value(i64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Entry {
    Marker,
    Integer(i64),
}

type Reduction<T> = Result<T, ErrorKind>;

/// Reduces a prefix expression to its value.
///
/// Fails with `InvalidExpression` when operands are missing or left over and
/// with `InvalidOperations` on arithmetic faults such as division by zero.
pub fn evaluate(terms: &[Term]) -> Reduction<i64> {
    let mut stack: Vec<Entry> = Vec::with_capacity(terms.len());

    for term in terms.iter().rev() {
        match *term {
            Term::And => stack.push(Entry::Marker),
            Term::Value(value) => stack.push(Entry::Integer(value)),
            Term::Operator(Operator::Mean) => {
                let result = mean(&mut stack)?;
                stack.push(Entry::Integer(result));
            }
            Term::Operator(Operator::Dist) => {
                let result = dist(&mut stack)?;
                stack.push(Entry::Integer(result));
            }
            Term::Operator(operator) => {
                if stack.len() < 2 {
                    return Err(ErrorKind::InvalidExpression);
                }
                let a = pop_integer(&mut stack)?;
                let b = pop_integer(&mut stack)?;
                let result = binary(operator, a, b).ok_or(ErrorKind::InvalidOperations)?;
                stack.push(Entry::Integer(result));
            }
        }
    }

    match stack.as_slice() {
        [Entry::Integer(value)] => Ok(*value),
        _ => Err(ErrorKind::InvalidExpression),
    }
}

fn pop_integer(stack: &mut Vec<Entry>) -> Reduction<i64> {
    match stack.pop() {
        Some(Entry::Integer(value)) => Ok(value),
        _ => Err(ErrorKind::InvalidExpression),
    }
}

/// `None` signals an arithmetic fault.
fn binary(operator: Operator, a: i64, b: i64) -> Option<i64> {
    match operator {
        Operator::Add => a.checked_add(b),
        Operator::Sub => a.checked_sub(b),
        Operator::Mul => a.checked_mul(b),
        Operator::Div => floor_div(a, b),
        Operator::Mod => floor_div(a, b)
            .and_then(|q| b.checked_mul(q))
            .and_then(|p| a.checked_sub(p)),
        Operator::Raise => raise(a, b),
        Operator::Root => root(a, b),
        Operator::Mean | Operator::Dist => None,
    }
}

/// Quotient rounded toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn raise(base: i64, exponent: i64) -> Option<i64> {
    let odd = exponent % 2 != 0;
    match base {
        0 if exponent < 0 => None,
        1 => Some(1),
        -1 => Some(if odd { -1 } else { 1 }),
        _ if exponent < 0 => Some(0),
        _ => base.checked_pow(u32::try_from(exponent).ok()?),
    }
}

fn root(degree: i64, radicand: i64) -> Option<i64> {
    if degree == 0 || radicand < 0 {
        return None;
    }
    if degree < 0 {
        // radicand^(1/degree) lies in (0, 1] for every positive radicand
        return match radicand {
            0 => None,
            1 => Some(1),
            _ => Some(0),
        };
    }
    let degree = u32::try_from(degree).unwrap_or(u32::MAX);
    i64::try_from(integer_root(radicand as u128, degree)).ok()
}

/// Largest `r` with `r^degree <= n`.
fn integer_root(n: u128, degree: u32) -> u128 {
    if n < 2 || degree == 1 {
        return n;
    }
    let fits = |r: u128| r.checked_pow(degree).map_or(false, |p| p <= n);

    let mut r = (n as f64).powf(1.0 / f64::from(degree)) as u128;
    while r > 0 && !fits(r) {
        r -= 1;
    }
    while fits(r + 1) {
        r += 1;
    }
    r
}

fn dist(stack: &mut Vec<Entry>) -> Reduction<i64> {
    if stack.len() < 5 {
        return Err(ErrorKind::InvalidExpression);
    }
    let x1 = pop_integer(stack)?;
    let y1 = pop_integer(stack)?;
    if stack.pop() != Some(Entry::Marker) {
        return Err(ErrorKind::InvalidExpression);
    }
    let x2 = pop_integer(stack)?;
    let y2 = pop_integer(stack)?;

    let dx = i128::from(x1) - i128::from(x2);
    let dy = i128::from(y1) - i128::from(y2);
    let squared = dx
        .checked_mul(dx)
        .and_then(|x| dy.checked_mul(dy).and_then(|y| x.checked_add(y)))
        .ok_or(ErrorKind::InvalidOperations)?;

    i64::try_from(integer_root(squared as u128, 2)).map_err(|_| ErrorKind::InvalidOperations)
}

/// Drains every integer on top of the stack, stopping at a marker.
fn mean(stack: &mut Vec<Entry>) -> Reduction<i64> {
    let mut sum: i128 = 0;
    let mut count: i128 = 0;
    while let Some(Entry::Integer(value)) = stack.last() {
        sum += i128::from(*value);
        count += 1;
        stack.pop();
    }
    if count == 0 {
        // An AND marker on top leaves nothing to average over.
        return match stack.last() {
            Some(Entry::Marker) => Err(ErrorKind::InvalidOperations),
            _ => Err(ErrorKind::InvalidExpression),
        };
    }
    i64::try_from(sum.div_euclid(count)).map_err(|_| ErrorKind::InvalidOperations)
}
