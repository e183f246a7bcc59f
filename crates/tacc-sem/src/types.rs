//! Type compatibility rules: numeric classification, arithmetic result
//! types, and the assignment-coercion table from §4.4.

use tacc_par::Type;

/// `char` and `int` both participate in integer arithmetic and in
/// integral-only contexts (conditions, `%`, logical operators).
pub fn is_integral(ty: Type) -> bool {
    matches!(ty, Type::Int | Type::Char)
}

pub fn is_numeric(ty: Type) -> bool {
    matches!(ty, Type::Int | Type::Float | Type::Char)
}

/// The result type of a binary arithmetic operator (`+ - * /`) over two
/// numeric operand types: `char` promotes to `int`; if either side is
/// `float`, the result is `float`.
pub fn arithmetic_result(lhs: Type, rhs: Type) -> Option<Type> {
    if !is_numeric(lhs) || !is_numeric(rhs) {
        return None;
    }
    if lhs == Type::Float || rhs == Type::Float {
        Some(Type::Float)
    } else {
        Some(Type::Int)
    }
}

/// Whether a value of type `rhs` may be assigned into a variable
/// declared `lhs`, per the coercion table in §4.4.5:
///
/// | lhs \ rhs | int | float | char |
/// |-----------|-----|-------|------|
/// | int       | ok  | ERROR | ok   |
/// | float     | ok  | ok    | ok   |
/// | char      | ok  | ERROR | ok   |
pub fn is_assignable(lhs: Type, rhs: Type) -> bool {
    match (lhs, rhs) {
        (_, _) if lhs == rhs => true,
        (Type::Float, _) => true, // widening: anything numeric -> float
        (_, Type::Float) => false, // narrowing: float -> int/char
        (Type::Int, Type::Char) | (Type::Char, Type::Int) => true,
        _ => false,
    }
}
