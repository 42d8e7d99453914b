//! Compile error type.
//!
//! Every fatal condition raised while lowering an AST produces a
//! [`CompileError`] value propagated with `?`. Nothing in this crate
//! panics or calls `process::exit` on a semantic error — that mapping
//! belongs to a driver outside this core's scope.

use crate::registry::exit_code;

/// A fatal error surfaced while lowering an AST to LLIR.
///
/// All variants are terminal: the lowering that raised one is expected to
/// unwind immediately via `?` and discard whatever partial IR it had built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A variable, array, or function name had no binding in any live
    /// scope frame.
    UndeclaredIdentifier(String),
    /// A call site passed a different number of arguments than the
    /// callee's declared arity.
    ArityMismatch {
        callee: String,
        expected: usize,
        got: usize,
    },
    /// An assignment's right-hand side type did not match the storage
    /// slot's declared type.
    AssignmentTypeMismatch(String),
    /// A binary operator's operands violated its type rule.
    BinaryOperandMismatch(String),
    /// A unary operator's operand violated its type rule.
    UnaryOperandMismatch(String),
    /// A `return` expression's type did not match the enclosing function's
    /// declared return type.
    ReturnTypeMismatch(String),
    /// A `FieldVarDecl` declared an array of size 0.
    InvalidArraySize(String),
    /// [`crate::ir::Builder::type_of`] was asked to resolve a type name it
    /// does not recognize.
    InvalidTypeName(String),
    /// Lowering finished without finding a function named `main`.
    NoMainFunction,
    /// A `Binary`/`Unary` node carried an operator spelling the registry
    /// does not recognize. This indicates a parser/lowering mismatch, not
    /// a user-facing source error.
    InvalidOperator(String),
    /// A name was declared twice in the same scope frame.
    RedeclaredInScope(String),
    /// A `FieldVarDef`'s initializer did not fold to a constant value.
    NonConstantInitializer(String),
}

impl CompileError {
    /// The process exit code a driver should use for this error class.
    ///
    /// The current design collapses all of these to
    /// [`exit_code::GENERIC_FAILURE`] at the process boundary; the
    /// per-variant codes are reserved for future differentiation.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::AssignmentTypeMismatch(_) => exit_code::ASSIGNMENT_MISMATCH,
            CompileError::BinaryOperandMismatch(_)
            | CompileError::UnaryOperandMismatch(_)
            | CompileError::ReturnTypeMismatch(_) => exit_code::COMPUTE_MISMATCH,
            CompileError::UndeclaredIdentifier(_) => exit_code::UNDECLARED_VARIABLE,
            CompileError::NoMainFunction => exit_code::NO_MAIN,
            _ => exit_code::GENERIC_FAILURE,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::registry::messages;
        match self {
            CompileError::UndeclaredIdentifier(name) => {
                write!(f, "{}", messages::undeclared_identifier(name))
            }
            CompileError::ArityMismatch {
                callee,
                expected,
                got,
            } => write!(f, "{}", messages::arity_mismatch(callee, *expected, *got)),
            CompileError::AssignmentTypeMismatch(name) => {
                write!(f, "{}", messages::assign_type_mismatch(name))
            }
            CompileError::BinaryOperandMismatch(op) => {
                write!(f, "{}", messages::binary_operand_mismatch(op))
            }
            CompileError::UnaryOperandMismatch(op) => {
                write!(f, "{}", messages::unary_operand_mismatch(op))
            }
            CompileError::ReturnTypeMismatch(function) => {
                write!(f, "{}", messages::return_type_mismatch(function))
            }
            CompileError::InvalidArraySize(name) => {
                write!(f, "{}", messages::invalid_array_size(name))
            }
            CompileError::InvalidTypeName(name) => {
                write!(f, "{}", messages::invalid_type_name(name))
            }
            CompileError::NoMainFunction => write!(f, "{}", messages::no_main()),
            CompileError::InvalidOperator(op) => write!(f, "{}", messages::invalid_operator(op)),
            CompileError::RedeclaredInScope(name) => {
                write!(f, "{}", messages::redeclared_in_scope(name))
            }
            CompileError::NonConstantInitializer(name) => {
                write!(f, "{}", messages::non_constant_initializer(name))
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Convenience alias used throughout the lowering engine.
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_as_the_taxonomy_message() {
        let err = CompileError::UndeclaredIdentifier("x".to_string());
        assert_eq!(err.to_string(), "undeclared identifier 'x'");
    }

    #[test]
    fn exit_codes_follow_the_reserved_taxonomy() {
        assert_eq!(
            CompileError::NoMainFunction.exit_code(),
            exit_code::NO_MAIN
        );
        assert_eq!(
            CompileError::InvalidOperator("@".into()).exit_code(),
            exit_code::GENERIC_FAILURE
        );
    }
}
