//! Central table of operator spellings, built-in type names, error messages,
//! and exit codes.
//!
//! Every other component consults this module instead of re-spelling a
//! keyword or error string inline, so the source-language vocabulary lives
//! in exactly one place.

/// Addition. Operands and result: `int`.
pub const OP_ADD: &str = "+";
/// Subtraction. Operands and result: `int`.
pub const OP_SUB: &str = "-";
/// Multiplication. Operands and result: `int`.
pub const OP_MUL: &str = "*";
/// Division (signed). Operands and result: `int`.
pub const OP_DIV: &str = "/";
/// Modulus (signed). Operands and result: `int`.
pub const OP_MOD: &str = "%";
/// Less-than. Operands: `int`, result: `bool`.
pub const OP_LT: &str = "<";
/// Less-or-equal. Operands: `int`, result: `bool`.
pub const OP_LE: &str = "<=";
/// Greater-than. Operands: `int`, result: `bool`.
pub const OP_GT: &str = ">";
/// Greater-or-equal. Operands: `int`, result: `bool`.
pub const OP_GE: &str = ">=";
/// Equality. Operands: same type, result: `bool`.
pub const OP_EQ: &str = "==";
/// Inequality. Operands: same type, result: `bool`.
pub const OP_NE: &str = "!=";
/// Short-circuit logical and. Operands and result: `bool`.
pub const OP_AND: &str = "&&";
/// Short-circuit logical or. Operands and result: `bool`.
pub const OP_OR: &str = "||";

/// Spelling that lowers to an arithmetic shift-left, per the source
/// grammar. The constant's *name* documents the IR operation it maps to;
/// the spelling itself is fixed by the language and is intentionally
/// preserved even though it reads as the "right shift" spelling at first
/// glance — this is inherited, observable behavior, not a bug to silently
/// fix.
pub const OP_SHL: &str = "<<";
/// Spelling that lowers to an arithmetic shift-right (signed). See
/// [`OP_SHL`] for the naming note.
pub const OP_SHR: &str = ">>";

/// Logical negation. Operand: `bool`, result: `bool`.
pub const OP_NOT: &str = "!";
/// Arithmetic negation, lowered as `0 - x`. Operand and result: `int`.
pub const OP_NEG: &str = "-";

/// Array-length sentinel meaning "this FieldVarDecl is a scalar, not an
/// array".
pub const SCALAR: i64 = 0;

/// Built-in type name spellings, as they appear in the source language and
/// are passed to [`crate::ir::Builder::type_of`].
pub mod type_name {
    pub const VOID: &str = "void";
    pub const INT: &str = "int";
    pub const BOOL: &str = "bool";
    pub const STRING: &str = "string";
}

/// The name the driver looks up after phase-2 lowering completes.
pub const ENTRY_POINT_NAME: &str = "main";

/// Human-readable error message templates. Kept centralized so the wording
/// a user sees is consistent regardless of which lowering rule raised it.
pub mod messages {
    pub fn undeclared_identifier(name: &str) -> String {
        format!("undeclared identifier '{name}'")
    }

    pub fn arity_mismatch(callee: &str, expected: usize, got: usize) -> String {
        format!(
            "'{callee}' expects {expected} argument(s), got {got}"
        )
    }

    pub fn assign_type_mismatch(name: &str) -> String {
        format!("cannot assign value of a different type to '{name}'")
    }

    pub fn assign_bool_to_int(name: &str) -> String {
        format!("cannot assign boolean to integer variable '{name}'")
    }

    pub fn binary_operand_mismatch(op: &str) -> String {
        format!("operand type mismatch for operator '{op}'")
    }

    pub fn unary_operand_mismatch(op: &str) -> String {
        format!("operand type mismatch for unary operator '{op}'")
    }

    pub fn return_type_mismatch(function: &str) -> String {
        format!("return expression type does not match declared return type of '{function}'")
    }

    pub fn invalid_array_size(name: &str) -> String {
        format!("array '{name}' must have a size of at least 1")
    }

    pub fn invalid_type_name(name: &str) -> String {
        format!("'{name}' is not a known type")
    }

    pub fn no_main() -> String {
        "program does not define a 'main' function".to_string()
    }

    pub fn invalid_operator(op: &str) -> String {
        format!("internal error: '{op}' is not a recognized operator spelling")
    }

    pub fn redeclared_in_scope(name: &str) -> String {
        format!("'{name}' is already declared in this scope")
    }

    pub fn non_constant_initializer(name: &str) -> String {
        format!("initializer for '{name}' is not a constant expression")
    }
}

/// Exit codes reserved for fatal lowering errors.
///
/// The current design surfaces a single nonzero code for every semantic
/// failure (see [`GENERIC_FAILURE`]); the other constants are reserved for
/// a future pass that differentiates failure classes at the process-exit
/// boundary, outside this core's scope.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERIC_FAILURE: i32 = 1;
    pub const ASSIGNMENT_MISMATCH: i32 = 2;
    pub const COMPUTE_MISMATCH: i32 = 3;
    pub const UNDECLARED_VARIABLE: i32 = 4;
    pub const NO_MAIN: i32 = 5;
}
