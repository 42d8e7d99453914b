//! SSA value handles.

use super::types::IrType;

/// A reference to an SSA value: either a register name (`%7`, `%x.addr`)
/// or a literal constant spelling (`5`, `true`) that can be used directly
/// wherever an operand is expected.
///
/// Constants don't need a defining instruction, so `int_const`/`bool_const`
/// return a `Value` without touching the builder's output buffer at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    text: String,
    pub ty: IrType,
}

impl Value {
    pub(crate) fn register(name: impl Into<String>, ty: IrType) -> Self {
        Value {
            text: format!("%{}", name.into()),
            ty,
        }
    }

    pub(crate) fn literal(text: impl Into<String>, ty: IrType) -> Self {
        Value {
            text: text.into(),
            ty,
        }
    }

    /// The operand spelling this value prints as in emitted instructions.
    pub fn operand(&self) -> &str {
        &self.text
    }

    pub fn ty(&self) -> IrType {
        self.ty
    }

    pub fn is_bool(&self) -> bool {
        self.ty == IrType::Bool
    }

    pub fn is_int(&self) -> bool {
        self.ty == IrType::Int
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_values_print_with_percent_sigil() {
        let v = Value::register("tmp0", IrType::Int);
        assert_eq!(v.operand(), "%tmp0");
        assert!(v.is_int());
    }

    #[test]
    fn literal_values_print_bare() {
        let v = Value::literal("true", IrType::Bool);
        assert_eq!(v.operand(), "true");
        assert!(v.is_bool());
    }
}
