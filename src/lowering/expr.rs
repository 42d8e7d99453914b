//! Expression lowering: every `Node` variant that yields a [`Value`].

use crate::ast::Node;
use crate::errors::CompileResult;
use crate::ir::Value;
use crate::registry;

use super::LoweringContext;

/// Strip the surrounding double-quote characters the parser includes in
/// every `StringConst`'s text. No escape processing — the source grammar's
/// lexer owns that, out of this core's scope.
pub(crate) fn strip_quotes(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        bytes[1..bytes.len() - 1].to_vec()
    } else {
        Vec::new()
    }
}

impl LoweringContext {
    pub(crate) fn lower_expr(&mut self, node: &Node) -> CompileResult<Value> {
        match node {
            Node::IntConst(v) => Ok(self.builder.int_const(*v)),
            Node::BoolConst(v) => Ok(self.builder.bool_const(*v)),
            Node::StringConst(text) => {
                let bytes = strip_quotes(text);
                Ok(self.builder.global_string(&mut self.module, &bytes))
            }
            Node::VarRef(name) => self.builder.read_local(&self.symtab, name),
            Node::ArrayRef { name, index } => {
                let idx = self.lower_expr(index)?;
                self.builder.array_load(&self.symtab, name, &idx)
            }
            Node::Call { callee, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.lower_expr(arg)?);
                }
                self.builder.call(&self.symtab, callee, &values)
            }
            Node::Unary { op, operand } => {
                let value = self.lower_expr(operand)?;
                self.builder.unary(op, &value)
            }
            Node::Binary { op, left, right } => self.lower_binary(op, left, right),
            other => unreachable!("{other:?} is not an expression node"),
        }
    }

    /// `&&`/`||` need control flow, not a single instruction — lower the
    /// left operand, open the right-hand block only if the left operand
    /// doesn't already decide the result, and let `Builder` close the join
    /// with a φ-node.
    fn lower_binary(&mut self, op: &str, left: &Node, right: &Node) -> CompileResult<Value> {
        if op == registry::OP_AND || op == registry::OP_OR {
            let lhs = self.lower_expr(left)?;
            let sc = self.builder.begin_short_circuit(op, &lhs)?;
            self.builder.start_block_with_label(&sc.rhs_block);
            let rhs = self.lower_expr(right)?;
            self.builder.finish_short_circuit(&sc, &rhs)
        } else {
            let lhs = self.lower_expr(left)?;
            let rhs = self.lower_expr(right)?;
            self.builder.binary(op, &lhs, &rhs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointerWidth;
    use crate::ir::IrType;

    fn ctx() -> LoweringContext {
        let mut c = LoweringContext::new("t", PointerWidth::Width64);
        c.builder.begin_function("f", IrType::Bool, &[]);
        c
    }

    #[test]
    fn strip_quotes_removes_exactly_the_outer_pair() {
        assert_eq!(strip_quotes("\"hi\""), b"hi".to_vec());
    }

    #[test]
    fn short_circuit_or_produces_a_bool_value() {
        let mut c = ctx();
        let node = Node::Binary {
            op: registry::OP_OR.to_string(),
            left: Box::new(Node::BoolConst(true)),
            right: Box::new(Node::BoolConst(false)),
        };
        let v = c.lower_expr(&node).unwrap();
        assert!(v.is_bool());
    }

    #[test]
    fn arithmetic_binary_rejects_bool_operands() {
        let mut c = ctx();
        let node = Node::Binary {
            op: registry::OP_ADD.to_string(),
            left: Box::new(Node::BoolConst(true)),
            right: Box::new(Node::IntConst(1)),
        };
        assert!(c.lower_expr(&node).is_err());
    }
}
