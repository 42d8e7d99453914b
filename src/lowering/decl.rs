//! Phase 1: declare every top-level name before any function body is
//! emitted, so forward references between top-level functions resolve.

use tracing::debug;

use crate::ast::{Node, SCALAR};
use crate::errors::{CompileError, CompileResult};
use crate::ir::Value;
use crate::registry;

use super::LoweringContext;

impl LoweringContext {
    /// Declare one top-level node. For a `Function`, this also mutates its
    /// body in place, prepending one `FunctionParam` pseudo-node per
    /// declared parameter — phase 2 picks those up to allocate and bind
    /// the parameter slots before any user statement runs.
    pub(crate) fn declare_top_level(&mut self, node: &mut Node) -> CompileResult<()> {
        match node {
            Node::Extern {
                return_type,
                name,
                param_types,
            } => {
                if self.symtab.is_bound_in_extern_frame(name) {
                    return Err(CompileError::RedeclaredInScope(name.clone()));
                }
                debug!(target = "lowering::decl", extern_name = %name, "declaring extern");
                let ret = self.builder.type_of(return_type)?;
                let params = param_types
                    .iter()
                    .map(|t| self.builder.type_of(t))
                    .collect::<CompileResult<Vec<_>>>()?;
                self.builder
                    .extern_fn(&mut self.module, &mut self.symtab, ret, name, &params);
                Ok(())
            }
            Node::FieldVarDecl { ty, name, size } => {
                if self.symtab.is_bound_in_function_frame(name) {
                    return Err(CompileError::RedeclaredInScope(name.clone()));
                }
                let ir_ty = self.builder.type_of(ty)?;
                if *size == SCALAR {
                    debug!(target = "lowering::decl", field = %name, "declaring scalar global");
                    self.builder
                        .global_scalar(&mut self.module, &mut self.symtab, ir_ty, name);
                    Ok(())
                } else if *size >= 1 {
                    debug!(target = "lowering::decl", field = %name, len = *size, "declaring array global");
                    self.builder
                        .global_array(&mut self.module, &mut self.symtab, ir_ty, name, *size);
                    Ok(())
                } else {
                    Err(CompileError::InvalidArraySize(name.clone()))
                }
            }
            Node::FieldVarDef { ty, name, init } => {
                if self.symtab.is_bound_in_function_frame(name) {
                    return Err(CompileError::RedeclaredInScope(name.clone()));
                }
                let ir_ty = self.builder.type_of(ty)?;
                let value = self.eval_constant(init, name)?;
                if value.ty() != ir_ty {
                    return Err(CompileError::AssignmentTypeMismatch(name.clone()));
                }
                debug!(target = "lowering::decl", field = %name, "declaring initialized global");
                self.builder.global_scalar_init(
                    &mut self.module,
                    &mut self.symtab,
                    ir_ty,
                    name,
                    &value,
                );
                Ok(())
            }
            Node::Function {
                return_type,
                name,
                params,
                body,
            } => {
                if self.symtab.is_bound_in_function_frame(name) {
                    return Err(CompileError::RedeclaredInScope(name.clone()));
                }
                debug!(target = "lowering::decl", function = %name, "declaring function header");
                let ret = self.builder.type_of(return_type)?;
                let param_types = params
                    .iter()
                    .map(|p| self.builder.type_of(&p.ty))
                    .collect::<CompileResult<Vec<_>>>()?;
                self.builder
                    .fn_header(&mut self.symtab, ret, name, &param_types);
                let mut prelude: Vec<Node> = params
                    .iter()
                    .map(|p| Node::FunctionParam {
                        ty: p.ty.clone(),
                        name: p.name.clone(),
                    })
                    .collect();
                prelude.append(body);
                *body = prelude;
                Ok(())
            }
            other => unreachable!("{other:?} is not a top-level declaration node"),
        }
    }

    /// Fold a constant-expression AST node to a literal [`Value`], the way
    /// a `FieldVarDef` initializer must. Anything beyond a literal (or its
    /// arithmetic negation) is rejected — globals need a compile-time
    /// constant, not an instruction sequence, and no block is open yet to
    /// emit one into.
    fn eval_constant(&mut self, node: &Node, owner_name: &str) -> CompileResult<Value> {
        match node {
            Node::IntConst(v) => Ok(self.builder.int_const(*v)),
            Node::BoolConst(v) => Ok(self.builder.bool_const(*v)),
            Node::StringConst(text) => {
                let bytes = super::expr::strip_quotes(text);
                Ok(self.builder.global_string(&mut self.module, &bytes))
            }
            Node::Unary { op, operand } if op == registry::OP_NEG => {
                let inner = self.eval_constant(operand, owner_name)?;
                match inner.ty() {
                    crate::ir::IrType::Int => {
                        let n: i32 = inner
                            .operand()
                            .parse()
                            .expect("int_const always prints a valid i32 literal");
                        Ok(self.builder.int_const(-n))
                    }
                    _ => Err(CompileError::NonConstantInitializer(owner_name.to_string())),
                }
            }
            _ => Err(CompileError::NonConstantInitializer(owner_name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointerWidth;

    fn ctx() -> LoweringContext {
        LoweringContext::new("t", PointerWidth::Width64)
    }

    #[test]
    fn extern_declares_and_registers() {
        let mut c = ctx();
        let mut node = Node::Extern {
            return_type: "int".to_string(),
            name: "puts".to_string(),
            param_types: vec!["string".to_string()],
        };
        c.declare_top_level(&mut node).unwrap();
        assert!(c.symtab.is_callable("puts"));
    }

    #[test]
    fn redeclaring_a_top_level_name_is_rejected() {
        let mut c = ctx();
        let mut first = Node::FieldVarDecl {
            ty: "int".to_string(),
            name: "a".to_string(),
            size: SCALAR,
        };
        c.declare_top_level(&mut first).unwrap();
        let mut second = Node::Function {
            return_type: "void".to_string(),
            name: "a".to_string(),
            params: vec![],
            body: vec![],
        };
        let err = c.declare_top_level(&mut second).unwrap_err();
        assert_eq!(err, CompileError::RedeclaredInScope("a".to_string()));
    }

    #[test]
    fn field_var_decl_rejects_zero_size() {
        let mut c = ctx();
        let mut node = Node::FieldVarDecl {
            ty: "int".to_string(),
            name: "bad".to_string(),
            size: 0,
        };
        let err = c.declare_top_level(&mut node).unwrap_err();
        assert_eq!(err, CompileError::InvalidArraySize("bad".to_string()));
    }

    #[test]
    fn field_var_def_folds_negated_constant() {
        let mut c = ctx();
        let mut node = Node::FieldVarDef {
            ty: "int".to_string(),
            name: "neg".to_string(),
            init: Box::new(Node::Unary {
                op: registry::OP_NEG.to_string(),
                operand: Box::new(Node::IntConst(5)),
            }),
        };
        c.declare_top_level(&mut node).unwrap();
        assert!(c.module.render().contains("@neg = global i32 -5"));
    }

    #[test]
    fn field_var_def_rejects_non_constant_initializer() {
        let mut c = ctx();
        let mut node = Node::FieldVarDef {
            ty: "int".to_string(),
            name: "bad".to_string(),
            init: Box::new(Node::VarRef("other".to_string())),
        };
        let err = c.declare_top_level(&mut node).unwrap_err();
        assert_eq!(err, CompileError::NonConstantInitializer("bad".to_string()));
    }

    #[test]
    fn function_header_prepends_one_function_param_per_declared_parameter() {
        let mut c = ctx();
        let mut node = Node::Function {
            return_type: "void".to_string(),
            name: "f".to_string(),
            params: vec![crate::ast::ParamDecl::new("int", "x")],
            body: vec![Node::return_void()],
        };
        c.declare_top_level(&mut node).unwrap();
        match node {
            Node::Function { body, .. } => {
                assert_eq!(body.len(), 2);
                assert!(matches!(body[0], Node::FunctionParam { .. }));
            }
            _ => unreachable!(),
        }
    }
}
