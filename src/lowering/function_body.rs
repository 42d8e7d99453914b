//! Phase 2: emit a function's body now that every top-level header
//! (including this one, and every other function's) is already declared.

use tracing::debug;

use crate::ast::Node;
use crate::errors::CompileResult;
use crate::ir::IrType;

use super::LoweringContext;

impl LoweringContext {
    /// Emit the body of a `Function` node. Must run after
    /// [`LoweringContext::declare_top_level`] has already prepended its
    /// `FunctionParam` pseudo-statements.
    pub(crate) fn emit_function_body(&mut self, node: &Node) -> CompileResult<()> {
        let Node::Function {
            return_type,
            name,
            params,
            body,
        } = node
        else {
            unreachable!("emit_function_body called on a non-Function node");
        };

        let ret = self.builder.type_of(return_type)?;
        let param_types = params
            .iter()
            .map(|p| self.builder.type_of(&p.ty))
            .collect::<CompileResult<Vec<_>>>()?;

        debug!(target = "lowering::function_body", function = %name, "entering phase 2");
        self.current_return_type = ret;
        self.current_function_name = name.clone();

        let incoming_args = self.builder.begin_function(name, ret, &param_types);
        self.pending_params = incoming_args.into();

        self.symtab.push();
        for stmt in body {
            self.lower_stmt(stmt)?;
        }
        self.builder.default_return();
        self.symtab.pop();

        self.builder.end_function(&mut self.module, name, ret);

        debug_assert!(
            self.pending_params.is_empty(),
            "every synthetic parameter register must be consumed by a FunctionParam statement"
        );
        debug_assert!(self.break_targets.is_empty());
        debug_assert!(self.continue_targets.is_empty());

        debug!(target = "lowering::function_body", function = %name, "phase 2 complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParamDecl;
    use crate::config::PointerWidth;

    #[test]
    fn emits_entry_block_and_default_return_for_an_empty_void_function() {
        let mut c = LoweringContext::new("t", PointerWidth::Width64);
        let mut node = Node::Function {
            return_type: "void".to_string(),
            name: "f".to_string(),
            params: vec![],
            body: vec![],
        };
        c.declare_top_level(&mut node).unwrap();
        c.emit_function_body(&node).unwrap();
        let rendered = c.into_module().render();
        assert!(rendered.contains("define void @f()"));
        assert!(rendered.contains("entry:"));
        assert!(rendered.contains("ret void"));
    }

    #[test]
    fn parameters_are_stored_into_allocas_before_the_first_user_statement() {
        let mut c = LoweringContext::new("t", PointerWidth::Width64);
        let mut node = Node::Function {
            return_type: "int".to_string(),
            name: "identity".to_string(),
            params: vec![ParamDecl::new("int", "x")],
            body: vec![Node::return_value(Node::VarRef("x".to_string()))],
        };
        c.declare_top_level(&mut node).unwrap();
        c.emit_function_body(&node).unwrap();
        let rendered = c.into_module().render();
        assert!(rendered.contains("%x = alloca i32"));
        assert!(rendered.contains("store i32 %arg0, ptr %x"));
        assert!(rendered.contains("ret i32"));
    }

    #[test]
    fn missing_return_in_a_non_void_function_gets_a_default() {
        let mut c = LoweringContext::new("t", PointerWidth::Width64);
        let mut node = Node::Function {
            return_type: "int".to_string(),
            name: "forgot".to_string(),
            params: vec![],
            body: vec![Node::VarDecl {
                ty: "int".to_string(),
                name: "unused".to_string(),
            }],
        };
        c.declare_top_level(&mut node).unwrap();
        c.emit_function_body(&node).unwrap();
        let rendered = c.into_module().render();
        assert!(rendered.contains("ret i32 0"));
    }
}
