//! Statement lowering: every `Node` variant that produces no value, only
//! instructions, bindings, and control flow.

use tracing::debug;

use crate::ast::Node;
use crate::errors::{CompileError, CompileResult};

use super::LoweringContext;

impl LoweringContext {
    pub(crate) fn lower_stmt(&mut self, node: &Node) -> CompileResult<()> {
        match node {
            Node::FunctionParam { ty, name } => {
                let ir_ty = self.builder.type_of(ty)?;
                let incoming = self
                    .pending_params
                    .pop_front()
                    .expect("one synthetic argument register per declared parameter");
                self.builder
                    .store_param(&mut self.symtab, name, ir_ty, &incoming);
                Ok(())
            }
            Node::Block(stmts) => {
                self.symtab.push();
                for stmt in stmts {
                    self.lower_stmt(stmt)?;
                }
                self.symtab.pop();
                Ok(())
            }
            Node::VarDecl { ty, name } => {
                if self.symtab.is_bound_in_top_frame(name) {
                    return Err(CompileError::RedeclaredInScope(name.clone()));
                }
                let ir_ty = self.builder.type_of(ty)?;
                self.builder.decl_local(&mut self.symtab, ir_ty, name);
                Ok(())
            }
            Node::VarAssign { name, value } => {
                let v = self.lower_expr(value)?;
                self.builder.assign_local(&self.symtab, name, &v)
            }
            Node::ArrayAssign { name, index, value } => {
                let idx = self.lower_expr(index)?;
                let v = self.lower_expr(value)?;
                self.builder.array_store(&self.symtab, name, &idx, &v)
            }
            Node::If { cond, then_block } => self.lower_if(cond, then_block, None),
            Node::IfElse {
                cond,
                then_block,
                else_block,
            } => self.lower_if(cond, then_block, Some(else_block)),
            Node::While { cond, body } => self.lower_while(cond, body),
            Node::For {
                init,
                cond,
                update,
                body,
            } => self.lower_for(init, cond, update, body),
            Node::Return(expr) => self.lower_return(expr.as_deref()),
            Node::Break => {
                let target = self
                    .break_targets
                    .last()
                    .expect("break outside a loop is rejected by the grammar before lowering ever runs")
                    .clone();
                self.builder.br(&target);
                Ok(())
            }
            Node::Continue => {
                let target = self
                    .continue_targets
                    .last()
                    .expect("continue outside a loop is rejected by the grammar before lowering ever runs")
                    .clone();
                self.builder.br(&target);
                Ok(())
            }
            other => unreachable!("{other:?} is not a statement node"),
        }
    }

    fn lower_if(&mut self, cond: &Node, then_block: &Node, else_block: Option<&Node>) -> CompileResult<()> {
        let ifstart = self.builder.reserve_block("ifstart");
        self.builder.br(&ifstart);
        self.builder.start_block_with_label(&ifstart);

        let cond_value = self.lower_expr(cond)?;
        if !cond_value.is_bool() {
            return Err(CompileError::BinaryOperandMismatch("if-condition".to_string()));
        }

        let iftrue = self.builder.reserve_block("iftrue");
        let end = self.builder.reserve_block("end");

        match else_block {
            None => {
                self.builder.cond_br(&cond_value, &iftrue, &end);
                self.builder.start_block_with_label(&iftrue);
                self.lower_stmt(then_block)?;
                if !self.builder.is_terminated() {
                    self.builder.br(&end);
                }
            }
            Some(else_stmt) => {
                let iffalse = self.builder.reserve_block("iffalse");
                self.builder.cond_br(&cond_value, &iftrue, &iffalse);

                self.builder.start_block_with_label(&iftrue);
                self.lower_stmt(then_block)?;
                if !self.builder.is_terminated() {
                    self.builder.br(&end);
                }

                self.builder.start_block_with_label(&iffalse);
                self.lower_stmt(else_stmt)?;
                if !self.builder.is_terminated() {
                    self.builder.br(&end);
                }
            }
        }

        self.builder.start_block_with_label(&end);
        Ok(())
    }

    fn lower_while(&mut self, cond: &Node, body: &Node) -> CompileResult<()> {
        let loop_label = self.builder.reserve_block("loop");
        let body_label = self.builder.reserve_block("body");
        let end_label = self.builder.reserve_block("end");

        self.builder.br(&loop_label);
        self.builder.start_block_with_label(&loop_label);
        let cond_value = self.lower_expr(cond)?;
        if !cond_value.is_bool() {
            return Err(CompileError::BinaryOperandMismatch("while-condition".to_string()));
        }
        self.builder.cond_br(&cond_value, &body_label, &end_label);

        self.continue_targets.push(loop_label.clone());
        self.break_targets.push(end_label.clone());
        debug!(target = "lowering::stmt", %loop_label, "entering while body");

        self.builder.start_block_with_label(&body_label);
        self.lower_stmt(body)?;
        if !self.builder.is_terminated() {
            self.builder.br(&loop_label);
        }

        self.continue_targets.pop();
        self.break_targets.pop();

        self.builder.start_block_with_label(&end_label);
        Ok(())
    }

    fn lower_for(
        &mut self,
        init: &[Node],
        cond: &Node,
        update: &[Node],
        body: &Node,
    ) -> CompileResult<()> {
        for stmt in init {
            self.lower_stmt(stmt)?;
        }

        let loop_label = self.builder.reserve_block("loop");
        let body_label = self.builder.reserve_block("body");
        let next_label = self.builder.reserve_block("next");
        let end_label = self.builder.reserve_block("end");

        self.builder.br(&loop_label);
        self.builder.start_block_with_label(&loop_label);
        let cond_value = self.lower_expr(cond)?;
        if !cond_value.is_bool() {
            return Err(CompileError::BinaryOperandMismatch("for-condition".to_string()));
        }
        self.builder.cond_br(&cond_value, &body_label, &end_label);

        self.break_targets.push(end_label.clone());
        self.continue_targets.push(next_label.clone());

        self.builder.start_block_with_label(&body_label);
        self.lower_stmt(body)?;
        if !self.builder.is_terminated() {
            self.builder.br(&next_label);
        }

        self.builder.start_block_with_label(&next_label);
        for stmt in update {
            self.lower_stmt(stmt)?;
        }
        if !self.builder.is_terminated() {
            self.builder.br(&loop_label);
        }

        self.continue_targets.pop();
        self.break_targets.pop();

        self.builder.start_block_with_label(&end_label);
        Ok(())
    }

    fn lower_return(&mut self, expr: Option<&Node>) -> CompileResult<()> {
        match expr {
            None => {
                self.builder.ret(None);
                Ok(())
            }
            Some(e) => {
                let value = self.lower_expr(e)?;
                if value.ty() != self.current_return_type {
                    return Err(CompileError::ReturnTypeMismatch(
                        self.current_function_name.clone(),
                    ));
                }
                self.builder.ret(Some(&value));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointerWidth;
    use crate::ir::IrType;

    fn ctx_with_int_main() -> LoweringContext {
        let mut c = LoweringContext::new("t", PointerWidth::Width64);
        c.current_return_type = IrType::Int;
        c.current_function_name = "main".to_string();
        c.builder.begin_function("main", IrType::Int, &[]);
        c.symtab.push();
        c
    }

    #[test]
    fn break_outside_a_loop_panics_rather_than_emitting_bad_ir() {
        let mut c = ctx_with_int_main();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            c.lower_stmt(&Node::Break).ok();
        }));
        assert!(result.is_err());
    }

    #[test]
    fn for_loop_pushes_and_pops_its_targets_symmetrically() {
        let mut c = ctx_with_int_main();
        c.builder.decl_local(&mut c.symtab, IrType::Int, "i");
        let init = vec![Node::VarAssign {
            name: "i".to_string(),
            value: Box::new(Node::IntConst(0)),
        }];
        let cond = Node::Binary {
            op: "<".to_string(),
            left: Box::new(Node::VarRef("i".to_string())),
            right: Box::new(Node::IntConst(10)),
        };
        let update = vec![Node::VarAssign {
            name: "i".to_string(),
            value: Box::new(Node::Binary {
                op: "+".to_string(),
                left: Box::new(Node::VarRef("i".to_string())),
                right: Box::new(Node::IntConst(1)),
            }),
        }];
        let body = Node::Block(vec![]);
        c.lower_for(&init, &cond, &update, &body).unwrap();
        assert!(c.break_targets.is_empty());
        assert!(c.continue_targets.is_empty());
        let rendered_blocks = {
            c.builder.end_function(&mut c.module, "main", IrType::Int);
            c.module.render()
        };
        assert!(rendered_blocks.contains("loop"));
        assert!(rendered_blocks.contains("body"));
        assert!(rendered_blocks.contains("next"));
        assert!(rendered_blocks.contains("end"));
    }

    #[test]
    fn redeclaring_a_local_in_the_same_block_is_rejected() {
        let mut c = ctx_with_int_main();
        c.lower_stmt(&Node::VarDecl {
            ty: "int".to_string(),
            name: "x".to_string(),
        })
        .unwrap();
        let err = c
            .lower_stmt(&Node::VarDecl {
                ty: "int".to_string(),
                name: "x".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, CompileError::RedeclaredInScope("x".to_string()));
    }

    #[test]
    fn return_type_mismatch_is_rejected() {
        let mut c = ctx_with_int_main();
        let err = c
            .lower_stmt(&Node::return_value(Node::BoolConst(true)))
            .unwrap_err();
        assert_eq!(err, CompileError::ReturnTypeMismatch("main".to_string()));
    }
}
