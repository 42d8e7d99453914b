//! The program driver entrypoint: the one function this crate expects an
//! external caller (a CLI, a REPL, a language-server backend — all out of
//! this core's scope) to call.

use tracing::info;

use crate::ast::Node;
use crate::config::LoweringConfig;
use crate::errors::{CompileError, CompileResult};
use crate::ir::Module;
use crate::lowering::LoweringContext;
use crate::registry;

/// Lower a complete top-level AST to an LLIR [`Module`].
///
/// Takes the AST by value: it's mutated in place during phase 1 (each
/// `Function` node gets its parameter list prepended as synthetic
/// `FunctionParam` statements) and is never needed again afterward — it is
/// consumed once, then discarded.
///
/// Runs phase 1 (declare every extern, field, and function header) over
/// every top-level node in source order, then phase 2 (emit bodies) over
/// every `Function` node in the same order, then checks for `main` unless
/// `config` disables that check.
pub fn compile_program(mut ast: Vec<Node>, config: &LoweringConfig) -> CompileResult<Module> {
    info!(target = "driver", node_count = ast.len(), "starting compilation");
    let mut ctx = LoweringContext::new("vela", config.pointer_width());

    for node in ast.iter_mut() {
        ctx.declare_top_level(node)?;
    }
    info!(target = "driver", "phase 1 (declarations) complete");

    for node in &ast {
        if matches!(node, Node::Function { .. }) {
            ctx.emit_function_body(node)?;
        }
    }
    info!(target = "driver", "phase 2 (bodies) complete");

    if config.requires_main() && !ctx.module().has_function(registry::ENTRY_POINT_NAME) {
        return Err(CompileError::NoMainFunction);
    }

    Ok(ctx.into_module())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParamDecl;

    #[test]
    fn s1_minimal_main() {
        let ast = vec![Node::Function {
            return_type: "int".to_string(),
            name: "main".to_string(),
            params: vec![],
            body: vec![Node::return_value(Node::IntConst(0))],
        }];
        let module = compile_program(ast, &LoweringConfig::new()).unwrap();
        let rendered = module.render();
        assert!(rendered.contains("define i32 @main()"));
        assert!(rendered.contains("entry:"));
        assert!(rendered.contains("ret i32 0"));
    }

    #[test]
    fn s2_global_array_plus_indexed_write() {
        let ast = vec![
            Node::FieldVarDecl {
                ty: "int".to_string(),
                name: "a".to_string(),
                size: 4,
            },
            Node::Function {
                return_type: "int".to_string(),
                name: "main".to_string(),
                params: vec![],
                body: vec![
                    Node::ArrayAssign {
                        name: "a".to_string(),
                        index: Box::new(Node::IntConst(2)),
                        value: Box::new(Node::IntConst(7)),
                    },
                    Node::return_value(Node::ArrayRef {
                        name: "a".to_string(),
                        index: Box::new(Node::IntConst(2)),
                    }),
                ],
            },
        ];
        let module = compile_program(ast, &LoweringConfig::new()).unwrap();
        let rendered = module.render();
        assert!(rendered.contains("@a = global [4 x i32] zeroinitializer"));
        assert!(rendered.contains("getelementptr"));
        assert!(rendered.contains("store i32 7"));
    }

    #[test]
    fn s4_short_circuit_or_skips_the_call() {
        let ast = vec![
            Node::Extern {
                return_type: "bool".to_string(),
                name: "f".to_string(),
                param_types: vec![],
            },
            Node::Function {
                return_type: "bool".to_string(),
                name: "main".to_string(),
                params: vec![],
                body: vec![Node::return_value(Node::Binary {
                    op: "||".to_string(),
                    left: Box::new(Node::BoolConst(true)),
                    right: Box::new(Node::Call {
                        callee: "f".to_string(),
                        args: vec![],
                    }),
                })],
            },
        ];
        let module = compile_program(ast, &LoweringConfig::new()).unwrap();
        let rendered = module.render();
        assert!(rendered.contains("noskct"));
        assert!(rendered.contains("skctend"));
        assert!(rendered.contains("phi i1"));
    }

    #[test]
    fn s5_bool_to_int_call_coercion() {
        let ast = vec![
            Node::Extern {
                return_type: "void".to_string(),
                name: "takes_int".to_string(),
                param_types: vec!["int".to_string()],
            },
            Node::Function {
                return_type: "void".to_string(),
                name: "main".to_string(),
                params: vec![],
                body: vec![Node::return_value(Node::Call {
                    callee: "takes_int".to_string(),
                    args: vec![Node::BoolConst(true)],
                })],
            },
        ];
        let module = compile_program(ast, &LoweringConfig::new()).unwrap();
        let rendered = module.render();
        let zext_pos = rendered.find("zext i1 true to i32").unwrap();
        let call_pos = rendered.find("call void @takes_int(i32").unwrap();
        assert!(zext_pos < call_pos);
    }

    #[test]
    fn s6_assigning_bool_to_int_variable_is_rejected() {
        let ast = vec![Node::Function {
            return_type: "int".to_string(),
            name: "main".to_string(),
            params: vec![],
            body: vec![
                Node::VarDecl {
                    ty: "int".to_string(),
                    name: "x".to_string(),
                },
                Node::VarAssign {
                    name: "x".to_string(),
                    value: Box::new(Node::BoolConst(true)),
                },
                Node::return_value(Node::VarRef("x".to_string())),
            ],
        }];
        let err = compile_program(ast, &LoweringConfig::new()).unwrap_err();
        assert_eq!(err, CompileError::AssignmentTypeMismatch("x".to_string()));
    }

    #[test]
    fn s6_returning_bool_from_an_int_function_is_rejected() {
        let ast = vec![Node::Function {
            return_type: "int".to_string(),
            name: "main".to_string(),
            params: vec![],
            body: vec![Node::return_value(Node::BoolConst(true))],
        }];
        let err = compile_program(ast, &LoweringConfig::new()).unwrap_err();
        assert_eq!(err, CompileError::ReturnTypeMismatch("main".to_string()));
    }

    #[test]
    fn s7_missing_main_is_rejected_by_default() {
        let ast = vec![Node::Extern {
            return_type: "int".to_string(),
            name: "puts".to_string(),
            param_types: vec!["string".to_string()],
        }];
        let err = compile_program(ast, &LoweringConfig::new()).unwrap_err();
        assert_eq!(err, CompileError::NoMainFunction);
    }

    #[test]
    fn missing_main_is_allowed_when_the_config_disables_the_check() {
        let ast = vec![Node::Extern {
            return_type: "int".to_string(),
            name: "puts".to_string(),
            param_types: vec!["string".to_string()],
        }];
        let module =
            compile_program(ast, &LoweringConfig::new().require_main(false)).unwrap();
        assert!(!module.has_function("main"));
    }

    #[test]
    fn function_with_a_parameter_stores_it_before_use() {
        let ast = vec![Node::Function {
            return_type: "int".to_string(),
            name: "identity".to_string(),
            params: vec![ParamDecl::new("int", "x")],
            body: vec![Node::return_value(Node::VarRef("x".to_string()))],
        }];
        let module = compile_program(ast, &LoweringConfig::new().require_main(false)).unwrap();
        let rendered = module.render();
        assert!(rendered.contains("store i32 %arg0, ptr %x"));
    }
}
