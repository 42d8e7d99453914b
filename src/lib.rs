//! AST-to-LLIR lowering core for the Vela language compiler.
//!
//! This crate consumes a parsed Abstract Syntax Tree ([`ast::Node`]) and
//! lowers it to a module of SSA-form, LLVM-flavored intermediate
//! representation ([`ir::Module`]) suitable for a downstream optimizer and
//! native emitter — neither of which this crate owns. The lexer/parser that
//! produces the AST is likewise out of scope; [`driver::compile_program`]
//! is the sole entrypoint a host embeds.
//!
//! ```rust
//! use velac::ast::Node;
//! use velac::config::LoweringConfig;
//! use velac::driver::compile_program;
//!
//! let ast = vec![Node::Function {
//!     return_type: "int".to_string(),
//!     name: "main".to_string(),
//!     params: vec![],
//!     body: vec![Node::return_value(Node::IntConst(0))],
//! }];
//! let module = compile_program(ast, &LoweringConfig::new()).unwrap();
//! assert!(module.render().contains("ret i32 0"));
//! ```

pub mod ast;
pub mod config;
pub mod driver;
pub mod errors;
pub mod ir;
mod lowering;
pub mod registry;
pub mod symtab;

pub use config::LoweringConfig;
pub use driver::compile_program;
pub use errors::{CompileError, CompileResult};
pub use ir::Module;
