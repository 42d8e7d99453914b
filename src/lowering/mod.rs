//! The traversal that walks an AST and drives the LLIR facade and symbol
//! table.
//!
//! Split by concern across this module's files: `decl.rs` is phase-1
//! top-level declaration, `function_body.rs` is phase-2 body emission,
//! `stmt.rs` and `expr.rs` are the statement/expression dispatch tables.
//! All four are `impl LoweringContext` blocks over the one type defined
//! here.

mod decl;
mod expr;
mod function_body;
mod stmt;

use std::collections::VecDeque;

use crate::config::PointerWidth;
use crate::ir::{Builder, IrType, Module, Value};
use crate::symtab::SymbolTable;

/// Everything a single compilation needs threaded through it: the facade,
/// the symbol table, the loop-target stacks, and the bookkeeping for
/// whichever function body is currently being emitted.
///
/// An explicit value, not process-wide state. Two `LoweringContext`s may
/// exist at once (e.g. on separate
/// threads, each compiling a different program) without interfering with
/// each other.
pub(crate) struct LoweringContext {
    module: Module,
    builder: Builder,
    symtab: SymbolTable,
    break_targets: Vec<String>,
    continue_targets: Vec<String>,
    /// Synthetic per-call argument registers handed out by
    /// `Builder::begin_function`, consumed one at a time as the prepended
    /// `FunctionParam` statements are lowered.
    pending_params: VecDeque<Value>,
    current_return_type: IrType,
    current_function_name: String,
}

impl LoweringContext {
    pub(crate) fn new(module_name: impl Into<String>, pointer_width: PointerWidth) -> Self {
        LoweringContext {
            module: Module::new(module_name),
            builder: Builder::new(pointer_width),
            symtab: SymbolTable::new(),
            break_targets: Vec::new(),
            continue_targets: Vec::new(),
            pending_params: VecDeque::new(),
            current_return_type: IrType::Void,
            current_function_name: String::new(),
        }
    }

    pub(crate) fn module(&self) -> &Module {
        &self.module
    }

    pub(crate) fn into_module(self) -> Module {
        self.module
    }
}
