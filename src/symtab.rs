//! The lexically-scoped symbol table.
//!
//! A stack of frames, searched top-down on lookup. Frames 0 and 1 are
//! reserved by convention rather than by any special-cased type: frame 0
//! holds `extern` prototypes, frame 1 holds user-defined function headers,
//! and frame 2 onward are ordinary block scopes pushed/popped as the
//! lowering engine enters and leaves braces. Binding a name into frame 0 or
//! 1 from inside a nested block is impossible through the public API —
//! `insert` only ever touches the topmost frame, and `insert_extern`/
//! `insert_function` are the only way to reach the reserved frames.
//!
//! Externs and user functions must stay visible from any nested block
//! without being shadowable by a block-local redeclaration of the same
//! name, which is why they live in their own reserved frames rather than
//! an ordinary pushed scope.

use std::collections::HashMap;

use crate::ir::IrType;

/// Frame index reserved for `extern` prototypes.
pub const EXTERN_FRAME: usize = 0;
/// Frame index reserved for user-defined function headers.
pub const FUNCTION_FRAME: usize = 1;

/// What a name in scope refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageHandle {
    /// A local variable: an `alloca`'d stack slot holding a scalar.
    Local { ptr: String, ty: IrType },
    /// A global scalar: a module-level `@name` holding one value.
    Global { ptr: String, ty: IrType },
    /// A global array: a module-level `@name` of `len` elements of `ty`,
    /// addressed through a GEP on every access. Arrays are always global —
    /// the source language has no local array declarations.
    Array { ptr: String, ty: IrType, len: i64 },
    /// A callable: either an `extern` prototype or a user-defined function
    /// header, depending on which frame it was registered into.
    Function {
        name: String,
        ret: IrType,
        params: Vec<IrType>,
    },
}

impl StorageHandle {
    /// The element type stored behind this handle: the pointee type for
    /// `Local`/`Global`/`Array`, the return type for `Function`.
    pub fn element_type(&self) -> IrType {
        match self {
            StorageHandle::Local { ty, .. }
            | StorageHandle::Global { ty, .. }
            | StorageHandle::Array { ty, .. } => *ty,
            StorageHandle::Function { ret, .. } => *ret,
        }
    }
}

/// The scope stack threaded through a single compilation.
#[derive(Debug, Default)]
pub struct SymbolTable {
    frames: Vec<HashMap<String, StorageHandle>>,
}

impl SymbolTable {
    /// A fresh table with the two reserved frames already open. Block
    /// scopes are pushed on top as lowering enters each function/block.
    pub fn new() -> Self {
        SymbolTable {
            frames: vec![HashMap::new(), HashMap::new()],
        }
    }

    /// Open a new block scope.
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Close the innermost block scope.
    ///
    /// # Panics
    ///
    /// Panics if called with no block scope open (i.e. with only the two
    /// reserved frames left) — that is always a lowering-engine bug, never
    /// a property of the input program.
    pub fn pop(&mut self) {
        assert!(
            self.frames.len() > FUNCTION_FRAME + 1,
            "attempted to pop a reserved frame"
        );
        self.frames.pop();
    }

    /// Bind `name` in the innermost open scope, shadowing any outer
    /// binding of the same name.
    pub fn insert(&mut self, name: String, handle: StorageHandle) {
        self.frames
            .last_mut()
            .expect("symbol table always has at least the reserved frames")
            .insert(name, handle);
    }

    /// Bind `name` into the extern frame.
    pub fn insert_extern(&mut self, name: String, handle: StorageHandle) {
        self.frames[EXTERN_FRAME].insert(name, handle);
    }

    /// Bind `name` into the function-header frame.
    pub fn insert_function(&mut self, name: String, handle: StorageHandle) {
        self.frames[FUNCTION_FRAME].insert(name, handle);
    }

    /// Resolve `name`, searching from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<&StorageHandle> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// `true` if `name` is already bound in the innermost open scope —
    /// used to reject a local redeclaring a name already live in the same
    /// block.
    pub fn is_bound_in_top_frame(&self, name: &str) -> bool {
        self.frames
            .last()
            .expect("symbol table always has at least the reserved frames")
            .contains_key(name)
    }

    /// `true` if `name` is already bound in the extern frame.
    pub fn is_bound_in_extern_frame(&self, name: &str) -> bool {
        self.frames[EXTERN_FRAME].contains_key(name)
    }

    /// `true` if `name` is already bound in the function/top-level frame.
    pub fn is_bound_in_function_frame(&self, name: &str) -> bool {
        self.frames[FUNCTION_FRAME].contains_key(name)
    }

    /// `true` if `name` is bound as a callable in the extern or function
    /// frame.
    pub fn is_callable(&self, name: &str) -> bool {
        matches!(
            self.frames[EXTERN_FRAME].get(name),
            Some(StorageHandle::Function { .. })
        ) || matches!(
            self.frames[FUNCTION_FRAME].get(name),
            Some(StorageHandle::Function { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut st = SymbolTable::new();
        st.push();
        st.insert(
            "x".to_string(),
            StorageHandle::Local {
                ptr: "%x".to_string(),
                ty: IrType::Int,
            },
        );
        st.push();
        st.insert(
            "x".to_string(),
            StorageHandle::Local {
                ptr: "%x.1".to_string(),
                ty: IrType::Bool,
            },
        );
        assert_eq!(st.lookup("x").unwrap().element_type(), IrType::Bool);
        st.pop();
        assert_eq!(st.lookup("x").unwrap().element_type(), IrType::Int);
        st.pop();
        assert!(st.lookup("x").is_none());
    }

    #[test]
    fn externs_and_functions_are_visible_from_a_nested_block() {
        let mut st = SymbolTable::new();
        st.insert_extern(
            "puts".to_string(),
            StorageHandle::Function {
                name: "puts".to_string(),
                ret: IrType::Int,
                params: vec![IrType::Ptr],
            },
        );
        st.insert_function(
            "helper".to_string(),
            StorageHandle::Function {
                name: "helper".to_string(),
                ret: IrType::Void,
                params: vec![],
            },
        );
        st.push();
        st.push();
        assert!(st.is_callable("puts"));
        assert!(st.is_callable("helper"));
        assert!(!st.is_callable("nope"));
    }

    #[test]
    #[should_panic(expected = "reserved frame")]
    fn popping_a_reserved_frame_panics() {
        let mut st = SymbolTable::new();
        st.pop();
    }
}
