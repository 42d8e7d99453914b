//! The closed set of AST node kinds this core accepts as input.
//!
//! The parser that produces these trees is out of this crate's scope;
//! `Node` only needs to be a faithful, owned representation of what that
//! parser hands us. This is a single tagged enum rather than a class
//! hierarchy with virtual dispatch — the lowering engine
//! (`crate::lowering`) supplies the one dispatching function that matches
//! on it exhaustively.

/// A declared function parameter: `(type, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub ty: String,
    pub name: String,
}

impl ParamDecl {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        ParamDecl {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Sentinel used in [`Node::FieldVarDecl`] to mean "this is a scalar, not
/// an array". Re-exported from [`crate::registry::SCALAR`] for
/// convenience when building trees by hand (e.g. in tests).
pub const SCALAR: i64 = crate::registry::SCALAR;

/// One node of the AST this crate lowers.
///
/// `Box`/`Vec` fields hold the owned sub-trees; there is no shared
/// ownership and no lifetime parameter — identifiers, operator spellings,
/// and literal text are all owned `String`s, never borrowed pointers into
/// parser-owned memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A top-level `extern` prototype.
    Extern {
        return_type: String,
        name: String,
        param_types: Vec<String>,
    },
    /// A top-level global field variable with no initializer.
    /// `size == SCALAR` means a scalar; `size >= 1` means an array of that
    /// length. `size == 0` (and not `SCALAR`) is a compile error.
    FieldVarDecl { ty: String, name: String, size: i64 },
    /// A top-level global field variable with a constant initializer.
    FieldVarDef {
        ty: String,
        name: String,
        init: Box<Node>,
    },
    /// A top-level function definition.
    Function {
        return_type: String,
        name: String,
        params: Vec<ParamDecl>,
        body: Vec<Node>,
    },
    /// Pseudo-node prepended to a function's statement list during phase-1
    /// lowering, one per declared parameter. Never appears in a
    /// parser-constructed tree; synthesized by
    /// `crate::lowering::decl::declare_function`.
    FunctionParam { ty: String, name: String },
    /// A brace-delimited statement list that opens and closes its own
    /// scope frame.
    Block(Vec<Node>),
    VarDecl { ty: String, name: String },
    VarAssign { name: String, value: Box<Node> },
    ArrayAssign {
        name: String,
        index: Box<Node>,
        value: Box<Node>,
    },
    If { cond: Box<Node>, then_block: Box<Node> },
    IfElse {
        cond: Box<Node>,
        then_block: Box<Node>,
        else_block: Box<Node>,
    },
    While { cond: Box<Node>, body: Box<Node> },
    /// `init`/`update` are non-empty lists of assignment statements, per
    /// the source grammar.
    For {
        init: Vec<Node>,
        cond: Box<Node>,
        update: Vec<Node>,
        body: Box<Node>,
    },
    Return(Option<Box<Node>>),
    Break,
    Continue,
    Binary {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary { op: String, operand: Box<Node> },
    Call { callee: String, args: Vec<Node> },
    VarRef(String),
    ArrayRef { name: String, index: Box<Node> },
    IntConst(i32),
    BoolConst(bool),
    /// String literal text exactly as the parser supplied it, including
    /// the surrounding double quotes. Lowering strips the first and last
    /// byte (see `crate::lowering::expr`) — the stripping happens at
    /// lowering time, not here, so this node stays a transparent carrier
    /// of parser output.
    StringConst(String),
}

impl Node {
    /// Convenience constructor for a `Return` with no expression.
    pub fn return_void() -> Node {
        Node::Return(None)
    }

    /// Convenience constructor for a `Return` with an expression.
    pub fn return_value(expr: Node) -> Node {
        Node::Return(Some(Box::new(expr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sentinel_matches_registry() {
        assert_eq!(SCALAR, 0);
    }

    #[test]
    fn return_helpers_box_their_payload() {
        assert_eq!(Node::return_void(), Node::Return(None));
        assert_eq!(
            Node::return_value(Node::IntConst(3)),
            Node::Return(Some(Box::new(Node::IntConst(3))))
        );
    }
}
