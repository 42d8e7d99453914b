//! The LLIR module: the accumulated output of a whole compilation.
//!
//! IR is built as text, not through a bindings layer like `inkwell`. The
//! buffer is split into named sections (`decls`, `globals`, `functions`)
//! instead of one monolithic `output` string, so the driver can finalize a
//! module without caring about emission order.

/// A complete, emitted LLIR module.
///
/// `Module` accumulates text; it never re-parses or re-validates what it
/// already holds. [`Builder`](super::builder::Builder) is the only thing
/// that mutates it, through `Module::push_decl`/`push_global`/
/// `push_function`.
#[derive(Debug, Default, Clone)]
pub struct Module {
    name: String,
    decls: String,
    globals: String,
    functions: String,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            decls: String::new(),
            globals: String::new(),
            functions: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn push_decl(&mut self, line: &str) {
        self.decls.push_str(line);
        self.decls.push('\n');
    }

    pub(crate) fn push_global(&mut self, line: &str) {
        self.globals.push_str(line);
        self.globals.push('\n');
    }

    pub(crate) fn push_function(&mut self, text: &str) {
        self.functions.push_str(text);
        if !text.ends_with('\n') {
            self.functions.push('\n');
        }
    }

    /// Render the module's complete LLVM-flavored textual form: extern
    /// declarations, then globals, then function definitions, in the
    /// order they were registered.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("; module \"{}\"\n\n", self.name));
        if !self.decls.is_empty() {
            out.push_str(&self.decls);
            out.push('\n');
        }
        if !self.globals.is_empty() {
            out.push_str(&self.globals);
            out.push('\n');
        }
        out.push_str(&self.functions);
        out
    }

    /// `true` if a function named `name` has been emitted.
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(&format!("@{name}("))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_orders_decls_then_globals_then_functions() {
        let mut m = Module::new("t");
        m.push_function("define i32 @main() {\nret i32 0\n}\n");
        m.push_decl("declare i32 @puts(ptr)");
        m.push_global("@g = global i32 0");

        let rendered = m.render();
        let decl_pos = rendered.find("declare i32 @puts").unwrap();
        let global_pos = rendered.find("@g = global").unwrap();
        let fn_pos = rendered.find("define i32 @main").unwrap();
        assert!(decl_pos < global_pos);
        assert!(global_pos < fn_pos);
    }

    #[test]
    fn has_function_checks_for_the_define_line() {
        let mut m = Module::new("t");
        assert!(!m.has_function("main"));
        m.push_function("define i32 @main() {\n}\n");
        assert!(m.has_function("main"));
    }
}
