//! Lowering configuration.
//!
//! A small chainable builder, scoped down to what this core actually
//! varies: whether the driver's end-of-lowering `main` check is enforced,
//! and the pointer width used for GEP index arithmetic. The AST itself —
//! not external configuration — drives almost everything else here.

/// Target pointer width, used when emitting GEP index constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerWidth {
    /// 32-bit index type (`i32`).
    Width32,
    /// 64-bit index type (`i64`), the common case for native targets.
    Width64,
}

impl PointerWidth {
    /// The LLIR integer type spelling used for GEP indices at this width.
    pub fn index_type(self) -> &'static str {
        match self {
            PointerWidth::Width32 => "i32",
            PointerWidth::Width64 => "i64",
        }
    }
}

/// Configuration threaded through the driver entrypoint.
///
/// # Example
///
/// ```rust
/// use velac::config::LoweringConfig;
///
/// // Library-only compile: skip the "no main" check.
/// let config = LoweringConfig::new().require_main(false);
/// assert!(!config.requires_main());
/// ```
#[derive(Debug, Clone)]
pub struct LoweringConfig {
    require_main: bool,
    pointer_width: PointerWidth,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LoweringConfig {
    /// The default configuration: `main` is required, GEP indices are
    /// 64-bit, matching a native 64-bit target.
    pub fn new() -> Self {
        LoweringConfig {
            require_main: true,
            pointer_width: PointerWidth::Width64,
        }
    }

    /// Toggle whether the driver's final "no main" check runs. Disabling
    /// this is useful for compiling a library unit that is never linked as
    /// a standalone executable.
    pub fn require_main(mut self, require: bool) -> Self {
        self.require_main = require;
        self
    }

    /// Select the pointer width used for GEP index constants.
    pub fn with_pointer_width(mut self, width: PointerWidth) -> Self {
        self.pointer_width = width;
        self
    }

    pub fn requires_main(&self) -> bool {
        self.require_main
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_main_at_64_bits() {
        let config = LoweringConfig::new();
        assert!(config.requires_main());
        assert_eq!(config.pointer_width().index_type(), "i64");
    }

    #[test]
    fn builder_methods_compose() {
        let config = LoweringConfig::new()
            .require_main(false)
            .with_pointer_width(PointerWidth::Width32);
        assert!(!config.requires_main());
        assert_eq!(config.pointer_width().index_type(), "i32");
    }
}
