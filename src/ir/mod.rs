//! The LLIR facade: the only part of this crate that prints LLVM-flavored
//! text. Everything upstream (the lowering engine) talks to it through
//! typed [`Value`]s and [`IrType`]s and never sees a raw string operand.

mod builder;
mod module;
mod types;
mod value;

pub use builder::Builder;
pub use module::Module;
pub use types::IrType;
pub use value::Value;
