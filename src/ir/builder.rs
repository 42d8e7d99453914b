//! The LLIR facade: every operation that actually prints an LLVM-flavored
//! instruction or touches a name's binding.
//!
//! IR is built as `String` buffers via `write!`/`push_str` rather than
//! through a bindings crate like `inkwell` — fresh register and block
//! names come from monotonic counters (`fresh_temp`/`fresh_block`),
//! threaded through an explicit `&mut self` instead of process-wide
//! globals.
//!
//! `Builder` never reads or writes a [`SymbolTable`] field of its own —
//! callers pass one in explicitly to every operation that needs to resolve
//! or bind a name. That keeps this type a pure instruction emitter and
//! keeps "what does `x` refer to right now" owned entirely by the lowering
//! engine, which is the only thing that knows about scope lifetimes.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::config::PointerWidth;
use crate::errors::{CompileError, CompileResult};
use crate::registry;
use crate::symtab::{StorageHandle, SymbolTable};

use super::module::Module;
use super::types::IrType;
use super::value::Value;

/// Emits LLIR text for one compilation. Holds only emission-local state:
/// counters, the in-progress function body, and the string-constant pool.
/// Long-lived bindings live in the caller's [`SymbolTable`]; finished output
/// lives in the caller's [`Module`].
#[derive(Debug)]
pub struct Builder {
    pointer_width: PointerWidth,
    temp_counter: u32,
    block_counter: u32,
    string_counter: u32,
    string_pool: HashMap<Vec<u8>, String>,
    local_name_counts: HashMap<String, u32>,
    cur_fn_name: String,
    cur_ret_ty: IrType,
    cur_fn: String,
    terminated: bool,
}

impl Builder {
    pub fn new(pointer_width: PointerWidth) -> Self {
        Builder {
            pointer_width,
            temp_counter: 0,
            block_counter: 0,
            string_counter: 0,
            string_pool: HashMap::new(),
            local_name_counts: HashMap::new(),
            cur_fn_name: String::new(),
            cur_ret_ty: IrType::Void,
            cur_fn: String::new(),
            terminated: true,
        }
    }

    /// Resolve a source-language type name. Thin pass-through kept on the
    /// facade because every other named operation here also lives on
    /// `Builder` — see [`IrType::type_of`] for the actual table.
    pub fn type_of(&self, name: &str) -> CompileResult<IrType> {
        IrType::type_of(name)
    }

    // ---- constants --------------------------------------------------

    pub fn int_const(&self, value: i32) -> Value {
        Value::literal(value.to_string(), IrType::Int)
    }

    pub fn bool_const(&self, value: bool) -> Value {
        Value::literal(if value { "true" } else { "false" }, IrType::Bool)
    }

    /// Intern a string literal's bytes as a module-level constant, deduping
    /// on content so two identical literals share one global. Returns a
    /// `Ptr`-typed value directly usable as an operand — modern LLVM's
    /// opaque pointers mean a global's address already has type `ptr`, with
    /// no GEP-to-`i8*` cast needed the way an older typed-pointer model
    /// would require.
    pub fn global_string(&mut self, module: &mut Module, bytes: &[u8]) -> Value {
        if let Some(name) = self.string_pool.get(bytes) {
            return Value::literal(format!("@{name}"), IrType::Ptr);
        }
        let name = format!(".str.{}", self.string_counter);
        self.string_counter += 1;
        module.push_global(&format!(
            "@{name} = private unnamed_addr constant [{} x i8] c\"{}\"",
            bytes.len() + 1,
            escape_bytes(bytes)
        ));
        self.string_pool.insert(bytes.to_vec(), name.clone());
        Value::literal(format!("@{name}"), IrType::Ptr)
    }

    // ---- module-level declarations -----------------------------------

    /// Print LLIR boilerplate that precedes every declaration: this facade
    /// keeps it empty today (the target triple/datalayout are a driver
    /// concern, out of this core's scope) but the hook exists so a future
    /// driver has somewhere to put it without touching callers.
    pub fn module_init(&self, module: &mut Module) {
        let _ = module;
    }

    /// Declare an `extern` prototype and register it in the extern frame.
    pub fn extern_fn(
        &mut self,
        module: &mut Module,
        symtab: &mut SymbolTable,
        ret: IrType,
        name: &str,
        params: &[IrType],
    ) {
        let params_text = params
            .iter()
            .map(|t| t.as_ir_str())
            .collect::<Vec<_>>()
            .join(", ");
        module.push_decl(&format!(
            "declare {} @{name}({params_text})",
            ret.as_ir_str()
        ));
        symtab.insert_extern(
            name.to_string(),
            StorageHandle::Function {
                name: name.to_string(),
                ret,
                params: params.to_vec(),
            },
        );
    }

    /// Declare a user-defined function's header and register it in the
    /// function frame, ahead of any body being lowered (phase 1).
    ///
    /// Deliberately preserves an inherited quirk: the emitted IR function
    /// type carries *no* parameter types (`define T @name()`). Real
    /// parameter values are threaded in purely through
    /// [`Builder::begin_function`]'s synthetic argument registers and
    /// [`Builder::store_param`] — see DESIGN.md for why this was kept
    /// rather than "fixed" into a normal parameterized signature.
    pub fn fn_header(&mut self, symtab: &mut SymbolTable, ret: IrType, name: &str, params: &[IrType]) {
        symtab.insert_function(
            name.to_string(),
            StorageHandle::Function {
                name: name.to_string(),
                ret,
                params: params.to_vec(),
            },
        );
    }

    /// Declare a scalar global with no initializer (zero-valued).
    pub fn global_scalar(&mut self, module: &mut Module, symtab: &mut SymbolTable, ty: IrType, name: &str) {
        let zero = match ty {
            IrType::Bool => "false",
            IrType::Ptr => "null",
            _ => "0",
        };
        module.push_global(&format!("@{name} = global {} {zero}", ty.as_ir_str()));
        symtab.insert(
            name.to_string(),
            StorageHandle::Global {
                ptr: format!("@{name}"),
                ty,
            },
        );
    }

    /// Declare a scalar global with a constant initializer.
    pub fn global_scalar_init(
        &mut self,
        module: &mut Module,
        symtab: &mut SymbolTable,
        ty: IrType,
        name: &str,
        init: &Value,
    ) {
        module.push_global(&format!(
            "@{name} = global {} {}",
            ty.as_ir_str(),
            init.operand()
        ));
        symtab.insert(
            name.to_string(),
            StorageHandle::Global {
                ptr: format!("@{name}"),
                ty,
            },
        );
    }

    /// Declare a zero-initialized global array of `len` elements of `ty`.
    pub fn global_array(
        &mut self,
        module: &mut Module,
        symtab: &mut SymbolTable,
        ty: IrType,
        name: &str,
        len: i64,
    ) {
        module.push_global(&format!(
            "@{name} = global [{len} x {}] zeroinitializer",
            ty.as_ir_str()
        ));
        symtab.insert(
            name.to_string(),
            StorageHandle::Array {
                ptr: format!("@{name}"),
                ty,
                len,
            },
        );
    }

    // ---- function bodies ----------------------------------------------

    /// Begin emitting a function body: resets per-function state, opens the
    /// `entry` block, and hands back one synthetic register per declared
    /// parameter — see [`Builder::fn_header`]'s doc comment for why these
    /// registers are never actually bound by the IR function signature.
    ///
    /// The entry block is always spelled `entry:`, never uniquified — it is
    /// the one block every function has exactly once, so there is nothing
    /// to disambiguate it from.
    pub fn begin_function(&mut self, name: &str, ret: IrType, param_types: &[IrType]) -> Vec<Value> {
        self.cur_fn.clear();
        self.cur_fn_name = name.to_string();
        self.cur_ret_ty = ret;
        self.local_name_counts.clear();
        self.temp_counter = 0;
        self.block_counter = 0;
        self.start_block_with_label("entry");
        param_types
            .iter()
            .enumerate()
            .map(|(i, &ty)| Value::register(format!("arg{i}"), ty))
            .collect()
    }

    /// Finish the current function body and append it to `module`. The
    /// emitted signature always has an empty parameter list — see
    /// [`Builder::fn_header`].
    pub fn end_function(&mut self, module: &mut Module, name: &str, ret: IrType) {
        let mut text = format!("define {} @{name}() {{\n", ret.as_ir_str());
        text.push_str(&self.cur_fn);
        text.push_str("}\n");
        module.push_function(&text);
    }

    /// Store an incoming synthetic parameter value into the local slot for
    /// `name`, declaring that slot first. Mirrors the original's
    /// `storeParameter`: every parameter gets an `alloca` the same as any
    /// other local, then one `store`.
    pub fn store_param(&mut self, symtab: &mut SymbolTable, name: &str, ty: IrType, incoming: &Value) {
        let ptr = self.decl_local_inner(symtab, ty, name);
        self.emit_line(&format!(
            "store {} {}, ptr {ptr}",
            ty.as_ir_str(),
            incoming.operand()
        ));
    }

    /// Mint a uniquified block label without opening it yet. Used by
    /// control-flow lowering (`if`/`while`/`for`) that needs a target
    /// label to branch to before the block itself is reached — the caller
    /// opens it later with [`Builder::start_block_with_label`].
    pub fn reserve_block(&mut self, prefix: &str) -> String {
        self.fresh_block(prefix)
    }

    pub fn br(&mut self, target: &str) {
        self.emit_line(&format!("br label %{target}"));
        self.terminated = true;
    }

    pub fn cond_br(&mut self, cond: &Value, then_label: &str, else_label: &str) {
        self.emit_line(&format!(
            "br i1 {}, label %{then_label}, label %{else_label}",
            cond.operand()
        ));
        self.terminated = true;
    }

    /// `true` once the current block has already been closed with a
    /// terminator (`br`/`ret`) — the lowering engine consults this before
    /// emitting an implicit fallthrough jump (e.g. after an `if` with no
    /// `else`). No block may be appended to after a terminator.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Emit `ret void` or `ret <ty> <value>`, matching the function's
    /// declared return type. Used both for an explicit `return` statement
    /// and for the implicit fallthrough return required at the end of
    /// every function body.
    pub fn ret(&mut self, value: Option<&Value>) {
        match value {
            None => self.emit_line("ret void"),
            Some(v) if v.ty() == IrType::Void => self.emit_line("ret void"),
            Some(v) => {
                let line = format!("ret {} {}", v.ty().as_ir_str(), v.operand());
                self.emit_line(&line);
            }
        }
        self.terminated = true;
    }

    /// Emit the function's implicit trailing return when control falls off
    /// the end of the body without an explicit `return`: `ret void` for a
    /// `void` function, the type's zero value (`0`/`false`) otherwise.
    pub fn default_return(&mut self) {
        if self.terminated {
            return;
        }
        match self.cur_ret_ty {
            IrType::Void => self.ret(None),
            IrType::Int => self.ret(Some(&Value::literal("0", IrType::Int))),
            IrType::Bool => self.ret(Some(&Value::literal("false", IrType::Bool))),
            IrType::Ptr => self.ret(Some(&Value::literal("null", IrType::Ptr))),
        }
    }

    // ---- locals ---------------------------------------------------------

    /// Declare a local variable: emit its `alloca` and bind it in the
    /// innermost scope.
    pub fn decl_local(&mut self, symtab: &mut SymbolTable, ty: IrType, name: &str) -> Value {
        let ptr = self.decl_local_inner(symtab, ty, name);
        Value::register(ptr.trim_start_matches('%').to_string(), ty)
    }

    fn decl_local_inner(&mut self, symtab: &mut SymbolTable, ty: IrType, name: &str) -> String {
        let reg = self.unique_local_name(name);
        self.emit_line(&format!("%{reg} = alloca {}", ty.as_ir_str()));
        let ptr = format!("%{reg}");
        symtab.insert(
            name.to_string(),
            StorageHandle::Local {
                ptr: ptr.clone(),
                ty,
            },
        );
        ptr
    }

    /// Store `value` into the local/global scalar slot bound to `name`.
    pub fn assign_local(&mut self, symtab: &SymbolTable, name: &str, value: &Value) -> CompileResult<()> {
        let (ptr, ty) = self.resolve_scalar_slot(symtab, name)?;
        if value.ty() != ty {
            return Err(CompileError::AssignmentTypeMismatch(name.to_string()));
        }
        self.emit_line(&format!(
            "store {} {}, ptr {ptr}",
            ty.as_ir_str(),
            value.operand()
        ));
        Ok(())
    }

    /// Load the current value bound to `name` into a fresh register.
    pub fn read_local(&mut self, symtab: &SymbolTable, name: &str) -> CompileResult<Value> {
        let (ptr, ty) = self.resolve_scalar_slot(symtab, name)?;
        let reg = self.fresh_temp();
        self.emit_line(&format!("%{reg} = load {}, ptr {ptr}", ty.as_ir_str()));
        Ok(Value::register(reg, ty))
    }

    fn resolve_scalar_slot(&self, symtab: &SymbolTable, name: &str) -> CompileResult<(String, IrType)> {
        match symtab.lookup(name) {
            Some(StorageHandle::Local { ptr, ty }) | Some(StorageHandle::Global { ptr, ty }) => {
                Ok((ptr.clone(), *ty))
            }
            Some(_) | None => Err(CompileError::UndeclaredIdentifier(name.to_string())),
        }
    }

    // ---- arrays -----------------------------------------------------

    /// Compute the element address for `name[index]` via `getelementptr`.
    fn array_element_ptr(
        &mut self,
        symtab: &SymbolTable,
        name: &str,
        index: &Value,
    ) -> CompileResult<(String, IrType)> {
        match symtab.lookup(name) {
            Some(StorageHandle::Array { ptr, ty, len }) => {
                let idx_ty = self.pointer_width.index_type();
                let reg = self.fresh_temp();
                self.emit_line(&format!(
                    "%{reg} = getelementptr [{len} x {}], ptr {ptr}, {idx_ty} 0, {idx_ty} {}",
                    ty.as_ir_str(),
                    index.operand()
                ));
                Ok((format!("%{reg}"), *ty))
            }
            Some(_) | None => Err(CompileError::UndeclaredIdentifier(name.to_string())),
        }
    }

    pub fn array_store(
        &mut self,
        symtab: &SymbolTable,
        name: &str,
        index: &Value,
        value: &Value,
    ) -> CompileResult<()> {
        let (ptr, ty) = self.array_element_ptr(symtab, name, index)?;
        if value.ty() != ty {
            return Err(CompileError::AssignmentTypeMismatch(name.to_string()));
        }
        self.emit_line(&format!(
            "store {} {}, ptr {ptr}",
            ty.as_ir_str(),
            value.operand()
        ));
        Ok(())
    }

    pub fn array_load(&mut self, symtab: &SymbolTable, name: &str, index: &Value) -> CompileResult<Value> {
        let (ptr, ty) = self.array_element_ptr(symtab, name, index)?;
        let reg = self.fresh_temp();
        self.emit_line(&format!("%{reg} = load {}, ptr {ptr}", ty.as_ir_str()));
        Ok(Value::register(reg, ty))
    }

    // ---- calls ------------------------------------------------------

    /// Emit a `call`, checking arity and applying the one implicit
    /// conversion this language allows: a `bool` argument passed where the
    /// callee declares `int` is zero-extended (`zext i1 ... to i32`) at the
    /// call site.
    pub fn call(&mut self, symtab: &SymbolTable, callee: &str, args: &[Value]) -> CompileResult<Value> {
        let (ret, params) = match symtab.lookup(callee) {
            Some(StorageHandle::Function { ret, params, .. }) => (*ret, params.clone()),
            Some(_) | None => return Err(CompileError::UndeclaredIdentifier(callee.to_string())),
        };
        if args.len() != params.len() {
            return Err(CompileError::ArityMismatch {
                callee: callee.to_string(),
                expected: params.len(),
                got: args.len(),
            });
        }
        let mut operands = Vec::with_capacity(args.len());
        for (arg, &expected) in args.iter().zip(&params) {
            let coerced = self.coerce_call_argument(arg, expected, callee)?;
            operands.push(format!("{} {}", expected.as_ir_str(), coerced.operand()));
        }
        let operand_text = operands.join(", ");
        if ret == IrType::Void {
            self.emit_line(&format!("call void @{callee}({operand_text})"));
            Ok(Value::literal("", IrType::Void))
        } else {
            let reg = self.fresh_temp();
            self.emit_line(&format!(
                "%{reg} = call {} @{callee}({operand_text})",
                ret.as_ir_str()
            ));
            Ok(Value::register(reg, ret))
        }
    }

    fn coerce_call_argument(&mut self, arg: &Value, expected: IrType, callee: &str) -> CompileResult<Value> {
        if arg.ty() == expected {
            return Ok(arg.clone());
        }
        if arg.ty() == IrType::Bool && expected == IrType::Int {
            let reg = self.fresh_temp();
            self.emit_line(&format!("%{reg} = zext i1 {} to i32", arg.operand()));
            return Ok(Value::register(reg, IrType::Int));
        }
        Err(CompileError::AssignmentTypeMismatch(callee.to_string()))
    }

    // ---- binary / unary operators -----------------------------------

    /// Emit a non-short-circuiting binary operator: arithmetic, comparison,
    /// or shift. `&&`/`||` never reach here — they go through
    /// [`Builder::short_circuit`], since they need control flow, not a
    /// single instruction.
    pub fn binary(&mut self, op: &str, lhs: &Value, rhs: &Value) -> CompileResult<Value> {
        use registry::*;
        if op == OP_EQ || op == OP_NE {
            if lhs.ty() != rhs.ty() {
                return Err(CompileError::BinaryOperandMismatch(op.to_string()));
            }
            let instr = if op == OP_EQ { "icmp eq" } else { "icmp ne" };
            let reg = self.fresh_temp();
            self.emit_line(&format!(
                "%{reg} = {instr} {} {}, {}",
                lhs.ty().as_ir_str(),
                lhs.operand(),
                rhs.operand()
            ));
            return Ok(Value::register(reg, IrType::Bool));
        }
        if lhs.ty() != IrType::Int || rhs.ty() != IrType::Int {
            return Err(CompileError::BinaryOperandMismatch(op.to_string()));
        }
        let (instr, result_ty) = match op {
            OP_ADD => ("add", IrType::Int),
            OP_SUB => ("sub", IrType::Int),
            OP_MUL => ("mul", IrType::Int),
            OP_DIV => ("sdiv", IrType::Int),
            OP_MOD => ("srem", IrType::Int),
            OP_SHL => ("shl", IrType::Int),
            OP_SHR => ("ashr", IrType::Int),
            OP_LT => ("icmp slt", IrType::Bool),
            OP_LE => ("icmp sle", IrType::Bool),
            OP_GT => ("icmp sgt", IrType::Bool),
            OP_GE => ("icmp sge", IrType::Bool),
            other => return Err(CompileError::InvalidOperator(other.to_string())),
        };
        let reg = self.fresh_temp();
        self.emit_line(&format!(
            "%{reg} = {instr} i32 {}, {}",
            lhs.operand(),
            rhs.operand()
        ));
        Ok(Value::register(reg, result_ty))
    }

    pub fn unary(&mut self, op: &str, operand: &Value) -> CompileResult<Value> {
        use registry::{OP_NEG, OP_NOT};
        match op {
            OP_NOT => {
                if !operand.is_bool() {
                    return Err(CompileError::UnaryOperandMismatch(op.to_string()));
                }
                let reg = self.fresh_temp();
                self.emit_line(&format!("%{reg} = xor i1 {}, true", operand.operand()));
                Ok(Value::register(reg, IrType::Bool))
            }
            OP_NEG => {
                if !operand.is_int() {
                    return Err(CompileError::UnaryOperandMismatch(op.to_string()));
                }
                let reg = self.fresh_temp();
                self.emit_line(&format!("%{reg} = sub i32 0, {}", operand.operand()));
                Ok(Value::register(reg, IrType::Int))
            }
            other => Err(CompileError::InvalidOperator(other.to_string())),
        }
    }

    /// Entry point for `&&`/`||`: the caller lowers the left operand, calls
    /// this to branch on it, lowers the right operand only on the path
    /// where it's needed, and this closes the join block with a φ-node.
    ///
    /// `&&`/`||` are special-cased ahead of the ordinary instruction table:
    /// branch on the left operand, evaluate the right operand in only one
    /// successor, and join with a `phi` rather than evaluating both sides
    /// unconditionally.
    ///
    /// Returns the two block labels the caller must open — `rhs_block` to
    /// emit the right-hand operand in, and `join_block` to land in
    /// afterward — plus a closure-free two-step protocol: call
    /// [`Builder::start_block_with_label`] with each label as the caller
    /// proceeds, and finish via [`Builder::finish_short_circuit`].
    pub fn begin_short_circuit(&mut self, op: &str, lhs: &Value) -> CompileResult<ShortCircuit> {
        use registry::{OP_AND, OP_OR};
        if !lhs.is_bool() {
            return Err(CompileError::BinaryOperandMismatch(op.to_string()));
        }
        let rhs_block = self.fresh_block("noskct");
        let join_block = self.fresh_block("skctend");
        let is_and = match op {
            OP_AND => true,
            OP_OR => false,
            other => return Err(CompileError::InvalidOperator(other.to_string())),
        };
        if is_and {
            self.cond_br(lhs, &rhs_block, &join_block);
        } else {
            self.cond_br(lhs, &join_block, &rhs_block);
        }
        Ok(ShortCircuit {
            is_and,
            lhs: lhs.clone(),
            lhs_block: self.current_block_label(),
            rhs_block,
            join_block,
        })
    }

    /// Close out a short-circuit operator once the right-hand operand has
    /// been lowered in `sc.rhs_block`: branches into the join block and
    /// emits the φ-node that selects `lhs` (the short-circuited value) or
    /// `rhs` (the fully-evaluated value) depending on which predecessor
    /// control arrived from.
    pub fn finish_short_circuit(&mut self, sc: &ShortCircuit, rhs: &Value) -> CompileResult<Value> {
        if !rhs.is_bool() {
            return Err(CompileError::BinaryOperandMismatch(
                if sc.is_and { "&&" } else { "||" }.to_string(),
            ));
        }
        let rhs_tail_block = self.current_block_label();
        self.br(&sc.join_block);
        self.start_block_with_label(&sc.join_block);
        let reg = self.fresh_temp();
        let shortcut_value = if sc.is_and { "false" } else { "true" };
        self.emit_line(&format!(
            "%{reg} = phi i1 [ {shortcut_value}, %{} ], [ {}, %{rhs_tail_block} ]",
            sc.lhs_block,
            rhs.operand()
        ));
        Ok(Value::register(reg, IrType::Bool))
    }

    /// Open a block under a label already minted by
    /// [`Builder::reserve_block`] or [`Builder::begin_short_circuit`]
    /// (its `rhs_block`/`join_block`), or the fixed `entry` label.
    pub fn start_block_with_label(&mut self, label: &str) {
        let _ = writeln!(self.cur_fn, "{label}:");
        self.terminated = false;
    }

    fn current_block_label(&self) -> String {
        // The last opened block label is always the one found on the most
        // recent `"<label>:\n"` line; callers only need this immediately
        // after opening a block, before emitting any further block labels,
        // so a cheap textual scan is sufficient and avoids a redundant
        // field.
        self.cur_fn
            .rsplit('\n')
            .find_map(|line| line.strip_suffix(':').map(str::to_string))
            .unwrap_or_default()
    }

    // ---- name/label bookkeeping --------------------------------------

    fn unique_local_name(&mut self, base: &str) -> String {
        let count = self.local_name_counts.entry(base.to_string()).or_insert(0);
        let name = if *count == 0 {
            base.to_string()
        } else {
            format!("{base}.{count}")
        };
        *count += 1;
        name
    }

    fn fresh_block(&mut self, prefix: &str) -> String {
        let n = self.block_counter;
        self.block_counter += 1;
        format!("{prefix}.{n}")
    }

    fn fresh_temp(&mut self) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("t{n}")
    }

    fn emit_line(&mut self, line: &str) {
        debug_assert!(
            !self.terminated,
            "attempted to emit an instruction after a terminator in function '{}': {line}",
            self.cur_fn_name
        );
        self.cur_fn.push_str("  ");
        self.cur_fn.push_str(line);
        self.cur_fn.push('\n');
    }
}

/// State threaded between [`Builder::begin_short_circuit`] and
/// [`Builder::finish_short_circuit`] by the caller, who is responsible for
/// lowering the right-hand operand inside `rhs_block` in between the two
/// calls.
#[derive(Debug, Clone)]
pub struct ShortCircuit {
    is_and: bool,
    lhs: Value,
    lhs_block: String,
    pub rhs_block: String,
    pub join_block: String,
}

impl ShortCircuit {
    /// The already-lowered left operand, in case the caller needs it again.
    pub fn lhs(&self) -> &Value {
        &self.lhs
    }
}

fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 4);
    for &b in bytes {
        match b {
            b'"' => out.push_str("\\22"),
            b'\\' => out.push_str("\\5C"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{b:02X}");
            }
        }
    }
    out.push_str("\\00");
    out
}
