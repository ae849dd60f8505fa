//! Function table built from `DEF` declarations.

use crate::error::Fault;
use std::collections::HashMap;
use twist_types::{ErrorKind, Instruction, Opcode};

/// Where a function body starts and how many queued values it takes by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionEntry {
    /// Index just past the declaring `DEF`.
    pub entry: usize,
    /// The `DEF`'s integer argument.
    pub arity: i64,
}

/// Name → entry map. Built once before execution, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    entries: HashMap<String, FunctionEntry>,
}

impl FunctionTable {
    /// Scan the whole instruction stream for `DEF`s. A name declared twice
    /// resolves to its last declaration.
    pub fn build(instructions: &[Instruction]) -> Self {
        let entries = instructions
            .iter()
            .enumerate()
            .filter(|(_, inst)| inst.opcode == Opcode::Def)
            .map(|(index, inst)| {
                (
                    inst.text_arg.clone(),
                    FunctionEntry {
                        entry: index + 1,
                        arity: inst.int_arg,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Resolve `name`. `UNDEFINED_FUNCTION` when no `DEF` declares it.
    pub fn get(&self, name: &str) -> Result<FunctionEntry, Fault> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| Fault::with_detail(ErrorKind::UndefinedFunction, format!("'{name}'")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
