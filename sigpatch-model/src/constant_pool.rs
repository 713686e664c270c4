//! String literals loadable by a method or class.

use std::collections::BTreeSet;

use sigpatch_isa::OpcodeFlags;

use crate::class::{Class, Method};

/// The set of string literals reachable from string-load operands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantPool<'a> {
    strings: BTreeSet<&'a str>,
}

impl<'a> ConstantPool<'a> {
    pub fn of_method(method: &'a Method) -> Self {
        let mut pool = Self::default();
        pool.extend_from(method);
        pool
    }

    /// Union of the pools of every method of `class`.
    pub fn of_class(class: &'a Class) -> Self {
        let mut pool = Self::default();
        for method in &class.methods {
            pool.extend_from(method);
        }
        pool
    }

    fn extend_from(&mut self, method: &'a Method) {
        self.strings.extend(
            method
                .instructions()
                .iter()
                .filter(|insn| insn.flags().contains(OpcodeFlags::STRING))
                .filter_map(|insn| insn.string()),
        );
    }

    pub fn contains(&self, s: &str) -> bool {
        self.strings.contains(s)
    }

    /// Whether this pool is a superset of `required`.
    pub fn contains_all<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required.into_iter().all(|s| self.contains(s.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.strings.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
