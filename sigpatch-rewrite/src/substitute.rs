use std::collections::BTreeMap;

use sigpatch_isa::{FieldRef, Reg, insn};
use sigpatch_model::{Error, MethodId, Program};

use crate::error::{Result, RewriteError};

/// One field read to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Site {
    pub position: usize,
    pub dest: Reg,
}

/// Every read of one field across the program, collected before any edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPlan {
    target: FieldRef,
    sites: BTreeMap<MethodId, Vec<Site>>,
}

impl SubstitutionPlan {
    /// Scan every method body for reads whose field identity equals `target`.
    pub fn collect(program: &Program, target: &FieldRef) -> Self {
        let mut sites: BTreeMap<MethodId, Vec<Site>> = BTreeMap::new();
        for (id, method) in program.methods() {
            for (position, insn) in method.instructions().iter().enumerate() {
                if insn.field_read() != Some(target) {
                    continue;
                }
                if let Some(dest) = insn.dest() {
                    sites.entry(id).or_default().push(Site { position, dest });
                }
            }
        }
        log::debug!(
            "{target}: {} reads in {} methods",
            sites.values().map(Vec::len).sum::<usize>(),
            sites.len()
        );
        Self {
            target: target.clone(),
            sites,
        }
    }

    pub fn target(&self) -> &FieldRef {
        &self.target
    }

    /// Number of reads to replace.
    pub fn len(&self) -> usize {
        self.sites.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.sites.keys().copied()
    }

    pub fn sites(&self, method: MethodId) -> &[Site] {
        match self.sites.get(&method) {
            Some(sites) => sites,
            None => &[],
        }
    }

    /// Replace each collected read with a zero load into the same register,
    /// highest position first within each method. Returns the number of
    /// replaced instructions.
    pub fn apply(&self, program: &mut Program) -> Result<usize> {
        let mut replaced = 0;
        for (&id, sites) in &self.sites {
            for site in sites.iter().rev() {
                let still_reads = program
                    .method(id)
                    .and_then(|m| m.instructions().get(site.position))
                    .is_some_and(|insn| insn.field_read() == Some(&self.target));
                if !still_reads {
                    let method = program.method_ref(id).ok_or(Error::UnknownMethod(id))?;
                    return Err(RewriteError::StaleSite {
                        method,
                        position: site.position,
                    });
                }
                program.replace_instruction_at(id, site.position, insn::const_zero(site.dest))?;
                replaced += 1;
            }
        }
        if replaced > 0 {
            log::info!("replaced {replaced} reads of {}", self.target);
        }
        Ok(replaced)
    }
}
