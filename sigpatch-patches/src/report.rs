use std::fmt;

use crate::error::SkipReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Applied { edits: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub name: String,
    pub outcome: BlockOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    Executed,
    /// Not run: the program's package is not one the patch targets.
    Incompatible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub name: String,
    pub status: PatchStatus,
    pub blocks: Vec<BlockReport>,
}

impl PatchReport {
    pub fn block(&self, name: &str) -> Option<&BlockReport> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Per-patch, per-block results of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub patches: Vec<PatchReport>,
}

impl RunReport {
    pub fn patch(&self, name: &str) -> Option<&PatchReport> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// Total committed edits.
    pub fn edits(&self) -> usize {
        self.patches
            .iter()
            .flat_map(|p| &p.blocks)
            .map(|b| match b.outcome {
                BlockOutcome::Applied { edits } => edits,
                BlockOutcome::Skipped(_) => 0,
            })
            .sum()
    }

    pub fn skipped(&self) -> usize {
        self.patches
            .iter()
            .flat_map(|p| &p.blocks)
            .filter(|b| matches!(b.outcome, BlockOutcome::Skipped(_)))
            .count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for patch in &self.patches {
            match patch.status {
                PatchStatus::Executed => writeln!(f, "{}", patch.name)?,
                PatchStatus::Incompatible => writeln!(f, "{} (incompatible, not run)", patch.name)?,
            }
            for block in &patch.blocks {
                match &block.outcome {
                    BlockOutcome::Applied { edits } => {
                        writeln!(f, "  {:<24} {edits} edit(s)", block.name)?
                    }
                    BlockOutcome::Skipped(reason) => {
                        writeln!(f, "  {:<24} skipped: {reason}", block.name)?
                    }
                }
            }
        }
        write!(f, "{} edit(s), {} block(s) skipped", self.edits(), self.skipped())
    }
}
