use sigpatch_model::Program;

use crate::config::PatchConfig;
use crate::error::{BlockError, RunError};
use crate::report::{BlockOutcome, BlockReport};

/// What a patch sees while it executes.
pub struct PatchContext<'a> {
    patch: &'static str,
    program: &'a mut Program,
    config: &'a PatchConfig,
    blocks: Vec<BlockReport>,
}

impl<'a> PatchContext<'a> {
    pub fn new(patch: &'static str, program: &'a mut Program, config: &'a PatchConfig) -> Self {
        Self {
            patch,
            program,
            config,
            blocks: Vec::new(),
        }
    }

    pub fn program(&self) -> &Program {
        &*self.program
    }

    pub fn config(&self) -> &PatchConfig {
        self.config
    }

    /// Run one edit block. `f` returns the number of edits it committed.
    ///
    /// A skip is logged and recorded, and execution continues with the next
    /// block. A fatal error ends the run.
    pub fn block<F>(&mut self, name: &str, f: F) -> Result<(), RunError>
    where
        F: FnOnce(&mut Program, &PatchConfig) -> Result<usize, BlockError>,
    {
        let outcome = match f(&mut *self.program, self.config) {
            Ok(edits) => {
                log::info!("{} / {name}: {edits} edit(s)", self.patch);
                BlockOutcome::Applied { edits }
            }
            Err(BlockError::Skip(reason)) => {
                log::warn!("{} / {name}: skipped, {reason}", self.patch);
                BlockOutcome::Skipped(reason)
            }
            Err(BlockError::Fatal(source)) => {
                log::error!("{} / {name}: {source}", self.patch);
                return Err(RunError::Fatal {
                    patch: self.patch.to_string(),
                    block: name.to_string(),
                    source,
                });
            }
        };
        self.blocks.push(BlockReport {
            name: name.to_string(),
            outcome,
        });
        Ok(())
    }

    pub(crate) fn into_blocks(self) -> Vec<BlockReport> {
        self.blocks
    }
}
