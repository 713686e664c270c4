use crate::context::PatchContext;
use crate::error::RunError;

/// A named set of edit blocks targeting one or more applications.
pub trait Patch {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Package identifiers this patch was written for. Empty means any.
    fn compatible_packages(&self) -> &'static [&'static str];

    /// Run every block. Only structural failures are returned; the
    /// context records skipped blocks.
    fn execute(&self, ctx: &mut PatchContext<'_>) -> Result<(), RunError>;

    fn is_compatible_with(&self, package: &str) -> bool {
        let packages = self.compatible_packages();
        packages.is_empty() || packages.iter().any(|p| *p == package)
    }
}
