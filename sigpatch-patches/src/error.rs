use sigpatch_analysis::Unresolved;
use sigpatch_rewrite::RewriteError;
use thiserror::Error;

/// Why an edit block did nothing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("fingerprint {0} matched nothing")]
    NoMatch(String),

    #[error("{what} not identified: {reason}")]
    Unresolved {
        what: &'static str,
        reason: Unresolved,
    },
}

/// Failure of one edit block.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error(transparent)]
    Skip(#[from] SkipReason),

    #[error(transparent)]
    Fatal(#[from] RewriteError),
}

impl From<sigpatch_model::Error> for BlockError {
    fn from(e: sigpatch_model::Error) -> Self {
        BlockError::Fatal(RewriteError::Model(e))
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{patch} / {block}: {source}")]
    Fatal {
        patch: String,
        block: String,
        #[source]
        source: RewriteError,
    },

    #[error("no patch named `{0}`")]
    UnknownPatch(String),
}
