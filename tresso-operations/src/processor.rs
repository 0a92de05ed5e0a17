//! Operation processor trait

use crate::Execute;
use async_trait::async_trait;

/// Runs operations and deals with their log entries.
///
/// Implementations decide where audit entries go (activity log, tracing, ...)
/// and who they are attributed to. Callers only see the plain result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<O::Output, E>
    where
        O: Execute<C, E>;
}
