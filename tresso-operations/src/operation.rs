//! Operation metadata and the execution trait

use crate::ExecutionResult;
use async_trait::async_trait;
use serde::Serialize;

/// Metadata every command carries: what it does and to which noun.
pub trait Operation {
    /// The action, e.g. "create", "move"
    fn verb(&self) -> &'static str;

    /// The entity acted on, e.g. "card"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string used in logs ("move card")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`.
///
/// The request struct must be serializable so the processor can record the
/// normalized input next to the output in the activity log.
#[async_trait]
pub trait Execute<C, E>: Operation + Serialize + Send + Sync
where
    C: Sync,
{
    /// Canonical record (or unit) returned on success
    type Output: Serialize + Send;

    async fn execute(&self, ctx: &C) -> ExecutionResult<Self::Output, E>;
}

/// Implement [`Operation`] for a command struct.
///
/// ```ignore
/// operation!(DeleteCard, verb = "delete", noun = "card", description = "Delete a card");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal $(,)?) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}
