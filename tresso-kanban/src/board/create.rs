//! CreateBoard command

use crate::auto_color::auto_color;
use crate::context::TressoContext;
use crate::error::{Result, TressoError};
use crate::store::NewBoard;
use crate::types::Board;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tresso_operations::{async_trait, operation, Execute, ExecutionResult};

/// Create a board owned by the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// The board name (required)
    pub name: String,
    /// Hex color; picked from the palette when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(CreateBoard, verb = "create", noun = "board", description = "Create a new board");

impl CreateBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    async fn apply(&self, ctx: &TressoContext) -> Result<Board> {
        let name = validate::required_text("name", &self.name)?;
        let color = match &self.color {
            Some(color) => validate::color(color)?,
            None => auto_color(&name).to_string(),
        };

        ctx.store()
            .insert_board(NewBoard {
                owner: ctx.user(),
                name,
                color,
            })
            .await
    }
}

#[async_trait]
impl Execute<TressoContext, TressoError> for CreateBoard {
    type Output = Board;

    async fn execute(&self, ctx: &TressoContext) -> ExecutionResult<Board, TressoError> {
        let started = Instant::now();
        ExecutionResult::logged_for(self, started, self.apply(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    #[tokio::test]
    async fn test_create_board() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("  Roadmap ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(board.name, "Roadmap");
        assert_eq!(board.owner, UserId::new(1));
        assert_eq!(board.color, auto_color("Roadmap"));
    }

    #[tokio::test]
    async fn test_create_board_normalizes_color() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("Roadmap")
            .with_color("#ABCDEF")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(board.color, "abcdef");
    }

    #[tokio::test]
    async fn test_create_board_rejects_bad_color() {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let result = CreateBoard::new("Roadmap")
            .with_color("blue")
            .execute(&ctx)
            .await;
        assert!(result.should_log());
        assert!(result.into_result().is_err());
    }
}
