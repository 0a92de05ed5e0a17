//! Card commands, including label attachment

mod add_label;
mod create;
mod delete;
mod remove_label;
mod update_content;
mod update_order;
mod update_title;

pub use add_label::AddLabelToCard;
pub use create::CreateCard;
pub use delete::DeleteCard;
pub use remove_label::RemoveLabelFromCard;
pub use update_content::UpdateCardContent;
pub use update_order::UpdateCardOrder;
pub use update_title::UpdateCardTitle;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::board::CreateBoard;
    use crate::column::CreateColumn;
    use crate::context::TressoContext;
    use crate::types::{Board, Column, UserId};
    use tresso_operations::Execute;

    /// A board with "To Do" and "Done" columns
    pub async fn board_with_columns() -> (TressoContext, Board, Column, Column) {
        let ctx = TressoContext::in_memory(UserId::new(1));
        let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result().unwrap();
        let todo = CreateColumn::new(board.id, "To Do")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let done = CreateColumn::new(board.id, "Done")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        (ctx, board, todo, done)
    }
}
