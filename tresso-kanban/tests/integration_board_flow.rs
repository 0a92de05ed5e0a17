//! End-to-end board flow through the processor against a SQLite file

use tempfile::TempDir;
use tresso_kanban::{
    activity::ListActivity,
    board::{CreateBoard, DeleteBoard, GetBoard, ListBoards},
    card::{AddLabelToCard, CreateCard, RemoveLabelFromCard, UpdateCardOrder, UpdateCardTitle},
    column::{CreateColumn, DeleteColumn, UpdateColumn},
    label::{CreateLabel, DeleteLabel},
    ordering::{append_order, compute_drop_order, tail_following, HEAD_SENTINEL},
    ErrorKind, OperationProcessor, TressoContext, TressoOperationProcessor, UserId,
};

fn setup() -> (TempDir, TressoContext, TressoOperationProcessor) {
    let temp = TempDir::new().unwrap();
    let ctx = TressoContext::open_sqlite(temp.path().join("tresso.db"), UserId::new(1)).unwrap();
    (temp, ctx, TressoOperationProcessor::with_actor("test-user"))
}

#[tokio::test]
async fn test_board_flow_end_to_end() {
    let (_temp, ctx, processor) = setup();

    let board = processor
        .process(&CreateBoard::new("Launch"), &ctx)
        .await
        .unwrap();
    let todo = processor
        .process(&CreateColumn::new(board.id, "To Do"), &ctx)
        .await
        .unwrap();
    let doing = processor
        .process(&CreateColumn::new(board.id, "Doing"), &ctx)
        .await
        .unwrap();

    let mut cards = Vec::new();
    for title in ["A", "B", "C"] {
        cards.push(
            processor
                .process(&CreateCard::new(board.id, todo.id, title), &ctx)
                .await
                .unwrap(),
        );
    }
    let orders: Vec<f64> = cards.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![1.0, 2.0, 3.0]);

    // Head drop of C into To Do
    processor
        .process(
            &UpdateCardOrder::new(cards[2].id, todo.id, compute_drop_order(HEAD_SENTINEL, 1.0)),
            &ctx,
        )
        .await
        .unwrap();
    // Tail drop of A
    processor
        .process(
            &UpdateCardOrder::new(cards[0].id, todo.id, compute_drop_order(2.0, tail_following(2.0))),
            &ctx,
        )
        .await
        .unwrap();
    // B into the empty Doing column
    let moved = processor
        .process(&UpdateCardOrder::new(cards[1].id, doing.id, append_order(None)), &ctx)
        .await
        .unwrap();
    assert_eq!(moved.order, 1.0);

    let snapshot = processor.process(&GetBoard::new(board.id), &ctx).await.unwrap();
    let todo_titles: Vec<&str> = snapshot.cards_in(todo.id).map(|c| c.title.as_str()).collect();
    assert_eq!(todo_titles, vec!["C", "A"]);
    let doing_titles: Vec<&str> = snapshot.cards_in(doing.id).map(|c| c.title.as_str()).collect();
    assert_eq!(doing_titles, vec!["B"]);

    // Columns swap
    processor
        .process(
            &UpdateColumn::new(doing.id, board.id).with_order(compute_drop_order(HEAD_SENTINEL, 1.0)),
            &ctx,
        )
        .await
        .unwrap();
    let snapshot = processor.process(&GetBoard::new(board.id), &ctx).await.unwrap();
    assert_eq!(snapshot.columns[0].id, doing.id);

    // Every write was recorded, reads were not
    let entries = processor.process(&ListActivity::new(100), &ctx).await.unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].op, "update column");
    assert_eq!(entries.last().unwrap().op, "create board");
    assert!(entries
        .iter()
        .all(|e| e.actor.as_deref() == Some("test-user")));
}

#[tokio::test]
async fn test_labels_and_cascades() {
    let (_temp, ctx, processor) = setup();

    let board = processor
        .process(&CreateBoard::new("Launch"), &ctx)
        .await
        .unwrap();
    let todo = processor
        .process(&CreateColumn::new(board.id, "To Do"), &ctx)
        .await
        .unwrap();
    let card = processor
        .process(&CreateCard::new(board.id, todo.id, "Ship"), &ctx)
        .await
        .unwrap();
    let urgent = processor
        .process(&CreateLabel::new(board.id, "urgent"), &ctx)
        .await
        .unwrap();
    let backend = processor
        .process(&CreateLabel::new(board.id, "backend"), &ctx)
        .await
        .unwrap();

    for label in [&urgent, &backend, &urgent] {
        processor
            .process(&AddLabelToCard::new(card.id, label.id), &ctx)
            .await
            .unwrap();
    }
    processor
        .process(&UpdateCardTitle::new(card.id, "Ship it"), &ctx)
        .await
        .unwrap();

    let snapshot = processor.process(&GetBoard::new(board.id), &ctx).await.unwrap();
    let names: Vec<&str> = snapshot.cards[0].labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["backend", "urgent"]);
    assert_eq!(snapshot.cards[0].title, "Ship it");

    processor
        .process(&RemoveLabelFromCard::new(card.id, backend.id), &ctx)
        .await
        .unwrap();
    processor
        .process(&DeleteLabel::new(urgent.id, board.id), &ctx)
        .await
        .unwrap();
    let snapshot = processor.process(&GetBoard::new(board.id), &ctx).await.unwrap();
    assert!(snapshot.cards[0].labels.is_empty());
    assert_eq!(snapshot.labels.len(), 1);

    processor
        .process(&DeleteColumn::new(todo.id, board.id), &ctx)
        .await
        .unwrap();
    let snapshot = processor.process(&GetBoard::new(board.id), &ctx).await.unwrap();
    assert!(snapshot.cards.is_empty());

    processor
        .process(&DeleteBoard::new(board.id), &ctx)
        .await
        .unwrap();
    assert!(processor.process(&ListBoards, &ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_other_users_see_nothing() {
    let (_temp, ctx, processor) = setup();
    let board = processor
        .process(&CreateBoard::new("Private"), &ctx)
        .await
        .unwrap();

    let intruder = ctx.for_user(UserId::new(2));
    let err = processor
        .process(&GetBoard::new(board.id), &intruder)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);

    let err = processor
        .process(&CreateColumn::new(board.id, "Sneaky"), &intruder)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);
    assert!(!err.user_message().contains(&board.id.to_string()));
}
