//! Move execution lifecycle against a real SQLite database.

mod common;

use common::{count, setup, stock_of, MINUTE, T0};
use moveops_core::application::{CompleteRequest, StartRequest};
use moveops_core::domain::{ExecutionStatus, MaterialConsumption, PauseAction};
use moveops_core::error::AppError;
use moveops_core::port::MoveRepository;
use moveops_infra_sqlite::SqliteMoveRepository;

fn start(deal_id: i64, team: &[i64]) -> StartRequest {
    StartRequest {
        deal_id,
        team: team.to_vec(),
    }
}

fn usage(material_id: i64, quantity: i64) -> MaterialConsumption {
    MaterialConsumption {
        material_id,
        quantity,
    }
}

#[tokio::test]
async fn test_start_persists_execution_and_records() {
    let env = setup().await;

    let started = env.service.start(start(1, &[10, 11, 12])).await.unwrap();
    assert_eq!(started.status, ExecutionStatus::InProgress);

    let records = env.service.get_time_records(started.id).await.unwrap();
    assert_eq!(records.len(), 3);
    for view in &records {
        assert_eq!(view.record.execution_id, started.id);
        assert_eq!(view.record.start_time, T0);
        assert!(view.record.end_time.is_none());
    }
    let names: Vec<_> = records.iter().map(|v| v.employee_name.as_str()).collect();
    assert_eq!(names, vec!["Anna Berg", "Jonas Krause", "Lea Vogel"]);
}

#[tokio::test]
async fn test_start_empty_team_writes_nothing() {
    let env = setup().await;

    let err = env.service.start(start(1, &[])).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(count(&env.pool, "move_executions").await, 0);
}

#[tokio::test]
async fn test_failure_on_second_insert_rolls_back() {
    let env = setup().await;

    // Abort the second time-record insert of any execution
    sqlx::query(
        r#"
        CREATE TRIGGER fail_second_record BEFORE INSERT ON time_records
        WHEN (SELECT COUNT(*) FROM time_records WHERE execution_id = NEW.execution_id) = 1
        BEGIN
            SELECT RAISE(ABORT, 'injected failure');
        END
        "#,
    )
    .execute(&env.pool)
    .await
    .unwrap();

    let err = env.service.start(start(1, &[10, 11, 12])).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)), "{:?}", err);
    assert!(err.to_string().contains("injected failure"));

    assert_eq!(count(&env.pool, "move_executions").await, 0);
    assert_eq!(count(&env.pool, "time_records").await, 0);
}

#[tokio::test]
async fn test_failed_segment_insert_rolls_back_second_pause() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10, 11])).await.unwrap();

    env.clock.advance(60 * MINUTE);
    env.service
        .toggle_pause(started.id, PauseAction::Pause)
        .await
        .unwrap();
    env.clock.advance(30 * MINUTE);
    env.service
        .toggle_pause(started.id, PauseAction::Resume)
        .await
        .unwrap();

    // Segment rows are the only inserts that open with a break
    sqlx::query(
        r#"
        CREATE TRIGGER fail_segment_record BEFORE INSERT ON time_records
        WHEN NEW.break_start IS NOT NULL
        BEGIN
            SELECT RAISE(ABORT, 'injected failure');
        END
        "#,
    )
    .execute(&env.pool)
    .await
    .unwrap();

    env.clock.advance(60 * MINUTE);
    let err = env
        .service
        .toggle_pause(started.id, PauseAction::Pause)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)), "{:?}", err);

    let status: String = sqlx::query_scalar("SELECT status FROM move_executions WHERE id = ?")
        .bind(started.id)
        .fetch_one(&env.pool)
        .await
        .unwrap();
    assert_eq!(status, "in_progress");

    let records = env.service.get_time_records(started.id).await.unwrap();
    assert_eq!(records.len(), 2);
    for view in &records {
        assert_eq!(view.record.end_time, None);
        assert_eq!(view.record.break_start, Some(T0 + 60 * MINUTE));
        assert_eq!(view.record.break_end, Some(T0 + 90 * MINUTE));
    }
}

#[tokio::test]
async fn test_unknown_employee_rolls_back() {
    let env = setup().await;

    let err = env.service.start(start(1, &[10, 999])).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(count(&env.pool, "move_executions").await, 0);
    assert_eq!(count(&env.pool, "time_records").await, 0);
}

#[tokio::test]
async fn test_pause_resume_updates_breaks() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10, 11])).await.unwrap();

    env.clock.advance(30 * MINUTE);
    let status = env
        .service
        .toggle_pause(started.id, PauseAction::Pause)
        .await
        .unwrap();
    assert_eq!(status, ExecutionStatus::Paused);

    let records = env.service.get_time_records(started.id).await.unwrap();
    assert!(records
        .iter()
        .all(|v| v.record.break_start == Some(T0 + 30 * MINUTE) && v.record.end_time.is_none()));

    env.clock.advance(15 * MINUTE);
    env.service
        .toggle_pause(started.id, PauseAction::Resume)
        .await
        .unwrap();

    let records = env.service.get_time_records(started.id).await.unwrap();
    assert!(records
        .iter()
        .all(|v| v.record.break_end == Some(T0 + 45 * MINUTE)));
}

#[tokio::test]
async fn test_illegal_transitions_change_nothing() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10])).await.unwrap();

    let err = env
        .service
        .toggle_pause(started.id, PauseAction::Resume)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    env.service
        .complete(CompleteRequest {
            execution_id: started.id,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(env
        .service
        .toggle_pause(started.id, PauseAction::Pause)
        .await
        .is_err());
    assert!(env
        .service
        .complete(CompleteRequest {
            execution_id: started.id,
            ..Default::default()
        })
        .await
        .is_err());

    let records = env.service.get_time_records(started.id).await.unwrap();
    assert!(records[0].record.break_start.is_none());
}

#[tokio::test]
async fn test_complete_books_material_and_closes_records() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10, 11])).await.unwrap();

    env.clock.advance(4 * 60 * MINUTE);
    env.service
        .complete(CompleteRequest {
            execution_id: started.id,
            material_usage: vec![usage(3, 12), usage(4, 2)],
            notes: Some("Piano on 3rd floor".to_string()),
        })
        .await
        .unwrap();

    let detail = env.service.get_execution(started.id).await.unwrap();
    assert_eq!(detail.execution.status, ExecutionStatus::Completed);
    assert_eq!(detail.execution.end_time, Some(T0 + 4 * 60 * MINUTE));
    assert_eq!(detail.execution.notes.as_deref(), Some("Piano on 3rd floor"));
    assert!(detail.time_records.iter().all(|v| !v.record.is_open()));
    assert_eq!(detail.material_usage.len(), 2);
    assert!(detail
        .worked_time
        .iter()
        .all(|w| w.worked_millis == 4 * 60 * MINUTE));

    assert_eq!(stock_of(&env.pool, 3).await, 88);
    assert_eq!(stock_of(&env.pool, 4).await, 3);

    let repo = SqliteMoveRepository::new(env.pool.clone());
    assert!(repo.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_unknown_material_rolls_back_stock() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10])).await.unwrap();

    let err = env
        .service
        .complete(CompleteRequest {
            execution_id: started.id,
            material_usage: vec![usage(3, 5), usage(999, 1)],
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(stock_of(&env.pool, 3).await, 100);
    assert_eq!(count(&env.pool, "move_material_usage").await, 0);
    let detail = env.service.get_execution(started.id).await.unwrap();
    assert_eq!(detail.execution.status, ExecutionStatus::InProgress);
    assert!(detail.time_records[0].record.is_open());
}

#[tokio::test]
async fn test_stock_can_go_negative() {
    let env = setup().await;
    let started = env.service.start(start(1, &[10])).await.unwrap();

    env.service
        .complete(CompleteRequest {
            execution_id: started.id,
            material_usage: vec![usage(4, 8)],
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(stock_of(&env.pool, 4).await, -3);
}

#[tokio::test]
async fn test_active_list_newest_first() {
    let env = setup().await;

    let first = env.service.start(start(1, &[10])).await.unwrap();
    env.clock.advance(MINUTE);
    let second = env.service.start(start(2, &[11])).await.unwrap();

    let active = env.service.get_active().await.unwrap();
    let ids: Vec<_> = active.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(active[0].deal_title, "Umzug Schulz");
}
