use super::{CommentRepository, COMMENT_TABLE};
use crate::config::ModerationConfig;
use crate::domain::{ActorContext, ActorId, Comment, ModerationStatus};
use crate::repository::error::RepositoryError;
use crate::repository::moderation_query::ModerationQuery;
use crate::repository::store::ModeratedStore;

fn setup_repo(config: ModerationConfig) -> CommentRepository {
    let conn = crate::db::open_in_memory_shared().unwrap();
    let repo = CommentRepository::moderated(conn, config);
    repo.ensure_table().unwrap();
    repo
}

#[test]
fn test_insert_assigns_id_and_find_by_id() {
    let repo = setup_repo(ModerationConfig::default());
    let mut comment = Comment::new("alice", "first!");

    let id = repo.insert(&mut comment, &ActorContext::user(1)).unwrap();
    assert_eq!(comment.id, Some(id));

    let found = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(found, comment);
    assert_eq!(found.status, ModerationStatus::Pending);
}

#[test]
fn test_find_by_id_missing() {
    let repo = setup_repo(ModerationConfig::default());
    assert!(repo.find_by_id(999).unwrap().is_none());
    assert!(matches!(repo.get(999), Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_save_hooks_run_on_insert_and_update() {
    let repo = setup_repo(ModerationConfig::default());
    let mut comment = Comment::new("alice", "hello");

    repo.save(&mut comment, &ActorContext::user(3)).unwrap();
    assert_eq!(comment.moderated_by, Some(ActorId(3)));

    comment.body = "hello, edited".to_string();
    repo.save(&mut comment, &ActorContext::Guest).unwrap();
    assert_eq!(comment.moderated_by, None);

    let reloaded = repo.get(comment.id.unwrap()).unwrap();
    assert_eq!(reloaded.body, "hello, edited");
    assert_eq!(reloaded.moderated_by, None);
}

#[test]
fn test_plain_repository_has_no_hooks() {
    let conn = crate::db::open_in_memory_shared().unwrap();
    let repo = CommentRepository::new(conn, ModerationConfig::default());
    repo.ensure_table().unwrap();

    let mut comment = Comment::new("alice", "hello");
    comment.moderated_by = Some(ActorId(11));
    repo.save(&mut comment, &ActorContext::user(3)).unwrap();

    assert_eq!(comment.moderated_by, Some(ActorId(11)));
}

#[test]
fn test_validation_errors() {
    let repo = setup_repo(ModerationConfig::default());

    let mut empty_body = Comment::new("alice", "   ");
    assert!(matches!(
        repo.save(&mut empty_body, &ActorContext::Anonymous),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(empty_body.id.is_none());

    let mut orphan = Comment::new("alice", "hello");
    orphan.id = Some(404);
    assert!(matches!(
        repo.update(&mut orphan, &ActorContext::Anonymous),
        Err(RepositoryError::NotFound { .. })
    ));
}

#[test]
fn test_renamed_columns() {
    let config = ModerationConfig::builder()
        .status_attribute("review_state")
        .moderated_by_attribute("reviewer_id")
        .build()
        .unwrap();
    let repo = setup_repo(config);

    let mut comment = Comment::new("bob", "renamed columns");
    comment.status = ModerationStatus::Postponed;
    repo.save(&mut comment, &ActorContext::user(8)).unwrap();

    let conn = repo.get_conn().unwrap();
    let (state, reviewer): (i64, Option<i64>) = conn
        .query_row(
            "SELECT review_state, reviewer_id FROM comment WHERE id = ?1",
            [comment.id.unwrap()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(state, 3);
    assert_eq!(reviewer, Some(8));
}

#[test]
fn test_numeric_text_status_loads_loosely() {
    let conn = crate::db::open_in_memory_shared().unwrap();
    {
        let guard = conn.lock().unwrap();
        // 历史表: status 列无类型声明,数字字符串按 TEXT 原样存储
        guard
            .execute_batch(
                r#"
                CREATE TABLE comment (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    author TEXT NOT NULL,
                    body TEXT NOT NULL,
                    status NOT NULL DEFAULT '0',
                    moderated_by INTEGER NULL
                );
                INSERT INTO comment (author, body, status) VALUES ('carol', 'legacy', '1');
                "#,
            )
            .unwrap();
        let stored_type: String = guard
            .query_row("SELECT typeof(status) FROM comment", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored_type, "text");
    }

    let repo = CommentRepository::moderated(conn, ModerationConfig::default());
    repo.ensure_table().unwrap();

    let comments = repo.find_all(&repo.query().unwrap()).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].status, ModerationStatus::Approved);
}

#[test]
fn test_out_of_domain_status_is_data_integrity_error() {
    let repo = setup_repo(ModerationConfig::default());
    {
        let conn = repo.get_conn().unwrap();
        conn.execute(
            "INSERT INTO comment (author, body, status) VALUES ('mallory', 'bad', 7)",
            [],
        )
        .unwrap();
    }

    let result = repo.find_all(&repo.query().unwrap());
    assert!(matches!(result, Err(RepositoryError::FieldValueError { .. })));
}

#[test]
fn test_delete_removes_row() {
    let repo = setup_repo(ModerationConfig::default());
    let mut comment = Comment::new("alice", "short-lived");
    let id = repo.insert(&mut comment, &ActorContext::Anonymous).unwrap();

    assert!(repo.delete(id).unwrap());
    assert!(repo.find_by_id(id).unwrap().is_none());
    assert!(!repo.delete(id).unwrap());
}

#[test]
fn test_count_uses_filter_and_limit() {
    let repo = setup_repo(ModerationConfig::default());
    for (body, status) in [
        ("a", ModerationStatus::Pending),
        ("b", ModerationStatus::Approved),
        ("c", ModerationStatus::Approved),
        ("d", ModerationStatus::Rejected),
    ] {
        let mut comment = Comment::new("alice", body);
        comment.status = status;
        repo.insert(&mut comment, &ActorContext::Anonymous).unwrap();
    }

    assert_eq!(repo.count(&repo.query().unwrap()).unwrap(), 4);
    assert_eq!(repo.count(&repo.query().unwrap().approved()).unwrap(), 2);
    assert_eq!(repo.count(&repo.query().unwrap().approved_with_pending()).unwrap(), 3);
    assert_eq!(repo.count(&repo.query().unwrap().pending().approved()).unwrap(), 0);
    assert_eq!(repo.count(&repo.query().unwrap().approved().limit(1)).unwrap(), 1);
}

#[test]
fn test_foreign_query_is_rejected_before_execution() {
    let repo = setup_repo(ModerationConfig::default());
    let mut comment = Comment::new("alice", "hello");
    repo.insert(&mut comment, &ActorContext::Anonymous).unwrap();

    // 选择列与仓储不一致
    let narrow = ModerationQuery::new(COMMENT_TABLE, &["id", "body"], repo.config())
        .unwrap()
        .approved();
    assert!(matches!(
        repo.find_all(&narrow),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        repo.count(&narrow),
        Err(RepositoryError::ValidationError(_))
    ));

    // 状态列来自其他配置
    let renamed = ModerationConfig::builder()
        .status_attribute("review_state")
        .build()
        .unwrap();
    let other = ModerationQuery::new(
        COMMENT_TABLE,
        &["id", "author", "body", "review_state", "moderated_by"],
        &renamed,
    )
    .unwrap();
    assert!(matches!(
        repo.find_all(&other),
        Err(RepositoryError::ValidationError(_))
    ));

    // 其他表
    let foreign = ModerationQuery::new("post", &[], repo.config()).unwrap();
    assert!(matches!(
        repo.find_all(&foreign),
        Err(RepositoryError::ValidationError(_))
    ));

    // 仓储自己构造的查询正常执行
    assert_eq!(repo.find_all(&repo.query().unwrap()).unwrap().len(), 1);
}
