// ==========================================
// 记录审核状态组件 - 审核日志数据仓储
// ==========================================
// 对齐: moderation_log 表
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::domain::{ActorId, ModerationLog, ModerationStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// ModerationLogRepository - 审核日志仓储
// ==========================================
pub struct ModerationLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ModerationLogRepository {
    /// 创建审核日志仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 建表 (幂等)
    pub fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS moderation_log (
                log_id INTEGER PRIMARY KEY AUTOINCREMENT,
                record_type TEXT NOT NULL,
                record_id INTEGER NOT NULL,
                previous_status INTEGER NOT NULL CHECK(previous_status BETWEEN 0 AND 3),
                status INTEGER NOT NULL CHECK(status BETWEEN 0 AND 3),
                actor_id INTEGER,
                logged_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_moderation_log_record
                ON moderation_log(record_type, record_id);
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入审核日志
    ///
    /// # 返回
    /// - `Ok(log_id)`: 自增日志ID
    pub fn insert(&self, log: &ModerationLog) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO moderation_log (
                record_type, record_id, previous_status, status, actor_id, logged_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                log.record_type,
                log.record_id,
                log.previous_status,
                log.status,
                log.actor_id,
                log.logged_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询某条记录的全部审核日志 (按时间先后)
    pub fn find_by_record(
        &self,
        record_type: &str,
        record_id: i64,
    ) -> RepositoryResult<Vec<ModerationLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT log_id, record_type, record_id, previous_status, status, actor_id, logged_at
            FROM moderation_log
            WHERE record_type = ?1 AND record_id = ?2
            ORDER BY log_id ASC
            "#,
        )?;

        let logs = stmt
            .query_map(params![record_type, record_id], |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 查询某个操作人的审核日志
    pub fn find_by_actor(&self, actor_id: ActorId, limit: i64) -> RepositoryResult<Vec<ModerationLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT log_id, record_type, record_id, previous_status, status, actor_id, logged_at
            FROM moderation_log
            WHERE actor_id = ?1
            ORDER BY log_id DESC
            LIMIT ?2
            "#,
        )?;

        let logs = stmt
            .query_map(params![actor_id, limit], |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 查询最近的 N 条日志
    pub fn find_recent(&self, limit: i64) -> RepositoryResult<Vec<ModerationLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT log_id, record_type, record_id, previous_status, status, actor_id, logged_at
            FROM moderation_log
            ORDER BY log_id DESC
            LIMIT ?1
            "#,
        )?;

        let logs = stmt
            .query_map(params![limit], |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 映射数据库行到 ModerationLog
    fn map_row(row: &Row) -> SqliteResult<ModerationLog> {
        let logged_at_str: String = row.get(6)?;
        let logged_at = NaiveDateTime::parse_from_str(&logged_at_str, TS_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ModerationLog {
            log_id: Some(row.get(0)?),
            record_type: row.get(1)?,
            record_id: row.get(2)?,
            previous_status: row.get::<_, ModerationStatus>(3)?,
            status: row.get::<_, ModerationStatus>(4)?,
            actor_id: row.get(5)?,
            logged_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn setup_repo() -> ModerationLogRepository {
        let conn = crate::db::open_in_memory_shared().unwrap();
        let repo = ModerationLogRepository::new(conn);
        repo.ensure_table().unwrap();
        repo
    }

    fn make_log(record_id: i64, status: ModerationStatus, actor: Option<i64>) -> ModerationLog {
        ModerationLog {
            log_id: None,
            record_type: "comment".to_string(),
            record_id,
            previous_status: ModerationStatus::Pending,
            status,
            actor_id: actor.map(ActorId),
            logged_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_insert_and_find_by_record() {
        let repo = setup_repo();

        repo.insert(&make_log(1, ModerationStatus::Approved, Some(7))).unwrap();
        repo.insert(&make_log(1, ModerationStatus::Rejected, None)).unwrap();
        repo.insert(&make_log(2, ModerationStatus::Approved, Some(7))).unwrap();

        let logs = repo.find_by_record("comment", 1).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, ModerationStatus::Approved);
        assert_eq!(logs[0].actor_id, Some(ActorId(7)));
        assert_eq!(logs[1].status, ModerationStatus::Rejected);
        assert_eq!(logs[1].actor_id, None);
    }

    #[test]
    fn test_find_by_actor_and_recent() {
        let repo = setup_repo();

        for i in 1..=5 {
            repo.insert(&make_log(i, ModerationStatus::Postponed, Some(3))).unwrap();
        }
        repo.insert(&make_log(9, ModerationStatus::Approved, Some(4))).unwrap();

        assert_eq!(repo.find_by_actor(ActorId(3), 10).unwrap().len(), 5);

        let recent = repo.find_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].record_id, 9);
    }

    #[test]
    fn test_check_constraint_rejects_bad_status() {
        let repo = setup_repo();
        let conn = repo.get_conn().unwrap();
        let result = conn.execute(
            "INSERT INTO moderation_log (record_type, record_id, previous_status, status, logged_at)
             VALUES ('comment', 1, 0, 9, '2026-01-01 00:00:00')",
            [],
        );
        let err: RepositoryError = result.unwrap_err().into();
        assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    }
}
