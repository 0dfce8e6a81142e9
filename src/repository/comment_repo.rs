// ==========================================
// 记录审核状态组件 - 评论数据仓储
// ==========================================
// 对齐: comment 表 (状态列/审核人列名来自 ModerationConfig)
// 红线: 插入与更新前都执行保存前钩子
// 约束: 所有查询使用参数化,列名只来自已校验的配置
// ==========================================

mod queries;

#[cfg(test)]
mod tests;

use crate::config::ModerationConfig;
use crate::domain::{ActorContext, Comment};
use crate::engine::AuditStamper;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::{ModeratedStore, SaveHook};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::sync::{Arc, Mutex};

/// 评论表名
pub const COMMENT_TABLE: &str = "comment";

/// 评论正文最大长度 (字符)
pub const MAX_BODY_CHARS: usize = 4_000;

// ==========================================
// CommentRepository - 评论仓储
// ==========================================
pub struct CommentRepository {
    conn: Arc<Mutex<Connection>>,
    config: ModerationConfig,
    save_hooks: Vec<Arc<dyn SaveHook<Comment>>>,
}

impl CommentRepository {
    /// 创建评论仓储 (不挂载任何保存前钩子)
    pub fn new(conn: Arc<Mutex<Connection>>, config: ModerationConfig) -> Self {
        Self {
            conn,
            config,
            save_hooks: Vec::new(),
        }
    }

    /// 创建挂载审核人审计的评论仓储
    pub fn moderated(conn: Arc<Mutex<Connection>>, config: ModerationConfig) -> Self {
        let stamper = AuditStamper::new(&config);
        Self::new(conn, config).with_save_hook(Arc::new(stamper))
    }

    /// 追加保存前钩子 (按挂载顺序执行)
    pub fn with_save_hook(mut self, hook: Arc<dyn SaveHook<Comment>>) -> Self {
        self.save_hooks.push(hook);
        self
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 建表 (幂等)
    pub fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let moderated_by_column = match self.config.moderated_by_attribute() {
            Some(column) => format!(",\n                {} INTEGER NULL", column),
            None => String::new(),
        };

        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author TEXT NOT NULL,
                body TEXT NOT NULL,
                {status} INTEGER NOT NULL DEFAULT 0{moderated_by}
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_{status} ON {table}({status});
            "#,
            table = COMMENT_TABLE,
            status = self.config.status_attribute(),
            moderated_by = moderated_by_column,
        );

        conn.execute_batch(&ddl)?;
        Ok(())
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入评论,成功后回填主键
    pub fn insert(&self, comment: &mut Comment, actor: &ActorContext) -> RepositoryResult<i64> {
        if comment.id.is_some() {
            return Err(RepositoryError::ValidationError(
                "已持久化的评论不能再次插入".to_string(),
            ));
        }
        Self::validate(comment)?;

        for hook in &self.save_hooks {
            hook.before_insert(comment, actor);
        }

        let (columns, values) = self.data_columns(comment);
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            COMMENT_TABLE,
            columns.join(", "),
            placeholders
        );

        let conn = self.get_conn()?;
        conn.execute(&sql, params_from_iter(values.iter()))?;
        let id = conn.last_insert_rowid();
        comment.id = Some(id);

        tracing::debug!(comment_id = id, status = %comment.status, "评论已插入");
        Ok(id)
    }

    /// 更新评论
    pub fn update(&self, comment: &mut Comment, actor: &ActorContext) -> RepositoryResult<()> {
        let id = comment.id.ok_or_else(|| {
            RepositoryError::ValidationError("未持久化的评论不能更新".to_string())
        })?;
        Self::validate(comment)?;

        for hook in &self.save_hooks {
            hook.before_update(comment, actor);
        }

        let (columns, mut values) = self.data_columns(comment);
        let assignments = columns
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", COMMENT_TABLE, assignments);
        values.push(Value::Integer(id));

        let conn = self.get_conn()?;
        let rows = conn.execute(&sql, params_from_iter(values.iter()))?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Comment".to_string(),
                id: id.to_string(),
            });
        }

        tracing::debug!(comment_id = id, status = %comment.status, "评论已更新");
        Ok(())
    }

    /// 删除评论
    pub fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", COMMENT_TABLE),
            [id],
        )?;
        Ok(rows > 0)
    }

    // ==========================================
    // 内部工具
    // ==========================================

    fn validate(comment: &Comment) -> RepositoryResult<()> {
        if comment.author.trim().is_empty() {
            return Err(RepositoryError::ValidationError("作者不能为空".to_string()));
        }
        if comment.body.trim().is_empty() {
            return Err(RepositoryError::ValidationError("正文不能为空".to_string()));
        }
        if comment.body.chars().count() > MAX_BODY_CHARS {
            return Err(RepositoryError::ValidationError(format!(
                "正文超过 {} 字符",
                MAX_BODY_CHARS
            )));
        }
        Ok(())
    }

    /// 可写列与对应值 (审核人列关闭时不写)
    fn data_columns(&self, comment: &Comment) -> (Vec<String>, Vec<Value>) {
        let mut columns = vec![
            "author".to_string(),
            "body".to_string(),
            self.config.status_attribute().to_string(),
        ];
        let mut values = vec![
            Value::Text(comment.author.clone()),
            Value::Text(comment.body.clone()),
            Value::Integer(comment.status.code()),
        ];

        if let Some(column) = self.config.moderated_by_attribute() {
            columns.push(column.to_string());
            values.push(match comment.moderated_by {
                Some(actor) => Value::Integer(actor.0),
                None => Value::Null,
            });
        }

        (columns, values)
    }
}

impl ModeratedStore<Comment> for CommentRepository {
    fn save(&self, entity: &mut Comment, actor: &ActorContext) -> RepositoryResult<()> {
        if entity.is_new() {
            self.insert(entity, actor).map(|_| ())
        } else {
            self.update(entity, actor)
        }
    }
}
