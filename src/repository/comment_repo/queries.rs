use super::{CommentRepository, COMMENT_TABLE};
use crate::domain::{ActorId, Comment, ModerationStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::moderation_query::ModerationQuery;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Result as SqliteResult, Row};

impl CommentRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 评论集合查询 (状态列名来自本仓储的配置)
    pub fn query(&self) -> RepositoryResult<ModerationQuery> {
        let columns = self.select_columns();
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        Ok(ModerationQuery::new(COMMENT_TABLE, &columns, &self.config)?)
    }

    /// 按主键查询单条评论
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Comment>> {
        let query = self.query()?.and_where("id = ?", [Value::Integer(id)]);
        Ok(self.find_all(&query)?.into_iter().next())
    }

    /// 按主键查询,不存在时返回 NotFound
    pub fn get(&self, id: i64) -> RepositoryResult<Comment> {
        self.find_by_id(id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "Comment".to_string(),
            id: id.to_string(),
        })
    }

    /// 执行审核状态查询
    ///
    /// 查询必须由 `query()` 构造,以保证选择列与行映射一致
    pub fn find_all(&self, query: &ModerationQuery) -> RepositoryResult<Vec<Comment>> {
        self.ensure_compatible(query)?;

        let (sql, params) = query.build();
        let with_moderated_by = self.config.moderated_by_attribute().is_some();

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let comments = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Self::map_row(row, with_moderated_by)
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        tracing::debug!(sql = %sql, rows = comments.len(), "评论查询完成");
        Ok(comments)
    }

    /// 统计查询匹配的评论数
    pub fn count(&self, query: &ModerationQuery) -> RepositoryResult<usize> {
        self.ensure_compatible(query)?;

        let (sql, params) = query.build_count();
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?;

        usize::try_from(count).map_err(|_| RepositoryError::FieldValueError {
            field: "COUNT(*)".to_string(),
            message: format!("计数为负: {}", count),
        })
    }

    /// 校验查询与本仓储的表、选择列、状态列一致
    fn ensure_compatible(&self, query: &ModerationQuery) -> RepositoryResult<()> {
        if query.table() != COMMENT_TABLE {
            return Err(RepositoryError::ValidationError(format!(
                "查询目标表不匹配: {}",
                query.table()
            )));
        }
        if query.status_attribute() != self.config.status_attribute() {
            return Err(RepositoryError::ValidationError(format!(
                "查询状态列不匹配: {} (仓储配置为 {})",
                query.status_attribute(),
                self.config.status_attribute()
            )));
        }
        if query.columns() != self.select_columns().as_slice() {
            return Err(RepositoryError::ValidationError(format!(
                "查询选择列不匹配: [{}],请使用 CommentRepository::query() 构造",
                query.columns().join(", ")
            )));
        }
        Ok(())
    }

    fn select_columns(&self) -> Vec<String> {
        let mut columns = vec![
            "id".to_string(),
            "author".to_string(),
            "body".to_string(),
            self.config.status_attribute().to_string(),
        ];
        if let Some(column) = self.config.moderated_by_attribute() {
            columns.push(column.to_string());
        }
        columns
    }

    /// 映射数据库行到 Comment
    fn map_row(row: &Row, with_moderated_by: bool) -> SqliteResult<Comment> {
        let moderated_by = if with_moderated_by {
            row.get::<_, Option<ActorId>>(4)?
        } else {
            None
        };

        Ok(Comment {
            id: Some(row.get(0)?),
            author: row.get(1)?,
            body: row.get(2)?,
            status: row.get::<_, ModerationStatus>(3)?,
            moderated_by,
        })
    }
}
