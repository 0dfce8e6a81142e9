// ==========================================
// 记录审核状态组件 - 审核状态查询过滤
// ==========================================
// 职责: 在集合查询上按审核状态收窄结果
// 说明: 组合 SqlQueryBuilder,不继承任何查询基类;执行交给仓储
// 约束: 所有过滤条件以 AND 叠加,先 pending() 再 approved() 结果必为空
// ==========================================

use crate::config::{validate_identifier, ConfigError, ModerationConfig};
use crate::domain::ModerationStatus;
use crate::repository::sql_builder::SqlQueryBuilder;
use rusqlite::types::Value;

/// 审核状态查询
///
/// # 示例
/// ```
/// use record_moderation::config::ModerationConfig;
/// use record_moderation::repository::ModerationQuery;
///
/// let query = ModerationQuery::new("comment", &["id", "body"], &ModerationConfig::default())
///     .unwrap()
///     .approved_with_pending()
///     .order_by("id ASC");
///
/// let (sql, params) = query.build();
/// assert_eq!(sql, "SELECT id, body FROM comment WHERE status IN (?, ?) ORDER BY id ASC");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ModerationQuery {
    table: String,
    columns: Vec<String>,
    status_attribute: String,
    builder: SqlQueryBuilder,
}

impl ModerationQuery {
    /// 构造查询,状态列名在此一次性解析
    ///
    /// # 参数
    /// - `table`: 表名
    /// - `columns`: 选择列 (空则为 *)
    /// - `config`: 记录类型的审核字段配置
    ///
    /// # 返回
    /// - Err(ConfigError::InvalidIdentifier): 表名或列名非法
    pub fn new(
        table: &str,
        columns: &[&str],
        config: &ModerationConfig,
    ) -> Result<Self, ConfigError> {
        validate_identifier("table", table)?;
        for column in columns {
            validate_identifier("column", column)?;
        }

        let select_list = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.join(", ")
        };

        Ok(Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            status_attribute: config.status_attribute().to_string(),
            builder: SqlQueryBuilder::new(&format!("SELECT {} FROM {}", select_list, table)),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 选择列 (空表示 *)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn status_attribute(&self) -> &str {
        &self.status_attribute
    }

    // ==========================================
    // 状态过滤
    // ==========================================

    /// 状态等于指定值
    pub fn status(mut self, status: ModerationStatus) -> Self {
        self.builder = self
            .builder
            .where_eq(&self.status_attribute, Value::Integer(status.code()));
        self
    }

    /// 状态属于指定集合
    pub fn status_in(mut self, statuses: &[ModerationStatus]) -> Self {
        let values = statuses
            .iter()
            .map(|s| Value::Integer(s.code()))
            .collect();
        self.builder = self.builder.where_in(&self.status_attribute, values);
        self
    }

    pub fn approved(self) -> Self {
        self.status(ModerationStatus::Approved)
    }

    pub fn rejected(self) -> Self {
        self.status(ModerationStatus::Rejected)
    }

    pub fn postponed(self) -> Self {
        self.status(ModerationStatus::Postponed)
    }

    pub fn pending(self) -> Self {
        self.status(ModerationStatus::Pending)
    }

    /// 已通过或待审核 (前台可见集合)
    pub fn approved_with_pending(self) -> Self {
        self.status_in(&[ModerationStatus::Approved, ModerationStatus::Pending])
    }

    // ==========================================
    // 通用链式条件
    // ==========================================

    /// 追加任意 AND 条件
    pub fn and_where<I>(mut self, condition: &str, params: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.builder = self.builder.where_clause(condition, params);
        self
    }

    pub fn order_by(mut self, order: &str) -> Self {
        self.builder = self.builder.order_by(order);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.builder = self.builder.limit(n);
        self
    }

    /// 构建 SQL 与绑定参数
    pub fn build(&self) -> (String, Vec<Value>) {
        (self.builder.build(), self.builder.params().to_vec())
    }

    /// 构建计数 SQL (保留全部条件与 LIMIT)
    pub fn build_count(&self) -> (String, Vec<Value>) {
        let (sql, params) = self.build();
        (format!("SELECT COUNT(*) FROM ({})", sql), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ModerationQuery {
        ModerationQuery::new("comment", &[], &ModerationConfig::default()).unwrap()
    }

    #[test]
    fn test_single_status_filters() {
        let cases = [
            (query().approved(), 1),
            (query().rejected(), 2),
            (query().postponed(), 3),
            (query().pending(), 0),
        ];

        for (q, code) in cases {
            let (sql, params) = q.build();
            assert_eq!(sql, "SELECT * FROM comment WHERE status = ?");
            assert_eq!(params, vec![Value::Integer(code)]);
        }
    }

    #[test]
    fn test_approved_with_pending() {
        let (sql, params) = query().approved_with_pending().build();
        assert_eq!(sql, "SELECT * FROM comment WHERE status IN (?, ?)");
        assert_eq!(params, vec![Value::Integer(1), Value::Integer(0)]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let (sql, params) = query().pending().approved().build();
        assert_eq!(sql, "SELECT * FROM comment WHERE status = ? AND status = ?");
        assert_eq!(params, vec![Value::Integer(0), Value::Integer(1)]);
    }

    #[test]
    fn test_uses_configured_status_column() {
        let cfg = ModerationConfig::builder()
            .status_attribute("review_state")
            .build()
            .unwrap();
        let (sql, _) = ModerationQuery::new("post", &["id"], &cfg)
            .unwrap()
            .rejected()
            .build();
        assert_eq!(sql, "SELECT id FROM post WHERE review_state = ?");
    }

    #[test]
    fn test_build_count_wraps_filtered_query() {
        let (sql, params) = query().approved_with_pending().limit(3).build_count();
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM (SELECT * FROM comment WHERE status IN (?, ?) LIMIT 3)"
        );
        assert_eq!(params, vec![Value::Integer(1), Value::Integer(0)]);
    }

    #[test]
    fn test_sqlite_keyword_table_or_column_rejected() {
        let result = ModerationQuery::new("order", &[], &ModerationConfig::default());
        assert!(matches!(result, Err(ConfigError::InvalidIdentifier { .. })));

        let result = ModerationQuery::new("comment", &["id", "group"], &ModerationConfig::default());
        assert!(matches!(result, Err(ConfigError::InvalidIdentifier { .. })));
    }

    #[test]
    fn test_invalid_table_is_config_error() {
        let result = ModerationQuery::new("comment; --", &[], &ModerationConfig::default());
        assert!(matches!(result, Err(ConfigError::InvalidIdentifier { .. })));

        let result = ModerationQuery::new("comment", &["id", "bad col"], &ModerationConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_chaining_with_extra_conditions() {
        let (sql, params) = query()
            .and_where("author = ?", [Value::Text("alice".to_string())])
            .approved()
            .order_by("id DESC")
            .limit(5)
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM comment WHERE author = ? AND status = ? ORDER BY id DESC LIMIT 5"
        );
        assert_eq!(params.len(), 2);
    }
}
