// ==========================================
// 记录审核状态组件 - SQL 构建工具
// ==========================================
// 职责: 链式构建带参数绑定的 SELECT 语句
// 约束: 条件之间恒为 AND (只收窄,不放宽);值一律参数化
// ==========================================

use rusqlite::types::Value;

/// SQL 查询构建器（流式 API）
///
/// # 示例
/// ```
/// use record_moderation::repository::sql_builder::SqlQueryBuilder;
/// use rusqlite::types::Value;
///
/// let builder = SqlQueryBuilder::new("SELECT * FROM comment")
///     .where_eq("status", Value::Integer(1))
///     .and_if(Some("author = 'alice'"))
///     .order_by("id DESC")
///     .limit(10);
///
/// assert_eq!(
///     builder.build(),
///     "SELECT * FROM comment WHERE status = ? AND author = 'alice' ORDER BY id DESC LIMIT 10"
/// );
/// assert_eq!(builder.params(), &[Value::Integer(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    select_clause: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_clause: Option<String>,
    limit_clause: Option<usize>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器
    pub fn new(select: &str) -> Self {
        Self {
            select_clause: select.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_clause: None,
            limit_clause: None,
        }
    }

    /// 添加 WHERE 条件 (占位符与 params 一一对应)
    pub fn where_clause<I>(mut self, condition: &str, params: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// 条件添加无参数的 AND 子句
    pub fn and_if(mut self, condition: Option<&str>) -> Self {
        if let Some(cond) = condition {
            self.where_clauses.push(cond.to_string());
        }
        self
    }

    /// 等值条件: column = ?
    pub fn where_eq(self, column: &str, value: Value) -> Self {
        let condition = format!("{} = ?", column);
        self.where_clause(&condition, [value])
    }

    /// 集合成员条件: column IN (?, ...)
    ///
    /// 空集合不匹配任何记录
    pub fn where_in(self, column: &str, values: Vec<Value>) -> Self {
        if values.is_empty() {
            return self.where_clause("1 = 0", Vec::new());
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        let condition = format!("{} IN ({})", column, placeholders);
        self.where_clause(&condition, values)
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT 子句
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_clause = Some(n);
        self
    }

    /// 已绑定参数
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// 构建最终的 SQL 语句
    pub fn build(&self) -> String {
        let mut sql = self.select_clause.clone();

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit_clause {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}
