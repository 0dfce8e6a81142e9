// ==========================================
// 记录审核状态组件 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,列名只来自已校验的配置
// ==========================================

pub mod comment_repo;
pub mod error;
pub mod moderation_log_repo;
pub mod moderation_query;
pub mod sql_builder;
pub mod store;

// 重导出核心仓储
pub use comment_repo::{CommentRepository, COMMENT_TABLE};
pub use error::{RepositoryError, RepositoryResult};
pub use moderation_log_repo::ModerationLogRepository;
pub use moderation_query::ModerationQuery;
pub use sql_builder::SqlQueryBuilder;
pub use store::{ModeratedStore, SaveHook};
