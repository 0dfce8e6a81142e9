// ==========================================
// 记录审核状态组件 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 组件定位: 为任意持久化记录挂载审核状态机
//   (待审核/已通过/已拒绝/已推迟) 与最近保存人审计
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 状态、操作人、可审核实体契约
pub mod domain;

// 数据仓储层 - 持久化协作者、状态查询过滤
pub mod repository;

// 引擎层 - 审核控制器、事件、审计
pub mod engine;

// 配置层 - 审核字段配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 评论审核接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    ActorContext, ActorId, Comment, InvalidStatusCode, Moderatable, ModerationLog,
    ModerationStatus, PreModerationHook,
};

pub use config::{ConfigError, ConfigManager, ModerationConfig};

pub use engine::{
    AuditStamper, CancelledBy, ModerationController, ModerationListener, ModerationListeners,
    ModerationOutcome,
};

pub use repository::{
    CommentRepository, ModeratedStore, ModerationQuery, RepositoryError, RepositoryResult,
};

pub use api::{ApiError, ModerationApi};

// ==========================================
// 常量定义
// ==========================================

// 组件版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 组件名称
pub const APP_NAME: &str = "记录审核状态组件";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
