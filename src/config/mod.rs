// ==========================================
// 记录审核状态组件 - 配置层
// ==========================================
// 职责: 审核字段配置 (列名覆写、审核人审计开关)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod moderation_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use moderation_config::{
    validate_identifier, ConfigError, ModerationConfig, ModerationConfigBuilder,
};
