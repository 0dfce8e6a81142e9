// ==========================================
// 记录审核状态组件 - API层错误类型
// ==========================================
// 职责: 将 Repository / 配置错误转换为用户友好的错误消息
// 说明: 审核被否决不是错误,以 ModerationOutcome 返回
// ==========================================

use crate::config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    /// 存储数据越界 (数据完整性问题,需要人工修复)
    #[error("数据完整性错误: {0}")]
    DataIntegrityError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ConstraintViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DataIntegrityError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::Config(e) => ApiError::ConfigError(e.to_string()),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Comment".to_string(),
            id: "3".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg.contains("Comment(id=3)")));
    }

    #[test]
    fn test_field_value_error_is_data_integrity() {
        let err: ApiError = RepositoryError::FieldValueError {
            field: "status".to_string(),
            message: "值越界: 7".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::DataIntegrityError(_)));
    }

    #[test]
    fn test_validation_error_passthrough() {
        let err: ApiError = RepositoryError::ValidationError("正文不能为空".to_string()).into();
        assert_eq!(err.to_string(), "数据验证失败: 正文不能为空");
    }
}
