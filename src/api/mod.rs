// ==========================================
// 记录审核状态组件 - API 层
// ==========================================
// 职责: 面向宿主应用的审核接口,统一错误类型
// ==========================================

pub mod error;
pub mod moderation_api;

pub use error::{ApiError, ApiResult};
pub use moderation_api::{CommentView, ModerationApi, ModerationResponse, StatusFilter};
