// ==========================================
// 记录审核状态组件 - 评论审核 API
// ==========================================
// 职责: 评论提交、审核操作、按状态查询
// 说明: 审核被否决时返回 Cancelled 结果而不是错误
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ActorContext, ActorId, Comment, ModerationStatus};
use crate::engine::{
    ModerationController, ModerationListener, ModerationListeners, ModerationLogListener,
    ModerationOutcome,
};
use crate::repository::{CommentRepository, ModerationLogRepository, ModerationQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// DTO
// ==========================================

/// 状态过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    Postponed,
    ApprovedWithPending,
}

impl StatusFilter {
    fn apply(self, query: ModerationQuery) -> ModerationQuery {
        match self {
            StatusFilter::Pending => query.pending(),
            StatusFilter::Approved => query.approved(),
            StatusFilter::Rejected => query.rejected(),
            StatusFilter::Postponed => query.postponed(),
            StatusFilter::ApprovedWithPending => query.approved_with_pending(),
        }
    }
}

/// 评论视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub status: ModerationStatus,
    pub status_label: String, // 当前语言显示名
    pub moderated_by: Option<ActorId>,
}

impl CommentView {
    fn from_comment(comment: Comment) -> ApiResult<Self> {
        let id = comment
            .id
            .ok_or_else(|| ApiError::InternalError("评论缺少主键".to_string()))?;
        Ok(Self {
            id,
            author: comment.author,
            body: comment.body,
            status_label: comment.status.localized_label(),
            status: comment.status,
            moderated_by: comment.moderated_by,
        })
    }
}

/// 审核操作响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationResponse {
    pub outcome: ModerationOutcome,
    pub comment: CommentView,
}

// ==========================================
// ModerationApi - 评论审核 API
// ==========================================
pub struct ModerationApi {
    comment_repo: Arc<CommentRepository>,
    listeners: ModerationListeners<Comment>,
}

impl ModerationApi {
    /// 创建 API 实例
    pub fn new(comment_repo: Arc<CommentRepository>) -> Self {
        Self {
            comment_repo,
            listeners: ModerationListeners::new(),
        }
    }

    /// 挂载审核日志 (每次成功审核写入 moderation_log)
    pub fn with_moderation_log(self, log_repo: Arc<ModerationLogRepository>) -> Self {
        self.with_listener(Arc::new(ModerationLogListener::new(log_repo)))
    }

    /// 挂载自定义监听器
    pub fn with_listener(mut self, listener: Arc<dyn ModerationListener<Comment>>) -> Self {
        self.listeners.register(listener);
        self
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 提交新评论 (待审核)
    pub fn submit_comment(
        &self,
        author: &str,
        body: &str,
        actor: &ActorContext,
    ) -> ApiResult<CommentView> {
        if author.trim().is_empty() {
            return Err(ApiError::InvalidInput("作者不能为空".to_string()));
        }

        let mut comment = Comment::new(author.trim(), body);
        self.comment_repo.insert(&mut comment, actor)?;
        CommentView::from_comment(comment)
    }

    /// 编辑评论正文 (不改变审核状态,但会重写审核人)
    pub fn edit_comment(&self, id: i64, body: &str, actor: &ActorContext) -> ApiResult<CommentView> {
        let mut comment = self.comment_repo.get(id)?;
        comment.body = body.to_string();
        self.comment_repo.update(&mut comment, actor)?;
        CommentView::from_comment(comment)
    }

    pub fn approve(&self, id: i64, actor: &ActorContext) -> ApiResult<ModerationResponse> {
        self.moderate(id, ModerationStatus::Approved, actor)
    }

    pub fn reject(&self, id: i64, actor: &ActorContext) -> ApiResult<ModerationResponse> {
        self.moderate(id, ModerationStatus::Rejected, actor)
    }

    pub fn postpone(&self, id: i64, actor: &ActorContext) -> ApiResult<ModerationResponse> {
        self.moderate(id, ModerationStatus::Postponed, actor)
    }

    pub fn reset_to_pending(&self, id: i64, actor: &ActorContext) -> ApiResult<ModerationResponse> {
        self.moderate(id, ModerationStatus::Pending, actor)
    }

    /// 设置评论审核状态
    ///
    /// # 返回
    /// - Ok(outcome=PERSISTED): 已保存
    /// - Ok(outcome=CANCELLED): 被否决,comment 为数据库中的原记录
    /// - Err(NotFound / ValidationError / ...): 加载或保存失败
    pub fn moderate(
        &self,
        id: i64,
        status: ModerationStatus,
        actor: &ActorContext,
    ) -> ApiResult<ModerationResponse> {
        let mut comment = self.comment_repo.get(id)?;

        let outcome = ModerationController::new(&mut comment, self.comment_repo.as_ref(), actor)
            .with_listeners(&self.listeners)
            .mark(status)?;

        let comment = match outcome {
            ModerationOutcome::Persisted => comment,
            // 内存实体已脏,对外返回持久化状态
            ModerationOutcome::Cancelled(_) => {
                let record = format!("comment#{}", id);
                tracing::info!(
                    comment_id = id,
                    "{}",
                    crate::i18n::t_with_args("moderation.cancelled", &[("record", record.as_str())])
                );
                self.comment_repo.get(id)?
            }
        };

        Ok(ModerationResponse {
            outcome,
            comment: CommentView::from_comment(comment)?,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按状态过滤查询评论 (按主键升序)
    pub fn list_by_status(&self, filter: StatusFilter) -> ApiResult<Vec<CommentView>> {
        let query = filter.apply(self.comment_repo.query()?).order_by("id ASC");
        self.comment_repo
            .find_all(&query)?
            .into_iter()
            .map(CommentView::from_comment)
            .collect()
    }

    /// 前台可见评论 (已通过 + 待审核)
    pub fn list_visible(&self) -> ApiResult<Vec<CommentView>> {
        self.list_by_status(StatusFilter::ApprovedWithPending)
    }

    /// 单条评论
    pub fn get_comment(&self, id: i64) -> ApiResult<CommentView> {
        CommentView::from_comment(self.comment_repo.get(id)?)
    }
}
