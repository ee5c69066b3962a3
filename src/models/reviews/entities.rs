use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程评价（附带评价者用户名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct CourseReview {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub course_id: i64,
    pub review: f64,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 评价提交结果：新建或覆盖已有评价
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewWrite {
    Created,
    Updated,
}

/// 保留一位小数
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 平均分：基于原始分数计算，仅对结果取一位小数；无评价时为 0
pub fn average_rating(reviews: &[CourseReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|r| r.review).sum();
    round_one_decimal(sum / reviews.len() as f64)
}
