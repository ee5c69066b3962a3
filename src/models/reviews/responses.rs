use serde::Serialize;
use ts_rs::TS;

use super::entities::{CourseReview, round_one_decimal};

// 评价列表 / 提交结果，user 为评价者用户名
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewResponse {
    pub id: i64,
    pub review: f64,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: String,
}

impl From<CourseReview> for ReviewResponse {
    fn from(review: CourseReview) -> Self {
        Self {
            id: review.id,
            review: round_one_decimal(review.review),
            description: review.description,
            created_at: review.created_at,
            user: review.username,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewUser {
    pub username: String,
}

// 课程详情中的评价
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewDetailResponse {
    pub id: i64,
    pub review: f64,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: ReviewUser,
}

impl From<CourseReview> for ReviewDetailResponse {
    fn from(review: CourseReview) -> Self {
        Self {
            id: review.id,
            review: round_one_decimal(review.review),
            description: review.description,
            created_at: review.created_at,
            user: ReviewUser {
                username: review.username,
            },
        }
    }
}
