pub mod detail;
pub mod list;
pub mod reviews;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{PlannerError, Result};
use crate::models::courses::entities::Course;
use crate::models::reviews::requests::ReviewSubmitRequest;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    /// 按 ID 取课程，不存在时返回 404
    pub(crate) async fn require_course(
        &self,
        storage: &Arc<dyn Storage>,
        course_id: i64,
    ) -> Result<Course> {
        storage
            .get_course_by_id(course_id)
            .await?
            .ok_or_else(|| PlannerError::not_found("Not found"))
    }

    // 课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 课程详情
    pub async fn get_course_detail(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_course_detail(self, request, course_id).await
    }

    // 课程评价列表
    pub async fn list_reviews(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        reviews::list_reviews(self, request, course_id).await
    }

    // 提交评价
    pub async fn submit_review(
        &self,
        request: &HttpRequest,
        course_id: i64,
        review_request: ReviewSubmitRequest,
    ) -> ActixResult<HttpResponse> {
        reviews::submit_review(self, request, course_id, review_request).await
    }
}
