pub mod planned_courses;
pub mod semesters;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::planner::requests::{PlannedCourseRequest, RemovePlannedCourseRequest};
use crate::storage::Storage;

pub struct PlannerService {
    storage: Option<Arc<dyn Storage>>,
}

impl PlannerService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学期列表（首次访问自动创建默认学期）
    pub async fn list_semesters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        semesters::list_semesters(self, request).await
    }

    // 追加学期
    pub async fn add_semester(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        semesters::add_semester(self, request).await
    }

    // 删除最新学期
    pub async fn remove_latest_semester(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        semesters::remove_latest_semester(self, request).await
    }

    // 已规划课程列表
    pub async fn list_planned_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        planned_courses::list_planned_courses(self, request).await
    }

    // 规划课程（已存在则移动学期）
    pub async fn upsert_planned_course(
        &self,
        request: &HttpRequest,
        planned_request: PlannedCourseRequest,
    ) -> ActixResult<HttpResponse> {
        planned_courses::upsert_planned_course(self, request, planned_request).await
    }

    // 修改规划课程学期
    pub async fn reassign_semester(
        &self,
        request: &HttpRequest,
        planned_request: PlannedCourseRequest,
    ) -> ActixResult<HttpResponse> {
        planned_courses::reassign_semester(self, request, planned_request).await
    }

    // 移除规划课程
    pub async fn remove_planned_course(
        &self,
        request: &HttpRequest,
        remove_request: RemovePlannedCourseRequest,
    ) -> ActixResult<HttpResponse> {
        planned_courses::remove_planned_course(self, request, remove_request).await
    }
}
