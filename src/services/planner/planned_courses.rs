use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{FieldErrors, PlannerError};
use crate::models::planner::requests::{
    PlannedCourseRequest, RemovePlannedCourseRequest, unknown_course,
};
use crate::services::current_user;
use crate::utils::validate::REQUIRED;

use super::PlannerService;

pub async fn list_planned_courses(
    service: &PlannerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let planned = storage.list_planned_courses(user.id).await?;
    Ok(HttpResponse::Ok().json(planned))
}

pub async fn upsert_planned_course(
    service: &PlannerService,
    request: &HttpRequest,
    planned_request: PlannedCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course_id, semester) = planned_request.validate().map_err(PlannerError::from)?;

    // 课程不存在属于字段校验错误
    if storage.get_course_by_id(course_id).await?.is_none() {
        return Err(unknown_course(course_id).into());
    }

    let planned = storage
        .upsert_planned_course(user.id, course_id, semester)
        .await?;

    Ok(HttpResponse::Created().json(planned))
}

pub async fn reassign_semester(
    service: &PlannerService,
    request: &HttpRequest,
    planned_request: PlannedCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course_id, semester) = planned_request.validate().map_err(PlannerError::from)?;

    match storage
        .update_planned_course_semester(user.id, course_id, semester)
        .await?
    {
        Some(planned) => Ok(HttpResponse::Ok().json(planned)),
        None => Err(PlannerError::not_found("Not found").into()),
    }
}

pub async fn remove_planned_course(
    service: &PlannerService,
    request: &HttpRequest,
    remove_request: RemovePlannedCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let course_id = remove_request
        .course_id
        .ok_or_else(|| FieldErrors::single("course_id", REQUIRED))?;

    if storage.delete_planned_course(user.id, course_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(PlannerError::not_found("Not found").into())
    }
}
