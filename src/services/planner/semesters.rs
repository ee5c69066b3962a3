use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::PlannerError;
use crate::models::planner::entities::{DEFAULT_SEMESTER_COUNT, SemesterRemoval};
use crate::services::current_user;

use super::PlannerService;

pub async fn list_semesters(
    service: &PlannerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let semesters = storage
        .ensure_default_semesters(user.id, DEFAULT_SEMESTER_COUNT)
        .await?;

    Ok(HttpResponse::Ok().json(semesters))
}

pub async fn add_semester(
    service: &PlannerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let semester = storage.create_next_semester(user.id).await?;
    tracing::debug!(
        "User {} added semester {}",
        user.username,
        semester.semester_number
    );

    Ok(HttpResponse::Created().json(semester))
}

pub async fn remove_latest_semester(
    service: &PlannerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.remove_latest_semester(user.id).await? {
        SemesterRemoval::Removed(semester) => {
            tracing::debug!(
                "User {} removed semester {}",
                user.username,
                semester.semester_number
            );
            Ok(HttpResponse::NoContent().finish())
        }
        SemesterRemoval::NoSemesters => {
            Err(PlannerError::not_found("No semesters to delete").into())
        }
        SemesterRemoval::HasCourses(number, count) => {
            tracing::debug!(
                "Refusing to remove semester {} of {}: {} planned course(s)",
                number,
                user.username,
                count
            );
            Err(PlannerError::conflict(
                "Cannot delete semester with courses. Remove all courses first.",
            )
            .into())
        }
    }
}
