use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let courses = storage.list_courses().await?;
    Ok(HttpResponse::Ok().json(courses))
}
