use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::programs::requests::{ProgramSearchParams, ProgramSearchQuery};
use crate::models::programs::responses::ProgramResponse;

use super::CatalogService;

pub async fn search_programs(
    service: &CatalogService,
    request: &HttpRequest,
    params: ProgramSearchParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = ProgramSearchQuery::from(params);

    let programs: Vec<ProgramResponse> = storage
        .search_programs(query)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(programs))
}
