use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::features::auth::guards::RequireAdmin;
use crate::features::bills::dtos::{
    BillListQuery, BillRemainingDto, BillResponseDto, CreateBillDto, FlatBillQuery, UpdateBillDto,
};
use crate::features::bills::services::BillService;
use crate::shared::batch::{BatchReport, BatchRequest};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/bills",
    request_body = CreateBillDto,
    responses(
        (status = 201, description = "Bill created", body = ApiResponse<BillResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Flat not found"),
        (status = 409, description = "A bill already exists for this flat and period")
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn create_bill(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    ValidatedJson(dto): ValidatedJson<CreateBillDto>,
) -> Result<(StatusCode, Json<ApiResponse<BillResponseDto>>)> {
    let bill = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(bill),
            Some("Bill has been created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/bills/upload",
    request_body = BatchRequest,
    responses(
        (status = 201, description = "Rows processed; rejected rows are listed in errors", body = ApiResponse<BatchReport>),
        (status = 400, description = "Data is invalid or missing")
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn upload_bills(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppJson(request): AppJson<BatchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BatchReport>>)> {
    let report = service.create_many(request.into_rows()?).await?;
    let message = report.summary("bills");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report), Some(message), None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bills",
    params(BillListQuery),
    responses(
        (status = 200, description = "Bills, newest period first", body = ApiResponse<Vec<BillResponseDto>>)
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_bills(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppQuery(query): AppQuery<BillListQuery>,
) -> Result<Json<ApiResponse<Vec<BillResponseDto>>>> {
    let pagination = query.pagination();
    let (bills, total) = service.list(pagination.as_ref()).await?;
    Ok(Json(ApiResponse::success(
        Some(bills),
        None,
        Some(Meta::list(total, pagination.as_ref())),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bills/flat/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID"), FlatBillQuery),
    responses(
        (status = 200, description = "Bills of the flat, newest period first", body = ApiResponse<Vec<BillResponseDto>>)
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn list_flat_bills(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppPath(flat_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<FlatBillQuery>,
) -> Result<Json<ApiResponse<Vec<BillResponseDto>>>> {
    let pagination = query.pagination();
    let (bills, total) = service
        .list_for_flat(flat_id, query.unpaid, pagination.as_ref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(bills),
        None,
        Some(Meta::list(total, pagination.as_ref())),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bills/flat/remaining/{flat_id}",
    params(("flat_id" = Uuid, Path, description = "Flat ID")),
    responses(
        (status = 200, description = "Outstanding total of the flat", body = ApiResponse<BillRemainingDto>)
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn flat_bill_remaining(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppPath(flat_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BillRemainingDto>>> {
    let remaining = service.remaining_for_flat(flat_id).await?;
    Ok(Json(ApiResponse::success(Some(remaining), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill ID")),
    request_body = UpdateBillDto,
    responses(
        (status = 200, description = "Bill updated", body = ApiResponse<BillResponseDto>),
        (status = 404, description = "Bill not found"),
        (status = 409, description = "Another bill exists for the target period")
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn update_bill(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBillDto>,
) -> Result<Json<ApiResponse<BillResponseDto>>> {
    let bill = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(bill),
        Some("Bill has been updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill deleted"),
        (status = 404, description = "Bill not found")
    ),
    tag = "bills",
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn delete_bill(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BillService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Bill has been deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::routes;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_resident_auth};
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> axum::Router {
        routes::routes(Arc::new(BillService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_data() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server
            .post("/api/bills/upload")
            .json(&json!({ "data": [] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_bill_rejects_negative_amount() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        server
            .post("/api/bills")
            .json(&json!({
                "flatId": "7f1a3c44-5d2e-4b8f-9a10-2b3c4d5e6f70",
                "month": 6,
                "year": 2024,
                "billAmount": -10
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bills_are_admin_only() {
        let server = TestServer::new(with_resident_auth(router())).unwrap();
        server
            .get("/api/bills")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
