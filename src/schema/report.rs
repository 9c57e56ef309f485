use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    BadRequestResponse, InternalServerErrorResponse, ListResponse, NotFoundResponse,
    UnauthorizedResponse,
};

#[derive(Object, Deserialize)]
pub struct DetailReport {
    pub id: i32,
    pub report_date: String,
    pub title: String,
    pub content: String,
    pub employee_code: String,
    /// Author name resolved from the employees table for display.
    pub employee_name: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(ApiResponse)]
pub enum GetAllReportResponses {
    #[oai(status = 200)]
    Ok(Json<ListResponse<DetailReport>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ReportDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailReport>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ReportCreateRequest {
    /// Formatted as YYYY-MM-DD.
    pub report_date: String,
    pub title: String,
    pub content: String,
}

#[derive(Object, Deserialize)]
pub struct ReportCreateResponse {
    pub id: i32,
}

#[derive(ApiResponse)]
pub enum ReportCreateResponses {
    #[oai(status = 201)]
    Created(Json<ReportCreateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ReportUpdateRequest {
    /// Formatted as YYYY-MM-DD.
    pub report_date: String,
    pub title: String,
    pub content: String,
}

#[derive(Object, Deserialize)]
pub struct ReportUpdateResponse {
    pub id: i32,
}

#[derive(ApiResponse)]
pub enum ReportUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<ReportUpdateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct ReportDeleteResponse {
    pub id: i32,
}

#[derive(ApiResponse)]
pub enum ReportDeleteResponses {
    #[oai(status = 200)]
    Ok(Json<ReportDeleteResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
