use poem_openapi::{payload::Json, ApiResponse, Enum, Object};
use serde::Deserialize;

use crate::model::employee::Role;

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, ListResponse,
    NotFoundResponse, UnauthorizedResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Deserialize)]
#[oai(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleField {
    Admin,
    General,
}

impl From<RoleField> for Role {
    fn from(value: RoleField) -> Self {
        match value {
            RoleField::Admin => Role::Admin,
            RoleField::General => Role::General,
        }
    }
}

impl From<Role> for RoleField {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => RoleField::Admin,
            Role::General => RoleField::General,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct DetailEmployee {
    pub code: String,
    pub name: String,
    pub role: RoleField,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(ApiResponse)]
pub enum GetAllEmployeeResponses {
    #[oai(status = 200)]
    Ok(Json<ListResponse<DetailEmployee>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum EmployeeDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailEmployee>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct EmployeeCreateRequest {
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: RoleField,
}

#[derive(Object, Deserialize)]
pub struct EmployeeCreateResponse {
    pub code: String,
}

#[derive(ApiResponse)]
pub enum EmployeeCreateResponses {
    #[oai(status = 201)]
    Created(Json<EmployeeCreateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

/// Password is optional on update, an empty or absent password keeps the
/// stored one.
#[derive(Object, Deserialize)]
pub struct EmployeeUpdateRequest {
    pub name: String,
    pub password: Option<String>,
    pub role: RoleField,
}

#[derive(Object, Deserialize)]
pub struct EmployeeUpdateResponse {
    pub code: String,
}

#[derive(ApiResponse)]
pub enum EmployeeUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<EmployeeUpdateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct EmployeeDeleteResponse {
    pub code: String,
}

#[derive(ApiResponse)]
pub enum EmployeeDeleteResponses {
    #[oai(status = 200)]
    Ok(Json<EmployeeDeleteResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
