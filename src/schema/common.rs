use poem_openapi::{
    types::{ParseFromJSON, ToJSON},
    Object,
};
use serde::Deserialize;

#[derive(Object, Deserialize)]
pub struct BadRequestResponse {
    pub message: String,
}

#[derive(Object, Deserialize)]
pub struct UnauthorizedResponse {
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            message: "unauthorized".to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ForbiddenResponse {
    pub message: String,
}

impl Default for ForbiddenResponse {
    fn default() -> Self {
        Self {
            message: "forbidden".to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct NotFoundResponse {
    pub message: String,
}

#[derive(Object, Deserialize)]
pub struct InternalServerErrorResponse {
    pub message: String,
}

impl InternalServerErrorResponse {
    /// Logs where the failure happened and hands the client a generic
    /// message only.
    pub fn new(module: &str, function: &str, step: &str, error: &str) -> Self {
        tracing::error!(
            module = module,
            function = function,
            step = step,
            error = error,
            "internal server error"
        );
        Self {
            message: "internal server error".to_string(),
        }
    }
}

#[derive(Object)]
pub struct ListResponse<T: ParseFromJSON + ToJSON> {
    pub counts: u32,
    pub results: Vec<T>,
}
