use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::{
    core::{
        security::{get_employee_from_token, BearerAuthorization},
        utils::datetime_to_string_opt,
    },
    model::employee::Role,
    schema::{
        common::{
            BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, ListResponse,
            NotFoundResponse, UnauthorizedResponse,
        },
        employee::{
            DetailEmployee, EmployeeCreateRequest, EmployeeCreateResponse,
            EmployeeCreateResponses, EmployeeDeleteResponse, EmployeeDeleteResponses,
            EmployeeDetailResponses, EmployeeUpdateRequest, EmployeeUpdateResponse,
            EmployeeUpdateResponses, GetAllEmployeeResponses,
        },
    },
    service::employee::{
        delete_employee, find_all_employees, find_employee_by_code, save_employee,
        update_employee,
    },
    AppState,
};

#[derive(Tags)]
enum ApiEmployeeTags {
    Employee,
}

pub struct ApiEmployee;

#[OpenApi]
impl ApiEmployee {
    #[oai(path = "/employees/", method = "get", tag = "ApiEmployeeTags::Employee")]
    async fn get_all_employee_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetAllEmployeeResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return GetAllEmployeeResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "get_all_employee_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return GetAllEmployeeResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "get_all_employee_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate employee token
        let jwt_token = auth.0.token;
        let request_employee =
            match get_employee_from_token(&mut tx, &mut redis_conn, jwt_token.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return GetAllEmployeeResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.employee",
                            "get_all_employee_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return GetAllEmployeeResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        if request_employee.unwrap().role != Role::Admin {
            return GetAllEmployeeResponses::Forbidden(Json(ForbiddenResponse::default()));
        }

        let data = match find_all_employees(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return GetAllEmployeeResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "get_all_employee_api",
                        "find_all_employees",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let results: Vec<DetailEmployee> = data
            .into_iter()
            .map(|item| DetailEmployee {
                code: item.code,
                name: item.name,
                role: item.role.into(),
                created_at: datetime_to_string_opt(item.created_at),
                updated_at: datetime_to_string_opt(item.updated_at),
            })
            .collect();

        GetAllEmployeeResponses::Ok(Json(ListResponse {
            counts: results.len() as u32,
            results,
        }))
    }

    #[oai(
        path = "/employees/:code/",
        method = "get",
        tag = "ApiEmployeeTags::Employee"
    )]
    async fn employee_detail_api(
        &self,
        Path(code): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_detail_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_detail_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate employee token
        let jwt_token = auth.0.token;
        let request_employee =
            match get_employee_from_token(&mut tx, &mut redis_conn, jwt_token.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return EmployeeDetailResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.employee",
                            "employee_detail_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return EmployeeDetailResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        if request_employee.unwrap().role != Role::Admin {
            return EmployeeDetailResponses::Forbidden(Json(ForbiddenResponse::default()));
        }

        let employee = match find_employee_by_code(&mut tx, &code).await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_detail_api",
                        "find_employee_by_code",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let Some(employee) = employee else {
            return EmployeeDetailResponses::NotFound(Json(NotFoundResponse {
                message: format!("employee with code = {} not found", &code),
            }));
        };

        EmployeeDetailResponses::Ok(Json(DetailEmployee {
            code: employee.code,
            name: employee.name,
            role: employee.role.into(),
            created_at: datetime_to_string_opt(employee.created_at),
            updated_at: datetime_to_string_opt(employee.updated_at),
        }))
    }

    #[oai(
        path = "/employees/add",
        method = "post",
        tag = "ApiEmployeeTags::Employee"
    )]
    async fn employee_add_api(
        &self,
        json: Json<EmployeeCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeCreateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_add_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return EmployeeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_add_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate employee token
        let jwt_token = auth.0.token;
        let request_employee =
            match get_employee_from_token(&mut tx, &mut redis_conn, jwt_token.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return EmployeeCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.employee",
                            "employee_add_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return EmployeeCreateResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        if request_employee.unwrap().role != Role::Admin {
            return EmployeeCreateResponses::Forbidden(Json(ForbiddenResponse::default()));
        }

        let now = Local::now().fixed_offset();
        let result = match save_employee(
            &mut tx,
            &json.code,
            &json.name,
            &json.password,
            json.role.into(),
            &now,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return EmployeeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_add_api",
                        "save_employee",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let employee = match result {
            Ok(val) => val,
            Err(err) => {
                return EmployeeCreateResponses::BadRequest(Json(BadRequestResponse {
                    message: err.message().to_string(),
                }))
            }
        };

        if let Err(err) = tx.commit().await {
            return EmployeeCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.employee",
                    "employee_add_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EmployeeCreateResponses::Created(Json(EmployeeCreateResponse {
            code: employee.code,
        }))
    }

    #[oai(
        path = "/employees/update/:code",
        method = "post",
        tag = "ApiEmployeeTags::Employee"
    )]
    async fn employee_update_api(
        &self,
        Path(code): Path<String>,
        json: Json<EmployeeUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeUpdateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_update_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return EmployeeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_update_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate employee token
        let jwt_token = auth.0.token;
        let request_employee =
            match get_employee_from_token(&mut tx, &mut redis_conn, jwt_token.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return EmployeeUpdateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.employee",
                            "employee_update_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return EmployeeUpdateResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        if request_employee.unwrap().role != Role::Admin {
            return EmployeeUpdateResponses::Forbidden(Json(ForbiddenResponse::default()));
        }

        let now = Local::now().fixed_offset();
        let password = json.password.clone().unwrap_or_default();
        let result = match update_employee(
            &mut tx,
            &code,
            &json.name,
            json.role.into(),
            &password,
            &now,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return EmployeeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_update_api",
                        "update_employee",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let employee = match result {
            Ok(val) => val,
            Err(err) => {
                use crate::service::employee::EmployeeUpdateError;
                match err {
                    EmployeeUpdateError::NotFound => {
                        return EmployeeUpdateResponses::NotFound(Json(NotFoundResponse {
                            message: format!("employee with code = {} not found", &code),
                        }))
                    }
                    EmployeeUpdateError::Password(_) => {
                        return EmployeeUpdateResponses::BadRequest(Json(BadRequestResponse {
                            message: err.message().to_string(),
                        }))
                    }
                }
            }
        };

        if let Err(err) = tx.commit().await {
            return EmployeeUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.employee",
                    "employee_update_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EmployeeUpdateResponses::Ok(Json(EmployeeUpdateResponse {
            code: employee.code,
        }))
    }

    #[oai(
        path = "/employees/:code/delete",
        method = "post",
        tag = "ApiEmployeeTags::Employee"
    )]
    async fn employee_delete_api(
        &self,
        Path(code): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EmployeeDeleteResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_delete_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_delete_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate employee token
        let jwt_token = auth.0.token;
        let request_employee =
            match get_employee_from_token(&mut tx, &mut redis_conn, jwt_token.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return EmployeeDeleteResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.employee",
                            "employee_delete_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return EmployeeDeleteResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        let request_employee = request_employee.unwrap();
        if request_employee.role != Role::Admin {
            return EmployeeDeleteResponses::Forbidden(Json(ForbiddenResponse::default()));
        }

        let now = Local::now().fixed_offset();
        let result = match delete_employee(&mut tx, &code, &request_employee, &now).await {
            Ok(val) => val,
            Err(err) => {
                return EmployeeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.employee",
                        "employee_delete_api",
                        "delete_employee",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let employee = match result {
            Ok(val) => val,
            Err(err) => {
                use crate::service::employee::EmployeeDeleteError;
                match err {
                    EmployeeDeleteError::NotFound => {
                        return EmployeeDeleteResponses::NotFound(Json(NotFoundResponse {
                            message: format!("employee with code = {} not found", &code),
                        }))
                    }
                    EmployeeDeleteError::SelfDelete => {
                        return EmployeeDeleteResponses::BadRequest(Json(BadRequestResponse {
                            message: err.message().to_string(),
                        }))
                    }
                }
            }
        };

        if let Err(err) = tx.commit().await {
            return EmployeeDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.employee",
                    "employee_delete_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EmployeeDeleteResponses::Ok(Json(EmployeeDeleteResponse {
            code: employee.code,
        }))
    }
}
