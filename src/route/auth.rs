use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::{
        security::{
            generate_refresh_token_from_employee, generate_token_from_employee,
            get_employee_from_refresh_token, verify_hash_password, BearerAuthorization,
        },
        session::{add_session, get_session, remove_session},
        utils::datetime_to_string,
    },
    repository::employee::get_employee_by_code,
    schema::{
        auth::{
            LoginRequest, LoginResponse, LoginResponses, LogoutResponse, LogoutResponses,
            RefreshTokenRequest, RefreshTokenResponse, RefreshTokenResponses,
        },
        common::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
    },
    settings::get_config,
    AppState,
};

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

#[OpenApi]
impl ApiAuth {
    #[oai(path = "/auth/login", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_login(
        &self,
        json: Json<LoginRequest>,
        state: Data<&Arc<AppState>>,
    ) -> LoginResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
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
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "get redis pool connection",
                    &err.to_string(),
                )))
            }
        };

        // look the employee up by code, soft deleted employees cannot log in
        let employee = match get_employee_by_code(&mut tx, &json.code, None).await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "check employee on database",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if employee.is_none() {
            return LoginResponses::BadRequet(Json(BadRequestResponse {
                message: "Invalid credentials".to_string(),
            }));
        }
        let employee = employee.unwrap();

        // validate employee password
        let is_valid = match verify_hash_password(&json.password, &employee.password) {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "validate employee password",
                    &err.to_string(),
                )))
            }
        };
        if !is_valid {
            return LoginResponses::BadRequet(Json(BadRequestResponse {
                message: "Invalid credentials".to_string(),
            }));
        }

        let config = get_config();
        let token = match generate_token_from_employee(employee.clone(), config.clone()).await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_login",
                    "generate token",
                    &err.to_string(),
                )))
            }
        };

        let refresh_token =
            match generate_refresh_token_from_employee(employee.clone(), config.clone()).await {
                Ok(val) => val,
                Err(err) => {
                    return LoginResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.auth",
                            "auth_login",
                            "generate refresh token",
                            &err.to_string(),
                        ),
                    ))
                }
            };

        if let Err(err) = add_session(
            &mut redis_conn,
            &employee,
            &config,
            token.clone(),
            refresh_token.clone(),
        ) {
            return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_login",
                "add_session to redis",
                &err.to_string(),
            )));
        }
        let now = Local::now();
        let exp = now + Duration::minutes(config.jwt_exp as i64);
        let exp_refresh_token = now + Duration::minutes(config.jwt_refresh_exp as i64);
        LoginResponses::Ok(Json(LoginResponse {
            exp: datetime_to_string(exp.fixed_offset()),
            exp_in: now.timestamp() as i32 + config.jwt_exp as i32,
            exp_refresh_token: datetime_to_string(exp_refresh_token.fixed_offset()),
            refresh_token,
            token,
            token_type: "Bearer".to_string(),
        }))
    }

    #[oai(
        path = "/auth/refresh-token",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_refresh_token(
        &self,
        json: Json<RefreshTokenRequest>,
        state: Data<&Arc<AppState>>,
    ) -> RefreshTokenResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
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
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let config = get_config();
        let employee = match get_employee_from_refresh_token(
            &mut tx,
            Some(json.refresh_token.clone()),
            config.clone(),
        )
        .await
        {
            Ok(val) => val,
            Err(_) => {
                return RefreshTokenResponses::BadRequet(Json(BadRequestResponse {
                    message: "Invalid refresh token".to_string(),
                }))
            }
        };
        if employee.is_none() {
            return RefreshTokenResponses::BadRequet(Json(BadRequestResponse {
                message: "Invalid refresh token".to_string(),
            }));
        }
        let employee = employee.unwrap();

        let token = match generate_token_from_employee(employee.clone(), config.clone()).await {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_refresh_token",
                        "generate token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = add_session(
            &mut redis_conn,
            &employee,
            &config,
            token.clone(),
            json.refresh_token.clone(),
        ) {
            return RefreshTokenResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_refresh_token",
                    "add_session to redis",
                    &err.to_string(),
                ),
            ));
        }

        let now = Local::now();
        let exp = now + Duration::minutes(config.jwt_exp as i64);
        RefreshTokenResponses::Ok(Json(RefreshTokenResponse {
            exp: datetime_to_string(exp.fixed_offset()),
            exp_in: now.timestamp() as i32 + config.jwt_exp as i32,
            token,
            token_type: "Bearer".to_string(),
        }))
    }

    #[oai(path = "/auth/logout", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_logout(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LogoutResponses {
        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LogoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_logout",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let jwt_token = auth.0.token;
        if jwt_token.is_none() {
            return LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        let jwt_token = jwt_token.unwrap();

        let session = match get_session(&mut redis_conn, jwt_token.clone()) {
            Ok(val) => val,
            Err(err) => {
                return LogoutResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_logout",
                        "get session from redis",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if session.is_none() {
            return LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        if let Err(err) = remove_session(&mut redis_conn, jwt_token) {
            return LogoutResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_logout",
                "remove session from redis",
                &err.to_string(),
            )));
        }
        LogoutResponses::Ok(Json(LogoutResponse {
            message: "logged out".to_string(),
        }))
    }
}
