use std::sync::Arc;

use chrono::{Local, NaiveDate};
use poem::web::Data;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::{
    core::{
        security::{get_employee_from_token, BearerAuthorization},
        utils::{date_to_string, datetime_to_string_opt},
    },
    model::{employee::Employee, report::Report},
    repository::employee::get_employee_by_code,
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, ListResponse, NotFoundResponse,
            UnauthorizedResponse,
        },
        report::{
            DetailReport, GetAllReportResponses, ReportCreateRequest, ReportCreateResponse,
            ReportCreateResponses, ReportDeleteResponse, ReportDeleteResponses,
            ReportDetailResponses, ReportUpdateRequest, ReportUpdateResponse,
            ReportUpdateResponses,
        },
    },
    service::report::{
        delete_report, get_all_reports, get_report, get_reports_by_employee, is_admin,
        save_report, update_report, ReportUpdateError,
    },
    AppState,
};

#[derive(Tags)]
enum ApiReportTags {
    Report,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn detail_report(report: Report, employee: Option<Employee>) -> DetailReport {
    DetailReport {
        id: report.id,
        report_date: date_to_string(report.report_date),
        title: report.title,
        content: report.content,
        employee_code: report.employee_code,
        employee_name: employee.map(|e| e.name),
        created_at: datetime_to_string_opt(report.created_at),
        updated_at: datetime_to_string_opt(report.updated_at),
    }
}

pub struct ApiReport;

#[OpenApi]
impl ApiReport {
    #[oai(path = "/reports/", method = "get", tag = "ApiReportTags::Report")]
    async fn get_all_report_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> GetAllReportResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return GetAllReportResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "get_all_report_api",
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
                return GetAllReportResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "get_all_report_api",
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
                    return GetAllReportResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "get_all_report_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return GetAllReportResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        let request_employee = request_employee.unwrap();

        // admins see every report, everyone else only their own
        let admin = match is_admin(&mut tx, &request_employee.code).await {
            Ok(val) => val,
            Err(err) => {
                return GetAllReportResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "get_all_report_api",
                        "is_admin",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let data = if admin {
            match get_all_reports(&mut tx).await {
                Ok(val) => val,
                Err(err) => {
                    return GetAllReportResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "get_all_report_api",
                            "get_all_reports",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        } else {
            match get_reports_by_employee(&mut tx, &request_employee.code).await {
                Ok(val) => val,
                Err(err) => {
                    return GetAllReportResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "get_all_report_api",
                            "get_reports_by_employee",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        };

        // resolve author names for display
        let mut results: Vec<DetailReport> = vec![];
        for item in data {
            let author = match get_employee_by_code(&mut tx, &item.employee_code, Some(false))
                .await
            {
                Ok(val) => val,
                Err(err) => {
                    return GetAllReportResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "get_all_report_api",
                            "get_employee_by_code for author",
                            &err.to_string(),
                        ),
                    ))
                }
            };
            results.push(detail_report(item, author));
        }

        GetAllReportResponses::Ok(Json(ListResponse {
            counts: results.len() as u32,
            results,
        }))
    }

    #[oai(
        path = "/reports/detail/:id",
        method = "get",
        tag = "ApiReportTags::Report"
    )]
    async fn report_detail_api(
        &self,
        Path(id): Path<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ReportDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ReportDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_detail_api",
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
                return ReportDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_detail_api",
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
                    return ReportDetailResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "report_detail_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return ReportDetailResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let report = match get_report(&mut tx, id).await {
            Ok(val) => val,
            Err(err) => {
                return ReportDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_detail_api",
                        "get_report",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let Some(report) = report else {
            return ReportDetailResponses::NotFound(Json(NotFoundResponse {
                message: format!("report with id = {} not found", id),
            }));
        };

        let author = match get_employee_by_code(&mut tx, &report.employee_code, Some(false)).await
        {
            Ok(val) => val,
            Err(err) => {
                return ReportDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_detail_api",
                        "get_employee_by_code for author",
                        &err.to_string(),
                    ),
                ))
            }
        };

        ReportDetailResponses::Ok(Json(detail_report(report, author)))
    }

    #[oai(path = "/reports/add", method = "post", tag = "ApiReportTags::Report")]
    async fn report_add_api(
        &self,
        json: Json<ReportCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ReportCreateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ReportCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_add_api",
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
                return ReportCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_add_api",
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
                    return ReportCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "report_add_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return ReportCreateResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }
        let request_employee = request_employee.unwrap();

        let Some(report_date) = parse_report_date(&json.report_date) else {
            return ReportCreateResponses::BadRequest(Json(BadRequestResponse {
                message: "report date must be formatted as YYYY-MM-DD".to_string(),
            }));
        };

        // the report always belongs to the logged in employee
        let now = Local::now().fixed_offset();
        let result = match save_report(
            &mut tx,
            &request_employee.code,
            report_date,
            &json.title,
            &json.content,
            &now,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return ReportCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_add_api",
                        "save_report",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let report = match result {
            Ok(val) => val,
            Err(err) => {
                return ReportCreateResponses::BadRequest(Json(BadRequestResponse {
                    message: err.message().to_string(),
                }))
            }
        };

        if let Err(err) = tx.commit().await {
            return ReportCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.report",
                    "report_add_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ReportCreateResponses::Created(Json(ReportCreateResponse { id: report.id }))
    }

    #[oai(
        path = "/reports/update/:id",
        method = "post",
        tag = "ApiReportTags::Report"
    )]
    async fn report_update_api(
        &self,
        Path(id): Path<i32>,
        json: Json<ReportUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ReportUpdateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ReportUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_update_api",
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
                return ReportUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_update_api",
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
                    return ReportUpdateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "report_update_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return ReportUpdateResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let Some(report_date) = parse_report_date(&json.report_date) else {
            return ReportUpdateResponses::BadRequest(Json(BadRequestResponse {
                message: "report date must be formatted as YYYY-MM-DD".to_string(),
            }));
        };

        let now = Local::now().fixed_offset();
        let result = match update_report(&mut tx, id, report_date, &json.title, &json.content, &now)
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return ReportUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_update_api",
                        "update_report",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let report = match result {
            Ok(val) => val,
            Err(ReportUpdateError::NotFound) => {
                return ReportUpdateResponses::NotFound(Json(NotFoundResponse {
                    message: format!("report with id = {} not found", id),
                }))
            }
            Err(err) => {
                return ReportUpdateResponses::BadRequest(Json(BadRequestResponse {
                    message: err.message().to_string(),
                }))
            }
        };

        if let Err(err) = tx.commit().await {
            return ReportUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.report",
                    "report_update_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ReportUpdateResponses::Ok(Json(ReportUpdateResponse { id: report.id }))
    }

    #[oai(
        path = "/reports/:id/delete",
        method = "post",
        tag = "ApiReportTags::Report"
    )]
    async fn report_delete_api(
        &self,
        Path(id): Path<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ReportDeleteResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ReportDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_delete_api",
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
                return ReportDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_delete_api",
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
                    return ReportDeleteResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.report",
                            "report_delete_api",
                            "get employee from token",
                            &err.to_string(),
                        ),
                    ))
                }
            };
        if request_employee.is_none() {
            return ReportDeleteResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let now = Local::now().fixed_offset();
        let result = match delete_report(&mut tx, id, &now).await {
            Ok(val) => val,
            Err(err) => {
                return ReportDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.report",
                        "report_delete_api",
                        "delete_report",
                        &err.to_string(),
                    ),
                ))
            }
        };
        let report = match result {
            Ok(val) => val,
            Err(_) => {
                return ReportDeleteResponses::NotFound(Json(NotFoundResponse {
                    message: format!("report with id = {} not found", id),
                }))
            }
        };

        if let Err(err) = tx.commit().await {
            return ReportDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.report",
                    "report_delete_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ReportDeleteResponses::Ok(Json(ReportDeleteResponse { id: report.id }))
    }
}
