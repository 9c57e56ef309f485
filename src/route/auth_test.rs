use std::sync::Arc;

use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::{security::hash_password, session::get_session, test_utils::generate_test_employee},
    factory::employee::EmployeeFactory,
    init_openapi_route,
    model::employee::{Employee, Role},
    settings::get_config,
    AppState,
};

#[derive(Clone)]
struct LoginExt {
    pub code: String,
    pub password_hash: String,
}

#[sqlx::test]
async fn test_auth_login_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config();
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
    });
    let mut factory = EmployeeFactory::<LoginExt>::new();
    factory.modified_one(|data, ext| Employee {
        code: ext.code,
        name: data.name.clone(),
        password: ext.password_hash,
        role: Role::General,
        delete_flg: false,
        created_at: data.created_at,
        updated_at: data.updated_at,
    });
    let ext = LoginExt {
        code: "1000".to_string(),
        password_hash: hash_password("abcd1234").unwrap(),
    };
    factory.generate_one(&app_state.db, ext).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({
            "code": "1000",
            "password": "abcd1234",
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let object = json.value().object();
    assert_eq!(object.get("token_type").string(), "Bearer");
    let token = object.get("token").string();
    assert!(!token.is_empty());
    // the session is stored on redis
    let mut redis_conn = app_state.redis_conn.get()?;
    let session = get_session(&mut redis_conn, token.to_string())?;
    assert!(session.is_some());
    assert_eq!(session.unwrap().employee_code, "1000".to_string());
    Ok(())
}

#[sqlx::test]
async fn test_auth_login_api_wrong_password(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config();
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
    });
    let mut factory = EmployeeFactory::<LoginExt>::new();
    factory.modified_one(|data, ext| Employee {
        code: ext.code,
        name: data.name.clone(),
        password: ext.password_hash,
        role: Role::General,
        delete_flg: false,
        created_at: data.created_at,
        updated_at: data.updated_at,
    });
    let ext = LoginExt {
        code: "1000".to_string(),
        password_hash: hash_password("abcd1234").unwrap(),
    };
    factory.generate_one(&app_state.db, ext).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({
            "code": "1000",
            "password": "wrongpassword",
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[sqlx::test]
async fn test_auth_login_api_soft_deleted_employee(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config();
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
    });
    let mut factory = EmployeeFactory::<LoginExt>::new();
    factory.modified_one(|data, ext| Employee {
        code: ext.code,
        name: data.name.clone(),
        password: ext.password_hash,
        role: Role::General,
        delete_flg: true,
        created_at: data.created_at,
        updated_at: data.updated_at,
    });
    let ext = LoginExt {
        code: "1000".to_string(),
        password_hash: hash_password("abcd1234").unwrap(),
    };
    factory.generate_one(&app_state.db, ext).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({
            "code": "1000",
            "password": "abcd1234",
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[sqlx::test]
async fn test_auth_refresh_token_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config();
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_employee = generate_test_employee(
        &mut db,
        &mut redis_conn,
        config.clone(),
        "1000",
        "Sato Taro",
        "abcd1234",
        Role::General,
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/refresh-token")
        .body_json(&json!({
            "refresh_token": test_employee.refresh_token,
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let token = json.value().object().get("token").string();
    assert!(!token.is_empty());
    Ok(())
}

#[sqlx::test]
async fn test_auth_logout_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let mut config = get_config();
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
    });
    let mut db = app_state.db.acquire().await?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let test_employee = generate_test_employee(
        &mut db,
        &mut redis_conn,
        config.clone(),
        "1000",
        "Sato Taro",
        "abcd1234",
        Role::General,
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/auth/logout")
        .header(
            "authorization",
            format!("Bearer {}", test_employee.token),
        )
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let session = get_session(&mut redis_conn, test_employee.token.clone())?;
    assert!(session.is_none());
    Ok(())
}
