use super::security::{generate_refresh_token_from_employee, generate_token_from_employee};
use crate::core::security::hash_password;
use crate::core::session::add_session;
use crate::model::employee::{Employee, Role};
use crate::settings::Config;
use chrono::Local;
use fake::{Fake, Faker};
use redis::ConnectionLike;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;

pub fn generate_random<T: fake::Dummy<fake::Faker>>() -> T {
    Faker.fake()
}

pub struct TestEmployee {
    pub employee: Employee,
    pub token: String,
    pub refresh_token: String,
}

pub async fn generate_test_employee<C: ConnectionLike>(
    db: &mut PoolConnection<Postgres>,
    redis_conn: &mut C,
    config: Config,
    code: &str,
    name: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<TestEmployee> {
    // Prepare employee
    let hashed_password = hash_password(password).unwrap();
    let now = Local::now().fixed_offset();
    let employee = Employee {
        code: code.to_string(),
        name: name.to_string(),
        password: hashed_password,
        role,
        delete_flg: false,
        created_at: Some(now),
        updated_at: Some(now),
    };

    // create employee on db
    sqlx::query(
        r#"
        INSERT INTO public.employees (code, name, password, role, delete_flg, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&employee.code)
    .bind(&employee.name)
    .bind(&employee.password)
    .bind(employee.role)
    .bind(employee.delete_flg)
    .bind(employee.created_at)
    .bind(employee.updated_at)
    .execute(&mut **db)
    .await?;

    // Generate token
    let token = generate_token_from_employee(employee.clone(), config.clone()).await?;
    let refresh_token =
        generate_refresh_token_from_employee(employee.clone(), config.clone()).await?;
    add_session(
        redis_conn,
        &employee,
        &config,
        token.clone(),
        refresh_token.clone(),
    )?;

    Ok(TestEmployee {
        employee,
        token,
        refresh_token,
    })
}
