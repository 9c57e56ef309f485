use chrono::Local;
use sqlx::PgPool;

use crate::{
    core::security::hash_password,
    model::employee::{Employee, Role},
    repository,
};

/// Bootstrap an employee from the command line, typically the first
/// administrator.
pub async fn create_employee(
    pool: &PgPool,
    code: &str,
    name: &str,
    password: &str,
    admin: bool,
) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    let hashed_password = hash_password(password).unwrap();
    let now = Local::now().fixed_offset();
    let employee = Employee {
        code: code.to_string(),
        name: name.to_string(),
        password: hashed_password,
        role: if admin { Role::Admin } else { Role::General },
        delete_flg: false,
        created_at: Some(now),
        updated_at: Some(now),
    };
    repository::employee::create_employee(&mut tx, &employee)
        .await
        .unwrap();
    tx.commit().await?;
    Ok(())
}
