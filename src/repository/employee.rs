use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::employee::{Employee, TABLE_NAME},
};

pub async fn get_all_employee(
    tx: &mut Transaction<'_, Postgres>,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Vec<Employee>> {
    let binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("delete_flg = false".to_string());
    }

    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["code ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Employee>(&stmt, binds);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn get_employee_by_code(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Option<Employee>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(code.to_string())];
    let mut filters: Vec<String> = vec!["code = $1".to_string()];
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("delete_flg = false".to_string());
    }
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let q = binds_query_as::<Employee>(&stmt, binds);
    let employee = q.fetch_optional(&mut **tx).await?;
    Ok(employee)
}

pub async fn create_employee(
    tx: &mut Transaction<'_, Postgres>,
    employee: &Employee,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (code, name, password, role, delete_flg, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&employee.code)
    .bind(&employee.name)
    .bind(&employee.password)
    .bind(employee.role)
    .bind(employee.delete_flg)
    .bind(employee.created_at)
    .bind(employee.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_employee(
    tx: &mut Transaction<'_, Postgres>,
    employee: &mut Employee,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    employee.updated_at = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET name = $1, password = $2, role = $3, updated_at = $4
            WHERE code = $5"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&employee.name)
    .bind(&employee.password)
    .bind(employee.role)
    .bind(now)
    .bind(&employee.code)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn soft_delete_employee(
    tx: &mut Transaction<'_, Postgres>,
    employee: &mut Employee,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    employee.delete_flg = true;
    employee.updated_at = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {} SET delete_flg = true, updated_at = $1
            WHERE code = $2"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(now)
    .bind(&employee.code)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
