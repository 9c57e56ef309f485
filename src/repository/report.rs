use chrono::{DateTime, FixedOffset, NaiveDate};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::report::{Report, TABLE_NAME},
};

pub async fn get_all_report(
    tx: &mut Transaction<'_, Postgres>,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Vec<Report>> {
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
        vec!["report_date DESC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Report>(&stmt, binds);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn get_report_by_employee_code(
    tx: &mut Transaction<'_, Postgres>,
    employee_code: &str,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Vec<Report>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(employee_code.to_string())];
    let mut filters: Vec<String> = vec!["employee_code = $1".to_string()];
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("delete_flg = false".to_string());
    }
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["report_date DESC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<Report>(&stmt, binds);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn get_report_by_employee_code_and_date(
    tx: &mut Transaction<'_, Postgres>,
    employee_code: &str,
    report_date: &NaiveDate,
) -> anyhow::Result<Vec<Report>> {
    let binds: Vec<SqlxBinds> = vec![
        SqlxBinds::String(employee_code.to_string()),
        SqlxBinds::Date(*report_date),
    ];
    let filters: Vec<String> = vec![
        "employee_code = $1".to_string(),
        "report_date = $2".to_string(),
        "delete_flg = false".to_string(),
    ];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let q = binds_query_as::<Report>(&stmt, binds);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn get_report_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Option<Report>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Int(id)];
    let mut filters: Vec<String> = vec!["id = $1".to_string()];
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    if exclude_soft_delete {
        filters.push("delete_flg = false".to_string());
    }
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let q = binds_query_as::<Report>(&stmt, binds);
    let report = q.fetch_optional(&mut **tx).await?;
    Ok(report)
}

/// Inserts the report and returns the database assigned id.
pub async fn create_report(
    tx: &mut Transaction<'_, Postgres>,
    report: &Report,
) -> anyhow::Result<i32> {
    let row: (i32,) = sqlx::query_as(
        format!(
            r#"
        INSERT INTO {} (report_date, title, content, employee_code, delete_flg, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(report.report_date)
    .bind(&report.title)
    .bind(&report.content)
    .bind(&report.employee_code)
    .bind(report.delete_flg)
    .bind(report.created_at)
    .bind(report.updated_at)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row.0)
}

pub async fn update_report(
    tx: &mut Transaction<'_, Postgres>,
    report: &mut Report,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    report.updated_at = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {}
            SET report_date = $1, title = $2, content = $3, updated_at = $4
            WHERE id = $5"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(report.report_date)
    .bind(&report.title)
    .bind(&report.content)
    .bind(now)
    .bind(report.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn soft_delete_report(
    tx: &mut Transaction<'_, Postgres>,
    report: &mut Report,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    report.delete_flg = true;
    report.updated_at = Some(*now);
    sqlx::query(
        format!(
            r#"UPDATE {} SET delete_flg = true, updated_at = $1
            WHERE id = $2"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(now)
    .bind(report.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
