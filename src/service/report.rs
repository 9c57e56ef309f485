use chrono::{DateTime, FixedOffset, NaiveDate};
use sqlx::{Postgres, Transaction};

use crate::{
    model::{
        employee::Role,
        report::Report,
    },
    repository::{
        employee::get_employee_by_code,
        report::{
            create_report, get_all_report, get_report_by_employee_code,
            get_report_by_employee_code_and_date, get_report_by_id, soft_delete_report,
            update_report as update_report_row,
        },
    },
};

pub const TITLE_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSaveError {
    BlankTitle,
    TitleTooLong,
    BlankContent,
    DuplicateDate,
}

impl ReportSaveError {
    pub fn message(&self) -> &'static str {
        match self {
            ReportSaveError::BlankTitle => "title is required",
            ReportSaveError::TitleTooLong => "title must be 100 characters or less",
            ReportSaveError::BlankContent => "content is required",
            ReportSaveError::DuplicateDate => "a report for this date is already registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportUpdateError {
    NotFound,
    Validation(ReportSaveError),
}

impl ReportUpdateError {
    pub fn message(&self) -> &'static str {
        match self {
            ReportUpdateError::NotFound => "report not found",
            ReportUpdateError::Validation(err) => err.message(),
        }
    }
}

/// An absent employee is never an admin.
pub async fn is_admin(tx: &mut Transaction<'_, Postgres>, code: &str) -> anyhow::Result<bool> {
    let employee = get_employee_by_code(tx, code, None).await?;
    Ok(employee.map(|e| e.role == Role::Admin).unwrap_or(false))
}

pub async fn get_all_reports(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<Vec<Report>> {
    get_all_report(tx, None).await
}

pub async fn get_reports_by_employee(
    tx: &mut Transaction<'_, Postgres>,
    employee_code: &str,
) -> anyhow::Result<Vec<Report>> {
    get_report_by_employee_code(tx, employee_code, None).await
}

pub async fn is_report_date_duplicate(
    tx: &mut Transaction<'_, Postgres>,
    employee_code: &str,
    report_date: &NaiveDate,
) -> anyhow::Result<bool> {
    let reports = get_report_by_employee_code_and_date(tx, employee_code, report_date).await?;
    Ok(!reports.is_empty())
}

fn check_fields(title: &str, content: &str) -> Result<(), ReportSaveError> {
    if title.is_empty() {
        return Err(ReportSaveError::BlankTitle);
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ReportSaveError::TitleTooLong);
    }
    if content.is_empty() {
        return Err(ReportSaveError::BlankContent);
    }
    Ok(())
}

/// Registers a day report for the given employee. One report per employee
/// per date.
pub async fn save_report(
    tx: &mut Transaction<'_, Postgres>,
    employee_code: &str,
    report_date: NaiveDate,
    title: &str,
    content: &str,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Report, ReportSaveError>> {
    if let Err(err) = check_fields(title, content) {
        return Ok(Err(err));
    }
    if is_report_date_duplicate(tx, employee_code, &report_date).await? {
        return Ok(Err(ReportSaveError::DuplicateDate));
    }

    let mut report = Report {
        id: 0,
        report_date,
        title: title.to_string(),
        content: content.to_string(),
        employee_code: employee_code.to_string(),
        delete_flg: false,
        created_at: Some(*now),
        updated_at: Some(*now),
    };
    report.id = create_report(tx, &report).await?;
    Ok(Ok(report))
}

pub async fn get_report(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<Report>> {
    get_report_by_id(tx, id, None).await
}

/// Overwrites date, title and content of an existing report. The duplicate
/// date check only applies when the date actually changed, so editing the
/// title of a report never trips over the report itself.
pub async fn update_report(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    report_date: NaiveDate,
    title: &str,
    content: &str,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Report, ReportUpdateError>> {
    let existing = get_report_by_id(tx, id, None).await?;
    let Some(mut existing) = existing else {
        return Ok(Err(ReportUpdateError::NotFound));
    };

    if let Err(err) = check_fields(title, content) {
        return Ok(Err(ReportUpdateError::Validation(err)));
    }
    if existing.report_date != report_date
        && is_report_date_duplicate(tx, &existing.employee_code, &report_date).await?
    {
        return Ok(Err(ReportUpdateError::Validation(
            ReportSaveError::DuplicateDate,
        )));
    }

    existing.report_date = report_date;
    existing.title = title.to_string();
    existing.content = content.to_string();
    update_report_row(tx, &mut existing, now).await?;
    Ok(Ok(existing))
}

/// Soft deletes a report by id.
pub async fn delete_report(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Report, ReportUpdateError>> {
    let existing = get_report_by_id(tx, id, None).await?;
    let Some(mut existing) = existing else {
        return Ok(Err(ReportUpdateError::NotFound));
    };
    soft_delete_report(tx, &mut existing, now).await?;
    Ok(Ok(existing))
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use sqlx::PgPool;

    use super::*;
    use crate::model::employee::Role;
    use crate::service::employee::save_employee;

    #[sqlx::test]
    async fn test_save_report_and_duplicate_date(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "1000", "Sato Taro", "abcd1234", Role::General, &now).await?;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let res = save_report(&mut tx, "1000", date, "first", "done things", &now).await?;
        assert!(res.is_ok());
        let report = res.unwrap();
        assert!(report.id > 0);
        assert!(!report.delete_flg);

        // second report on the same date for the same employee is rejected
        let res = save_report(&mut tx, "1000", date, "second", "more things", &now).await?;
        assert_eq!(res.unwrap_err(), ReportSaveError::DuplicateDate);

        // but another employee may use the same date
        save_employee(&mut tx, "2000", "Suzuki Hanako", "efgh5678", Role::General, &now).await?;
        let res = save_report(&mut tx, "2000", date, "mine", "other things", &now).await?;
        assert!(res.is_ok());
        Ok(())
    }

    #[sqlx::test]
    async fn test_save_report_field_validation(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "1000", "Sato Taro", "abcd1234", Role::General, &now).await?;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let res = save_report(&mut tx, "1000", date, "", "content", &now).await?;
        assert_eq!(res.unwrap_err(), ReportSaveError::BlankTitle);

        let long_title = "a".repeat(101);
        let res = save_report(&mut tx, "1000", date, &long_title, "content", &now).await?;
        assert_eq!(res.unwrap_err(), ReportSaveError::TitleTooLong);

        let ok_title = "a".repeat(100);
        let res = save_report(&mut tx, "1000", date, &ok_title, "", &now).await?;
        assert_eq!(res.unwrap_err(), ReportSaveError::BlankContent);
        Ok(())
    }

    #[sqlx::test]
    async fn test_lists_ordered_and_filtered_by_owner(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "1000", "Sato Taro", "abcd1234", Role::General, &now).await?;
        save_employee(&mut tx, "2000", "Suzuki Hanako", "efgh5678", Role::General, &now).await?;

        for (code, day) in [("1000", 1), ("1000", 3), ("2000", 2)] {
            let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            save_report(&mut tx, code, date, "title", "content", &now)
                .await?
                .unwrap();
        }

        let all = get_all_reports(&mut tx).await?;
        assert_eq!(all.len(), 3);
        // newest date first
        let dates: Vec<u32> = all
            .iter()
            .map(|r| {
                use chrono::Datelike;
                r.report_date.day()
            })
            .collect();
        assert_eq!(dates, vec![3, 2, 1]);

        let own = get_reports_by_employee(&mut tx, "1000").await?;
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|r| r.employee_code == "1000"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_is_admin(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "admin01", "Admin", "abcd1234", Role::Admin, &now).await?;
        save_employee(&mut tx, "user01", "User", "efgh5678", Role::General, &now).await?;

        assert!(is_admin(&mut tx, "admin01").await?);
        assert!(!is_admin(&mut tx, "user01").await?);
        assert!(!is_admin(&mut tx, "nobody").await?);
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_report(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "1000", "Sato Taro", "abcd1234", Role::General, &now).await?;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = save_report(&mut tx, "1000", date, "title", "content", &now)
            .await?
            .unwrap();

        // same date, new text: no duplicate complaint
        let res = update_report(&mut tx, report.id, date, "new title", "new content", &now).await?;
        let updated = res.unwrap();
        assert_eq!(updated.title, "new title".to_string());

        // moving onto another report's date is rejected
        let other_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        save_report(&mut tx, "1000", other_date, "other", "content", &now)
            .await?
            .unwrap();
        let res = update_report(&mut tx, report.id, other_date, "title", "content", &now).await?;
        assert_eq!(
            res.unwrap_err(),
            ReportUpdateError::Validation(ReportSaveError::DuplicateDate)
        );

        let res = update_report(&mut tx, 424242, date, "title", "content", &now).await?;
        assert_eq!(res.unwrap_err(), ReportUpdateError::NotFound);
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_report_soft_deletes(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let now = Local::now().fixed_offset();
        save_employee(&mut tx, "1000", "Sato Taro", "abcd1234", Role::General, &now).await?;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = save_report(&mut tx, "1000", date, "title", "content", &now)
            .await?
            .unwrap();

        let res = delete_report(&mut tx, report.id, &now).await?;
        assert!(res.is_ok());

        // default reads no longer see the report, the row is still there
        assert!(get_report(&mut tx, report.id).await?.is_none());
        assert!(get_all_reports(&mut tx).await?.is_empty());
        let row: (bool,) = sqlx::query_as("SELECT delete_flg FROM public.reports WHERE id = $1")
            .bind(report.id)
            .fetch_one(&mut *tx)
            .await?;
        assert!(row.0);

        let res = delete_report(&mut tx, report.id, &now).await?;
        assert_eq!(res.unwrap_err(), ReportUpdateError::NotFound);
        Ok(())
    }
}
