use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use sqlx::prelude::FromRow;

pub const TABLE_NAME: &str = "public.reports";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Report {
    pub id: i32,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    pub employee_code: String,
    pub delete_flg: bool,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}
