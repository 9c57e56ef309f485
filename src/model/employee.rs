use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;

pub const TABLE_NAME: &str = "public.employees";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, sqlx::Type)]
#[sqlx(type_name = "employee_role", rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    General,
}

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Employee {
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub delete_flg: bool,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}
