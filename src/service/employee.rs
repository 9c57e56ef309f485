use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        security::hash_password,
        validation::{check_password, check_password_for_update, PasswordError},
    },
    model::employee::{Employee, Role},
    repository::employee::{
        create_employee, get_all_employee, get_employee_by_code, soft_delete_employee,
        update_employee as update_employee_row,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSaveError {
    Password(PasswordError),
    DuplicateCode,
}

impl EmployeeSaveError {
    pub fn message(&self) -> &'static str {
        match self {
            EmployeeSaveError::Password(err) => err.message(),
            EmployeeSaveError::DuplicateCode => "employee code is already registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeUpdateError {
    Password(PasswordError),
    NotFound,
}

impl EmployeeUpdateError {
    pub fn message(&self) -> &'static str {
        match self {
            EmployeeUpdateError::Password(err) => err.message(),
            EmployeeUpdateError::NotFound => "employee not found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeDeleteError {
    SelfDelete,
    NotFound,
}

impl EmployeeDeleteError {
    pub fn message(&self) -> &'static str {
        match self {
            EmployeeDeleteError::SelfDelete => "cannot delete the employee you are logged in as",
            EmployeeDeleteError::NotFound => "employee not found",
        }
    }
}

/// Registers a new employee. The password is validated, then the code is
/// checked against every existing row including soft deleted ones, since
/// the code is the primary key.
pub async fn save_employee(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    name: &str,
    password: &str,
    role: Role,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Employee, EmployeeSaveError>> {
    if let Err(err) = check_password(password) {
        return Ok(Err(EmployeeSaveError::Password(err)));
    }

    let existing = get_employee_by_code(tx, code, Some(false)).await?;
    if existing.is_some() {
        return Ok(Err(EmployeeSaveError::DuplicateCode));
    }

    let employee = Employee {
        code: code.to_string(),
        name: name.to_string(),
        password: hash_password(password)
            .map_err(|err| anyhow::anyhow!("hash password: {}", err))?,
        role,
        delete_flg: false,
        created_at: Some(*now),
        updated_at: Some(*now),
    };
    create_employee(tx, &employee).await?;
    Ok(Ok(employee))
}

/// Overwrites name, role and password of an existing employee. An empty
/// password keeps the stored hash.
pub async fn update_employee(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    name: &str,
    role: Role,
    password: &str,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Employee, EmployeeUpdateError>> {
    let existing = get_employee_by_code(tx, code, None).await?;
    let Some(mut existing) = existing else {
        return Ok(Err(EmployeeUpdateError::NotFound));
    };

    if !password.is_empty() {
        if let Err(err) = check_password_for_update(password) {
            return Ok(Err(EmployeeUpdateError::Password(err)));
        }
        existing.password = hash_password(password)
            .map_err(|err| anyhow::anyhow!("hash password: {}", err))?;
    }
    existing.name = name.to_string();
    existing.role = role;

    update_employee_row(tx, &mut existing, now).await?;
    Ok(Ok(existing))
}

/// Soft deletes an employee. Deleting the account the caller is logged in
/// as is refused and leaves the row untouched.
pub async fn delete_employee(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    acting_employee: &Employee,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Result<Employee, EmployeeDeleteError>> {
    if code == acting_employee.code {
        return Ok(Err(EmployeeDeleteError::SelfDelete));
    }

    let existing = get_employee_by_code(tx, code, None).await?;
    let Some(mut existing) = existing else {
        return Ok(Err(EmployeeDeleteError::NotFound));
    };

    soft_delete_employee(tx, &mut existing, now).await?;
    Ok(Ok(existing))
}

pub async fn find_all_employees(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<Employee>> {
    get_all_employee(tx, None).await
}

pub async fn find_employee_by_code(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
) -> anyhow::Result<Option<Employee>> {
    get_employee_by_code(tx, code, None).await
}
