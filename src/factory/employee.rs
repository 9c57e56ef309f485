use chrono::{DateTime, FixedOffset};
use fake::faker::name::en::Name;
use fake::faker::number::en::NumberWithFormat;
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;

use crate::model::employee::{Employee, Role};

pub struct EmployeeFactory<T: Clone> {
    modifier_one: fn(x: &Employee, ext: T) -> Employee,
    modifier_many: fn(x: &Employee, idx: usize, ext: T) -> Employee,
}

impl<T: Clone> Default for EmployeeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EmployeeFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Employee, ext: T) -> Employee) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Employee, idx: usize, ext: T) -> Employee) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Employee> {
        let data = EmployeeDummy::new();
        let data = data.generate_one();
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(
            r#"
        INSERT INTO public.employees (code, name, password, role, delete_flg, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.password)
        .bind(data.role)
        .bind(data.delete_flg)
        .bind(data.created_at)
        .bind(data.updated_at)
        .execute(db)
        .await?;
        Ok(data.clone())
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Employee>> {
        let data = EmployeeDummy::new();
        let data = data.generate_many(num);
        let mut result: Vec<Employee> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.clone() {
            sqlx::query(
                r#"INSERT INTO public.employees (code, name, password, role, delete_flg, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(&item.code)
            .bind(&item.name)
            .bind(&item.password)
            .bind(item.role)
            .bind(item.delete_flg)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct EmployeeDummy {
    // employees.code is VARCHAR(10)
    #[dummy(faker = "NumberWithFormat(\"########\")")]
    pub code: String,
    #[dummy(faker = "Name()")]
    pub name: String,
    pub password: String,
    pub admin: bool,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl EmployeeDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn to_employee(dummy: EmployeeDummy) -> Employee {
        Employee {
            code: dummy.code,
            name: dummy.name,
            password: dummy.password,
            role: if dummy.admin {
                Role::Admin
            } else {
                Role::General
            },
            delete_flg: false,
            created_at: dummy.created_at,
            updated_at: dummy.updated_at,
        }
    }

    pub fn generate_one(&self) -> Employee {
        let dummy = Faker.fake::<EmployeeDummy>();
        Self::to_employee(dummy)
    }

    pub fn generate_many(&self, num: u32) -> Vec<Employee> {
        let mut result: Vec<Employee> = vec![];
        for _ in 0..num {
            let dummy = Faker.fake::<Self>();
            result.push(Self::to_employee(dummy));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Local};
    use sqlx::PgPool;

    use crate::{
        factory::employee::EmployeeFactory,
        model::employee::{Employee, Role},
    };

    #[derive(Clone)]
    struct ExtData {
        pub code: String,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = EmployeeFactory::new();
        factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.employees"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = EmployeeFactory::<ExtData>::new();
        factory.modified_one(|data, ext| Employee {
            code: ext.code,
            name: "Sato Taro".to_string(),
            password: data.password.clone(),
            role: Role::Admin,
            delete_flg: false,
            created_at: Some(ext.created_at),
            updated_at: Some(ext.updated_at),
        });
        let now = Local::now().fixed_offset();
        let ext = ExtData {
            code: "1000".to_string(),
            created_at: now,
            updated_at: now,
        };
        factory.generate_one(&pool, ext.clone()).await?;

        // Expect
        let res: (String, String, Role, bool) = sqlx::query_as(
            r#"SELECT code, name, role, delete_flg
        FROM public.employees"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, ext.code);
        assert_eq!(res.1, "Sato Taro".to_string());
        assert_eq!(res.2, Role::Admin);
        assert!(!res.3);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = EmployeeFactory::new();
        factory.generate_many(&pool, 10, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.employees"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 10);
        Ok(())
    }
}
