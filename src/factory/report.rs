use chrono::{DateTime, FixedOffset, NaiveDate};
use fake::faker::number::en::NumberWithFormat;
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;

use crate::model::report::Report;

pub struct ReportFactory<T: Clone> {
    modifier_one: fn(x: &Report, ext: T) -> Report,
    modifier_many: fn(x: &Report, idx: usize, ext: T) -> Report,
}

impl<T: Clone> Default for ReportFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ReportFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Report, ext: T) -> Report) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Report, idx: usize, ext: T) -> Report) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Report> {
        let data = ReportDummy::new();
        let data = data.generate_one();
        let mut data = (self.modifier_one)(&data, ext);
        let row: (i32,) = sqlx::query_as(
            r#"
        INSERT INTO public.reports (report_date, title, content, employee_code, delete_flg, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id"#,
        )
        .bind(data.report_date)
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.employee_code)
        .bind(data.delete_flg)
        .bind(data.created_at)
        .bind(data.updated_at)
        .fetch_one(db)
        .await?;
        data.id = row.0;
        Ok(data.clone())
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Report>> {
        let data = ReportDummy::new();
        let data = data.generate_many(num);
        let mut result: Vec<Report> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter_mut() {
            let row: (i32,) = sqlx::query_as(
                r#"INSERT INTO public.reports (report_date, title, content, employee_code, delete_flg, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id"#,
            )
            .bind(item.report_date)
            .bind(&item.title)
            .bind(&item.content)
            .bind(&item.employee_code)
            .bind(item.delete_flg)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(&mut *tx)
            .await?;
            item.id = row.0;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Default, Deserialize, Dummy, Clone)]
struct ReportDummy {
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    // reports.employee_code is VARCHAR(10)
    #[dummy(faker = "NumberWithFormat(\"########\")")]
    pub employee_code: String,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl ReportDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn to_report(dummy: ReportDummy) -> Report {
        Report {
            id: 0,
            report_date: dummy.report_date,
            title: dummy.title,
            content: dummy.content,
            employee_code: dummy.employee_code,
            delete_flg: false,
            created_at: dummy.created_at,
            updated_at: dummy.updated_at,
        }
    }

    pub fn generate_one(&self) -> Report {
        let dummy = Faker.fake::<ReportDummy>();
        Self::to_report(dummy)
    }

    pub fn generate_many(&self, num: u32) -> Vec<Report> {
        let mut result: Vec<Report> = vec![];
        for _ in 0..num {
            let dummy = Faker.fake::<Self>();
            result.push(Self::to_report(dummy));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sqlx::PgPool;

    use crate::{factory::report::ReportFactory, model::report::Report};

    #[derive(Clone)]
    struct ExtData {
        pub employee_code: String,
        pub report_date: NaiveDate,
    }

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = ReportFactory::new();
        let report = factory.generate_one(&pool, ()).await?;

        // Expect
        assert!(report.id > 0);
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.reports"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = ReportFactory::<ExtData>::new();
        factory.modified_one(|data, ext| Report {
            id: data.id,
            report_date: ext.report_date,
            title: "daily standup".to_string(),
            content: data.content.clone(),
            employee_code: ext.employee_code,
            delete_flg: false,
            created_at: data.created_at,
            updated_at: data.updated_at,
        });
        let ext = ExtData {
            employee_code: "1000".to_string(),
            report_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        factory.generate_one(&pool, ext.clone()).await?;

        // Expect
        let res: (NaiveDate, String, String) = sqlx::query_as(
            r#"SELECT report_date, title, employee_code
        FROM public.reports"#,
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, ext.report_date);
        assert_eq!(res.1, "daily standup".to_string());
        assert_eq!(res.2, ext.employee_code);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = ReportFactory::new();
        let reports = factory.generate_many(&pool, 5, ()).await?;

        // Expect
        assert_eq!(reports.len(), 5);
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.reports"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 5);
        Ok(())
    }
}
