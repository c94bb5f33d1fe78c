// src/db/goal_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        accounts::AccountKind,
        goals::{Goal, GoalFilter, WeeklyGoal},
    },
};

#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &GoalFilter) -> Result<Vec<Goal>, AppError> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT * FROM goals
            WHERE ($1::integer IS NULL OR year = $1)
              AND ($2::smallint IS NULL OR quarter = $2)
            ORDER BY year DESC, quarter DESC, created_at ASC
            "#,
        )
        .bind(filter.year)
        .bind(filter.quarter)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Goal>, AppError> {
        let goal = sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(goal)
    }

    pub async fn list_weeks(&self, goal_id: Uuid) -> Result<Vec<WeeklyGoal>, AppError> {
        let weeks = sqlx::query_as::<_, WeeklyGoal>(
            r#"
            SELECT id, goal_id, week_number, start_date, end_date, weekly_target, actual
            FROM weekly_goals
            WHERE goal_id = $1
            ORDER BY week_number ASC
            "#,
        )
        .bind(goal_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(weeks)
    }

    pub async fn create_goal<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        account_id: Uuid,
        year: i32,
        quarter: i16,
        quarterly_target: Decimal,
        kind: AccountKind,
    ) -> Result<Goal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (id, account_id, year, quarter, quarterly_target, kind)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(year)
        .bind(quarter)
        .bind(quarterly_target)
        .bind(kind)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }

    /// Inserção em massa das semanas usando UNNEST.
    pub async fn create_weekly_goals<'e, E>(
        &self,
        executor: E,
        weeks: &[WeeklyGoal],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids: Vec<Uuid> = weeks.iter().map(|w| w.id).collect();
        let goal_ids: Vec<Uuid> = weeks.iter().map(|w| w.goal_id).collect();
        let numbers: Vec<i16> = weeks.iter().map(|w| w.week_number).collect();
        let starts: Vec<_> = weeks.iter().map(|w| w.start_date).collect();
        let ends: Vec<_> = weeks.iter().map(|w| w.end_date).collect();
        let targets: Vec<Decimal> = weeks.iter().map(|w| w.weekly_target).collect();
        let actuals: Vec<Decimal> = weeks.iter().map(|w| w.actual).collect();

        sqlx::query(
            r#"
            INSERT INTO weekly_goals (id, goal_id, week_number, start_date, end_date, weekly_target, actual)
            SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::int2[], $4::date[], $5::date[], $6::numeric[], $7::numeric[])
            "#,
        )
        .bind(ids)
        .bind(goal_ids)
        .bind(numbers)
        .bind(starts)
        .bind(ends)
        .bind(targets)
        .bind(actuals)
        .execute(executor)
        .await
        .map_err(AppError::from_db)?;

        Ok(())
    }

    /// As semanas saem junto (ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
