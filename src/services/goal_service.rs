// src/services/goal_service.rs

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, GoalRepository, MovementRepository},
    models::{
        accounts::AccountKind,
        goals::{CreateGoalPayload, Goal, GoalDetail, GoalFilter, WeeklyGoal, WEEKS_PER_QUARTER},
        movements::{Movement, MovementKind, MovementStatus},
        reports::Period,
    },
};

/// Casas decimais da meta semanal (semanas 1 a 12); a 13ª absorve o resto.
pub const WEEKLY_TARGET_SCALE: u32 = 10;

#[derive(Clone)]
pub struct GoalService {
    goal_repo: GoalRepository,
    account_repo: AccountRepository,
    movement_repo: MovementRepository,
    pool: PgPool,
}

impl GoalService {
    pub fn new(
        goal_repo: GoalRepository,
        account_repo: AccountRepository,
        movement_repo: MovementRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            goal_repo,
            account_repo,
            movement_repo,
            pool,
        }
    }

    pub async fn list(&self, filter: &GoalFilter) -> Result<Vec<Goal>, AppError> {
        self.goal_repo.list(filter).await
    }

    /// Cria a meta e as 13 semanas na mesma transação.
    pub async fn create(&self, payload: &CreateGoalPayload) -> Result<GoalDetail, AppError> {
        let goal_id = Uuid::new_v4();
        let weeks = distribute_goal(goal_id, payload.quarterly_target, payload.year, payload.quarter)?;

        let mut tx = self.pool.begin().await?;

        let account = self
            .account_repo
            .find_by_id(&mut *tx, payload.account_id)
            .await?
            .ok_or(AppError::NotFound("account"))?;

        let goal = self
            .goal_repo
            .create_goal(
                &mut *tx,
                goal_id,
                account.id,
                payload.year,
                payload.quarter,
                payload.quarterly_target,
                account.kind,
            )
            .await?;

        self.goal_repo.create_weekly_goals(&mut *tx, &weeks).await?;

        tx.commit().await?;

        tracing::info!(
            "🎯 Meta {}T{} de {} para a conta {} distribuída em {} semanas",
            goal.quarter,
            goal.year,
            goal.quarterly_target,
            account.code,
            WEEKS_PER_QUARTER
        );

        Ok(GoalDetail {
            goal,
            weeks: weeks.to_vec(),
        })
    }

    /// Meta + semanas, com o realizado calculado das movimentações pagas.
    pub async fn detail(&self, id: Uuid) -> Result<GoalDetail, AppError> {
        let goal = self
            .goal_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("goal"))?;

        let mut weeks = self.goal_repo.list_weeks(goal.id).await?;

        if let (Some(first), Some(last)) = (weeks.first(), weeks.last()) {
            let period = Period {
                start: first.start_date,
                end: last.end_date,
            };
            let movements = self
                .movement_repo
                .list_paid_in_period(&period, Some(goal.account_id))
                .await?;
            fill_actuals(&mut weeks, goal.kind, &movements);
        }

        Ok(GoalDetail { goal, weeks })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.goal_repo.delete(id).await? {
            return Err(AppError::NotFound("goal"));
        }
        Ok(())
    }
}

/// Primeiro e último dia do trimestre.
fn quarter_bounds(year: i32, quarter: i16) -> Result<(NaiveDate, NaiveDate), AppError> {
    if !(1..=4).contains(&quarter) {
        return Err(AppError::invalid_field("quarter", "range", "O trimestre deve estar entre 1 e 4."));
    }
    if !(1900..=9999).contains(&year) {
        return Err(AppError::invalid_field("year", "range", "Ano inválido."));
    }

    let month = (quarter as u32 - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| AppError::invalid_field("year", "range", "Ano inválido."))?;
    let end = start
        .checked_add_months(Months::new(3))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| AppError::invalid_field("year", "range", "Ano inválido."))?;

    Ok((start, end))
}

/// As 13 faixas de datas do trimestre, contíguas e cobrindo o trimestre inteiro.
///
/// Semana 1: do primeiro dia até o primeiro domingo (inclusive). Semanas 2 a 12:
/// segunda a domingo. Semana 13: da segunda seguinte até o último dia do trimestre.
pub fn quarter_weeks(year: i32, quarter: i16) -> Result<[(NaiveDate, NaiveDate); WEEKS_PER_QUARTER], AppError> {
    let (start, end) = quarter_bounds(year, quarter)?;

    let to_sunday = (7 - start.weekday().num_days_from_sunday()) % 7;
    let first_sunday = start + Days::new(to_sunday as u64);

    let weeks = std::array::from_fn(|i| match i {
        0 => (start, first_sunday),
        i if i == WEEKS_PER_QUARTER - 1 => (first_sunday + Days::new(1 + 7 * (i as u64 - 1)), end),
        i => {
            let monday = first_sunday + Days::new(1 + 7 * (i as u64 - 1));
            (monday, monday + Days::new(6))
        }
    });

    Ok(weeks)
}

/// Distribui a meta trimestral em 13 semanas.
///
/// Semanas 1 a 12 recebem `meta / 13` (com `WEEKLY_TARGET_SCALE` casas) e a
/// semana 13 recebe o que falta, então a soma bate exatamente com a meta.
pub fn distribute_goal(
    goal_id: Uuid,
    quarterly_target: Decimal,
    year: i32,
    quarter: i16,
) -> Result<[WeeklyGoal; WEEKS_PER_QUARTER], AppError> {
    if quarterly_target.is_sign_negative() && !quarterly_target.is_zero() {
        return Err(AppError::invalid_field("quarterlyTarget", "non_negative", "O valor não pode ser negativo."));
    }

    let ranges = quarter_weeks(year, quarter)?;

    let weekly = (quarterly_target / Decimal::from(WEEKS_PER_QUARTER as u32)).round_dp(WEEKLY_TARGET_SCALE);
    let remainder = quarterly_target - weekly * Decimal::from(WEEKS_PER_QUARTER as u32 - 1);

    Ok(std::array::from_fn(|i| {
        let (start_date, end_date) = ranges[i];
        WeeklyGoal {
            id: Uuid::new_v4(),
            goal_id,
            week_number: i as i16 + 1,
            start_date,
            end_date,
            weekly_target: if i == WEEKS_PER_QUARTER - 1 { remainder } else { weekly },
            actual: Decimal::ZERO,
        }
    }))
}

/// Realizado de cada semana: soma das movimentações pagas do tipo da meta.
pub fn fill_actuals(weeks: &mut [WeeklyGoal], kind: AccountKind, movements: &[Movement]) {
    let expected = match kind {
        AccountKind::Revenue => MovementKind::In,
        AccountKind::Expense => MovementKind::Out,
    };

    for week in weeks.iter_mut() {
        week.actual = movements
            .iter()
            .filter(|m| m.status == MovementStatus::Paid && m.kind == expected)
            .filter(|m| week.start_date <= m.movement_date && m.movement_date <= week.end_date)
            .map(|m| m.amount)
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movements::MovementOrigin;
    use chrono::{Utc, Weekday};
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn total(weeks: &[WeeklyGoal]) -> Decimal {
        weeks.iter().map(|w| w.weekly_target).sum()
    }

    #[test]
    fn divisible_target_splits_evenly() {
        let weeks = distribute_goal(Uuid::new_v4(), Decimal::from(130), 2024, 1).unwrap();

        assert_eq!(weeks.len(), 13);
        assert!(weeks.iter().all(|w| w.weekly_target == Decimal::from(10)));
        assert_eq!(total(&weeks), Decimal::from(130));
    }

    #[test]
    fn remainder_lands_on_last_week() {
        let target = Decimal::from(100);
        let weeks = distribute_goal(Uuid::new_v4(), target, 2024, 2).unwrap();

        assert_eq!(total(&weeks), target);

        let approx = Decimal::from_str("7.6923077").unwrap();
        let tolerance = Decimal::from_str("0.000001").unwrap();
        for week in &weeks {
            assert!((week.weekly_target - approx).abs() < tolerance, "semana {}", week.week_number);
        }
    }

    #[test]
    fn weeks_are_numbered_and_start_without_actuals() {
        let goal_id = Uuid::new_v4();
        let weeks = distribute_goal(goal_id, Decimal::from(50), 2023, 3).unwrap();

        let numbers: Vec<i16> = weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, (1..=13).collect::<Vec<i16>>());
        assert!(weeks.iter().all(|w| w.goal_id == goal_id && w.actual.is_zero()));
    }

    #[test]
    fn zero_target_is_allowed() {
        let weeks = distribute_goal(Uuid::new_v4(), Decimal::ZERO, 2024, 4).unwrap();
        assert!(weeks.iter().all(|w| w.weekly_target.is_zero()));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            distribute_goal(Uuid::new_v4(), Decimal::from(10), 2024, 5),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            distribute_goal(Uuid::new_v4(), Decimal::from(10), 2024, 0),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            distribute_goal(Uuid::new_v4(), Decimal::from(-1), 2024, 1),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            distribute_goal(Uuid::new_v4(), Decimal::from(10), 1800, 1),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn q1_2024_starts_on_monday() {
        let weeks = quarter_weeks(2024, 1).unwrap();

        assert_eq!(weeks[0], (date(2024, 1, 1), date(2024, 1, 7)));
        assert_eq!(weeks[1], (date(2024, 1, 8), date(2024, 1, 14)));
        assert_eq!(weeks[12], (date(2024, 3, 25), date(2024, 3, 31)));
    }

    #[test]
    fn q1_2023_first_week_is_a_single_sunday() {
        let weeks = quarter_weeks(2023, 1).unwrap();

        assert_eq!(weeks[0], (date(2023, 1, 1), date(2023, 1, 1)));
        assert_eq!(weeks[12], (date(2023, 3, 20), date(2023, 3, 31)));
    }

    #[test]
    fn weeks_tile_every_quarter() {
        for year in [2023, 2024, 2025] {
            for quarter in 1..=4 {
                let weeks = quarter_weeks(year, quarter).unwrap();
                let (start, end) = quarter_bounds(year, quarter).unwrap();

                assert_eq!(weeks[0].0, start);
                assert_eq!(weeks[12].1, end);

                for pair in weeks.windows(2) {
                    assert_eq!(pair[0].1.succ_opt().unwrap(), pair[1].0);
                }
                for (week_start, week_end) in &weeks[1..12] {
                    assert_eq!(week_start.weekday(), Weekday::Mon);
                    assert_eq!(week_end.weekday(), Weekday::Sun);
                }
                assert!(weeks.iter().all(|(s, e)| s <= e));
            }
        }
    }

    #[test]
    fn actuals_count_paid_movements_of_the_goal_kind() {
        let mut weeks = distribute_goal(Uuid::new_v4(), Decimal::from(130), 2024, 1)
            .unwrap()
            .to_vec();

        let movement = |kind, amount: i64, status, day: NaiveDate| Movement {
            id: Uuid::new_v4(),
            kind,
            description: "venda".to_string(),
            account_id: Uuid::nil(),
            bank_id: None,
            amount: Decimal::from(amount),
            movement_date: day,
            due_date: None,
            payment_date: None,
            status,
            payment_method: None,
            notes: None,
            origin: MovementOrigin::Manual,
            invoice_id: None,
            user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let movements = vec![
            movement(MovementKind::In, 7, MovementStatus::Paid, date(2024, 1, 3)),
            movement(MovementKind::In, 5, MovementStatus::Paid, date(2024, 1, 7)),
            movement(MovementKind::In, 100, MovementStatus::Pending, date(2024, 1, 4)),
            movement(MovementKind::Out, 2, MovementStatus::Paid, date(2024, 1, 5)),
            movement(MovementKind::In, 9, MovementStatus::Paid, date(2024, 3, 31)),
        ];

        fill_actuals(&mut weeks, AccountKind::Revenue, &movements);

        assert_eq!(weeks[0].actual, Decimal::from(12));
        assert_eq!(weeks[1].actual, Decimal::ZERO);
        assert_eq!(weeks[12].actual, Decimal::from(9));
    }
}
