// src/services/report_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AccountRepository, MovementRepository},
    models::{
        movements::{Movement, MovementKind, MovementStatus},
        reports::{AccountTotal, CashFlowEntry, DreLine, DreReport, Period, PeriodSummary},
    },
};

#[derive(Clone)]
pub struct ReportService {
    movement_repo: MovementRepository,
    account_repo: AccountRepository,
}

impl ReportService {
    pub fn new(movement_repo: MovementRepository, account_repo: AccountRepository) -> Self {
        Self {
            movement_repo,
            account_repo,
        }
    }

    /// DRE simplificada: totais por conta, ordenados pelo código da conta.
    pub async fn dre(&self, period: Period) -> Result<DreReport, AppError> {
        if !period.is_valid() {
            return Err(AppError::InvalidPeriod);
        }

        let movements = self.movement_repo.list_paid_in_period(&period, None).await?;
        let totals = group_by_account(&movements, period);

        let mut accounts: HashMap<Uuid, _> = self
            .account_repo
            .list(None, None)
            .await?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let mut lines: Vec<DreLine> = totals
            .into_iter()
            .map(|total| {
                let account = accounts.remove(&total.account_id);
                if account.is_none() {
                    tracing::warn!("⚠️ Movimentações com conta inexistente: {}", total.account_id);
                }
                DreLine {
                    account_id: total.account_id,
                    account,
                    total: total.total,
                }
            })
            .collect();

        // Contas desconhecidas vão para o fim.
        lines.sort_by(|a, b| {
            let key_a = a.account.as_ref().map(|acc| acc.code.as_str());
            let key_b = b.account.as_ref().map(|acc| acc.code.as_str());
            match (key_a, key_b) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        let result = lines.iter().map(|line| line.total).sum();

        Ok(DreReport { period, lines, result })
    }

    pub async fn cash_flow(&self, period: Period) -> Result<Vec<CashFlowEntry>, AppError> {
        if !period.is_valid() {
            return Err(AppError::InvalidPeriod);
        }

        let movements = self.movement_repo.list_paid_in_period(&period, None).await?;
        Ok(cash_flow(&movements, period))
    }
}

// =========================================================================
//  AGREGAÇÕES (puras)
// =========================================================================

/// Só entram movimentações pagas com data dentro do período.
fn counts(movement: &Movement, period: Period) -> bool {
    movement.status == MovementStatus::Paid && period.contains(movement.movement_date)
}

fn signed_amount(movement: &Movement) -> Decimal {
    match movement.kind {
        MovementKind::In => movement.amount,
        MovementKind::Out => -movement.amount,
    }
}

pub fn summarize_period(movements: &[Movement], period: Period) -> PeriodSummary {
    let (inflows, outflows) = movements
        .iter()
        .filter(|m| counts(m, period))
        .fold((Decimal::ZERO, Decimal::ZERO), |(inflows, outflows), m| match m.kind {
            MovementKind::In => (inflows + m.amount, outflows),
            MovementKind::Out => (inflows, outflows + m.amount),
        });

    PeriodSummary {
        period,
        inflows,
        outflows,
        balance: inflows - outflows,
    }
}

/// Total assinado por conta, na ordem em que cada conta aparece pela primeira vez.
pub fn group_by_account(movements: &[Movement], period: Period) -> Vec<AccountTotal> {
    let mut position: HashMap<Uuid, usize> = HashMap::new();
    let mut totals: Vec<AccountTotal> = Vec::new();

    for movement in movements.iter().filter(|m| counts(m, period)) {
        let i = *position.entry(movement.account_id).or_insert_with(|| {
            totals.push(AccountTotal {
                account_id: movement.account_id,
                total: Decimal::ZERO,
            });
            totals.len() - 1
        });
        totals[i].total += signed_amount(movement);
    }

    totals
}

/// Fluxo de caixa com saldo acumulado linha a linha.
pub fn cash_flow(movements: &[Movement], period: Period) -> Vec<CashFlowEntry> {
    let mut paid: Vec<&Movement> = movements.iter().filter(|m| counts(m, period)).collect();
    // sort_by_key é estável: mesma data mantém a ordem de entrada
    paid.sort_by_key(|m| m.movement_date);

    let mut balance = Decimal::ZERO;
    paid.into_iter()
        .map(|m| {
            balance += signed_amount(m);
            CashFlowEntry {
                date: m.movement_date,
                description: m.description.clone(),
                kind: m.kind,
                amount: m.amount,
                balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movements::MovementOrigin;
    use chrono::{NaiveDate, Utc};

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn march() -> Period {
        Period {
            start: day(1),
            end: day(31),
        }
    }

    fn movement(kind: MovementKind, amount: Decimal, status: MovementStatus, date: NaiveDate) -> Movement {
        Movement {
            id: Uuid::new_v4(),
            kind,
            description: format!("{kind:?} {amount}"),
            account_id: Uuid::nil(),
            bank_id: None,
            amount,
            movement_date: date,
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
        }
    }

    fn on_account(mut m: Movement, account_id: Uuid) -> Movement {
        m.account_id = account_id;
        m
    }

    #[test]
    fn summary_ignores_pending() {
        let movements = vec![
            movement(MovementKind::In, d(100), MovementStatus::Paid, day(5)),
            movement(MovementKind::Out, d(40), MovementStatus::Paid, day(6)),
            movement(MovementKind::In, d(20), MovementStatus::Pending, day(7)),
        ];

        let summary = summarize_period(&movements, march());

        assert_eq!(summary.inflows, d(100));
        assert_eq!(summary.outflows, d(40));
        assert_eq!(summary.balance, d(60));
    }

    #[test]
    fn summary_bounds_are_inclusive() {
        let movements = vec![
            movement(MovementKind::In, d(10), MovementStatus::Paid, day(1)),
            movement(MovementKind::In, d(5), MovementStatus::Paid, day(31)),
            movement(
                MovementKind::In,
                d(1000),
                MovementStatus::Paid,
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            ),
            movement(MovementKind::Out, d(3), MovementStatus::Canceled, day(10)),
        ];

        let summary = summarize_period(&movements, march());

        assert_eq!(summary.inflows, d(15));
        assert_eq!(summary.outflows, Decimal::ZERO);
    }

    #[test]
    fn summary_serializes_with_front_end_keys() {
        let summary = summarize_period(&[], march());
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("entradas").is_some());
        assert!(json.get("saidas").is_some());
        assert!(json.get("saldo").is_some());
        assert_eq!(json["periodo"]["start"], "2024-03-01");
    }

    #[test]
    fn groups_keep_first_appearance_order_and_sign() {
        let rent = Uuid::new_v4();
        let sales = Uuid::new_v4();
        let movements = vec![
            on_account(movement(MovementKind::Out, d(30), MovementStatus::Paid, day(2)), rent),
            on_account(movement(MovementKind::In, d(200), MovementStatus::Paid, day(3)), sales),
            on_account(movement(MovementKind::In, d(50), MovementStatus::Paid, day(4)), sales),
            on_account(movement(MovementKind::Out, d(20), MovementStatus::Paid, day(5)), rent),
            on_account(movement(MovementKind::Out, d(999), MovementStatus::Pending, day(5)), rent),
        ];

        let totals = group_by_account(&movements, march());

        assert_eq!(
            totals,
            vec![
                AccountTotal {
                    account_id: rent,
                    total: d(-50)
                },
                AccountTotal {
                    account_id: sales,
                    total: d(250)
                },
            ]
        );
    }

    #[test]
    fn cash_flow_accumulates_balance_in_date_order() {
        let movements = vec![
            movement(MovementKind::In, d(10), MovementStatus::Paid, day(3)),
            movement(MovementKind::In, d(50), MovementStatus::Paid, day(1)),
            movement(MovementKind::Out, d(20), MovementStatus::Paid, day(2)),
        ];

        let rows = cash_flow(&movements, march());

        let balances: Vec<Decimal> = rows.iter().map(|r| r.balance).collect();
        assert_eq!(balances, vec![d(50), d(30), d(40)]);
        assert_eq!(rows[0].date, day(1));
        assert_eq!(rows[2].date, day(3));
    }

    #[test]
    fn cash_flow_is_stable_for_same_day() {
        let first = movement(MovementKind::In, d(1), MovementStatus::Paid, day(9));
        let second = movement(MovementKind::Out, d(2), MovementStatus::Paid, day(9));
        let expected = vec![first.description.clone(), second.description.clone()];

        let rows = cash_flow(&[first, second], march());

        let descriptions: Vec<String> = rows.into_iter().map(|r| r.description).collect();
        assert_eq!(descriptions, expected);
    }

    #[test]
    fn cash_flow_of_empty_period_is_empty() {
        let movements = vec![movement(MovementKind::In, d(10), MovementStatus::Pending, day(3))];
        assert!(cash_flow(&movements, march()).is_empty());
    }
}
