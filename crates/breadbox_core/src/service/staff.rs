//! Staff and payroll module.
//!
//! # Responsibility
//! - Own the `employees` collection and the payroll payout flow.
//!
//! # Invariants
//! - The biweekly payroll is `active employees x daily wage x 15 days`.
//! - A payout only happens when the earnings ledger covers it; the deduction
//!   and the payment-history entry are written together.

use crate::model::{EarningsLedger, Employee, PaymentRecord};
use crate::service::{not_found, ServiceError, ServiceResult};
use crate::store::{RecordId, RecordStore, SINGLETON_ID};
use chrono::NaiveDate;
use log::info;

/// Wage per employee per worked day.
pub const DAILY_WAGE: f64 = 15.0;
/// Days charged per biweekly payroll run.
pub const BIWEEKLY_DAYS: u32 = 15;
/// Days charged when projecting a monthly payroll cost.
pub const MONTHLY_DAYS: u32 = 30;

/// Payroll numbers shown before (and checked during) a payout.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollSummary {
    pub active_employees: u32,
    pub total_employees: usize,
    pub payroll_total: f64,
    pub earnings_available: f64,
    pub balance_after: f64,
    pub can_pay: bool,
}

/// Everything the staff screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffView {
    pub payroll: PayrollSummary,
    pub employees: Vec<EmployeeRow>,
}

/// One table row: the employee plus their biweekly cost (zero when
/// inactive).
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub employee: Employee,
    pub biweekly_cost: f64,
}

pub struct StaffService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> StaffService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    pub fn add_employee(&mut self, name: &str, active: bool) -> ServiceResult<Employee> {
        let mut employee = Employee::new(name, active);
        employee.validate()?;
        self.store.put(&mut employee)?;
        Ok(employee)
    }

    pub fn delete_employee(&mut self, id: RecordId) -> ServiceResult<()> {
        self.store.delete::<Employee>(id)?;
        Ok(())
    }

    /// Flips the active flag and returns the updated record.
    pub fn toggle_active(&mut self, id: RecordId) -> ServiceResult<Employee> {
        let mut employee: Employee = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| not_found::<Employee>(id))?;
        employee.active = !employee.active;
        self.store.put(&mut employee)?;
        Ok(employee)
    }

    pub fn employees(&self) -> ServiceResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self.store.get_all()?;
        employees.sort_by_key(|employee| employee.id);
        Ok(employees)
    }

    pub fn payroll(&self) -> ServiceResult<PayrollSummary> {
        let employees = self.employees()?;
        let active_employees = employees.iter().filter(|employee| employee.active).count() as u32;
        let payroll_total = f64::from(active_employees) * DAILY_WAGE * f64::from(BIWEEKLY_DAYS);

        let ledger: EarningsLedger = self
            .store
            .get_by_id(SINGLETON_ID)?
            .unwrap_or_default();
        let earnings_available = ledger.biweekly;
        let balance_after = earnings_available - payroll_total;

        Ok(PayrollSummary {
            active_employees,
            total_employees: employees.len(),
            payroll_total,
            earnings_available,
            balance_after,
            can_pay: balance_after >= 0.0,
        })
    }

    /// Pays the biweekly payroll: deducts it from the earnings ledger and
    /// appends one payment-history entry.
    pub fn pay_payroll(&mut self, today: NaiveDate) -> ServiceResult<PaymentRecord> {
        let summary = self.payroll()?;
        if !summary.can_pay {
            return Err(ServiceError::InsufficientFunds {
                available: summary.earnings_available,
                required: summary.payroll_total,
            });
        }

        let mut ledger: EarningsLedger = self
            .store
            .get_by_id(SINGLETON_ID)?
            .unwrap_or_default();
        ledger.biweekly -= summary.payroll_total;
        self.store.put(&mut ledger)?;

        let mut payment = PaymentRecord {
            id: None,
            date: today,
            amount: summary.payroll_total,
            active_employees: summary.active_employees,
        };
        self.store.put(&mut payment)?;

        info!(
            "event=payroll_paid module=staff status=ok amount={:.2} employees={}",
            payment.amount, payment.active_employees
        );
        Ok(payment)
    }

    pub fn payment_history(&self) -> ServiceResult<Vec<PaymentRecord>> {
        let mut payments: Vec<PaymentRecord> = self.store.get_all()?;
        payments.sort_by_key(|payment| payment.id);
        Ok(payments)
    }

    pub fn view(&self) -> ServiceResult<StaffView> {
        let payroll = self.payroll()?;
        let employees = self
            .employees()?
            .into_iter()
            .map(|employee| {
                let biweekly_cost = if employee.active {
                    DAILY_WAGE * f64::from(BIWEEKLY_DAYS)
                } else {
                    0.0
                };
                EmployeeRow {
                    employee,
                    biweekly_cost,
                }
            })
            .collect();

        Ok(StaffView { payroll, employees })
    }
}
