// src/services/staff_service.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StaffRepository,
    models::staff::{PerformanceRow, ServiceBreakdown, Staff, StaffPerformance},
};

// Redução linear sobre as linhas cruas do relatório.
// Total e comissão da venda se repetem em cada linha de serviço dela,
// então venda só conta uma vez (dedup por sale_id); os itens somam sempre.
pub fn aggregate_performance(staff: &Staff, rows: &[PerformanceRow]) -> StaffPerformance {
    let mut seen_sales: HashSet<Uuid> = HashSet::new();
    let mut total_revenue = Decimal::ZERO;
    let mut total_commission = Decimal::ZERO;

    let mut by_service: HashMap<String, (i64, Decimal)> = HashMap::new();

    for row in rows {
        if seen_sales.insert(row.sale_id) {
            total_revenue += row.sale_total;
            total_commission += row.commission_amount;
        }

        let entry = by_service
            .entry(row.service_name.clone())
            .or_insert((0, Decimal::ZERO));
        entry.0 += row.quantity as i64;
        entry.1 += row.line_total;
    }

    let sales_count = seen_sales.len() as i64;

    let average_ticket = if sales_count > 0 {
        (total_revenue / Decimal::from(sales_count)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let mut services: Vec<ServiceBreakdown> = by_service
        .into_iter()
        .map(|(service_name, (quantity, revenue))| ServiceBreakdown {
            service_name,
            quantity,
            revenue,
        })
        .collect();

    // Receita decrescente; nome desempata para ordem estável.
    services.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.service_name.cmp(&b.service_name))
    });

    StaffPerformance {
        staff_id: staff.id,
        full_name: staff.full_name.clone(),
        sales_count,
        total_revenue,
        total_commission,
        average_ticket,
        services,
    }
}

#[derive(Clone)]
pub struct StaffService {
    repo: StaffRepository,
}

impl StaffService {
    pub fn new(repo: StaffRepository) -> Self {
        Self { repo }
    }

    pub async fn create_staff(
        &self,
        full_name: &str,
        phone: Option<&str>,
        specialty: Option<&str>,
        commission_rate: Decimal,
        hired_at: Option<NaiveDate>,
    ) -> Result<Staff, AppError> {
        Self::check_rate(commission_rate)?;

        self.repo
            .create(full_name, phone, specialty, commission_rate, hired_at)
            .await
    }

    pub async fn list_staff(&self, include_inactive: bool) -> Result<Vec<Staff>, AppError> {
        self.repo.list(include_inactive).await
    }

    pub async fn get_staff(&self, id: Uuid) -> Result<Staff, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(AppError::NotFound("Profissional"))
    }

    pub async fn update_staff(
        &self,
        id: Uuid,
        full_name: &str,
        phone: Option<&str>,
        specialty: Option<&str>,
        commission_rate: Decimal,
        hired_at: Option<NaiveDate>,
    ) -> Result<Staff, AppError> {
        Self::check_rate(commission_rate)?;

        self.repo
            .update(id, full_name, phone, specialty, commission_rate, hired_at)
            .await?
            .ok_or(AppError::NotFound("Profissional"))
    }

    pub async fn deactivate_staff(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.set_active(id, false).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Profissional"));
        }
        Ok(())
    }

    pub async fn get_performance(
        &self,
        id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<StaffPerformance, AppError> {
        // Relatório vale também para desativados (histórico não some).
        let staff = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Profissional"))?;

        let rows = self.repo.performance_rows(id, from, to).await?;

        Ok(aggregate_performance(&staff, &rows))
    }

    fn check_rate(rate: Decimal) -> Result<(), AppError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(AppError::BusinessRule(
                "A taxa de comissão deve estar entre 0 e 1.".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn staff() -> Staff {
        Staff {
            id: Uuid::new_v4(),
            full_name: "Carla Dias".to_string(),
            phone: None,
            specialty: Some("Colorista".to_string()),
            commission_rate: dec("0.4"),
            hired_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn row(
        sale_id: Uuid,
        sale_total: &str,
        commission: &str,
        service_name: &str,
        quantity: i32,
        line_total: &str,
    ) -> PerformanceRow {
        PerformanceRow {
            sale_id,
            sold_at: Utc::now(),
            sale_total: dec(sale_total),
            commission_amount: dec(commission),
            service_name: service_name.to_string(),
            quantity,
            line_total: dec(line_total),
        }
    }

    #[test]
    fn empty_rows_produce_zeroed_report() {
        let report = aggregate_performance(&staff(), &[]);

        assert_eq!(report.sales_count, 0);
        assert_eq!(report.total_revenue, Decimal::ZERO);
        assert_eq!(report.total_commission, Decimal::ZERO);
        assert_eq!(report.average_ticket, Decimal::ZERO);
        assert!(report.services.is_empty());
    }

    #[test]
    fn sale_totals_are_not_double_counted_across_lines() {
        // Uma venda com dois itens de serviço: duas linhas, mesma venda.
        let sale = Uuid::new_v4();
        let rows = vec![
            row(sale, "150.00", "60.00", "Corte", 1, "100.00"),
            row(sale, "150.00", "60.00", "Escova", 1, "50.00"),
        ];

        let report = aggregate_performance(&staff(), &rows);

        assert_eq!(report.sales_count, 1);
        assert_eq!(report.total_revenue, dec("150.00"));
        assert_eq!(report.total_commission, dec("60.00"));
        assert_eq!(report.average_ticket, dec("150.00"));
    }

    #[test]
    fn totals_equal_sum_of_constituent_sales() {
        let sale_a = Uuid::new_v4();
        let sale_b = Uuid::new_v4();
        let rows = vec![
            row(sale_a, "100.00", "40.00", "Corte", 1, "100.00"),
            row(sale_b, "200.00", "80.00", "Coloração", 1, "200.00"),
        ];

        let report = aggregate_performance(&staff(), &rows);

        assert_eq!(report.sales_count, 2);
        assert_eq!(report.total_revenue, dec("300.00"));
        assert_eq!(report.total_commission, dec("120.00"));
        assert_eq!(report.average_ticket, dec("150.00"));
    }

    #[test]
    fn services_are_grouped_and_sorted_by_revenue() {
        let sale_a = Uuid::new_v4();
        let sale_b = Uuid::new_v4();
        let rows = vec![
            row(sale_a, "130.00", "52.00", "Corte", 1, "80.00"),
            row(sale_a, "130.00", "52.00", "Escova", 1, "50.00"),
            row(sale_b, "160.00", "64.00", "Corte", 2, "160.00"),
        ];

        let report = aggregate_performance(&staff(), &rows);

        assert_eq!(
            report.services,
            vec![
                ServiceBreakdown {
                    service_name: "Corte".to_string(),
                    quantity: 3,
                    revenue: dec("240.00"),
                },
                ServiceBreakdown {
                    service_name: "Escova".to_string(),
                    quantity: 1,
                    revenue: dec("50.00"),
                },
            ]
        );
    }
}
