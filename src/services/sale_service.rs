// src/services/sale_service.rs
//
// Fecha a venda: valida cliente/serviços/profissionais, calcula subtotal,
// aplica a melhor regra de desconto, grava tudo numa transação e dispara
// a confirmação ao cliente depois do commit.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CustomerRepository, DiscountRepository, SaleRepository, StaffRepository},
    models::{
        catalog::Service,
        sale::{PaymentMethod, SaleDetail},
        staff::Staff,
    },
    services::{
        discount_service::{DiscountContext, best_discount},
        notification_service::NotificationService,
    },
};

// Subtotal = soma dos itens (preço do serviço x quantidade).
pub fn compute_subtotal(services: &[Service], items: &[(Uuid, i32)]) -> Decimal {
    let mut subtotal = Decimal::ZERO;
    for (service_id, quantity) in items {
        if let Some(service) = services.iter().find(|s| s.id == *service_id) {
            subtotal += service.price * Decimal::from(*quantity);
        }
    }
    subtotal
}

// Divisão igualitária da comissão entre os profissionais da venda,
// cada um com a própria taxa aplicada sobre a sua fatia.
pub fn split_commissions(total: Decimal, staff: &[Staff]) -> Vec<(Uuid, Decimal, Decimal)> {
    if staff.is_empty() {
        return Vec::new();
    }

    let share = total / Decimal::from(staff.len() as i64);

    staff
        .iter()
        .map(|s| {
            let amount = (s.commission_rate * share).round_dp(2);
            (s.id, s.commission_rate, amount)
        })
        .collect()
}

#[derive(Clone)]
pub struct SaleService {
    pool: PgPool,
    sale_repo: SaleRepository,
    customer_repo: CustomerRepository,
    catalog_repo: CatalogRepository,
    staff_repo: StaffRepository,
    discount_repo: DiscountRepository,
    notification_service: NotificationService,
}

impl SaleService {
    pub fn new(
        pool: PgPool,
        sale_repo: SaleRepository,
        customer_repo: CustomerRepository,
        catalog_repo: CatalogRepository,
        staff_repo: StaffRepository,
        discount_repo: DiscountRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            pool,
            sale_repo,
            customer_repo,
            catalog_repo,
            staff_repo,
            discount_repo,
            notification_service,
        }
    }

    pub async fn create_sale(
        &self,
        customer_id: Uuid,
        items: &[(Uuid, i32)], // (service_id, quantity)
        staff_ids: &[Uuid],
        payment_method: PaymentMethod,
        notes: Option<&str>,
    ) -> Result<SaleDetail, AppError> {
        // 1. Validações de forma
        if items.is_empty() {
            return Err(AppError::BusinessRule(
                "A venda precisa de pelo menos um serviço.".into(),
            ));
        }
        if staff_ids.is_empty() {
            return Err(AppError::BusinessRule(
                "A venda precisa de pelo menos um profissional.".into(),
            ));
        }
        if items.iter().any(|(_, q)| *q <= 0) {
            return Err(AppError::BusinessRule(
                "Quantidade de serviço deve ser positiva.".into(),
            ));
        }

        let service_ids: Vec<Uuid> = items.iter().map(|(id, _)| *id).collect();
        if has_duplicates(&service_ids) {
            return Err(AppError::BusinessRule(
                "Serviço repetido na venda; use a quantidade.".into(),
            ));
        }
        if has_duplicates(staff_ids) {
            return Err(AppError::BusinessRule(
                "Profissional repetido na venda.".into(),
            ));
        }

        // 2. Cliente ativo
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(AppError::NotFound("Cliente"))?;

        // 3. Serviços e profissionais ativos
        let services = self.catalog_repo.find_active_services(&service_ids).await?;
        if services.len() != service_ids.len() {
            return Err(AppError::BusinessRule(
                "Um ou mais serviços não existem ou estão inativos.".into(),
            ));
        }

        let staff = self.staff_repo.find_active_by_ids(staff_ids).await?;
        if staff.len() != staff_ids.len() {
            return Err(AppError::BusinessRule(
                "Um ou mais profissionais não existem ou estão inativos.".into(),
            ));
        }

        // 4. Totais
        let subtotal = compute_subtotal(&services, items);

        // 5. Melhor desconto (visitas ANTES desta venda)
        let visit_count = self.customer_repo.count_visits(customer_id).await?;
        let rules = self.discount_repo.list_active().await?;
        let today = Utc::now().date_naive();

        let ctx = DiscountContext {
            visit_count,
            birth_month: customer.birth_date.map(|d| d.month()),
            sale_month: today.month(),
        };

        let winner = best_discount(&rules, subtotal, &ctx, &service_ids);
        let (discount_amount, applied_rule_id) = match winner {
            Some((rule, amount)) => (amount, Some(rule.id)),
            None => (Decimal::ZERO, None),
        };

        let total_amount = subtotal - discount_amount;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let sale = self
            .sale_repo
            .insert_sale(
                &mut *tx,
                customer_id,
                subtotal,
                discount_amount,
                applied_rule_id,
                total_amount,
                payment_method,
                notes,
            )
            .await?;

        // Itens com snapshot de nome e preço
        let mut sale_services = Vec::with_capacity(items.len());
        for (service_id, quantity) in items {
            let service = services
                .iter()
                .find(|s| s.id == *service_id)
                .ok_or_else(|| {
                    AppError::BusinessRule(
                        "Um ou mais serviços não existem ou estão inativos.".into(),
                    )
                })?;

            let line_total = service.price * Decimal::from(*quantity);

            let item = self
                .sale_repo
                .insert_sale_service(
                    &mut *tx,
                    sale.id,
                    service.id,
                    &service.name,
                    service.price,
                    *quantity,
                    line_total,
                )
                .await?;

            sale_services.push(item);
        }

        // Comissões com snapshot da taxa
        let mut sale_staff = Vec::with_capacity(staff.len());
        for (staff_id, rate, amount) in split_commissions(total_amount, &staff) {
            let link = self
                .sale_repo
                .insert_sale_staff(&mut *tx, sale.id, staff_id, rate, amount)
                .await?;

            sale_staff.push(link);
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "💈 Venda {} fechada: subtotal {}, desconto {}, total {}",
            sale.id,
            subtotal,
            discount_amount,
            total_amount
        );

        // 6. Confirmação ao cliente: fora da transação e fora do caminho
        // da resposta. Falha de canal nunca derruba a venda.
        let notification_service = self.notification_service.clone();
        let service_names: Vec<String> =
            sale_services.iter().map(|s| s.service_name.clone()).collect();
        let sale_id = sale.id;

        tokio::spawn(async move {
            notification_service
                .dispatch_sale_confirmation(&customer, sale_id, &service_names, total_amount)
                .await;
        });

        Ok(SaleDetail {
            sale,
            services: sale_services,
            staff: sale_staff,
        })
    }

    pub async fn list_sales(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        customer_id: Option<Uuid>,
    ) -> Result<Vec<crate::models::sale::Sale>, AppError> {
        self.sale_repo.list(from, to, customer_id).await
    }

    pub async fn get_sale(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;

        let services = self.sale_repo.services_of(id).await?;
        let staff = self.sale_repo.staff_of(id).await?;

        Ok(SaleDetail {
            sale,
            services,
            staff,
        })
    }
}

fn has_duplicates(ids: &[Uuid]) -> bool {
    let mut seen = std::collections::HashSet::new();
    ids.iter().any(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service(name: &str, price: &str) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: dec(price),
            duration_minutes: 30,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn staff_member(rate: &str) -> Staff {
        Staff {
            id: Uuid::new_v4(),
            full_name: "Profissional".to_string(),
            phone: None,
            specialty: None,
            commission_rate: dec(rate),
            hired_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subtotal_is_sum_of_price_times_quantity() {
        let corte = service("Corte", "80.00");
        let escova = service("Escova", "50.00");
        let items = vec![(corte.id, 1), (escova.id, 2)];

        let subtotal = compute_subtotal(&[corte, escova], &items);
        assert_eq!(subtotal, dec("180.00"));
    }

    #[test]
    fn subtotal_of_no_items_is_zero() {
        assert_eq!(compute_subtotal(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn commission_splits_total_evenly_between_staff() {
        let a = staff_member("0.4");
        let b = staff_member("0.5");

        let commissions = split_commissions(dec("200.00"), &[a.clone(), b.clone()]);

        // Cada um recebe a própria taxa sobre metade do total.
        assert_eq!(commissions.len(), 2);
        assert_eq!(commissions[0], (a.id, dec("0.4"), dec("40.00")));
        assert_eq!(commissions[1], (b.id, dec("0.5"), dec("50.00")));
    }

    #[test]
    fn commission_of_single_staff_covers_whole_total() {
        let a = staff_member("0.35");

        let commissions = split_commissions(dec("100.00"), &[a.clone()]);
        assert_eq!(commissions, vec![(a.id, dec("0.35"), dec("35.00"))]);
    }

    #[test]
    fn no_staff_means_no_commissions() {
        assert!(split_commissions(dec("100.00"), &[]).is_empty());
    }

    #[test]
    fn detecting_duplicate_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(!has_duplicates(&[a, b]));
        assert!(has_duplicates(&[a, b, a]));
    }
}
