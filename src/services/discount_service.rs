// src/services/discount_service.rs
//
// CRUD das regras de desconto + o motor que escolhe a melhor regra
// para uma venda. O motor é função pura: recebe as regras e o contexto
// do cliente e devolve a vencedora, sem tocar no banco.

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CustomerRepository, DiscountRepository},
    models::discount::{DiscountKind, DiscountQuote, DiscountRule},
};

// Contexto do cliente no momento da venda.
#[derive(Debug, Clone, Copy)]
pub struct DiscountContext {
    pub visit_count: i64,
    pub birth_month: Option<u32>,
    pub sale_month: u32,
}

// Uma regra se aplica quando TODAS as condições preenchidas batem.
fn rule_applies(rule: &DiscountRule, ctx: &DiscountContext, service_ids: &[Uuid]) -> bool {
    if !rule.is_active {
        return false;
    }

    if let Some(min) = rule.min_visit_count {
        if ctx.visit_count < min as i64 {
            return false;
        }
    }

    if rule.birthday_month_only && ctx.birth_month != Some(ctx.sale_month) {
        return false;
    }

    // Combinação exigida: todo serviço listado na regra precisa estar na venda.
    rule.required_service_ids
        .iter()
        .all(|id| service_ids.contains(id))
}

fn rule_amount(rule: &DiscountRule, subtotal: Decimal) -> Decimal {
    let raw = match rule.kind {
        DiscountKind::Percentage => (subtotal * rule.value / Decimal::from(100)).round_dp(2),
        DiscountKind::Fixed => rule.value,
    };

    // Desconto nunca passa do subtotal.
    raw.min(subtotal).max(Decimal::ZERO)
}

// Escolhe a regra de maior desconto. Empate resolve por nome crescente
// para o resultado ser determinístico.
pub fn best_discount<'a>(
    rules: &'a [DiscountRule],
    subtotal: Decimal,
    ctx: &DiscountContext,
    service_ids: &[Uuid],
) -> Option<(&'a DiscountRule, Decimal)> {
    let mut best: Option<(&DiscountRule, Decimal)> = None;

    for rule in rules {
        if !rule_applies(rule, ctx, service_ids) {
            continue;
        }

        let amount = rule_amount(rule, subtotal);
        if amount <= Decimal::ZERO {
            continue;
        }

        best = match best {
            None => Some((rule, amount)),
            Some((current, current_amount)) => {
                if amount > current_amount
                    || (amount == current_amount && rule.name < current.name)
                {
                    Some((rule, amount))
                } else {
                    Some((current, current_amount))
                }
            }
        };
    }

    best
}

#[derive(Clone)]
pub struct DiscountService {
    repo: DiscountRepository,
    customer_repo: CustomerRepository,
    catalog_repo: CatalogRepository,
}

impl DiscountService {
    pub fn new(
        repo: DiscountRepository,
        customer_repo: CustomerRepository,
        catalog_repo: CatalogRepository,
    ) -> Self {
        Self {
            repo,
            customer_repo,
            catalog_repo,
        }
    }

    pub async fn create_rule(
        &self,
        name: &str,
        kind: DiscountKind,
        value: Decimal,
        min_visit_count: Option<i32>,
        birthday_month_only: bool,
        required_service_ids: &[Uuid],
    ) -> Result<DiscountRule, AppError> {
        Self::check_value(kind, value)?;

        if self.repo.find_active_by_name(name, None).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe uma regra ativa chamada '{}'.",
                name
            )));
        }

        self.repo
            .create(
                name,
                kind,
                value,
                min_visit_count,
                birthday_month_only,
                required_service_ids,
            )
            .await
    }

    pub async fn list_rules(&self, include_inactive: bool) -> Result<Vec<DiscountRule>, AppError> {
        self.repo.list(include_inactive).await
    }

    pub async fn get_rule(&self, id: Uuid) -> Result<DiscountRule, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|r| r.is_active)
            .ok_or(AppError::NotFound("Regra de desconto"))
    }

    pub async fn update_rule(
        &self,
        id: Uuid,
        name: &str,
        kind: DiscountKind,
        value: Decimal,
        min_visit_count: Option<i32>,
        birthday_month_only: bool,
        required_service_ids: &[Uuid],
    ) -> Result<DiscountRule, AppError> {
        Self::check_value(kind, value)?;

        if self
            .repo
            .find_active_by_name(name, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe uma regra ativa chamada '{}'.",
                name
            )));
        }

        self.repo
            .update(
                id,
                name,
                kind,
                value,
                min_visit_count,
                birthday_month_only,
                required_service_ids,
            )
            .await?
            .ok_or(AppError::NotFound("Regra de desconto"))
    }

    pub async fn deactivate_rule(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.set_active(id, false).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Regra de desconto"));
        }
        Ok(())
    }

    // Simula o desconto de uma venda em potencial sem criar nada.
    // Também é o caminho que o SaleService usa na venda real.
    pub async fn quote(
        &self,
        customer_id: Uuid,
        items: &[(Uuid, i32)], // (service_id, quantity)
        sale_date: chrono::NaiveDate,
    ) -> Result<DiscountQuote, AppError> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(AppError::NotFound("Cliente"))?;

        let ids: Vec<Uuid> = items.iter().map(|(id, _)| *id).collect();
        let services = self.catalog_repo.find_active_services(&ids).await?;

        if services.len() != ids.len() {
            return Err(AppError::BusinessRule(
                "Um ou mais serviços não existem ou estão inativos.".into(),
            ));
        }

        let mut subtotal = Decimal::ZERO;
        for (id, quantity) in items {
            let service = services.iter().find(|s| s.id == *id).ok_or_else(|| {
                AppError::BusinessRule("Um ou mais serviços não existem ou estão inativos.".into())
            })?;
            subtotal += service.price * Decimal::from(*quantity);
        }

        let visit_count = self.customer_repo.count_visits(customer_id).await?;
        let rules = self.repo.list_active().await?;

        let ctx = DiscountContext {
            visit_count,
            birth_month: customer.birth_date.map(|d| d.month()),
            sale_month: sale_date.month(),
        };

        let winner = best_discount(&rules, subtotal, &ctx, &ids);

        let (discount_amount, applied_rule_id, applied_rule_name) = match winner {
            Some((rule, amount)) => (amount, Some(rule.id), Some(rule.name.clone())),
            None => (Decimal::ZERO, None, None),
        };

        Ok(DiscountQuote {
            subtotal,
            discount_amount,
            total_amount: subtotal - discount_amount,
            applied_rule_id,
            applied_rule_name,
        })
    }

    fn check_value(kind: DiscountKind, value: Decimal) -> Result<(), AppError> {
        match kind {
            DiscountKind::Percentage => {
                if value <= Decimal::ZERO || value > Decimal::from(100) {
                    return Err(AppError::BusinessRule(
                        "Percentual de desconto deve estar entre 0 e 100.".into(),
                    ));
                }
            }
            DiscountKind::Fixed => {
                if value <= Decimal::ZERO {
                    return Err(AppError::BusinessRule(
                        "Desconto fixo deve ser positivo.".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rule(
        name: &str,
        kind: DiscountKind,
        value: Decimal,
        min_visit_count: Option<i32>,
        birthday_month_only: bool,
        required_service_ids: Vec<Uuid>,
        is_active: bool,
    ) -> DiscountRule {
        DiscountRule {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            value,
            min_visit_count,
            birthday_month_only,
            required_service_ids,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx(visit_count: i64, birth_month: Option<u32>, sale_month: u32) -> DiscountContext {
        DiscountContext {
            visit_count,
            birth_month,
            sale_month,
        }
    }

    #[test]
    fn percentage_rule_computes_over_subtotal() {
        let rules = vec![rule(
            "10% geral",
            DiscountKind::Percentage,
            dec("10"),
            None,
            false,
            vec![],
            true,
        )];

        let (_, amount) =
            best_discount(&rules, dec("150.00"), &ctx(0, None, 5), &[]).unwrap();
        assert_eq!(amount, dec("15.00"));
    }

    #[test]
    fn fixed_rule_is_capped_at_subtotal() {
        let rules = vec![rule(
            "R$50 off",
            DiscountKind::Fixed,
            dec("50"),
            None,
            false,
            vec![],
            true,
        )];

        let (_, amount) = best_discount(&rules, dec("30.00"), &ctx(0, None, 1), &[]).unwrap();
        assert_eq!(amount, dec("30.00"));
    }

    #[test]
    fn inactive_rule_never_applies() {
        let rules = vec![rule(
            "desativada",
            DiscountKind::Percentage,
            dec("50"),
            None,
            false,
            vec![],
            false,
        )];

        assert!(best_discount(&rules, dec("100"), &ctx(10, Some(3), 3), &[]).is_none());
    }

    #[test]
    fn loyalty_rule_requires_visit_count() {
        let rules = vec![rule(
            "fidelidade",
            DiscountKind::Percentage,
            dec("20"),
            Some(5),
            false,
            vec![],
            true,
        )];

        // 4 visitas: não aplica
        assert!(best_discount(&rules, dec("100"), &ctx(4, None, 1), &[]).is_none());
        // 5 visitas: aplica
        assert!(best_discount(&rules, dec("100"), &ctx(5, None, 1), &[]).is_some());
    }

    #[test]
    fn birthday_rule_requires_matching_month() {
        let rules = vec![rule(
            "aniversariante",
            DiscountKind::Percentage,
            dec("15"),
            None,
            true,
            vec![],
            true,
        )];

        // Mês errado
        assert!(best_discount(&rules, dec("100"), &ctx(0, Some(3), 4), &[]).is_none());
        // Sem data de nascimento cadastrada
        assert!(best_discount(&rules, dec("100"), &ctx(0, None, 4), &[]).is_none());
        // Mês do aniversário
        let (_, amount) = best_discount(&rules, dec("100"), &ctx(0, Some(4), 4), &[]).unwrap();
        assert_eq!(amount, dec("15.00"));
    }

    #[test]
    fn combination_rule_requires_all_services() {
        let corte = Uuid::new_v4();
        let escova = Uuid::new_v4();

        let rules = vec![rule(
            "combo corte+escova",
            DiscountKind::Fixed,
            dec("25"),
            None,
            false,
            vec![corte, escova],
            true,
        )];

        // Só um dos serviços: não aplica
        assert!(best_discount(&rules, dec("200"), &ctx(0, None, 1), &[corte]).is_none());
        // Os dois (e mais um extra): aplica
        let sale = [corte, escova, Uuid::new_v4()];
        assert!(best_discount(&rules, dec("200"), &ctx(0, None, 1), &sale).is_some());
    }

    #[test]
    fn best_rule_wins_by_amount() {
        let rules = vec![
            rule("10%", DiscountKind::Percentage, dec("10"), None, false, vec![], true),
            rule("R$30", DiscountKind::Fixed, dec("30"), None, false, vec![], true),
        ];

        // Subtotal 200: 10% = 20 < 30 fixo
        let (winner, amount) =
            best_discount(&rules, dec("200"), &ctx(0, None, 1), &[]).unwrap();
        assert_eq!(winner.name, "R$30");
        assert_eq!(amount, dec("30"));

        // Subtotal 500: 10% = 50 > 30 fixo
        let (winner, amount) =
            best_discount(&rules, dec("500"), &ctx(0, None, 1), &[]).unwrap();
        assert_eq!(winner.name, "10%");
        assert_eq!(amount, dec("50.00"));
    }

    #[test]
    fn tie_breaks_by_name_ascending() {
        let rules = vec![
            rule("b-regra", DiscountKind::Fixed, dec("20"), None, false, vec![], true),
            rule("a-regra", DiscountKind::Fixed, dec("20"), None, false, vec![], true),
        ];

        let (winner, _) = best_discount(&rules, dec("100"), &ctx(0, None, 1), &[]).unwrap();
        assert_eq!(winner.name, "a-regra");
    }

    #[test]
    fn zero_subtotal_yields_no_discount() {
        let rules = vec![rule(
            "10%",
            DiscountKind::Percentage,
            dec("10"),
            None,
            false,
            vec![],
            true,
        )];

        assert!(best_discount(&rules, Decimal::ZERO, &ctx(0, None, 1), &[]).is_none());
    }
}
