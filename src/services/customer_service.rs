// src/services/customer_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{Customer, CustomerVisits},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn create_customer(
        &self,
        full_name: &str,
        phone: &str,
        email: Option<&str>,
        birth_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError> {
        // Unicidade de telefone só vale entre ativos: um cadastro desativado
        // não bloqueia o telefone para sempre.
        if self.repo.find_active_by_phone(phone, None).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um cliente ativo com o telefone '{}'.",
                phone
            )));
        }

        self.repo
            .create(full_name, phone, email, birth_date, notes)
            .await
    }

    pub async fn list_customers(
        &self,
        include_inactive: bool,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, AppError> {
        self.repo.list(include_inactive, search).await
    }

    // Cliente desativado responde 404 nas rotas de detalhe.
    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn update_customer(
        &self,
        id: Uuid,
        full_name: &str,
        phone: &str,
        email: Option<&str>,
        birth_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Customer, AppError> {
        if self
            .repo
            .find_active_by_phone(phone, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um cliente ativo com o telefone '{}'.",
                phone
            )));
        }

        self.repo
            .update(id, full_name, phone, email, birth_date, notes)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn deactivate_customer(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.set_active(id, false).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }

    pub async fn reactivate_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        // Reativar não pode recriar o conflito de telefone.
        if self
            .repo
            .find_active_by_phone(&existing.phone, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "O telefone '{}' já pertence a outro cliente ativo.",
                existing.phone
            )));
        }

        self.repo.set_active(id, true).await?;
        self.get_customer(id).await
    }

    // Histórico de visitas + contagem + gasto acumulado.
    pub async fn get_customer_visits(&self, id: Uuid) -> Result<CustomerVisits, AppError> {
        let customer = self.get_customer(id).await?;
        let visit_count = self.repo.count_visits(id).await?;
        let lifetime_spend = self.repo.lifetime_spend(id).await?;
        let visits = self.repo.visit_entries(id).await?;

        Ok(CustomerVisits {
            customer,
            visit_count,
            lifetime_spend,
            visits,
        })
    }
}
