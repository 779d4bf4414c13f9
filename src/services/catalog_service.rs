// src/services/catalog_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Product, Service},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  SERVIÇOS
    // =========================================================================

    pub async fn create_service(
        &self,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        duration_minutes: i32,
    ) -> Result<Service, AppError> {
        Self::check_price(price)?;

        if duration_minutes <= 0 {
            return Err(AppError::BusinessRule(
                "A duração do serviço deve ser positiva.".into(),
            ));
        }

        if self
            .repo
            .find_active_service_by_name(name, None)
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um serviço ativo chamado '{}'.",
                name
            )));
        }

        self.repo
            .create_service(name, description, price, duration_minutes)
            .await
    }

    pub async fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>, AppError> {
        self.repo.list_services(include_inactive).await
    }

    pub async fn get_service(&self, id: Uuid) -> Result<Service, AppError> {
        self.repo
            .find_service_by_id(id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(AppError::NotFound("Serviço"))
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        duration_minutes: i32,
    ) -> Result<Service, AppError> {
        Self::check_price(price)?;

        if self
            .repo
            .find_active_service_by_name(name, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um serviço ativo chamado '{}'.",
                name
            )));
        }

        self.repo
            .update_service(id, name, description, price, duration_minutes)
            .await?
            .ok_or(AppError::NotFound("Serviço"))
    }

    pub async fn deactivate_service(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.set_service_active(id, false).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Serviço"));
        }
        Ok(())
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn create_product(
        &self,
        name: &str,
        price: Decimal,
        cost_price: Option<Decimal>,
        stock_quantity: i32,
    ) -> Result<Product, AppError> {
        Self::check_price(price)?;

        if stock_quantity < 0 {
            return Err(AppError::BusinessRule(
                "O estoque inicial não pode ser negativo.".into(),
            ));
        }

        if self
            .repo
            .find_active_product_by_name(name, None)
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um produto ativo chamado '{}'.",
                name
            )));
        }

        self.repo
            .create_product(name, price, cost_price, stock_quantity)
            .await
    }

    pub async fn list_products(&self, include_inactive: bool) -> Result<Vec<Product>, AppError> {
        self.repo.list_products(include_inactive).await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_product_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(AppError::NotFound("Produto"))
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        name: &str,
        price: Decimal,
        cost_price: Option<Decimal>,
    ) -> Result<Product, AppError> {
        Self::check_price(price)?;

        if self
            .repo
            .find_active_product_by_name(name, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe um produto ativo chamado '{}'.",
                name
            )));
        }

        self.repo
            .update_product(id, name, price, cost_price)
            .await?
            .ok_or(AppError::NotFound("Produto"))
    }

    // Delta positivo = entrada, negativo = venda/baixa.
    // O repositório rejeita o ajuste que deixaria o saldo negativo.
    pub async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Product, AppError> {
        if delta == 0 {
            return Err(AppError::BusinessRule("O ajuste não pode ser zero.".into()));
        }

        // Distingue 404 de estoque insuficiente.
        self.get_product(id).await?;

        self.repo.adjust_stock(id, delta).await?.ok_or_else(|| {
            AppError::BusinessRule("Estoque insuficiente para o ajuste.".into())
        })
    }

    pub async fn deactivate_product(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.set_product_active(id, false).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Produto"));
        }
        Ok(())
    }

    fn check_price(price: Decimal) -> Result<(), AppError> {
        if price < Decimal::ZERO {
            return Err(AppError::BusinessRule("O preço não pode ser negativo.".into()));
        }
        Ok(())
    }
}
