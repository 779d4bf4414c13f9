// src/db/catalog_repo.rs
//
// Serviços e produtos ficam no mesmo repositório: são as duas faces
// do catálogo e compartilham o mesmo ciclo de vida (soft delete).

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, Service},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
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
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, description, price, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(duration_minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT * FROM services
            WHERE ($1 OR is_active = TRUE)
            ORDER BY name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_service_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    // Busca os serviços ATIVOS de uma lista de IDs (montagem de venda).
    pub async fn find_active_services(&self, ids: &[Uuid]) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE id = ANY($1) AND is_active = TRUE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_active_service_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            SELECT * FROM services
            WHERE name = $1
              AND is_active = TRUE
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        duration_minutes: i32,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = $2, description = $3, price = $4, duration_minutes = $5,
                updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(duration_minutes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn set_service_active(&self, id: Uuid, active: bool) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE services SET is_active = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(active)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
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
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, cost_price, stock_quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(cost_price)
        .bind(stock_quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn list_products(&self, include_inactive: bool) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1 OR is_active = TRUE)
            ORDER BY name ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    pub async fn find_active_product_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE name = $1
              AND is_active = TRUE
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        name: &str,
        price: Decimal,
        cost_price: Option<Decimal>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, price = $3, cost_price = $4, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(cost_price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    // Ajuste de estoque com delta assinado. O WHERE impede saldo negativo:
    // zero linhas afetadas = ajuste rejeitado.
    pub async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity + $2, updated_at = NOW()
            WHERE id = $1
              AND is_active = TRUE
              AND stock_quantity + $2 >= 0
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn set_product_active(&self, id: Uuid, active: bool) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE products SET is_active = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(active)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
