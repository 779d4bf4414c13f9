// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, CustomerRepository, DashboardRepository, DiscountRepository,
        NotificationRepository, SaleRepository, StaffRepository, UserRepository,
    },
    services::{
        AuthService, CatalogService, CustomerService, DashboardService, DiscountService,
        NotificationService, SaleService, StaffService,
        notification_service::NotificationChannels,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub catalog_service: CatalogService,
    pub staff_service: StaffService,
    pub sale_service: SaleService,
    pub discount_service: DiscountService,
    pub notification_service: NotificationService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let discount_repo = DiscountRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let channels = NotificationChannels::from_env()?;

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let customer_service = CustomerService::new(customer_repo.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone());
        let staff_service = StaffService::new(staff_repo.clone());
        let notification_service = NotificationService::new(notification_repo, channels);
        let discount_service = DiscountService::new(
            discount_repo.clone(),
            customer_repo.clone(),
            catalog_repo.clone(),
        );
        let sale_service = SaleService::new(
            db_pool.clone(),
            sale_repo,
            customer_repo,
            catalog_repo,
            staff_repo,
            discount_repo,
            notification_service.clone(),
        );
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            customer_service,
            catalog_service,
            staff_service,
            sale_service,
            discount_service,
            notification_service,
            dashboard_service,
        })
    }
}
