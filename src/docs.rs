// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Customers ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::deactivate_customer,
        handlers::customers::reactivate_customer,
        handlers::customers::get_customer_visits,

        // --- Catalog ---
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::get_service,
        handlers::catalog::update_service,
        handlers::catalog::deactivate_service,
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::adjust_stock,
        handlers::catalog::deactivate_product,

        // --- Staff ---
        handlers::staff::create_staff,
        handlers::staff::list_staff,
        handlers::staff::get_staff,
        handlers::staff::update_staff,
        handlers::staff::deactivate_staff,
        handlers::staff::get_performance,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,

        // --- Discounts ---
        handlers::discounts::create_rule,
        handlers::discounts::list_rules,
        handlers::discounts::get_rule,
        handlers::discounts::update_rule,
        handlers::discounts::deactivate_rule,
        handlers::discounts::preview_discount,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::send_notification,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_sales_chart,
        handlers::dashboard::get_top_services,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Customers ---
            models::customer::Customer,
            models::customer::CustomerVisits,
            models::customer::VisitEntry,
            handlers::customers::CustomerPayload,

            // --- Catalog ---
            models::catalog::Service,
            models::catalog::Product,
            handlers::catalog::ServicePayload,
            handlers::catalog::CreateProductPayload,
            handlers::catalog::UpdateProductPayload,
            handlers::catalog::AdjustStockPayload,

            // --- Staff ---
            models::staff::Staff,
            models::staff::StaffPerformance,
            models::staff::ServiceBreakdown,
            handlers::staff::StaffPayload,

            // --- Sales ---
            models::sale::PaymentMethod,
            models::sale::Sale,
            models::sale::SaleService,
            models::sale::SaleStaff,
            models::sale::SaleDetail,
            handlers::sales::SaleItemPayload,
            handlers::sales::CreateSalePayload,

            // --- Discounts ---
            models::discount::DiscountKind,
            models::discount::DiscountRule,
            models::discount::DiscountQuote,
            handlers::discounts::DiscountRulePayload,
            handlers::discounts::PreviewDiscountPayload,

            // --- Notifications ---
            models::notification::NotificationChannel,
            models::notification::NotificationStatus,
            models::notification::Notification,
            handlers::notifications::SendNotificationPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::SalesChartEntry,
            models::dashboard::TopServiceEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Customers", description = "Cadastro e Histórico de Clientes"),
        (name = "Catalog", description = "Serviços e Produtos do Salão"),
        (name = "Staff", description = "Profissionais e Desempenho"),
        (name = "Sales", description = "Vendas e Atendimentos"),
        (name = "Discounts", description = "Regras de Desconto e Fidelidade"),
        (name = "Notifications", description = "E-mail, SMS e WhatsApp"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
