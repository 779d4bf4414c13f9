pub mod auth;
pub use auth::AuthService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod staff_service;
pub use staff_service::StaffService;
pub mod sale_service;
pub use sale_service::SaleService;
pub mod discount_service;
pub use discount_service::DiscountService;
pub mod notification_service;
pub use notification_service::NotificationService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
