pub mod user_repo;
pub use user_repo::UserRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod discount_repo;
pub use discount_repo::DiscountRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
