// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary().await
    }

    pub async fn get_sales_chart(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        self.repo.get_sales_last_30_days().await
    }

    pub async fn get_top_services(&self) -> Result<Vec<TopServiceEntry>, AppError> {
        self.repo.get_top_services().await
    }
}
