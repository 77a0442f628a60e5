//! Weekly report endpoints under `/weekly-reports`.

#[cfg(test)]
#[path = "weekly_reports_test.rs"]
mod weekly_reports_test;

use super::error::ApiError;
use super::http::{ApiClient, ApiRequest, Transport};
use super::types::{
    Ack, ApiResponse, NewWeeklyReport, Page, ReportStatus, StatusChange, WeeklyReport, WeeklyReportUpdate,
};

pub(crate) fn report_path(id: u64) -> String {
    format!("/weekly-reports/{id}")
}

pub struct WeeklyReportsService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for WeeklyReportsService<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: Transport> WeeklyReportsService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Bundle existing entries into a new report.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn create(&self, report: &NewWeeklyReport) -> Result<ApiResponse<WeeklyReport>, ApiError> {
        let request = ApiRequest::post("/weekly-reports").json(report)?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn list(&self) -> Result<ApiResponse<Page<WeeklyReport>>, ApiError> {
        self.client.send_json(ApiRequest::get("/weekly-reports")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn get(&self, id: u64) -> Result<ApiResponse<WeeklyReport>, ApiError> {
        self.client.send_json(ApiRequest::get(report_path(id))).await
    }

    /// Replace the report's entry set.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn update(&self, id: u64, entry_ids: &[u64]) -> Result<ApiResponse<WeeklyReport>, ApiError> {
        let body = WeeklyReportUpdate { entry_ids: entry_ids.to_vec() };
        let request = ApiRequest::put(report_path(id)).json(&body)?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn update_status(&self, id: u64, status: ReportStatus) -> Result<ApiResponse<WeeklyReport>, ApiError> {
        let request = ApiRequest::patch(format!("{}/status", report_path(id))).json(&StatusChange { status })?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn delete(&self, id: u64) -> Result<Ack, ApiError> {
        self.client.send_ack(ApiRequest::delete(report_path(id))).await
    }
}
