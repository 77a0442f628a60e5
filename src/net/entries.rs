//! Daily entry endpoints under `/entries`.

#[cfg(test)]
#[path = "entries_test.rs"]
mod entries_test;

use super::error::ApiError;
use super::http::{ApiClient, ApiRequest, Transport};
use super::types::{Ack, ApiResponse, BulkDelete, DateRangeFilters, Entry, EntryFilters, EntryPatch, NewEntry, Page};

fn entry_path(id: u64) -> String {
    format!("/entries/{id}")
}

pub struct EntriesService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for EntriesService<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: Transport> EntriesService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /entries` with optional filters.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn list(&self, filters: &EntryFilters) -> Result<ApiResponse<Page<Entry>>, ApiError> {
        let request = ApiRequest::get("/entries").query(filters)?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn get(&self, id: u64) -> Result<ApiResponse<Entry>, ApiError> {
        self.client.send_json(ApiRequest::get(entry_path(id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn create(&self, entry: &NewEntry) -> Result<ApiResponse<Entry>, ApiError> {
        let request = ApiRequest::post("/entries").json(entry)?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn update(&self, id: u64, patch: &EntryPatch) -> Result<ApiResponse<Entry>, ApiError> {
        let request = ApiRequest::put(entry_path(id)).json(patch)?;
        self.client.send_json(request).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn delete(&self, id: u64) -> Result<Ack, ApiError> {
        self.client.send_ack(ApiRequest::delete(entry_path(id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn bulk_delete(&self, ids: &[u64]) -> Result<Ack, ApiError> {
        let request = ApiRequest::post("/entries/bulk-delete").json(&BulkDelete { ids: ids.to_vec() })?;
        self.client.send_ack(request).await
    }

    /// Unpaginated entries between two dates.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client.
    pub async fn by_date_range(&self, filters: &DateRangeFilters) -> Result<ApiResponse<Vec<Entry>>, ApiError> {
        let request = ApiRequest::get("/entries/date-range").query(filters)?;
        self.client.send_json(request).await
    }
}
