//! Enumerated option lists served by `/enums/*`.

#[cfg(test)]
#[path = "enums_test.rs"]
mod enums_test;

use super::error::ApiError;
use super::http::{ApiClient, ApiRequest, Transport};
use super::types::ApiResponse;

pub struct EnumsService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for EnumsService<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: Transport> EnumsService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Valid entry status values, in display order.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client; failures are logged before returning.
    pub async fn status_options(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        self.client
            .send_json(ApiRequest::get("/enums/status-options"))
            .await
            .inspect_err(|e| log::error!("failed to fetch status options: {e}"))
    }
}
