use crate::error::{ApiError, NordigenError};
use crate::models::{
    AccountBalances, AccountDetails, AccountMetadata, AccountTransactions, Institution,
    NewRequisition, Requisition, Requisitions,
};
use crate::request::{ApiRequest, country_query, date_range_query, pagination_query, resource_path};
use crate::transport::{HttpTransport, Transport};
use chrono::NaiveDate;
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

const ACCOUNTS: &str = "accounts";
const BALANCES: &str = "balances";
const DETAILS: &str = "details";
const TRANSACTIONS: &str = "transactions";
const INSTITUTIONS: &str = "institutions";
const REQUISITIONS: &str = "requisitions";

/// Typed client over an authenticated [`Transport`].
///
/// Cloning is cheap and clones share the transport, so one client can serve
/// concurrent calls from many tasks.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client using the default HTTP transport and base URL.
    pub fn new(access_token: impl Into<String>) -> Result<Self, NordigenError> {
        Ok(Self::from_transport(HttpTransport::new(access_token)?))
    }

    /// Create a client over any transport, e.g. one that refreshes tokens.
    pub fn from_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Fetch identity and status of a linked account.
    pub async fn get_account_metadata(&self, id: &str) -> Result<AccountMetadata, NordigenError> {
        let request = ApiRequest::get(resource_path(&[ACCOUNTS, id]));
        self.call(request, StatusCode::OK).await
    }

    pub async fn get_account_balances(&self, id: &str) -> Result<AccountBalances, NordigenError> {
        let request = ApiRequest::get(resource_path(&[ACCOUNTS, id, BALANCES]));
        self.call(request, StatusCode::OK).await
    }

    pub async fn get_account_details(&self, id: &str) -> Result<AccountDetails, NordigenError> {
        let request = ApiRequest::get(resource_path(&[ACCOUNTS, id, DETAILS]));
        self.call(request, StatusCode::OK).await
    }

    /// Fetch booked and pending transactions, optionally bounded by
    /// calendar dates (both inclusive on the upstream side).
    pub async fn get_account_transactions(
        &self,
        id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AccountTransactions, NordigenError> {
        let request = ApiRequest::get(resource_path(&[ACCOUNTS, id, TRANSACTIONS]))
            .with_query(date_range_query(date_from, date_to));
        self.call(request, StatusCode::OK).await
    }

    /// List institutions operating in a country (ISO 3166 alpha-2 code).
    ///
    /// An empty directory yields an empty vector.
    pub async fn list_institutions(
        &self,
        country: &str,
    ) -> Result<Vec<Institution>, NordigenError> {
        let request =
            ApiRequest::get(resource_path(&[INSTITUTIONS])).with_query(country_query(country));
        let list: Option<Vec<Institution>> = self.call(request, StatusCode::OK).await?;
        let list = list.unwrap_or_default();
        debug!("Listed {} institutions for {}", list.len(), country);
        Ok(list)
    }

    pub async fn get_institution(&self, id: &str) -> Result<Institution, NordigenError> {
        let request = ApiRequest::get(resource_path(&[INSTITUTIONS, id]));
        self.call(request, StatusCode::OK).await
    }

    /// Start a new link session. The server answers `201 Created` with the
    /// populated requisition, including the authorization `link`. Fields the
    /// server leaves out keep the values sent in `requisition`.
    pub async fn create_requisition(
        &self,
        requisition: &NewRequisition,
    ) -> Result<Requisition, NordigenError> {
        let body = serde_json::to_vec(requisition).map_err(NordigenError::Encode)?;
        let request = ApiRequest::post(resource_path(&[REQUISITIONS]), body);
        let created: Requisition = self.call(request, StatusCode::CREATED).await?;
        Ok(created.backfill(requisition))
    }

    pub async fn get_requisition(&self, id: &str) -> Result<Requisition, NordigenError> {
        let request = ApiRequest::get(resource_path(&[REQUISITIONS, id]));
        self.call(request, StatusCode::OK).await
    }

    /// Fetch one page of requisitions. `next`/`previous` are left to the caller.
    pub async fn list_requisitions(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Requisitions, NordigenError> {
        let request = ApiRequest::get(resource_path(&[REQUISITIONS]))
            .with_query(pagination_query(limit, offset));
        self.call(request, StatusCode::OK).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        expected: StatusCode,
    ) -> Result<T, NordigenError> {
        debug!(
            "{} {}{}",
            request.method,
            request.path,
            request.query.as_deref().map(|q| format!("?{q}")).unwrap_or_default()
        );
        let response = self.transport.execute(request).await?;
        let status = response.status;
        let body = response.body.read_all().await?;
        decode(status, expected, body)
    }
}

/// Check the status against the expected one and decode the drained body.
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    expected: StatusCode,
    body: Vec<u8>,
) -> Result<T, NordigenError> {
    if status != expected {
        debug!("Expected status {}, received {}", expected, status);
        return Err(ApiError::new(status, body).into());
    }
    serde_json::from_slice(&body).map_err(NordigenError::Decode)
}
