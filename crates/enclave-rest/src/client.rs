//! Main REST client implementation

use enclave_auth::Credentials;
use enclave_types::Hello;
use tracing::instrument;

use crate::dispatcher::{Dispatcher, DispatcherConfig, Endpoint};
use crate::endpoints::{OrderFillEndpoints, PerpsEndpoints, SpotEndpoints};
use crate::error::RestResult;
use crate::request::Query;
use crate::response;

const HELLO: &str = "/hello";
const AUTHED_HELLO: &str = "/authedHello";

/// Enclave REST API client
///
/// Owns a single [`Dispatcher`]; the spot and perps facades borrow it.
///
/// # Example
///
/// ```no_run
/// use enclave_rest::{Credentials, EnclaveClient, Endpoint, GetFillsRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let creds = Credentials::from_env()?;
///     let client = EnclaveClient::new(creds, Endpoint::Sandbox)?;
///
///     println!("{}", client.authenticated_hello().await?);
///
///     let fills = client.spot().get_fills(&GetFillsRequest::market("AVAX-USDC")).await?;
///     println!("{} fills", fills.len());
///
///     let balance = client.perps().get_balance().await?;
///     println!("Margin balance: {}", balance.margin_balance);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EnclaveClient {
    dispatcher: Dispatcher,
}

impl EnclaveClient {
    /// Create a client for one of the exchange environments
    pub fn new(credentials: Credentials, endpoint: Endpoint) -> RestResult<Self> {
        Self::with_config(DispatcherConfig::new(credentials).with_endpoint(endpoint))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: DispatcherConfig) -> RestResult<Self> {
        Ok(Self::from_dispatcher(Dispatcher::with_config(config)?))
    }

    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// The underlying dispatcher, for routes without a typed method
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Spot order and fill endpoints
    pub fn spot(&self) -> SpotEndpoints<'_> {
        OrderFillEndpoints::spot(&self.dispatcher)
    }

    /// Perpetual futures endpoints
    pub fn perps(&self) -> PerpsEndpoints<'_> {
        PerpsEndpoints::new(&self.dispatcher)
    }

    /// Server greeting, returned without an envelope
    #[instrument(skip(self))]
    pub async fn hello(&self) -> RestResult<Hello> {
        let response = self.dispatcher.get(HELLO, Query::new()).await?;
        response::decode_json(response).await
    }

    /// Greeting that only succeeds when the request signature is valid
    #[instrument(skip(self))]
    pub async fn authenticated_hello(&self) -> RestResult<String> {
        let response = self.dispatcher.get(AUTHED_HELLO, Query::new()).await?;
        response::decode(response).await
    }
}
