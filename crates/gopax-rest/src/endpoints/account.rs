//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::contract::ContractViolation;
use crate::endpoints::{path_segment, Endpoint};
use crate::error::RestResult;
use crate::query::TradeWindow;
use crate::transport::Transport;
use crate::types::{Balance, Trade};
use gopax_auth::Credentials;
use tracing::{debug, instrument};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport, credentials: &'a Credentials) -> Self {
        Self { transport, credentials }
    }

    /// Get balances of every asset
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        debug!("Fetching balances");
        self.transport
            .send_signed::<_, ()>(self.credentials, Endpoint::Balances, &[], None)
            .await
    }

    /// Get the balance of one asset
    ///
    /// A response for a different asset is a contract violation.
    ///
    /// # Arguments
    /// * `asset` - Asset code (e.g., "KRW")
    #[instrument(skip(self))]
    pub async fn get_balance(&self, asset: &str) -> RestResult<Balance> {
        let asset = path_segment("asset", asset)?;
        debug!("Fetching balance for {}", asset);

        let balance: Balance = self
            .transport
            .send_signed::<_, ()>(self.credentials, Endpoint::Balance(asset), &[], None)
            .await?;

        if balance.asset != asset {
            return Err(ContractViolation::Echo {
                field: "asset",
                expected: asset.to_string(),
                actual: balance.asset,
            }
            .into());
        }
        Ok(balance)
    }

    /// Get the account's trades, most recent first
    ///
    /// `window.limit` is sent but the exchange does not apply it here; see
    /// [`crate::contract::OBSERVED_PRIVATE_TRADES_CAP`].
    #[instrument(skip(self))]
    pub async fn get_trades(&self, window: &TradeWindow) -> RestResult<Vec<Trade>> {
        debug!("Fetching account trades");
        self.transport
            .send_signed::<_, ()>(self.credentials, Endpoint::Trades, &window.to_query(), None)
            .await
    }
}
