//! Multi-step checks that carry state from one request to the next
//!
//! Each step takes what it needs from the value the previous step returned,
//! so scenarios can run side by side without sharing anything.

use crate::client::GopaxRestClient;
use crate::contract::{
    check_cancelled, check_descending_ids, check_latestmin, check_order_echo, check_order_invariants,
    check_order_matches, check_order_progress, check_pastmax, ContractResult, ContractViolation,
};
use crate::error::RestResult;
use crate::query::TradeWindow;
use crate::types::{CreatedOrder, Order, OrderRequest};
use tracing::debug;

/// Id bounds taken from an unfiltered, most-recent-first listing
///
/// `pastmax` is the first id and `latestmin` the second, so both filtered
/// listings are non-empty whenever the listing keeps growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeWindowProbe {
    pastmax: u64,
    latestmin: u64,
}

impl TradeWindowProbe {
    /// Capture bounds from the ids of a listing
    ///
    /// The ids must be in the order received and strictly decreasing.
    pub fn from_ids(ids: &[u64]) -> Result<Self, ContractViolation> {
        check_descending_ids("trade window probe", ids)?;
        match ids {
            [first, second, ..] => Ok(Self {
                pastmax: *first,
                latestmin: *second,
            }),
            _ => Err(ContractViolation::RowCount {
                listing: "trade window probe",
                expected: 2,
                actual: ids.len(),
            }),
        }
    }

    /// Upper bound for the `pastmax` query
    pub fn pastmax(&self) -> u64 {
        self.pastmax
    }

    /// Lower bound for the `latestmin` query
    pub fn latestmin(&self) -> u64 {
        self.latestmin
    }

    /// `base` restricted to ids below `pastmax`
    pub fn past_window(&self, base: TradeWindow) -> TradeWindow {
        base.past_max(self.pastmax)
    }

    /// `base` restricted to ids above `latestmin`
    pub fn latest_window(&self, base: TradeWindow) -> TradeWindow {
        base.latest_min(self.latestmin)
    }

    /// Check the listing returned for [`Self::past_window`]
    pub fn check_past(&self, ids: &[u64]) -> ContractResult {
        check_descending_ids("pastmax", ids)?;
        check_pastmax(ids, self.pastmax)
    }

    /// Check the listing returned for [`Self::latest_window`]
    pub fn check_latest(&self, ids: &[u64]) -> ContractResult {
        check_descending_ids("latestmin", ids)?;
        check_latestmin(ids, self.latestmin)
    }
}

/// An order placed by the harness, followed until it is cancelled
///
/// Consuming [`OrderScenario::cancel`] ends the scenario, so an order id is
/// never reused after its cancel.
#[derive(Debug)]
pub struct OrderScenario<'a> {
    client: &'a GopaxRestClient,
    request: OrderRequest,
    created: CreatedOrder,
    last_seen: Option<Order>,
}

impl<'a> OrderScenario<'a> {
    /// Place `request` and check the echo
    pub async fn place(client: &'a GopaxRestClient, request: OrderRequest) -> RestResult<Self> {
        let created = client.place_order(&request).await?;
        check_order_echo(&created, &request)?;
        debug!(order_id = %created.id, "Scenario order placed");

        Ok(Self {
            client,
            request,
            created,
            last_seen: None,
        })
    }

    /// Server-assigned id
    pub fn order_id(&self) -> &str {
        &self.created.id
    }

    /// The request that was posted
    pub fn request(&self) -> &OrderRequest {
        &self.request
    }

    /// The creation echo
    pub fn created(&self) -> &CreatedOrder {
        &self.created
    }

    /// Fetch the order and check it against the placement and earlier reads
    pub async fn fetch(&mut self) -> RestResult<Order> {
        let order = self.client.get_order(&self.created.id).await?;
        self.observe(&order)?;
        self.last_seen = Some(order.clone());
        Ok(order)
    }

    /// Cancel the order and confirm it left the book
    ///
    /// Returns the order as read after the cancel.
    pub async fn cancel(self) -> RestResult<Order> {
        self.client.cancel_order(&self.created.id).await?;

        let order = self.client.get_order(&self.created.id).await?;
        self.observe(&order)?;
        check_cancelled(&order)?;
        debug!(order_id = %order.id, status = %order.status, "Scenario order cancelled");
        Ok(order)
    }

    fn observe(&self, order: &Order) -> ContractResult {
        check_order_matches(order, &self.created)?;
        match &self.last_seen {
            Some(previous) => check_order_progress(previous, order),
            None => check_order_invariants(order),
        }
    }
}
