//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::endpoints::{path_segment, Endpoint};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{CreatedOrder, Order, OrderRequest};
use gopax_auth::Credentials;
use gopax_types::{Decimal, OrderType};
use tracing::{debug, info, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    transport: &'a Transport,
    credentials: &'a Credentials,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport, credentials: &'a Credentials) -> Self {
        Self { transport, credentials }
    }

    /// Place a new order
    ///
    /// The body is signed and sent as the same bytes.
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    ///
    /// # Returns
    /// The order as echoed by the exchange, with its server-assigned id
    #[instrument(
        skip(self, order),
        fields(pair = %order.trading_pair_name, side = %order.side, order_type = %order.order_type)
    )]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<CreatedOrder> {
        validate_order(order)?;
        debug!("Placing order: {} {} @ {:?}", order.side, order.amount, order.price);

        let created: CreatedOrder = self
            .transport
            .send_signed(self.credentials, Endpoint::PlaceOrder, &[], Some(order))
            .await?;

        info!(order_id = %created.id, "Order placed");
        Ok(created)
    }

    /// Get the account's orders
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> RestResult<Vec<Order>> {
        debug!("Fetching orders");
        self.transport
            .send_signed::<_, ()>(self.credentials, Endpoint::Orders, &[], None)
            .await
    }

    /// Get one order by id
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> RestResult<Order> {
        let order_id = path_segment("order id", order_id)?;
        debug!("Fetching order {}", order_id);
        self.transport
            .send_signed::<_, ()>(self.credentials, Endpoint::Order(order_id), &[], None)
            .await
    }

    /// Cancel an order by id
    ///
    /// Succeeds only on a 2xx answer with an empty body.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<()> {
        let order_id = path_segment("order id", order_id)?;
        debug!("Cancelling order {}", order_id);

        self.transport
            .send_signed_empty(self.credentials, Endpoint::CancelOrder(order_id))
            .await?;

        info!(order_id, "Order cancelled");
        Ok(())
    }
}

fn validate_order(order: &OrderRequest) -> RestResult<()> {
    if order.amount <= Decimal::ZERO {
        return Err(RestError::InvalidParameter(format!(
            "order amount must be positive, got {}",
            order.amount
        )));
    }
    match (&order.order_type, order.price) {
        (OrderType::Limit, None) => Err(RestError::InvalidParameter(
            "limit order requires a price".to_string(),
        )),
        (_, Some(price)) if price <= Decimal::ZERO => Err(RestError::InvalidParameter(format!(
            "order price must be positive, got {}",
            price
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopax_types::{PairName, Side};
    use rust_decimal_macros::dec;

    fn pair() -> PairName {
        PairName::BTC_KRW.parse().unwrap()
    }

    #[test]
    fn test_validate_order() {
        let limit = OrderRequest::limit(pair(), Side::Buy, dec!(1000000), dec!(0.001));
        assert!(validate_order(&limit).is_ok());

        let market = OrderRequest::market(pair(), Side::Sell, dec!(0.5));
        assert!(validate_order(&market).is_ok());
    }

    #[test]
    fn test_validate_order_rejects_bad_values() {
        let zero = OrderRequest::limit(pair(), Side::Buy, dec!(1000000), dec!(0));
        assert!(matches!(validate_order(&zero), Err(RestError::InvalidParameter(_))));

        let negative_price = OrderRequest::limit(pair(), Side::Buy, dec!(-1), dec!(1));
        assert!(validate_order(&negative_price).is_err());

        let mut no_price = OrderRequest::limit(pair(), Side::Buy, dec!(1), dec!(1));
        no_price.price = None;
        assert!(validate_order(&no_price).is_err());
    }
}
