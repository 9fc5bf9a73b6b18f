//! Order dispatcher: simulate or submit exactly once

use tracing::{info, warn};

use crate::common::errors::Result;
use crate::common::traits::OrderSubmitter;
use crate::common::types::{OrderAck, OrderIntent};

/// Report or submit one order.
///
/// With `simulate` the submitter is never called and `None` is returned.
/// Otherwise the order is submitted once; the acknowledgment is returned
/// verbatim and failures propagate unchanged, without retry.
pub async fn dispatch<S>(submitter: &S, intent: &OrderIntent, simulate: bool) -> Result<Option<OrderAck>>
where
    S: OrderSubmitter + ?Sized,
{
    if simulate {
        info!(
            token_id = %intent.token_id,
            side = %intent.side,
            price = %intent.price,
            size = %intent.size,
            time_in_force = %intent.time_in_force,
            "dry run: order not submitted"
        );
        return Ok(None);
    }

    info!(
        token_id = %intent.token_id,
        side = %intent.side,
        price = %intent.price,
        size = %intent.size,
        time_in_force = %intent.time_in_force,
        "placing live order"
    );

    let ack = submitter.submit_order(intent).await?;

    if ack.is_success() {
        info!(
            order_id = ack.order_id().unwrap_or("-"),
            status = ack.status().unwrap_or("-"),
            "order dispatched"
        );
    } else {
        warn!(
            error = ack.error_msg().unwrap_or("-"),
            response = %ack,
            "venue reported the order as unsuccessful"
        );
    }

    Ok(Some(ack))
}
