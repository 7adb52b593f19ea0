//! Order notification stub.
//!
//! Dispatching to the district's LINE channel is an external collaborator;
//! this composes and logs the notification line that would be sent.

use machikado_core::PaymentOutcome;

use crate::models::Order;

/// Compose and log the order notification for a finalize action.
///
/// Returns the composed text so confirmation views can show it.
pub fn order_notification(order: &Order, product_name: &str, outcome: PaymentOutcome) -> String {
    let message = format!(
        "[LINE通知ダミー] 注文ID={} / 商品={} / 状態={}",
        order.id, product_name, outcome
    );
    tracing::info!(
        order_id = %order.id,
        product = product_name,
        status = %outcome,
        "order notification (dispatch stub)"
    );
    message
}
