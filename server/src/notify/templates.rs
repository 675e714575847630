//! Notification message rendering
//!
//! Plain-text messages keyed by the state transition that triggered them.

use crate::db::models::OrderStatus;

/// Subject and body for an order status notification
pub fn order_status_message(order_id: i64, status: OrderStatus) -> (String, String) {
    let subject = "Streamline - Order Update".to_string();

    let body = match status {
        OrderStatus::Pending => format!(
            "Hi,\n\nYour order {order_id} is currently pending. \
             We will process it as soon as possible."
        ),
        OrderStatus::Shipped => format!(
            "Hi,\n\nYour order {order_id} has been shipped. \
             You can track your package using the provided tracking information."
        ),
        OrderStatus::Delivered => format!(
            "Congratulations!\n\nYour order {order_id} has been delivered successfully."
        ),
        OrderStatus::Cancelled => format!(
            "Hi,\n\nYour order {order_id} has been updated to CANCELLED."
        ),
    };

    (subject, body)
}

/// Subject and body for a newly created ticket
pub fn ticket_created_message(
    ticket_id: i64,
    subject_line: &str,
    description: &str,
    priority: &str,
) -> (String, String) {
    let subject = "Streamline - New Ticket Created".to_string();

    let body = format!(
        "Thank you for reaching out!\n\n\
         Your ticket has been successfully created. We are here to assist you \
         and will respond to your request as soon as possible.\n\n\
         Ticket ID: {ticket_id}\n\
         Subject: {subject_line}\n\
         Description: {description}\n\
         Priority: {priority}"
    );

    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_message_keyed_by_status() {
        let (subject, body) = order_status_message(123456, OrderStatus::Shipped);
        assert_eq!(subject, "Streamline - Order Update");
        assert!(body.contains("123456"));
        assert!(body.contains("shipped"));

        let (_, body) = order_status_message(123456, OrderStatus::Cancelled);
        assert!(body.contains("CANCELLED"));
    }

    #[test]
    fn test_ticket_message_includes_details() {
        let (subject, body) = ticket_created_message(654321, "Printer down", "It smokes", "high");
        assert_eq!(subject, "Streamline - New Ticket Created");
        assert!(body.contains("654321"));
        assert!(body.contains("Printer down"));
        assert!(body.contains("high"));
    }
}
