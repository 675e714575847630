//! Human-facing ID generation under constrained ID spaces

use std::time::Duration;

use chrono::Utc;
use streamline_server::db::DbService;
use streamline_server::db::models::{
    Department, IssueType, Order, OrderStatus, Ticket, TicketPriority, TicketStatus,
};
use streamline_server::db::repository::{OrderRepository, TicketRepository, record_id};
use streamline_server::db::sequence::HumanIdGenerator;

fn blank_ticket(user_key: &str) -> Ticket {
    let now = Utc::now();
    Ticket {
        id: None,
        ticket_id: 0,
        user_id: record_id("user_data", user_key).unwrap(),
        issue_type: IssueType::Bug,
        department: Department::Support,
        subject: "Printer offline".to_string(),
        description: "The office printer stopped responding.".to_string(),
        priority: TicketPriority::Medium,
        status: TicketStatus::Open,
        assigned_to: None,
        history: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn blank_order(customer_key: &str) -> Order {
    let now = Utc::now();
    Order {
        id: None,
        order_id: 0,
        customer_id: record_id("customer_data", customer_key).unwrap(),
        order_date: now,
        shipping_date: None,
        status: OrderStatus::Pending,
        total_amount: 100.0,
        tax_amount: 18.0,
        net_amount: 118.0,
        payment_method: None,
        payment_status: None,
        payment_date: None,
        shipping_address: "1 Main St".to_string(),
        billing_address: "1 Main St".to_string(),
        items: Vec::new(),
        created_by: "Test User".to_string(),
        updated_by: "Test User".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn generation_terminates_when_every_id_is_free() {
    let db = DbService::memory().await.unwrap().db;
    let generator = HumanIdGenerator::new(db);

    // On an empty table the very first draw is unoccupied; the generator
    // must return it instead of spinning on the occupancy check
    let id = tokio::time::timeout(
        Duration::from_secs(5),
        generator.generate("tickets", "ticket_id"),
    )
    .await
    .expect("generation finishes promptly on an empty table")
    .unwrap();

    assert!((100_000..=999_999).contains(&id));
}

#[tokio::test]
async fn generated_ids_are_six_digits() {
    let db = DbService::memory().await.unwrap().db;
    let generator = HumanIdGenerator::new(db.clone());
    let repo = TicketRepository::new(db);

    let ticket = repo.create(blank_ticket("u1"), &generator).await.unwrap();

    assert!((100_000..=999_999).contains(&ticket.ticket_id));
}

#[tokio::test]
async fn narrow_range_still_yields_distinct_ids() {
    let db = DbService::memory().await.unwrap().db;
    // Three slots only: later draws must collide and retry until they find
    // the free slot
    let generator = HumanIdGenerator::with_range(db.clone(), 1..=3);
    let repo = TicketRepository::new(db);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let ticket = repo.create(blank_ticket("u1"), &generator).await.unwrap();
        seen.push(ticket.ticket_id);
    }

    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[tokio::test]
async fn order_and_ticket_id_spaces_are_independent() {
    let db = DbService::memory().await.unwrap().db;
    // A single-slot range forces both entity types onto the same number
    let generator = HumanIdGenerator::with_range(db.clone(), 7..=7);

    let orders = OrderRepository::new(db.clone());
    let created = orders.create(blank_order("c1"), &generator).await.unwrap();
    assert_eq!(created.order_id, 7);

    // The order occupying 7 must not block ticket id 7
    let tickets = TicketRepository::new(db);
    let ticket = tickets.create(blank_ticket("u1"), &generator).await.unwrap();
    assert_eq!(ticket.ticket_id, 7);

    let found = tickets.find_by_ticket_id(7).await.unwrap().unwrap();
    assert_eq!(found.subject, "Printer offline");
}
