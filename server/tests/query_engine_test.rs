//! Paginated join pipeline over real collections

use chrono::Utc;
use serde_json::Value;
use streamline_server::db::DbService;
use streamline_server::db::models::{
    Customer, CustomerType, Order, OrderStatus, Sale, SaleItem, SaleOrderStatus,
    SalePaymentStatus,
};
use streamline_server::db::repository::{SaleRepository, record_id};
use streamline_server::query::{Filter, JoinSpec, PagedQuery, PageParams};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CUSTOMER_JOIN: JoinSpec = JoinSpec {
    foreign_table: "customer_data",
    local_field: "customer_id",
    alias: "customer_info",
    fields: &["customer_name", "email"],
};

async fn seed_customer(db: &Surreal<Db>, name: &str, email: &str) -> surrealdb::RecordId {
    let now = Utc::now();
    let created: Option<Customer> = db
        .create("customer_data")
        .content(Customer {
            id: None,
            customer_name: name.to_string(),
            contact_number: "555-0000".to_string(),
            email: email.to_string(),
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            company_name: None,
            customer_type: CustomerType::Individual,
            credit_limit: 0.0,
            balance_due: 0.0,
            notes: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    created.unwrap().id.unwrap()
}

async fn seed_order(
    db: &Surreal<Db>,
    order_id: i64,
    customer_id: surrealdb::RecordId,
    status: OrderStatus,
) {
    let now = Utc::now();
    let _: Option<Order> = db
        .create("orders")
        .content(Order {
            id: None,
            order_id,
            customer_id,
            order_date: now,
            shipping_date: None,
            status,
            total_amount: 100.0,
            tax_amount: 18.0,
            net_amount: 118.0,
            payment_method: None,
            payment_status: None,
            payment_date: None,
            shipping_address: "1 Main St".to_string(),
            billing_address: "1 Main St".to_string(),
            items: Vec::new(),
            created_by: "seed".to_string(),
            updated_by: "seed".to_string(),
            notes: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn total_count_reflects_matches_not_page_size() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Acme", "acme@example.com").await;
    for i in 0..25 {
        seed_order(&db, 100_000 + i, customer.clone(), OrderStatus::Pending).await;
    }

    let query = PagedQuery::new("orders", &["id", "order_id"]).join(CUSTOMER_JOIN);

    let page1 = query.run(&db, PageParams::new(1, 10)).await.unwrap();
    assert_eq!(page1.data.len(), 10);
    assert_eq!(page1.total_count, 25);

    let page3 = query.run(&db, PageParams::new(3, 10)).await.unwrap();
    assert_eq!(page3.data.len(), 5);
    assert_eq!(page3.total_count, 25);
}

#[tokio::test]
async fn pages_partition_the_result_set() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Acme", "acme@example.com").await;
    for i in 0..25 {
        seed_order(&db, 100_000 + i, customer.clone(), OrderStatus::Pending).await;
    }

    let query = PagedQuery::new("orders", &["id", "order_id"]);
    let mut seen: Vec<i64> = Vec::new();
    for page in 1..=3 {
        let result = query.run(&db, PageParams::new(page, 10)).await.unwrap();
        seen.extend(
            result
                .data
                .iter()
                .map(|row| row["order_id"].as_i64().unwrap()),
        );
    }

    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn empty_match_yields_empty_page_and_zero_count() {
    let db = DbService::memory().await.unwrap().db;

    let result = PagedQuery::new("orders", &["id", "order_id"])
        .join(CUSTOMER_JOIN)
        .run(&db, PageParams::new(1, 10))
        .await
        .unwrap();

    assert!(result.data.is_empty());
    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn page_below_one_is_treated_as_first_page() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Acme", "acme@example.com").await;
    for i in 0..5 {
        seed_order(&db, 100_000 + i, customer.clone(), OrderStatus::Pending).await;
    }

    let query = PagedQuery::new("orders", &["id", "order_id"]);
    let first = query.run(&db, PageParams::new(1, 10)).await.unwrap();
    let clamped = query.run(&db, PageParams::new(0, 10)).await.unwrap();

    let ids = |result: &streamline_server::query::PageResult| -> Vec<i64> {
        result
            .data
            .iter()
            .map(|row| row["order_id"].as_i64().unwrap())
            .collect()
    };
    assert_eq!(ids(&first), ids(&clamped));
}

#[tokio::test]
async fn status_filter_narrows_rows_and_count() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Acme", "acme@example.com").await;
    for i in 0..4 {
        seed_order(&db, 100_000 + i, customer.clone(), OrderStatus::Pending).await;
    }
    for i in 0..3 {
        seed_order(&db, 200_000 + i, customer.clone(), OrderStatus::Shipped).await;
    }

    let result = PagedQuery::new("orders", &["id", "order_id", "status"])
        .filter(Filter::eq("status", OrderStatus::Shipped))
        .run(&db, PageParams::new(1, 10))
        .await
        .unwrap();

    assert_eq!(result.total_count, 3);
    assert!(result
        .data
        .iter()
        .all(|row| row["status"] == Value::String("shipped".to_string())));
}

#[tokio::test]
async fn join_resolves_customer_fields() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Jane Doe", "jane@example.com").await;
    seed_order(&db, 123_456, customer, OrderStatus::Pending).await;

    let row = PagedQuery::new("orders", &["id", "order_id"])
        .join(CUSTOMER_JOIN)
        .filter(Filter::eq("order_id", 123_456))
        .run_single(&db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(row["customer_info"]["customer_name"], "Jane Doe");
    assert_eq!(row["customer_info"]["email"], "jane@example.com");
}

#[tokio::test]
async fn dangling_foreign_key_keeps_the_row() {
    let db = DbService::memory().await.unwrap().db;
    // Order pointing at a customer record that does not exist
    let ghost = record_id("customer_data", "ghost").unwrap();
    seed_order(&db, 654_321, ghost, OrderStatus::Pending).await;

    let result = PagedQuery::new("orders", &["id", "order_id"])
        .join(CUSTOMER_JOIN)
        .run(&db, PageParams::new(1, 10))
        .await
        .unwrap();

    assert_eq!(result.total_count, 1);
    assert_eq!(result.data.len(), 1);
    assert!(result.data[0]["customer_info"].is_null());
}

#[tokio::test]
async fn sales_report_pages_and_joins_customer() {
    let db = DbService::memory().await.unwrap().db;
    let customer = seed_customer(&db, "Acme", "acme@example.com").await;

    let repo = SaleRepository::new(db.clone());
    let now = Utc::now();
    for i in 0..3 {
        repo.create(Sale {
            id: None,
            order_number: format!("SO-{i:04}"),
            customer_id: customer.clone(),
            items: vec![SaleItem {
                product_id: record_id("inventory", "widget").unwrap(),
                product_name: "Widget".to_string(),
                quantity: 2,
                price: 50.0,
                total: 100.0,
            }],
            total_amount: 100.0,
            payment_status: SalePaymentStatus::Paid,
            order_status: SaleOrderStatus::Delivered,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    }

    let result = PagedQuery::new("sales_data", &["id", "order_number", "total_amount"])
        .join(CUSTOMER_JOIN)
        .run(&db, PageParams::new(1, 2))
        .await
        .unwrap();

    assert_eq!(result.total_count, 3);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.data[0]["customer_info"]["customer_name"], "Acme");
}

#[tokio::test]
async fn case_insensitive_search_matches_mixed_case() {
    let db = DbService::memory().await.unwrap().db;
    seed_customer(&db, "Jane Doe", "jane@example.com").await;
    seed_customer(&db, "John Roe", "john@example.com").await;

    let result = PagedQuery::new("customer_data", &["id", "customer_name"])
        .filter(Filter::contains("customer_name", "jAnE"))
        .run(&db, PageParams::new(1, 10))
        .await
        .unwrap();

    assert_eq!(result.total_count, 1);
    assert_eq!(result.data[0]["customer_name"], "Jane Doe");
}
