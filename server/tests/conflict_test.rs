//! Uniqueness of business identifiers: warehouse ids and customer emails

use streamline_server::db::DbService;
use streamline_server::db::models::{CustomerCreate, CustomerType, CustomerUpdate, WarehouseCreate, WarehouseStatus};
use streamline_server::db::repository::{CustomerRepository, RepoError, WarehouseRepository};

fn warehouse(warehouse_id: &str) -> WarehouseCreate {
    WarehouseCreate {
        warehouse_id: warehouse_id.to_string(),
        name: "Central".to_string(),
        location: "Springfield".to_string(),
        capacity: 1000,
        current_stock: 0,
        manager_id: "mgr".to_string(),
        contact_number: None,
        status: WarehouseStatus::Active,
    }
}

fn customer(name: &str, email: &str) -> CustomerCreate {
    CustomerCreate {
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
    }
}

#[tokio::test]
async fn duplicate_warehouse_id_is_a_conflict() {
    let db = DbService::memory().await.unwrap().db;
    let repo = WarehouseRepository::new(db);

    repo.create(warehouse("WH-001")).await.unwrap();

    let err = repo.create(warehouse("WH-001")).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn duplicate_customer_email_is_a_conflict() {
    let db = DbService::memory().await.unwrap().db;
    let repo = CustomerRepository::new(db);

    repo.create(customer("Jane Doe", "jane@example.com"))
        .await
        .unwrap();

    let err = repo
        .create(customer("Jane Imposter", "jane@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn moving_a_customer_onto_a_taken_email_is_a_conflict() {
    let db = DbService::memory().await.unwrap().db;
    let repo = CustomerRepository::new(db);

    repo.create(customer("Jane Doe", "jane@example.com"))
        .await
        .unwrap();
    let john = repo
        .create(customer("John Roe", "john@example.com"))
        .await
        .unwrap();

    let err = repo
        .update(
            &john.id.unwrap().to_string(),
            CustomerUpdate {
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
