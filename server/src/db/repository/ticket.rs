//! Ticket Repository
//!
//! Owns the update-with-history flow: every persisted mutation of a ticket
//! carries exactly one history entry, and a mutation that changes nothing is
//! rejected instead of silently succeeding.

use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::audit::{Actor, HistoryEntry, compute_changes};
use crate::db::models::{Ticket, TicketUpdate};
use crate::db::sequence::HumanIdGenerator;

const TABLE: &str = "tickets";
const HUMAN_ID_FIELD: &str = "ticket_id";
const USER_TABLE: &str = "user_data";

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Clone)]
pub struct TicketRepository {
    base: BaseRepository,
}

impl TicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a ticket, assigning a fresh human ID.
    ///
    /// The generator pre-checks the ticket collection's own `ticket_id`
    /// field; if a concurrent writer claims the same candidate first, the
    /// unique index rejects the write and we draw again.
    pub async fn create(
        &self,
        mut ticket: Ticket,
        generator: &HumanIdGenerator,
    ) -> RepoResult<Ticket> {
        loop {
            ticket.ticket_id = generator.generate(TABLE, HUMAN_ID_FIELD).await?;

            match self.try_create(ticket.clone()).await {
                Ok(created) => return Ok(created),
                Err(RepoError::Duplicate(_)) => {
                    tracing::debug!(
                        ticket_id = ticket.ticket_id,
                        "Ticket ID claimed concurrently, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_create(&self, ticket: Ticket) -> RepoResult<Ticket> {
        let created: Option<Ticket> = self.base.db().create(TABLE).content(ticket).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create ticket".to_string()))
    }

    /// Find a ticket by its internal record id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Ticket>> {
        let ticket: Option<Ticket> = self.base.db().select(id.clone()).await?;
        Ok(ticket)
    }

    /// Find a ticket by its human-facing 6-digit id
    pub async fn find_by_ticket_id(&self, ticket_id: i64) -> RepoResult<Option<Ticket>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tickets WHERE ticket_id = $ticket_id LIMIT 1")
            .bind(("ticket_id", ticket_id))
            .await?;
        let tickets: Vec<Ticket> = result.take(0)?;
        Ok(tickets.into_iter().next())
    }

    /// All tickets, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Ticket>> {
        let tickets: Vec<Ticket> = self
            .base
            .db()
            .query("SELECT * FROM tickets ORDER BY created_at")
            .await?
            .take(0)?;
        Ok(tickets)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM tickets GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    /// Apply a partial update with audit history.
    ///
    /// Computes the field-level change set against the stored state; an empty
    /// change set is rejected as [`RepoError::NoChanges`] without touching
    /// the document. Otherwise the field merge and the history push persist
    /// together as one document save: history length K means exactly K
    /// effective updates.
    pub async fn update_with_history(
        &self,
        id: &RecordId,
        update: &TicketUpdate,
        actor: &Actor,
    ) -> RepoResult<Ticket> {
        let update = normalize_update(update)?;

        let mut ticket = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Ticket not found".to_string()))?;

        let changes = compute_changes(&diff_snapshot(&ticket), &update_snapshot(&update)?);
        if changes.is_empty() {
            return Err(RepoError::NoChanges);
        }

        ticket.apply(&update);
        ticket
            .history
            .push(HistoryEntry::new("Updated ticket", changes, actor));
        ticket.updated_at = chrono::Utc::now();

        self.save(id, ticket).await
    }

    async fn save(&self, id: &RecordId, mut ticket: Ticket) -> RepoResult<Ticket> {
        // The record id is the update target, not document content
        ticket.id = None;
        let updated: Option<Ticket> = self.base.db().update(id.clone()).content(ticket).await?;
        updated.ok_or_else(|| RepoError::NotFound("Ticket not found".to_string()))
    }
}

/// Normalize `assigned_to` to its full `table:key` form before any diffing.
/// A bare user key and the full form name the same user; the diff and the
/// merge must both see the canonical spelling, otherwise the history could
/// record a change the merge never applied.
fn normalize_update(update: &TicketUpdate) -> RepoResult<TicketUpdate> {
    let mut update = update.clone();
    if let Some(ref assigned_to) = update.assigned_to {
        let rid = record_id(USER_TABLE, assigned_to)?;
        update.assigned_to = Some(rid.to_string());
    }
    Ok(update)
}

/// Stored state as a diffable field map, record links rendered in their
/// `table:key` string form so they compare against request values
fn diff_snapshot(ticket: &Ticket) -> serde_json::Map<String, Value> {
    let mut map = match serde_json::to_value(ticket) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    if let Some(ref assigned_to) = ticket.assigned_to {
        map.insert(
            "assigned_to".to_string(),
            Value::String(assigned_to.to_string()),
        );
    }
    map.insert("user_id".to_string(), Value::String(ticket.user_id.to_string()));
    map
}

fn update_snapshot(update: &TicketUpdate) -> RepoResult<serde_json::Map<String, Value>> {
    match serde_json::to_value(update) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(serde_json::Map::new()),
        Err(e) => Err(RepoError::Validation(format!("Invalid update payload: {e}"))),
    }
}
