//! Streamline Server - inventory, orders, and support ticketing backend
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful routes, one module per resource
//! - **Database** (`db`): embedded SurrealDB storage with repositories
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **Audit** (`audit`): field-level change tracking on ticket documents
//! - **Query** (`query`): the paginated join pipeline behind every list view
//! - **Notify** (`notify`): fire-and-forget outbound notifications
//!
//! # Module layout
//!
//! ```text
//! server/src/
//! ├── core/    # configuration, state, HTTP server
//! ├── auth/    # JWT authentication
//! ├── api/     # routes and handlers
//! ├── db/      # models, repositories, id generator
//! ├── audit/   # change diffing and history entries
//! ├── query/   # paginated join query engine
//! ├── notify/  # notification dispatch
//! └── utils/   # errors, envelope, logging, time
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod query;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, PageResponse};

pub use utils::logger::{init_logger, init_logger_with_file};
