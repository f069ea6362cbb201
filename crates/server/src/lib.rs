//! Autoreply Server - HTTP REST API for the keyword auto-response engine
//!
//! This crate exposes the matcher, rule store and usage analytics over HTTP:
//!
//! - **Widget**: answer visitor messages from a tenant's active rules
//! - **Rule Management**: tenant-scoped CRUD plus CSV import/export
//! - **Analytics**: most-matched keywords per tenant
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/match` - Answer a visitor message
//! - `POST /api/v1/evaluate` - Dry-run a message against ad-hoc rules
//! - `GET /api/v1/widget/settings` - Widget appearance and behaviour
//! - `GET|POST /api/v1/tenants/{tenant_id}/rules` - List / create rules
//! - `GET|PUT|DELETE /api/v1/tenants/{tenant_id}/rules/{rule_id}` - One rule
//! - `GET /api/v1/tenants/{tenant_id}/rules/export` - CSV download
//! - `POST /api/v1/tenants/{tenant_id}/rules/import` - CSV upload
//! - `GET /api/v1/tenants/{tenant_id}/analytics/keywords` - Keyword report
//! - `GET /api/v1/metadata` - Server metadata
//!
//! Errors share one body shape: `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
