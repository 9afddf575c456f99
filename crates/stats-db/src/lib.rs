//! # stats-db
//!
//! Database layer implementing the member store port from `stats-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migration
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgMemberRepository`: PostgreSQL, one transaction per operation
//! - `InMemoryMemberRepository`: process-local store with the same constraints
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stats_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use stats_db::PgMemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "postgresql://localhost/reaction_stats".to_string(),
//!         ..DatabaseConfig::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let members = PgMemberRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryMemberRepository;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgMemberRepository;
