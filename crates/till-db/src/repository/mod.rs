//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Layer                                    │
//! │                                                                         │
//! │  Session code never writes SQL. It calls repository methods:           │
//! │                                                                         │
//! │    db.history().record(&sale)        - append a finalized sale         │
//! │    db.history().load_all()           - hydrate the in-memory log       │
//! │    db.catalog().save(&product)       - add a catalog entry             │
//! │                                                                         │
//! │  Each repository owns a clone of the pool (cheap: Arc internally)      │
//! │  and maps sqlx errors into DbError.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod history;
