//! # Repository Module
//!
//! Database repository implementations for Mandi.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  API Handler                                                           │
//! │       │                                                                 │
//! │       │  db.products().search(tenant_id, "tomato", 20)                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, tenant_id, query, limit)                            │
//! │  ├── get_by_id(&self, tenant_id, id)                                   │
//! │  ├── insert(&self, product)                                            │
//! │  └── update(&self, product)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory database)                                   │
//! │  • SQL is isolated in one place                                        │
//! │  • Tenant scoping enforced in exactly one layer                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`TenantRepository`] - Store provisioning and directory
//! - [`ProductRepository`] - Product CRUD and search
//! - [`OrderRepository`] - Order placement and status tracking
//!
//! [`TenantRepository`]: tenant::TenantRepository
//! [`ProductRepository`]: product::ProductRepository
//! [`OrderRepository`]: order::OrderRepository

pub mod order;
pub mod product;
pub mod tenant;
