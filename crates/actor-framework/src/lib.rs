//! # Actor Framework
//!
//! This crate provides the building blocks for type-safe, concurrent document stores in
//! Rust. Each collection is owned by one actor task; callers talk to it through a cheap,
//! cloneable client handle. The pattern is the **Actor Model** applied to a
//! **Resource-Oriented** API: uniform CRUD plus queries, with domain operations expressed
//! as typed action messages.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your documents, their hooks and their fields
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, storage and queries
//! 3. **Interface Layer** ([`ResourceClient`]) - Type-safe communication
//!
//! You write the business rules **once** in the entity trait; the actor gives every request
//! read-modify-write atomicity because it handles one message at a time.
//!
//! ## Core Abstractions
//!
//! ### [`ActorEntity`] - The Document
//!
//! ```rust
//! use actor_framework::query::{Filter, FindQuery, SortSpec, Value};
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     age: u32,
//! }
//!
//! #[derive(Debug)] struct UserCreate { name: String, age: u32 }
//! #[derive(Debug)] struct UserUpdate { name: Option<String> }
//! #[derive(Debug)] enum UserAction {}
//! #[derive(Debug)] struct UserError(String);
//!
//! impl std::fmt::Display for UserError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
//! }
//! impl std::error::Error for UserError {}
//!
//! #[async_trait]
//! impl ActorEntity for User {
//!     type Id = u32;
//!     type Create = UserCreate;
//!     type Update = UserUpdate;
//!     type Action = UserAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = UserError;
//!
//!     const UNIQUE_FIELDS: &'static [&'static str] = &["name"];
//!
//!     fn from_create_params(id: u32, params: UserCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name, age: params.age })
//!     }
//!
//!     fn id(&self) -> &u32 {
//!         &self.id
//!     }
//!
//!     fn field(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "name" => Some(Value::from(self.name.as_str())),
//!             "age" => Some(Value::from(self.age)),
//!             _ => None,
//!         }
//!     }
//!
//!     async fn on_update(&mut self, update: UserUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: UserAction, _: &Self::Context) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<User>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let alice = client.create(UserCreate { name: "Alice".into(), age: 41 }).await.unwrap();
//!     client.create(UserCreate { name: "Bob".into(), age: 29 }).await.unwrap();
//!
//!     // Unique fields are enforced by the store.
//!     let dup = client.create(UserCreate { name: "Alice".into(), age: 3 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::Conflict { .. })));
//!
//!     let youngest_first = client
//!         .find(FindQuery::new(Filter::All).sort(SortSpec::asc("age")))
//!         .await
//!         .unwrap();
//!     assert_eq!(youngest_first[0].name, "Bob");
//!
//!     let found = client.find_one(Filter::eq("name", "Alice")).await.unwrap();
//!     assert_eq!(found.map(|u| u.id), Some(alice.id));
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time,
//! so actors can be created first and wired afterwards. Use `()` when an entity needs none.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Hooks mutate a working copy; the copy is committed only when the hook succeeds
//! - Multiple actors run in **parallel**
//!
//! ## Testing
//!
//! The [`mock`] module hands out real `ResourceClient<T>` handles backed by scripted
//! responses, for deterministic unit tests of client logic without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use query::{Filter, FindQuery, Order, SortSpec, Value};
