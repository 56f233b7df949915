//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a document type must implement to be
//! stored and served by the generic [`ResourceActor`](crate::ResourceActor). It specifies
//! associated types for IDs, DTOs, actions, context, and errors, lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`), and the field projection
//! used by queries and unique constraints.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::field`] defaults to exposing no fields, so such an entity only
//!   matches [`Filter::All`](crate::query::Filter::All).
//!
//! # Atomicity
//! Hooks run against a working copy of the stored document. The copy replaces the
//! stored document only when the hook succeeds, so a failing hook never leaves a
//! half-applied mutation behind.

use crate::query::Value;
use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored document must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks. The
/// `Context` type is injected into every hook, which allows dependencies to be passed
/// to `run()` instead of `new()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum for the whole entity. Boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way
    /// back to the client, which may downcast it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fields whose values must be distinct across the whole store.
    ///
    /// Checked by the actor on create and on update, against the value reported by
    /// [`ActorEntity::field`].
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The identifier assigned at creation.
    fn id(&self) -> &Self::Id;

    /// Projects a named field for filters, sorts and unique constraints.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
