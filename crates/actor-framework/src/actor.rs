//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the document store behind a
//! [`ResourceClient`]. It owns one collection of entities and processes messages
//! sequentially, so every request is an atomic read-modify-write on the collection.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::query::{Filter, FindQuery};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so no `Mutex` or
/// `RwLock` guards the `store`. Two requests touching the same document can never
/// interleave: the second one observes the committed result of the first.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (store handle).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// let handle = tokio::spawn(actor.run(()));
/// let product = client.create(params).await?;
/// ```
///
/// # Implementation Details
///
/// The actor keeps a `HashMap` (`store`) from ID to entity, the insertion order of the
/// IDs (`order`) which is the natural order of `Find` results, and a `u32` counter
/// (`next_id`) for ID generation.
///
/// ## Operations
///
/// * **Create**: allocate an ID, build the entity, run `on_create`, check unique fields, insert.
/// * **Get**: clone of the entity, or `None`.
/// * **Find / FindOne**: evaluate the query over the entities in natural order.
/// * **Update**: run `on_update` on a working copy, check unique fields, commit the copy.
/// * **Delete**: run `on_delete`, remove.
/// * **Action**: run `handle_action` on a working copy, commit the copy on success.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // Short type name, e.g. "Product".
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let outcome = self.create(params, &context).await;
                    self.reply("Create", respond_to, outcome);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    self.reply("Get", respond_to, Ok(item));
                }
                ResourceRequest::Find { query, respond_to } => {
                    let hits = self.find(&query);
                    debug!(entity_type, ?query, hits = hits.len(), "Find");
                    self.reply("Find", respond_to, Ok(hits));
                }
                ResourceRequest::FindOne { filter, respond_to } => {
                    let item = self.find_one(&filter);
                    debug!(entity_type, ?filter, found = item.is_some(), "FindOne");
                    self.reply("FindOne", respond_to, Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let outcome = self.update(id, update, &context).await;
                    self.reply("Update", respond_to, outcome);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let outcome = self.delete(id, &context).await;
                    self.reply("Delete", respond_to, outcome);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let outcome = self.act(id, action, &context).await;
                    self.reply("Action", respond_to, outcome);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Sends the outcome back, logging rejections. A caller that stopped waiting is ignored.
    fn reply<R>(
        &self,
        op: &'static str,
        respond_to: Response<R>,
        outcome: Result<R, FrameworkError>,
    ) {
        if let Err(e) = &outcome {
            warn!(entity_type = self.entity_type, op, error = %e, "Rejected");
        }
        let _ = respond_to.send(outcome);
    }

    async fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T, FrameworkError> {
        debug!(entity_type = self.entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(ctx).await.map_err(entity_error)?;
        self.check_unique(&item)?;

        self.store.insert(id.clone(), item.clone());
        self.order.push(id.clone());
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    fn find(&self, query: &FindQuery) -> Vec<T> {
        query.run(self.natural_order(), |item: &T, field: &str| item.field(field))
    }

    fn find_one(&self, filter: &Filter) -> Option<T> {
        self.natural_order()
            .find(|item| filter.matches(&|field: &str| item.field(field)))
            .cloned()
    }

    /// Applies `on_update` to a working copy and commits it only if it still satisfies
    /// the unique fields.
    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut working = self.working_copy(&id)?;
        working.on_update(update, ctx).await.map_err(entity_error)?;
        self.check_unique(&working)?;

        self.store.insert(id.clone(), working.clone());
        info!(entity_type = self.entity_type, %id, "Updated");
        Ok(working)
    }

    async fn delete(&mut self, id: T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(ctx).await.map_err(entity_error)?;

        self.store.remove(&id);
        self.order.retain(|kept| kept != &id);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    /// Runs the action against a working copy; a failed action leaves the stored entity
    /// untouched.
    async fn act(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut working = self.working_copy(&id)?;
        let result = working
            .handle_action(action, ctx)
            .await
            .map_err(entity_error)?;

        self.store.insert(id.clone(), working);
        info!(entity_type = self.entity_type, %id, "Action applied");
        Ok(result)
    }

    fn working_copy(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    /// Fails on the first unique field where `candidate` collides with another entity.
    fn check_unique(&self, candidate: &T) -> Result<(), FrameworkError> {
        for field in T::UNIQUE_FIELDS {
            let Some(value) = candidate.field(field) else {
                continue;
            };
            let taken = self.store.values().any(|other| {
                other.id() != candidate.id() && other.field(field).as_ref() == Some(&value)
            });
            if taken {
                return Err(FrameworkError::Conflict {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn natural_order(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.store.get(id))
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
