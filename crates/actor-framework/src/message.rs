//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::query::{Filter, FindQuery};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Document Store Operations
/// Every variant is one complete operation on the collection. The actor handles one
/// message at a time, so each variant is atomic with respect to every other.
///
/// - **Create**: Uses [`ActorEntity::Create`] to insert a new document. Responds with the stored document.
/// - **Get**: Find by ID.
/// - **Find**: Every document matching a [`FindQuery`], filtered then sorted.
/// - **FindOne**: The first document (natural order) matching a [`Filter`].
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing document.
/// - **Delete**: Removes a document by ID.
/// - **Action**: Executes a custom [`ActorEntity::Action`] as a single read-modify-write.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        query: FindQuery,
        respond_to: Response<Vec<T>>,
    },
    FindOne {
        filter: Filter,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
