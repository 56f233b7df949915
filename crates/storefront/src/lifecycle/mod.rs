//! # System Lifecycle
//!
//! Starting and stopping the actors behind the storefront.
//!
//! ## Startup
//!
//! [`StorefrontSystem::new`] creates the Product actor, spawns its run loop and keeps the
//! task handle. The returned [`ProductClient`](crate::clients::ProductClient) is the store
//! handle for the rest of the process; it is passed explicitly, never stored globally.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of the mailbox
//! 2. **Actor drains** - queued requests are answered, then `recv()` returns `None`
//! 3. **Await completion** - [`StorefrontSystem::shutdown`] waits for the actor task
//!
//! In the server binary the router owns the other clones; `axum::serve` returns only
//! after in-flight requests finish, and dropping the router releases them.

pub mod storefront_system;

pub use storefront_system::*;
