//! Ask-user broker core
//!
//! A shared in-memory registry of agent questions plus the tenant-scoped
//! business logic over it. Agents create a request and park on its one-shot
//! signal; human operators answer through the HTTP facade, which wakes the
//! waiting tool call. Exactly one answer per request ever succeeds, and a
//! caller only ever sees requests created under its own user identity.

pub mod broker;
pub mod store;

pub use broker::AskUserBroker;
pub use store::{RequestStore, WaitOutcome};
