//! Interface definitions for the pruner's collaborators.
//!
//! The pruner only depends on these traits, so tests can inject mock
//! clients, fixed clocks and static credentials.

mod clock;
mod credential_resolver;
mod search_client;

pub use clock::{Clock, SystemClock};
pub use credential_resolver::CredentialResolver;
pub use search_client::SearchClient;
