mod call_repository;
mod interaction_client;

pub use call_repository::{CallRepository, GroupCount, RepositoryError};
pub use interaction_client::{InteractionClient, InteractionClientError};
