mod client;
mod types;

pub use client::{ElevateClient, ElevateConfig, API_TOKEN_HEADER};
pub use types::{
    AskRequest, AskResponse, DeclareRequest, DeclareResponse, StatusResponse, SummaryResponse,
};
