mod calls;
mod error;
mod health;
mod interaction;
mod process;

pub use calls::{calls_by_date_handler, calls_by_type_handler, list_calls_handler};
pub use error::ErrorResponse;
pub use health::health_handler;
pub use interaction::{
    interaction_qa_handler, interaction_status_handler, interaction_summary_handler,
};
pub use process::{process_upload_handler, process_uri_handler, ProcessUriRequest};
