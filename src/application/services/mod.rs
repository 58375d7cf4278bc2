mod call_processing;
mod poller;

pub use call_processing::{CallProcessingError, CallProcessingService, RetrievalStage};
pub use poller::{poll_until, PollError, PollPolicy};
