mod controller;
mod request;
mod transport;

pub use controller::{BeginError, SubmissionController, Ticket};
pub use request::{IMAGE_FIELD, UploadRequest};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
