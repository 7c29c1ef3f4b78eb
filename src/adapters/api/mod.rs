//! Submission API adapters
//!
//! Everything that talks HTTP lives here: the OAuth token client and the
//! transport the batch submitter sends through.

pub mod auth;
pub mod transport;

pub use auth::TokenClient;
pub use transport::{ApiHeaders, ApiResponse, HttpTransport, Transport};
