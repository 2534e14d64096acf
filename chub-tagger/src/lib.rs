//! chub-tagger library interface
//!
//! Tags film scans with metadata from the CameraHub catalog. Exposes the
//! pieces the binary wires together so they can be tested in isolation.

pub mod client;
pub mod console;
pub mod error;
pub mod files;
pub mod setup;
pub mod store;
pub mod workflow;

pub use crate::client::{Catalog, CameraHubClient, ClientError};
pub use crate::error::{TaggerError, TaggerResult};
pub use crate::store::{SidecarStore, TagStore};
pub use crate::workflow::{FileOutcome, Interaction, RunSummary, Tagger, TaggerOptions};
