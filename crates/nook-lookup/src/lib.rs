//! DNS/WHOIS lookup for the nook Tools page.
//!
//! One fetch-and-render flow, independent of the storage pattern: a
//! [`DnsClient`] queries the host.io DNS endpoint, responses parse
//! defensively into a [`RecordSet`], and [`LookupSession`] drives the
//! Idle → Loading → (Success | Error) state machine with a single in-flight
//! guard.

pub mod client;
pub mod error;
pub mod record;
pub mod session;

pub use client::{DEFAULT_BASE_URL, DnsClient, LookupConfig};
pub use error::{Error, Result};
pub use record::{Record, RecordSet, RecordValue};
pub use session::{Fetch, GENERIC_ERROR, LookupSession, LookupState};
