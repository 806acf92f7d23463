//! AT Protocol identifier syntax.
//!
//! Only the subset needed to route feed requests is implemented: AT-URIs and
//! their components (DIDs, handles, NSIDs and record keys).

mod aturi;
mod error;
mod identifier;
mod nsid;
mod rkey;

pub use aturi::*;
pub use error::*;
pub use identifier::*;
pub use nsid::*;
pub use rkey::*;
