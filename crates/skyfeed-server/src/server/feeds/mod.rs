//! Feed algorithms bundled with the server.

pub mod pinned;
