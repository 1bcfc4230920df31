//! Session-based authentication for the inventory API.
//!
//! Credentials are checked against a small in-process directory; a
//! successful login mints an opaque token that the API layer carries as a
//! bearer header. Validation is deterministic: callers pass `now` in.

mod directory;
mod session;

pub use directory::{Credentials, UserAccount, UserDirectory};
pub use session::{
    session_ttl, validate_session, AuthError, InMemorySessionStore, Session, SessionStore,
};
