// Authentication module
// Credential selection, the Identity v2 token exchange, and session
// establishment with optional reauthentication

mod identity;
mod options;
mod session;
pub mod types;

pub use options::AuthOptions;
pub use session::{authenticate, Authenticated, Reauthenticator, Session};
