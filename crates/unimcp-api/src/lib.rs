// unimcp-api: async session client for the UniFi Network application

pub mod error;
pub mod session;
pub mod transport;

pub use error::Error;
pub use session::models::{Envelope, Meta, RawAlarm, RawClient, RawDevice};
pub use session::{Scope, Session};
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
