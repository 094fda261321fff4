pub mod auth;
pub mod locale;
pub mod storage;

pub use auth::*;
pub use locale::{Locale, Message};
pub use storage::*;
