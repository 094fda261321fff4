pub mod client;
pub mod identity;
pub mod storage;

pub use client::*;
pub use identity::{AuthError, FirebaseAuth, IdentityProvider};
pub use storage::{FirebaseStorage, ObjectStorage, StorageError};
