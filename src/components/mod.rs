pub mod common;
pub mod home;
pub mod signup;

pub use home::HomePage;
pub use signup::SignupPage;
