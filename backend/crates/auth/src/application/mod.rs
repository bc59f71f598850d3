//! Application Layer
//!
//! Use cases and application services. Every use case is generic over the
//! repository and, per call, over the actor type.

pub mod change_password;
pub mod check_session;
pub mod config;
pub mod delete_account;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token;
pub mod update_profile;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::{ActorTokenConfig, AuthConfig};
pub use delete_account::DeleteAccountUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, IssuedToken, TokenKind, TokenPair, TokenService};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
