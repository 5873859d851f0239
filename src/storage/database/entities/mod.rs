/// API token entity module
pub mod api_token;
/// Blueprint entity module
pub mod blueprint;
/// CLI pairing session entity module
pub mod cli_session;
/// User entity module
pub mod user;
/// Browser session entity module
pub mod user_session;

pub use api_token::Entity as ApiToken;
pub use blueprint::Entity as Blueprint;
pub use cli_session::Entity as CliSession;
pub use user::Entity as User;
pub use user_session::Entity as UserSession;
