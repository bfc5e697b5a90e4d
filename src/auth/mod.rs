pub mod claims;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod scope;

pub use claims::{Claims, RefreshClaims};
pub use identity::{Identity, Principal};
pub use jwt::JwtService;
pub use middleware::AuthMiddleware;
pub use policy::{authorize, require, Action, Decision, Denial, QuizResource, Target};
pub use scope::{scope, Collection, Scope};
