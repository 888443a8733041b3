pub(crate) mod cookie;
pub(crate) mod session;

pub use cookie::normalize_cookie;
pub use session::SessionState;
