use std::error::Error;
use std::fmt::{Debug, Display};

/// Reasons a login handshake can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The login response body decoded to nothing.
    EmptyResponse,
    /// The login endpoint answered with a non-2xx status.
    HttpStatus(u16),
    MissingCredential,
    MissingUserId,
    MissingToken,
    MissingCookie,
    CookieParseFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Auth(AuthErrorKind),
    /// A data request was issued before a successful login.
    NotAuthenticated,
    /// A data endpoint answered with a non-2xx status.
    RequestFailed(u16),
    Decode,
    Transport,
    Config,
}

#[derive(Clone)]
pub struct MashovError {
    kind: ErrorKind,
    trace: String,
    message: String,
    underlying_error: Option<String>,
}

impl MashovError {
    pub(crate) fn new(
        kind: ErrorKind,
        trace: String,
        message: String,
        underlying: Option<String>,
    ) -> Self {
        Self {
            kind,
            trace,
            message,
            underlying_error: underlying,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status carried by the error, if it was caused by one.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Auth(AuthErrorKind::HttpStatus(code)) | ErrorKind::RequestFailed(code) => {
                Some(code)
            }
            _ => None,
        }
    }
}

impl Error for MashovError {}

impl Display for MashovError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error_name = self.underlying_error.as_deref().unwrap_or("MashovError");
        write!(f, "[{}] ({}): {}", error_name, self.trace, self.message)
    }
}

impl Debug for MashovError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error_name = self.underlying_error.as_deref().unwrap_or("MashovError");
        write!(
            f,
            "[{}] ({}) {:?}: {}",
            error_name, self.trace, self.kind, self.message
        )
    }
}

macro_rules! this_errors {
    ($kind:expr => $msg:literal, $val:expr) => {
        $val.map_err(|e| $crate::error!($kind => $msg, e))?
    };
    ($msg:literal, $val:expr) => {
        $val.map_err(|e| $crate::error!($msg, e))?
    };
}

macro_rules! fn_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        &name[..name.len() - 3]
    }};
}

macro_rules! error {
    ($kind:expr => $val:expr) => {{
        let fun_name: &str = $crate::errors::fn_name!();
        $crate::errors::MashovError::new($kind, fun_name.into(), ($val).into(), None)
    }};
    ($kind:expr => $val:literal, $err:expr) => {{
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let err = $err;
        let fun_name: &str = $crate::errors::fn_name!();
        let error_type_name = type_name_of(&err);
        let error_name = error_type_name.split("::").last().map(|x| x.to_string());
        let final_msg = format!("{:?} - {:?}", $val, err);
        $crate::errors::MashovError::new($kind, fun_name.into(), final_msg, error_name)
    }};
    ($val:literal) => {
        $crate::error!($crate::errors::ErrorKind::Config => $val)
    };
    ($val:literal, $err:expr) => {
        $crate::error!($crate::errors::ErrorKind::Config => $val, $err)
    };
}

pub(crate) use error;
pub(crate) use fn_name;
pub(crate) use this_errors;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = error!(ErrorKind::RequestFailed(503) => "request failed with status 503");
        assert_eq!(err.status(), Some(503));

        let err = error!(ErrorKind::Auth(AuthErrorKind::HttpStatus(401)) => "login failed");
        assert_eq!(err.status(), Some(401));

        let err = error!(ErrorKind::NotAuthenticated => "not logged in");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_names_the_raising_function() {
        let err = error!(ErrorKind::Decode => "bad body");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[MashovError]"));
        assert!(rendered.contains("display_names_the_raising_function"));
        assert!(rendered.ends_with("bad body"));
    }

    #[test]
    fn wrapped_errors_keep_their_type_name() {
        let parse = "x".parse::<u16>().unwrap_err();
        let err = error!(ErrorKind::Decode => "failed to parse", parse);
        assert!(err.to_string().starts_with("[ParseIntError]"));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
