use std::fmt::Debug;

use tracing::{info, warn};

use crate::{
    MashovError,
    auth::cookie::normalize_cookie,
    connection::Connection,
    error,
    errors::{AuthErrorKind, ErrorKind},
    http::{
        self,
        client::{HttpResponse, MashovHttpClient},
        login::{LoginBody, SessionInfo},
    },
    this_errors,
};

static LOGIN_REQUEST_PATH: &str = "login";
static CSRF_TOKEN_HEADER: &str = "x-csrf-token";
static SET_COOKIE_HEADER: &str = "set-cookie";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// The three artifacts replayed on every data request.
#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct SessionCredentials {
    pub anti_forgery_token: String,
    pub session_cookie: String,
    pub user_id: String,
}

impl SessionCredentials {
    pub fn is_complete(&self) -> bool {
        !self.anti_forgery_token.is_empty()
            && !self.session_cookie.is_empty()
            && !self.user_id.is_empty()
    }
}

impl Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("anti_forgery_token", &"<redacted>")
            .field("session_cookie", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Everything a successful login produces. Only committed once every check passed.
#[derive(Debug)]
pub(crate) struct Handshake {
    pub info: SessionInfo,
    pub credentials: SessionCredentials,
}

impl Handshake {
    pub fn from_response(resp: &HttpResponse) -> Result<Self, MashovError> {
        if !resp.is_success() {
            return Err(error!(
                ErrorKind::Auth(AuthErrorKind::HttpStatus(resp.status)) =>
                format!("login failed with status {}", resp.status)
            ));
        }

        if resp.body.iter().all(u8::is_ascii_whitespace) {
            return Err(error!(
                ErrorKind::Auth(AuthErrorKind::EmptyResponse) => "login response body was empty"
            ));
        }

        let decoded = this_errors!(
            ErrorKind::Decode => "failed to parse login response as json",
            serde_json::from_slice::<Option<SessionInfo>>(&resp.body)
        );

        let info = decoded.ok_or_else(|| {
            error!(ErrorKind::Auth(AuthErrorKind::EmptyResponse) => "login response was null")
        })?;

        let credential = info.credential.as_ref().ok_or_else(|| {
            error!(
                ErrorKind::Auth(AuthErrorKind::MissingCredential) =>
                "missing credential in login response"
            )
        })?;

        let user_id = credential
            .user_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                error!(
                    ErrorKind::Auth(AuthErrorKind::MissingUserId) =>
                    "missing credential.userId in login response"
                )
            })?;

        let anti_forgery_token = resp
            .header(CSRF_TOKEN_HEADER)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                error!(
                    ErrorKind::Auth(AuthErrorKind::MissingToken) =>
                    "missing x-csrf-token header in login response"
                )
            })?;

        let raw_cookie = resp.header(SET_COOKIE_HEADER).ok_or_else(|| {
            error!(
                ErrorKind::Auth(AuthErrorKind::MissingCookie) =>
                "missing set-cookie header in login response"
            )
        })?;

        let session_cookie = normalize_cookie(&raw_cookie);
        if session_cookie.is_empty() {
            return Err(error!(
                ErrorKind::Auth(AuthErrorKind::CookieParseFailed) =>
                "failed to parse set-cookie header"
            ));
        }

        Ok(Handshake {
            info,
            credentials: SessionCredentials {
                anti_forgery_token,
                session_cookie,
                user_id,
            },
        })
    }
}

pub(crate) struct Session<C: MashovHttpClient + Clone> {
    credentials: SessionCredentials,
    info: SessionInfo,
    conn: Connection<C>,
}

impl<C: MashovHttpClient + Clone> Session<C> {
    pub(crate) fn new(conn: Connection<C>) -> Self {
        Session {
            credentials: SessionCredentials::default(),
            info: SessionInfo::default(),
            conn,
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        if self.credentials.is_complete() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Credentials for an authenticated request, or `NotAuthenticated`.
    pub(crate) fn credentials(&self) -> Result<&SessionCredentials, MashovError> {
        match self.state() {
            SessionState::Authenticated => Ok(&self.credentials),
            SessionState::Unauthenticated => Err(error!(
                ErrorKind::NotAuthenticated => "not logged in, call authenticate() first"
            )),
        }
    }

    pub(crate) fn info(&self) -> &SessionInfo {
        &self.info
    }

    pub(crate) fn get_conn(&self) -> Connection<C> {
        self.conn.clone()
    }

    /// Runs the login handshake. State is replaced only when every artifact was found;
    /// a failed attempt leaves the previous session untouched.
    pub(crate) async fn login(&mut self) -> Result<(), MashovError> {
        let opts = self.conn.get_opts();
        let body = LoginBody::new(&opts.username, &opts.password, opts.semel, opts.year);

        let request = this_errors!(
            "failed to build login request",
            http::RequestBuilder::default()
                .connection(self.conn.clone())
                .segments(vec![LOGIN_REQUEST_PATH.to_string()])
                .build()
        );

        let resp = request.post(&body).await?;

        let handshake = Handshake::from_response(&resp).inspect_err(|e| {
            warn!(kind = ?e.kind(), "login rejected");
        })?;

        info!(user_id = %handshake.credentials.user_id, "logged in");

        self.info = handshake.info;
        self.credentials = handshake.credentials;

        Ok(())
    }

    pub(crate) fn logout(&mut self) {
        self.credentials = SessionCredentials::default();
        self.info = SessionInfo::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.as_bytes().to_vec(),
        }
    }

    const GOOD_BODY: &str = r#"{"sessionId":"s-1","credential":{"userId":"u-1"}}"#;
    const GOOD_HEADERS: &[(&str, &str)] = &[
        ("X-Csrf-Token", "tok"),
        ("Set-Cookie", "MashovSessionID=abc; path=/; HttpOnly"),
        ("Set-Cookie", "Csrf-Token=tok; path=/"),
    ];

    fn auth_kind(err: MashovError) -> AuthErrorKind {
        match err.kind() {
            ErrorKind::Auth(kind) => kind,
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn extracts_all_three_artifacts() {
        let handshake = Handshake::from_response(&response(200, GOOD_HEADERS, GOOD_BODY)).unwrap();

        assert_eq!(handshake.credentials.user_id, "u-1");
        assert_eq!(handshake.credentials.anti_forgery_token, "tok");
        assert_eq!(
            handshake.credentials.session_cookie,
            "MashovSessionID=abc; Csrf-Token=tok"
        );
        assert_eq!(handshake.info.session_id.as_deref(), Some("s-1"));
        assert!(handshake.credentials.is_complete());
    }

    #[test]
    fn non_success_status_carries_code() {
        let err = Handshake::from_response(&response(401, GOOD_HEADERS, "")).unwrap_err();
        assert_eq!(auth_kind(err.clone()), AuthErrorKind::HttpStatus(401));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn empty_or_null_body_is_rejected() {
        for body in ["", "  ", "null"] {
            let err = Handshake::from_response(&response(200, GOOD_HEADERS, body)).unwrap_err();
            assert_eq!(auth_kind(err), AuthErrorKind::EmptyResponse, "body {body:?}");
        }
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = Handshake::from_response(&response(200, GOOD_HEADERS, "<html>")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let cases = [
            (r#"{"sessionId":"s-1"}"#, GOOD_HEADERS, AuthErrorKind::MissingCredential),
            (r#"{"credential":{}}"#, GOOD_HEADERS, AuthErrorKind::MissingUserId),
            (r#"{"credential":{"userId":""}}"#, GOOD_HEADERS, AuthErrorKind::MissingUserId),
            (
                GOOD_BODY,
                &[("Set-Cookie", "a=1")][..],
                AuthErrorKind::MissingToken,
            ),
            (
                GOOD_BODY,
                &[("x-csrf-token", "tok")][..],
                AuthErrorKind::MissingCookie,
            ),
            (
                GOOD_BODY,
                &[("x-csrf-token", "tok"), ("set-cookie", " ; Path=/")][..],
                AuthErrorKind::CookieParseFailed,
            ),
        ];

        for (body, headers, expected) in cases {
            let err = Handshake::from_response(&response(200, headers, body)).unwrap_err();
            assert_eq!(auth_kind(err), expected);
        }
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let credentials = SessionCredentials {
            anti_forgery_token: "s3cr3t".into(),
            session_cookie: "MashovSessionID=c00k13".into(),
            user_id: "u-1".into(),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("c00k13"));
        assert!(rendered.contains("u-1"));
    }
}
