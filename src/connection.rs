use std::{fmt::Debug, sync::Arc};

use derive_builder::Builder;
use serde::de::DeserializeOwned;

use crate::{
    MashovError, Resource,
    auth::{SessionState, session::Session},
    executor::Executor,
    http::{self, client::MashovHttpClient, login::SessionInfo},
    this_errors,
};

static STUDENTS_PATH: &str = "students";

#[derive(Builder, Clone)]
pub struct MashovClientOpts {
    #[builder(setter(into))]
    pub(crate) username: String,

    #[builder(setter(into))]
    pub(crate) password: String,

    /// The institution code ("semel") of the student's school.
    pub(crate) semel: u32,

    /// The school year, e.g. `2024`.
    pub(crate) year: u32,

    /// Override the Mashov API endpoint used.
    ///
    /// If unset, this will default to `https://web.mashov.info/api`
    #[builder(setter(into, strip_option), default = None)]
    pub(crate) host: Option<String>,
}

impl Debug for MashovClientOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MashovClientOpts")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("semel", &self.semel)
            .field("year", &self.year)
            .field("host", &self.host)
            .finish()
    }
}

impl MashovClientOpts {
    pub fn with_client<C: MashovHttpClient>(self, client: C) -> MashovClient<C> {
        let connection = Connection {
            client,
            opts: Arc::new(self),
        };

        MashovClient {
            session: Session::new(connection),
        }
    }

    pub fn into_client<C: MashovHttpClient>(self) -> Result<MashovClient<C>, MashovError> {
        let client = C::new()?;
        Ok(self.with_client(client))
    }
}

#[derive(Clone)]
pub(crate) struct Connection<C>
where
    C: Clone,
{
    client: C,
    opts: Arc<MashovClientOpts>,
}

impl<C> Connection<C>
where
    C: MashovHttpClient + Clone,
{
    pub(crate) fn get_opts(&self) -> Arc<MashovClientOpts> {
        self.opts.clone()
    }

    pub(crate) fn get_client(&self) -> C {
        self.client.clone()
    }
}

/// A client bound to one student account.
///
/// Data calls take `&self` and logging in takes `&mut self`, so a login can
/// never race a fetch on the same client. Separate clients share nothing.
pub struct MashovClient<C: MashovHttpClient + Clone> {
    pub(crate) session: Session<C>,
}

#[cfg(feature = "reqwest")]
impl MashovClient<reqwest::Client> {
    pub fn new(opts: MashovClientOpts) -> Result<Self, MashovError> {
        opts.into_client()
    }
}

impl<C: MashovHttpClient + Clone> MashovClient<C> {
    /// Logs in and stores the session artifacts. Must succeed before any fetch.
    pub async fn authenticate(&mut self) -> Result<(), MashovError> {
        self.session.login().await
    }

    /// The decoded login response, or an empty `SessionInfo` before the first login.
    pub fn current_session(&self) -> &SessionInfo {
        self.session.info()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session
            .credentials()
            .ok()
            .map(|credentials| credentials.user_id.as_str())
    }

    /// Forgets the stored session locally. The portal is not notified.
    pub fn logout(&mut self) {
        self.session.logout();
    }
}

impl<C: MashovHttpClient + Clone> Executor<C> for MashovClient<C> {
    async fn fetch_resource<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Vec<T>, MashovError> {
        let credentials = self.session.credentials()?;

        let request = this_errors!(
            "failed to build resource request",
            http::RequestBuilder::default()
                .connection(self.session.get_conn())
                .segments(vec![
                    STUDENTS_PATH.to_string(),
                    credentials.user_id.clone(),
                    resource.path().to_string(),
                ])
                .credentials(credentials.clone())
                .build()
        );

        request.get::<Vec<T>>().await
    }
}

#[cfg(test)]
#[path = "./connection_test.rs"]
mod connection_test;
