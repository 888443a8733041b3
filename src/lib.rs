pub mod auth;
pub(crate) mod connection;
pub(crate) mod errors;
pub(crate) mod executor;
pub(crate) mod http;
pub(crate) mod models;

pub(crate) use errors::{error, this_errors};

pub use auth::SessionState;
pub use errors::{AuthErrorKind, ErrorKind, MashovError};

pub use connection::{
    MashovClient, MashovClientOpts, MashovClientOptsBuilder, MashovClientOptsBuilderError,
};
pub use models::{
    Resource,
    attendance::AttendanceEvent,
    grade::GradeEntry,
    group::{GroupTeacher, StudyGroup},
};

pub use http::{
    client::{HttpResponse, MashovHttpClient},
    login::{Credential, SessionInfo},
};

pub use executor::Executor;
