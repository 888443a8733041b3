use serde::de::DeserializeOwned;

use crate::{
    AttendanceEvent, GradeEntry, MashovError, Resource, StudyGroup, http::client::MashovHttpClient,
};

pub trait Executor<C: MashovHttpClient> {
    /// Fetches `/students/{userId}/{resource}` and decodes the JSON array into `T`.
    /// Fails with `NotAuthenticated` before a successful login.
    fn fetch_resource<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<Vec<T>, MashovError>>;

    fn fetch_grades(&self) -> impl Future<Output = Result<Vec<GradeEntry>, MashovError>> {
        self.fetch_resource(Resource::Grades)
    }

    fn fetch_groups(&self) -> impl Future<Output = Result<Vec<StudyGroup>, MashovError>> {
        self.fetch_resource(Resource::Groups)
    }

    /// Attendance and behavior reports.
    fn fetch_behavior(&self) -> impl Future<Output = Result<Vec<AttendanceEvent>, MashovError>> {
        self.fetch_resource(Resource::Behavior)
    }
}
