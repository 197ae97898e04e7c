use std::future::Future;

use crate::types::{
    Application, Company, Job, NewApplication, NewCompany, NewJob, NewReview, NewUser, Review,
    User,
};

/// Write side of the store the fixture generator populates.
///
/// Each create call takes a fully formed record and resolves to the stored
/// record, including fields the store assigns itself. Calls within one phase
/// may be in flight concurrently.
pub trait SeedGateway {
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, Self::Error>> + Send;

    fn create_company(
        &self,
        company: NewCompany,
    ) -> impl Future<Output = Result<Company, Self::Error>> + Send;

    fn create_job(&self, job: NewJob) -> impl Future<Output = Result<Job, Self::Error>> + Send;

    fn create_application(
        &self,
        application: NewApplication,
    ) -> impl Future<Output = Result<Application, Self::Error>> + Send;

    fn create_review(
        &self,
        review: NewReview,
    ) -> impl Future<Output = Result<Review, Self::Error>> + Send;

    /// Releases the underlying connections. Must be safe to call after a failed run.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
