use std::{fmt, future::Future, ops::RangeInclusive};

use futures::future::try_join_all;
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

use jobpulse_core::types::{
    Application, ApplicationStatus, Company, Dataset, Job, JobType, NewApplication, NewCompany,
    NewJob, NewReview, NewUser, Review, ReviewEntityType, Role, User, MAX_RATING, MIN_RATING,
};
use jobpulse_core::{choose, count_in, fake, SeedGateway};
use jobpulse_util::SeedConfig;

const JOBS_PER_COMPANY: RangeInclusive<usize> = 2..=5;
const APPLICATIONS_PER_SEEKER: RangeInclusive<usize> = 1..=3;
const REVIEWS_PER_SEEKER: RangeInclusive<usize> = 1..=3;
const SALARY_MIN: f64 = 40_000.0;
const SALARY_MAX: f64 = 120_000.0;

/// One of the five ordered generation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Users,
    Companies,
    Jobs,
    Applications,
    Reviews,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Companies => "companies",
            Self::Jobs => "jobs",
            Self::Applications => "applications",
            Self::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure aborts the run; earlier phases stay committed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to create {phase}: {source}")]
    Persistence {
        phase: Phase,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SeedError {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Persistence { phase, .. } => *phase,
        }
    }
}

/// Sizes and ranges for one seed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub user_count: usize,
    pub jobs_per_company: RangeInclusive<usize>,
    pub applications_per_seeker: RangeInclusive<usize>,
    pub reviews_per_seeker: RangeInclusive<usize>,
}

impl SeedPlan {
    pub fn with_user_count(user_count: usize) -> Self {
        Self {
            user_count,
            jobs_per_company: JOBS_PER_COMPANY,
            applications_per_seeker: APPLICATIONS_PER_SEEKER,
            reviews_per_seeker: REVIEWS_PER_SEEKER,
        }
    }
}

impl From<&SeedConfig> for SeedPlan {
    fn from(config: &SeedConfig) -> Self {
        Self::with_user_count(config.user_count)
    }
}

/// Builds the random source for a run. A fixed seed makes the dataset reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Runs every phase through `gateway`, then closes it whether or not the run succeeded.
pub async fn run_and_close<G: SeedGateway>(
    gateway: &G,
    plan: SeedPlan,
    rng: StdRng,
) -> Result<Dataset, SeedError> {
    let outcome = FixtureGenerator::new(gateway, rng, plan).run().await;
    gateway.close().await;
    outcome
}

/// Produces a referentially consistent dataset in five phases.
///
/// Records of a phase are drawn sequentially from the random source, then
/// created concurrently. The next phase starts only once every create of the
/// current one has resolved, because it references their identifiers.
pub struct FixtureGenerator<'g, G, R> {
    gateway: &'g G,
    rng: R,
    plan: SeedPlan,
}

impl<'g, G, R> FixtureGenerator<'g, G, R>
where
    G: SeedGateway,
    R: Rng,
{
    pub fn new(gateway: &'g G, rng: R, plan: SeedPlan) -> Self {
        Self { gateway, rng, plan }
    }

    pub async fn run(mut self) -> Result<Dataset, SeedError> {
        info!(
            stage = "seed",
            users = self.plan.user_count,
            "starting database seeding"
        );

        let users = self.seed_users().await?;
        let companies = self.seed_companies(&users).await?;
        let jobs = self.seed_jobs(&companies).await?;
        let applications = self.seed_applications(&users, &jobs).await?;
        let reviews = self.seed_reviews(&users, &companies).await?;

        Ok(Dataset {
            users,
            companies,
            jobs,
            applications,
            reviews,
        })
    }

    pub async fn seed_users(&mut self) -> Result<Vec<User>, SeedError> {
        let records: Vec<NewUser> = (0..self.plan.user_count)
            .map(|_| {
                let first_name = fake::first_name(&mut self.rng);
                let last_name = fake::last_name(&mut self.rng);
                NewUser {
                    id: fake::uuid(&mut self.rng),
                    email: fake::email(&mut self.rng, &first_name, &last_name),
                    first_name,
                    last_name,
                    role: pick_variant(&mut self.rng, Role::ALL, Role::Seeker),
                }
            })
            .collect();

        let gateway = self.gateway;
        fan_out(Phase::Users, records, |user| gateway.create_user(user)).await
    }

    /// One company per company-owner user.
    pub async fn seed_companies(&mut self, users: &[User]) -> Result<Vec<Company>, SeedError> {
        let records: Vec<NewCompany> = users
            .iter()
            .filter(|user| user.role == Role::CompanyOwner)
            .map(|owner| NewCompany {
                id: fake::uuid(&mut self.rng),
                name: fake::company_name(&mut self.rng),
                description: fake::catch_phrase(&mut self.rng),
                industry: fake::industry(&mut self.rng),
                location: fake::city(&mut self.rng),
                website: fake::url(&mut self.rng),
                owner_id: owner.id.clone(),
            })
            .collect();

        let gateway = self.gateway;
        fan_out(Phase::Companies, records, |company| {
            gateway.create_company(company)
        })
        .await
    }

    /// Posts jobs for every company, each posted by the company's owner.
    pub async fn seed_jobs(&mut self, companies: &[Company]) -> Result<Vec<Job>, SeedError> {
        let mut records = Vec::new();
        for company in companies {
            let count = count_in(&mut self.rng, self.plan.jobs_per_company.clone());
            for _ in 0..count {
                records.push(NewJob {
                    id: fake::uuid(&mut self.rng),
                    title: fake::job_title(&mut self.rng),
                    description: fake::paragraph(&mut self.rng),
                    location: fake::city(&mut self.rng),
                    salary: salary(&mut self.rng),
                    job_type: pick_variant(&mut self.rng, JobType::ALL, JobType::FullTime),
                    company_id: company.id.clone(),
                    posted_by_id: company.owner_id.clone(),
                    saved_by: Vec::new(),
                });
            }
        }

        let gateway = self.gateway;
        fan_out(Phase::Jobs, records, |job| gateway.create_job(job)).await
    }

    /// Seekers apply to random jobs of this run. Without jobs nothing is created.
    pub async fn seed_applications(
        &mut self,
        users: &[User],
        jobs: &[Job],
    ) -> Result<Vec<Application>, SeedError> {
        let mut records = Vec::new();
        if jobs.is_empty() {
            info!(stage = "seed", phase = %Phase::Applications, "no jobs to apply to");
        } else {
            for seeker in users.iter().filter(|user| user.role == Role::Seeker) {
                let count = count_in(&mut self.rng, self.plan.applications_per_seeker.clone());
                for _ in 0..count {
                    let Some(job) = choose(&mut self.rng, jobs) else {
                        break;
                    };
                    records.push(NewApplication {
                        id: fake::uuid(&mut self.rng),
                        job_id: job.id.clone(),
                        applicant_id: seeker.id.clone(),
                        resume: resume_url(&seeker.id),
                        status: pick_variant(
                            &mut self.rng,
                            ApplicationStatus::ALL,
                            ApplicationStatus::Pending,
                        ),
                    });
                }
            }
        }

        let gateway = self.gateway;
        fan_out(Phase::Applications, records, |application| {
            gateway.create_application(application)
        })
        .await
    }

    /// Seekers review random companies of this run. Without companies nothing is created.
    pub async fn seed_reviews(
        &mut self,
        users: &[User],
        companies: &[Company],
    ) -> Result<Vec<Review>, SeedError> {
        let mut records = Vec::new();
        if companies.is_empty() {
            info!(stage = "seed", phase = %Phase::Reviews, "no companies to review");
        } else {
            for reviewer in users.iter().filter(|user| user.role == Role::Seeker) {
                let count = count_in(&mut self.rng, self.plan.reviews_per_seeker.clone());
                for _ in 0..count {
                    let Some(company) = choose(&mut self.rng, companies) else {
                        break;
                    };
                    records.push(NewReview {
                        id: fake::uuid(&mut self.rng),
                        reviewer_id: reviewer.id.clone(),
                        entity_id: company.id.clone(),
                        entity_type: ReviewEntityType::Company,
                        rating: self.rng.gen_range(MIN_RATING..=MAX_RATING),
                        comment: fake::sentence(&mut self.rng),
                    });
                }
            }
        }

        let gateway = self.gateway;
        fan_out(Phase::Reviews, records, |review| gateway.create_review(review)).await
    }
}

/// Dispatches every create of a phase at once and waits for all of them.
///
/// The first error short-circuits the join and drops the creates still in flight.
async fn fan_out<T, O, E, F, Fut>(
    phase: Phase,
    records: Vec<T>,
    create: F,
) -> Result<Vec<O>, SeedError>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<O, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    info!(stage = "seed", %phase, pending = records.len(), "creating records");

    let created = try_join_all(records.into_iter().map(create))
        .await
        .map_err(|err| SeedError::Persistence {
            phase,
            source: Box::new(err),
        })?;

    info!(stage = "seed", %phase, created = created.len(), "phase completed");
    Ok(created)
}

fn pick_variant<T: Copy, R: Rng + ?Sized>(rng: &mut R, all: &[T], fallback: T) -> T {
    choose(rng, all).copied().unwrap_or(fallback)
}

/// Uniform salary within the posting range, rounded to whole cents.
fn salary<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.gen_range(SALARY_MIN..=SALARY_MAX);
    (raw * 100.0).round() / 100.0
}

fn resume_url(applicant_id: &str) -> String {
    format!("https://example.com/resume/{applicant_id}.pdf")
}
