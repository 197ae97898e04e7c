use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored enum value does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! stored_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $repr:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $repr)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the canonical database representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $repr,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($repr => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

stored_enum!(
    /// Role of a user account. Seekers apply and review, company owners post jobs.
    Role, "role" {
        Seeker => "USER",
        CompanyOwner => "COMPANY",
        Admin => "ADMIN",
    }
);

stored_enum!(
    JobType, "job type" {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Remote => "REMOTE",
        Internship => "INTERNSHIP",
    }
);

stored_enum!(
    ApplicationStatus, "application status" {
        Pending => "PENDING",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
    }
);

stored_enum!(
    /// Kind of entity a review points at. Only companies can be reviewed today.
    ReviewEntityType, "review entity type" {
        Company => "COMPANY",
    }
);

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// User account as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Parameters required to create a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl NewUser {
    pub fn into_stored(self, created_at: DateTime<Utc>) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
            created_at,
        }
    }
}

/// Company profile owned by exactly one company-owner user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub website: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub id: String,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub location: String,
    pub website: String,
    pub owner_id: String,
}

impl NewCompany {
    pub fn into_stored(self, created_at: DateTime<Utc>) -> Company {
        Company {
            id: self.id,
            name: self.name,
            description: self.description,
            industry: self.industry,
            location: self.location,
            website: self.website,
            owner_id: self.owner_id,
            created_at,
        }
    }
}

/// Job posting. `posted_by_id` is always the owner of `company_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub job_type: JobType,
    pub company_id: String,
    pub posted_by_id: String,
    pub saved_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: f64,
    pub job_type: JobType,
    pub company_id: String,
    pub posted_by_id: String,
    pub saved_by: Vec<String>,
}

impl NewJob {
    pub fn into_stored(self, created_at: DateTime<Utc>) -> Job {
        Job {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            salary: self.salary,
            job_type: self.job_type,
            company_id: self.company_id,
            posted_by_id: self.posted_by_id,
            saved_by: self.saved_by,
            created_at,
        }
    }
}

/// A seeker's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub resume: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub resume: String,
    pub status: ApplicationStatus,
}

impl NewApplication {
    pub fn into_stored(self, created_at: DateTime<Utc>) -> Application {
        Application {
            id: self.id,
            job_id: self.job_id,
            applicant_id: self.applicant_id,
            resume: self.resume,
            status: self.status,
            created_at,
        }
    }
}

/// Review left by a seeker. `rating` is within [`MIN_RATING`]..=[`MAX_RATING`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub reviewer_id: String,
    pub entity_id: String,
    pub entity_type: ReviewEntityType,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub id: String,
    pub reviewer_id: String,
    pub entity_id: String,
    pub entity_type: ReviewEntityType,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn into_stored(self, created_at: DateTime<Utc>) -> Review {
        Review {
            id: self.id,
            reviewer_id: self.reviewer_id,
            entity_id: self.entity_id,
            entity_type: self.entity_type,
            rating: self.rating,
            comment: self.comment,
            created_at,
        }
    }
}

/// Every record created by one seed run, grouped per phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub reviews: Vec<Review>,
}

impl Dataset {
    /// Users holding the given role, in creation order.
    pub fn users_with_role(&self, role: Role) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |user| user.role == role)
    }

    pub fn report(&self) -> SeedReport {
        SeedReport {
            users: self.users.len(),
            companies: self.companies.len(),
            jobs: self.jobs.len(),
            applications: self.applications.len(),
            reviews: self.reviews.len(),
        }
    }
}

/// Per-entity record counts of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub companies: usize,
    pub jobs: usize,
    pub applications: usize,
    pub reviews: usize,
}
