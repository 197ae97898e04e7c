//! Synthetic field values for seed records.
//!
//! Every function takes the random source explicitly so a seeded generator
//! reproduces the whole dataset, identifiers included.
use rand::Rng;
use uuid::{Builder, Uuid};

use crate::choice::{choose, count_in};

pub const INDUSTRIES: &[&str] = &[
    "Software Development",
    "Renewable Energy",
    "Healthcare",
    "E-commerce",
    "Finance",
];

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Project Manager",
    "Marketing Specialist",
    "Data Scientist",
    "Cybersecurity Analyst",
    "HR Coordinator",
    "UX/UI Designer",
    "Accountant",
];

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Amelia", "Oliver", "Sophia", "Elijah", "Mia", "James",
    "Harper", "Lucas", "Evelyn", "Mateo", "Aria", "Kai", "Zoe", "Ezra", "Nora", "Leo",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez", "Hernandez",
    "Lopez", "Wilson", "Anderson", "Thomas", "Moore", "Jackson", "Martin", "Lee", "Walker",
    "Young", "King", "Wright",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltd"];

const CATCH_ADJECTIVES: &[&str] = &[
    "Adaptive", "Balanced", "Customer-focused", "Distributed", "Enhanced", "Future-proofed",
    "Integrated", "Proactive", "Seamless", "Streamlined",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "24/7", "asymmetric", "bottom-line", "client-driven", "dynamic", "global", "modular",
    "real-time", "scalable", "zero-defect",
];

const CATCH_NOUNS: &[&str] = &[
    "architecture", "benchmark", "framework", "infrastructure", "initiative", "middleware",
    "paradigm", "platform", "solution", "workforce",
];

const CITIES: &[&str] = &[
    "Austin", "Berlin", "Boston", "Chicago", "Denver", "Dublin", "Lisbon", "London", "Madrid",
    "Melbourne", "Portland", "Seattle", "Toronto", "Warsaw",
];

const TLDS: &[&str] = &["com", "io", "net", "org", "dev"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
];

/// Draws a version 4 UUID from `rng` rather than from OS entropy.
pub fn uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();
    id.to_string()
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, FIRST_NAMES)
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, LAST_NAMES)
}

/// Builds an address such as `mia.lopez42@gmail.com`.
///
/// Uniqueness is not guaranteed beyond what the random suffix provides.
pub fn email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str) -> String {
    let suffix: u16 = rng.gen_range(0..1000);
    let domain = pick(rng, EMAIL_DOMAINS);
    format!(
        "{}.{}{}@{}",
        first.to_ascii_lowercase(),
        last.to_ascii_lowercase(),
        suffix,
        domain
    )
}

pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.gen_bool(0.3) {
        let a = last_name(rng);
        let b = last_name(rng);
        let c = last_name(rng);
        format!("{a}, {b} and {c}")
    } else {
        let last = last_name(rng);
        let suffix = pick(rng, COMPANY_SUFFIXES);
        format!("{last} {suffix}")
    }
}

pub fn catch_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = pick(rng, CATCH_ADJECTIVES);
    let descriptor = pick(rng, CATCH_DESCRIPTORS);
    let noun = pick(rng, CATCH_NOUNS);
    format!("{adjective} {descriptor} {noun}")
}

pub fn industry<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, INDUSTRIES)
}

pub fn job_title<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, JOB_TITLES)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, CITIES)
}

pub fn url<R: Rng + ?Sized>(rng: &mut R) -> String {
    let host = pick(rng, LAST_NAMES).to_ascii_lowercase();
    let tld = pick(rng, TLDS);
    format!("https://{host}.{tld}")
}

/// A capitalised sentence of 4 to 10 lorem words ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words = count_in(rng, 4..=10);
    let mut text = (0..words)
        .map(|_| pick(rng, LOREM))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentences = count_in(rng, 3..=5);
    (0..sentences)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick<R: Rng + ?Sized>(rng: &mut R, domain: &[&str]) -> String {
    choose(rng, domain).copied().unwrap_or_default().to_string()
}
