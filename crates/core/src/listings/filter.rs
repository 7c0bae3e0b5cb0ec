//! Case-insensitive search over listings.

use localstore_domain::{Job, Shop};

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Jobs whose title or shop name contains `term`. A blank term keeps all.
#[must_use]
pub fn filter_jobs<'a>(jobs: &'a [Job], term: &str) -> Vec<&'a Job> {
    let needle = term.trim().to_lowercase();
    jobs.iter()
        .filter(|job| {
            needle.is_empty()
                || matches(&job.title, &needle)
                || matches(&job.shop.company_name, &needle)
        })
        .collect()
}

/// Shops whose name or description contains `term`. A blank term keeps all.
#[must_use]
pub fn filter_shops<'a>(shops: &'a [Shop], term: &str) -> Vec<&'a Shop> {
    let needle = term.trim().to_lowercase();
    shops
        .iter()
        .filter(|shop| {
            needle.is_empty()
                || matches(&shop.company_name, &needle)
                || matches(&shop.description, &needle)
        })
        .collect()
}
