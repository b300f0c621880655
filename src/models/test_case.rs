//! Test case definitions
//!
//! A test case names one external browser automation script. The built-in
//! suite covers every page of the business directory, in execution order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Built-in suite: (human-readable name, script path)
const DEFAULT_SUITE: &[(&str, &str)] = &[
    ("Home Page", "tests/home.js"),
    ("Search", "tests/search.js"),
    ("Category Browse", "tests/categories.js"),
    ("Listing Detail", "tests/listing.js"),
    ("Map View", "tests/map.js"),
    ("Registration", "tests/register.js"),
    ("Login", "tests/login.js"),
    ("Forgot Password", "tests/forgot-password.js"),
    ("User Profile", "tests/profile.js"),
    ("User Dashboard", "tests/dashboard.js"),
    ("Add Listing", "tests/add-listing.js"),
    ("Edit Listing", "tests/edit-listing.js"),
    ("Listing Photos", "tests/listing-photos.js"),
    ("Claim Listing", "tests/claim-listing.js"),
    ("Write Review", "tests/write-review.js"),
    ("Review Replies", "tests/review-replies.js"),
    ("Favourites", "tests/favourites.js"),
    ("Messages", "tests/messages.js"),
    ("Notifications", "tests/notifications.js"),
    ("Pricing Plans", "tests/pricing.js"),
    ("Checkout", "tests/checkout.js"),
    ("Invoices", "tests/invoices.js"),
    ("Coupons", "tests/coupons.js"),
    ("Events", "tests/events.js"),
    ("Blog", "tests/blog.js"),
    ("Contact Form", "tests/contact.js"),
    ("Admin Login", "tests/admin-login.js"),
    ("Admin Listings", "tests/admin-listings.js"),
    ("Admin Reviews", "tests/admin-reviews.js"),
    ("Admin Users", "tests/admin-users.js"),
    ("Logout", "tests/logout.js"),
];

/// A named reference to one independently executable test script
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Human-readable name, used in failure lines
    pub name: String,

    /// Location of the runnable unit
    pub path: PathBuf,
}

impl TestCase {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The built-in suite, in execution order
    pub fn default_suite() -> Vec<TestCase> {
        DEFAULT_SUITE
            .iter()
            .map(|(name, path)| TestCase::new(*name, *path))
            .collect()
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_suite_order() {
        let suite = TestCase::default_suite();
        assert_eq!(suite.len(), 31);
        assert_eq!(suite[0].name, "Home Page");
        assert_eq!(suite[30].name, "Logout");
    }

    #[test]
    fn test_default_suite_unique() {
        let suite = TestCase::default_suite();
        let names: HashSet<_> = suite.iter().map(|c| c.name.as_str()).collect();
        let paths: HashSet<_> = suite.iter().map(|c| c.path.clone()).collect();
        assert_eq!(names.len(), suite.len());
        assert_eq!(paths.len(), suite.len());
    }

    #[test]
    fn test_display() {
        let case = TestCase::new("Login", "tests/login.js");
        assert_eq!(case.to_string(), "Login (tests/login.js)");
    }
}
