//! @acp:module "Category Preferences"
//! @acp:summary "Map selected outreach channels to ranked tool categories"
//! @acp:domain recommend
//! @acp:layer logic

use super::types::Answers;

/// Categories a viable stack should cover for each outreach channel
pub const CHANNEL_CATEGORIES: &[(&str, &[&str])] = &[
    ("SEO", &["SEO", "Copy & Content"]),
    ("Paid Ads", &["Ads & Creatives", "Image & Design"]),
    (
        "Social Organic",
        &["Social & Scheduling", "Image & Design", "Video Creation & Editing"],
    ),
    (
        "YouTube/Video",
        &["Video Creation & Editing", "Voice & Audio", "Image & Design"],
    ),
    ("Email", &["CRM, Outreach & Sales Ops", "Copy & Content"]),
    (
        "Cold Outreach",
        &["CRM, Outreach & Sales Ops", "Automation & Agents"],
    ),
    ("Partnerships", &["CRM, Outreach & Sales Ops"]),
];

/// General-purpose categories appended after the channel-derived ones
pub const GENERAL_CATEGORIES: &[&str] = &[
    "Research & Strategy",
    "Copy & Content",
    "Automation & Agents",
];

/// Boost for the top preferred category
pub const MAX_BOOST: f64 = 1.30;
/// Boost lost per rank
pub const BOOST_STEP: f64 = 0.03;
/// Lowest boost a preferred category gets
pub const MIN_BOOST: f64 = 1.05;

/// Known channel names, in table order
pub fn channels() -> impl Iterator<Item = &'static str> {
    CHANNEL_CATEGORIES.iter().map(|(channel, _)| *channel)
}

/// Categories for one channel; unknown channels map to nothing
pub fn categories_for_channel(channel: &str) -> &'static [&'static str] {
    CHANNEL_CATEGORIES
        .iter()
        .find(|(name, _)| *name == channel)
        .map(|(_, cats)| *cats)
        .unwrap_or(&[])
}

/// Ordered, deduplicated preferred categories for a set of answers.
///
/// Channel categories come first in the order the channels were selected,
/// then the general tail. First occurrence wins.
pub fn preferred_categories(answers: &Answers) -> Vec<String> {
    let channels = answers.channels();
    let mut preferred: Vec<String> = Vec::new();

    let candidates = channels
        .iter()
        .flat_map(|channel| categories_for_channel(channel).iter())
        .chain(GENERAL_CATEGORIES.iter());

    for category in candidates {
        if !preferred.iter().any(|c| c == category) {
            preferred.push((*category).to_string());
        }
    }

    preferred
}

/// Rank-sensitive multiplier for a category.
///
/// Index `i` in `preferred` gives `max(1.05, 1.30 - 0.03 * i)`; categories
/// outside the list get 1.0.
pub fn category_boost(category: &str, preferred: &[String]) -> f64 {
    match preferred.iter().position(|c| c == category) {
        Some(rank) => (MAX_BOOST - BOOST_STEP * rank as f64).max(MIN_BOOST),
        None => 1.0,
    }
}
