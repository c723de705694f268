use crate::core::models::Intent;

/// Weather keywords, checked in order against the lower-cased text.
///
/// Must stay duplicate-free; every entry maps to [`Intent::Weather`].
pub const WEATHER_KEYWORDS: [&str; 3] = ["今日の天気", "天気", "weather"];

/// Picks the handler for a message. Plain substring match, so "weatherman"
/// routes to weather as well.
#[must_use]
pub fn route(text: &str) -> Intent {
    let text_lc = text.to_lowercase();

    if WEATHER_KEYWORDS.iter().any(|kw| text_lc.contains(kw)) {
        Intent::Weather
    } else {
        Intent::Echo
    }
}
