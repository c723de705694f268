use crate::core::models::{Intent, ReplyText, WeatherOutcome, WeatherSummary};

pub const WEATHER_UNAVAILABLE_MESSAGE: &str = "天気情報を取得できませんでした。";

/// Formats the reply for one message.
///
/// `weather` is only consulted for [`Intent::Weather`]; a missing outcome is
/// treated the same as [`WeatherOutcome::Unavailable`].
#[must_use]
pub fn compose(intent: Intent, text: &str, weather: Option<&WeatherOutcome>) -> ReplyText {
    let body = match (intent, weather) {
        (Intent::Weather, Some(WeatherOutcome::Available(summary))) => format_weather(summary),
        (Intent::Weather, _) => WEATHER_UNAVAILABLE_MESSAGE.to_string(),
        (Intent::Echo, _) => format!("あなたは「{text}」と言いました。"),
    };

    // All templates carry fixed text, so `body` is never empty.
    ReplyText::truncated(body)
}

fn format_weather(summary: &WeatherSummary) -> String {
    format!(
        "東京の今日の天気：{}、気温{:.1}℃（体感{:.1}℃）",
        summary.description, summary.temperature_c, summary.feels_like_c
    )
}
