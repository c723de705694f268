use serde_json::json;
use tenki_bot::BotError;
use tenki_bot::clients::line_client::build_reply_payload;
use tenki_bot::clients::{LineClient, ReplySender};
use tenki_bot::core::config::AppConfig;
use tenki_bot::core::models::ReplyText;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base_url: &str) -> AppConfig {
    let base_url = base_url.to_string();
    AppConfig::from_lookup(move |key| match key {
        "LINE_CHANNEL_SECRET" => Some("secret".to_string()),
        "LINE_CHANNEL_ACCESS_TOKEN" => Some("line-token".to_string()),
        "WEATHER_API_KEY" => Some("key".to_string()),
        "LINE_API_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_reply_payload_shape() {
    let text = ReplyText::new("あなたは「hello」と言いました。").unwrap();

    assert_eq!(
        build_reply_payload("token-1", &text),
        json!({
            "replyToken": "token-1",
            "messages": [{ "type": "text", "text": "あなたは「hello」と言いました。" }]
        })
    );
}

#[tokio::test]
async fn test_reply_posts_once_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(header("authorization", "Bearer line-token"))
        .and(body_json(json!({
            "replyToken": "token-1",
            "messages": [{ "type": "text", "text": "hi" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = LineClient::new(&config_for(&server.uri())).unwrap();
    let text = ReplyText::new("hi").unwrap();

    client.reply("token-1", &text).await.unwrap();
}

#[tokio::test]
async fn test_rejected_reply_is_delivery_failure_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid reply token" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LineClient::new(&config_for(&server.uri())).unwrap();
    let text = ReplyText::new("hi").unwrap();

    let err = client.reply("expired", &text).await.unwrap_err();
    assert!(matches!(err, BotError::DeliveryFailure(_)));
}

#[tokio::test]
async fn test_reply_keeps_base_url_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/line-proxy/v2/bot/message/reply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = LineClient::new(&config_for(&format!("{}/line-proxy", server.uri()))).unwrap();
    let text = ReplyText::new("hi").unwrap();

    client.reply("token-1", &text).await.unwrap();
}
