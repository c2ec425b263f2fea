use crate::e2e::helpers::TestContext;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use motivation_backend::domain::speech::text::{flatten_markdown, split_text};

/// Mount one TTS mock per expected chunk, each answering with
/// recognizable bytes tagged by chunk position.
async fn mount_tts_chunks(server: &MockServer, chunks: &[String]) -> Vec<u8> {
    let mut expected_audio = Vec::new();
    for (index, chunk) in chunks.iter().enumerate() {
        let audio = format!("<audio-{index}>").into_bytes();
        expected_audio.extend(&audio);
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("q", chunk.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(audio))
            .expect(1)
            .mount(server)
            .await;
    }
    expected_audio
}

#[tokio::test]
async fn it_should_synthesize_long_text_in_chunk_order() {
    let ctx = TestContext::new().await;

    // About 2500 characters of plain words splits into exactly 3 chunks
    let text = vec!["abcdefgh"; 277].join(" ");
    assert!(text.len() > 2400 && text.len() <= 2500);

    let chunks = split_text(&flatten_markdown(&text), 900);
    assert_eq!(chunks.len(), 3);
    let expected_audio = mount_tts_chunks(&ctx.tts_server, &chunks).await;

    let (status, body) = ctx
        .post_json("/generate_audio", &json!({"text": text, "language": "en"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let audio_id: Uuid = body["audio_id"].as_str().unwrap().parse().unwrap();

    ctx.wait_until_ready(audio_id).await;

    // The final artifact is the chunk audio concatenated in input order
    let (status, audio) = ctx.get(&format!("/audio/{audio_id}.mp3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audio, expected_audio);

    // Part files are gone once the final artifact exists
    assert_eq!(ctx.audio_files(), vec![format!("{audio_id}.mp3")]);
}

#[tokio::test]
async fn it_should_flatten_markdown_before_synthesis() {
    let ctx = TestContext::new().await;

    let markdown = "# Plan\n\nStay **strong** today.";
    let expected_utterance = "Plan Stay strong today.";

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("q", expected_utterance))
        .and(query_param("tl", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"flat".to_vec()))
        .expect(1)
        .mount(&ctx.tts_server)
        .await;

    let (status, body) = ctx
        .post_json(
            "/generate_audio",
            &json!({"text": markdown, "language": "en"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let audio_id: Uuid = body["audio_id"].as_str().unwrap().parse().unwrap();

    ctx.wait_until_ready(audio_id).await;

    let (_, audio) = ctx.get(&format!("/audio/{audio_id}.mp3")).await;
    assert_eq!(audio, b"flat");
}

#[tokio::test]
async fn it_should_report_not_ready_for_unknown_ids() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .get(&format!("/audio_status/{}", Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ready"], json!(false));

    // Malformed ids are not distinguishable either
    let (status, body) = ctx.get("/audio_status/not-a-uuid").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ready"], json!(false));
}

#[tokio::test]
async fn it_should_404_absent_artifacts() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.get(&format!("/audio/{}.mp3", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.get("/audio/not-a-uuid.mp3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_should_leave_failed_jobs_permanently_unready() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("tts down"))
        .mount(&ctx.tts_server)
        .await;

    let (status, body) = ctx
        .post_json(
            "/generate_audio",
            &json!({"text": "this will fail", "language": "en"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let audio_id: Uuid = body["audio_id"].as_str().unwrap().parse().unwrap();

    // Give the worker time to run the job and fail
    tokio::time::sleep(Duration::from_millis(300)).await;

    let (_, body) = ctx.get(&format!("/audio_status/{audio_id}")).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ready"], json!(false));

    // No artifact and no leftover part files
    assert!(ctx.audio_files().is_empty());
}

#[tokio::test]
async fn it_should_reject_empty_text() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json("/generate_audio", &json!({"text": "   "}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn it_should_synthesize_single_shot_with_timestamped_filename() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("q", "quick note"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"one-shot".to_vec()))
        .expect(1)
        .mount(&ctx.tts_server)
        .await;

    let (status, body) = ctx
        .post_json("/synthesize", &json!({"text": "quick note", "language": "en"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("motivation_"));
    assert!(filename.ends_with(".mp3"));

    let saved = std::fs::read(ctx.audio_dir.path().join(filename)).unwrap();
    assert_eq!(saved, b"one-shot");
}

#[tokio::test]
async fn it_should_report_single_shot_failures() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no voice today"))
        .mount(&ctx.tts_server)
        .await;

    let (status, _) = ctx
        .post_json("/synthesize", &json!({"text": "quick note", "language": "en"}))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
