//! Integration tests for the pipeline against mocked remote services
//!
//! These tests exercise the HTTP services end-to-end:
//! 1. Retrieval request shape and document parsing
//! 2. Context threading into text generation
//! 3. Image generation and decoding
//! 4. Failure at each step aborting the run

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mockito::{Matcher, Mock, Server, ServerGuard};
use rag_pipeline::pipeline::{Pipeline, PipelineConfig, PipelineError};
use serde_json::json;
use std::io::Cursor;

/// Helper to build PNG bytes for the image mock
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([0, 128, 0]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn pipeline_for(server: &ServerGuard) -> Pipeline {
    Pipeline::from_config(&PipelineConfig::with_base_url(&server.url())).unwrap()
}

async fn mock_retrieval(server: &mut ServerGuard, query: &str, body: &str) -> Mock {
    server
        .mock("POST", "/retrieve")
        .match_body(Matcher::Json(json!({"query": query, "top_k": 3})))
        .with_status(200)
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

async fn mock_generation(server: &mut ServerGuard, prompt: &str, context: &str) -> Mock {
    server
        .mock("POST", "/generate")
        .match_body(Matcher::Json(json!({
            "prompt": prompt,
            "context": context,
            "max_length": 200
        })))
        .with_status(200)
        .with_body(r#"{"text": "Photosynthesis is..."}"#)
        .expect(1)
        .create_async()
        .await
}

async fn mock_image(server: &mut ServerGuard, prompt: &str, body: Vec<u8>) -> Mock {
    server
        .mock("POST", "/image")
        .match_body(Matcher::Json(json!({"prompt": prompt})))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

/// Test 1: The photosynthesis walkthrough
#[tokio::test]
async fn test_end_to_end_photosynthesis() {
    let mut server = Server::new_async().await;
    let prompt = "Explain photosynthesis";

    let retrieval = mock_retrieval(
        &mut server,
        prompt,
        r#"{"documents": [{"content": "Plants convert light to energy."}]}"#,
    )
    .await;
    let generation = mock_generation(&mut server, prompt, "Plants convert light to energy.").await;
    let image = mock_image(&mut server, prompt, png_bytes(16, 8)).await;

    let output = pipeline_for(&server).run(prompt).await.unwrap();

    retrieval.assert_async().await;
    generation.assert_async().await;
    image.assert_async().await;
    assert_eq!(output.answer, "Photosynthesis is...");
    assert_eq!(output.image.width(), 16);
    assert_eq!(output.image.height(), 8);
}

/// Test 2: Empty prompt never reaches the network
#[tokio::test]
async fn test_empty_prompt_makes_no_calls() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let pipeline = pipeline_for(&server);
    for prompt in ["", "    "] {
        let err = pipeline.run(prompt).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    any.assert_async().await;
}

/// Test 3: No documents still generates, with an empty context
#[tokio::test]
async fn test_no_documents_generates_with_empty_context() {
    let mut server = Server::new_async().await;
    let prompt = "Explain photosynthesis";

    let _retrieval = mock_retrieval(&mut server, prompt, r#"{"documents": []}"#).await;
    let generation = mock_generation(&mut server, prompt, "").await;
    let _image = mock_image(&mut server, prompt, png_bytes(2, 2)).await;

    let output = pipeline_for(&server).run(prompt).await.unwrap();

    generation.assert_async().await;
    assert_eq!(output.answer, "Photosynthesis is...");
}

/// Test 4: Multiple documents are joined with single spaces in service order
#[tokio::test]
async fn test_multiple_documents_context_order() {
    let mut server = Server::new_async().await;
    let prompt = "tides";

    let _retrieval = mock_retrieval(
        &mut server,
        prompt,
        r#"{"documents": [
            {"content": "The moon pulls.", "score": 0.2},
            {"content": "Oceans bulge.", "score": 0.9},
            {"content": "Earth rotates.", "score": 0.5}
        ]}"#,
    )
    .await;
    let generation = mock_generation(
        &mut server,
        prompt,
        "The moon pulls. Oceans bulge. Earth rotates.",
    )
    .await;
    let _image = mock_image(&mut server, prompt, png_bytes(2, 2)).await;

    pipeline_for(&server).run(prompt).await.unwrap();
    generation.assert_async().await;
}

/// Test 5: Missing text field falls back to "No response"
#[tokio::test]
async fn test_missing_text_field_uses_fallback() {
    let mut server = Server::new_async().await;

    let _retrieval = mock_retrieval(&mut server, "q", r#"{"documents": []}"#).await;
    let _generation = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;
    let _image = mock_image(&mut server, "q", png_bytes(2, 2)).await;

    let output = pipeline_for(&server).run("q").await.unwrap();
    assert_eq!(output.answer, "No response");
}

/// Test 6: Retrieval failure aborts before generation
#[tokio::test]
async fn test_retrieval_failure_aborts_run() {
    let mut server = Server::new_async().await;

    let _retrieval = server
        .mock("POST", "/retrieve")
        .with_status(500)
        .with_body("index offline")
        .create_async()
        .await;
    let generation = server
        .mock("POST", "/generate")
        .expect(0)
        .create_async()
        .await;
    let image = server.mock("POST", "/image").expect(0).create_async().await;

    let err = pipeline_for(&server).run("q").await.unwrap_err();

    assert!(matches!(err, PipelineError::Retrieval(_)));
    generation.assert_async().await;
    image.assert_async().await;
}

/// Test 7: Generation failure aborts before image generation
#[tokio::test]
async fn test_generation_failure_aborts_run() {
    let mut server = Server::new_async().await;

    let _retrieval = mock_retrieval(&mut server, "q", r#"{"documents": []}"#).await;
    let _generation = server
        .mock("POST", "/generate")
        .with_status(502)
        .create_async()
        .await;
    let image = server.mock("POST", "/image").expect(0).create_async().await;

    let err = pipeline_for(&server).run("q").await.unwrap_err();

    assert!(matches!(err, PipelineError::Generation(_)));
    image.assert_async().await;
}

/// Test 8: Image service error status fails the whole run
#[tokio::test]
async fn test_image_status_failure_fails_run() {
    let mut server = Server::new_async().await;

    let _retrieval = mock_retrieval(&mut server, "q", r#"{"documents": []}"#).await;
    let generation = mock_generation(&mut server, "q", "").await;
    let _image = server
        .mock("POST", "/image")
        .with_status(503)
        .create_async()
        .await;

    let err = pipeline_for(&server).run("q").await.unwrap_err();

    generation.assert_async().await;
    assert!(matches!(err, PipelineError::Generation(_)));
}

/// Test 9: Undecodable image bytes fail the run after text succeeded
#[tokio::test]
async fn test_undecodable_image_fails_run() {
    let mut server = Server::new_async().await;

    let _retrieval = mock_retrieval(&mut server, "q", r#"{"documents": []}"#).await;
    let generation = mock_generation(&mut server, "q", "").await;
    let _image = mock_image(&mut server, "q", b"not really a png".to_vec()).await;

    let err = pipeline_for(&server).run("q").await.unwrap_err();

    generation.assert_async().await;
    assert!(matches!(err, PipelineError::ImageDecode(_)));
}

/// Test 10: Each endpoint can point at a different server
#[tokio::test]
async fn test_endpoints_are_independent() {
    let mut retrieval_server = Server::new_async().await;
    let mut generation_server = Server::new_async().await;
    let mut image_server = Server::new_async().await;

    let retrieval = retrieval_server
        .mock("POST", "/search")
        .with_status(200)
        .with_body(r#"{"documents": [{"content": "doc"}]}"#)
        .create_async()
        .await;
    let generation = generation_server
        .mock("POST", "/complete")
        .match_body(Matcher::PartialJson(json!({"context": "doc"})))
        .with_status(200)
        .with_body(r#"{"text": "ok"}"#)
        .create_async()
        .await;
    let image = image_server
        .mock("POST", "/draw")
        .with_status(200)
        .with_body(png_bytes(1, 1))
        .create_async()
        .await;

    let config = PipelineConfig::default()
        .retrieval_endpoint(format!("{}/search", retrieval_server.url()))
        .generation_endpoint(format!("{}/complete", generation_server.url()))
        .image_endpoint(format!("{}/draw", image_server.url()));
    let output = Pipeline::from_config(&config).unwrap().run("q").await.unwrap();

    retrieval.assert_async().await;
    generation.assert_async().await;
    image.assert_async().await;
    assert_eq!(output.answer, "ok");
}
