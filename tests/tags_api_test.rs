use lakefs_client::models::TagCreation;
use lakefs_client::{BasicAuth, ErrorKind, LakeFsClient, LakeFsError, LakeFsResult};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a client against the mock server's API root
fn create_test_client(server: &MockServer) -> LakeFsResult<LakeFsClient> {
    LakeFsClient::new(
        format!("{}/api/v1", server.uri()),
        BasicAuth::new("admin", "admin"),
    )
}

/// Helper to create a unique tag name
fn create_test_tag_name() -> String {
    format!("test_tag_{}", uuid::Uuid::new_v4().simple())
}

/// Test tag creation
#[tokio::test]
async fn test_create_tag() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let tag_id = create_test_tag_name();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/example-repo/tags"))
        .and(body_json(json!({"id": tag_id, "ref": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": tag_id,
            "commit_id": "c7a632d74f46c0b2c5a2d3f2b0a1c8e9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server)?;
    let tag = TagCreation {
        id: tag_id.clone(),
        reference: "main".to_string(),
    };
    let created = client.tags().create_tag("example-repo", &tag).await?;

    assert_eq!(created.id, tag_id);
    assert_eq!(created.commit_id, "c7a632d74f46c0b2c5a2d3f2b0a1c8e9");
    Ok(())
}

/// Test getting a tag whose name needs escaping
#[tokio::test]
async fn test_get_tag_escapes_path() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/example-repo/tags/release%2F1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "release/1.0",
            "commit_id": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server).expect("Failed to create client");
    let tag = client
        .tags()
        .get_tag("example-repo", "release/1.0")
        .await
        .expect("Failed to get tag");

    assert_eq!(tag.id, "release/1.0");
}

/// Test missing tag
#[tokio::test]
async fn test_get_missing_tag() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/example-repo/tags/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let client = create_test_client(&server).expect("Failed to create client");
    let err = client.tags().get_tag("example-repo", "nope").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, LakeFsError::Api { ref message, .. } if message.as_deref() == Some("not found")));
}

/// Test tag deletion with an empty response body
#[tokio::test]
async fn test_delete_tag() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/repositories/example-repo/tags/v1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server).expect("Failed to create client");
    client
        .tags()
        .delete_tag("example-repo", "v1")
        .await
        .expect("Failed to delete tag");
}

/// Test listing tags with pagination parameters
#[tokio::test]
async fn test_list_tags_paginated() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/example-repo/tags"))
        .and(query_param("after", "v1"))
        .and(query_param("amount", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {
                "has_more": true,
                "next_offset": "v3",
                "results": 2,
                "max_per_page": 1000
            },
            "results": [
                {"id": "v2", "commit_id": "c2"},
                {"id": "v3", "commit_id": "c3"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server)?;
    let page = client
        .tags()
        .list_tags("example-repo", Some("v1"), Some(2))
        .await?;

    assert!(page.pagination.has_more);
    assert_eq!(page.pagination.next_offset, "v3");
    let ids: Vec<_> = page.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["v2", "v3"]);
    Ok(())
}

/// Test listing without optional parameters sends no query string
#[tokio::test]
async fn test_list_tags_defaults() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/example-repo/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"has_more": false, "next_offset": "", "results": 0, "max_per_page": 1000},
            "results": []
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server).expect("Failed to create client");
    let page = client
        .tags()
        .list_tags("example-repo", None, None)
        .await
        .expect("Failed to list tags");
    assert!(page.results.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

/// Test out-of-range page size is rejected before any request
#[tokio::test]
async fn test_list_tags_rejects_amount_out_of_range() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    let client = create_test_client(&server).expect("Failed to create client");

    for amount in [-2, 1001] {
        let err = client
            .tags()
            .list_tags("example-repo", None, Some(amount))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}
