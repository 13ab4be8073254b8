use lexvault::api::legal::{CitationStatus, LegalFindParams, LegalVerifyParams};
use lexvault::api::search::SearchParams;
use lexvault::api::vault::{
    IngestStatus, VaultCreateParams, VaultDeleteParams, VaultIngestParams, VaultListParams,
    VaultObjectRetrieveParams, VaultUpdateParams,
};
use lexvault::{ClientOptions, LexvaultClient, LexvaultError, Model, Service};
use mockito::{Matcher, Server};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn client_for(server: &Server) -> LexvaultClient {
    init_logger();
    let options = ClientOptions::new()
        .with_api_key("test_key")
        .with_base_url(server.url())
        .with_timeout(5);
    LexvaultClient::new(options).unwrap()
}

#[test]
fn test_service_paths() {
    assert_eq!(Service::Legal.as_str(), "legal");
    assert_eq!(Service::Search.as_str(), "search");
    assert_eq!(Service::Vault.as_str(), "vault");
}

#[tokio::test]
async fn test_legal_find_sends_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/legal/v1/find")
        .match_header("authorization", "Bearer test_key")
        .match_header("content-type", "application/json")
        .match_header("x-lexvault-version", Matcher::Any)
        .match_body(Matcher::Json(json!({
            "query": "duty to mitigate damages",
            "jurisdiction": "us-ny"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [
                    {
                        "title": "Rockingham County v. Luten Bridge Co.",
                        "url": "https://example.org/35f2d301",
                        "snippet": null,
                        "authorityType": "case"
                    }
                ],
                "found": 1
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let params = LegalFindParams::builder()
        .query("duty to mitigate damages")
        .jurisdiction("us-ny")
        .build()
        .unwrap();

    let response = client.legal().find(&params).await.unwrap();
    mock.assert_async().await;

    let candidates = response.candidates().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title().unwrap(), "Rockingham County v. Luten Bridge Co.");
    assert!(candidates[0].is_null("snippet"));
}

#[tokio::test]
async fn test_legal_verify_keeps_unknown_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/legal/v1/verify")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"citations": [
                {"citation": "347 U.S. 483", "status": "verified", "caseName": "Brown v. Board"},
                {"citation": "1 F.4th 1", "status": "superseded", "caseName": null}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let params = LegalVerifyParams::builder()
        .text("See 347 U.S. 483; 1 F.4th 1.")
        .build()
        .unwrap();

    let response = client.legal().verify(&params).await.unwrap();
    let citations = response.citations().unwrap();
    assert_eq!(citations[0].status().unwrap(), CitationStatus::Verified);
    assert_eq!(citations[1].status().unwrap().raw(), json!("superseded"));
    assert_eq!(citations[1].case_name().unwrap(), None);
}

#[tokio::test]
async fn test_search_posts_to_search_service() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search/v1/search")
        .match_body(Matcher::PartialJson(json!({"query": "non-compete enforceability"})))
        .with_status(200)
        .with_body(r#"{"results": [], "requestId": "req_42"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let params = SearchParams::builder()
        .query("non-compete enforceability")
        .num_results(3)
        .build()
        .unwrap();

    let response = client.search().search(&params).await.unwrap();
    mock.assert_async().await;
    assert!(response.results().unwrap().is_empty());
    assert_eq!(response.request_id().unwrap(), Some("req_42".to_string()));
}

#[tokio::test]
async fn test_vault_list_sends_query_without_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/vault/v1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".to_string(), "20".to_string()),
            Matcher::UrlEncoded("offset".to_string(), "40".to_string()),
        ]))
        .match_header("content-type", Matcher::Missing)
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(r#"{"vaults": [{"id": "v_1", "name": "Discovery"}], "total": 41}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let params = VaultListParams::builder().limit(20).offset(40).build().unwrap();

    let list = client.vault().list(&params).await.unwrap();
    mock.assert_async().await;
    assert_eq!(list.total().unwrap(), Some(41));
    assert_eq!(list.vaults().unwrap()[0].name().unwrap(), "Discovery");
}

#[tokio::test]
async fn test_vault_create_with_idempotency_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/vault/v1")
        .match_header("idempotency-key", "create-001")
        .match_body(Matcher::Json(json!({"name": "Smith v. Jones", "enableGraph": true})))
        .with_status(201)
        .with_body(
            r#"{"id": "v_9", "name": "Smith v. Jones", "description": null,
                "status": "active", "createdAt": "2024-05-01T09:00:00Z"}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let params = VaultCreateParams::builder()
        .name("Smith v. Jones")
        .enable_graph(true)
        .idempotency_key("create-001")
        .build()
        .unwrap();

    let vault = client.vault().create(&params).await.unwrap();
    mock.assert_async().await;
    assert_eq!(vault.id().unwrap(), "v_9");
    assert!(vault.is_null("description"));
    assert!(vault.created_at().unwrap().is_some());
}

#[tokio::test]
async fn test_vault_update_sends_explicit_null() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/vault/v1/v_9")
        .match_body(Matcher::Json(json!({"description": null})))
        .with_status(200)
        .with_body(r#"{"id": "v_9", "name": "Smith v. Jones", "description": null}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let params = VaultUpdateParams::builder("v_9").description(None).build().unwrap();

    client.vault().update(&params).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_vault_path_segments_are_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/vault/v1/v%201/objects/a%2Fb")
        .with_status(200)
        .with_body(r#"{"id": "a/b", "filename": "brief.pdf", "ingestionStatus": "processing"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let params = VaultObjectRetrieveParams::builder("v 1", "a/b").build().unwrap();

    let object = client.vault().retrieve_object(&params).await.unwrap();
    mock.assert_async().await;
    assert_eq!(
        object.ingestion_status().unwrap().and_then(|s| s.known()),
        Some(IngestStatus::Processing)
    );
}

#[tokio::test]
async fn test_vault_ingest_and_delete() {
    let mut server = Server::new_async().await;
    let ingest = server
        .mock("POST", "/vault/v1/v_1/ingest/obj_1")
        .match_body(Matcher::Json(json!({})))
        .with_status(202)
        .with_body(r#"{"objectId": "obj_1", "status": "pending", "workflowId": "wf_7"}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/vault/v1/v_1")
        .match_query(Matcher::UrlEncoded("force".to_string(), "true".to_string()))
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);

    let job = client
        .vault()
        .ingest(&VaultIngestParams::builder("v_1", "obj_1").build().unwrap())
        .await
        .unwrap();
    assert_eq!(job.status().unwrap(), IngestStatus::Pending);
    assert_eq!(job.workflow_id().unwrap(), Some("wf_7".to_string()));

    let deleted = client
        .vault()
        .delete(&VaultDeleteParams::builder("v_1").force(true).build().unwrap())
        .await
        .unwrap();
    assert!(deleted.raw().is_empty());

    ingest.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_error_statuses_are_mapped() {
    let mut server = Server::new_async().await;
    let _unauthorized = server
        .mock("GET", "/vault/v1/v_401")
        .with_status(401)
        .with_body(r#"{"message": "invalid api key"}"#)
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/vault/v1/v_404")
        .with_status(404)
        .with_body(r#"{"error": "vault not found"}"#)
        .create_async()
        .await;
    let _limited = server
        .mock("GET", "/vault/v1/v_429")
        .with_status(429)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/vault/v1/v_500")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(&server);
    let retrieve = |id: &str| {
        lexvault::api::vault::VaultRetrieveParams::builder(id)
            .build()
            .unwrap()
    };

    match client.vault().retrieve(&retrieve("v_401")).await {
        Err(LexvaultError::AuthenticationFailed(message)) => assert_eq!(message, "invalid api key"),
        other => panic!("Expected AuthenticationFailed, got {:?}", other),
    }
    match client.vault().retrieve(&retrieve("v_404")).await {
        Err(LexvaultError::NotFound(message)) => assert_eq!(message, "vault not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }

    let limited = client.vault().retrieve(&retrieve("v_429")).await.unwrap_err();
    assert!(matches!(limited, LexvaultError::RateLimit));
    assert!(limited.is_retryable());

    let broken = client.vault().retrieve(&retrieve("v_500")).await.unwrap_err();
    assert!(matches!(broken, LexvaultError::ServerError(_)));
    assert!(broken.is_retryable());
}

#[tokio::test]
async fn test_html_response_is_rejected() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/legal/v1/find")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Sign in</body></html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let params = LegalFindParams::builder().query("x").build().unwrap();

    match client.legal().find(&params).await {
        Err(LexvaultError::ApiError { code, hint, .. }) => {
            assert_eq!(code, "INVALID_RESPONSE");
            assert!(hint.is_some());
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_service_base_url_override() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search/v1/search")
        .match_header("authorization", "Bearer search_only_key")
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    init_logger();
    let mut options = ClientOptions::new().with_base_url("http://127.0.0.1:1");
    options.services.search.base_url = Some(server.url());
    options.services.search.api_key = Some("search_only_key".to_string());
    let client = LexvaultClient::new(options).unwrap();

    let params = SearchParams::builder().query("x").build().unwrap();
    client.search().search(&params).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    init_logger();
    let options = ClientOptions::new()
        .with_api_key("test_key")
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(2);
    let client = LexvaultClient::new(options).unwrap();
    let params = LegalFindParams::builder().query("x").build().unwrap();

    let err = client.legal().find(&params).await.unwrap_err();
    assert!(matches!(err, LexvaultError::Network(_)));
    assert!(err.is_retryable());
    assert!(err.hint().is_some());
}
