//! HTTP title resolver tests against a local wiremock server.

use std::time::Duration;

use shelfmark_fetch::{HttpTitleResolver, ResolverConfig, TitleResolver};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> HttpTitleResolver {
    HttpTitleResolver::new(ResolverConfig::default()).expect("resolver")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_archive_title_wins_over_og_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(html(
            r#"<html><head><meta property="og:title" content="OG"><title>Doc</title></head>
               <body><div class="archive-title">Archive Post</div></body></html>"#,
        ))
        .mount(&server)
        .await;

    let title = resolver().resolve(&format!("{}/post", server.uri())).await;
    assert_eq!(title, "Archive Post");
}

#[tokio::test]
async fn test_title_element_only_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<html><head><title>  Example   Site </title></head></html>"))
        .mount(&server)
        .await;

    let title = resolver().resolve(&format!("{}/", server.uri())).await;
    assert_eq!(title, "Example Site");
}

#[tokio::test]
async fn test_not_found_falls_back_to_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw("<title>Not Found</title>", "text/html"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    assert_eq!(resolver().resolve(&url).await, url);
}

#[tokio::test]
async fn test_timeout_falls_back_to_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<title>Too Late</title>").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let resolver = HttpTitleResolver::new(
        ResolverConfig::default().with_timeout(Duration::from_millis(200)),
    )
    .expect("resolver");

    let url = format!("{}/slow", server.uri());
    assert_eq!(resolver.resolve(&url).await, url);
}

#[tokio::test]
async fn test_page_without_title_falls_back_to_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("<html><body><p>no title here</p></body></html>"))
        .mount(&server)
        .await;

    let url = format!("{}/untitled", server.uri());
    assert_eq!(resolver().resolve(&url).await, url);
}

#[tokio::test]
async fn test_oversized_body_is_abandoned() {
    let server = MockServer::start().await;
    let padding = "x".repeat(4096);
    Mock::given(method("GET"))
        .respond_with(html(&format!("<title>Big</title><p>{}</p>", padding)))
        .mount(&server)
        .await;

    let resolver =
        HttpTitleResolver::new(ResolverConfig::default().with_max_html_bytes(1024))
            .expect("resolver");

    let url = format!("{}/big", server.uri());
    assert_eq!(resolver.resolve(&url).await, url);
}

#[tokio::test]
async fn test_sends_browser_headers_and_origin_referer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("referer", format!("{}/", server.uri()).as_str()))
        .and(header("sec-fetch-mode", "navigate"))
        .and(header("sec-fetch-dest", "document"))
        .and(header("upgrade-insecure-requests", "1"))
        .and(header_exists("user-agent"))
        .respond_with(html("<title>With Headers</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let title = resolver()
        .resolve(&format!("{}/article?id=7", server.uri()))
        .await;
    assert_eq!(title, "With Headers");

    // The browser user agent contains a comma, which the header matcher
    // would split, so compare the raw value instead.
    let requests = server.received_requests().await.expect("recording enabled");
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok());
    assert_eq!(user_agent, Some(shelfmark_core::defaults::USER_AGENT));
}

#[tokio::test]
async fn test_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<title>Moved Here</title>"))
        .mount(&server)
        .await;

    let title = resolver().resolve(&format!("{}/old", server.uri())).await;
    assert_eq!(title, "Moved Here");
}

#[tokio::test]
async fn test_unreachable_host_falls_back_to_url() {
    // Nothing listens on port 9 (discard) in the test environment.
    let url = "http://127.0.0.1:9/page";
    let resolver = HttpTitleResolver::new(
        ResolverConfig::default().with_timeout(Duration::from_secs(2)),
    )
    .expect("resolver");
    assert_eq!(resolver.resolve(url).await, url);
}
