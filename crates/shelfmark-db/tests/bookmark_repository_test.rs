//! PostgreSQL bookmark repository integration tests.
//!
//! These need a reachable PostgreSQL (see `DATABASE_URL` /
//! `DEFAULT_TEST_DATABASE_URL`) and are ignored by default:
//! `cargo test -p shelfmark-db -- --ignored`

use shelfmark_db::test_fixtures::TestDatabase;
use shelfmark_db::{query_tokens, BookmarkRepository, NewBookmark, PageRequest};
use uuid::Uuid;

/// Load `.env` (for DATABASE_URL) and open an isolated test schema.
async fn setup() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::new().await
}

fn new_bookmark(url: &str, title: Option<&str>, actress: Option<&str>) -> NewBookmark {
    NewBookmark {
        url: url.to_string(),
        title: title.map(str::to_string),
        tags: vec![],
        actress_name: actress.map(str::to_string),
    }
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_insert_and_fetch_round_trips_tags() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;

    let created = repo
        .insert(NewBookmark {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
            actress_name: Some("Jane Doe".to_string()),
        })
        .await
        .expect("insert");

    let fetched = repo.fetch(created.id).await.expect("fetch").expect("exists");
    assert_eq!(fetched.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(fetched.actress_name.as_deref(), Some("Jane Doe"));
    assert_eq!(fetched.url, "https://example.com");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_find_page_over_25_records() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;

    for i in 0..25 {
        repo.insert(new_bookmark(&format!("https://example.com/{}", i), Some("t"), None))
            .await
            .expect("insert");
    }

    let page = repo
        .find_page(PageRequest::new(Some(2), Some(10)))
        .await
        .expect("page");
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);

    let first = repo.find_page(PageRequest::default()).await.expect("page");
    assert!(first.items[0].date_added >= first.items[9].date_added);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_update_set_tags_and_delete_report_missing_ids() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;
    let missing = Uuid::new_v4();

    assert!(!repo.update_title(missing, "x").await.expect("update"));
    assert!(!repo.set_tags(missing, &["x".to_string()]).await.expect("tags"));
    assert!(!repo.delete(missing).await.expect("delete"));

    let created = repo
        .insert(new_bookmark("https://example.com", None, None))
        .await
        .expect("insert");
    assert!(repo.update_title(created.id, "Example").await.expect("update"));
    assert!(repo.set_tags(created.id, &["x".to_string()]).await.expect("tags"));
    let fetched = repo.fetch(created.id).await.expect("fetch").expect("exists");
    assert_eq!(fetched.title.as_deref(), Some("Example"));
    assert_eq!(fetched.tags, vec!["x".to_string()]);

    assert!(repo.delete(created.id).await.expect("delete"));
    assert!(repo.fetch(created.id).await.expect("fetch").is_none());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_search_is_case_insensitive_and_escapes_wildcards() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;

    repo.insert(new_bookmark("https://a.test", Some("Rust Book"), None)).await.unwrap();
    repo.insert(new_bookmark("https://b.test", Some("100% cotton"), None)).await.unwrap();
    repo.insert(new_bookmark("https://c.test", Some("Other"), Some("RUSTY"))).await.unwrap();

    assert_eq!(repo.search("rust").await.unwrap().len(), 2);
    assert_eq!(repo.search("100%").await.unwrap().len(), 1);
    assert_eq!(repo.search("%").await.unwrap().len(), 1);
    assert_eq!(repo.search("  ").await.unwrap().len(), 3);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_actress_queries() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;

    repo.insert(new_bookmark("https://a.test", None, Some("Jane Doe"))).await.unwrap();
    repo.insert(new_bookmark("https://b.test", None, Some("Mary Roe"))).await.unwrap();
    repo.insert(new_bookmark("https://c.test", None, Some("Jane Doe"))).await.unwrap();
    repo.insert(new_bookmark("https://d.test", None, None)).await.unwrap();

    let hits = repo.search_by_actress(&query_tokens("DOE jan")).await.unwrap();
    assert_eq!(hits.len(), 2);

    let all_named = repo.search_by_actress(&[]).await.unwrap();
    assert_eq!(all_named.len(), 3);

    let names = repo.distinct_actresses(&query_tokens("roe")).await.unwrap();
    assert_eq!(names, vec!["Mary Roe".to_string()]);

    let sample = repo.sample_actress_names(500).await.unwrap();
    assert_eq!(sample, vec!["Jane Doe".to_string(), "Mary Roe".to_string()]);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable PostgreSQL
async fn test_list_unresolved_selects_missing_blank_and_url_titles() {
    let test_db = setup().await;
    let repo = &test_db.db.bookmarks;

    repo.insert(new_bookmark("https://a.test", None, None)).await.unwrap();
    repo.insert(new_bookmark("https://b.test", Some("  "), None)).await.unwrap();
    repo.insert(new_bookmark("https://c.test", Some("https://c.test"), None)).await.unwrap();
    repo.insert(new_bookmark("https://d.test", Some("Resolved"), None)).await.unwrap();

    let unresolved = repo.list_unresolved().await.unwrap();
    assert_eq!(unresolved.len(), 3);
    assert!(unresolved.iter().all(|b| b.url != "https://d.test"));

    test_db.cleanup().await;
}
