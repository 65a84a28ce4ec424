//! Home feed and genre cache tests

use flixglow::api::{fetch_home_feed, GenreCache, TmdbClient};
use mockito::{Matcher, Server, ServerGuard};

fn movie_page(first_id: u64, count: u64) -> String {
    let results: Vec<String> = (first_id..first_id + count)
        .map(|id| {
            format!(
                r#"{{"id": {id}, "title": "Movie {id}", "overview": "", "poster_path": "/p{id}.jpg", "release_date": "2024-01-01", "vote_average": 7.0, "genre_ids": [28]}}"#
            )
        })
        .collect();
    format!(r#"{{"page": 1, "results": [{}]}}"#, results.join(","))
}

const TV_PAGE: &str = r#"{"page": 1, "results": [
    {"id": 1396, "name": "Breaking Bad", "overview": "", "first_air_date": "2008-01-20", "vote_average": 9.5}
]}"#;

const GENRES: &str = r#"{"genres": [
    {"id": 28, "name": "Action"},
    {"id": 35, "name": "Comedy"}
]}"#;

async fn mock_ok(server: &mut ServerGuard, path: &str, body: String) -> mockito::Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

// =============================================================================
// Home Feed Tests
// =============================================================================

#[tokio::test]
async fn test_home_feed_loads_all_slots() {
    let mut server = Server::new_async().await;

    let mocks = vec![
        mock_ok(&mut server, "/trending/movie/week", movie_page(1, 8)).await,
        mock_ok(&mut server, "/movie/popular", movie_page(100, 3)).await,
        mock_ok(&mut server, "/movie/now_playing", movie_page(200, 2)).await,
        mock_ok(&mut server, "/movie/top_rated", movie_page(300, 4)).await,
        mock_ok(&mut server, "/tv/popular", TV_PAGE.to_string()).await,
    ];

    let client = TmdbClient::with_base_url("test_key", server.url());
    let feed = fetch_home_feed(&client).await;

    for mock in mocks {
        mock.assert_async().await;
    }

    assert!(feed.is_complete());
    assert_eq!(feed.trending_or_empty().len(), 8);
    assert_eq!(feed.popular_movies_or_empty().len(), 3);
    assert_eq!(feed.new_releases_or_empty().len(), 2);
    assert_eq!(feed.top_rated_or_empty().len(), 4);
    assert_eq!(feed.popular_tv_shows_or_empty()[0].name, "Breaking Bad");

    let featured: Vec<u64> = feed.featured().iter().map(|m| m.id).collect();
    assert_eq!(featured, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_home_feed_isolates_failing_slot() {
    let mut server = Server::new_async().await;

    let _trending = mock_ok(&mut server, "/trending/movie/week", movie_page(1, 3)).await;
    let _popular = mock_ok(&mut server, "/movie/popular", movie_page(100, 3)).await;
    let _now_playing = server
        .mock("GET", "/movie/now_playing")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let _top_rated = mock_ok(&mut server, "/movie/top_rated", movie_page(300, 1)).await;
    let _tv = mock_ok(&mut server, "/tv/popular", TV_PAGE.to_string()).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let feed = fetch_home_feed(&client).await;

    assert!(feed.new_releases.is_err());
    assert!(feed.new_releases_or_empty().is_empty());
    assert_eq!(feed.failed_slots(), vec!["new_releases"]);
    assert!(!feed.all_failed());

    // Other slots are unaffected
    assert_eq!(feed.featured().len(), 3);
    assert_eq!(feed.popular_movies_or_empty().len(), 3);
    assert_eq!(feed.top_rated_or_empty().len(), 1);
    assert_eq!(feed.popular_tv_shows_or_empty().len(), 1);
}

#[tokio::test]
async fn test_home_feed_all_failed_when_unreachable() {
    let client = TmdbClient::with_base_url("test_key", "http://127.0.0.1:1");
    let feed = fetch_home_feed(&client).await;

    assert!(feed.all_failed());
    assert!(feed.featured().is_empty());
    assert_eq!(feed.failed_slots().len(), 5);
}

#[tokio::test]
async fn test_concurrent_details_are_independent() {
    let mut server = Server::new_async().await;

    let _ok = server
        .mock("GET", "/movie/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "One", "overview": "", "vote_average": 6.0, "genres": []}"#)
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/movie/2")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let results = futures::future::join_all([1u64, 2].map(|id| client.movie_details(id))).await;

    assert_eq!(results[0].as_ref().map(|d| d.movie.title.as_str()), Ok("One"));
    assert!(results[1].is_err());
}

// =============================================================================
// Genre Cache Tests
// =============================================================================

#[tokio::test]
async fn test_genre_cache_fetches_once() {
    let mut server = Server::new_async().await;

    let mock = mock_ok(&mut server, "/genre/movie/list", GENRES.to_string()).await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut cache = GenreCache::new();

    assert_eq!(cache.get_or_fetch(&client).await.unwrap().len(), 2);
    assert_eq!(cache.get_or_fetch(&client).await.unwrap().len(), 2);

    mock.assert_async().await;

    assert_eq!(cache.name_of(28), Some("Action"));
    assert_eq!(cache.names_for(&[35, 999, 28]), vec!["Comedy", "Action"]);
}

#[tokio::test]
async fn test_genre_cache_does_not_keep_failures() {
    let mut server = Server::new_async().await;

    let failing = server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut cache = GenreCache::new();

    assert!(cache.get_or_fetch(&client).await.is_err());
    assert!(cache.cached().is_none());
    failing.assert_async().await;
    failing.remove_async().await;

    let ok = mock_ok(&mut server, "/genre/movie/list", GENRES.to_string()).await;
    assert_eq!(cache.get_or_fetch(&client).await.unwrap().len(), 2);
    ok.assert_async().await;
}

#[tokio::test]
async fn test_genre_cache_clear_refetches() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(GENRES)
        .expect(2)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let mut cache = GenreCache::new();

    cache.get_or_fetch(&client).await.unwrap();
    cache.clear();
    assert!(cache.cached().is_none());
    cache.get_or_fetch(&client).await.unwrap();

    mock.assert_async().await;
}
