//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full mirror cycle end-to-end against a temporary output directory.

use site_mirror::config::{
    Config, CrawlerConfig, ExistingFilePolicy, FetcherConfig, LinkType, ManifestConfig,
    OutputConfig,
};
use site_mirror::crawler::Coordinator;
use site_mirror::state::PageState;
use site_mirror::storage::{SaveOutcome, Storage, StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOST: &str = "127.0.0.1";

/// Creates a test configuration writing under `output_dir`
fn create_test_config(output_dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            exclude: vec!["mailto:".to_string()],
            link_types: vec![LinkType::new("a", "href"), LinkType::new("img", "src")],
            max_pages: 0,
        },
        fetcher: FetcherConfig {
            user_agent: "site-mirror-test/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        output: OutputConfig {
            directory: output_dir.to_string_lossy().into_owned(),
            on_existing: ExistingFilePolicy::Overwrite,
        },
        manifest: ManifestConfig {
            file_name: "README.txt".to_string(),
            author: "Test Author".to_string(),
            license: "MIT".to_string(),
            version: "1.0".to_string(),
            project: "Test Mirror".to_string(),
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

fn seed(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to build seed URL")
}

fn mirror_file(output: &TempDir, relative: &str) -> PathBuf {
    output.path().join(HOST).join(relative)
}

#[tokio::test]
async fn test_only_local_links_are_followed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="mailto:x@x.com">Mail</a>
            <a href="https://external.com/">External</a>
            </body></html>"#,
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/about", html("<html><body>About</body></html>"), 1).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(output.path());
    let mut coordinator =
        Coordinator::new(config, seed(&mock_server, "/")).expect("Failed to create coordinator");

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 2);
    assert_eq!(report.saved_count(), 2);
    let urls: Vec<_> = report.records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", mock_server.uri()),
            format!("{}/about", mock_server.uri())
        ]
    );

    assert!(mirror_file(&output, "index.html").is_file());
    let about = std::fs::read_to_string(mirror_file(&output, "about.html")).unwrap();
    assert!(about.contains("About"));
}

#[tokio::test]
async fn test_failed_fetch_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/missing">Missing</a><a href="/present">Present</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/missing", ResponseTemplate::new(404), 1).await;
    mount_page(&mock_server, "/present", html("present"), 1).await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    let missing = report
        .get(&format!("{}/missing", mock_server.uri()))
        .expect("missing page not recorded");
    assert_eq!(missing.state, PageState::Failed);
    assert_eq!(missing.error.as_deref(), Some("HTTP status 404"));
    assert!(!mirror_file(&output, "missing.html").exists());

    let present = report
        .get(&format!("{}/present", mock_server.uri()))
        .expect("present page not recorded");
    assert_eq!(present.state, PageState::Saved);
    assert!(mirror_file(&output, "present.html").is_file());

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.saved_count(), 2);
}

#[tokio::test]
async fn test_empty_page_still_writes_manifest() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html(""), 1).await;

    let output = TempDir::new().unwrap();
    let mut coordinator = Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/"))
        .unwrap()
        .with_config_hash("deadbeef");

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 1);
    let manifest_path = report.manifest_path.clone().expect("manifest not written");
    assert_eq!(manifest_path, mirror_file(&output, "README.txt"));

    let manifest = std::fs::read_to_string(manifest_path).unwrap();
    assert!(manifest.contains("@author: Test Author"));
    assert!(manifest.contains("@license: MIT"));
    assert!(manifest.contains("@version: 1.0"));
    assert!(manifest.contains("@project: Test Mirror"));
    assert!(manifest.contains(&format!("Web Site URL: {}/", mock_server.uri())));
    assert!(manifest.contains("Pages: 1 saved, 0 failed"));
    assert!(manifest.contains("Config: sha256:deadbeef"));
}

#[tokio::test]
async fn test_manifest_written_when_seed_fails() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", ResponseTemplate::new(500), 1).await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.failed_count(), 1);
    assert!(!mirror_file(&output, "index.html").exists());
    assert!(mirror_file(&output, "README.txt").is_file());
}

#[tokio::test]
async fn test_manifest_does_not_replace_mirrored_readme() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html(r#"<a href="/README.txt">Readme</a>"#), 1).await;
    mount_page(
        &mock_server,
        "/README.txt",
        ResponseTemplate::new(200).set_body_raw("SITE README CONTENT", "text/plain"),
        1,
    )
    .await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    let readme = report
        .get(&format!("{}/README.txt", mock_server.uri()))
        .expect("README.txt not recorded");
    assert_eq!(readme.state, PageState::Saved);
    assert_eq!(
        std::fs::read_to_string(mirror_file(&output, "README.txt")).unwrap(),
        "SITE README CONTENT"
    );

    let manifest_path = report.manifest_path.clone().expect("manifest not written");
    assert_eq!(manifest_path, mirror_file(&output, "README-1.txt"));
    let manifest = std::fs::read_to_string(manifest_path).unwrap();
    assert!(manifest.contains("Pages: 2 saved, 0 failed"));
}

#[tokio::test]
async fn test_off_site_redirect_recorded_as_failed() {
    let mock_server = MockServer::start().await;
    let other_site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(html("foreign content"))
        .mount(&other_site)
        .await;

    mount_page(&mock_server, "/", html(r#"<a href="/moved">Moved</a>"#), 1).await;
    // Host differs from 127.0.0.1, so the redirect leaves the site
    let target = format!(
        "http://localhost:{}/elsewhere",
        other_site.address().port()
    );
    mount_page(
        &mock_server,
        "/moved",
        ResponseTemplate::new(302).insert_header("Location", target.as_str()),
        1,
    )
    .await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    let moved = report
        .get(&format!("{}/moved", mock_server.uri()))
        .expect("redirected page not recorded");
    assert_eq!(moved.state, PageState::Failed);
    assert!(!mirror_file(&output, "moved.html").exists());
    assert_eq!(report.saved_count(), 1);
}

#[tokio::test]
async fn test_cycles_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/a">A</a><a href="/b">B</a><a href="/">Home</a>"#),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        html(r#"<a href="/b">B</a><a href="/">Home</a><a href="/a#top">Self</a>"#),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        html(&format!(r#"<a href="{}/a">A</a>"#, mock_server.uri())),
        1,
    )
    .await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 3);
    assert_eq!(report.saved_count(), 3);
    // `expect(1)` on every mock is verified when the server drops
}

#[tokio::test]
async fn test_relative_links_resolved_against_page_directory() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/intro.html",
        html(r#"<a href="guide.html">Guide</a><a href="../about">About</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/docs/guide.html", html("guide"), 1).await;
    mount_page(&mock_server, "/about", html("about"), 1).await;

    let output = TempDir::new().unwrap();
    let mut coordinator = Coordinator::new(
        create_test_config(output.path()),
        seed(&mock_server, "/docs/intro.html"),
    )
    .unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.saved_count(), 3);
    assert!(mirror_file(&output, "docs/intro.html").is_file());
    assert!(mirror_file(&output, "docs/guide.html").is_file());
    assert!(mirror_file(&output, "about.html").is_file());
}

#[tokio::test]
async fn test_assets_saved_but_not_parsed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", html(r#"<img src="/img/logo.png">"#), 1).await;
    mount_page(
        &mock_server,
        "/img/logo.png",
        ResponseTemplate::new(200).set_body_raw(r#"<a href="/hidden">x</a>"#, "image/png"),
        1,
    )
    .await;
    mount_page(&mock_server, "/hidden", html("hidden"), 0).await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 2);
    assert!(mirror_file(&output, "img/logo.png").is_file());
}

#[tokio::test]
async fn test_malformed_html_does_not_abort() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<html><body><div><a href="/ok">ok<p></div></span><a href="/broken"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/ok", html("ok"), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(html("broken"))
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert!(report.get(&format!("{}/ok", mock_server.uri())).is_some());
    assert_eq!(report.failed_count(), 0);
}

#[tokio::test]
async fn test_page_limit() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/1", html("1"), 1).await;
    mount_page(&mock_server, "/2", html("2"), 0).await;
    mount_page(&mock_server, "/3", html("3"), 0).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(output.path());
    config.crawler.max_pages = 2;
    let mut coordinator = Coordinator::new(config, seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 2);
    assert!(mirror_file(&output, "README.txt").is_file());
}

#[tokio::test]
async fn test_skip_policy_keeps_existing_files() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html("fresh"), 1).await;

    let output = TempDir::new().unwrap();
    let existing = mirror_file(&output, "index.html");
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, "stale").unwrap();

    let mut config = create_test_config(output.path());
    config.output.on_existing = ExistingFilePolicy::Skip;
    let mut coordinator = Coordinator::new(config, seed(&mock_server, "/")).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.saved_count(), 1);
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "stale");
}

#[tokio::test]
async fn test_overwrite_policy_replaces_existing_files() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html("fresh"), 1).await;

    let output = TempDir::new().unwrap();
    let existing = mirror_file(&output, "index.html");
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, "stale").unwrap();

    let mut coordinator =
        Coordinator::new(create_test_config(output.path()), seed(&mock_server, "/")).unwrap();

    coordinator.run().await.expect("Crawl failed");

    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "fresh");
}

/// Storage that refuses every write
struct ReadOnlyStorage {
    root: PathBuf,
}

impl Storage for ReadOnlyStorage {
    fn save(&mut self, path: &Path, _content: &[u8]) -> StorageResult<SaveOutcome> {
        Err(StorageError::Write {
            path: self.resolve(path),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[tokio::test]
async fn test_storage_failure_recorded_as_failed() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html(r#"<a href="/next">Next</a>"#), 1).await;
    mount_page(&mock_server, "/next", html("next"), 1).await;

    let output = TempDir::new().unwrap();
    let storage = ReadOnlyStorage {
        root: output.path().to_path_buf(),
    };
    let mut coordinator = Coordinator::with_storage(
        create_test_config(output.path()),
        seed(&mock_server, "/"),
        Box::new(storage),
    )
    .unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    // Links are still followed even though nothing could be written
    assert_eq!(report.total(), 2);
    assert_eq!(report.failed_count(), 2);
    assert!(report
        .records
        .iter()
        .all(|r| r.error.as_deref().unwrap_or("").contains("read-only")));
    assert!(mirror_file(&output, "README.txt").is_file());
}

#[tokio::test]
async fn test_unreachable_seed() {
    // Nothing listens on port 1
    let output = TempDir::new().unwrap();
    let mut config = create_test_config(output.path());
    config.fetcher.timeout_secs = 2;
    config.fetcher.connect_timeout_secs = 1;

    let mut coordinator =
        Coordinator::new(config, Url::parse("http://127.0.0.1:1/").unwrap()).unwrap();

    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.total(), 1);
    assert_eq!(report.failed_count(), 1);
    assert!(mirror_file(&output, "README.txt").is_file());
}
