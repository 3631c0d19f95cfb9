//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small fake catalog and run the
//! full listing → detail → record cycle against it.

use catalog_harvester::config::CrawlerConfig;
use catalog_harvester::crawler::{harvest, Coordinator, ParseError, StopReason};
use catalog_harvester::output::{read_csv_records, save_dataset};
use catalog_harvester::HarvestError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration pointing at the mock server
fn create_test_config(server: &MockServer, max_products: usize) -> CrawlerConfig {
    CrawlerConfig {
        base_url: format!("{}/", server.uri()),
        max_products,
        delay_ms: 0,
        request_timeout_secs: 5,
    }
}

/// One product summary on a listing page
fn product_pod(href: &str, id: usize) -> String {
    format!(
        r#"<li class="col-xs-6"><article class="product_pod">
            <div class="image_container"><a href="{href}"><img src="media/thumb_{id}.jpg" class="thumbnail"></a></div>
            <p class="star-rating Three"><i class="icon-star"></i></p>
            <h3><a href="{href}" title="Book {id}">Book {id}</a></h3>
            <div class="product_price"><p class="price_color">£{id}.50</p></div>
        </article></li>"#
    )
}

/// A listing page with the given products and optional next link
fn listing_page(products: &[String], next: Option<&str>) -> String {
    let pager = match next {
        Some(href) => format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, href),
        None => String::new(),
    };
    format!(
        "<html><body><ol class=\"row\">{}</ol>{}</body></html>",
        products.join("\n"),
        pager
    )
}

/// A complete product detail page
fn detail_page(id: usize) -> String {
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            <li><a href="../category/books/fiction_10/index.html">Fiction</a></li>
            <li class="active">Book {id}</li>
        </ul>
        <div class="item active"><img src="../../media/cover_{id}.jpg" alt="Book {id}"></div>
        <table class="table table-striped">
            <tr><th>UPC</th><td>upc{id:04}</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
        </table>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: usize, expected_hits: u64) {
    mount_page(
        server,
        &format!("/catalogue/book_{}/index.html", id),
        detail_page(id),
        expected_hits,
    )
    .await;
}

/// Listing page whose product links are relative to the catalog root
///
/// Products live under /catalogue/ whichever listing page links to them.
fn root_listing(ids: std::ops::RangeInclusive<usize>, next: Option<&str>) -> String {
    let products: Vec<String> = ids
        .map(|id| product_pod(&format!("catalogue/book_{}/index.html", id), id))
        .collect();
    listing_page(&products, next)
}

#[tokio::test]
async fn test_two_pages_with_cap_stops_mid_second_page() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=10, Some("catalogue/page-2.html")), 1).await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        root_listing(11..=18, Some("page-3.html")),
        1,
    )
    .await;
    mount_page(&server, "/catalogue/page-3.html", root_listing(19..=20, None), 0).await;

    for id in 1..=15 {
        mount_detail(&server, id, 1).await;
    }
    for id in 16..=18 {
        mount_detail(&server, id, 0).await;
    }

    let report = harvest(&create_test_config(&server, 15)).await.unwrap();

    assert_eq!(report.len(), 15);
    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.detail_failures, 0);
    assert_eq!(report.stop_reason, StopReason::ItemCapReached);

    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    let expected: Vec<String> = (1..=15).map(|id| format!("Book {}", id)).collect();
    assert_eq!(names, expected);

    let page_two_first = &report.records[10];
    assert_eq!(
        page_two_first.url.as_str(),
        format!("{}/catalogue/book_11/index.html", server.uri())
    );
    assert_eq!(page_two_first.category.as_deref(), Some("Fiction"));
    assert_eq!(page_two_first.upc.as_deref(), Some("upc0011"));
    assert_eq!(
        page_two_first.image_url.as_ref().unwrap().as_str(),
        format!("{}/media/cover_11.jpg", server.uri())
    );
}

#[tokio::test]
async fn test_links_on_later_pages_resolve_against_catalog_root() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        root_listing(1..=1, Some("catalogue/page-2.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        listing_page(&[product_pod("book_2/index.html", 2)], None),
        1,
    )
    .await;
    mount_detail(&server, 1, 1).await;
    mount_page(
        &server,
        "/book_2/index.html",
        r#"<html><body><div class="item active"><img src="media/cover.jpg"></div></body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(&server, "/catalogue/book_2/index.html", detail_page(2), 0).await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.detail_failures, 0);

    let second = &report.records[1];
    assert_eq!(
        second.url.as_str(),
        format!("{}/book_2/index.html", server.uri())
    );
    assert_eq!(
        second.image_url.as_ref().unwrap().as_str(),
        format!("{}/media/cover.jpg", server.uri())
    );
}

#[tokio::test]
async fn test_detail_failure_degrades_one_record() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=5, None), 1).await;
    for id in [1, 2, 4, 5] {
        mount_detail(&server, id, 1).await;
    }
    Mock::given(method("GET"))
        .and(path("/catalogue/book_3/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 5);
    assert_eq!(report.detail_failures, 1);
    assert_eq!(report.stop_reason, StopReason::LastPage);

    let third = &report.records[2];
    assert_eq!(third.name, "Book 3");
    assert_eq!(third.price, "£3.50");
    assert_eq!(third.rating.as_deref(), Some("Three"));
    assert_eq!(third.category, None);
    assert_eq!(third.image_url, None);
    assert_eq!(third.upc, None);

    let row = third.to_row();
    assert_eq!(&row[3..6], &["", "", ""]);

    for (i, record) in report.records.iter().enumerate() {
        if i != 2 {
            assert_eq!(record.category.as_deref(), Some("Fiction"));
            assert!(record.upc.is_some());
        }
    }
}

#[tokio::test]
async fn test_cap_below_page_size_skips_remaining_details() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=6, Some("catalogue/page-2.html")), 1).await;
    mount_page(&server, "/catalogue/page-2.html", root_listing(7..=8, None), 0).await;
    for id in 1..=4 {
        mount_detail(&server, id, 1).await;
    }
    for id in 5..=6 {
        mount_detail(&server, id, 0).await;
    }

    let report = harvest(&create_test_config(&server, 4)).await.unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.stop_reason, StopReason::ItemCapReached);
}

#[tokio::test]
async fn test_missing_next_link_ends_crawl_below_cap() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=3, None), 1).await;
    for id in 1..=3 {
        mount_detail(&server, id, 1).await;
    }

    let report = harvest(&create_test_config(&server, 100)).await.unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.stop_reason, StopReason::LastPage);
}

#[tokio::test]
async fn test_unavailable_first_listing_yields_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert!(report.is_empty());
    assert_eq!(report.pages_visited, 0);
    assert_eq!(
        report.stop_reason,
        StopReason::ListingUnavailable {
            url: format!("{}/", server.uri())
        }
    );
}

#[tokio::test]
async fn test_unavailable_second_listing_keeps_partial_results() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=2, Some("catalogue/page-2.html")), 1).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    for id in 1..=2 {
        mount_detail(&server, id, 1).await;
    }

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 2);
    assert!(report.stop_reason.is_failure());
    assert!(matches!(report.stop_reason, StopReason::ListingUnavailable { .. }));
}

#[tokio::test]
async fn test_structural_failure_keeps_partial_results() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=2, Some("catalogue/page-2.html")), 1).await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        r#"<html><body><article class="product_pod">
            <h3><a href="book_3/index.html" title="Book 3">Book 3</a></h3>
        </article></body></html>"#
            .to_string(),
        1,
    )
    .await;
    for id in 1..=2 {
        mount_detail(&server, id, 1).await;
    }
    mount_detail(&server, 3, 0).await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.pages_visited, 2);
    match &report.stop_reason {
        StopReason::StructuralFailure { url, error } => {
            assert_eq!(url, &format!("{}/catalogue/page-2.html", server.uri()));
            assert_eq!(
                error,
                &ParseError::MissingElement {
                    field: "price",
                    selector: ".price_color"
                }
            );
        }
        other => panic!("expected structural failure, got {:?}", other),
    }

    assert!(matches!(
        report.into_result(),
        Err(HarvestError::StructuralParse { .. })
    ));
}

#[tokio::test]
async fn test_detail_page_without_optional_fields() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=1, None), 1).await;
    mount_page(
        &server,
        "/catalogue/book_1/index.html",
        "<html><body><h1>Book 1</h1></body></html>".to_string(),
        1,
    )
    .await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.detail_failures, 0);
    let record = &report.records[0];
    assert_eq!(record.category, None);
    assert_eq!(record.image_url, None);
    assert_eq!(record.upc, None);
}

#[tokio::test]
async fn test_duplicate_urls_are_not_deduplicated() {
    let server = MockServer::start().await;

    let products = vec![
        product_pod("catalogue/book_1/index.html", 1),
        product_pod("catalogue/book_1/index.html", 1),
    ];
    mount_page(&server, "/", listing_page(&products, None), 1).await;
    mount_detail(&server, 1, 2).await;

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.records[0].url, report.records[1].url);
}

#[tokio::test]
async fn test_delay_applied_after_every_item() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=3, None), 1).await;
    for id in 1..=3 {
        mount_detail(&server, id, 1).await;
    }

    let config = CrawlerConfig {
        delay_ms: 40,
        ..create_test_config(&server, 20)
    };

    let start = Instant::now();
    let report = Coordinator::new(&config).unwrap().run().await;

    assert_eq!(report.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_harvest_then_save_csv() {
    let server = MockServer::start().await;

    mount_page(&server, "/", root_listing(1..=4, None), 1).await;
    for id in 1..=4 {
        mount_detail(&server, id, 1).await;
    }

    let report = harvest(&create_test_config(&server, 20)).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let stem = dir.path().join("products");
    let path = save_dataset(&report.records, stem.to_str().unwrap(), "csv")
        .unwrap()
        .unwrap();

    let read_back = read_csv_records(&path).unwrap();
    assert_eq!(read_back.len(), 4);
    assert_eq!(read_back, report.records);
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let config = CrawlerConfig {
        base_url: "not a url".to_string(),
        ..CrawlerConfig::default()
    };
    assert!(matches!(
        Coordinator::new(&config),
        Err(HarvestError::Url(_))
    ));
}
