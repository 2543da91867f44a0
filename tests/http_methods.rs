use httpmock::Method::{GET, POST, PUT};
use httpmock::MockServer;
use ripper_http::config::HttpMethod;
use ripper_http::http::Http;
use scraper::Selector;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn title_of(document: &ripper_http::Document) -> String {
    let selector = Selector::parse("title").expect("selector");
    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect())
        .unwrap_or_default()
}

#[test]
fn test_get_parses_document() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/page");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body("<html><head><title>Page One</title></head><body></body></html>");
    });

    let document = Http::url(&server.url("/page"))
        .expect("valid url")
        .get()
        .expect("request should succeed");
    assert_eq!(title_of(&document), "Page One");

    mock.assert();
}

#[test]
fn test_post_parses_document() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200)
            .header("content-type", "text/html")
            .body("<title>Welcome</title>");
    });

    let document = Http::url(&server.url("/login"))
        .expect("valid url")
        .post()
        .expect("request should succeed");
    assert_eq!(title_of(&document), "Welcome");

    mock.assert();
}

#[test]
fn test_custom_method_through_response() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/resource");
        then.status(204);
    });

    let response = Http::url(&server.url("/resource"))
        .expect("valid url")
        .method(HttpMethod::Put)
        .response()
        .expect("request should succeed");
    assert_eq!(response.status(), 204);

    mock.assert();
}

#[test]
fn test_redirects_are_followed() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let start = server.mock(|when, then| {
        when.method(GET).path("/start");
        then.status(302).header("Location", "/final");
    });
    let last = server.mock(|when, then| {
        when.method(GET).path("/final");
        then.status(200)
            .header("content-type", "text/html")
            .body("<title>Final</title>");
    });

    let response = Http::url(&server.url("/start"))
        .expect("valid url")
        .response()
        .expect("request should succeed");
    assert_eq!(response.url().path(), "/final");
    assert_eq!(title_of(&response.parse()), "Final");

    start.assert();
    last.assert();
}
