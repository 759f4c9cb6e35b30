//! Thin JSON proxy endpoints.
//!
//! - `GET /api/news?q=&page=` forwards to the news content API
//! - `GET /api/qrcode?text=` returns the QR image URL for `text`
//! - `GET /api/spacing?span=&gaps=&width=&available=` solves a slat layout
//!
//! Requests are handled one at a time on the calling thread.

use std::collections::HashMap;

use serde_json::{json, Value};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::layout::solve_and_plan;
use crate::news::{NewsClient, NewsQuery};
use crate::{qrcode, Error, LayoutRequest, Result, ToolkitConfig};

/// A routed reply: HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

pub struct ProxyServer {
    server: Server,
    config: ToolkitConfig,
    news: NewsClient,
}

impl ProxyServer {
    /// Bind to `addr` (use port 0 for an ephemeral port).
    pub fn bind(addr: &str, config: ToolkitConfig) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))?;
        let news = NewsClient::new(&config)?;
        Ok(Self {
            server,
            config,
            news,
        })
    }

    /// Address the server is listening on, e.g. `127.0.0.1:8080`.
    pub fn local_addr(&self) -> String {
        self.server.server_addr().to_string()
    }

    /// Serve requests until the listener is closed.
    pub fn serve(&self) {
        log::info!("listening on http://{}", self.local_addr());
        for request in self.server.incoming_requests() {
            self.respond(request);
        }
    }

    /// Handle exactly one request; mostly useful in tests.
    pub fn serve_one(&self) -> Result<()> {
        let request = self.server.recv()?;
        self.respond(request);
        Ok(())
    }

    fn respond(&self, request: Request) {
        let reply = if *request.method() == Method::Get {
            self.route(request.url())
        } else {
            Reply::error(405, "Method Not Allowed")
        };
        log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);

        let mut response =
            Response::from_data(reply.body.to_string().into_bytes()).with_status_code(reply.status);
        if let Ok(header) = "Content-Type: application/json".parse::<Header>() {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            log::warn!("failed to write response: {}", e);
        }
    }

    /// Map a request target (path and query) onto a reply.
    pub fn route(&self, target: &str) -> Reply {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let params = parse_query(query);
        match path {
            "/api/news" => self.news(&params),
            "/api/qrcode" => self.qr(&params),
            "/api/spacing" => self.spacing(&params),
            _ => Reply::error(404, "Not Found"),
        }
    }

    fn news(&self, params: &HashMap<String, String>) -> Reply {
        let query = NewsQuery {
            q: params.get("q").cloned(),
            page: params.get("page").and_then(|p| p.parse().ok()),
        };
        match self.news.fetch(&query) {
            Ok(feed) => match serde_json::to_value(feed) {
                Ok(body) => Reply::ok(body),
                Err(e) => Reply::error(500, e.to_string()),
            },
            Err(Error::Api(msg)) | Err(Error::Network(msg)) => Reply::error(500, msg),
            Err(Error::Config(msg)) => {
                log::warn!("news proxy misconfigured: {}", msg);
                Reply::error(500, crate::news::FETCH_FAILED_MESSAGE)
            }
            Err(e) => {
                log::warn!("news proxy failed: {}", e);
                Reply::error(500, crate::news::REQUEST_FAILED_MESSAGE)
            }
        }
    }

    fn qr(&self, params: &HashMap<String, String>) -> Reply {
        let text = params.get("text").map(String::as_str).unwrap_or("");
        match qrcode::qr_code_url(&self.config.qr, text) {
            Ok(url) => Reply::ok(json!({
                "qrCodeUrl": url,
                "linkTarget": qrcode::link_target(&self.config.qr, text),
            })),
            Err(e) => Reply::error(400, e.to_string()),
        }
    }

    fn spacing(&self, params: &HashMap<String, String>) -> Reply {
        let field = |k: &str| params.get(k).map(String::as_str).unwrap_or("");
        let request = match LayoutRequest::parse(field("span"), field("gaps"), field("width")) {
            Ok(r) => r,
            Err(e) => return Reply::error(400, e.to_string()),
        };
        let available = params
            .get("available")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.config.available_width);

        let (result, plan) = solve_and_plan(request, &self.config.canvas, available);
        Reply::ok(json!({
            "gapWidth": result.gap_width,
            "message": result.message(),
            "plan": plan,
            "digest": plan.digest(),
        }))
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ProxyServer {
        ProxyServer::bind("127.0.0.1:0", ToolkitConfig::default()).expect("bind")
    }

    #[test]
    fn parse_query_decodes_pairs() {
        let q = parse_query("text=hello+world&size=%32");
        assert_eq!(q.get("text").map(String::as_str), Some("hello world"));
        assert_eq!(q.get("size").map(String::as_str), Some("2"));
    }

    #[test]
    fn unknown_path_is_404() {
        assert_eq!(server().route("/nope").status, 404);
    }

    #[test]
    fn qrcode_route() {
        let s = server();
        let ok = s.route("/api/qrcode?text=hi%20there");
        assert_eq!(ok.status, 200);
        assert_eq!(
            ok.body["qrCodeUrl"],
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=hi%20there"
        );
        let bad = s.route("/api/qrcode");
        assert_eq!(bad.status, 400);
        assert_eq!(bad.body["error"], qrcode::EMPTY_TEXT_MESSAGE);
    }

    #[test]
    fn spacing_route() {
        let s = server();
        let ok = s.route("/api/spacing?span=100&gaps=4&width=10");
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body["gapWidth"], 17.5);
        assert_eq!(ok.body["message"], "Spacing between slats: 17.50 cm");
        assert_eq!(ok.body["plan"]["blocks"].as_array().map(Vec::len), Some(9));
        assert_eq!(ok.body["plan"]["canvasHeight"], 150.0);

        let bad = s.route("/api/spacing?span=50&gaps=1&width=10");
        assert_eq!(bad.status, 400);
        assert_eq!(bad.body["error"], "Please enter valid numbers!");
    }

    #[test]
    fn spacing_route_rejects_huge_gap_counts() {
        let s = server();
        let huge = s.route("/api/spacing?span=100&gaps=4000000000&width=0.00001");
        assert_eq!(huge.status, 400);
        assert_eq!(huge.body["error"], "Please enter valid numbers!");

        let limit = s.route("/api/spacing?span=100&gaps=10000&width=0.00001");
        assert_eq!(limit.status, 200);
        assert_eq!(
            limit.body["plan"]["blocks"].as_array().map(Vec::len),
            Some(20_001)
        );
    }

    #[test]
    fn news_without_key_reports_fetch_failure() {
        let reply = server().route("/api/news");
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body["error"], crate::news::FETCH_FAILED_MESSAGE);
    }
}
