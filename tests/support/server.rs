//! In-process mock of the back-office API.
//!
//! Serves the investors, transactions, and referrals list endpoints over
//! real HTTP on an ephemeral port, each with a different envelope shape
//! (flat, data-wrapped, data.results) the way the production API mixes
//! them. Failure status and artificial latency are injectable per backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use matchit::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use teller_core::{Investor, Referral, Transaction};

/// Route identifier
#[derive(Clone, Copy)]
enum Route {
    Health,
    Investors,
    Transactions,
    Referrals,
}

/// Injectable backend behavior.
#[derive(Default)]
pub struct Behavior {
    fail_status: AtomicU16,
    delay_ms: AtomicU64,
}

impl Behavior {
    pub fn fail_with(&self, status: u16) {
        self.fail_status.store(status, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.fail_status.store(0, Ordering::SeqCst);
    }

    pub fn delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

/// A running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub behavior: Arc<Behavior>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let behavior = Arc::new(Behavior::default());
        let router = Arc::new(build_router());

        let accept_behavior = Arc::clone(&behavior);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let behavior = Arc::clone(&accept_behavior);
                let router = Arc::clone(&router);

                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        handle_request(req, Arc::clone(&behavior), Arc::clone(&router))
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self { addr, behavior }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn build_router() -> Router<Route> {
    let mut router = Router::new();
    router.insert("/health", Route::Health).unwrap();
    router.insert("/api/v1/investors", Route::Investors).unwrap();
    router.insert("/api/v1/transactions", Route::Transactions).unwrap();
    router.insert("/api/v1/referrals", Route::Referrals).unwrap();
    router
}

async fn handle_request(
    req: Request<Incoming>,
    behavior: Arc<Behavior>,
    router: Arc<Router<Route>>,
) -> Result<Response<Full<Bytes>>, std::convert::Infallible> {
    let delay = behavior.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let fail = behavior.fail_status.load(Ordering::SeqCst);
    if fail != 0 {
        return Ok(error_response(
            StatusCode::from_u16(fail).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        ));
    }

    let path = req.uri().path();
    let query = parse_query(req.uri().query());

    let route = match router.at(path) {
        Ok(matched) if req.method() == Method::GET => *matched.value,
        _ => return Ok(error_response(StatusCode::NOT_FOUND)),
    };

    let body = match route {
        Route::Health => json!({ "status": "ok" }),
        Route::Investors => list_investors(&query),
        Route::Transactions => list_transactions(&query),
        Route::Referrals => list_referrals(&query),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap())
}

fn error_response(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"mock failure"}"#)))
        .unwrap()
}

/// Query parameters plus the slice of a filtered dataset they select.
struct PageSlice {
    items: Vec<Value>,
    page: u32,
    limit: u32,
    total_pages: u32,
    total_results: u64,
}

fn paginate<T: serde::Serialize>(rows: Vec<T>, query: &HashMap<String, String>) -> PageSlice {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let limit: u32 = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10).max(1);

    let total_results = rows.len() as u64;
    let total_pages = total_results.div_ceil(limit as u64) as u32;
    let start = ((page - 1) * limit) as usize;

    let items = rows
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();

    PageSlice {
        items,
        page,
        limit,
        total_pages,
        total_results,
    }
}

fn search_and_status<'a, T>(
    rows: &'a [T],
    query: &HashMap<String, String>,
    text_fields: impl Fn(&T) -> Vec<&str>,
    status_field: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let search = query.get("search").map(|s| s.to_lowercase()).unwrap_or_default();
    let status = query.get("status");

    rows.iter()
        .filter(|row| {
            search.is_empty()
                || text_fields(row)
                    .iter()
                    .any(|f| f.to_lowercase().contains(&search))
        })
        .filter(|row| match status {
            Some(s) => status_field(row).eq_ignore_ascii_case(s),
            None => true,
        })
        .collect()
}

/// Flat envelope, scalars at the top level.
fn list_investors(query: &HashMap<String, String>) -> Value {
    let rows = investor_rows();
    let filtered = search_and_status(&rows, query, |i| vec![&i.name, &i.email], |i| &i.status);
    let slice = paginate(filtered, query);

    json!({
        "results": slice.items,
        "page": slice.page,
        "limit": slice.limit,
        "totalPages": slice.total_pages,
        "totalResults": slice.total_results,
    })
}

/// Everything nested one level under `data`.
fn list_transactions(query: &HashMap<String, String>) -> Value {
    let rows = transaction_rows();
    let filtered = search_and_status(
        &rows,
        query,
        |t| vec![&t.reference, &t.investor_name],
        |t| &t.status,
    );
    let slice = paginate(filtered, query);

    json!({
        "success": true,
        "data": {
            "results": slice.items,
            "page": slice.page,
            "limit": slice.limit,
            "totalPages": slice.total_pages,
            "totalResults": slice.total_results,
        }
    })
}

/// Items under `data`, scalars at the top level.
fn list_referrals(query: &HashMap<String, String>) -> Value {
    let rows = referral_rows();
    let filtered = search_and_status(
        &rows,
        query,
        |r| vec![&r.referrer_name, &r.referee_name],
        |r| &r.status,
    );
    let slice = paginate(filtered, query);

    json!({
        "success": true,
        "data": slice.items,
        "page": slice.page,
        "limit": slice.limit,
        "totalPages": slice.total_pages,
        "totalResults": slice.total_results,
    })
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Some(q) = query {
        for part in q.split('&') {
            if let Some((key, value)) = part.split_once('=') {
                map.insert(urldecode(key), urldecode(value));
            }
        }
    }
    map
}

fn urldecode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let hex: String = chars.by_ref().take(2).collect();
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                }
            }
            '+' => result.push(' '),
            _ => result.push(c),
        }
    }
    result
}

fn investor_rows() -> Vec<Investor> {
    let mut rows: Vec<Investor> = vec![
        investor("srv-1", "Asha Patel", "active"),
        investor("srv-2", "Priya Patel", "active"),
        investor("srv-3", "Nikhil Patel", "pending"),
        investor("srv-4", "Marcus Webb", "active"),
        investor("srv-5", "Lena Okafor", "suspended"),
    ];
    for i in 6..=12 {
        rows.push(investor(
            &format!("srv-{i}"),
            &format!("Account Holder {i:02}"),
            "active",
        ));
    }
    rows
}

fn investor(id: &str, name: &str, status: &str) -> Investor {
    let slug = name.to_lowercase().replace(' ', ".");
    Investor {
        id: id.into(),
        name: name.into(),
        email: format!("{slug}@example.com"),
        status: status.into(),
        plan: Some("growth".into()),
        balance: 1_000.0,
        joined_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        referral_code: None,
    }
}

fn transaction_rows() -> Vec<Transaction> {
    (1..=8)
        .map(|i| Transaction {
            id: format!("srv-txn-{i}"),
            investor_id: format!("srv-{i}"),
            investor_name: format!("Account Holder {i:02}"),
            kind: if i % 2 == 0 { "deposit" } else { "withdrawal" }.into(),
            amount: 100.0 * i as f64,
            status: if i % 3 == 0 { "pending" } else { "completed" }.into(),
            reference: format!("SRV-REF-{i:04}"),
            created_at: "2025-06-01T00:00:00Z".parse().unwrap(),
        })
        .collect()
}

fn referral_rows() -> Vec<Referral> {
    (1..=4)
        .map(|i| Referral {
            id: format!("srv-ref-{i}"),
            referrer_name: "Asha Patel".into(),
            referee_name: format!("Referee {i}"),
            referee_email: format!("referee{i}@example.com"),
            level: 1,
            bonus: 50.0,
            status: if i % 2 == 0 { "credited" } else { "pending" }.into(),
            created_at: "2025-05-01T00:00:00Z".parse().unwrap(),
        })
        .collect()
}
