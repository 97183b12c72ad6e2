use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

/// Minimal stand-in for the scripture API.
///
/// - `/chapters`, `/chapter/{n}`: chapters with `verses_per_chapter` verses
/// - `/slok/{c}/{v}`: verse payloads, except refs listed in `broken` (500)
///   and `garbled` (non-JSON body)
/// - anything else: 404
pub struct UpstreamStub {
    pub base_url: String,
    pub requests: Arc<AtomicUsize>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpstreamStubConfig {
    pub verses_per_chapter: u16,
    pub broken: Vec<(u8, u16)>,
    pub garbled: Vec<(u8, u16)>,
}

impl UpstreamStub {
    pub fn spawn(config: UpstreamStubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start upstream stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };
            counter.fetch_add(1, Ordering::SeqCst);

            let url = request.url().to_string();
            let path = url.split('?').next().unwrap_or(&url).to_string();
            let (status, body) = route(&config, &path);

            let header =
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("build header");
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for UpstreamStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn route(config: &UpstreamStubConfig, path: &str) -> (u16, String) {
    let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
    match parts.as_slice() {
        ["chapters"] => {
            let chapters: Vec<Value> = (1..=18u8)
                .map(|n| chapter(n, config.verses_per_chapter))
                .collect();
            (200, Value::Array(chapters).to_string())
        }
        ["chapter", n] => match n.parse::<u8>() {
            Ok(n) if (1..=18).contains(&n) => {
                (200, chapter(n, config.verses_per_chapter).to_string())
            }
            _ => (404, "{\"error\":\"not found\"}".to_string()),
        },
        ["slok", c, v] => {
            let (Ok(c), Ok(v)) = (c.parse::<u8>(), v.parse::<u16>()) else {
                return (404, "{\"error\":\"not found\"}".to_string());
            };
            if !(1..=18).contains(&c) || v == 0 || v > config.verses_per_chapter {
                return (404, "{\"error\":\"not found\"}".to_string());
            }
            if config.broken.contains(&(c, v)) {
                return (500, "{\"error\":\"internal\"}".to_string());
            }
            if config.garbled.contains(&(c, v)) {
                return (200, "<html>maintenance</html>".to_string());
            }
            (200, verse(c, v).to_string())
        }
        _ => (404, "{\"error\":\"not found\"}".to_string()),
    }
}

fn chapter(n: u8, verses: u16) -> Value {
    json!({
        "chapter_number": n,
        "verses_count": verses,
        "name": "अध्याय",
        "translation": format!("Chapter {n} Yoga"),
        "transliteration": format!("Adhyāya {n}"),
        "meaning": { "en": format!("Meaning {n}"), "hi": "अर्थ" },
        "summary": { "en": format!("Summary of chapter {n}"), "hi": "सारांश" },
    })
}

fn verse(c: u8, v: u16) -> Value {
    json!({
        "_id": format!("BG{c}.{v}"),
        "chapter": c,
        "verse": v,
        "slok": format!("श्लोक {c}.{v}"),
        "transliteration": format!("śloka {c}.{v}"),
        "tej": { "author": "Swami Tejomayananda", "ht": format!("हिंदी {c}.{v}") },
        "siva": {
            "author": "Swami Sivananda",
            "et": format!("English {c}.{v}"),
            "ec": format!("Commentary {c}.{v}"),
        },
        "purohit": { "author": "Shri Purohit Swami", "et": format!("Purohit {c}.{v}") },
    })
}
