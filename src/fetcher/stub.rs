//! In-process upstream for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::app::{GitaError, Result};
use crate::domain::CHAPTER_COUNT;
use crate::fetcher::Fetcher;

type Route = Box<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// Answers requests from a closure and records every path requested.
pub struct StubFetcher {
    route: Route,
    pub calls: AtomicUsize,
    pub paths: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(route: impl Fn(&str) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            route: Box::new(route),
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(path.to_string());
        (self.route)(path)
    }
}

pub fn chapter_json(n: u8, verses: u16) -> Value {
    json!({
        "chapter_number": n,
        "verses_count": verses,
        "name": format!("name {n}"),
        "transliteration": format!("Adhyaya {n}"),
        "meaning": { "en": format!("Chapter {n}") },
        "summary": { "en": format!("Summary {n}") },
    })
}

pub fn verse_json(c: u8, v: u16) -> Value {
    json!({
        "_id": format!("BG{c}.{v}"),
        "chapter": c,
        "verse": v,
        "slok": format!("shloka {c}.{v}"),
        "transliteration": format!("translit {c}.{v}"),
        "siva": { "author": "Swami Sivananda", "et": format!("Translation of {c}.{v}") },
    })
}

/// Eighteen chapters of `verses` verses each, with a payload for every verse.
pub fn corpus(verses: u16) -> impl Fn(&str) -> Result<Value> + Send + Sync + 'static {
    move |path: &str| {
        let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match parts.as_slice() {
            ["chapters"] => Ok(Value::Array(
                (1..=CHAPTER_COUNT).map(|n| chapter_json(n, verses)).collect(),
            )),
            ["chapter", n] => Ok(chapter_json(n.parse().unwrap(), verses)),
            ["slok", c, v] => Ok(verse_json(c.parse().unwrap(), v.parse().unwrap())),
            _ => Err(GitaError::network(Some(404), format!("no route {path}"))),
        }
    }
}
