//! In-memory HTTP fakes and fixtures shared by the unit tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::api::{ApiConfig, Client, HttpGet};
use crate::country::CountryRecord;
use crate::error::TransportError;

pub const TEST_BASE: &str = "http://countries.test";

/// Answers from a fixed URL table; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<Vec<u8>, TransportError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn with_json(self, path: &str, body: &str) -> Self {
        self.with_body(&format!("{}{}", TEST_BASE, path), body.as_bytes().to_vec())
    }

    pub fn with_error(self, path: &str, err: TransportError) -> Self {
        let url = format!("{}{}", TEST_BASE, path);
        self.with_response(url, Err(err))
    }

    pub fn with_body(self, url: &str, body: Vec<u8>) -> Self {
        self.with_response(url.to_string(), Ok(body))
    }

    fn with_response(mut self, url: String, response: Result<Vec<u8>, TransportError>) -> Self {
        self.responses.insert(url, response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl HttpGet for FakeTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Network("connection refused".to_string())))
    }
}

pub fn test_client(transport: FakeTransport) -> Client<FakeTransport> {
    let config = ApiConfig {
        base_url: TEST_BASE.to_string(),
        ..ApiConfig::default()
    };
    Client::with_transport(transport, config)
}

pub fn record(value: serde_json::Value) -> CountryRecord {
    serde_json::from_value(value).expect("fixture must decode")
}

/// A solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 16, 46, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("PNG encoding of fixture");
    out.into_inner()
}
