use crate::error::{GivingError, GivingResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use worker::{Fetch, Headers, Request, RequestInit, wasm_bindgen};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
}

impl From<HttpMethod> for worker::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => worker::Method::Get,
            HttpMethod::Post => worker::Method::Post,
        }
    }
}

#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// `application/x-www-form-urlencoded` 请求体（Stripe API 使用表单编码）
    pub fn with_form<'a>(mut self, fields: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in fields {
            serializer.append_pair(key, &value);
        }
        self.body = Some(serializer.finish());
        self.with_header("Content-Type", "application/x-www-form-urlencoded")
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> GivingResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            GivingError::external_api(format!("Unexpected upstream body: {}", e)).with_source(e)
        })
    }
}

/// (?Send) 是因为 Worker 环境下某些类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> GivingResult<HttpResponse>;
}

// =========================================================
// 实现层: Worker 客户端
// =========================================================

#[derive(Clone)]
pub struct WorkerHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for WorkerHttpClient {
    async fn send(&self, req: HttpRequest) -> GivingResult<HttpResponse> {
        let headers = Headers::new();
        for (k, v) in &req.headers {
            headers.set(k, v)?;
        }

        let mut init = RequestInit {
            method: req.method.into(),
            headers,
            ..Default::default()
        };

        if let Some(body_str) = &req.body {
            init.body = Some(wasm_bindgen::JsValue::from_str(body_str));
        }

        let worker_req = Request::new_with_init(&req.url, &init)?;
        let mut response = Fetch::Request(worker_req).send().await.map_err(|e| {
            GivingError::external_api(e.to_string()).in_op_with("http.fetch", req.url.clone())
        })?;

        Ok(HttpResponse {
            status: response.status_code(),
            body: response.text().await?,
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的请求 (URL, Method, Headers, Body)
#[cfg(test)]
pub type RecordedRequest = (String, String, HashMap<String, String>, Option<String>);

#[cfg(test)]
pub struct MockHttpClient {
    // (URL, (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_text(url, status, &body.to_string());
    }

    pub fn mock_text(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    /// 解析第 `idx` 个请求的表单体
    pub fn form_of(&self, idx: usize) -> HashMap<String, String> {
        let reqs = self.requests.borrow();
        let body = reqs[idx].3.clone().unwrap_or_default();
        url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> GivingResult<HttpResponse> {
        self.requests.borrow_mut().push((
            req.url.clone(),
            format!("{:?}", req.method),
            req.headers.clone(),
            req.body.clone(),
        ));

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&req.url) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
