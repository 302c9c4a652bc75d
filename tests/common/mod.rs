// 集成测试公共模块
//
// 提供模拟传输层和结果收集工具

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use batch_translator::{
    HttpRequest, HttpResponse, Language, Result, Translation, TranslationError, Transport,
    TranslatorBuilder,
};
use reqwest::Url;
use serde_json::{json, Value};

/// 模拟的一次响应
pub enum Scripted {
    /// 把每条消息翻译为 `原文 + 大写语言代码`
    Echo,
    /// 返回固定的状态码和响应体
    Status(u16, String),
    /// 返回固定的成功响应体
    Body(String),
    /// 传输层失败
    Fail(String),
    /// 等待一段时间后按 `Echo` 响应
    Delay(Duration),
}

/// 模拟传输层
///
/// 按顺序消费预设的响应，预设用完后默认使用 `Echo`。
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, response: Scripted) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 每个请求中的消息原文
    pub fn sent_texts(&self) -> Vec<Vec<String>> {
        self.requests()
            .iter()
            .map(|request| request_texts(request))
            .collect()
    }
}

fn request_texts(request: &HttpRequest) -> Vec<String> {
    let body: Vec<Value> = serde_json::from_str(&request.body).unwrap();
    body.iter()
        .map(|item| item["Text"].as_str().unwrap().to_string())
        .collect()
}

fn echo(request: &HttpRequest) -> HttpResponse {
    let url = Url::parse(&request.url).unwrap();
    let languages: Vec<String> = url
        .query_pairs()
        .filter(|(key, _)| key == "to")
        .map(|(_, value)| value.into_owned())
        .collect();

    let items: Vec<Value> = request_texts(request)
        .iter()
        .map(|text| {
            let translations: Vec<Value> = languages
                .iter()
                .map(|language| {
                    json!({ "text": format!("{}{}", text, language.to_uppercase()), "to": language })
                })
                .collect();
            json!({ "translations": translations })
        })
        .collect();

    HttpResponse {
        status: 200,
        headers: vec![("X-Metered-Usage".to_string(), "100".to_string())],
        body: Value::Array(items).to_string(),
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front().unwrap_or(Scripted::Echo);
        match next {
            Scripted::Echo => Ok(echo(&request)),
            Scripted::Status(status, body) => Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            }),
            Scripted::Body(body) => Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body,
            }),
            Scripted::Fail(message) => Err(TranslationError::Transport(message)),
            Scripted::Delay(duration) => {
                tokio::time::sleep(duration).await;
                Ok(echo(&request))
            }
        }
    }
}

/// 收集回调结果
pub type Collected<S> = Arc<Mutex<Vec<Translation<S>>>>;

pub fn collector<S: Send + 'static>() -> (Collected<S>, impl FnMut(Translation<S>) + Send + 'static) {
    let collected: Collected<S> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    (collected, move |translation: Translation<S>| {
        sink.lock().unwrap().push(translation)
    })
}

/// 英文翻译为西班牙语和意大利语的构建器
pub fn builder(transport: &MockTransport) -> TranslatorBuilder {
    TranslatorBuilder::new()
        .with_languages(vec![Language::Spanish, Language::Italian], Language::English)
        .with_subscription_key("test-key")
        .with_transport(transport.clone())
}
