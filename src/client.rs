//! 翻译网关模块
//!
//! 负责一次批量请求的完整往返：生成追踪ID、序列化批次、调用传输层、
//! 解析按位置对齐的响应，并把服务错误转换为结构化的 `Service` 错误。

use crate::error::{Result, TranslationError};
use crate::messages::Messages;
use crate::request::RequestFactory;
use crate::trace::{random_trace_id, TraceIdGenerator};
use crate::transport::{HttpResponse, Transport};
use crate::types::{ErrorResponse, LanguageTranslation, ResponseItem};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 服务返回的用量响应头
pub const METERED_USAGE_HEADER: &str = "X-Metered-Usage";

/// 一条未经处理的译文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTranslation {
    /// 在批次中的位置
    pub position: usize,
    /// 目标语言代码，原样保留服务返回的值
    pub language: String,
    /// 服务返回的译文
    pub text: String,
    /// 所属批次的追踪ID
    pub trace_id: String,
}

/// 一次批量请求的结果
///
/// 按请求位置依次产出每个位置的所有目标语言译文。只能遍历一次。
#[derive(Debug)]
pub struct Translations {
    items: std::iter::Enumerate<std::vec::IntoIter<ResponseItem>>,
    current: Option<(usize, std::vec::IntoIter<LanguageTranslation>)>,
    trace_id: String,
}

impl Translations {
    fn new(items: Vec<ResponseItem>, trace_id: String) -> Self {
        Self {
            items: items.into_iter().enumerate(),
            current: None,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }
}

impl Iterator for Translations {
    type Item = RawTranslation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((position, translations)) = &mut self.current {
                if let Some(translation) = translations.next() {
                    return Some(RawTranslation {
                        position: *position,
                        language: translation.to,
                        text: translation.text,
                        trace_id: self.trace_id.clone(),
                    });
                }
            }

            let (position, item) = self.items.next()?;
            self.current = Some((position, item.translations.into_iter()));
        }
    }
}

/// 翻译网关
pub struct Client {
    transport: Box<dyn Transport>,
    requests: RequestFactory,
    trace_ids: Option<Box<dyn TraceIdGenerator>>,
    metered_usage: HashMap<String, Vec<String>>,
}

impl Client {
    pub fn new(
        transport: Box<dyn Transport>,
        requests: RequestFactory,
        trace_ids: Option<Box<dyn TraceIdGenerator>>,
    ) -> Self {
        Self {
            transport,
            requests,
            trace_ids,
            metered_usage: HashMap::new(),
        }
    }

    /// 发送一个批次
    ///
    /// 请求体序列化后立即释放批次中的原文；关联状态保留在批次中，
    /// 调用方必须在遍历完结果之后再清空批次。
    pub async fn translate<S>(&mut self, messages: &mut Messages<S>) -> Result<Translations> {
        let trace_id = self.create_trace_id();
        let body = messages.to_request_body()?;
        messages.release_sources();

        let request = self.requests.create(body, &trace_id);
        debug!(
            "发送 {} 条消息（{} 字符），追踪ID: {}",
            messages.len(),
            messages.character_count(),
            trace_id
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let error = service_error(&response);
            warn!("翻译请求失败，追踪ID: {}，错误: {}", trace_id, error);
            return Err(error);
        }

        self.metered_usage
            .insert(trace_id.clone(), response.header_values(METERED_USAGE_HEADER));

        let items: Vec<ResponseItem> = serde_json::from_str(&response.body)?;
        Ok(Translations::new(items, trace_id))
    }

    /// 每个追踪ID对应的服务用量
    pub fn metered_usage(&self) -> &HashMap<String, Vec<String>> {
        &self.metered_usage
    }

    /// 取出已记录的服务用量，之后重新开始记录
    pub fn take_metered_usage(&mut self) -> HashMap<String, Vec<String>> {
        std::mem::take(&mut self.metered_usage)
    }

    fn create_trace_id(&self) -> String {
        match &self.trace_ids {
            Some(generator) => generator.generate(&random_trace_id),
            None => random_trace_id(),
        }
    }
}

/// 把非200响应转换为 `Service` 错误
///
/// 优先使用 `innererror.details` 中的第一条详情；响应体无法解析时保留状态码和原始内容。
fn service_error(response: &HttpResponse) -> TranslationError {
    match serde_json::from_str::<ErrorResponse>(&response.body) {
        Ok(ErrorResponse { error }) => {
            let detail = error
                .innererror
                .and_then(|inner| inner.details.into_iter().next());
            match detail {
                Some(detail) => TranslationError::Service {
                    status: response.status,
                    code: detail.code,
                    message: detail.message,
                    target: detail.target,
                },
                None => TranslationError::Service {
                    status: response.status,
                    code: error.code,
                    message: error.message,
                    target: None,
                },
            }
        }
        Err(_) => TranslationError::Service {
            status: response.status,
            code: i64::from(response.status),
            message: if response.body.trim().is_empty() {
                "unknown".to_string()
            } else {
                response.body.trim().to_string()
            },
            target: None,
        },
    }
}
