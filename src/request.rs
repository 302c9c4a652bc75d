//! 请求构造模块
//!
//! 构造 `/translate` 请求的地址、查询参数和认证信息。批处理核心只负责提供请求体和追踪ID。

use crate::error::{Result, TranslationError};
use crate::language::Language;
use crate::transport::HttpRequest;
use reqwest::Url;
use std::fmt;

/// 翻译服务地址
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrl {
    Global,
    America,
    Europe,
    Asia,
}

impl BaseUrl {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUrl::Global => "https://api.cognitive.microsofttranslator.com",
            BaseUrl::America => "https://api-nam.cognitive.microsofttranslator.com",
            BaseUrl::Europe => "https://api-eur.cognitive.microsofttranslator.com",
            BaseUrl::Asia => "https://api-apc.cognitive.microsofttranslator.com",
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 认证方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    SubscriptionKey(String),
    BearerToken(String),
}

impl Authentication {
    fn header(&self) -> (&'static str, String) {
        match self {
            Authentication::SubscriptionKey(key) => ("Ocp-Apim-Subscription-Key", key.clone()),
            Authentication::BearerToken(token) => ("Authorization", format!("Bearer {}", token)),
        }
    }
}

/// 请求中除语言以外的可选部分
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub authentication: Option<Authentication>,
    pub subscription_region: Option<String>,
    pub resource_id: Option<String>,
    /// 脏话处理参数，见 `ProfanityFilter::query_params`
    pub profanity_params: Vec<(&'static str, &'static str)>,
}

/// 请求工厂
///
/// 构造时确定地址、语言和认证信息，每个批次只需追加请求体和追踪ID。
#[derive(Debug, Clone)]
pub struct RequestFactory {
    base_request: HttpRequest,
}

impl RequestFactory {
    pub fn new(
        base_url: &str,
        from: Language,
        to: &[Language],
        options: &RequestOptions,
    ) -> Result<Self> {
        let mut url = Url::parse(base_url).map_err(|e| {
            TranslationError::InvalidConfiguration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        url.set_path("/translate");
        {
            let mut query = url.query_pairs_mut();
            query
                .clear()
                .append_pair("api-version", "3.0")
                .append_pair("from", from.code())
                .append_pair("textType", "html");
            if options.profanity_params.is_empty() {
                query.append_pair("profanityAction", "NoAction");
            }
            for (name, value) in &options.profanity_params {
                query.append_pair(name, value);
            }
            for language in to {
                query.append_pair("to", language.code());
            }
        }

        let mut request = HttpRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: String::new(),
        };
        request.set_header("Content-Type", "application/json");
        if let Some(authentication) = &options.authentication {
            let (name, value) = authentication.header();
            request.set_header(name, value);
        }
        if let Some(region) = &options.subscription_region {
            request.set_header("Ocp-Apim-Subscription-Region", region.as_str());
        }
        if let Some(resource_id) = &options.resource_id {
            request.set_header("Ocp-Apim-ResourceId", resource_id.as_str());
        }

        Ok(Self {
            base_request: request,
        })
    }

    /// 为一个批次生成请求
    pub fn create(&self, body: String, trace_id: &str) -> HttpRequest {
        let mut request = self.base_request.clone();
        request.set_header("X-ClientTraceId", trace_id);
        request.set_header("Content-Length", body.len().to_string());
        request.body = body;
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_request() {
        let options = RequestOptions {
            authentication: Some(Authentication::SubscriptionKey("secret".to_string())),
            subscription_region: Some("westeurope".to_string()),
            resource_id: None,
            profanity_params: vec![("profanityAction", "Marked"), ("profanityMarker", "Tag")],
        };
        let factory = RequestFactory::new(
            BaseUrl::Europe.as_str(),
            Language::English,
            &[Language::French, Language::ChineseSimplified],
            &options,
        )
        .unwrap();

        let request = factory.create(r#"[{"Text":"Hello"}]"#.to_string(), "trace-1");
        assert_eq!(request.method, "POST");
        assert_eq!(
            request.url,
            "https://api-eur.cognitive.microsofttranslator.com/translate?api-version=3.0&from=en&textType=html&profanityAction=Marked&profanityMarker=Tag&to=fr&to=zh-Hans"
        );
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Ocp-Apim-Subscription-Key"), Some("secret"));
        assert_eq!(request.header("Ocp-Apim-Subscription-Region"), Some("westeurope"));
        assert_eq!(request.header("Ocp-Apim-ResourceId"), None);
        assert_eq!(request.header("X-ClientTraceId"), Some("trace-1"));
        assert_eq!(request.header("Content-Length"), Some("18"));
        assert_eq!(request.body, r#"[{"Text":"Hello"}]"#);
    }

    #[test]
    fn test_default_profanity_action_and_bearer() {
        let options = RequestOptions {
            authentication: Some(Authentication::BearerToken("token".to_string())),
            ..RequestOptions::default()
        };
        let factory =
            RequestFactory::new(BaseUrl::Global.as_str(), Language::English, &[Language::Italian], &options)
                .unwrap();
        let request = factory.create("[]".to_string(), "t");
        assert!(request.url.contains("profanityAction=NoAction"));
        assert_eq!(request.header("Authorization"), Some("Bearer token"));
    }

    #[test]
    fn test_each_batch_gets_its_own_trace_id() {
        let factory = RequestFactory::new(
            BaseUrl::Global.as_str(),
            Language::English,
            &[Language::Italian],
            &RequestOptions::default(),
        )
        .unwrap();
        let first = factory.create("[]".to_string(), "a");
        let second = factory.create("[]".to_string(), "b");
        assert_eq!(first.header("X-ClientTraceId"), Some("a"));
        assert_eq!(second.header("X-ClientTraceId"), Some("b"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RequestFactory::new(
            "not a url",
            Language::English,
            &[Language::Italian],
            &RequestOptions::default(),
        );
        assert!(matches!(result, Err(TranslationError::InvalidConfiguration(_))));
    }
}
