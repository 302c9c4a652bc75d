//! 翻译器构建模块

use crate::client::Client;
use crate::error::{Result, TranslationError};
use crate::format::{MessageFormat, Passthrough, PlaceholderFormat};
use crate::language::Language;
use crate::messages::{Messages, MAX_CHARACTERS, MAX_MESSAGES};
use crate::profanity::{ProfanityAction, ProfanityFilter};
use crate::request::{Authentication, BaseUrl, RequestFactory, RequestOptions};
use crate::trace::{TraceIdFn, TraceIdGenerator};
use crate::translator::{Translation, Translator};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::TranslatorConfig;
use std::time::Duration;

/// 翻译器构建器
///
/// 只有目标语言是必填项；未指定传输层时使用 `ReqwestTransport`。
pub struct TranslatorBuilder {
    base_url: String,
    from: Language,
    to: Vec<Language>,
    options: RequestOptions,
    format: Option<Box<dyn MessageFormat>>,
    trace_ids: Option<Box<dyn TraceIdGenerator>>,
    profanity: ProfanityFilter,
    message_limit: usize,
    character_limit: usize,
    transport: Option<Box<dyn Transport>>,
    timeout: Duration,
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::Global.to_string(),
            from: Language::English,
            to: Vec::new(),
            options: RequestOptions::default(),
            format: None,
            trace_ids: None,
            profanity: ProfanityFilter::none(),
            message_limit: MAX_MESSAGES,
            character_limit: MAX_CHARACTERS,
            transport: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置创建构建器
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        let from = config.from_lang.parse::<Language>()?;
        let to = config
            .to_langs
            .iter()
            .map(|code| code.parse::<Language>())
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Self::new()
            .with_base_url(&config.base_url)
            .with_languages(to, from)
            .with_limits(config.message_limit, config.character_limit)
            .with_timeout(Duration::from_secs(config.request_timeout_secs));

        if let Some(key) = &config.subscription_key {
            builder = builder.with_subscription_key(key);
        }
        if let Some(token) = &config.bearer_token {
            builder = builder.with_bearer_token(token);
        }
        if let Some(region) = &config.subscription_region {
            builder = builder.with_subscription_region(region);
        }
        if let Some(resource_id) = &config.resource_id {
            builder = builder.with_resource_id(resource_id);
        }
        if let Some(markers) = &config.placeholders {
            builder = builder.with_placeholders(&markers.start, &markers.end)?;
        }
        builder = match config.profanity_action {
            ProfanityAction::NoAction => builder.without_profanity_handling(),
            ProfanityAction::Deleted => builder.with_profanity_deleted(),
            ProfanityAction::Marked => builder.with_profanity_marked(None::<fn(&str) -> String>),
        };

        Ok(builder)
    }

    /// 设置服务地址，默认为全球地址，见 `BaseUrl`
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// 设置目标语言和源语言
    pub fn with_languages(mut self, to: Vec<Language>, from: Language) -> Self {
        self.to = to;
        self.from = from;
        self
    }

    pub fn with_subscription_key(mut self, key: &str) -> Self {
        self.options.authentication = Some(Authentication::SubscriptionKey(key.to_string()));
        self
    }

    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.options.authentication = Some(Authentication::BearerToken(token.to_string()));
        self
    }

    pub fn with_subscription_region(mut self, region: &str) -> Self {
        self.options.subscription_region = Some(region.to_string());
        self
    }

    pub fn with_resource_id(mut self, resource_id: &str) -> Self {
        self.options.resource_id = Some(resource_id.to_string());
        self
    }

    pub fn with_message_format<F: MessageFormat + 'static>(mut self, format: F) -> Self {
        self.format = Some(Box::new(format));
        self
    }

    /// 使用 `PlaceholderFormat` 保护起止标记之间的内容
    pub fn with_placeholders(self, start: &str, end: &str) -> Result<Self> {
        Ok(self.with_message_format(PlaceholderFormat::new(start, end)?))
    }

    pub fn with_trace_id_generator<G: TraceIdGenerator + 'static>(mut self, generator: G) -> Self {
        self.trace_ids = Some(Box::new(generator));
        self
    }

    /// 用闭包生成追踪ID，闭包参数是默认生成器
    pub fn with_trace_id_callback<F>(self, callback: F) -> Self
    where
        F: Fn(&dyn Fn() -> String) -> String + Send + Sync + 'static,
    {
        self.with_trace_id_generator(TraceIdFn::new(callback))
    }

    /// 不处理脏话（默认）
    pub fn without_profanity_handling(mut self) -> Self {
        self.profanity = ProfanityFilter::none();
        self
    }

    /// 由服务删除脏话
    pub fn with_profanity_deleted(mut self) -> Self {
        self.profanity = ProfanityFilter::deleted();
        self
    }

    /// 由服务标记脏话
    ///
    /// 不提供替换函数时服务用星号替换；提供时用替换函数的返回值替换被标记的短语。
    pub fn with_profanity_marked<F>(mut self, replacer: Option<F>) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.profanity = ProfanityFilter::marked(replacer);
        self
    }

    /// 下调批次上限，不能超过服务上限
    pub fn with_limits(mut self, message_limit: usize, character_limit: usize) -> Self {
        self.message_limit = message_limit;
        self.character_limit = character_limit;
        self
    }

    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// 默认传输层的请求超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 按条件配置
    ///
    /// ```rust
    /// use batch_translator::TranslatorBuilder;
    ///
    /// let use_bearer = true;
    /// let builder = TranslatorBuilder::new()
    ///     .when(use_bearer, |b| b.with_bearer_token("token"));
    /// ```
    pub fn when<F>(self, condition: bool, then: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            then(self)
        } else {
            self
        }
    }

    /// 创建翻译器
    pub fn build<S, F>(self, on_translate: F) -> Result<Translator<S>>
    where
        S: Clone,
        F: FnMut(Translation<S>) + Send + 'static,
    {
        if self.to.is_empty() {
            return Err(TranslationError::InvalidConfiguration(
                "Languages must be set".to_string(),
            ));
        }
        Language::verify(&self.to, self.from)?;

        let messages = Messages::new(self.message_limit, self.character_limit)?;

        let mut options = self.options;
        options.profanity_params = self.profanity.query_params();
        let requests = RequestFactory::new(&self.base_url, self.from, &self.to, &options)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(self.timeout)?),
        };
        let client = Client::new(transport, requests, self.trace_ids);
        let format = self.format.unwrap_or_else(|| Box::new(Passthrough));

        Ok(Translator::new(
            client,
            messages,
            format,
            self.profanity,
            Box::new(on_translate),
        ))
    }
}
