//! 翻译器核心模块
//!
//! 逐条接收消息，攒满一个批次后发送，并把每条译文连同调用方的关联状态交还给回调。

use crate::client::{Client, Translations};
use crate::error::Result;
use crate::format::MessageFormat;
use crate::language::Language;
use crate::messages::Messages;
use crate::profanity::ProfanityFilter;
use std::collections::HashMap;
use tracing::{debug, info};

/// 一条已经处理完成的译文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation<S> {
    /// 经过脏话过滤和占位符还原的译文
    pub message: String,
    /// 目标语言
    pub language: Language,
    /// 所属批次的追踪ID
    pub trace_id: String,
    /// 提交消息时附带的关联状态
    pub state: S,
}

/// 译文回调
pub type OnTranslate<S> = Box<dyn FnMut(Translation<S>) + Send>;

/// 翻译器
///
/// 维护一个消息批次，批次放不下新消息或调用 `finish` 时发送请求。
/// 批次按顺序逐个发送；同一个翻译器不支持并发会话，需要并行时为每个任务创建独立的翻译器。
///
/// 每条消息的关联状态会在每个目标语言的译文中各返回一次，因此要求 `S: Clone`。
///
/// # 示例
///
/// ```rust,no_run
/// use batch_translator::{Language, TranslatorBuilder};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut translator = TranslatorBuilder::new()
///         .with_languages(vec![Language::French, Language::Italian], Language::English)
///         .with_subscription_key("key")
///         .with_subscription_region("westeurope")
///         .with_placeholders("{", "}")?
///         .build(|translation| {
///             println!("{} [{}]: {}", translation.state, translation.language, translation.message);
///         })?;
///
///     translator.submit("Hello {name}", 1u32).await?;
///     translator.submit("Goodbye {name}", 2u32).await?;
///     translator.finish().await?;
///     Ok(())
/// }
/// ```
pub struct Translator<S> {
    client: Client,
    messages: Messages<S>,
    format: Box<dyn MessageFormat>,
    profanity: ProfanityFilter,
    on_translate: OnTranslate<S>,
}

impl<S: Clone> Translator<S> {
    pub fn new(
        client: Client,
        messages: Messages<S>,
        format: Box<dyn MessageFormat>,
        profanity: ProfanityFilter,
        on_translate: OnTranslate<S>,
    ) -> Self {
        Self {
            client,
            messages,
            format,
            profanity,
            on_translate,
        }
    }

    /// 提交一条消息
    ///
    /// 超过字符上限的消息直接返回 `MessageTooLong`；批次放不下时先发送当前批次。
    pub async fn submit(&mut self, message: &str, state: S) -> Result<()> {
        let encoded = self.format.to_wire(message);
        self.messages.validate(&encoded)?;

        if !self.messages.can_accept(&encoded) {
            self.flush().await?;
        }

        self.messages.add(encoded, state)
    }

    /// 结束当前会话，发送剩余的消息
    ///
    /// 无论成功与否，返回时批次都是空的。
    pub async fn finish(&mut self) -> Result<()> {
        self.flush().await
    }

    /// 翻译一组消息并结束会话
    ///
    /// 与 `submit` 相同，某条消息出错时立即返回，之前已接受但尚未发送的消息
    /// 留在批次中，可以继续提交或调用 `finish` 发送。
    pub async fn translate_all<I, T>(&mut self, messages: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, S)>,
        T: AsRef<str>,
    {
        for (message, state) in messages {
            self.submit(message.as_ref(), state).await?;
        }
        self.finish().await
    }

    /// 每个追踪ID对应的服务用量
    pub fn metered_usage(&self) -> &HashMap<String, Vec<String>> {
        self.client.metered_usage()
    }

    /// 取出并清空已记录的服务用量
    pub fn take_metered_usage(&mut self) -> HashMap<String, Vec<String>> {
        self.client.take_metered_usage()
    }

    /// 当前批次中等待发送的消息数
    pub fn pending(&self) -> usize {
        self.messages.len()
    }

    /// 发送当前批次
    ///
    /// 出错时不会重试，批次内容被丢弃，错误原样返回给调用方。
    /// 批次在发送前就已从缓冲区取出，future 中途被取消时缓冲区同样是空的。
    async fn flush(&mut self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }

        let mut batch = self.messages.take();
        info!("开始翻译批次: {} 条消息", batch.len());
        let translations = self.client.translate(&mut batch).await?;
        self.deliver(&batch, translations)
    }

    fn deliver(&mut self, batch: &Messages<S>, translations: Translations) -> Result<()> {
        for raw in translations {
            let language = match raw.language.parse::<Language>() {
                Ok(language) => language,
                Err(_) => {
                    debug!("跳过未知语言代码: {}", raw.language);
                    continue;
                }
            };
            let state = batch.get(raw.position)?.clone();
            let filtered = self.profanity.apply(&raw.text);
            let message = self.format.from_wire(&filtered);

            (self.on_translate)(Translation {
                message,
                language,
                trace_id: raw.trace_id,
                state,
            });
        }
        Ok(())
    }
}
