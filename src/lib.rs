//! # Batch Translator
//!
//! 一个批量翻译客户端库：把逐条提交的短消息攒成批次，在服务限制内一次请求翻译，
//! 再把每条译文连同调用方的关联状态交还给回调。
//!
//! ## 主要特性
//!
//! - **批次管理**: 遵守服务的批次上限（1000条消息 / 50000字符），放不下时自动发送
//! - **位置关联**: 请求顺序即关联键，译文按位置找回提交时的关联状态
//! - **占位符保护**: 起止标记之间的内容不会被翻译，收到译文后原样还原
//! - **脏话处理**: 支持服务端删除、星号标记或自定义替换
//! - **追踪ID**: 每个批次带有追踪ID，可自定义生成方式，并记录服务用量
//! - **配置灵活**: 支持TOML配置文件和程序化配置
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use batch_translator::{Language, TranslatorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut translator = TranslatorBuilder::new()
//!         .with_languages(vec![Language::Spanish, Language::Italian], Language::English)
//!         .with_subscription_key("your-key")
//!         .with_placeholders("{", "}")?
//!         .build(|translation| {
//!             println!("#{} {}: {}", translation.state, translation.language, translation.message);
//!         })?;
//!
//!     translator
//!         .translate_all(vec![("Message {name} 1", 1), ("Message {name} 2", 2)])
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## 配置文件支持
//!
//! ```toml
//! [translator]
//! from_lang = "en"
//! to_langs = ["es", "it"]
//! message_limit = 1000
//! character_limit = 50000
//! subscription_key = "your-key"
//! profanity_action = "NoAction"
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod language;
pub mod messages;
pub mod profanity;
pub mod request;
pub mod trace;
pub mod transport;
pub mod translator;
pub mod types;

pub use builder::TranslatorBuilder;
pub use client::{Client, RawTranslation, Translations};
pub use config::TranslationLibConfig;
pub use error::{Result, TranslationError};
pub use format::{MessageFormat, Passthrough, PlaceholderFormat};
pub use language::Language;
pub use messages::{Messages, MAX_CHARACTERS, MAX_MESSAGES};
pub use profanity::{ProfanityAction, ProfanityFilter};
pub use request::{Authentication, BaseUrl, RequestFactory, RequestOptions};
pub use trace::{random_trace_id, TraceIdFn, TraceIdGenerator};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use translator::{Translation, Translator};
pub use types::{PlaceholderMarkers, TranslatorConfig};
