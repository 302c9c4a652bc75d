//! 脏话处理模块
//!
//! 服务端负责识别和删除/标记脏话；客户端只在 `Marked` 模式下，
//! 把服务返回的 `<profanity>` 标记替换为调用方提供的文本。

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// 脏话处理方式，与服务的 `profanityAction` 参数一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfanityAction {
    #[default]
    NoAction,
    Deleted,
    Marked,
}

impl ProfanityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfanityAction::NoAction => "NoAction",
            ProfanityAction::Deleted => "Deleted",
            ProfanityAction::Marked => "Marked",
        }
    }
}

/// 被标记短语的替换函数
pub type Replacer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// 脏话过滤器
///
/// # 示例
///
/// ```rust
/// use batch_translator::ProfanityFilter;
///
/// let filter = ProfanityFilter::marked(Some(|_: &str| "***".to_string()));
/// assert_eq!(filter.apply("a <profanity>bad</profanity> word"), "a *** word");
/// ```
#[derive(Clone, Default)]
pub struct ProfanityFilter {
    action: ProfanityAction,
    replacer: Option<Replacer>,
}

impl ProfanityFilter {
    pub fn none() -> Self {
        Self::default()
    }

    /// 服务端删除脏话，客户端不做处理
    pub fn deleted() -> Self {
        Self {
            action: ProfanityAction::Deleted,
            replacer: None,
        }
    }

    /// 服务端标记脏话
    ///
    /// 没有替换函数时服务端直接用星号替换；有替换函数时服务端用标签包裹，
    /// 由 `apply` 调用替换函数。
    pub fn marked<F>(replacer: Option<F>) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            action: ProfanityAction::Marked,
            replacer: replacer.map(|f| Arc::new(f) as Replacer),
        }
    }

    pub fn action(&self) -> ProfanityAction {
        self.action
    }

    /// 请求需要携带的 `profanityAction` / `profanityMarker` 参数
    pub fn query_params(&self) -> Vec<(&'static str, &'static str)> {
        let mut params = vec![("profanityAction", self.action.as_str())];
        if self.action == ProfanityAction::Marked {
            let marker = if self.replacer.is_some() { "Tag" } else { "Asterisk" };
            params.push(("profanityMarker", marker));
        }
        params
    }

    pub fn apply(&self, message: &str) -> String {
        match (&self.action, &self.replacer) {
            (ProfanityAction::Marked, Some(replacer)) => profanity_tag()
                .replace_all(message, |caps: &Captures<'_>| replacer(&caps[1]))
                .into_owned(),
            _ => message.to_string(),
        }
    }
}

impl fmt::Debug for ProfanityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfanityFilter")
            .field("action", &self.action)
            .field("replacer", &self.replacer.is_some())
            .finish()
    }
}

fn profanity_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| match Regex::new(r"<profanity>([^<]+)</profanity>") {
        Ok(re) => re,
        Err(e) => unreachable!("profanity pattern is valid: {}", e),
    })
}
