//! 消息格式模块
//!
//! 在发送前把调用方的占位符转换为服务不会翻译的标记，收到译文后再还原。

use crate::error::{Result, TranslationError};
use regex::{Captures, Regex};

/// 服务识别的“不翻译”标记
pub const TAG_VAR_OPEN: &str = r#"<t:var class="notranslate">"#;
pub const TAG_VAR_CLOSE: &str = "</t:var>";

/// 消息格式转换
///
/// `to_wire` 在发送前调用，`from_wire` 在收到译文后调用。
/// 在服务不修改标记内容的前提下，`from_wire(to_wire(x)) == x`。
pub trait MessageFormat: Send + Sync {
    fn to_wire(&self, message: &str) -> String;

    fn from_wire(&self, content: &str) -> String;
}

/// 不做任何转换的默认格式
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl MessageFormat for Passthrough {
    fn to_wire(&self, message: &str) -> String {
        message.to_string()
    }

    fn from_wire(&self, content: &str) -> String {
        content.to_string()
    }
}

/// 占位符保护格式
///
/// 把起止标记之间的内容（非贪婪匹配，不跨行）转义后包进 `<t:var>` 标记，
/// 译文中的 `<t:var>` 再还原为原始占位符。
///
/// 还原时不区分标记的来源：消息原文中本来就有的 `<t:var …>x</t:var>`
/// 同样会被还原为 `{x}`，这类消息不满足往返不变。
///
/// # 示例
///
/// ```rust
/// use batch_translator::{MessageFormat, PlaceholderFormat};
///
/// let format = PlaceholderFormat::new("{", "}").unwrap();
/// let wire = format.to_wire("Hello {name}");
/// assert_eq!(wire, r#"Hello <t:var class="notranslate">name</t:var>"#);
/// assert_eq!(format.from_wire(&wire), "Hello {name}");
/// ```
#[derive(Debug, Clone)]
pub struct PlaceholderFormat {
    start: String,
    end: String,
    placeholder: Regex,
    tag: Regex,
}

impl PlaceholderFormat {
    pub fn new(start: &str, end: &str) -> Result<Self> {
        if start.is_empty() || end.is_empty() {
            return Err(TranslationError::InvalidConfiguration(
                "Placeholder markers cannot be empty".to_string(),
            ));
        }

        let pattern = format!("{}(.*?){}", regex::escape(start), regex::escape(end));
        let placeholder = Regex::new(&pattern)
            .map_err(|e| TranslationError::InvalidConfiguration(e.to_string()))?;
        let tag = Regex::new(r"<t:var [^>]+>([^<]*)</t:var>")
            .map_err(|e| TranslationError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            placeholder,
            tag,
        })
    }

    pub fn markers(&self) -> (&str, &str) {
        (self.start.as_str(), self.end.as_str())
    }
}

impl MessageFormat for PlaceholderFormat {
    fn to_wire(&self, message: &str) -> String {
        self.placeholder
            .replace_all(message, |caps: &Captures<'_>| {
                format!("{}{}{}", TAG_VAR_OPEN, escape(&caps[1]), TAG_VAR_CLOSE)
            })
            .into_owned()
    }

    fn from_wire(&self, content: &str) -> String {
        self.tag
            .replace_all(content, |caps: &Captures<'_>| {
                format!("{}{}{}", self.start, unescape(&caps[1]), self.end)
            })
            .into_owned()
    }
}

fn escape(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for ch in content.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape(content: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
    ];

    let mut unescaped = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(index) = rest.find('&') {
        unescaped.push_str(&rest[..index]);
        rest = &rest[index..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                unescaped.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}
