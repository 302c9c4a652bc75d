//! 消息批次模块
//!
//! 保存等待发送的消息及其关联状态，并执行服务端规定的批次上限：
//! 单个批次最多1000条消息、合计最多50000个字符。

use crate::error::{Result, TranslationError};
use crate::types::RequestItem;

/// 单个批次的最大消息数（服务上限）
pub const MAX_MESSAGES: usize = 1000;

/// 单个批次的最大字符数（服务上限）
pub const MAX_CHARACTERS: usize = 50_000;

/// 批次中的一条消息
#[derive(Debug)]
struct PendingMessage<S> {
    text: String,
    state: S,
}

/// 消息批次
///
/// 按插入顺序保存 `(文本, 关联状态)`，插入位置就是请求与响应之间唯一的关联键。
/// 每次成功发送后清空并复用，位置从0重新开始。
///
/// 字符数按 Unicode 字符计算，而不是字节数。
///
/// # 示例
///
/// ```rust
/// use batch_translator::Messages;
///
/// let mut messages = Messages::new(2, 100).unwrap();
/// messages.add("Hello".to_string(), 1).unwrap();
/// messages.add("World".to_string(), 2).unwrap();
///
/// assert!(!messages.can_accept("Again"));
/// assert_eq!(messages.character_count(), 10);
/// assert_eq!(*messages.get(1).unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct Messages<S> {
    items: Vec<PendingMessage<S>>,
    message_limit: usize,
    character_limit: usize,
    character_count: usize,
}

impl<S> Messages<S> {
    /// 创建新的消息批次
    ///
    /// 上限只能在服务上限以内向下调整，超出 `[1, MAX_*]` 返回 `InvalidConfiguration`。
    pub fn new(message_limit: usize, character_limit: usize) -> Result<Self> {
        if !(1..=MAX_MESSAGES).contains(&message_limit) {
            return Err(TranslationError::InvalidConfiguration(format!(
                "Message limit must be between 1 and {}, got {}",
                MAX_MESSAGES, message_limit
            )));
        }
        if !(1..=MAX_CHARACTERS).contains(&character_limit) {
            return Err(TranslationError::InvalidConfiguration(format!(
                "Character limit must be between 1 and {}, got {}",
                MAX_CHARACTERS, character_limit
            )));
        }

        Ok(Self {
            items: Vec::new(),
            message_limit,
            character_limit,
            character_count: 0,
        })
    }

    /// 检查单条消息是否超过字符上限
    pub fn validate(&self, text: &str) -> Result<()> {
        let length = text.chars().count();
        if length > self.character_limit {
            return Err(TranslationError::MessageTooLong {
                length,
                limit: self.character_limit,
            });
        }
        Ok(())
    }

    /// 当前批次能否容纳这条消息，不修改批次
    pub fn can_accept(&self, text: &str) -> bool {
        self.items.len() + 1 <= self.message_limit
            && self.character_count + text.chars().count() <= self.character_limit
    }

    /// 添加一条消息
    ///
    /// 先检查 `MessageTooLong`，再检查 `CapacityExceeded`；失败时批次保持不变。
    pub fn add(&mut self, text: String, state: S) -> Result<()> {
        self.validate(&text)?;
        if !self.can_accept(&text) {
            return Err(TranslationError::CapacityExceeded);
        }

        self.character_count += text.chars().count();
        self.items.push(PendingMessage { text, state });
        Ok(())
    }

    /// 按位置读取关联状态
    pub fn get(&self, position: usize) -> Result<&S> {
        self.items
            .get(position)
            .map(|item| &item.state)
            .ok_or(TranslationError::IndexOutOfRange {
                position,
                len: self.items.len(),
            })
    }

    /// 序列化为请求体 `[{"Text": ...}, ...]`，顺序与插入顺序一致
    pub fn to_request_body(&self) -> Result<String> {
        let body: Vec<RequestItem<'_>> = self
            .items
            .iter()
            .map(|item| RequestItem { text: &item.text })
            .collect();
        Ok(serde_json::to_string(&body)?)
    }

    /// 释放原文
    ///
    /// 请求体序列化之后原文不再需要，立即释放以降低内存峰值；关联状态保留。
    /// 字符计数保持不变，直到 `clear` 为止。
    pub fn release_sources(&mut self) {
        for item in &mut self.items {
            drop(std::mem::take(&mut item.text));
        }
    }

    /// 取出当前批次，原位置留下一个上限相同的空批次
    pub fn take(&mut self) -> Messages<S> {
        let empty = Messages {
            items: Vec::new(),
            message_limit: self.message_limit,
            character_limit: self.character_limit,
            character_count: 0,
        };
        std::mem::replace(self, empty)
    }

    /// 清空批次
    pub fn clear(&mut self) {
        self.items.clear();
        self.character_count = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn message_limit(&self) -> usize {
        self.message_limit
    }

    pub fn character_limit(&self) -> usize {
        self.character_limit
    }
}
