//! 错误处理模块
//!
//! 定义翻译库中使用的错误类型和错误处理机制。

use thiserror::Error;

/// 翻译错误类型
///
/// 包含批处理、请求构造、网络传输和服务响应中可能出现的各种错误情况。
///
/// # 变体说明
///
/// * `MessageTooLong` - 单条消息超过字符上限，调用方必须缩短
/// * `CapacityExceeded` - 批次已满，需要先发送再继续添加
/// * `InvalidConfiguration` - 构造时配置无效
/// * `IndexOutOfRange` - 按位置读取批次时越界
/// * `Service` - 翻译服务拒绝了整个批次
/// * `Http` / `Transport` - 网络层错误，原样向上传递
/// * `Parse` - JSON 解析错误
#[derive(Debug, Error)]
pub enum TranslationError {
    /// 单条消息超过字符上限
    #[error("Message length {length} exceeds the limit of {limit} characters")]
    MessageTooLong {
        /// 消息字符数
        length: usize,
        /// 当前字符上限
        limit: usize,
    },
    /// 批次需要先处理
    #[error("Message queue requires processing")]
    CapacityExceeded,
    /// 配置错误
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// 位置越界
    #[error("Invalid position {position} for a batch of {len} messages")]
    IndexOutOfRange {
        /// 响应中的位置
        position: usize,
        /// 批次中的消息数
        len: usize,
    },
    /// 服务返回的错误
    #[error("Service error {code} (HTTP {status}): {message}")]
    Service {
        /// HTTP 状态码
        status: u16,
        /// 服务错误代码，例如 401000
        code: i64,
        /// 错误消息
        message: String,
        /// 出错的请求字段（如果服务提供）
        target: Option<String>,
    },
    /// HTTP请求错误
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// 其他传输层错误（超时、连接断开等）
    #[error("Transport error: {0}")]
    Transport(String),
    /// 解析错误
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// 读写配置文件时的IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// 配置序列化错误
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl TranslationError {
    /// 检查错误是否是暂时性的
    ///
    /// 429/5xx 以及网络层的超时、连接失败可以在退避后重试；
    /// 400/401/403/408 等客户端错误不会自行恢复。
    pub fn is_transient(&self) -> bool {
        match self {
            TranslationError::Service { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504)
            }
            TranslationError::Http(e) => e.is_timeout() || e.is_connect(),
            TranslationError::Transport(_) => true,
            _ => false,
        }
    }
}

/// 翻译结果类型别名
///
/// 简化返回类型，使用 `TranslationError` 作为错误类型。
///
/// # 示例
///
/// ```rust
/// use batch_translator::{Result, TranslationError};
///
/// fn example_function() -> Result<String> {
///     Err(TranslationError::CapacityExceeded)
/// }
///
/// assert!(example_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16) -> TranslationError {
        TranslationError::Service {
            status,
            code: status as i64 * 1000,
            message: "failure".to_string(),
            target: None,
        }
    }

    #[test]
    fn test_transient_service_errors() {
        for status in [429, 500, 503] {
            assert!(service(status).is_transient(), "{} should be transient", status);
        }
    }

    #[test]
    fn test_permanent_service_errors() {
        for status in [400, 401, 403, 408] {
            assert!(!service(status).is_transient(), "{} should be permanent", status);
        }
    }

    #[test]
    fn test_local_errors_are_permanent() {
        assert!(!TranslationError::CapacityExceeded.is_transient());
        assert!(!TranslationError::MessageTooLong { length: 11, limit: 10 }.is_transient());
        assert!(TranslationError::Transport("timed out".into()).is_transient());
    }

    #[test]
    fn test_service_error_display() {
        let err = TranslationError::Service {
            status: 401,
            code: 401000,
            message: "auth failed".to_string(),
            target: None,
        };
        assert_eq!(err.to_string(), "Service error 401000 (HTTP 401): auth failed");
    }
}
