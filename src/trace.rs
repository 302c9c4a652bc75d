//! 追踪ID模块
//!
//! 每次批量请求都会带上一个 `X-ClientTraceId`，用于和服务端的用量、诊断信息对应。

use uuid::Uuid;

/// 追踪ID生成策略
///
/// `default` 是内置的随机生成器，实现可以包装它（例如加前缀），也可以完全替换。
pub trait TraceIdGenerator: Send + Sync {
    fn generate(&self, default: &dyn Fn() -> String) -> String;
}

/// 默认追踪ID：随机的 UUID v4
pub fn random_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// 把闭包适配为 `TraceIdGenerator`
///
/// ```rust
/// use batch_translator::{TraceIdFn, TraceIdGenerator, random_trace_id};
///
/// let generator = TraceIdFn::new(|default: &dyn Fn() -> String| format!("app-{}", default()));
/// assert!(generator.generate(&random_trace_id).starts_with("app-"));
/// ```
pub struct TraceIdFn<F>(F);

impl<F> TraceIdFn<F>
where
    F: Fn(&dyn Fn() -> String) -> String + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> TraceIdGenerator for TraceIdFn<F>
where
    F: Fn(&dyn Fn() -> String) -> String + Send + Sync,
{
    fn generate(&self, default: &dyn Fn() -> String) -> String {
        (self.0)(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_trace_id_is_uuid_v4() {
        let id = random_trace_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.len(), 36);
        assert_ne!(id, random_trace_id());
    }

    #[test]
    fn test_custom_generator_replaces_default() {
        let generator = TraceIdFn::new(|_: &dyn Fn() -> String| "custom".to_string());
        assert_eq!(generator.generate(&random_trace_id), "custom");
    }

    #[test]
    fn test_custom_generator_wraps_default() {
        let generator = TraceIdFn::new(|default: &dyn Fn() -> String| format!("batch-{}", default()));
        let id = generator.generate(&|| "fixed".to_string());
        assert_eq!(id, "batch-fixed");
    }
}
