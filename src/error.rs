//! 错误类型

/// 卡片流错误
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CardFlowError {
    /// 配置值非法（setter 拒绝该值，原配置保持不变）
    #[error("invalid configuration: {field} {reason}")]
    Configuration {
        field: &'static str,
        reason: String,
    },

    /// 数据源违反约定（编程错误，不做恢复）
    #[error("data source contract violated at index {index} (card count {count})")]
    ProviderContractViolation { index: usize, count: usize },

    /// 配置 JSON 解析失败
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// 配置文件读取失败
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}

impl CardFlowError {
    pub(crate) fn configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ProviderContractViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, CardFlowError>;
