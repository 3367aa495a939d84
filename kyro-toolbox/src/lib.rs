//! Network helpers for the Kyro failover engine
//!
//! 提供故障转移引擎所需的网络工具函数：DoH 解析（系统解析器兜底）、TCP/ICMP 探测、
//! 节点地理位置标签。所有功能无状态，独立于 DNS 业务逻辑。

mod error;
mod services;

pub use error::{ToolboxError, ToolboxResult};
pub use services::ToolboxService;
