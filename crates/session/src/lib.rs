//! # Session
//!
//! 连接生命周期编排器。
//!
//! 负责：
//! - 连接状态机 (Connecting -> Open -> Closed / Errored)
//! - 将消息转发给指标渲染器
//! - 连接失败时统一清理：重置指标、停止摄像头、取消点云动画
//!
//! ## 使用示例
//!
//! ```ignore
//! use session::ConnectionState;
//!
//! let mut session = ConnectionState::new(renderer, camera, lidar, status, messages);
//!
//! session.on_open()?;
//! session.decode_and_dispatch(r#"{"rpm": 2731}"#);
//! session.on_close();
//! ```

mod error;
mod state;

pub use error::SessionError;
pub use state::{ConnectionState, MessageOutcome};
