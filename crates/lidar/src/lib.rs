//! # Lidar
//!
//! 模拟点云（前向扫描）动画。
//!
//! 负责：
//! - 每帧随机生成点云（无帧间状态）
//! - 绘制到注入的 `DrawingSurface`
//! - 通过注入的 `FrameScheduler` 驱动可取消的动画循环
//!
//! ## 使用示例
//!
//! ```ignore
//! use lidar::{LidarSimulator, ManualFrameScheduler};
//!
//! let mut sim = LidarSimulator::new(surface, ManualFrameScheduler::new(), config);
//! sim.start();
//!
//! // Host timer fired
//! for id in sim.scheduler_mut().take_due() {
//!     sim.on_frame(id);
//! }
//! ```

mod frame;
mod scheduler;
mod simulator;

#[cfg(test)]
mod testing;

pub use frame::{generate_frame, max_distance, paint, LidarFrame, LidarPoint};
pub use scheduler::ManualFrameScheduler;
pub use simulator::LidarSimulator;
