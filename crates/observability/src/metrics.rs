//! Dashboard 指标收集模块
//!
//! 每个子系统在状态变化时调用这里的 `record_*` 函数；
//! 没有安装 recorder 时这些调用是空操作。

use contracts::ConnectionStatus;
use metrics::{counter, gauge, histogram};

/// 记录连接状态迁移
pub fn record_connection_transition(to: ConnectionStatus) {
    counter!(
        "obd_dashboard_connection_transitions_total",
        "to" => to.as_str()
    )
    .increment(1);
    gauge!("obd_dashboard_connection_open").set(if to == ConnectionStatus::Open {
        1.0
    } else {
        0.0
    });
}

/// 记录一条入站消息 (`metrics` / `upstream_disconnected` / `dropped`)
pub fn record_message(kind: &'static str) {
    counter!("obd_dashboard_messages_total", "kind" => kind).increment(1);
}

/// 记录一次 reconcile
///
/// `rendered` 为写入格式化值的字段数，`placeholders` 为重置为占位符的字段数。
pub fn record_record_rendered(rendered: usize, placeholders: usize) {
    counter!("obd_dashboard_records_rendered_total").increment(1);
    histogram!("obd_dashboard_record_fields").record((rendered + placeholders) as f64);
    if placeholders > 0 {
        counter!("obd_dashboard_null_fields_total").increment(placeholders as u64);
    }
}

/// 记录无法解析的帧
pub fn record_malformed_frame() {
    counter!("obd_dashboard_malformed_frames_total").increment(1);
}

/// 记录所有 widget 被重置
pub fn record_widgets_reset() {
    counter!("obd_dashboard_widget_resets_total").increment(1);
}

/// 记录摄像头获取结果 (`success` / `failure` / `fallback`)
pub fn record_camera_acquisition(outcome: &'static str) {
    counter!(
        "obd_dashboard_camera_acquisitions_total",
        "outcome" => outcome
    )
    .increment(1);
}

/// 记录一帧点云绘制
pub fn record_lidar_frame(points: usize, clustered: usize) {
    counter!("obd_dashboard_lidar_frames_total").increment(1);
    gauge!("obd_dashboard_lidar_points").set(points as f64);
    histogram!("obd_dashboard_lidar_clustered_points").record(clustered as f64);
}

/// Dashboard 运行统计聚合器
///
/// 在内存中聚合一次 replay 的运行情况，便于输出摘要。
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    /// 收到的消息总数 (含被丢弃的)
    pub messages: u64,

    /// 渲染的 metrics 记录数
    pub records: u64,

    /// 上游断开信封数
    pub upstream_disconnects: u64,

    /// 无法解析的帧数
    pub malformed: u64,

    /// 因连接未打开而丢弃的消息数
    pub dropped: u64,

    /// 绘制的点云帧数
    pub lidar_frames: u64,

    /// 每条记录包含的字段数
    pub fields_per_record: RunningStats,

    /// 每帧聚簇点数
    pub clustered_per_frame: RunningStats,
}

impl DashboardStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 统计一条已渲染的记录
    pub fn record_rendered(&mut self, fields: usize) {
        self.messages += 1;
        self.records += 1;
        self.fields_per_record.push(fields as f64);
    }

    pub fn upstream_disconnected(&mut self) {
        self.messages += 1;
        self.upstream_disconnects += 1;
    }

    pub fn malformed_frame(&mut self) {
        self.messages += 1;
        self.malformed += 1;
    }

    pub fn dropped_message(&mut self) {
        self.messages += 1;
        self.dropped += 1;
    }

    pub fn lidar_frame(&mut self, clustered: usize) {
        self.lidar_frames += 1;
        self.clustered_per_frame.push(clustered as f64);
    }

    /// 生成摘要报告
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            messages: self.messages,
            records: self.records,
            upstream_disconnects: self.upstream_disconnects,
            malformed: self.malformed,
            dropped: self.dropped,
            lidar_frames: self.lidar_frames,
            malformed_rate: if self.messages > 0 {
                self.malformed as f64 / self.messages as f64 * 100.0
            } else {
                0.0
            },
            fields_per_record: StatsSummary::from(&self.fields_per_record),
            clustered_per_frame: StatsSummary::from(&self.clustered_per_frame),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 运行摘要
#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    pub messages: u64,
    pub records: u64,
    pub upstream_disconnects: u64,
    pub malformed: u64,
    pub dropped: u64,
    pub lidar_frames: u64,
    pub malformed_rate: f64,
    pub fields_per_record: StatsSummary,
    pub clustered_per_frame: StatsSummary,
}

impl std::fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dashboard Summary ===")?;
        writeln!(f, "Messages: {}", self.messages)?;
        writeln!(f, "Records rendered: {}", self.records)?;
        writeln!(f, "Upstream disconnects: {}", self.upstream_disconnects)?;
        writeln!(
            f,
            "Malformed frames: {} ({:.2}%)",
            self.malformed, self.malformed_rate
        )?;
        writeln!(f, "Dropped (not open): {}", self.dropped)?;
        writeln!(f, "Lidar frames: {}", self.lidar_frames)?;
        writeln!(f, "Fields per record: {}", self.fields_per_record)?;
        write!(f, "Clustered points per frame: {}", self.clustered_per_frame)
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计 (Welford)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
            return;
        }

        self.min = self.min.min(value);
        self.max = self.max.max(value);
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 样本方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
