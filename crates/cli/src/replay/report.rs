//! Replay statistics and end-of-run report.

use std::time::Duration;

use observability::DashboardStats;

use super::Dashboard;

/// Statistics from a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// Per-message and per-frame counters
    pub dashboard: DashboardStats,

    /// Wall time of the run
    pub duration: Duration,

    /// Stopped by a shutdown signal before the recording ended
    pub interrupted: bool,
}

impl ReplayStats {
    /// Records rendered per second
    pub fn records_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.dashboard.records as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Replay Statistics                         ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        let summary = self.dashboard.summary();

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Messages: {}", summary.messages);
        println!("   ├─ Records rendered: {}", summary.records);
        println!("   ├─ Records/s: {:.2}", self.records_per_sec());
        println!("   └─ Interrupted: {}", if self.interrupted { "yes" } else { "no" });

        println!("\n📈 Stream");
        println!("   ├─ Upstream disconnects: {}", summary.upstream_disconnects);
        println!(
            "   ├─ Malformed frames: {} ({:.2}%)",
            summary.malformed, summary.malformed_rate
        );
        println!("   ├─ Dropped (not open): {}", summary.dropped);
        println!("   └─ Fields per record: {}", summary.fields_per_record);

        println!("\n📡 Lidar");
        println!("   ├─ Frames painted: {}", summary.lidar_frames);
        println!("   └─ Clustered points: {}", summary.clustered_per_frame);

        println!();
    }
}

/// Print the final state of every widget, the status slot and the camera
///
/// After close or error the widgets show placeholders, so this is mostly
/// useful to confirm remediation ran.
pub fn print_dashboard(session: &Dashboard) {
    let metrics = session.metrics();
    let live = metrics.widgets().filter(|(_, w)| !w.is_placeholder()).count();
    println!("🧭 Widgets ({} of {} showing values)", live, metrics.widgets().count());
    for (key, widget) in metrics.widgets() {
        let style = widget.style().map_or("", |style| style.css_class());
        println!(
            "   {:<16} {:<24} {:<10} ({} updates)",
            key.as_str(),
            widget.text(),
            style,
            widget.updates()
        );
    }

    let status = session.status_slot();
    println!(
        "\n💬 Status [{}] ({} updates)",
        status.severity().css_class(),
        status.changes()
    );
    println!("   {}", status.message());

    let camera = session.camera().view();
    println!("\n📷 Camera [{:?}]", session.camera().state());
    println!(
        "   ├─ Toggle: {} ({})",
        camera.toggle_label(),
        if camera.toggle_enabled() { "enabled" } else { "disabled" }
    );
    println!("   ├─ Sink: {}", camera.sink().unwrap_or("-"));
    println!("   ├─ Placeholder: {}", camera.placeholder().unwrap_or("-"));
    println!("   └─ Status: {}", camera.status());

    let lidar = session.animation();
    let canvas = lidar.surface();
    println!(
        "\n📡 Last lidar frame ({} points, {}x{} cells)",
        lidar.last_frame().map_or(0, |frame| frame.points.len()),
        canvas.cols(),
        canvas.rows()
    );
    println!("{}", canvas.render());
}
