use std::fmt;
use std::time::{Duration, Instant};

use crate::render::GlobalParams;
use crate::scene::SceneState;

/// Assembles the shared frame uniforms from the scene state.
pub fn global_params(state: &SceneState, aspect: f32) -> GlobalParams {
    GlobalParams {
        projection: state.camera.projection_matrix(aspect),
        view: state.camera.view_matrix(),
        global_rotation: state.global_rotation(),
        camera_position: state.camera.eye,
        light_position: state.light.position,
        light_color: state.light.color,
        spot_direction: state.light.spot_direction,
        spot_cutoff: state.light.spot_cutoff,
        light_on: state.light.light_on,
        tint_on: state.light.tint_on,
        spot_on: state.light.spot_on,
        normal_debug: state.light.normal_debug,
    }
}

/// Wall-clock frame timing, reported at a readable cadence.
#[derive(Debug)]
pub struct FrameStats {
    last_frame: Instant,
    last_report: Instant,
}

/// One observability sample: frame delta and derived frames per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame_time: Duration,
    pub fps: f32,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {:.1} ms | {:.1} fps",
            self.frame_time.as_secs_f32() * 1000.0,
            self.fps
        )
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    const REPORT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
        }
    }

    /// Marks the end of a frame; returns a sample when a report is due.
    pub fn end_frame(&mut self) -> Option<FrameReport> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<FrameReport> {
        let frame_time = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        if now.saturating_duration_since(self.last_report) < Self::REPORT_INTERVAL {
            return None;
        }
        self.last_report = now;
        Some(FrameReport {
            frame_time,
            fps: 1.0 / frame_time.as_secs_f32().max(1e-6),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn params_mirror_the_scene_state() {
        let mut state = SceneState::new();
        state.light.position = Vec3::new(1.0, 2.0, 3.0);
        state.light.spot_on = true;
        let params = global_params(&state, 16.0 / 9.0);
        assert_eq!(params.camera_position, state.camera.eye);
        assert_eq!(params.light_position, Vec3::new(1.0, 2.0, 3.0));
        assert!(params.spot_on);
        assert_eq!(params.view, state.camera.view_matrix());
    }

    #[test]
    fn reports_come_at_the_report_interval() {
        let mut stats = FrameStats::new();
        let start = stats.last_frame;
        assert!(stats.tick_at(start + Duration::from_millis(16)).is_none());
        let report = stats
            .tick_at(start + Duration::from_millis(600))
            .expect("report is overdue");
        // Frame delta is measured against the previous frame, not the
        // previous report.
        assert_eq!(report.frame_time, Duration::from_millis(584));
        assert!((report.fps - 1000.0 / 584.0).abs() < 0.1);
    }

    #[test]
    fn report_renders_human_readable() {
        let report = FrameReport {
            frame_time: Duration::from_millis(16),
            fps: 62.5,
        };
        assert_eq!(report.to_string(), "frame 16.0 ms | 62.5 fps");
    }
}
