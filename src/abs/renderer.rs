//! Draw-call submission and per-frame statistics.
//!
//! The [`Renderer`] issues draw calls against whatever vertex array is
//! currently bound; binding is the caller's responsibility. Statistics are
//! submitted as a snapshot and published once per frame by [`Renderer::update`];
//! publishing never accumulates across frames.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;
use serde::Deserialize;

use crate::abs::IndexType;

/// Primitive topology of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Triangles,
    Lines,
    Points,
}

impl PrimitiveType {
    fn gl_mode(self) -> u32 {
        match self {
            PrimitiveType::Triangles => glow::TRIANGLES,
            PrimitiveType::Lines => glow::LINES,
            PrimitiveType::Points => glow::POINTS,
        }
    }
}

/// Aggregated counters for one frame's rendering, read by the editor
/// overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererStatistics {
    pub draw_calls: u32,
    pub triangle_count: u32,
    pub vertex_count: u32,
}

impl RendererStatistics {
    pub const VERTICES_PER_TRIANGLE: u32 = 3;

    /// Statistics for a single indexed draw over the given geometry.
    pub fn single_draw(vertex_count: u32, index_count: u32) -> Self {
        Self {
            draw_calls: 1,
            triangle_count: index_count / Self::VERTICES_PER_TRIANGLE,
            vertex_count,
        }
    }
}

/// Submitted/published statistics pair. `publish` copies the latest
/// submitted snapshot; it never adds to the previous one.
#[derive(Debug, Clone, Copy, Default)]
struct StatsTracker {
    submitted: RendererStatistics,
    published: RendererStatistics,
}

impl StatsTracker {
    fn submit(&mut self, stats: RendererStatistics) {
        self.submitted = stats;
    }

    fn publish(&mut self) {
        self.published = self.submitted;
    }

    fn current(&self) -> RendererStatistics {
        self.published
    }
}

/// Issues clears and draw calls against the currently bound target.
pub struct Renderer {
    gl: Arc<glow::Context>,
    stats: StatsTracker,
}

impl Renderer {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            stats: StatsTracker::default(),
        }
    }

    /// Sets the persistent clear color.
    pub fn set_clear_color(&self, color: Vec3) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, 1.0);
        }
    }

    /// Clears color and depth of the currently bound target. Call after
    /// binding the framebuffer and before any draw call of the frame.
    pub fn clear(&self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Issues exactly one indexed draw call against the currently bound
    /// vertex array. The vertex array and any textures it samples must be
    /// bound before this is called.
    pub fn render(&self, primitive: PrimitiveType, count: i32, index_type: IndexType) {
        unsafe {
            self.gl
                .draw_elements(primitive.gl_mode(), count, index_type.gl_type(), 0);
        }
    }

    /// Replaces the tracked statistics snapshot.
    pub fn submit_stats(&mut self, stats: RendererStatistics) {
        self.stats.submit(stats);
    }

    /// Publishes the latest submitted statistics for this frame.
    pub fn update(&mut self) {
        self.stats.publish();
    }

    /// The statistics published by the last [`Renderer::update`].
    pub fn stats(&self) -> RendererStatistics {
        self.stats.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_geometry_counts_as_two_triangles() {
        let stats = RendererStatistics::single_draw(4, 6);
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 4);
    }

    #[test]
    fn publish_exposes_the_latest_submitted_snapshot() {
        let mut tracker = StatsTracker::default();
        tracker.submit(RendererStatistics::single_draw(4, 6));
        tracker.submit(RendererStatistics::single_draw(3, 3));
        tracker.publish();
        assert_eq!(tracker.current(), RendererStatistics::single_draw(3, 3));
    }

    #[test]
    fn publish_never_accumulates_across_frames() {
        let mut tracker = StatsTracker::default();
        tracker.submit(RendererStatistics::single_draw(4, 6));
        tracker.publish();
        tracker.publish();
        let stats = tracker.current();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangle_count, 2);
    }

    #[test]
    fn stats_are_empty_until_published() {
        let mut tracker = StatsTracker::default();
        tracker.submit(RendererStatistics::single_draw(4, 6));
        assert_eq!(tracker.current(), RendererStatistics::default());
        tracker.publish();
        assert_eq!(tracker.current().vertex_count, 4);
    }
}
