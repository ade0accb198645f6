/// Animation driver: time-based interpolation over planned segments.
///
/// Time is passed in explicitly as a `Duration` since some caller-chosen epoch, so every
/// function here is testable without a real clock.
use crate::motion::AnimationState;
use crate::scene_object::Position;
use constants::motion::EXPIRY_GRACE_MS;
use std::collections::HashSet;
use std::time::Duration;

/// Position of the pallet `elapsed` after the animation started.
///
/// Linear within the active segment, exact at segment boundaries and clamped to the final
/// end position once the animation is over. An empty segment list sits at the origin.
pub fn position_at(state: &AnimationState, elapsed: Duration) -> Position {
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let mut segment_start_ms = 0.0;

    for segment in &state.segments {
        let duration_ms = segment.duration_ms as f64;
        if elapsed_ms <= segment_start_ms + duration_ms {
            let t = if duration_ms > 0.0 {
                ((elapsed_ms - segment_start_ms) / duration_ms).clamp(0.0, 1.0) as f32
            } else {
                1.0
            };
            if t >= 1.0 {
                return segment.end_position;
            }
            return lerp(segment.start_position, segment.end_position, t);
        }
        segment_start_ms += duration_ms;
    }

    state.end_position().unwrap_or([0.0; 3])
}

fn lerp(from: Position, to: Position, t: f32) -> Position {
    let s = 1.0 - t;
    [
        from[0] * s + to[0] * t,
        from[1] * s + to[1] * t,
        from[2] * s + to[2] * t,
    ]
}

/// Polyline through every segment endpoint, for drawing the planned path.
pub fn trace_path(state: &AnimationState) -> Vec<Position> {
    state
        .start_position()
        .into_iter()
        .chain(state.segments.iter().map(|s| s.end_position))
        .collect()
}

/// An animation and the instant it was started.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAnimation {
    pub state: AnimationState,
    pub started_at: Duration,
}

impl ActiveAnimation {
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    pub fn position(&self, now: Duration) -> Position {
        position_at(&self.state, self.elapsed(now))
    }

    /// The visual clip has reached its final position.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.state.total_duration()
    }

    /// Past the grace period and due for removal.
    pub fn is_expired(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.state.total_duration() + Duration::from_millis(EXPIRY_GRACE_MS)
    }
}

/// Animations currently in flight, in start order.
#[derive(Debug, Clone, Default)]
pub struct ActiveAnimations {
    entries: Vec<ActiveAnimation>,
}

impl ActiveAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, state: AnimationState, now: Duration) {
        tracing::debug!(animation = %state.id, pallet = %state.pallet_id, "animation started");
        self.entries.push(ActiveAnimation {
            state,
            started_at: now,
        });
    }

    /// Removes and returns every animation whose grace period has run out.
    pub fn tick(&mut self, now: Duration) -> Vec<AnimationState> {
        let (expired, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.is_expired(now));
        self.entries = active;

        for entry in &expired {
            tracing::debug!(animation = %entry.state.id, "animation retired");
        }
        expired.into_iter().map(|entry| entry.state).collect()
    }

    /// Current `(pallet id, position)` for every active animation.
    pub fn positions(&self, now: Duration) -> Vec<(String, Position)> {
        self.entries
            .iter()
            .map(|entry| (entry.state.pallet_id.clone(), entry.position(now)))
            .collect()
    }

    pub fn clip_finished(&self, animation_id: &str, now: Duration) -> bool {
        self.get(animation_id)
            .is_some_and(|entry| entry.is_finished(now))
    }

    pub fn get(&self, animation_id: &str) -> Option<&ActiveAnimation> {
        self.entries.iter().find(|entry| entry.state.id == animation_id)
    }

    pub fn is_animating(&self, pallet_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.state.pallet_id == pallet_id)
    }

    pub fn animating_pallet_ids(&self) -> HashSet<String> {
        self.entries
            .iter()
            .map(|entry| entry.state.pallet_id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveAnimation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
