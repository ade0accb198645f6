/// Fixed-rate sampling of a planned animation, for offline inspection.
use crate::animation::position_at;
use crate::motion::AnimationState;
use crate::scene_object::Position;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectorySample {
    pub time_ms: u64,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    pub animation: AnimationState,
    pub fps: u32,
    pub samples: Vec<TrajectorySample>,
}

/// Timestamps at `fps` from 0 through the total duration. The final timestamp is always
/// exactly the total, so the last sample lands on the drop-off point.
pub fn sample_times(total_duration_ms: u64, fps: u32) -> Vec<u64> {
    let fps = u64::from(fps.max(1));
    let frames = total_duration_ms * fps / 1000;
    let mut times: Vec<u64> = (0..=frames).map(|frame| frame * 1000 / fps).collect();
    if times.last() != Some(&total_duration_ms) {
        times.push(total_duration_ms);
    }
    times
}

/// Samples `state`, calling `on_sample` after each sample (progress reporting).
pub fn sample_trajectory_with<F: FnMut(usize)>(
    state: &AnimationState,
    fps: u32,
    mut on_sample: F,
) -> Trajectory {
    let samples = sample_times(state.total_duration_ms, fps)
        .into_iter()
        .enumerate()
        .map(|(index, time_ms)| {
            let sample = TrajectorySample {
                time_ms,
                position: position_at(state, Duration::from_millis(time_ms)),
            };
            on_sample(index);
            sample
        })
        .collect();

    Trajectory {
        animation: state.clone(),
        fps,
        samples,
    }
}

pub fn sample_trajectory(state: &AnimationState, fps: u32) -> Trajectory {
    sample_trajectory_with(state, fps, |_| {})
}
