// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Frame clock
//!
//! The clock tracks elapsed time, the delta since the previous tick and a
//! frame counter that wraps at the configured frame rate. A clock is paced
//! either by a [`TimeSource`] (the wall clock for a host, a scripted source
//! in tests) or by a [`FixedStep`] that reports the same delta every tick.

use crate::error::ConfigError;
use std::time::{Duration, Instant};

/// Monotonic time reading supplied by the host
pub trait TimeSource {
    /// Time since an arbitrary, fixed epoch
    ///
    /// Successive readings must never decrease.
    fn now(&mut self) -> Duration;
}

/// Wall-clock source backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicSource {
    epoch: Instant,
}

impl MonotonicSource {
    /// Create a source whose epoch is the moment of construction
    pub fn new() -> Self {
        MonotonicSource {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicSource {
    fn now(&mut self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Constant tick length in seconds
///
/// The step is kept as the exact `f64` the caller asked for, so every tick
/// reports that value unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    seconds: f64,
}

impl FixedStep {
    /// Create a step of `seconds`
    ///
    /// Fails for zero, negative or non-finite steps.
    pub fn new(seconds: f64) -> Result<Self, ConfigError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(ConfigError::InvalidTimestep { step: seconds });
        }
        Ok(FixedStep { seconds })
    }

    /// The step in seconds
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

enum Pacing {
    Source {
        source: Box<dyn TimeSource>,
        last: Duration,
    },
    Fixed(FixedStep),
}

/// Elapsed/delta time tracker advanced once per tick
pub struct Clock {
    pacing: Pacing,
    elapsed: f64,
    delta: f64,
    frame: u32,
    total_frames: u64,
    fps: u32,
}

impl Clock {
    /// Start a clock on the given source
    ///
    /// The first reading is taken immediately and becomes the reference
    /// for the first delta. `fps` of zero is clamped to one.
    pub fn new(mut source: Box<dyn TimeSource>, fps: u32) -> Self {
        let last = source.now();
        Self::with_pacing(Pacing::Source { source, last }, fps)
    }

    /// Clock driven by the wall clock
    pub fn monotonic(fps: u32) -> Self {
        Self::new(Box::new(MonotonicSource::new()), fps)
    }

    /// Clock that advances by exactly `step_seconds` per tick
    pub fn fixed(step_seconds: f64, fps: u32) -> Result<Self, ConfigError> {
        let step = FixedStep::new(step_seconds)?;
        Ok(Self::with_pacing(Pacing::Fixed(step), fps))
    }

    fn with_pacing(pacing: Pacing, fps: u32) -> Self {
        Clock {
            pacing,
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
            total_frames: 0,
            fps: fps.max(1),
        }
    }

    /// Advance by one tick and return the new delta in seconds
    pub fn advance(&mut self) -> f64 {
        self.delta = match &mut self.pacing {
            Pacing::Source { source, last } => {
                let reading = source.now();
                // A source that goes backwards yields a zero delta rather than a negative one.
                let delta = reading.saturating_sub(*last);
                *last += delta;
                delta.as_secs_f64()
            }
            Pacing::Fixed(step) => step.seconds(),
        };
        self.elapsed += self.delta;

        self.frame += 1;
        if self.frame >= self.fps {
            self.frame = 0;
        }
        self.total_frames += 1;

        self.delta
    }

    /// Seconds accumulated over every tick since the clock started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta of the latest tick in seconds
    pub fn delta_seconds(&self) -> f64 {
        self.delta
    }

    /// Frame counter, in `0..fps`
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Number of ticks since the clock started; never wraps back to zero
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frame rate the counter wraps at
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pacing = match &self.pacing {
            Pacing::Source { .. } => "source".to_string(),
            Pacing::Fixed(step) => format!("fixed({}s)", step.seconds()),
        };
        f.debug_struct("Clock")
            .field("pacing", &pacing)
            .field("elapsed", &self.elapsed)
            .field("delta", &self.delta)
            .field("frame", &self.frame)
            .field("total_frames", &self.total_frames)
            .field("fps", &self.fps)
            .finish()
    }
}
