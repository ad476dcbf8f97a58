//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps that run the
//! match without a window. Used by the scenario runner and by system tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::config::GameConfig;
use crate::events::EventBus;
use crate::game::{MatchRng, MatchState, step_match};
use crate::input::PaddleInput;
use crate::tracking::TrackedPaddle;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    config: GameConfig,
    state: Option<MatchState>,
    seed: Option<u64>,
    minimal_threads: bool,
    tracked: bool,
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            state: None,
            seed: None,
            minimal_threads: false,
            tracked: false,
        }
    }

    /// Use a custom game configuration
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a prepared match instead of a fresh one
    pub fn with_state(mut self, state: MatchState) -> Self {
        self.config = *state.config();
        self.state = Some(state);
        self
    }

    /// Seed serve directions so runs repeat exactly
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Insert a `TrackedPaddle` cell so tests can publish tracking samples
    pub fn with_tracking(mut self) -> Self {
        self.tracked = true;
        self
    }

    /// Build the app with minimal plugins and the match resources
    ///
    /// The returned app has:
    /// - MinimalPlugins with ScheduleRunnerPlugin at the configured FPS
    /// - GameConfig, MatchState, PaddleInput, MatchRng, EventBus
    /// - `step_match` in FixedUpdate
    ///
    /// Drive it with `app.world_mut().run_schedule(FixedUpdate)` to step
    /// exactly one frame.
    pub fn build(self) -> App {
        let mut app = App::new();
        let frame = Duration::from_secs_f64(1.0 / self.config.fps);

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_loop(frame))
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));
        }

        app.insert_resource(self.config);
        app.insert_resource(
            self.state
                .unwrap_or_else(|| MatchState::new(self.config)),
        );
        app.init_resource::<PaddleInput>();
        app.insert_resource(match self.seed {
            Some(seed) => MatchRng::seeded(seed),
            None => MatchRng::default(),
        });
        app.insert_resource(EventBus::new());
        if self.tracked {
            app.init_resource::<TrackedPaddle>();
        }

        app.add_systems(FixedUpdate, step_match);
        app
    }
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
