//! Application context: one world, one action queue, and the in-flight
//! bookkeeping between them.
//!
//! The verb system pulls through a source that hands out the whole queue
//! only when no batch is outstanding, and records the ids it handed out.
//! Each resolution marks its id; once every in-flight id has resolved the
//! batch is acknowledged off the queue. An action is therefore removed only
//! after it resolved, and never resolved twice: a batch carries each id at
//! most once.

use std::collections::BTreeSet;
use std::sync::Arc;

use bevy_app::App;
use bevy_ecs::world::World;
use parking_lot::Mutex;

use crate::config::SimConfig;
use crate::ecs::app::build_sim_app;
use crate::ecs::plugin::DocksidePlugin;
use crate::ecs::resources::{VerbChannel, VerbResolutions};
use crate::ecs::schedule::SimTick;
use crate::error::SimResult;
use crate::model::{VerbAction, VerbResolution};
use crate::queue::SharedActionQueue;
use crate::seed::{StartingState, seed_world};
use crate::snapshot::{Snapshot, read_snapshot};

type Observer = Box<dyn FnMut(&VerbResolution) + Send>;

#[derive(Debug, Default)]
struct InFlight {
    ids: Vec<String>,
    resolved: BTreeSet<String>,
}

impl InFlight {
    fn clear(&mut self) {
        self.ids.clear();
        self.resolved.clear();
    }
}

pub struct SimContext {
    app: App,
    config: SimConfig,
    queue: SharedActionQueue,
    in_flight: Arc<Mutex<InFlight>>,
    observers: Arc<Mutex<Vec<Observer>>>,
    driver: TickDriver,
    running: bool,
}

impl SimContext {
    /// Build and seed a world. Fails if the config or seed is malformed.
    pub fn new(config: SimConfig, state: &StartingState) -> SimResult<Self> {
        let mut app = build_sim_app(config.clone());
        app.add_plugins(DocksidePlugin);
        seed_world(app.world_mut(), state, &config)?;

        let queue = SharedActionQueue::new();
        let in_flight = Arc::new(Mutex::new(InFlight::default()));
        let observers: Arc<Mutex<Vec<Observer>>> = Arc::new(Mutex::new(Vec::new()));

        let source = {
            let queue = queue.clone();
            let in_flight = in_flight.clone();
            move || -> Vec<VerbAction> {
                let mut in_flight = in_flight.lock();
                if !in_flight.ids.is_empty() {
                    return Vec::new();
                }
                // Later copies of an id are dropped from the batch; acknowledging
                // the id removes every copy from the queue.
                let mut seen = BTreeSet::new();
                let batch: Vec<VerbAction> = queue
                    .peek_all()
                    .into_iter()
                    .filter(|action| seen.insert(action.id.clone()))
                    .collect();
                in_flight.ids = batch.iter().map(|action| action.id.clone()).collect();
                in_flight.resolved.clear();
                batch
            }
        };

        let sink = {
            let queue = queue.clone();
            let in_flight = in_flight.clone();
            let observers = observers.clone();
            move |resolution: &VerbResolution| {
                {
                    let mut in_flight = in_flight.lock();
                    if !in_flight.ids.is_empty() {
                        in_flight.resolved.insert(resolution.action_id.clone());
                        let done = {
                            let InFlight { ids, resolved } = &*in_flight;
                            ids.iter().all(|id| resolved.contains(id))
                        };
                        if done {
                            queue.acknowledge(in_flight.ids.as_slice());
                            in_flight.clear();
                        }
                    }
                }
                for observer in observers.lock().iter_mut() {
                    observer(resolution);
                }
            }
        };

        app.insert_resource(VerbChannel::new(source, sink));

        let driver = TickDriver::new(config.tick_rate_hz);
        Ok(Self {
            app,
            config,
            queue,
            in_flight,
            observers,
            driver,
            running: true,
        })
    }

    /// The canonical start with default tunables.
    pub fn dockside() -> SimResult<Self> {
        Self::new(SimConfig::default(), &StartingState::dockside())
    }

    /// Run one tick. A stopped context ignores the call.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        self.app.world_mut().run_schedule(SimTick);
    }

    pub fn run_for(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Step as many whole ticks as `delta_ms` of wall time covers at the
    /// configured rate. Returns the number of ticks run.
    pub fn advance(&mut self, delta_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        let ticks = self.driver.advance(delta_ms);
        self.run_for(ticks);
        ticks
    }

    pub fn read_snapshot(&self) -> Option<Snapshot> {
        read_snapshot(self.app.world())
    }

    pub fn enqueue_verb_action(&self, action: VerbAction) {
        self.queue.enqueue(action);
    }

    /// Producer handle for the slot layer.
    pub fn queue(&self) -> SharedActionQueue {
        self.queue.clone()
    }

    /// Register a callback run synchronously for every resolution, in order.
    pub fn on_resolution<F>(&mut self, observer: F)
    where
        F: FnMut(&VerbResolution) + Send + 'static,
    {
        self.observers.lock().push(Box::new(observer));
    }

    /// Recent resolutions, oldest first. Register an observer with
    /// `on_resolution` to see every one over a long run.
    pub fn resolutions(&self) -> &[VerbResolution] {
        self.app
            .world()
            .get_resource::<VerbResolutions>()
            .map(|r| r.0.as_slice())
            .unwrap_or(&[])
    }

    /// Ids handed to the world and not yet acknowledged.
    pub fn in_flight_ids(&self) -> Vec<String> {
        self.in_flight.lock().ids.clone()
    }

    /// Stop ticking and forget any in-flight batch. Queued actions stay
    /// queued and are offered again after `resume`.
    pub fn stop(&mut self) {
        self.running = false;
        self.in_flight.lock().clear();
        self.driver.reset();
        tracing::info!("simulation stopped");
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

// ---------------------------------------------------------------------------
// Fixed-rate driver
// ---------------------------------------------------------------------------

const DEFAULT_MAX_CATCH_UP: u32 = 240;

/// Converts elapsed wall time into whole ticks at a fixed rate, carrying
/// the remainder forward. Catch-up is capped so a long stall does not
/// replay minutes of ticks in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDriver {
    rate_hz: u64,
    /// Elapsed milliseconds times `rate_hz`, modulo one tick (1000).
    carry: u64,
    max_catch_up: u32,
}

impl TickDriver {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            rate_hz: u64::from(rate_hz.max(1)),
            carry: 0,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    pub fn advance(&mut self, delta_ms: u64) -> u32 {
        let total = self.carry + delta_ms.saturating_mul(self.rate_hz);
        let ticks = total / 1000;
        self.carry = total % 1000;
        if ticks > u64::from(self.max_catch_up) {
            tracing::warn!(ticks, cap = self.max_catch_up, "tick driver fell behind, dropping ticks");
            return self.max_catch_up;
        }
        ticks as u32
    }

    pub fn reset(&mut self) {
        self.carry = 0;
    }
}
