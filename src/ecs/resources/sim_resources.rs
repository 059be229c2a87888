use std::time::{SystemTime, UNIX_EPOCH};

use bevy_ecs::resource::Resource;

use crate::model::{VerbAction, VerbResolution};

/// Pull side of the verb pipeline: supplies the actions to resolve this tick.
pub trait VerbActionSource: Send + Sync + 'static {
    fn pull(&mut self) -> Vec<VerbAction>;
}

/// Push side of the verb pipeline: notified once per resolved action, in
/// input order, synchronously during the tick.
pub trait ResolutionSink: Send + Sync + 'static {
    fn resolved(&mut self, resolution: &VerbResolution);
}

impl<F> VerbActionSource for F
where
    F: FnMut() -> Vec<VerbAction> + Send + Sync + 'static,
{
    fn pull(&mut self) -> Vec<VerbAction> {
        self()
    }
}

impl<F> ResolutionSink for F
where
    F: FnMut(&VerbResolution) + Send + Sync + 'static,
{
    fn resolved(&mut self, resolution: &VerbResolution) {
        self(resolution)
    }
}

/// Injected verb I/O. With no source installed, the verb system drains
/// `PendingVerbs`; with no sink installed, resolutions only land in
/// `VerbResolutions`.
#[derive(Resource, Default)]
pub struct VerbChannel {
    source: Option<Box<dyn VerbActionSource>>,
    sink: Option<Box<dyn ResolutionSink>>,
}

impl VerbChannel {
    pub fn new(source: impl VerbActionSource, sink: impl ResolutionSink) -> Self {
        Self {
            source: Some(Box::new(source)),
            sink: Some(Box::new(sink)),
        }
    }

    pub fn with_source(mut self, source: impl VerbActionSource) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_sink(mut self, sink: impl ResolutionSink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Pull from the injected source, or drain `fallback` when none is set.
    pub fn pull(&mut self, fallback: &mut PendingVerbs) -> Vec<VerbAction> {
        match self.source.as_mut() {
            Some(source) => source.pull(),
            None => std::mem::take(&mut fallback.0),
        }
    }

    pub fn notify(&mut self, resolution: &VerbResolution) {
        if let Some(sink) = self.sink.as_mut() {
            sink.resolved(resolution);
        }
    }
}

/// Actions queued directly on the world for the next verb pass.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingVerbs(pub Vec<VerbAction>);

/// How many resolutions `VerbResolutions` keeps.
pub const RECENT_RESOLUTIONS: usize = 256;

/// The most recent resolutions the world produced, oldest first. Observers
/// on the sink see every one; this log keeps the last `RECENT_RESOLUTIONS`.
#[derive(Resource, Debug, Clone, Default)]
pub struct VerbResolutions(pub Vec<VerbResolution>);

impl VerbResolutions {
    pub fn push(&mut self, resolution: VerbResolution) {
        self.0.push(resolution);
        if self.0.len() > RECENT_RESOLUTIONS {
            let excess = self.0.len() - RECENT_RESOLUTIONS;
            self.0.drain(..excess);
        }
    }
}

/// Millisecond wall clock used to stamp resolutions.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WallClock {
    #[default]
    System,
    Fixed(u64),
}

impl WallClock {
    pub fn now_ms(&self) -> u64 {
        match self {
            WallClock::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or(0),
            WallClock::Fixed(ms) => *ms,
        }
    }
}
