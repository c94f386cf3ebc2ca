use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::audio::{ProbeBus, ReadyState, SourceEvent};
use crate::config::{StrategyKind, VisualizerSettings};
use crate::tap::{SignalTap, TapStatus};

use super::scheduler::{CancelToken, FrameScheduler};
use super::strategy::{RenderStrategy, strategy_for};
use super::surface::{Surface, SurfaceSize};

/// State shared between the controller and its frame loop.
struct Stage {
    tap: SignalTap,
    surface: Surface,
}

pub struct Visualizer {
    settings: VisualizerSettings,
    kind: StrategyKind,
    strategy: Rc<dyn RenderStrategy>,
    stage: Rc<RefCell<Stage>>,
    scheduler: FrameScheduler,
    running: Option<CancelToken>,
    /// Terminal width captured at mount time.
    columns: u16,
    mounted: bool,
}

impl Visualizer {
    pub fn new(settings: &VisualizerSettings, fft_size: usize, scheduler: FrameScheduler) -> Self {
        let kind = settings.default;
        Self {
            settings: settings.clone(),
            kind,
            strategy: Rc::from(strategy_for(kind, settings)),
            stage: Rc::new(RefCell::new(Stage {
                tap: SignalTap::new(fft_size),
                surface: Surface::new(SurfaceSize::for_viewport(u16::MAX, kind, settings)),
            })),
            scheduler,
            running: None,
            columns: u16::MAX,
            mounted: false,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Whether a frame loop is live (not cancelled and not bailed out).
    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|t| !t.is_cancelled())
            && self.stage.borrow().tap.is_attached()
    }

    pub fn tap_attached(&self) -> bool {
        self.stage.borrow().tap.is_attached()
    }

    pub fn surface(&self) -> Ref<'_, Surface> {
        Ref::map(self.stage.borrow(), |stage| &stage.surface)
    }

    /// Size the surface for a `columns`-wide terminal and attach the tap to
    /// `graph`. The frame loop starts as soon as the tap is attached.
    pub fn mount(&mut self, graph: &ProbeBus, ready: ReadyState, columns: u16) {
        self.columns = columns;
        self.mounted = true;
        self.reset_surface();

        let mut stage = self.stage.borrow_mut();
        let status = stage.tap.attach(graph, ready);
        log::debug!(
            "visualizer mounted ({}, {} samples): tap {status:?}",
            self.kind.label(),
            stage.tap.fft_size()
        );
        drop(stage);
        if status == TapStatus::Attached {
            self.start_loop();
        }
    }

    /// Feed a source notification; completes a deferred tap attachment.
    pub fn on_source_event(&mut self, event: &SourceEvent, graph: &ProbeBus) {
        if !self.mounted || !matches!(event, SourceEvent::DataReady) {
            return;
        }
        let attached = self.stage.borrow_mut().tap.notify_ready(graph);
        if attached {
            self.start_loop();
        }
    }

    /// Replace the render strategy, stopping the old loop first.
    pub fn switch(&mut self, kind: StrategyKind) {
        self.stop_loop();
        self.kind = kind;
        self.strategy = Rc::from(strategy_for(kind, &self.settings));
        self.reset_surface();
        log::info!("visualizer switched to {}", self.strategy.kind().label());

        if self.mounted && self.tap_attached() {
            self.start_loop();
        }
    }

    pub fn cycle(&mut self) {
        self.switch(self.kind.cycle());
    }

    /// Stop the loop and release the tap.
    pub fn unmount(&mut self) {
        self.stop_loop();
        if self.stage.borrow_mut().tap.detach() {
            log::debug!("visualizer unmounted");
        }
        self.mounted = false;
    }

    fn reset_surface(&mut self) {
        let size = SurfaceSize::for_viewport(self.columns, self.kind, &self.settings);
        let mut surface = Surface::new(size);
        surface.set_background(self.strategy.background());
        self.stage.borrow_mut().surface = surface;
    }

    fn start_loop(&mut self) {
        self.stop_loop();
        let token = CancelToken::new();
        schedule(
            self.scheduler.clone(),
            self.stage.clone(),
            self.strategy.clone(),
            token.clone(),
        );
        self.running = Some(token);
    }

    fn stop_loop(&mut self) {
        if let Some(token) = self.running.take() {
            token.cancel();
        }
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn schedule(
    scheduler: FrameScheduler,
    stage: Rc<RefCell<Stage>>,
    strategy: Rc<dyn RenderStrategy>,
    token: CancelToken,
) {
    let next = scheduler.clone();
    scheduler.request_frame(move || run_frame(next, stage, strategy, token));
}

/// One iteration: bail when cancelled or detached, otherwise paint and
/// reschedule.
fn run_frame(
    scheduler: FrameScheduler,
    stage: Rc<RefCell<Stage>>,
    strategy: Rc<dyn RenderStrategy>,
    token: CancelToken,
) {
    if token.is_cancelled() {
        return;
    }
    {
        let mut guard = stage.borrow_mut();
        let Stage { tap, surface } = &mut *guard;
        let Some(frame) = tap.sample() else {
            return;
        };
        surface.clear();
        strategy.paint(frame, surface);
    }
    schedule(scheduler, stage, strategy, token);
}
