use imgslim_core::{AlertEvent, ImageRef, SizeMeasurement, Stage};
use imgslim_engine::{ImageBuilder, ImageSizeProvider};
use imgslim_notify::Notifier;

use crate::inspector::SizeInspector;
use crate::optimizer::Optimizer;
use crate::outcome::{Outcome, error_chain};

/// Workflow states. Each non-terminal state names the work done when it is
/// stepped; [`State::Done`] carries the terminal [`Outcome`].
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Init {
        image: ImageRef,
    },
    CheckInitial {
        source: SizeMeasurement,
    },
    ExceedsLimit {
        source: SizeMeasurement,
    },
    AlertInitial {
        source: SizeMeasurement,
    },
    Optimize {
        source: SizeMeasurement,
    },
    CheckOptimized {
        source: SizeMeasurement,
        optimized: ImageRef,
    },
    AlertOptimized {
        source: SizeMeasurement,
        optimized: SizeMeasurement,
    },
    Done(Outcome),
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Size check → alert → optimize → re-check → alert.
///
/// At most two measurements and two alerts per run. Alert failures are
/// logged and never change the outcome.
pub struct Workflow<P: ImageSizeProvider, N: Notifier, B: ImageBuilder> {
    inspector: SizeInspector<P>,
    notifier: N,
    optimizer: Optimizer<B>,
    threshold_mb: f64,
}

impl<P: ImageSizeProvider, N: Notifier, B: ImageBuilder> Workflow<P, N, B> {
    pub fn new(provider: P, notifier: N, optimizer: Optimizer<B>, threshold_mb: f64) -> Self {
        Self {
            inspector: SizeInspector::new(provider),
            notifier,
            optimizer,
            threshold_mb,
        }
    }

    /// Drive the state machine from [`State::Init`] to a terminal outcome.
    pub async fn run(&self, image: ImageRef) -> Outcome {
        let mut state = State::Init { image };
        loop {
            state = match self.step(state).await {
                State::Done(outcome) => {
                    tracing::info!(exit_code = outcome.exit_code(), "{outcome}");
                    return outcome;
                }
                next => next,
            };
        }
    }

    /// Perform the work of `state` and return the next one.
    pub async fn step(&self, state: State) -> State {
        match state {
            State::Init { image } => match self.inspector.measure(&image).await {
                Ok(source) => State::CheckInitial { source },
                Err(e) => {
                    tracing::error!(%image, error = %error_chain(&e), "source inspection failed");
                    State::Done(Outcome::SourceInspectionFailed {
                        image,
                        reason: error_chain(&e),
                    })
                }
            },

            State::CheckInitial { source } => {
                if source.exceeds(self.threshold_mb) {
                    State::ExceedsLimit { source }
                } else {
                    State::Done(Outcome::WithinLimit {
                        size_mb: source.megabytes(),
                        image: source.image,
                        threshold_mb: self.threshold_mb,
                    })
                }
            }

            State::ExceedsLimit { source } => {
                tracing::warn!(
                    image = %source.image,
                    threshold_mb = self.threshold_mb,
                    "Image {} is {:.2}MB, above the limit",
                    source.image,
                    source.megabytes()
                );
                State::AlertInitial { source }
            }

            State::AlertInitial { source } => {
                self.alert(AlertEvent::new(&source, Stage::Initial)).await;
                State::Optimize { source }
            }

            State::Optimize { source } => match self.optimizer.optimize(&source.image).await {
                Ok(optimized) => State::CheckOptimized { source, optimized },
                Err(e) => {
                    tracing::error!(image = %source.image, error = %error_chain(&e), "optimization failed");
                    State::Done(Outcome::BuildFailed {
                        source_mb: source.megabytes(),
                        source: source.image,
                        reason: error_chain(&e),
                    })
                }
            },

            State::CheckOptimized { source, optimized } => {
                match self.inspector.measure(&optimized).await {
                    Ok(measured) => State::AlertOptimized {
                        source,
                        optimized: measured,
                    },
                    Err(e) => {
                        tracing::error!(image = %optimized, error = %error_chain(&e), "optimized image inspection failed");
                        State::Done(Outcome::OptimizedInspectionFailed {
                            source_mb: source.megabytes(),
                            source: source.image,
                            optimized,
                            reason: error_chain(&e),
                        })
                    }
                }
            }

            State::AlertOptimized { source, optimized } => {
                self.alert(AlertEvent::new(&optimized, Stage::Optimized))
                    .await;
                State::Done(Outcome::Optimized {
                    source_mb: source.megabytes(),
                    source: source.image,
                    optimized_mb: optimized.megabytes(),
                    still_exceeds: optimized.exceeds(self.threshold_mb),
                    optimized: optimized.image,
                })
            }

            done @ State::Done(_) => done,
        }
    }

    async fn alert(&self, event: AlertEvent) {
        match self.notifier.notify(&event).await {
            Ok(()) => tracing::info!(image = %event.image, stage = %event.stage, "alert delivered"),
            Err(e) => tracing::warn!(
                image = %event.image,
                stage = %event.stage,
                error = %error_chain(&e),
                "failed to send alert, continuing"
            ),
        }
    }
}
