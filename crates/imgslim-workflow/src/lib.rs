//! The imgslim size-check workflow.
//!
//! ```text
//! Init ─▶ CheckInitial ─┬─▶ Done(WithinLimit)
//!   │                   └─▶ ExceedsLimit ─▶ AlertInitial ─▶ Optimize ─┬─▶ Done(BuildFailed)
//!   └─▶ Done(SourceInspectionFailed)                                  │
//!                                         CheckOptimized ◀────────────┘
//!                                           ├─▶ Done(OptimizedInspectionFailed)
//!                                           └─▶ AlertOptimized ─▶ Done(Optimized)
//! ```

pub mod inspector;
pub mod optimizer;
pub mod orchestrator;
pub mod outcome;

pub use inspector::SizeInspector;
pub use optimizer::{OptimizeError, Optimizer};
pub use orchestrator::{State, Workflow};
pub use outcome::Outcome;
