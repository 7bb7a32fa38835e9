mod orphan_sweeper;
mod reconciler;

pub use orphan_sweeper::{OrphanSweeper, SweepReport};
pub use reconciler::{ReconcileReport, Reconciler};
