use super::{ShareSnapshotId, SharedDish};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SharedViewSource {
    Snapshot(ShareSnapshotId),
    Inline,
}

/// Read-only rendition of a shared draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedView {
    pub source: SharedViewSource,
    pub dishes: Vec<SharedDish>,
}
