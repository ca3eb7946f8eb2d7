use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROGRAM_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`ShaderProgram`](crate::core::shader::program::ShaderProgram),
/// stable across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(u64);

impl ProgramId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which program subsequent draws use. `None` is the no-program state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgramBinding {
    bound: Option<ProgramId>,
}

impl ProgramBinding {
    #[must_use]
    pub fn bound(&self) -> Option<ProgramId> {
        self.bound
    }

    #[must_use]
    pub fn is_bound(&self, id: ProgramId) -> bool {
        self.bound == Some(id)
    }

    pub(crate) fn set(&mut self, id: ProgramId) {
        self.bound = Some(id);
    }

    pub(crate) fn clear(&mut self) {
        self.bound = None;
    }
}
