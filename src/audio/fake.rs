//! Recording engine used by controller and app tests.

use super::engine::Engine;
use super::types::LoadRequest;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(LoadRequest),
    Pause,
    Resume,
}

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub(crate) calls: Vec<Call>,
}

impl FakeEngine {
    pub(crate) fn last_load(&self) -> Option<&LoadRequest> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Load(r) => Some(r),
            _ => None,
        })
    }
}

impl Engine for FakeEngine {
    fn load(&mut self, request: LoadRequest) {
        self.calls.push(Call::Load(request));
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }
}
