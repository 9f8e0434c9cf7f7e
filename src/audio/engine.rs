use super::types::LoadRequest;

/// Commands the playback controller issues to an audio backend.
///
/// Calls return immediately; outcomes come back later as `AudioEvent`s.
pub trait Engine {
    fn load(&mut self, request: LoadRequest);
    fn pause(&mut self);
    fn resume(&mut self);
}
