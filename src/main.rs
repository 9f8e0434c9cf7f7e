mod app;
mod art;
mod audio;
mod config;
mod library;
mod likes;
mod playback;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
