mod app;
mod audio;
mod config;
mod engine;
mod error;
mod library;
mod media;
mod playlist;
mod runtime;
mod tap;
mod ui;
mod visualizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
