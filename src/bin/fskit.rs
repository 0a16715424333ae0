#[path = "fskit/app/mod.rs"]
mod app;
#[path = "fskit/args.rs"]
mod args;
#[path = "fskit/config/mod.rs"]
mod config;
#[path = "fskit/logging.rs"]
mod logging;

fn main() -> anyhow::Result<()> {
    app::run()
}
