mod command;
mod visualizer;

fn main() -> anyhow::Result<()> {
    command::run()
}
