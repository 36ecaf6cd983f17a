use clap::Parser as _;

use crate::command::Args;

mod command;

fn main() -> anyhow::Result<()> {
    command::run(&Args::parse())
}
