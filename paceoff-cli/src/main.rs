//! PaceOff binary: runs the built-in copy-strategy demo suite.

fn main() -> anyhow::Result<()> {
    let harness = paceoff_cli::suite::build_suite()?;
    paceoff_cli::run(harness)
}
