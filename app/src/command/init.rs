use chatrelay_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes a template to `~/chatrelay/config.json` unless one already exists.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        Config::create_config()
    }
}
