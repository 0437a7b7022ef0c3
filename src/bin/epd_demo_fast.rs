//! Single light refresh, no initial clear

use epd_nowplaying::DemoConfig;

fn main() -> anyhow::Result<()> {
    epd_nowplaying::launch(&DemoConfig::FAST)
}
