//! Player layout with a static 40 % bar, cleared first

use epd_nowplaying::DemoConfig;

fn main() -> anyhow::Result<()> {
    epd_nowplaying::launch(&DemoConfig::PLAYER)
}
