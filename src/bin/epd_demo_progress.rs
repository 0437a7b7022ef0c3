//! Progress bar filling in 20 steps over 10 seconds

use epd_nowplaying::DemoConfig;

fn main() -> anyhow::Result<()> {
    epd_nowplaying::launch(&DemoConfig::PROGRESS)
}
