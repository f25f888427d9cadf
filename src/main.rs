use log::{debug, error, info};
use std::env;
use std::sync::Arc;

use recipe_browser::{app, BrowserConfig, GuardDecision, ProgressBar};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Each argument is an in-app href, or `back` / `forward`
    let hrefs: Vec<String> = env::args().skip(1).collect();
    if hrefs.is_empty() {
        return Err("Please provide at least one path, e.g. /search?q=pasta".into());
    }

    let config = BrowserConfig::load()?;
    let bar = Arc::new(ProgressBar::new(&config.progress));
    let mut router = app::app_router_with_progress(&config, Arc::clone(&bar))?;

    router.before_each(move |to, _| {
        debug!("{} {}", bar.render(), to.full_path());
        GuardDecision::Proceed
    });

    for href in &hrefs {
        let result = match href.as_str() {
            "back" => router.back(),
            "forward" => router.forward(),
            _ => router.push_href(href),
        };

        match result {
            Ok(route) => println!("{}", serde_json::to_string(&route)?),
            // Guards that stop a navigation leave the current view in place
            Err(e) if e.is_silent() => info!("{}: {}", href, e),
            Err(e) => error!("{}: {}", href, e),
        }
    }

    Ok(())
}
