mod markup;

use std::error::Error;
use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use sitenav::Page;
use sitenav::navigation::{NotificationBus, SiteNavigation};

fn main() -> Result<(), Box<dyn Error>> {
    let log_path = std::env::temp_dir().join("sitenav-demo.log");
    let log_file = File::create(&log_path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut page = Page::new();
    let header = page.mount(markup::site_header())?;
    let Some(nav) = page.instances_of::<SiteNavigation>().first().copied() else {
        return Err("site-navigation was not upgraded".into());
    };

    NotificationBus::default().observe(page.document_mut(), nav, |_, _, notification| {
        println!("notification: {} from {}", notification.action, notification.source);
    })?;

    println!("== mounted\n{}\n", page.document().outer_html(header));

    let toggles: Vec<_> = page
        .instance::<SiteNavigation>(nav)
        .map(|widget| widget.drawers().iter().map(|d| d.toggle().node()).collect())
        .unwrap_or_default();
    for toggle in toggles.iter().take(2) {
        page.click(*toggle)?;
    }
    println!("\n== after opening the menu and Docs\n{}\n", page.document().outer_html(header));

    if let Some(toggle) = toggles.first() {
        page.click(*toggle)?;
    }
    println!("\n== after closing the menu\n{}", page.document().outer_html(header));

    for error in page.lifecycle_errors() {
        eprintln!("lifecycle error: {error}");
    }
    log::info!("demo finished, log written to {}", log_path.display());
    Ok(())
}
