use chrono::Local;
use dotenvy::dotenv;

use trial_overview::config::AppConfig;
use trial_overview::services::overview_service;
use trial_overview::web::routes::overview;

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = AppConfig::from_env();
    let now = Local::now().naive_local();

    let page = match overview_service::build_overview_page(&config, now) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("overview failed: {}", e);
            std::process::exit(1);
        }
    };

    match overview::render_overview(&page) {
        Ok(html) => println!("{}", html),
        Err(e) => {
            eprintln!("render failed: {}", e);
            std::process::exit(1);
        }
    }
}
