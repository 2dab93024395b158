use squad_db_rust::config::AppConfig;
use squad_db_rust::logic::{events_by_weekday, sport_distribution, upcoming_events, Resolver};
use squad_db_rust::{AppContext, Store};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    println!("Squad DB: sports organization dashboard");

    let context = AppContext::bootstrap(&config)?;
    let today = chrono::Local::now().date_naive();
    let summary = context.summary(today);

    println!(
        "{} schools, {} coaches, {} athletes, {} groups, {} events ({} upcoming)",
        summary.schools,
        summary.coaches,
        summary.athletes,
        summary.groups,
        summary.events,
        summary.upcoming_events
    );
    println!("Overall attendance: {}%", summary.attendance_rate);

    let snapshot = context.store.snapshot();

    println!("Athletes by sport:");
    for (sport, count) in sport_distribution(snapshot.athletes()) {
        println!("  {:<16} {}", sport, count);
    }

    println!("Events by weekday:");
    for day in events_by_weekday(snapshot.events()) {
        println!("  {} {}", day.label, day.count);
    }

    let resolver = Resolver::new(&snapshot);
    println!("Upcoming:");
    for event in upcoming_events(snapshot.events(), today) {
        println!(
            "  {} {} {} ({})",
            event.date,
            event.start_time.format("%H:%M"),
            event.title,
            resolver.group_name(Some(event.group_id))
        );
    }

    Ok(())
}
