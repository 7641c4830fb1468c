use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mys_engagement_indexer::analytics::{EngagementAnalytics, RecommendationWeights, SortOrder};
use mys_engagement_indexer::config::Config;

const LOAD_FIRST: &str = "Process the interactions file first (option 1).";

fn print_menu() {
    println!();
    println!("--- ENGAGEMENT INDEXER ---");
    println!(" 1. Process interactions file");
    println!(" 2. Content engagement report");
    println!(" 3. User activity report");
    println!(" 4. Top contents by watch time");
    println!(" 5. Most liked contents");
    println!(" 6. Most viewed contents");
    println!(" 7. Platforms with the most engagement");
    println!(" 8. Most commented contents");
    println!(" 9. Interactions by content type");
    println!("10. Mean watch time per platform");
    println!("11. Comments per content");
    println!("12. Contents A-Z");
    println!("13. Contents Z-A");
    println!("14. Search contents by name");
    println!("15. Contents on a platform");
    println!("16. Interaction distribution per platform");
    println!("17. Recommend contents by category");
    println!(" 0. Quit");
}

fn prompt(lines: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    lines.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,mys_engagement_indexer=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Initialized configuration");

    let weights = RecommendationWeights {
        engagement: config.reports.engagement_weight,
        watch_time: config.reports.watch_time_weight,
    };
    let mut analytics = EngagementAnalytics::with_delimiter(config.ingest.delimiter as u8);
    let mut data_loaded = false;

    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        print_menu();
        let choice = prompt(&mut lines, "Choose an option: ")?;
        match choice.as_str() {
            "1" => {
                if Path::new(&config.ingest.csv_path).exists() {
                    let loaded = analytics.load_csv(&config.ingest.csv_path);
                    let processed = analytics.process_queue();
                    data_loaded = true;
                    println!("\nLoaded {loaded} rows, indexed {processed} interactions.");
                } else {
                    println!("Interactions file not found: {}", config.ingest.csv_path);
                }
            }
            "2" if data_loaded => println!("{}", analytics.content_engagement_report(None)),
            "3" if data_loaded => println!("{}", analytics.user_activity_report()),
            "4" if data_loaded => {
                println!("{}", analytics.top_contents_by_watch_time(config.reports.top_n))
            }
            "5" if data_loaded => println!("{}", analytics.top_liked_contents(config.reports.top_n)),
            "6" if data_loaded => println!("{}", analytics.top_viewed_contents(config.reports.top_n)),
            "7" if data_loaded => println!("{}", analytics.most_engaged_platforms()),
            "8" if data_loaded => {
                println!("{}", analytics.most_commented_contents(config.reports.top_n))
            }
            "9" if data_loaded => println!("{}", analytics.interactions_by_content_type()),
            "10" if data_loaded => println!("{}", analytics.mean_watch_time_per_platform()),
            "11" if data_loaded => println!("{}", analytics.comments_per_content()),
            "12" if data_loaded => println!("{}", analytics.contents_by_name(SortOrder::Ascending)),
            "13" if data_loaded => println!("{}", analytics.contents_by_name(SortOrder::Descending)),
            "14" if data_loaded => {
                let term = prompt(&mut lines, "\nSearch term: ")?;
                let results = analytics.search_contents_by_name(&term);
                println!("\nSearch results:");
                if results.is_empty() {
                    println!("No contents matched the given text.");
                } else {
                    for content in results {
                        println!("ID: {} - {}", content.id(), content.name());
                    }
                }
            }
            "15" if data_loaded => {
                let name = prompt(&mut lines, "\nPlatform name: ")?;
                let results = analytics.contents_on_platform(&name);
                println!("\nContents with interactions on '{name}':");
                if results.is_empty() {
                    println!("No contents found for that platform.");
                } else {
                    for content in results {
                        println!("ID: {} - {}", content.id(), content.name());
                    }
                }
            }
            "16" if data_loaded => println!("{}", analytics.interaction_distribution_by_platform()),
            "17" if data_loaded => {
                let category = prompt(&mut lines, "\nCategory to recommend for: ")?;
                let recommended =
                    analytics.recommend_by_category(&category, config.reports.top_n, weights);
                if recommended.is_empty() {
                    println!("No recommendations available for that category.");
                } else {
                    println!("\nRecommended contents for '{category}':");
                    for content in recommended {
                        println!("- {}", content.name());
                    }
                }
            }
            "0" => {
                println!("Goodbye.");
                break;
            }
            "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" | "10" | "11" | "12" | "13" | "14"
            | "15" | "16" | "17" => println!("{LOAD_FIRST}"),
            _ => println!("Invalid option, try again."),
        }
    }
    Ok(())
}
