//! Interactive terminal frontend for the joke catalog client. Pure
//! presentation: reads orchestrator snapshots and invokes operations.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    is_known_category, CategoryProvider, HttpJokeService, RandomJokeOrchestrator,
    RemoteJokeService, RequestState, RequestStatus, SearchOrchestrator, SearchSnapshot,
};
use shared::{domain::Category, protocol::Joke};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the joke catalog service.
    #[arg(long, default_value = "https://api.chucknorris.io/")]
    service_url: String,
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn print_joke_card(joke: &Joke) {
    println!("  \"{}\"", joke.value);
    if let Some(category) = &joke.category {
        println!("  [{}]", capitalize(category));
    }
}

fn print_random_state(state: &RequestState<Joke>) {
    match state.status {
        RequestStatus::Idle => println!("No joke fetched yet."),
        RequestStatus::Loading => println!("Fetching joke..."),
        RequestStatus::Failure => println!(
            "Error: {}",
            state.error_message.as_deref().unwrap_or("An error occurred")
        ),
        RequestStatus::Success => {
            if let Some(joke) = &state.data {
                print_joke_card(joke);
            }
        }
    }
}

fn print_search_state(snapshot: &SearchSnapshot) {
    match snapshot.request.status {
        RequestStatus::Idle => println!("No search yet. Pick a category first."),
        RequestStatus::Loading => println!("Searching..."),
        RequestStatus::Failure => println!(
            "Error: {}",
            snapshot
                .request
                .error_message
                .as_deref()
                .unwrap_or("An error occurred")
        ),
        RequestStatus::Success => {
            let jokes = snapshot.request.data.as_deref().unwrap_or_default();
            if jokes.is_empty() && snapshot.has_searched {
                println!("No jokes found for this category.");
            } else {
                let plural = if jokes.len() == 1 { "" } else { "s" };
                println!("{} Joke{plural} Found", jokes.len());
                for joke in jokes {
                    print_joke_card(joke);
                }
            }
        }
    }
}

/// Category gating: search operations only become available once the
/// catalog has loaded, and the chosen token must come from it.
fn gated_category(
    categories: &RequestState<Vec<Category>>,
    token: Option<&str>,
) -> Result<Option<Category>, String> {
    match categories.status {
        RequestStatus::Idle | RequestStatus::Loading => {
            Err("Loading categories...".to_string())
        }
        RequestStatus::Failure => Err(format!(
            "Error loading categories: {}",
            categories
                .error_message
                .as_deref()
                .unwrap_or("An error occurred")
        )),
        RequestStatus::Success => match token.and_then(Category::new) {
            None => Ok(None),
            Some(category) => {
                if is_known_category(categories, &category) {
                    Ok(Some(category))
                } else {
                    Err(format!("Unknown category \"{category}\"; type `c` to list them."))
                }
            }
        },
    }
}

fn print_help() {
    println!("Commands:");
    println!("  r               fetch a new random joke");
    println!("  r <category>    fetch a random joke from a category");
    println!("  s <category>    list all jokes in a category");
    println!("  sr <category>   one random joke from a category (search view)");
    println!("  c               show the category catalog");
    println!("  q               quit");
}

async fn settled<T: Clone>(rx: &mut watch::Receiver<RequestState<T>>) -> RequestState<T> {
    loop {
        let state = rx.borrow().clone();
        if state.is_settled() {
            return state;
        }
        if rx.changed().await.is_err() {
            return state;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let base_url = Url::parse(&args.service_url)?;
    let service: Arc<dyn RemoteJokeService> = Arc::new(HttpJokeService::new(base_url));

    let categories = CategoryProvider::new(Arc::clone(&service));
    let random = RandomJokeOrchestrator::new(Arc::clone(&service));
    let search = SearchOrchestrator::new(Arc::clone(&service));

    println!("Random Joke");
    let mut random_rx = random.subscribe();
    print_random_state(&settled(&mut random_rx).await);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let token = parts.next();

        match command {
            "q" => break,
            "" => print_help(),
            "c" => {
                let state = categories.snapshot();
                match state.status {
                    RequestStatus::Idle | RequestStatus::Loading => {
                        println!("Loading categories...")
                    }
                    RequestStatus::Failure => println!(
                        "Error loading categories: {}",
                        state.error_message.as_deref().unwrap_or("An error occurred")
                    ),
                    RequestStatus::Success => {
                        let names: Vec<String> = state
                            .data
                            .as_deref()
                            .unwrap_or_default()
                            .iter()
                            .map(|c| capitalize(c.as_str()))
                            .collect();
                        println!("Categories: {}", names.join(", "));
                    }
                }
            }
            "r" => {
                // The unscoped random view takes any fetched category but
                // does not require one.
                let category = match token {
                    None => None,
                    Some(token) => match gated_category(&categories.snapshot(), Some(token)) {
                        Ok(category) => category,
                        Err(message) => {
                            println!("{message}");
                            continue;
                        }
                    },
                };
                random.refresh(category).await;
                print_random_state(&random.snapshot());
            }
            "s" | "sr" => {
                let category = match gated_category(&categories.snapshot(), token) {
                    Ok(category) => category,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                };
                if command == "s" {
                    search.list_by_category(category).await;
                } else {
                    search.random_from_category(category).await;
                }
                print_search_state(&search.snapshot());
            }
            other => {
                println!("Unknown command \"{other}\".");
                print_help();
            }
        }
    }

    Ok(())
}
