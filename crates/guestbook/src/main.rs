use clap::Parser;
use mini_guestbook::{Config, EntryStore, GuestBook, Server, ServerError};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(config.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(e) = run(config).await {
        error!(cause = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), ServerError> {
    info!(entries = config.entries.len(), chunk_size = config.chunk_size.get(), "starting guest book");

    let store = EntryStore::with_entries(config.entries.iter().cloned());
    let guest_book = GuestBook::new(store, config.chunk_size)?;

    Server::builder().handler(guest_book).address(config.address()).build()?.start().await
}
