use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config;
use crate::storage::albums::AlbumCatalog;
use crate::storage::favorites::FavoriteStore;

#[derive(Parser)]
#[command(name = "albumdeck")]
#[command(version = "0.1")]
#[command(about = "Album catalog and favorites server")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run http server hosting the catalog and favorites
    Serve,
    /// List albums in the catalog
    Albums,
    /// List saved favorites
    Favorites,
}

/// Entrypoint for CLI
pub fn run() {
    env_logger::init();

    let cli = Cli::parse();

    let cfg = config::Config::load(&cli.config).expect("Failed to load config");

    match &cli.command {
        Commands::Serve {} => {
            println!("Starting HTTP server...");

            let favorites =
                FavoriteStore::new(cfg.favorites.path, cfg.favorites.on_malformed);
            let catalog = AlbumCatalog::new(cfg.catalog.path);

            let http_server = crate::http::server::HttpServer::new(favorites, catalog, cfg.http);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }

        Commands::Albums {} => {
            let catalog = AlbumCatalog::new(cfg.catalog.path);
            let albums = catalog.list().expect("Failed to load album catalog");

            println!("Catalog contains {} albums:", albums.len());
            for album in albums {
                println!("  {}. {} ({})", album.id, album.name, album.release_date);
            }
        }

        Commands::Favorites {} => {
            let store = FavoriteStore::new(cfg.favorites.path, cfg.favorites.on_malformed);
            let favorites = store.list().expect("Failed to load favorites");

            if favorites.is_empty() {
                println!("No favorites saved yet");
                return;
            }

            for favorite in favorites {
                println!(
                    "  {}. {} by {} (added {})",
                    favorite.id, favorite.name, favorite.artist, favorite.date_added
                );
                if let Some(song) = &favorite.favorite_song {
                    println!("     favorite song: {song}");
                }
                if let Some(comment) = &favorite.comment {
                    println!("     comment: {comment}");
                }
            }
        }
    }
}
