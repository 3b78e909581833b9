use anyhow::Result;
use clap::{Parser, Subcommand};
use gisrest::config::DEFAULT_DATABASE_URL;
use gisrest::DEFAULT_SRID;
use tracing_subscriber::EnvFilter;

mod commands;

/// Manage gisrest users from the command line
#[derive(Parser)]
#[command(name = "gisrest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PostgreSQL connection URL, or `memory`
    #[arg(
        short,
        long,
        env = "GISREST_DATABASE_URL",
        default_value = DEFAULT_DATABASE_URL,
        global = true
    )]
    database_url: String,

    /// Spatial reference id of stored points
    #[arg(long, env = "GISREST_SRID", default_value_t = DEFAULT_SRID, global = true)]
    srid: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the PostGIS extension and the users table
    Migrate,

    /// Find users near a point
    Locate {
        /// Latitude of the search center
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the search center
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lng: f64,

        /// Search radius in SRID units
        #[arg(short, long, default_value_t = 1.0)]
        radius: f64,

        /// Maximum number of users
        #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
        limit: i64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one user
    Get {
        /// User id
        user_id: i64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Create a user and print its id
    Create {
        /// Latitude (default 0)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude (default 0)
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Display name (default "user")
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Change a user's name and/or location
    Update {
        /// User id
        user_id: i64,

        /// New latitude, requires --lng
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// New longitude, requires --lat
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a user
    Delete {
        /// User id
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::store_config(cli.database_url, cli.srid);

    match cli.command {
        Commands::Migrate => commands::migrate::run(&config).await,
        Commands::Locate {
            lat,
            lng,
            radius,
            limit,
            json,
        } => {
            let store = commands::open(&config).await?;
            commands::locate::run(store.as_ref(), lat, lng, radius, limit, json).await
        }
        Commands::Get { user_id, json } => {
            let store = commands::open(&config).await?;
            commands::user::get(store.as_ref(), user_id, json).await
        }
        Commands::Create { lat, lng, name } => {
            let store = commands::open(&config).await?;
            commands::user::create(store.as_ref(), lat, lng, name).await
        }
        Commands::Update {
            user_id,
            lat,
            lng,
            name,
        } => {
            let store = commands::open(&config).await?;
            commands::user::update(store.as_ref(), user_id, lat, lng, name).await
        }
        Commands::Delete { user_id } => {
            let store = commands::open(&config).await?;
            commands::user::delete(store.as_ref(), user_id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_locate_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "gisrest", "locate", "--lat", "-33.9", "--lng", "151.2", "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Locate {
                lat, lng, limit, ..
            } => {
                assert_eq!(lat, -33.9);
                assert_eq!(lng, 151.2);
                assert_eq!(limit, 5);
            }
            _ => panic!("expected locate"),
        }
    }

    #[test]
    fn test_update_requires_coordinate_pair() {
        let result = Cli::try_parse_from(["gisrest", "update", "3", "--lat", "1.0"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["gisrest", "update", "3", "--name", "bob"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_global_database_url() {
        let cli =
            Cli::try_parse_from(["gisrest", "get", "7", "--database-url", "memory"]).unwrap();
        assert_eq!(cli.database_url, "memory");
    }
}
