use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

mod commands;
mod constants;
mod handlers;
mod middleware;
mod routes;
mod types;
mod utils;

#[derive(Parser)]
#[command(name = "lapangin")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (default)
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Flip paid bookings whose end time has passed to completed
    MarkBookingsCompleted,
    /// Repair the denormalized court count on every venue
    SyncCourtCounts,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    // Database connection
    let database_url = constants::config::get_database_url()
        .expect("DATABASE_URL environment variable is required");

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            Migrator::up(&db, None).await.expect("Migration failed");
            println!("Migrations applied");
            Ok(())
        }
        Command::MarkBookingsCompleted => {
            commands::mark_bookings_completed::run(&db)
                .await
                .expect("Failed to mark bookings completed");
            Ok(())
        }
        Command::SyncCourtCounts => {
            commands::sync_court_counts::run(&db)
                .await
                .expect("Failed to sync court counts");
            Ok(())
        }
        Command::Serve => {
            let server_address = constants::config::get_server_address();
            println!("🚀 Starting Lapangin API server...");
            println!("📊 Database connected successfully");
            println!("🌐 Server will be available at http://{}", server_address);

            let db = web::Data::new(db);
            HttpServer::new(move || {
                App::new()
                    .wrap(Cors::permissive())
                    .app_data(db.clone())
                    .service(routes::api::configure_routes())
            })
            .bind(&server_address)?
            .run()
            .await
        }
    }
}
