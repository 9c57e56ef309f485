use clap::{Args, Parser, Subcommand};
use personnel_core::{
    cli::{
        db::{db_generate, db_list, db_migrate, db_revert},
        employee,
    },
    core::db::init_pool,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Employee related command
    Employee(EmployeeArgs),
}

#[derive(Debug, Args)]
struct EmployeeArgs {
    #[command(subcommand)]
    command: EmployeeCommands,
}

#[derive(Debug, Subcommand)]
enum EmployeeCommands {
    /// Create new employee
    Create {
        #[arg(short, long)]
        code: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
        /// Register as an administrator
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                let _ = dotenvy::dotenv();
                db_generate(migration_name).await;
            }
            DbCommands::List => {
                println!("list migration");
                let _ = dotenvy::dotenv();
                let config = get_config();
                db_list(&config).await;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let _ = dotenvy::dotenv();
                let config = get_config();
                println!("run migration on {}", config.database_url);
                db_migrate(&config).await;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let _ = dotenvy::dotenv();
                let config = get_config();
                println!("{}", config.database_url);
                db_revert(&config).await;
            }
        },
        Commands::Employee(employee_args) => match &employee_args.command {
            EmployeeCommands::Create {
                code,
                name,
                password,
                admin,
            } => {
                println!("create employee: {code:?}");
                let _ = dotenvy::dotenv();
                let config = get_config();
                let pool = init_pool(&config).await;
                employee::create_employee(&pool, code, name, password, *admin)
                    .await
                    .unwrap();
            }
        },
    }
}
