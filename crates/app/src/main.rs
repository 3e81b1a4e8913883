//! Trolley Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use trolley_app::{
    auth::{AuthService, PgAuthService, models::NewUser},
    database::{self, Db},
    domain::{
        categories::{
            CategoriesService, PgCategoriesService,
            models::{CategoryUuid, NewCategory},
        },
        products::{
            PgProductsService, ProductsService,
            models::{NewProduct, ProductUuid},
        },
    },
};

#[derive(Debug, Parser)]
#[command(name = "trolley-app", about = "Trolley CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Category(CategoryCommand),
    Product(ProductCommand),
    User(UserCommand),
}

#[derive(Debug, Args)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    Create(CreateCategoryArgs),
}

#[derive(Debug, Args)]
struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// URL slug
    #[arg(long)]
    slug: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Stock-keeping unit code
    #[arg(long)]
    sku: String,

    /// Unit price in minor units (cents)
    #[arg(long)]
    price: u64,

    /// Initial stock level
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Optional category UUID
    #[arg(long)]
    category_uuid: Option<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Account email address
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Category(CategoryCommand {
            command: CategorySubcommand::Create(args),
        }) => create_category(args).await,
        Commands::Product(ProductCommand {
            command: ProductSubcommand::Create(args),
        }) => create_product(args).await,
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
    }
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

async fn create_category(args: CreateCategoryArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = PgCategoriesService::new(Db::new(pool));

    let category = service
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}

async fn create_product(args: CreateProductArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            sku: args.sku,
            price: args.price,
            stock: args.stock,
            category_uuid: args.category_uuid.map(Into::into),
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_sku: {}", product.sku);
    println!("product_price_minor: {}", product.price);

    Ok(())
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = PgAuthService::new(pool);

    let user = service
        .register(NewUser {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);

    Ok(())
}
