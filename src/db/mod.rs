//! Database module for SQLite persistence using SeaORM

pub mod entities;

use std::path::Path;

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use uuid::{uuid, Uuid};

use entities::{difficulty, region};

/// Initialize database connection, create tables, and apply seed rows
pub async fn init_database(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| DbErr::Custom(format!("failed to create {}: {}", parent.display(), e)))?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    tracing::info!("Connecting to database: {}", db_url);

    connect(&db_url).await
}

/// Connect to an arbitrary database URL and bring the schema up.
/// Split out from [`init_database`] so tests can run against `sqlite::memory:`.
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(db_url).await?;

    create_tables(&db).await?;
    ensure_seed(&db).await?;

    Ok(db)
}

/// Create all tables if they don't exist
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS regions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            code TEXT NOT NULL,
            region_image_url TEXT
        )
        "#
        .to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS difficulties (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#
        .to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS walks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            length_in_km REAL NOT NULL,
            region_id TEXT NOT NULL REFERENCES regions(id),
            difficulty_id TEXT NOT NULL REFERENCES difficulties(id)
        )
        "#
        .to_string(),
    ))
    .await?;

    // Indexes for foreign key lookups
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_walks_region ON walks(region_id)"#.to_string(),
    ))
    .await?;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_walks_difficulty ON walks(difficulty_id)"#.to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS images (
            id TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            file_extension TEXT NOT NULL,
            file_description TEXT,
            file_size_in_bytes INTEGER NOT NULL,
            url TEXT NOT NULL
        )
        "#
        .to_string(),
    ))
    .await?;

    Ok(())
}

/// Fixed difficulty vocabulary, identifiers carried over from the original
/// dataset so existing clients keep working.
const SEED_DIFFICULTIES: [(Uuid, &str); 3] = [
    (uuid!("18f4e1fb-5391-41c9-8e6a-4d600df4984b"), "Easy"),
    (uuid!("48d75fa2-d5b6-4540-944d-e5f7f08dfc46"), "Medium"),
    (uuid!("160f690c-deed-4c13-bbd5-f78ae581c6a3"), "Hard"),
];

const SEED_REGIONS: [(Uuid, &str, &str, Option<&str>); 6] = [
    (
        uuid!("2547da2f-b967-41b2-9609-5ae1f9d23469"),
        "Auckland",
        "AKL",
        Some("sample-image.jpg"),
    ),
    (
        uuid!("6884f7d7-ad1f-4101-8df3-7a6fa7387d81"),
        "Northland",
        "NTL",
        None,
    ),
    (
        uuid!("14ceba71-4b51-4777-9b17-46602cf66153"),
        "Bay Of Plenty",
        "BOP",
        None,
    ),
    (
        uuid!("cfa06ed2-bf65-4b65-93ed-c9d286ddb0de"),
        "Wellington",
        "WGN",
        Some("https://images.pexels.com/photos/4350631/pexels-photo-4350631.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1"),
    ),
    (
        uuid!("906cb139-415a-4bbb-a174-1a1faf9fb1f6"),
        "Nelson",
        "NSN",
        Some("https://images.pexels.com/photos/13918194/pexels-photo-13918194.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1"),
    ),
    (
        uuid!("f077a22e-4248-4bf6-b564-c7cf4e250263"),
        "Southland",
        "STL",
        None,
    ),
];

/// Make sure the fixed seed rows exist. Idempotent: rows already present
/// are left untouched, so locally edited seed regions survive restarts.
pub async fn ensure_seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (id, name) in SEED_DIFFICULTIES {
        if difficulty::Entity::find_by_id(id).one(db).await?.is_none() {
            difficulty::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
            }
            .insert(db)
            .await?;
        }
    }

    for (id, name, code, image_url) in SEED_REGIONS {
        if region::Entity::find_by_id(id).one(db).await?.is_none() {
            region::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
                code: Set(code.to_string()),
                region_image_url: Set(image_url.map(str::to_string)),
            }
            .insert(db)
            .await?;
        }
    }

    Ok(())
}
