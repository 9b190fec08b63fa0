//! One-shot schema migration for the sensor table.
//!
//! Run separately from the daemon, mirroring the provisioning flow:
//! `SCE_DATABASE_URL=... cargo run -p sce-daemon --bin sce-migrate`

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");

    let pool = sce_db::connect_from_env().await?;
    sce_db::migrate(&pool).await?;

    println!("migrations applied");
    Ok(())
}
