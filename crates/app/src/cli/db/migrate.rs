use stockroom_app::schema;

use super::DatabaseArgs;

pub(crate) async fn run(args: DatabaseArgs) -> Result<(), String> {
    let pool = args.connect().await?;

    schema::migrate(&pool)
        .await
        .map_err(|error| format!("applying migrations: {error}"))?;

    pool.close().await;

    Ok(())
}
