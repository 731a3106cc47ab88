use stockroom_app::schema;

use super::DatabaseArgs;

pub(crate) async fn run(args: DatabaseArgs) -> Result<(), String> {
    let pool = args.connect().await?;

    schema::seed(&pool)
        .await
        .map_err(|error| format!("seeding database: {error}"))?;

    pool.close().await;

    Ok(())
}
