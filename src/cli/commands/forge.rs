use crate::config::Config;
use crate::db::Store;

pub const SAMPLE_ADMIN_NAME: &str = "Jimmy Ma";

pub const SAMPLE_MOVIES: [(&str, &str); 10] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

/// Names the admin and appends the sample catalog. Running it twice appends
/// the movies twice.
pub async fn forge(store: &Store) -> anyhow::Result<()> {
    store.set_admin_name(SAMPLE_ADMIN_NAME).await?;

    for (title, year) in SAMPLE_MOVIES {
        store.add_movie(title, year).await?;
    }

    Ok(())
}

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.general).await?;
    forge(&store).await?;

    println!("Done.");
    Ok(())
}
