use anyhow::Result;

use billed::config::Settings;
use billed::session::SessionStore;
use billed::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    settings.validate()?;

    let (session, token) = SessionStore::new(settings.session_path()?).load()?;

    // Logging is initialized in App::run() with buffer support
    App::new(settings, session, token).run().await?;

    Ok(())
}
