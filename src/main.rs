//! Ranobe CLI - terminal client for a light-novel fan-site API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ranobe::api::ApiClient;
use ranobe::config::Config;
use ranobe::console::Console;
use ranobe::models::{Chapter, Character, Credentials, Episode, Volume};
use ranobe::routes::{ROUTES, View, match_path};
use ranobe::session::SessionStore;
use ranobe::store::{AnimeStore, NovelStore, WikiStore};

/// Terminal client for the fan-site API: novel volumes and chapters,
/// anime seasons and episodes, and wiki character pages.
#[derive(Parser, Debug)]
#[command(name = "ranobe")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the access/refresh token pair.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored tokens.
    Logout,

    /// Exchange the stored refresh token for a new access token.
    Refresh,

    /// List novel volumes.
    Volumes,

    /// Show one volume.
    Volume { id: String },

    /// List chapters.
    Chapters,

    /// Read one chapter.
    Chapter { id: String },

    /// List wiki characters.
    Characters,

    /// Show one character page.
    Character { id: String },

    /// List anime seasons.
    Seasons,

    /// List episodes.
    Episodes,

    /// Show one episode.
    Episode { id: String },

    /// Open a site path (e.g. /novel/chapter/42) via the route table.
    Open { path: String },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let console = Console::new();

    if let Err(e) = run(args, &console).await {
        console.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(args: Args, console: &Console) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let session_dir = config.session_dir()?;
    let session = SessionStore::open(&session_dir).context("Failed to open session store")?;
    let client =
        ApiClient::new(&config.api, session.clone()).context("Failed to create API client")?;

    match args.command {
        Command::Login { username, password } => {
            console.step("Logging in...");
            let credentials = Credentials { username, password };
            let tokens = client.login(&credentials).await.context("Login failed")?;
            session
                .set_tokens(&tokens.access, &tokens.refresh)
                .context("Failed to store tokens")?;
            console.success("Logged in");
        }

        Command::Logout => {
            session.clear_tokens().context("Failed to clear tokens")?;
            console.success("Logged out");
        }

        Command::Refresh => {
            console.step("Refreshing access token...");
            let refresh_token = session
                .refresh_token()
                .context("No refresh token stored; log in first")?;
            let refreshed = client
                .refresh(&refresh_token)
                .await
                .context("Token refresh failed")?;
            session
                .set_access_token(&refreshed.access)
                .context("Failed to store refreshed token")?;
            console.success("Access token refreshed");
        }

        Command::Volumes => show_volumes(console, &client).await?,
        Command::Volume { id } => show_volume(console, &client, &id).await?,
        Command::Chapters => show_chapters(console, &client).await?,
        Command::Chapter { id } => show_chapter(console, &client, &id).await?,
        Command::Characters => show_characters(console, &client).await?,
        Command::Character { id } => show_character(console, &client, &id).await?,
        Command::Seasons => show_seasons(console, &client).await?,
        Command::Episodes => show_episodes(console, &client).await?,
        Command::Episode { id } => show_episode(console, &client, &id).await?,

        Command::Open { path } => open_path(console, &client, &path).await?,
    }

    Ok(())
}

/// Resolves a site path through the route table and renders its view.
async fn open_path(console: &Console, client: &ApiClient, path: &str) -> Result<()> {
    let matched =
        match_path(path).ok_or_else(|| anyhow::anyhow!("No route matches path: {}", path))?;

    match matched.view {
        View::Home => show_home(console),
        View::Novel => {
            show_volumes(console, client).await?;
            show_chapters(console, client).await?;
        }
        View::Chapter => {
            let id = route_param(matched.param)?;
            show_chapter(console, client, &id).await?;
        }
        View::Anime => {
            show_seasons(console, client).await?;
            show_episodes(console, client).await?;
        }
        View::Episode => {
            let id = route_param(matched.param)?;
            show_episode(console, client, &id).await?;
        }
        View::Wiki => show_characters(console, client).await?,
        View::Character => {
            let id = route_param(matched.param)?;
            show_character(console, client, &id).await?;
        }
    }

    Ok(())
}

/// Extracts the `:id` parameter a matched route is expected to carry.
fn route_param(param: Option<String>) -> Result<String> {
    param.ok_or_else(|| anyhow::anyhow!("Route is missing its id parameter"))
}

fn show_home(console: &Console) {
    console.section("Ranobe");
    console.info("Available paths:");
    for route in ROUTES {
        println!("  {}", route.pattern);
    }
}

async fn show_volumes(console: &Console, client: &ApiClient) -> Result<()> {
    console.step("Fetching volumes...");
    let mut store = NovelStore::default();
    store.set_volumes(
        client
            .volumes()
            .await
            .context("Failed to fetch volumes")?,
    );

    console.section("Volumes");
    for volume in &store.volumes {
        print_volume_line(console, volume);
    }
    Ok(())
}

async fn show_volume(console: &Console, client: &ApiClient, id: &str) -> Result<()> {
    console.step(&format!("Fetching volume {}...", id));
    let mut store = NovelStore::default();
    store.set_current_volume(
        client
            .volume(id)
            .await
            .with_context(|| format!("Failed to fetch volume {}", id))?,
    );

    if let Some(volume) = &store.current_volume {
        console.section(&format!("Volume {}: {}", volume.number, volume.title));
        if !volume.description.is_empty() {
            println!("{}", volume.description);
        }
        if let Some(cover) = client.media_url(volume.cover.as_deref()) {
            console.info(&format!("Cover: {}", cover));
        }
    }
    Ok(())
}

async fn show_chapters(console: &Console, client: &ApiClient) -> Result<()> {
    console.step("Fetching chapters...");
    let mut store = NovelStore::default();
    store.set_chapters(
        client
            .chapters()
            .await
            .context("Failed to fetch chapters")?,
    );

    console.section("Chapters");
    for chapter in &store.chapters {
        print_chapter_line(console, chapter);
    }
    Ok(())
}

async fn show_chapter(console: &Console, client: &ApiClient, id: &str) -> Result<()> {
    console.step(&format!("Fetching chapter {}...", id));
    let mut store = NovelStore::default();
    store.set_current_chapter(
        client
            .chapter(id)
            .await
            .with_context(|| format!("Failed to fetch chapter {}", id))?,
    );

    if let Some(chapter) = &store.current_chapter {
        console.section(&format!("Chapter {}: {}", chapter.number, chapter.title));
        match &chapter.content {
            Some(content) => println!("{}", content),
            None => console.warning("Chapter has no text"),
        }
    }
    Ok(())
}

async fn show_characters(console: &Console, client: &ApiClient) -> Result<()> {
    console.step("Fetching characters...");
    let mut store = WikiStore::default();
    store.set_characters(
        client
            .characters()
            .await
            .context("Failed to fetch characters")?,
    );

    console.section("Characters");
    for character in &store.characters {
        print_character_line(console, character);
    }
    Ok(())
}

async fn show_character(console: &Console, client: &ApiClient, id: &str) -> Result<()> {
    console.step(&format!("Fetching character {}...", id));
    let mut store = WikiStore::default();
    store.set_current_character(
        client
            .character(id)
            .await
            .with_context(|| format!("Failed to fetch character {}", id))?,
    );

    if let Some(character) = &store.current_character {
        console.section(&character.name);
        if !character.description.is_empty() {
            println!("{}", character.description);
        }
        if let Some(portrait) = client.media_url(character.portrait.as_deref()) {
            console.info(&format!("Portrait: {}", portrait));
        }
    }
    Ok(())
}

async fn show_seasons(console: &Console, client: &ApiClient) -> Result<()> {
    console.step("Fetching anime seasons...");
    let mut store = AnimeStore::default();
    store.set_seasons(
        client
            .anime_seasons()
            .await
            .context("Failed to fetch anime seasons")?,
    );

    console.section("Anime seasons");
    for season in &store.seasons {
        println!(
            "  {} {}",
            console.ident(&format!("S{}", season.number)),
            season.title
        );
    }
    Ok(())
}

async fn show_episodes(console: &Console, client: &ApiClient) -> Result<()> {
    console.step("Fetching episodes...");
    let mut store = AnimeStore::default();
    store.set_episodes(
        client
            .episodes()
            .await
            .context("Failed to fetch episodes")?,
    );

    console.section("Episodes");
    for episode in &store.episodes {
        print_episode_line(console, episode);
    }
    Ok(())
}

async fn show_episode(console: &Console, client: &ApiClient, id: &str) -> Result<()> {
    console.step(&format!("Fetching episode {}...", id));
    let mut store = AnimeStore::default();
    store.set_current_episode(
        client
            .episode(id)
            .await
            .with_context(|| format!("Failed to fetch episode {}", id))?,
    );

    if let Some(episode) = &store.current_episode {
        console.section(&format!("Episode {}: {}", episode.number, episode.title));
        if !episode.synopsis.is_empty() {
            println!("{}", episode.synopsis);
        }
        if let Some(video) = client.media_url(episode.video.as_deref()) {
            console.info(&format!("Video: {}", video));
        }
    }
    Ok(())
}

fn print_volume_line(console: &Console, volume: &Volume) {
    println!(
        "  {} {} {}",
        console.ident(&format!("v{}", volume.number)),
        volume.title,
        console.muted(&format!("(id {})", volume.id))
    );
}

fn print_chapter_line(console: &Console, chapter: &Chapter) {
    println!(
        "  {} {} {}",
        console.ident(&format!("ch{}", chapter.number)),
        chapter.title,
        console.muted(&format!("(id {})", chapter.id))
    );
}

fn print_character_line(console: &Console, character: &Character) {
    println!(
        "  {} {}",
        character.name,
        console.muted(&format!("(id {})", character.id))
    );
}

fn print_episode_line(console: &Console, episode: &Episode) {
    println!(
        "  {} {} {}",
        console.ident(&format!("e{}", episode.number)),
        episode.title,
        console.muted(&format!("(id {})", episode.id))
    );
}
