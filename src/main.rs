use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_styles, print_command_echo, print_empty_list, print_error, print_key_value,
    print_key_value_highlight, print_list_item, print_section_footer, print_section_header,
    print_success, PROMPT,
};
use music_catalog::catalog::CatalogStore;
use music_catalog::config::{AppConfig, CliConfig, FileConfig};

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// File of commands to run at startup, one per line. Lines starting
    /// with '#' are ignored.
    #[clap(long, value_parser = parse_path)]
    pub script: Option<PathBuf>,

    /// Keep the prompt open after running the script.
    #[clap(long)]
    pub interactive: bool,

    /// Where to keep the prompt history.
    #[clap(long, value_parser = parse_path)]
    pub history: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). LOG_LEVEL takes precedence.
    #[clap(long)]
    pub log_level: Option<String>,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Registers a user, mobile numbers are not required to be unique.
    AddUser { name: String, mobile: String },

    /// Adds an artist.
    AddArtist { name: String },

    /// Adds an album, the artist is created if it does not exist yet.
    AddAlbum { title: String, artist: String },

    /// Adds a song to an existing album.
    AddSong {
        title: String,
        album: String,
        length: u32,
    },

    /// Creates a playlist with every song of exactly the given length.
    PlaylistByLength {
        mobile: String,
        title: String,
        length: u32,
    },

    /// Creates a playlist from song titles, the user becomes its creator.
    PlaylistByNames {
        mobile: String,
        title: String,
        #[arg(required = true)]
        songs: Vec<String>,
    },

    /// Opens a playlist as the given user, subscribing them as listener.
    Visit { mobile: String, title: String },

    /// Likes a song as the given user.
    Like { mobile: String, title: String },

    /// Shows the most liked artist.
    TopArtist,

    /// Shows the most liked song.
    TopSong,

    /// Shows a user and their playlists.
    ShowUser { mobile: String },

    /// Shows a playlist's songs and listeners, without subscribing anyone.
    ShowPlaylist { title: String },

    /// Prints catalog counters as JSON.
    Stats,

    /// Close this program.
    Exit,
}

#[derive(Debug, PartialEq)]
enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn execute_command(line: &str, store: &mut CatalogStore) -> CommandExecutionResult {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let cli = match cli {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    print_command_echo(line);
    match cli.command {
        InnerCommand::AddUser { name, mobile } => {
            let id = store.create_user(&name, &mobile);
            print_success(&format!("Created user {} ({})", name, id));
        }
        InnerCommand::AddArtist { name } => {
            let id = store.create_artist(&name);
            print_success(&format!("Created artist {} ({})", name, id));
        }
        InnerCommand::AddAlbum { title, artist } => {
            let id = store.create_album(&title, &artist);
            print_success(&format!("Created album {} by {} ({})", title, artist, id));
        }
        InnerCommand::AddSong {
            title,
            album,
            length,
        } => match store.create_song(&title, &album, length) {
            Ok(id) => print_success(&format!("Created song {} on {} ({})", title, album, id)),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::PlaylistByLength {
            mobile,
            title,
            length,
        } => match store.create_playlist_on_length(&mobile, &title, length) {
            Ok(id) => print_success(&format!(
                "Created playlist {} with {} songs ({})",
                title,
                store.playlist_songs(id).len(),
                id
            )),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::PlaylistByNames {
            mobile,
            title,
            songs,
        } => match store.create_playlist_on_names(&mobile, &title, songs.as_slice()) {
            Ok(id) => print_success(&format!(
                "Created playlist {} with {} songs ({})",
                title,
                store.playlist_songs(id).len(),
                id
            )),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Visit { mobile, title } => match store.find_playlist(&mobile, &title) {
            Ok(id) => {
                print_playlist(store, id);
            }
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Like { mobile, title } => match store.like_song(&mobile, &title) {
            Ok(id) => {
                let likes = store.song(id).map(|song| song.likes).unwrap_or_default();
                print_success(&format!("{} now has {} likes", title, likes));
            }
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::TopArtist => {
            print_key_value_highlight("Most popular artist", &store.most_popular_artist());
        }
        InnerCommand::TopSong => {
            print_key_value_highlight("Most popular song", &store.most_popular_song());
        }
        InnerCommand::ShowUser { mobile } => {
            let Some(user_id) = store.find_user(&mobile) else {
                return CommandExecutionResult::Error(format!("User {} not found", mobile));
            };
            print_user(store, user_id);
        }
        InnerCommand::ShowPlaylist { title } => {
            let Some(playlist_id) = store.find_playlist_by_title(&title) else {
                return CommandExecutionResult::Error(format!("Playlist {} not found", title));
            };
            print_playlist(store, playlist_id);
        }
        InnerCommand::Stats => match serde_json::to_string_pretty(&store.stats()) {
            Ok(json) => println!("{}", json),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    }
    CommandExecutionResult::Ok
}

fn print_user(store: &CatalogStore, user_id: music_catalog::UserId) {
    let Some(user) = store.user(user_id) else {
        return;
    };
    print_section_header(&user.name);
    print_key_value("Id", &user.id.to_string());
    print_key_value("Mobile", &user.mobile);
    let created = store
        .created_playlist(user_id)
        .and_then(|id| store.playlist(id))
        .map(|playlist| playlist.title.clone())
        .unwrap_or_else(|| "-".to_owned());
    print_key_value("Last created playlist", &created);
    println!();
    print_key_value("Playlists", "");
    let playlists = store.user_playlists(user_id);
    if playlists.is_empty() {
        print_empty_list("no playlists");
    }
    for playlist in playlists.iter().filter_map(|id| store.playlist(*id)) {
        print_list_item(&playlist.title);
    }
    print_section_footer();
}

fn print_playlist(store: &CatalogStore, playlist_id: music_catalog::PlaylistId) {
    let Some(playlist) = store.playlist(playlist_id) else {
        return;
    };
    print_section_header(&playlist.title);
    print_key_value("Id", &playlist.id.to_string());

    print_key_value("Songs", "");
    let songs = store.playlist_songs(playlist_id);
    if songs.is_empty() {
        print_empty_list("no songs");
    }
    for song in songs.iter().filter_map(|id| store.song(*id)) {
        print_list_item(&format!("{} ({}, {} likes)", song.title, song.length, song.likes));
    }

    print_key_value("Listeners", "");
    let listeners = store.playlist_listeners(playlist_id);
    if listeners.is_empty() {
        print_empty_list("no listeners");
    }
    for user in listeners.iter().filter_map(|id| store.user(*id)) {
        print_list_item(&format!("{} ({})", user.name, user.mobile));
    }
    print_section_footer();
}

fn run_script(path: &Path, store: &mut CatalogStore) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {:?}", path))?;
    for (number, line) in content.lines().enumerate() {
        match execute_command(line, store) {
            CommandExecutionResult::Ok => {}
            CommandExecutionResult::Exit => return Ok(false),
            CommandExecutionResult::Error(err) => {
                print_error(&format!("{}:{}: {}", path.display(), number + 1, err));
            }
        }
    }
    Ok(true)
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandHelper { commands_names }
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn run_prompt(store: &mut CatalogStore, history_file: Option<&Path>) -> Result<()> {
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandHelper::new()));
    if let Some(path) = history_file {
        if path.exists() {
            rl.load_history(path)
                .with_context(|| format!("Failed to load history from {:?}", path))?;
        }
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(&line, store) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }

    if let Some(path) = history_file {
        rl.save_history(path)
            .with_context(|| format!("Failed to save history to {:?}", path))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        log_level: cli_args.log_level.clone(),
        history_file: cli_args.history.clone(),
        script: cli_args.script.clone(),
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(config.log_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let mut store = CatalogStore::with_settings(config.popularity.clone());

    if let Some(script) = &config.script {
        let keep_going = run_script(script, &mut store)?;
        if !keep_going || !cli_args.interactive {
            return Ok(());
        }
    }

    run_prompt(&mut store, config.history_file.as_deref())
}
