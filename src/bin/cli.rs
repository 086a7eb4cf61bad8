//! QuickCard CLI
//!
//! Command-line client for the QuickCard API:
//! - Sign up, sign in and out
//! - List, create, edit and delete cards
//! - View any public card
//!
//! # Configuration
//!
//! Settings come from `<config_dir>/quickcard/config.toml` or
//! `./quickcard.toml` (see `quickcard config`), then from the environment:
//! - `QUICKCARD_API_URL`: API base URL (default: http://localhost:8000)
//! - `QUICKCARD_TOKEN_FILE`: where the session token is kept
//! - `QUICKCARD_LOCALE`: en, ru or cs
//! - `QUICKCARD_LOG_LEVEL`, `QUICKCARD_LOG_FORMAT`: logging
//! - `RUST_LOG`: full tracing filter (overrides the level)

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickcard::card::{Card, CardDraft, FontStyle, TemplateId, ValidationError};
use quickcard::client::{ApiClient, ClientError, HttpTransport, ImageFile};
use quickcard::config::{generate_default_config, Config, LogFormat};
use quickcard::session::{FileTokenStorage, SessionStore};
use quickcard::view::{AuthView, Dashboard, Navigation, PublicCardState, PublicCardView, ViewScope};
use quickcard::{Locale, Message};

#[derive(Parser)]
#[command(name = "quickcard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digital business cards from the command line")]
#[command(long_about = "QuickCard publishes digital business cards at a public URL.\nCreate and edit your cards here; anyone can view them at /<slug>.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and QUICKCARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Interface language (en, ru, cs)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Config file to use instead of the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Show API and session status
    Status,

    /// List your cards
    Cards,

    /// Show one of your cards
    Show { slug: String },

    /// Create a card
    Create {
        #[command(flatten)]
        fields: CardArgs,
    },

    /// Edit one of your cards
    Edit {
        slug: String,
        #[command(flatten)]
        fields: CardArgs,
        /// Remove the social link at this position (0-based, repeatable)
        #[arg(long)]
        remove_link: Vec<usize>,
    },

    /// Delete one of your cards
    Delete {
        slug: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// View a public card (no sign-in needed)
    View { slug: String },

    /// Show visit statistics
    Stats,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Card fields shared by `create` and `edit`
#[derive(Args, Debug, Default)]
pub struct CardArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// default, modern or classic
    #[arg(long)]
    pub template: Option<String>,
    /// Arial, Times New Roman, Courier New, Georgia or Verdana
    #[arg(long)]
    pub font: Option<String>,
    /// Background color as #RRGGBB
    #[arg(long)]
    pub background_color: Option<String>,
    /// Text color as #RRGGBB
    #[arg(long)]
    pub text_color: Option<String>,
    /// Avatar image file
    #[arg(long)]
    pub avatar: Option<PathBuf>,
    /// Background image file
    #[arg(long)]
    pub background_image: Option<PathBuf>,
    /// Social link as platform=url (repeatable)
    #[arg(short = 'L', long = "link")]
    pub links: Vec<String>,
    /// Publish (true) or hide (false) the card
    #[arg(long)]
    pub active: Option<bool>,
}

impl CardArgs {
    fn apply(self, draft: &mut CardDraft) -> Result<()> {
        let text_fields = [
            (self.title, &mut draft.title),
            (self.slug, &mut draft.slug),
            (self.subtitle, &mut draft.subtitle),
            (self.description, &mut draft.description),
            (self.email, &mut draft.email),
            (self.phone, &mut draft.phone),
            (self.background_color, &mut draft.background_color),
            (self.text_color, &mut draft.text_color),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(template) = self.template {
            draft.template_id = TemplateId::parse(&template).ok_or_else(|| {
                anyhow!("Unknown template '{}'. Use one of: {}", template, join(&TemplateId::ALL))
            })?;
        }
        if let Some(font) = self.font {
            draft.font_style = FontStyle::parse(&font)
                .ok_or_else(|| anyhow!("Unknown font '{}'. Use one of: {}", font, join(&FontStyle::ALL)))?;
        }

        if let Some(path) = self.avatar {
            draft.avatar = Some(read_image(&path)?);
        }
        if let Some(path) = self.background_image {
            draft.background_image = Some(read_image(&path)?);
        }

        for link in self.links {
            let (platform, url) = link
                .split_once('=')
                .ok_or_else(|| anyhow!("Links are written platform=url, got '{}'", link))?;
            draft.set_scratch_platform(platform.trim());
            draft.set_scratch_url(url.trim());
            if !draft.add_link() {
                bail!("Link needs both a platform and a url: '{}'", link);
            }
        }

        if let Some(active) = self.active {
            draft.is_active = active;
        }

        Ok(())
    }
}

/// Everything a command needs
struct App {
    api: ApiClient<HttpTransport>,
    locale: Locale,
    format: OutputFormat,
    token_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_deref());
    }

    let base_url = cli.api_url.clone().unwrap_or_else(|| config.api.base_url.clone());
    let locale = cli
        .locale
        .as_deref()
        .map(Locale::parse)
        .unwrap_or_else(|| config.ui.locale());

    let (session, token_file) = if cli.ephemeral {
        (SessionStore::ephemeral(), None)
    } else {
        let path = config.session.token_path();
        (SessionStore::open(FileTokenStorage::new(&path)), Some(path))
    };

    let transport = HttpTransport::new(config.api.timeout())?;
    let app = App {
        api: ApiClient::new(transport, &base_url, session),
        locale,
        format: cli.format,
        token_file,
    };

    tracing::debug!(api = %base_url, locale = %locale, "QuickCard CLI starting");

    run(cli.command, &app).await
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("quickcard={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(command: Commands, app: &App) -> Result<()> {
    match command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let mut view = AuthView::register(app.api.clone(), app.locale);
            if let Navigation::Redirect(_) = view.gate() {
                println!("Already signed in. Run `quickcard logout` first.");
                return Ok(());
            }

            let form = view.form_mut();
            form.username = username.clone();
            form.email = email;
            form.password = password_or_prompt(password)?;

            cancel_on_ctrl_c(view.scope());
            match view.submit().await {
                Some(_) => println!("Registered and signed in as {}", username),
                None => bail!(view_failure(view.state().error.as_deref(), view.scope())),
            }
        }

        Commands::Login { username, password } => {
            let mut view = AuthView::login(app.api.clone(), app.locale);
            if let Navigation::Redirect(_) = view.gate() {
                println!("Already signed in. Run `quickcard logout` first.");
                return Ok(());
            }

            let form = view.form_mut();
            form.username = username.clone();
            form.password = password_or_prompt(password)?;

            cancel_on_ctrl_c(view.scope());
            match view.submit().await {
                Some(_) => println!("Signed in as {}", username),
                None => bail!(view_failure(view.state().error.as_deref(), view.scope())),
            }
        }

        Commands::Logout => {
            app.api.session().logout();
            println!("Signed out");
        }

        Commands::Status => {
            println!("QuickCard v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API:      {}", app.api.base_url());
            println!("Locale:   {} ({})", app.locale.native_name(), app.locale);
            println!(
                "Session:  {}",
                if app.api.session().is_authenticated() {
                    "signed in"
                } else {
                    "signed out"
                }
            );
            match &app.token_file {
                Some(path) => println!("Token:    {}", path.display()),
                None => println!("Token:    memory only"),
            }
        }

        Commands::Cards => {
            let dashboard = mounted_dashboard(app).await?;
            let cards = &dashboard.state().cards;

            match app.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(cards)?),
                OutputFormat::Table if cards.is_empty() => {
                    println!("{}", app.locale.text(Message::NoCards));
                    println!();
                    println!("Create your first card with:");
                    println!("  quickcard create --title \"Jane Doe\"");
                }
                OutputFormat::Table => print_card_table(cards),
            }
        }

        Commands::Show { slug } => {
            let card = match app.api.get_card(&slug).await {
                Ok(card) => card.resolve_media(app.api.base_url()),
                Err(e) => return Err(client_failure(app, e, Message::LoadCardError)),
            };
            print_card(app, &card)?;
        }

        Commands::Create { fields } => {
            let mut dashboard = mounted_dashboard(app).await?;

            let mut draft = CardDraft::new();
            fields.apply(&mut draft)?;
            let payload = draft
                .to_payload()
                .map_err(|e| invalid_draft(app.locale, e))?;

            dashboard.toggle_create();
            if !dashboard.submit_create(payload).await {
                bail!(view_failure(dashboard.state().error.as_deref(), dashboard.scope()));
            }

            if let Some(card) = dashboard.state().cards.last() {
                println!(
                    "{}: '{}', {}",
                    app.locale.text(Message::CardSaved),
                    card.title,
                    card.public_path()
                );
            }
        }

        Commands::Edit {
            slug,
            fields,
            mut remove_link,
        } => {
            let mut dashboard = mounted_dashboard(app).await?;
            let target = find_card(&dashboard, &slug, app.locale)?;

            dashboard.toggle_edit(Some(&target)).await;
            let Some(current) = dashboard.state().editing() else {
                bail!(view_failure(dashboard.state().error.as_deref(), dashboard.scope()));
            };

            let mut draft = CardDraft::from_card(current);

            // Highest index first so earlier removals don't shift later ones
            remove_link.sort_unstable_by(|a, b| b.cmp(a));
            remove_link.dedup();
            for index in remove_link {
                if draft.remove_link(index).is_none() {
                    bail!("Card '{}' has no social link at position {}", slug, index);
                }
            }

            fields.apply(&mut draft)?;
            let payload = draft
                .to_payload()
                .map_err(|e| invalid_draft(app.locale, e))?;

            if !dashboard.submit_edit(payload).await {
                bail!(view_failure(dashboard.state().error.as_deref(), dashboard.scope()));
            }
            println!("{}: '{}'", app.locale.text(Message::CardSaved), slug);
        }

        Commands::Delete { slug, yes } => {
            let mut dashboard = mounted_dashboard(app).await?;
            let target = find_card(&dashboard, &slug, app.locale)?;

            let prompt = app.locale.text(Message::ConfirmDelete);
            let deleted = dashboard
                .delete(target.id, |card| yes || confirm(&format!("{} ({})", prompt, card.slug)))
                .await;

            if deleted {
                println!("{}: '{}'", app.locale.text(Message::CardDeleted), slug);
            } else if let Some(error) = &dashboard.state().error {
                bail!(error.clone());
            } else if dashboard.scope().is_cancelled() {
                bail!("Cancelled");
            } else {
                println!("Kept '{}'", slug);
            }
        }

        Commands::View { slug } => {
            let mut view = PublicCardView::new(app.api.clone(), app.locale);
            cancel_on_ctrl_c(view.scope());

            match view.load(&slug).await {
                PublicCardState::Loaded(card) => print_card(app, card)?,
                PublicCardState::Error(message) => bail!(message.clone()),
                PublicCardState::Loading => bail!("Cancelled"),
            }
        }

        Commands::Stats => {
            let dashboard = mounted_dashboard(app).await?;
            let state = dashboard.state();

            match app.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "cards": state.cards.len(),
                        "total_visits": state.total_visits,
                    })
                ),
                OutputFormat::Table => {
                    println!("{:<16} {}", app.locale.text(Message::DashboardCards), state.cards.len());
                    let visits = state
                        .total_visits
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("{:<16} {}", app.locale.text(Message::TotalVisits), visits);
                }
            }
        }

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

/// Dashboard with the card list loaded, or an error telling the user to sign in
async fn mounted_dashboard(app: &App) -> Result<Dashboard<HttpTransport>> {
    let mut dashboard = Dashboard::new(app.api.clone(), app.locale);
    cancel_on_ctrl_c(dashboard.scope());

    match dashboard.mount().await {
        Navigation::Redirect(_) => bail!("Not signed in. Run `quickcard login <username>` first."),
        Navigation::Render(_) => {}
    }

    if let Some(error) = &dashboard.state().error {
        bail!(error.clone());
    }
    if dashboard.scope().is_cancelled() {
        bail!("Cancelled");
    }

    Ok(dashboard)
}

fn find_card(dashboard: &Dashboard<HttpTransport>, slug: &str, locale: Locale) -> Result<Card> {
    dashboard
        .state()
        .cards
        .iter()
        .find(|c| c.slug == slug)
        .cloned()
        .ok_or_else(|| anyhow!("{}: {}", locale.text(Message::LoadCardError), slug))
}

fn cancel_on_ctrl_c(scope: &ViewScope) {
    let token = scope.token();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    tracing::info!("Interrupted, abandoning request");
                    token.cancel();
                }
            }
        }
    });
}

fn view_failure(error: Option<&str>, scope: &ViewScope) -> String {
    match error {
        Some(error) => error.to_string(),
        None if scope.is_cancelled() => "Cancelled".to_string(),
        None => "Request failed".to_string(),
    }
}

/// Turn a direct client failure into a user-facing error, ending the session on 401
fn client_failure(app: &App, error: ClientError, fallback: Message) -> anyhow::Error {
    if error.is_unauthorized() {
        app.api.session().invalidate("request unauthorized");
        return anyhow!("Session expired. Run `quickcard login <username>` again.");
    }
    let message = error.user_message(app.locale, fallback);
    anyhow::Error::new(error).context(message)
}

fn invalid_draft(locale: Locale, error: ValidationError) -> anyhow::Error {
    let message = locale.text(error.message());
    anyhow::Error::new(error).context(message)
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if std::io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Cannot read image {:?}", path))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let content_type = ImageFile::guess_content_type(&file_name);

    Ok(ImageFile::new(file_name, content_type, bytes))
}

fn write_config(output: Option<&Path>) -> Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_card_table(cards: &[Card]) {
    println!("{:<6} {:<20} {:<28} {:<8} {}", "ID", "Slug", "Title", "Active", "Page");
    println!("{}", "-".repeat(90));

    for card in cards {
        println!(
            "{:<6} {:<20} {:<28} {:<8} {}",
            card.id,
            truncate(&card.slug, 20),
            truncate(&card.title, 28),
            if card.is_active { "yes" } else { "no" },
            card.public_path()
        );
    }
}

fn print_card(app: &App, card: &Card) -> Result<()> {
    if app.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(card)?);
        return Ok(());
    }

    let t = |m| app.locale.text(m);

    println!("{}", card.title);
    if !card.subtitle.is_empty() {
        println!("{}", card.subtitle);
    }
    if !card.description.is_empty() {
        println!();
        println!("{}", card.description);
    }
    println!();

    if !card.email.is_empty() {
        println!("{} {}", t(Message::PublicEmail), card.email);
    }
    if !card.phone.is_empty() {
        println!("{} {}", t(Message::PublicPhone), card.phone);
    }

    if !card.social_links.is_empty() {
        println!();
        println!("{}:", t(Message::PublicSocialLinks));
        for link in &card.social_links {
            println!("  {:<12} {}", link.platform, link.url);
        }
    }

    println!();
    println!(
        "{}: {} / {} / {} on {}",
        t(Message::FieldTemplate),
        card.template_id.label(),
        card.font_style,
        card.text_color,
        card.background_color
    );
    if let Some(avatar) = &card.avatar {
        println!("{}: {}", t(Message::FieldAvatar), avatar);
    }
    if let Some(background) = &card.background_image {
        println!("{}: {}", t(Message::FieldBackgroundImage), background);
    }
    if !card.is_active {
        println!("({}: no)", t(Message::FieldIsActive));
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
