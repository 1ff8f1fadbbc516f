use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

use learnmate::{
    api::{ApiClient, ContentService},
    config::Config,
    model::{AiKind, ContentType, Difficulty, Semester, Subject},
    session::SessionStore,
    view::{
        render, write_ai_result, write_content, AiContentForm, CatalogBoard,
        ContentBoard, ContentForm, GenerationPage, LoginScreen, SemesterForm, SubjectForm,
    },
};

use learnmate::view::render::{BOLD, RESET};

/// LearnMate admin console
///
/// Manages content, semesters and subjects on a LearnMate backend and runs
/// the AI summary, quiz and categorize workflows.
#[derive(Parser, Debug)]
#[command(name = "learnmate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides LEARNMATE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Session file (overrides LEARNMATE_SESSION_FILE)
    #[arg(long, global = true, value_name = "FILE")]
    session_file: Option<PathBuf>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password, or start Google sign-in
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google: bool,
    },
    /// Finish Google sign-in with the code from the redirect URL
    AuthCallback {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    #[command(subcommand)]
    Content(ContentCommand),
    #[command(subcommand)]
    Semester(SemesterCommand),
    #[command(subcommand)]
    Subject(SubjectCommand),
}

#[derive(ClapArgs, Debug, Default)]
#[group(multiple = false)]
struct BodyArgs {
    /// Inline text
    #[arg(long)]
    text: Option<String>,
    /// Read the text from a file
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl BodyArgs {
    fn read(&self) -> Result<Option<String>> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => fs::read_to_string(path)
                .map(Some)
                .context(format!("failed to read {}", path.display())),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// List all content
    List,
    /// Show one content record
    Show { id: String },
    /// Create a content record
    Create {
        #[arg(long)]
        title: String,
        #[arg(long = "type", default_value = "text")]
        content_type: ContentType,
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Edit a content record; nothing is sent when no field changes
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type")]
        content_type: Option<ContentType>,
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Delete a content record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Generate a summary of an existing record
    Summary {
        id: String,
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Generate a quiz from an existing record
    Quiz {
        id: String,
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Suggest categories for an existing record
    Categorize {
        id: String,
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Run AI generation on arbitrary text
    Generate {
        #[arg(long = "type", default_value = "summary")]
        kind: AiKind,
        #[command(flatten)]
        body: BodyArgs,
        #[arg(long)]
        max_length: Option<u32>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        num_questions: Option<u32>,
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Write a record to <DIR>/<slug>.md with YAML frontmatter
    Export {
        id: String,
        #[arg(default_value = "output")]
        dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum SemesterCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
    },
}

#[derive(Subcommand, Debug)]
enum SubjectCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        semester_id: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins, then --verbose, then warnings only
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_env().with_overrides(args.api_url, args.session_file);
    config.validate()?;
    tracing::debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "configuration");

    let store = SessionStore::new(&config.session_file);
    let session = store.load().context("failed to read session")?;
    let api = ApiClient::new(&config.api_url).with_session(session);

    match args.command {
        Command::Login {
            email,
            password,
            google,
        } => login(&api, &store, email, password, google),
        Command::AuthCallback { code, state } => {
            let mut screen = LoginScreen::new();
            match screen.complete_callback(&api, &store, code.as_deref(), state.as_deref()) {
                Some(session) => {
                    println!("Signed in as {BOLD}{}{RESET}", session.user().email);
                    Ok(())
                }
                None => Err(banner(screen.error()).context(
                    "Authentication Error: run `learnmate login` to try again",
                )),
            }
        }
        Command::Logout => {
            store.clear()?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            match api.session() {
                Some(session) => {
                    let user = session.user();
                    println!("{BOLD}{}{RESET} <{}>", user.name, user.email);
                    println!("role: {}", user.role.as_deref().unwrap_or("-"));
                    println!("admin: {}", api.is_admin());
                }
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Content(command) => content(&signed_in(api)?, command),
        Command::Semester(command) => semester(&signed_in(api)?, command),
        Command::Subject(command) => subject(&signed_in(api)?, command),
    }
}

fn login(
    api: &ApiClient,
    store: &SessionStore,
    email: Option<String>,
    password: Option<String>,
    google: bool,
) -> Result<()> {
    let mut screen = LoginScreen::new();

    if google {
        let url = screen
            .start_google(api)
            .ok_or_else(|| banner(screen.error()))?;
        println!("Open this URL to sign in with Google:\n\n  {}\n", url);
        println!("Then run: learnmate auth-callback --code <code> --state <state>");
        return Ok(());
    }

    let email = email.context("--email is required (or use --google)")?;
    let password = match password {
        Some(password) => password,
        None => read_password(|| rpassword::prompt_password("Password: "))?,
    };

    match screen.submit(api, store, &email, &password) {
        Some(session) => {
            println!("Signed in as {BOLD}{}{RESET}", session.user().email);
            Ok(())
        }
        None => Err(banner(screen.error())),
    }
}

fn content(api: &ApiClient, command: ContentCommand) -> Result<()> {
    let mut board = ContentBoard::new();

    match command {
        ContentCommand::List => {
            if !board.load(api) {
                return Err(banner(board.error()));
            }
            print!("{}", render::render_content_list(board.items()));
        }
        ContentCommand::Show { id } => {
            let item = api
                .get_content(&id)
                .into_result("Failed to fetch content")
                .map_err(|e| anyhow!(e))?;
            print!("{}", render::render_content(&item));
        }
        ContentCommand::Create {
            title,
            content_type,
            category,
            body,
        } => {
            let mut form = ContentForm::create();
            form.title = title;
            form.content = body.read()?.unwrap_or_default();
            form.content_type = content_type;
            form.category = category.unwrap_or_default();
            let created = board
                .create(api, form.submit_create()?)
                .cloned()
                .ok_or_else(|| banner(board.error()))?;
            println!("Created {BOLD}{}{RESET} ({})", created.title, created.id);
        }
        ContentCommand::Edit {
            id,
            title,
            content_type,
            category,
            body,
        } => {
            if !board.load(api) {
                return Err(banner(board.error()));
            }
            let existing = board
                .start_edit(&id)
                .cloned()
                .context(format!("no content with id {}", id))?;

            let mut form = ContentForm::edit(&existing);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(content_type) = content_type {
                form.content_type = content_type;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(text) = body.read()? {
                form.content = text;
            }

            if form == ContentForm::edit(&existing) {
                board.submit_edit(api, form.cancel());
                println!("No changes; edit cancelled");
                return Ok(());
            }

            if !board.submit_edit(api, form.submit_update()?) {
                return Err(banner(board.error()));
            }
            println!("Updated {}", id);
        }
        ContentCommand::Delete { id, yes } => {
            board.request_delete(&id);
            if !yes && !confirm(&format!("Delete content {}? This cannot be undone.", id))? {
                board.dismiss_delete();
                println!("Cancelled");
                return Ok(());
            }
            if !board.confirm_delete(api) {
                return Err(banner(board.error()));
            }
            println!("Deleted {}", id);
        }
        ContentCommand::Summary { id, save } => process(api, &mut board, &id, AiKind::Summary, save)?,
        ContentCommand::Quiz { id, save } => process(api, &mut board, &id, AiKind::Quiz, save)?,
        ContentCommand::Categorize { id, save } => {
            process(api, &mut board, &id, AiKind::Categorize, save)?
        }
        ContentCommand::Generate {
            kind,
            body,
            max_length,
            difficulty,
            num_questions,
            save,
        } => {
            let mut form = AiContentForm {
                content: body.read()?.unwrap_or_default(),
                kind,
                ..AiContentForm::default()
            };
            if let Some(max_length) = max_length {
                form.max_length = max_length;
            }
            if let Some(difficulty) = difficulty {
                form.difficulty = difficulty;
            }
            if let Some(num_questions) = num_questions {
                form.num_questions = num_questions;
            }

            let mut page = GenerationPage::new();
            let result = page
                .submit(api, &form)
                .cloned()
                .ok_or_else(|| banner(page.error()))?;
            print!("{}", render::render_ai_result(&result));
            if let Some(dir) = save {
                let path = write_ai_result(&result, &dir)?;
                println!("Saved {}", path.display());
            }
        }
        ContentCommand::Export { id, dir } => {
            let item = api
                .get_content(&id)
                .into_result("Failed to fetch content")
                .map_err(|e| anyhow!(e))?;
            let path = write_content(&item, &dir)?;
            println!("Exported {BOLD}{}{RESET} to {}", item.title, path.display());
        }
    }

    Ok(())
}

fn process(
    api: &ApiClient,
    board: &mut ContentBoard,
    id: &str,
    kind: AiKind,
    save: Option<PathBuf>,
) -> Result<()> {
    let result = board
        .process(api, id, kind)
        .cloned()
        .ok_or_else(|| banner(board.error()))?;
    print!("{}", render::render_ai_result(&result));
    if let Some(dir) = save {
        let path = write_ai_result(&result, &dir)?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn semester(api: &ApiClient, command: SemesterCommand) -> Result<()> {
    let mut board = CatalogBoard::<Semester>::new();
    match command {
        SemesterCommand::List => {
            if !board.load(api) {
                return Err(banner(board.error()));
            }
        }
        SemesterCommand::Create { name, code } => {
            let form = SemesterForm { name, code };
            if !board.create(api, form.submit()) {
                return Err(banner(board.error()));
            }
            if let Some(notice) = board.notice() {
                println!("{}", notice);
            }
        }
    }

    if board.entries().is_empty() {
        println!("No semesters yet");
    }
    for semester in board.entries() {
        println!(
            "{BOLD}{}{RESET}  {}  {}",
            semester.name, semester.code, semester.id
        );
    }
    Ok(())
}

fn subject(api: &ApiClient, command: SubjectCommand) -> Result<()> {
    let mut board = CatalogBoard::<Subject>::new();
    match command {
        SubjectCommand::List => {
            if !board.load(api) {
                return Err(banner(board.error()));
            }
        }
        SubjectCommand::Create {
            name,
            code,
            semester_id,
        } => {
            let form = SubjectForm {
                name,
                code,
                semester_id,
            };
            if !board.create(api, form.submit()) {
                return Err(banner(board.error()));
            }
            if let Some(notice) = board.notice() {
                println!("{}", notice);
            }
        }
    }

    if board.entries().is_empty() {
        println!("No subjects yet");
    }
    for subject in board.entries() {
        let semester = subject
            .semester
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(subject.semester_id.as_str());
        println!(
            "{BOLD}{}{RESET}  {}  semester: {}  {}",
            subject.name, subject.code, semester, subject.id
        );
    }
    Ok(())
}

/// Admin screens need a session; the backend would refuse anyway.
fn signed_in(api: ApiClient) -> Result<ApiClient> {
    if !api.is_authenticated() {
        bail!("Not logged in: run `learnmate login` first");
    }
    Ok(api)
}

/// The error banner of a screen as a command failure.
fn banner(error: Option<&str>) -> anyhow::Error {
    anyhow!(error.unwrap_or("request failed").to_string())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Typed passwords are read without echo.
fn read_password(read: impl FnOnce() -> io::Result<String>) -> Result<String> {
    let password = read().context("failed to read password")?;
    if password.is_empty() {
        bail!("a password is required");
    }
    Ok(password)
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_reader_errors_and_empty_input_fail() {
        assert_eq!(read_password(|| Ok("hunter2".into())).unwrap(), "hunter2");
        assert!(read_password(|| Ok(String::new())).is_err());

        let err = read_password(|| Err(io::Error::other("not a tty"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read password"));
    }

    #[test]
    fn admin_commands_need_a_session() {
        let err = signed_in(ApiClient::new("http://localhost:3000")).unwrap_err();
        assert!(err.to_string().contains("learnmate login"));
    }
}
