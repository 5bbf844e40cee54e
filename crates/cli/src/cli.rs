use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "yougile",
    about = "YouGile CLI for project management and CRM",
    long_about = "CLI for YouGile: tasks, projects, boards, users, and more.",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Path to config file (default: ~/.config/yougile-cli/config.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output as JSON (for scripting/piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage config file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Authentication and API keys
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Company details
    #[command(subcommand)]
    Company(CompanyCommand),

    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage boards
    #[command(subcommand)]
    Boards(BoardsCommand),

    /// Manage columns
    #[command(subcommand)]
    Columns(ColumnsCommand),

    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Manage departments
    #[command(subcommand)]
    Departments(DepartmentsCommand),

    /// Manage webhooks
    #[command(subcommand)]
    Webhooks(WebhooksCommand),

    /// File operations
    #[command(subcommand)]
    Files(FilesCommand),

    /// Group chats and messages
    #[command(subcommand)]
    Chats(ChatsCommand),

    /// String and sprint stickers
    #[command(subcommand)]
    Stickers(StickersCommand),

    /// CRM contacts and contact persons
    #[command(subcommand)]
    Crm(CrmCommand),
}

/// `--limit` / `--offset` for list commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Max items to return
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
    /// Offset for pagination
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

/// Account credentials for the key-management endpoints.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Account password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print path to config file
    Path,
    /// Show current config (api_key masked in human output)
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Log in with email and password, save API key to config
    Login {
        #[command(flatten)]
        credentials: Credentials,
        /// Company to log into (default: first company of the account)
        #[arg(long)]
        company_id: Option<String>,
        /// API host to log into and save
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// List companies (requires email and password)
    Companies {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Manage API keys
    #[command(subcommand)]
    Keys(KeysCommand),
}

#[derive(Subcommand)]
pub enum KeysCommand {
    /// List API keys (requires email and password)
    List {
        #[command(flatten)]
        credentials: Credentials,
        /// Filter by company ID
        #[arg(long)]
        company_id: Option<String>,
    },
    /// Create an API key (requires email, password, company-id)
    Create {
        #[command(flatten)]
        credentials: Credentials,
        /// Company ID
        #[arg(long)]
        company_id: String,
    },
    /// Delete an API key by key value
    Delete {
        /// Key to delete
        key: String,
    },
}

#[derive(Subcommand)]
pub enum CompanyCommand {
    /// Get current company details
    Get,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by email
        #[arg(long)]
        email: Option<String>,
        /// Filter by project ID
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Get user by ID
    Get { id: String },
}

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
    },
    /// Get project by ID
    Get { id: String },
}

#[derive(Subcommand)]
pub enum BoardsCommand {
    /// List boards
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
        /// Filter by project ID
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Get board by ID
    Get { id: String },
}

#[derive(Subcommand)]
pub enum ColumnsCommand {
    /// List columns
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
        /// Filter by board ID
        #[arg(long)]
        board_id: Option<String>,
    },
    /// Get column by ID
    Get { id: String },
}

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List tasks
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
        /// Filter by column ID
        #[arg(long)]
        column_id: Option<String>,
    },
    /// Get task by ID
    Get { id: String },
    /// Create a task
    Create {
        /// Task title
        #[arg(long)]
        title: String,
        /// Column ID (optional)
        #[arg(long)]
        column_id: Option<String>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated user IDs to assign
        #[arg(long, value_name = "IDS")]
        assigned: Option<String>,
    },
    /// Update a task
    Update {
        id: String,
        /// Task title
        #[arg(long)]
        title: Option<String>,
        /// Column ID (move task to another column)
        #[arg(long)]
        column_id: Option<String>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated user IDs to assign
        #[arg(long, value_name = "IDS")]
        assigned: Option<String>,
        /// Mark the task completed or not
        #[arg(long, value_name = "BOOL")]
        completed: Option<bool>,
        /// Archive or unarchive the task
        #[arg(long, value_name = "BOOL")]
        archived: Option<bool>,
    },
    /// Task chat subscribers
    #[command(subcommand)]
    ChatSubscribers(ChatSubscribersCommand),
}

#[derive(Subcommand)]
pub enum ChatSubscribersCommand {
    /// Get task chat subscribers
    Get { task_id: String },
    /// Update task chat subscribers
    Update {
        task_id: String,
        /// Comma-separated list of user IDs
        #[arg(long, value_name = "IDS")]
        user_ids: String,
    },
}

#[derive(Subcommand)]
pub enum DepartmentsCommand {
    /// List departments
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
        /// Filter by parent department ID
        #[arg(long)]
        parent_id: Option<String>,
    },
    /// Get department by ID
    Get { id: String },
}

#[derive(Subcommand)]
pub enum WebhooksCommand {
    /// List webhooks
    List {
        /// Include deleted webhooks
        #[arg(long)]
        include_deleted: bool,
    },
    /// Create a webhook
    Create {
        /// Callback URL
        #[arg(long)]
        url: String,
        /// Event pattern, e.g. task-created or .*
        #[arg(long)]
        event: String,
    },
}

#[derive(Subcommand)]
pub enum FilesCommand {
    /// Upload a file
    Upload { file: PathBuf },
}

#[derive(Subcommand)]
pub enum ChatsCommand {
    /// List group chats
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by title
        #[arg(long)]
        title: Option<String>,
    },
    /// Get group chat by ID
    Get { id: String },
    /// Chat messages
    #[command(subcommand)]
    Messages(MessagesCommand),
}

#[derive(Subcommand)]
pub enum MessagesCommand {
    /// List messages in a chat
    List {
        chat_id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Send a message to a chat
    Send {
        chat_id: String,
        /// Message text
        #[arg(long)]
        text: String,
    },
}

#[derive(Subcommand)]
pub enum StickersCommand {
    /// String stickers
    #[command(subcommand)]
    String(StickerCommand),
    /// Sprint stickers
    #[command(subcommand)]
    Sprint(StickerCommand),
}

#[derive(Subcommand)]
pub enum StickerCommand {
    /// List stickers
    List {
        /// Include deleted stickers
        #[arg(long)]
        include_deleted: bool,
    },
    /// Get sticker by ID
    Get { id: String },
    /// Create a sticker
    Create {
        /// Sticker name
        #[arg(long)]
        name: String,
    },
    /// Update a sticker
    Update {
        id: String,
        /// Sticker name
        #[arg(long)]
        name: Option<String>,
    },
    /// Sticker states
    #[command(subcommand)]
    States(StatesCommand),
}

#[derive(Subcommand)]
pub enum StatesCommand {
    /// List states of a sticker
    List { sticker_id: String },
    /// Get a sticker state by ID
    Get { sticker_id: String, state_id: String },
    /// Create a state for a sticker
    Create {
        sticker_id: String,
        /// State name
        #[arg(long)]
        name: String,
    },
    /// Update a sticker state
    Update {
        sticker_id: String,
        state_id: String,
        /// State name
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CrmCommand {
    /// Contact persons
    #[command(subcommand)]
    ContactPersons(ContactPersonsCommand),
    /// Contacts
    #[command(subcommand)]
    Contacts(ContactsCommand),
}

#[derive(Subcommand)]
pub enum ContactPersonsCommand {
    /// Create a contact person in a CRM project
    Create {
        /// Contact name/title
        #[arg(long)]
        title: String,
        /// CRM project ID
        #[arg(long)]
        project_id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        additional_phone: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ContactsCommand {
    /// Find contact by external integration (provider and chat ID)
    ByExternalId {
        /// External integration provider
        #[arg(long)]
        provider: String,
        /// Chat ID in the external messenger
        #[arg(long)]
        chat_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yougile", "tasks", "list", "--json", "-c", "/tmp/c.yaml", "--limit", "10",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        match cli.command {
            Commands::Tasks(TasksCommand::List { page, .. }) => {
                assert_eq!(page.limit, 10);
                assert_eq!(page.offset, 0);
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_nested_sticker_state_command() {
        let cli = Cli::try_parse_from([
            "yougile", "stickers", "sprint", "states", "update", "s-1", "st-2", "--name", "Done",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stickers(StickersCommand::Sprint(StickerCommand::States(
                StatesCommand::Update { .. }
            )))
        ));
    }

    #[test]
    fn test_missing_required_flag_is_rejected() {
        assert!(Cli::try_parse_from(["yougile", "tasks", "create"]).is_err());
        assert!(Cli::try_parse_from(["yougile", "auth", "login"]).is_err());
    }

    #[test]
    fn test_kebab_case_subcommands() {
        assert!(Cli::try_parse_from(["yougile", "tasks", "chat-subscribers", "get", "t-1"]).is_ok());
        assert!(Cli::try_parse_from([
            "yougile", "crm", "contacts", "by-external-id", "--provider", "tg", "--chat-id", "42",
        ])
        .is_ok());
    }
}
