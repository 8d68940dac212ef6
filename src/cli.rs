use clap::{Parser, Subcommand};
use service::config::Config;

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version, about = "Command line client for the todo REST API")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(long, short)]
        email: String,
        #[arg(long, short, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account; a confirmation code is sent by email
    Register {
        #[arg(long, short)]
        email: String,
        #[arg(long, short, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, short, default_value = "")]
        name: String,
    },
    /// Confirm an account with the emailed code
    Confirm {
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        code: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage todos
    #[command(subcommand)]
    Todo(TodoCommand),
    /// Manage tags (premium users only)
    #[command(subcommand)]
    Tag(TagCommand),
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// List all todos
    List,
    /// Show a single todo
    Show { id: String },
    /// Add a todo
    Add {
        description: String,
        /// Due date as YYYY-MM-DD or an RFC 3339 timestamp
        #[arg(long)]
        due: Option<String>,
        /// Tag id to attach; may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Change fields of a todo
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD or an RFC 3339 timestamp
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// Replace the tags with these tag ids; may be repeated
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },
    /// Toggle the done flag of a todo
    Done { id: String },
    /// Delete a todo
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// List all tags
    List,
    /// Create a tag
    Add { name: String },
    /// Delete a tag
    Delete { id: String },
    /// List the tags of a todo
    TodoTags { todo_id: String },
    /// Attach a tag to a todo
    Assign { todo_id: String, tag_id: String },
    /// Detach a tag from a todo
    Unassign { todo_id: String, tag_id: String },
}
